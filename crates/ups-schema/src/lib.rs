//! Shared wire types for the push server admin API.
//!
//! These structures are exchanged between the admin client (consumer) and
//! the in-memory mock server (producer), and match the JSON the real server
//! emits: camelCase keys, with the public identifiers spelled
//! `pushApplicationID` and `variantID`.

/// Applications and their create payload.
pub mod application;
/// Variants, their platform kinds and create payloads.
pub mod variant;

// Re-exports
pub use application::{NewApplication, PushApplication};
pub use variant::{
    IosCertificate, NewAndroidVariant, NewIosVariant, NewVariant, UnknownVariantType, Variant,
    VariantKind, VariantType,
};

/// Developer name the server records when a create payload omits one.
pub const DEFAULT_DEVELOPER: &str = "admin";
