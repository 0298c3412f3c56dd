use serde::{Deserialize, Serialize};

use crate::variant::Variant;

/// A push-enabled application as returned by the server.
///
/// Every identifier and secret here is assigned server-side. Clients build a
/// [`NewApplication`] instead, which has no room for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushApplication {
    /// Internal identifier.
    #[serde(default)]
    pub id: String,

    /// Public identifier used in resource URLs.
    #[serde(rename = "pushApplicationID")]
    pub push_application_id: String,

    /// Display name.
    pub name: String,

    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Owning developer.
    #[serde(default)]
    pub developer: String,

    /// Generated on creation.
    #[serde(default)]
    pub master_secret: String,

    /// Variants in insertion order.
    #[serde(default)]
    pub variants: Vec<Variant>,
}

/// Payload for creating an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    /// Display name.
    pub name: String,

    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Owning developer. The server fills in a default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
}

impl NewApplication {
    /// Create a payload with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            developer: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the developer.
    pub fn with_developer(mut self, developer: impl Into<String>) -> Self {
        self.developer = Some(developer.into());
        self
    }
}
