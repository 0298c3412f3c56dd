//! Bulk seed builders for tests.

use ups_schema::VariantKind;

use super::store::{ApplicationSeed, VariantSeed, generate_id};

pub const APP_NAME_PREFIX: &str = "TEST APPLICATION";
pub const VARIANT_NAME_PREFIX: &str = "TEST VARIANT";

/// `count` application seeds named `TEST APPLICATION {i}`, developed by
/// `admin`, with server-generated ids.
pub fn application_seeds(count: usize) -> Vec<ApplicationSeed> {
    (0..count)
        .map(|i| {
            ApplicationSeed::new(format!("{APP_NAME_PREFIX} {i}"))
                .with_developer(ups_schema::DEFAULT_DEVELOPER)
        })
        .collect()
}

/// Application seeds pinned to the given public ids, in order.
pub fn application_seeds_with_ids(ids: &[String]) -> Vec<ApplicationSeed> {
    application_seeds(ids.len())
        .into_iter()
        .zip(ids)
        .map(|(seed, id)| seed.with_id(id.clone()))
        .collect()
}

/// `count` variant seeds of the same kind named `TEST VARIANT {i}`, each with
/// a fresh variant id.
pub fn variant_seeds(count: usize, kind: &VariantKind) -> Vec<VariantSeed> {
    (0..count)
        .map(|i| {
            VariantSeed::new(format!("{VARIANT_NAME_PREFIX} {i}"), kind.clone())
                .with_id(generate_id())
                .with_developer(ups_schema::DEFAULT_DEVELOPER)
        })
        .collect()
}

/// `count` fresh identifiers.
pub fn generate_ids(count: usize) -> Vec<String> {
    (0..count).map(|_| generate_id()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_ids_are_unique() {
        let ids = generate_ids(50);
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 50);
    }

    #[test]
    fn test_seeds_follow_naming_scheme() {
        let seeds = application_seeds_with_ids(&["x".to_string(), "y".to_string()]);
        assert_eq!(seeds[1].name, "TEST APPLICATION 1");
        assert_eq!(seeds[1].push_application_id.as_deref(), Some("y"));
        assert_eq!(seeds[0].developer.as_deref(), Some("admin"));
    }
}
