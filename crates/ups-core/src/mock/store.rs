//! Server-side state of the mock: applications with nested variants.

use thiserror::Error;
use ups_schema::{
    DEFAULT_DEVELOPER, NewAndroidVariant, NewApplication, PushApplication, Variant, VariantKind,
};
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Application with id {0} not found")]
    ApplicationNotFound(String),

    #[error("Variant with id {variant_id} not found in application {push_application_id}")]
    VariantNotFound {
        push_application_id: String,
        variant_id: String,
    },

    #[error("Application with id {0} already exists")]
    DuplicateApplication(String),

    #[error("Variant with id {0} already exists")]
    DuplicateVariant(String),
}

impl StoreError {
    /// Status the mock server answers with.
    pub fn status(&self) -> u16 {
        match self {
            Self::ApplicationNotFound(_) | Self::VariantNotFound { .. } => 404,
            Self::DuplicateApplication(_) | Self::DuplicateVariant(_) => 409,
        }
    }
}

/// Input for inserting an application.
///
/// Unlike [`NewApplication`], a seed may pin its public identifier, which is
/// how tests set up known ids without going through HTTP.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationSeed {
    pub push_application_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub developer: Option<String>,
}

impl ApplicationSeed {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, push_application_id: impl Into<String>) -> Self {
        self.push_application_id = Some(push_application_id.into());
        self
    }

    pub fn with_developer(mut self, developer: impl Into<String>) -> Self {
        self.developer = Some(developer.into());
        self
    }
}

impl From<NewApplication> for ApplicationSeed {
    fn from(app: NewApplication) -> Self {
        Self {
            push_application_id: None,
            name: app.name,
            description: app.description,
            developer: app.developer,
        }
    }
}

/// Input for inserting a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSeed {
    pub variant_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub developer: Option<String>,
    pub kind: VariantKind,
}

impl VariantSeed {
    pub fn new(name: impl Into<String>, kind: VariantKind) -> Self {
        Self {
            variant_id: None,
            name: name.into(),
            description: None,
            developer: None,
            kind,
        }
    }

    pub fn with_id(mut self, variant_id: impl Into<String>) -> Self {
        self.variant_id = Some(variant_id.into());
        self
    }

    pub fn with_developer(mut self, developer: impl Into<String>) -> Self {
        self.developer = Some(developer.into());
        self
    }
}

impl From<NewAndroidVariant> for VariantSeed {
    fn from(v: NewAndroidVariant) -> Self {
        Self {
            variant_id: None,
            name: v.name,
            description: v.description,
            developer: v.developer,
            kind: VariantKind::Android {
                google_key: v.google_key,
                project_number: v.project_number,
            },
        }
    }
}

/// Applications in insertion order.
#[derive(Debug, Default)]
pub struct UpsStore {
    applications: Vec<PushApplication>,
}

impl UpsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.applications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
    }

    pub fn clear(&mut self) {
        self.applications.clear();
    }

    /// Insert an application, generating its id and master secret, and its
    /// public id when the seed leaves it out.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateApplication`] if the public id is taken.
    pub fn create_application(
        &mut self,
        seed: ApplicationSeed,
    ) -> Result<PushApplication, StoreError> {
        let push_application_id = seed.push_application_id.unwrap_or_else(generate_id);
        if self.application(&push_application_id).is_some() {
            return Err(StoreError::DuplicateApplication(push_application_id));
        }

        let app = PushApplication {
            id: generate_id(),
            push_application_id,
            name: seed.name,
            description: seed.description,
            developer: seed
                .developer
                .unwrap_or_else(|| DEFAULT_DEVELOPER.to_string()),
            master_secret: generate_id(),
            variants: Vec::new(),
        };
        self.applications.push(app.clone());
        Ok(app)
    }

    pub fn application(&self, push_application_id: &str) -> Option<&PushApplication> {
        self.applications
            .iter()
            .find(|app| app.push_application_id == push_application_id)
    }

    /// One page of applications. `page` starts at 1.
    pub fn applications_page(&self, page: usize, per_page: usize) -> &[PushApplication] {
        page_of(&self.applications, page, per_page)
    }

    /// # Errors
    ///
    /// Returns [`StoreError::ApplicationNotFound`] if nothing was removed.
    pub fn delete_application(&mut self, push_application_id: &str) -> Result<(), StoreError> {
        let before = self.applications.len();
        self.applications
            .retain(|app| app.push_application_id != push_application_id);
        if self.applications.len() == before {
            return Err(StoreError::ApplicationNotFound(
                push_application_id.to_string(),
            ));
        }
        Ok(())
    }

    /// Append a variant to an application.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ApplicationNotFound`] for an unknown parent and
    /// [`StoreError::DuplicateVariant`] if the variant id is taken.
    pub fn create_variant(
        &mut self,
        push_application_id: &str,
        seed: VariantSeed,
    ) -> Result<Variant, StoreError> {
        let app = self.application_mut(push_application_id)?;
        let variant_id = seed.variant_id.unwrap_or_else(generate_id);
        if app.variants.iter().any(|v| v.variant_id == variant_id) {
            return Err(StoreError::DuplicateVariant(variant_id));
        }

        let variant = Variant {
            id: generate_id(),
            variant_id,
            name: seed.name,
            description: seed.description,
            developer: seed
                .developer
                .unwrap_or_else(|| DEFAULT_DEVELOPER.to_string()),
            secret: generate_id(),
            kind: seed.kind,
        };
        app.variants.push(variant.clone());
        Ok(variant)
    }

    /// One page of an application's variants. `page` starts at 1.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ApplicationNotFound`] for an unknown parent.
    pub fn variants_page(
        &self,
        push_application_id: &str,
        page: usize,
        per_page: usize,
    ) -> Result<&[Variant], StoreError> {
        let app = self
            .application(push_application_id)
            .ok_or_else(|| StoreError::ApplicationNotFound(push_application_id.to_string()))?;
        Ok(page_of(&app.variants, page, per_page))
    }

    /// # Errors
    ///
    /// Returns a not-found error for an unknown parent or variant.
    pub fn variant(
        &self,
        push_application_id: &str,
        variant_id: &str,
    ) -> Result<&Variant, StoreError> {
        let app = self
            .application(push_application_id)
            .ok_or_else(|| StoreError::ApplicationNotFound(push_application_id.to_string()))?;
        app.variants
            .iter()
            .find(|v| v.variant_id == variant_id)
            .ok_or_else(|| StoreError::VariantNotFound {
                push_application_id: push_application_id.to_string(),
                variant_id: variant_id.to_string(),
            })
    }

    /// # Errors
    ///
    /// Returns a not-found error for an unknown parent or variant.
    pub fn delete_variant(
        &mut self,
        push_application_id: &str,
        variant_id: &str,
    ) -> Result<(), StoreError> {
        let app = self.application_mut(push_application_id)?;
        let before = app.variants.len();
        app.variants.retain(|v| v.variant_id != variant_id);
        if app.variants.len() == before {
            return Err(StoreError::VariantNotFound {
                push_application_id: push_application_id.to_string(),
                variant_id: variant_id.to_string(),
            });
        }
        Ok(())
    }

    fn application_mut(
        &mut self,
        push_application_id: &str,
    ) -> Result<&mut PushApplication, StoreError> {
        self.applications
            .iter_mut()
            .find(|app| app.push_application_id == push_application_id)
            .ok_or_else(|| StoreError::ApplicationNotFound(push_application_id.to_string()))
    }
}

pub(crate) fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

fn page_of<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    let start = page
        .saturating_sub(1)
        .saturating_mul(per_page)
        .min(items.len());
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn android() -> VariantKind {
        VariantKind::Android {
            google_key: "123456".to_string(),
            project_number: None,
        }
    }

    #[test]
    fn test_create_fills_generated_fields() {
        let mut store = UpsStore::new();
        let app = store
            .create_application(ApplicationSeed::new("Demo"))
            .unwrap();
        assert!(!app.id.is_empty());
        assert!(!app.push_application_id.is_empty());
        assert!(!app.master_secret.is_empty());
        assert_ne!(app.master_secret, app.push_application_id);
        assert_eq!(app.developer, DEFAULT_DEVELOPER);
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let mut store = UpsStore::new();
        store
            .create_application(ApplicationSeed::new("A").with_id("same"))
            .unwrap();
        let err = store
            .create_application(ApplicationSeed::new("B").with_id("same"))
            .unwrap_err();
        assert_eq!(err, StoreError::DuplicateApplication("same".to_string()));
        assert_eq!(err.status(), 409);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_pages_slice_in_insertion_order() {
        let mut store = UpsStore::new();
        for i in 0..25 {
            store
                .create_application(ApplicationSeed::new(format!("App {i}")))
                .unwrap();
        }

        let names = |page: &[PushApplication]| -> Vec<String> {
            page.iter().map(|a| a.name.clone()).collect()
        };
        assert_eq!(names(store.applications_page(1, 10))[0], "App 0");
        assert_eq!(names(store.applications_page(3, 10)), ["App 20", "App 21", "App 22", "App 23", "App 24"]);
        assert!(store.applications_page(4, 10).is_empty());
        assert!(store.applications_page(100, 10).is_empty());
    }

    #[test]
    fn test_delete_application() {
        let mut store = UpsStore::new();
        store
            .create_application(ApplicationSeed::new("A").with_id("a"))
            .unwrap();
        store.delete_application("a").unwrap();
        assert!(store.is_empty());
        assert_eq!(
            store.delete_application("a"),
            Err(StoreError::ApplicationNotFound("a".to_string()))
        );
    }

    #[test]
    fn test_variants_are_scoped_to_their_application() {
        let mut store = UpsStore::new();
        store
            .create_application(ApplicationSeed::new("A").with_id("a"))
            .unwrap();
        store
            .create_application(ApplicationSeed::new("B").with_id("b"))
            .unwrap();

        let v = store
            .create_variant("a", VariantSeed::new("V", android()).with_id("v"))
            .unwrap();
        assert_eq!(store.variant("a", "v").unwrap(), &v);
        assert!(store.variant("b", "v").is_err());
        assert!(store.variants_page("b", 1, 10).unwrap().is_empty());

        // Same variant id under another application is fine.
        store
            .create_variant("b", VariantSeed::new("V", android()).with_id("v"))
            .unwrap();
        assert_eq!(
            store.create_variant("a", VariantSeed::new("V2", android()).with_id("v")),
            Err(StoreError::DuplicateVariant("v".to_string()))
        );
    }

    #[test]
    fn test_variant_for_missing_application() {
        let mut store = UpsStore::new();
        let err = store
            .create_variant("nope", VariantSeed::new("V", android()))
            .unwrap_err();
        assert_eq!(err.to_string(), "Application with id nope not found");
    }

    #[test]
    fn test_delete_variant() {
        let mut store = UpsStore::new();
        store
            .create_application(ApplicationSeed::new("A").with_id("a"))
            .unwrap();
        store
            .create_variant("a", VariantSeed::new("V", android()).with_id("v"))
            .unwrap();
        store.delete_variant("a", "v").unwrap();
        assert!(matches!(
            store.delete_variant("a", "v"),
            Err(StoreError::VariantNotFound { .. })
        ));
    }
}
