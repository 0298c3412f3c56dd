use ups_schema::{NewIosVariant, NewVariant, PushApplication, Variant};

use crate::client::{UpsClient, path_segment};
use crate::error::Result;
use crate::filter::{ApplicationFilter, Filter, VariantFilter};
use crate::paging;
use crate::transport::{Body, FormPart};

const APP_ID_KEY: &str = <ApplicationFilter as Filter<PushApplication>>::IDENTIFIER_KEY;
const ID_KEY: &str = <VariantFilter as Filter<Variant>>::IDENTIFIER_KEY;

/// Content type announced for uploaded APNs certificates.
pub const CERTIFICATE_CONTENT_TYPE: &str = "application/x-pkcs12";

/// CRUD operations on the variants of one application.
#[derive(Debug, Clone)]
pub struct VariantsAdmin<'a> {
    client: &'a UpsClient,
    push_application_id: String,
}

impl<'a> VariantsAdmin<'a> {
    pub(crate) fn new(client: &'a UpsClient, push_application_id: String) -> Self {
        Self {
            client,
            push_application_id,
        }
    }

    /// Parent application.
    pub fn push_application_id(&self) -> &str {
        &self.push_application_id
    }

    fn app_path(&self) -> Result<String> {
        let app_id = path_segment(APP_ID_KEY, &self.push_application_id)?;
        Ok(format!("applications/{app_id}"))
    }

    fn collection(&self) -> Result<String> {
        Ok(format!("{}/variants", self.app_path()?))
    }

    /// Find variants matching `filter`.
    ///
    /// An empty filter returns the first page only; see [`crate::paging`].
    pub async fn find(&self, filter: &VariantFilter) -> Result<Vec<Variant>> {
        paging::find(self.client, &self.collection()?, filter).await
    }

    /// Every variant of the application, page by page.
    pub async fn find_all(&self) -> Result<Vec<Variant>> {
        paging::scan(self.client, &self.collection()?, |_| true).await
    }

    /// Look up one variant, `None` if the server does not know it.
    pub async fn get(&self, variant_id: &str) -> Result<Option<Variant>> {
        let id = path_segment(ID_KEY, variant_id)?;
        let path = format!("{}/{id}", self.collection()?);
        self.client.get_optional(&path).await
    }

    /// Create a variant under the application.
    ///
    /// Android payloads go out as JSON, iOS payloads as a multipart form
    /// carrying the certificate file.
    ///
    /// # Errors
    ///
    /// A missing parent application is reported as [`crate::Error::NotFound`].
    pub async fn create(&self, variant: &NewVariant) -> Result<Variant> {
        let path = format!("{}/{}", self.app_path()?, variant.variant_type());
        let body = match variant {
            NewVariant::Android(android) => Body::Json(serde_json::to_value(android)?),
            NewVariant::Ios(ios) => Body::Multipart(ios_form(ios)),
        };

        let created: Variant = self.client.post(&path, body).await?;
        tracing::info!(
            "Created {} variant '{}' ({}) under {}",
            created.variant_type(),
            created.name,
            created.variant_id,
            self.push_application_id
        );
        Ok(created)
    }

    /// Delete a variant by public identifier.
    ///
    /// # Errors
    ///
    /// A missing variant is reported as [`crate::Error::NotFound`].
    pub async fn delete(&self, variant_id: &str) -> Result<()> {
        let id = path_segment(ID_KEY, variant_id)?;
        let path = format!("{}/{id}", self.collection()?);
        self.client.delete(&path).await?;
        tracing::info!("Deleted variant {id} of {}", self.push_application_id);
        Ok(())
    }
}

fn ios_form(variant: &NewIosVariant) -> Vec<FormPart> {
    let mut parts = vec![FormPart::text("name", &variant.name)];
    if let Some(description) = &variant.description {
        parts.push(FormPart::text("description", description));
    }
    if let Some(developer) = &variant.developer {
        parts.push(FormPart::text("developer", developer));
    }
    parts.push(FormPart::text("password", &variant.password));
    parts.push(FormPart::text("production", variant.production.to_string()));
    parts.push(FormPart::file(
        "certificate",
        &variant.certificate.file_name,
        CERTIFICATE_CONTENT_TYPE,
        variant.certificate.bytes.clone(),
    ));
    parts
}
