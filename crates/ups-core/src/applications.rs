use ups_schema::{NewApplication, PushApplication};

use crate::client::{UpsClient, path_segment};
use crate::error::Result;
use crate::filter::{ApplicationFilter, Filter};
use crate::paging;
use crate::transport::Body;

const COLLECTION: &str = "applications";
const ID_KEY: &str = <ApplicationFilter as Filter<PushApplication>>::IDENTIFIER_KEY;

/// CRUD operations on the application collection.
#[derive(Debug, Clone, Copy)]
pub struct ApplicationsAdmin<'a> {
    client: &'a UpsClient,
}

impl<'a> ApplicationsAdmin<'a> {
    pub(crate) fn new(client: &'a UpsClient) -> Self {
        Self { client }
    }

    /// Find applications matching `filter`.
    ///
    /// An empty filter returns the first page only; see [`crate::paging`].
    pub async fn find(&self, filter: &ApplicationFilter) -> Result<Vec<PushApplication>> {
        paging::find(self.client, COLLECTION, filter).await
    }

    /// Every application on the server, page by page.
    pub async fn find_all(&self) -> Result<Vec<PushApplication>> {
        paging::scan(self.client, COLLECTION, |_| true).await
    }

    /// Look up one application, `None` if the server does not know it.
    pub async fn get(&self, push_application_id: &str) -> Result<Option<PushApplication>> {
        let id = path_segment(ID_KEY, push_application_id)?;
        self.client.get_optional(&format!("{COLLECTION}/{id}")).await
    }

    /// Create an application. Identifiers and secrets come from the server.
    pub async fn create(&self, app: &NewApplication) -> Result<PushApplication> {
        let body = Body::Json(serde_json::to_value(app)?);
        let created: PushApplication = self.client.post(COLLECTION, body).await?;
        tracing::info!(
            "Created application '{}' ({})",
            created.name,
            created.push_application_id
        );
        Ok(created)
    }

    /// Delete an application by public identifier.
    ///
    /// # Errors
    ///
    /// A missing application is reported as [`crate::Error::NotFound`].
    pub async fn delete(&self, push_application_id: &str) -> Result<()> {
        let id = path_segment(ID_KEY, push_application_id)?;
        self.client.delete(&format!("{COLLECTION}/{id}")).await?;
        tracing::info!("Deleted application {id}");
        Ok(())
    }
}
