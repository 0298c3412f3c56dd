//! Status-aware request helpers shared by both resource admins.

use serde::de::DeserializeOwned;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::applications::ApplicationsAdmin;
use crate::error::{Error, Result};
use crate::paging::Page;
use crate::transport::{Body, Request, Response, Transport};
use crate::variants::VariantsAdmin;

/// Entry point of the admin API.
///
/// Holds no state besides its transport and page size, so it is cheap to
/// clone and safe to share between tasks.
#[derive(Clone)]
pub struct UpsClient {
    transport: Arc<dyn Transport>,
    page_size: NonZeroUsize,
}

impl UpsClient {
    /// Page size used when none is configured.
    pub const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::new(10).unwrap();

    pub fn new(transport: impl Transport + 'static) -> Self {
        Self::from_arc(Arc::new(transport))
    }

    pub fn from_arc(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }

    /// Build an HTTP-backed client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    #[cfg(feature = "network")]
    pub fn from_config(config: &crate::config::ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = crate::transport::HttpTransport::new(&config.base_url, config.timeout())?;
        Ok(Self::new(transport).with_page_size(config.page_size()?))
    }

    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Admin for the application collection.
    pub fn applications(&self) -> ApplicationsAdmin<'_> {
        ApplicationsAdmin::new(self)
    }

    /// Admin for the variants of one application.
    pub fn variants(&self, push_application_id: impl Into<String>) -> VariantsAdmin<'_> {
        VariantsAdmin::new(self, push_application_id.into())
    }

    /// Execute a request and turn any non-2xx status into an [`Error`].
    pub(crate) async fn send(&self, request: Request) -> Result<Response> {
        let response = self.transport.execute(request).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(Error::from_status(response.status, &response.body))
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(Request::get(path)).await?;
        decode(&response)
    }

    /// GET a single resource, mapping 404 to `None`.
    pub(crate) async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        match self.get(path).await {
            Ok(item) => Ok(Some(item)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        page: Page,
    ) -> Result<Vec<T>> {
        let request = Request::get(path)
            .with_query("page", page.number)
            .with_query("per_page", page.size);
        let response = self.send(request).await?;
        decode(&response)
    }

    pub(crate) async fn post<T: DeserializeOwned>(&self, path: &str, body: Body) -> Result<T> {
        let response = self.send(Request::post(path, body)).await?;
        decode(&response)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.send(Request::delete(path)).await?;
        Ok(())
    }
}

impl fmt::Debug for UpsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpsClient")
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

fn decode<T: DeserializeOwned>(response: &Response) -> Result<T> {
    Ok(serde_json::from_slice(&response.body)?)
}

/// Reject identifiers that cannot be used as a single URL path segment.
pub(crate) fn path_segment<'a>(kind: &str, id: &'a str) -> Result<&'a str> {
    if id.is_empty() {
        return Err(Error::InvalidIdentifier(format!("{kind} must not be empty")));
    }
    if id.contains(['/', '?', '#', '%']) {
        return Err(Error::InvalidIdentifier(format!(
            "{kind} '{id}' contains a reserved URL character"
        )));
    }
    // Dot segments are collapsed by URL normalization.
    if id == "." || id == ".." {
        return Err(Error::InvalidIdentifier(format!(
            "{kind} '{id}' is a relative path segment"
        )));
    }
    Ok(id)
}
