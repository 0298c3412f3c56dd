//! In-memory push server for tests and demos.
//!
//! [`MockUps`] implements [`Transport`] by routing each request against an
//! in-memory [`UpsStore`], answering with the same statuses and bodies as the
//! REST service. Handing it to [`crate::UpsClient`] instead of an
//! `HttpTransport` is the only change a test needs.
//!
//! Clones share the same store, so a test can keep one handle for seeding and
//! inspection while the client owns another.

pub mod fixtures;
pub mod store;

use async_trait::async_trait;
use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use ups_schema::{NewAndroidVariant, NewApplication, PushApplication, Variant, VariantKind};

pub use store::{ApplicationSeed, StoreError, UpsStore, VariantSeed};

use crate::error::Result;
use crate::transport::{Body, FormPart, FormValue, Method, Request, Response, Transport};

/// Page size the list endpoints use when `per_page` is absent.
pub const DEFAULT_PER_PAGE: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct MockUps {
    store: Arc<Mutex<UpsStore>>,
}

impl MockUps {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, UpsStore> {
        // A panicking test must not take the other tests' fixture down with it.
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the store.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut UpsStore) -> R) -> R {
        f(&mut self.lock())
    }

    /// Drop every application.
    pub fn reset(&self) {
        self.lock().clear();
    }

    pub fn application_count(&self) -> usize {
        self.lock().len()
    }

    /// Insert applications directly, bypassing HTTP.
    ///
    /// # Errors
    ///
    /// Stops at the first duplicate public id.
    pub fn seed_applications(
        &self,
        seeds: impl IntoIterator<Item = ApplicationSeed>,
    ) -> Result<Vec<PushApplication>, StoreError> {
        let mut store = self.lock();
        seeds
            .into_iter()
            .map(|seed| store.create_application(seed))
            .collect()
    }

    /// Insert variants under an application directly, bypassing HTTP.
    ///
    /// # Errors
    ///
    /// Fails if the application is unknown or a variant id is taken.
    pub fn seed_variants(
        &self,
        push_application_id: &str,
        seeds: impl IntoIterator<Item = VariantSeed>,
    ) -> Result<Vec<Variant>, StoreError> {
        let mut store = self.lock();
        seeds
            .into_iter()
            .map(|seed| store.create_variant(push_application_id, seed))
            .collect()
    }

    /// Answer one request.
    pub fn handle(&self, request: &Request) -> Response {
        let response = route(&mut self.lock(), request);
        tracing::debug!(
            "mock {} /{} -> {}",
            request.method,
            request.path.trim_start_matches('/'),
            response.status
        );
        response
    }
}

#[async_trait]
impl Transport for MockUps {
    async fn execute(&self, request: Request) -> Result<Response> {
        Ok(self.handle(&request))
    }
}

fn route(store: &mut UpsStore, request: &Request) -> Response {
    let segments: Vec<&str> = request
        .path
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    match (request.method, segments.as_slice()) {
        (Method::Get, ["applications"]) => match page_params(request) {
            Ok((page, per_page)) => Response::json(200, store.applications_page(page, per_page)),
            Err(resp) => resp,
        },
        (Method::Post, ["applications"]) => create_application(store, &request.body),
        (Method::Get, ["applications", app_id]) => respond(
            200,
            store
                .application(app_id)
                .ok_or_else(|| StoreError::ApplicationNotFound((*app_id).to_string())),
        ),
        (Method::Delete, ["applications", app_id]) => {
            empty_or_error(store.delete_application(app_id))
        }
        (Method::Get, ["applications", app_id, "variants"]) => match page_params(request) {
            Ok((page, per_page)) => respond(200, store.variants_page(app_id, page, per_page)),
            Err(resp) => resp,
        },
        (Method::Get, ["applications", app_id, "variants", variant_id]) => {
            respond(200, store.variant(app_id, variant_id))
        }
        (Method::Delete, ["applications", app_id, "variants", variant_id]) => {
            empty_or_error(store.delete_variant(app_id, variant_id))
        }
        (Method::Post, ["applications", app_id, "android"]) => {
            create_android_variant(store, app_id, &request.body)
        }
        (Method::Post, ["applications", app_id, "ios"]) => {
            create_ios_variant(store, app_id, &request.body)
        }
        (method, segments) if is_known_route(segments) => Response::text(
            405,
            format!("Method {method} not allowed on /{}", segments.join("/")),
        ),
        _ => Response::text(404, format!("No route for /{}", segments.join("/"))),
    }
}

fn is_known_route(segments: &[&str]) -> bool {
    matches!(
        segments,
        ["applications"]
            | ["applications", _]
            | ["applications", _, "variants"]
            | ["applications", _, "variants", _]
            | ["applications", _, "android" | "ios"]
    )
}

/// `page` and `per_page` query values, defaulting to 1 and [`DEFAULT_PER_PAGE`].
fn page_params(request: &Request) -> Result<(usize, usize), Response> {
    let parse = |key: &str, default: usize| match request.query_value(key) {
        None => Ok(default),
        Some(raw) => match raw.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n),
            _ => Err(Response::text(
                400,
                format!("Invalid '{key}' parameter: '{raw}'"),
            )),
        },
    };
    Ok((parse("page", 1)?, parse("per_page", DEFAULT_PER_PAGE)?))
}

fn respond<T: Serialize>(status: u16, result: Result<T, StoreError>) -> Response {
    match result {
        Ok(value) => Response::json(status, &value),
        Err(e) => Response::text(e.status(), e.to_string()),
    }
}

fn empty_or_error(result: Result<(), StoreError>) -> Response {
    match result {
        Ok(()) => Response::empty(204),
        Err(e) => Response::text(e.status(), e.to_string()),
    }
}

fn json_body<T: serde::de::DeserializeOwned>(body: &Body) -> Result<T, Response> {
    match body {
        Body::Json(value) => T::deserialize(value)
            .map_err(|e| Response::text(400, format!("Invalid request body: {e}"))),
        _ => Err(Response::text(415, "Expected a JSON body")),
    }
}

fn create_application(store: &mut UpsStore, body: &Body) -> Response {
    let new_app: NewApplication = match json_body(body) {
        Ok(app) => app,
        Err(resp) => return resp,
    };
    respond(200, store.create_application(new_app.into()))
}

fn create_android_variant(store: &mut UpsStore, app_id: &str, body: &Body) -> Response {
    if store.application(app_id).is_none() {
        return Response::text(404, format!("App with id '{app_id}' not found"));
    }
    let new_variant: NewAndroidVariant = match json_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    respond(201, store.create_variant(app_id, new_variant.into()))
}

fn create_ios_variant(store: &mut UpsStore, app_id: &str, body: &Body) -> Response {
    if store.application(app_id).is_none() {
        return Response::text(404, format!("App with id '{app_id}' not found"));
    }
    let Body::Multipart(parts) = body else {
        return Response::text(415, "Expected a multipart/form-data body");
    };
    match ios_seed(parts) {
        Ok(seed) => respond(201, store.create_variant(app_id, seed)),
        Err(message) => Response::text(400, message),
    }
}

/// Decode the form fields of an iOS variant. The kind is always iOS,
/// whatever `type` field the form may carry.
fn ios_seed(parts: &[FormPart]) -> Result<VariantSeed, String> {
    let mut name = None;
    let mut description = None;
    let mut developer = None;
    let mut password = None;
    let mut certificate = None;
    let mut production = false;

    for part in parts {
        match (part.name.as_str(), &part.value) {
            ("certificate", FormValue::File { bytes, .. }) => {
                certificate = Some(BASE64_STANDARD.encode(bytes));
            }
            (field, FormValue::File { .. }) => {
                return Err(format!("Unexpected file in field '{field}'"));
            }
            ("name", FormValue::Text(text)) => name = Some(text.clone()),
            ("description", FormValue::Text(text)) => description = Some(text.clone()),
            ("developer", FormValue::Text(text)) => developer = Some(text.clone()),
            ("password", FormValue::Text(text)) => password = Some(text.clone()),
            ("certificate", FormValue::Text(text)) => certificate = Some(text.clone()),
            ("production", FormValue::Text(text)) => {
                production = text
                    .trim()
                    .parse()
                    .map_err(|_| format!("'production' must be true or false, got '{text}'"))?;
            }
            _ => {}
        }
    }

    let name = name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| "Missing required field 'name'".to_string())?;

    Ok(VariantSeed {
        variant_id: None,
        name,
        description,
        developer,
        kind: VariantKind::Ios {
            production,
            certificate,
            password,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_with_app(id: &str) -> MockUps {
        let mock = MockUps::new();
        mock.seed_applications([ApplicationSeed::new("A").with_id(id)])
            .unwrap();
        mock
    }

    #[test]
    fn test_unknown_route_and_wrong_method() {
        let mock = MockUps::new();
        assert_eq!(mock.handle(&Request::get("nowhere")).status, 404);
        assert_eq!(mock.handle(&Request::delete("applications")).status, 405);
        assert_eq!(
            mock.handle(&Request::get("applications/a/android")).status,
            405
        );
    }

    #[test]
    fn test_bad_page_parameters() {
        let mock = MockUps::new();
        let resp = mock.handle(&Request::get("applications").with_query("page", 0));
        assert_eq!(resp.status, 400);
        let resp = mock.handle(&Request::get("applications").with_query("per_page", "ten"));
        assert_eq!(resp.status, 400);
    }

    #[test]
    fn test_http_create_overwrites_supplied_identifiers() {
        let mock = MockUps::new();
        let body = serde_json::json!({
            "name": "Demo",
            "pushApplicationID": "chosen-by-client",
            "masterSecret": "chosen-by-client"
        });
        let resp = mock.handle(&Request::post("applications", Body::Json(body)));
        assert_eq!(resp.status, 200);

        let app: PushApplication = serde_json::from_slice(&resp.body).unwrap();
        assert_ne!(app.push_application_id, "chosen-by-client");
        assert_ne!(app.master_secret, "chosen-by-client");
        assert_eq!(app.developer, "admin");
    }

    #[test]
    fn test_create_application_requires_name() {
        let mock = MockUps::new();
        let resp = mock.handle(&Request::post(
            "applications",
            Body::Json(serde_json::json!({ "developer": "x" })),
        ));
        assert_eq!(resp.status, 400);
        assert_eq!(mock.application_count(), 0);
    }

    #[test]
    fn test_android_variant_for_missing_app() {
        let mock = MockUps::new();
        let body = serde_json::json!({ "name": "Droid", "googleKey": "k" });
        let resp = mock.handle(&Request::post("applications/ghost/android", Body::Json(body)));
        assert_eq!(resp.status, 404);
        assert_eq!(resp.body, b"App with id 'ghost' not found");
    }

    #[test]
    fn test_ios_form_decoding() {
        let mock = mock_with_app("a");
        let parts = vec![
            FormPart::text("type", "android"),
            FormPart::text("name", "Apple"),
            FormPart::text("password", "123pwd123"),
            FormPart::text("production", "true"),
            FormPart::file("certificate", "cert.p12", "application/x-pkcs12", b"P12".to_vec()),
        ];
        let resp = mock.handle(&Request::post("applications/a/ios", Body::Multipart(parts)));
        assert_eq!(resp.status, 201);

        let variant: Variant = serde_json::from_slice(&resp.body).unwrap();
        assert_eq!(variant.name, "Apple");
        assert_eq!(
            variant.kind,
            VariantKind::Ios {
                production: true,
                certificate: Some(BASE64_STANDARD.encode(b"P12")),
                password: Some("123pwd123".to_string()),
            }
        );
    }

    #[test]
    fn test_ios_form_errors() {
        let mock = mock_with_app("a");
        let no_name = vec![FormPart::text("password", "x")];
        let resp = mock.handle(&Request::post("applications/a/ios", Body::Multipart(no_name)));
        assert_eq!(resp.status, 400);

        let bad_flag = vec![
            FormPart::text("name", "Apple"),
            FormPart::text("production", "yes"),
        ];
        let resp = mock.handle(&Request::post("applications/a/ios", Body::Multipart(bad_flag)));
        assert_eq!(resp.status, 400);

        let json = Body::Json(serde_json::json!({ "name": "Apple" }));
        let resp = mock.handle(&Request::post("applications/a/ios", json));
        assert_eq!(resp.status, 415);
    }

    #[test]
    fn test_clones_share_state() {
        let mock = MockUps::new();
        let other = mock.clone();
        other
            .seed_applications(fixtures::application_seeds(3))
            .unwrap();
        assert_eq!(mock.application_count(), 3);
        mock.reset();
        assert_eq!(other.application_count(), 0);
    }
}
