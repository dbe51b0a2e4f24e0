//! OpenAPI documentation for the JSON endpoints.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use gallery_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Photo Gallery API",
        version = "0.1.0",
        description = "JSON view of the photo gallery"
    ),
    paths(handlers::photos::list_photos, handlers::health::health_check),
    components(schemas(
        models::Photo,
        error::ErrorResponse,
        handlers::health::HealthResponse
    )),
    tags(
        (name = "photos", description = "Photo listing"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
