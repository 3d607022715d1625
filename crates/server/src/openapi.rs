use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Wire shape of `models::Item`.
#[derive(ToSchema)]
pub struct ItemDoc {
    pub id: String,
    pub name: String,
    pub price: f64,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::items::list,
        crate::routes::items::get,
        crate::routes::items::create,
        crate::routes::items::update,
        crate::routes::items::delete,
    ),
    components(schemas(HealthResponse, ItemDoc)),
    tags((name = "health"), (name = "items"))
)]
pub struct ApiDoc;
