use utoipa::OpenApi;

/// API documentation served at `/scalar`
#[derive(OpenApi)]
#[openapi(
    info(
        title = "The Food Collective API",
        description = "Order notification dispatch for The Food Collective storefront"
    ),
    nest(
        (path = "/api", api = domain_orders::ApiDoc)
    )
)]
pub struct ApiDoc;
