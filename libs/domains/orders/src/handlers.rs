use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use email::EmailProvider;
use utoipa::OpenApi;

use crate::error::{OrderError, OrderResult};
use crate::models::{
    Customer, LineItem, Order, OrderResponse, OrderSubmission, VendorNotification, VendorRef,
};
use crate::service::OrderNotifier;

/// OpenAPI documentation for the Orders API
#[derive(OpenApi)]
#[openapi(
    paths(create_order),
    components(schemas(
        OrderSubmission,
        Order,
        LineItem,
        VendorRef,
        Customer,
        VendorNotification,
        OrderResponse
    )),
    tags(
        (name = "Orders", description = "Order notification dispatch")
    )
)]
pub struct ApiDoc;

/// Create the orders router
pub fn router<P: EmailProvider + 'static>(notifier: OrderNotifier<P>) -> Router {
    Router::new()
        .route("/create-order", post(create_order::<P>))
        .with_state(notifier)
}

/// Email the admins, the customer and every listed vendor about a new order
///
/// Vendor failures are logged only. Any other failure, including a malformed
/// body, answers with the same generic 500.
#[utoipa::path(
    post,
    path = "/create-order",
    tag = "Orders",
    request_body = OrderSubmission,
    responses(
        (status = 200, description = "Admin and customer emails accepted", body = OrderResponse),
        (status = 500, description = "Payload rejected or a required email failed", body = OrderResponse)
    )
)]
async fn create_order<P: EmailProvider + 'static>(
    State(notifier): State<OrderNotifier<P>>,
    payload: Result<Json<OrderSubmission>, JsonRejection>,
) -> OrderResult<Json<OrderResponse>> {
    let Json(submission) = payload.map_err(|e| OrderError::InvalidPayload(e.body_text()))?;
    notifier.submit_order(submission).await?;
    Ok(Json(OrderResponse::sent()))
}
