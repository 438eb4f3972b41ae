//! Calculate Cart Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use audioshelf_app::domain::pricing::models::{CartPricingSnapshot, ResolvedCartLine};

use crate::{
    cart::{errors::into_status_error, requests::CartRequest},
    extensions::*,
    money::format_money,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    pub item_id: i64,
    pub title: String,

    /// Current catalog price, two decimal places
    pub unit_price: String,

    pub quantity: u32,

    /// `unit_price * quantity`, rounded half away from zero
    pub line_total: String,
}

impl From<&ResolvedCartLine> for CartLineResponse {
    fn from(line: &ResolvedCartLine) -> Self {
        Self {
            item_id: line.item_id().get(),
            title: line.title().to_owned(),
            unit_price: format_money(line.unit_price()),
            quantity: line.quantity(),
            line_total: format_money(line.line_total()),
        }
    }
}

/// Cart Quote Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartQuoteResponse {
    /// Lines that resolved to purchasable catalog items
    pub items: Vec<CartLineResponse>,

    pub total_price: String,
    pub calculated_at: String,
}

impl From<CartPricingSnapshot> for CartQuoteResponse {
    fn from(snapshot: CartPricingSnapshot) -> Self {
        Self {
            items: snapshot.lines().iter().map(Into::into).collect(),
            total_price: format_money(snapshot.grand_total()),
            calculated_at: snapshot.computed_at().to_string(),
        }
    }
}

/// Calculate Cart
///
/// Prices the cart against the catalog without placing an order. Unknown or
/// unavailable items are left out of the quote.
#[endpoint(
    tags("cart"),
    summary = "Calculate Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart priced"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid cart line"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Catalog unavailable"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CartRequest>,
    depot: &mut Depot,
) -> Result<Json<CartQuoteResponse>, StatusError> {
    let state = depot.state()?;
    let lines = json.into_inner().into_lines();

    let snapshot = state
        .app
        .pricing
        .price_cart(&lines)
        .await
        .map_err(into_status_error)?;

    Ok(Json(snapshot.into()))
}
