//! Cart request bodies shared by quoting and checkout.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use audioshelf_app::domain::pricing::models::CartLineRequest;

/// Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartRequest {
    /// Requested lines, in the order they should appear on the order
    pub items: Vec<CartItemRequest>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemRequest {
    /// Catalog id of the audiobook
    pub item_id: i64,

    /// Number of copies; must be positive
    pub quantity: i64,
}

impl CartRequest {
    pub(crate) fn into_lines(self) -> Vec<CartLineRequest> {
        self.items
            .into_iter()
            .map(|item| CartLineRequest::new(item.item_id, item.quantity))
            .collect()
    }
}
