use crate::engine::types::{OrdType, Price, Quantity, Side};

/// Inbound request to create a new order.
///
/// `price` is `None` for `Market` orders and `Some` for `Limit` orders.
/// Fields a concrete session/transport layer would also carry (account,
/// timestamps the session assigned, etc.) are out of scope for the core and
/// are not modeled here.
#[derive(Debug, Clone)]
pub struct NewOrderSingle {
    pub symbol: String,
    pub side: Side,
    pub ord_type: OrdType,
    pub price: Option<Price>,
    pub order_qty: Quantity,
    pub cl_ord_id: String,
}

/// Inbound request to cancel a resting order.
#[derive(Debug, Clone)]
pub struct OrderCancelRequest {
    pub symbol: String,
    pub side: Side,
    pub cl_ord_id: String,
}
