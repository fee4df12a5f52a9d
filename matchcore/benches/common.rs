use matchcore::prelude::*;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}

pub fn limit_order(cl_ord_id: u64, side: Side, price: u32, quantity: u32) -> NewOrderSingle {
    NewOrderSingle {
        symbol: "BTC-USD".to_string(),
        side,
        ord_type: OrdType::Limit,
        price: Some(Price::from_u32(price)),
        order_qty: Quantity::from_u32(quantity),
        cl_ord_id: format!("C{}", cl_ord_id),
    }
}
