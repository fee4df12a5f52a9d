use matchcore::prelude::*;

pub fn px(n: u32) -> Price {
    Price::from_u32(n)
}

pub fn qty(n: u32) -> Quantity {
    Quantity::from_u32(n)
}

/// Builds a limit `NewOrderSingle` for the given side/price/qty.
pub fn limit_order(cl_ord_id: &str, side: Side, price: u32, quantity: u32) -> NewOrderSingle {
    NewOrderSingle {
        symbol: "BTC-USD".to_string(),
        side,
        ord_type: OrdType::Limit,
        price: Some(px(price)),
        order_qty: qty(quantity),
        cl_ord_id: cl_ord_id.to_string(),
    }
}

/// Builds a market `NewOrderSingle` for the given side/qty.
pub fn market_order(cl_ord_id: &str, side: Side, quantity: u32) -> NewOrderSingle {
    NewOrderSingle {
        symbol: "BTC-USD".to_string(),
        side,
        ord_type: OrdType::Market,
        price: None,
        order_qty: qty(quantity),
        cl_ord_id: cl_ord_id.to_string(),
    }
}

pub fn cancel(cl_ord_id: &str, side: Side) -> OrderCancelRequest {
    OrderCancelRequest {
        symbol: "BTC-USD".to_string(),
        side,
        cl_ord_id: cl_ord_id.to_string(),
    }
}

/// Extracts the execution reports from a batch of responses, in order.
pub fn executions(msgs: &[OutMsg]) -> Vec<&ExecutionReport> {
    msgs.iter()
        .filter_map(|m| match m {
            OutMsg::Execution(report) => Some(report),
            OutMsg::CancelReject(_) => None,
        })
        .collect()
}

pub fn cancel_rejects(msgs: &[OutMsg]) -> Vec<&OrderCancelReject> {
    msgs.iter()
        .filter_map(|m| match m {
            OutMsg::CancelReject(reject) => Some(reject),
            OutMsg::Execution(_) => None,
        })
        .collect()
}

pub fn new_engine() -> MatchEngine<ManualClock, DefaultResponseMessageFactory> {
    let _ = tracing_subscriber::fmt::try_init();
    MatchEngine::new(ManualClock::new(1_000), DefaultResponseMessageFactory)
}
