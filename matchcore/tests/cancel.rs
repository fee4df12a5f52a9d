mod common;

use crate::common::*;
use matchcore::prelude::*;

#[test]
fn cancel_unknown_order_is_rejected() {
    let mut engine = new_engine();

    let reports = engine.on_cancel_request("gateway", cancel("nope", Side::Buy));

    assert!(executions(&reports).is_empty());
    let rejects = cancel_rejects(&reports);
    assert_eq!(rejects.len(), 1);
    assert_eq!(rejects[0].cxl_rej_reason, CxlRejReason::UnknownOrder);
    assert_eq!(rejects[0].ord_status, OrdStatus::Rejected);
    assert_eq!(rejects[0].order_id, "None");
}

#[test]
fn cancel_resting_order_removes_it_and_reports_canceled() {
    let mut engine = new_engine();

    engine
        .on_order("gateway", limit_order("buy-1", Side::Buy, 100, 10))
        .unwrap();
    let reports = engine.on_cancel_request("gateway", cancel("buy-1", Side::Buy));

    let execs = executions(&reports);
    assert_eq!(execs.len(), 1);
    assert_eq!(execs[0].cl_ord_id, "buy-1");
    assert_eq!(execs[0].ord_status, OrdStatus::Canceled);
    assert!(engine.book("BTC-USD").unwrap().bids().next().is_none());
}

#[test]
fn cancel_among_duplicate_cl_ord_ids_removes_best_priority_match() {
    let mut engine = new_engine();

    // Two resting buys sharing a cl_ord_id (different sources) at different
    // priority; the cancel must remove the best-priority (highest price,
    // then earliest entry) one among those matching (cl_ord_id, source).
    engine
        .on_order("gateway-a", limit_order("dup", Side::Buy, 99, 10))
        .unwrap();
    engine
        .on_order("gateway-a", limit_order("dup", Side::Buy, 101, 10))
        .unwrap();

    let reports = engine.on_cancel_request("gateway-a", cancel("dup", Side::Buy));
    let execs = executions(&reports);
    assert_eq!(execs.len(), 1);

    let book = engine.book("BTC-USD").unwrap();
    let remaining: Vec<_> = book.bids().map(|o| o.price()).collect();
    assert_eq!(remaining, vec![Some(px(99))]);
}

#[test]
fn cancel_is_scoped_to_the_requesting_source() {
    let mut engine = new_engine();

    engine
        .on_order("gateway-a", limit_order("buy-1", Side::Buy, 100, 10))
        .unwrap();

    let reports = engine.on_cancel_request("gateway-b", cancel("buy-1", Side::Buy));
    let rejects = cancel_rejects(&reports);
    assert_eq!(rejects.len(), 1, "different source must not match the resting order");
    assert!(engine.book("BTC-USD").unwrap().bids().next().is_some());
}
