mod common;

use crate::common::*;
use matchcore::prelude::*;

#[test]
fn market_order_full_fill_against_resting_limit() {
    let mut engine = new_engine();

    engine
        .on_order("gateway", limit_order("sell-1", Side::Sell, 100, 10))
        .unwrap();
    let reports = engine
        .on_order("gateway", market_order("buy-1", Side::Buy, 10))
        .unwrap();

    let book = engine.book("BTC-USD").unwrap();
    assert!(book.asks().next().is_none());

    let execs = executions(&reports);
    assert_eq!(execs.last().unwrap().ord_status, OrdStatus::Filled);
}

#[test]
fn market_order_partial_fill_cancels_unfilled_residue() {
    let mut engine = new_engine();

    engine
        .on_order("gateway", limit_order("sell-1", Side::Sell, 100, 5))
        .unwrap();
    let reports = engine
        .on_order("gateway", market_order("buy-1", Side::Buy, 10))
        .unwrap();

    let book = engine.book("BTC-USD").unwrap();
    assert!(book.asks().next().is_none(), "resting liquidity consumed");
    assert!(book.bids().next().is_none(), "a market order never rests");

    let execs = executions(&reports);
    let terminal = execs.last().unwrap();
    assert_eq!(terminal.cl_ord_id, "buy-1");
    assert_eq!(terminal.ord_status, OrdStatus::Canceled);
    assert_eq!(terminal.cum_qty, qty(5));
    assert_eq!(terminal.leaves_qty, qty(5));
}

#[test]
fn market_order_on_empty_book_is_canceled_immediately() {
    let mut engine = new_engine();

    let reports = engine
        .on_order("gateway", market_order("buy-1", Side::Buy, 10))
        .unwrap();

    assert!(engine.book("BTC-USD").unwrap().is_empty());

    let execs = executions(&reports);
    assert_eq!(execs.len(), 1);
    assert_eq!(execs[0].ord_status, OrdStatus::Canceled);
    assert_eq!(execs[0].cum_qty, Quantity::ZERO);
}

#[test]
fn market_order_never_rests_regardless_of_price() {
    let mut engine = new_engine();

    let reports = engine
        .on_order("gateway", market_order("sell-1", Side::Sell, 10))
        .unwrap();

    assert!(engine.book("BTC-USD").unwrap().is_empty());
    assert_eq!(
        executions(&reports)[0].ord_status,
        OrdStatus::Canceled
    );
}
