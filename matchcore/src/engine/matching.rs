use crate::engine::book::{OrderBook, WalkOutcome};
use crate::engine::clock::{Clock, SystemClock};
use crate::engine::error::MatchEngineError;
use crate::engine::message::{NewOrderSingle, OrderCancelRequest};
use crate::engine::response::{
    DefaultResponseMessageFactory, ExecutionReport, Fill, OutMsg, ResponseBuilder,
    ResponseMessageFactory,
};
use crate::engine::types::{OrdStatus, OrdType, WorkingOrder};
use crypto_bigint::Zero;
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// Top-level dispatcher: owns the map of symbol to [`OrderBook`], the
/// order/execution sequence counters, the injected clock, and the response
/// message factory.
///
/// All operations run to completion synchronously on the calling thread;
/// there is no internal suspension point and no shared mutable state beyond
/// what is owned here.
pub struct MatchEngine<C: Clock = SystemClock, F: ResponseMessageFactory = DefaultResponseMessageFactory>
{
    books: HashMap<String, OrderBook>,
    order_sequence: u32,
    execution_sequence: u32,
    clock: C,
    factory: F,
}

impl MatchEngine<SystemClock, DefaultResponseMessageFactory> {
    /// A production engine: system clock, default message factory.
    pub fn with_defaults() -> Self {
        Self::new(SystemClock, DefaultResponseMessageFactory)
    }
}

impl<C: Clock, F: ResponseMessageFactory> MatchEngine<C, F> {
    pub fn new(clock: C, factory: F) -> Self {
        Self {
            books: HashMap::new(),
            order_sequence: 0,
            execution_sequence: 0,
            clock,
            factory,
        }
    }

    /// Read-only view of a symbol's book, for inspection and testing.
    pub fn book(&self, symbol: &str) -> Option<&OrderBook> {
        self.books.get(symbol)
    }

    fn next_order_id(&mut self) -> u32 {
        self.order_sequence += 1;
        self.order_sequence
    }

    fn next_exec_id(&mut self) -> String {
        self.execution_sequence += 1;
        format!("E{}", self.execution_sequence)
    }

    fn validate_new_order(order: &NewOrderSingle) -> Result<(), MatchEngineError> {
        let qty_is_zero: bool = order.order_qty.is_zero().into();
        if qty_is_zero {
            return Err(MatchEngineError::InvalidOrder(
                "order_qty must be strictly positive",
            ));
        }
        if order.ord_type == OrdType::Limit {
            match order.price {
                Some(price) => {
                    let price_is_zero: bool = price.is_zero().into();
                    if price_is_zero {
                        return Err(MatchEngineError::InvalidOrder(
                            "limit order price must be strictly positive",
                        ));
                    }
                }
                None => {
                    return Err(MatchEngineError::InvalidOrder(
                        "limit order requires a price",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Handles one inbound `OrderCancelRequest`. Always returns exactly one
    /// response: a Canceled execution if a resting order matched, otherwise
    /// an `UnknownOrder` cancel-reject.
    pub fn on_cancel_request(&mut self, source: &str, cancel: OrderCancelRequest) -> Vec<OutMsg> {
        let removed = self
            .books
            .get_mut(&cancel.symbol)
            .and_then(|book| book.remove_order(cancel.side, &cancel.cl_ord_id, source));

        let builder = ResponseBuilder::new(&self.factory);
        match removed {
            Some(mut working_order) => {
                working_order.close();
                let exec_id = self.next_exec_id();
                debug!(
                    order_id = working_order.order_id(),
                    cl_ord_id = working_order.cl_ord_id(),
                    %source,
                    "order canceled"
                );
                let report = builder.execution_report_canceled(source, &working_order, exec_id);
                vec![OutMsg::Execution(report)]
            }
            None => {
                warn!(
                    symbol = %cancel.symbol,
                    cl_ord_id = %cancel.cl_ord_id,
                    %source,
                    "cancel request referenced an unknown order"
                );
                let reject = builder.cancel_reject(source, &cancel);
                vec![OutMsg::CancelReject(reject)]
            }
        }
    }

    /// Handles one inbound `NewOrderSingle`: books/matches the order and
    /// returns the execution reports produced, in match order followed by
    /// the terminal report for the incoming order.
    ///
    /// Returns `Err` without mutating any book state if the order is
    /// malformed (`InvalidOrder`).
    pub fn on_order(
        &mut self,
        source: &str,
        new_order: NewOrderSingle,
    ) -> Result<Vec<OutMsg>, MatchEngineError> {
        Self::validate_new_order(&new_order)?;

        let symbol = new_order.symbol.clone();
        let order_id = self.next_order_id();
        let entry_time = self.clock.now();
        let mut working_order =
            WorkingOrder::from_new_order(new_order, source.to_string(), order_id, entry_time);

        trace!(
            order_id,
            symbol = %symbol,
            side = ?working_order.side(),
            ord_type = ?working_order.ord_type(),
            qty = ?working_order.order_qty(),
            "order accepted"
        );

        let book = self
            .books
            .entry(symbol.clone())
            .or_insert_with(|| OrderBook::new(symbol));

        let opposite_side = working_order.side().opposite();
        let limit_price = match working_order.ord_type() {
            OrdType::Limit => working_order.price(),
            OrdType::Market => None,
        };

        let mut fills: Vec<Fill> = Vec::new();
        let mut reports: Vec<ExecutionReport> = Vec::new();
        let mut exec_seq = self.execution_sequence;

        {
            let builder = ResponseBuilder::new(&self.factory);
            book.walk_matches(opposite_side, limit_price, &mut |resting: &mut WorkingOrder| {
                let fill_qty = working_order.leaves_qty().min(resting.leaves_qty());
                resting
                    .execute(fill_qty)
                    .expect("fill quantity is bounded by resting order's leaves_qty");
                working_order
                    .execute(fill_qty)
                    .expect("fill quantity is bounded by incoming order's leaves_qty");

                let fill_px = resting
                    .price()
                    .expect("a resting order is always a limit order with a price");
                fills.push(Fill { fill_px, fill_qty });

                let resting_leaves_zero: bool = resting.leaves_qty().is_zero().into();
                let resting_status = if resting_leaves_zero {
                    OrdStatus::Filled
                } else {
                    OrdStatus::PartiallyFilled
                };

                exec_seq += 1;
                let exec_id = format!("E{}", exec_seq);
                let single_fill = [Fill { fill_px, fill_qty }];
                let report =
                    builder.execution_report_trade(resting, &single_fill, exec_id, resting_status);
                trace!(
                    resting_order_id = resting.order_id(),
                    ?fill_px,
                    ?fill_qty,
                    status = ?resting_status,
                    "fill"
                );
                reports.push(report);

                if resting_leaves_zero {
                    resting.close();
                }
                let incoming_leaves_zero: bool = working_order.leaves_qty().is_zero().into();
                WalkOutcome {
                    remove: resting_leaves_zero,
                    stop: incoming_leaves_zero,
                }
            });
        }
        self.execution_sequence = exec_seq;

        let builder = ResponseBuilder::new(&self.factory);
        let incoming_leaves_zero: bool = working_order.leaves_qty().is_zero().into();

        // `book` still holds a field-level borrow of `self.books`: the
        // remaining exec ids are assigned through `self.execution_sequence`
        // directly rather than `next_exec_id(&mut self)`, which would
        // require exclusive access to all of `self`.
        if incoming_leaves_zero {
            working_order.close();
            self.execution_sequence += 1;
            let exec_id = format!("E{}", self.execution_sequence);
            debug!(order_id, "incoming order fully filled");
            let report =
                builder.execution_report_trade(&working_order, &fills, exec_id, OrdStatus::Filled);
            reports.push(report);
        } else if working_order.ord_type() == OrdType::Limit {
            let cum_qty_is_zero: bool = working_order.cum_qty().is_zero().into();
            let status = if cum_qty_is_zero {
                OrdStatus::New
            } else {
                OrdStatus::PartiallyFilled
            };
            self.execution_sequence += 1;
            let exec_id = format!("E{}", self.execution_sequence);
            let report =
                builder.execution_report_trade(&working_order, &fills, exec_id, status);
            debug!(order_id, status = ?status, "order resting in book");
            book.add_order(working_order)?;
            reports.push(report);
        } else {
            // Market order with leftover quantity: immediate-or-cancel.
            working_order.close();
            self.execution_sequence += 1;
            let exec_id = format!("E{}", self.execution_sequence);
            debug!(order_id, "market order canceled for unfilled residue");
            let report = builder.execution_report_trade(
                &working_order,
                &fills,
                exec_id,
                OrdStatus::Canceled,
            );
            reports.push(report);
        }

        Ok(reports.into_iter().map(OutMsg::Execution).collect())
    }
}
