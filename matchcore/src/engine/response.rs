use crate::engine::message::OrderCancelRequest;
use crate::engine::types::{CxlRejReason, ExecType, OrdStatus, Price, Quantity, Side, WorkingOrder};

/// A single matched quantity against one resting counterparty, at that
/// counterparty's price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill {
    pub fill_px: Price,
    pub fill_qty: Quantity,
}

/// Outbound execution report. `fills` carries either a single element (a
/// resting counterparty's own report) or all fills accumulated by the
/// incoming order's terminal report.
#[derive(Debug, Clone, Default)]
pub struct ExecutionReport {
    pub cl_ord_id: String,
    pub cum_qty: Quantity,
    pub exec_id: String,
    pub exec_type: ExecType,
    pub leaves_qty: Quantity,
    pub order_id: String,
    pub ord_status: OrdStatus,
    pub side: Side,
    pub symbol: String,
    pub source: String,
    pub fills: Vec<Fill>,
}

/// Outbound cancel-reject.
#[derive(Debug, Clone, Default)]
pub struct OrderCancelReject {
    pub cl_ord_id: String,
    pub cxl_rej_reason: CxlRejReason,
    pub order_id: String,
    pub ord_status: OrdStatus,
    pub source: String,
}

/// A response the core emits for one inbound message. `MatchEngine` methods
/// return a `Vec<OutMsg>`, never a single bare message.
#[derive(Debug, Clone)]
pub enum OutMsg {
    Execution(ExecutionReport),
    CancelReject(OrderCancelReject),
}

/// External collaborator that hands the core a fresh, independently
/// owned, mutable message each time one is requested. The core never
/// constructs a concrete wire type itself — only populates what the factory
/// gives it — so a session layer can swap in its own FIX/JSON/binary
/// representation without touching the matching logic.
pub trait ResponseMessageFactory {
    fn new_execution_report(&self) -> ExecutionReport;
    fn new_cancel_reject(&self) -> OrderCancelReject;
}

/// The factory used outside of tests: plain `Default`-constructed messages.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultResponseMessageFactory;

impl ResponseMessageFactory for DefaultResponseMessageFactory {
    fn new_execution_report(&self) -> ExecutionReport {
        ExecutionReport::default()
    }

    fn new_cancel_reject(&self) -> OrderCancelReject {
        OrderCancelReject::default()
    }
}

/// Populates outbound messages obtained from a [`ResponseMessageFactory`].
/// Stateless beyond the factory reference — `MatchEngine` owns the id
/// sequences and passes already-assigned ids in.
pub struct ResponseBuilder<'a> {
    factory: &'a dyn ResponseMessageFactory,
}

impl<'a> ResponseBuilder<'a> {
    pub fn new(factory: &'a dyn ResponseMessageFactory) -> Self {
        Self { factory }
    }

    /// Populates a Trade execution report for `working_order`, carrying
    /// `fills` (either its own single fill, or all accumulated fills for a
    /// terminal report).
    pub fn execution_report_trade(
        &self,
        working_order: &WorkingOrder,
        fills: &[Fill],
        exec_id: String,
        ord_status: OrdStatus,
    ) -> ExecutionReport {
        let mut report = self.factory.new_execution_report();
        report.cl_ord_id = working_order.cl_ord_id().to_string();
        report.cum_qty = working_order.cum_qty();
        report.exec_id = exec_id;
        report.exec_type = ExecType::Trade;
        report.leaves_qty = working_order.leaves_qty();
        report.order_id = working_order.order_id_string();
        report.ord_status = ord_status;
        report.side = working_order.side();
        report.symbol = working_order.symbol().to_string();
        report.source = working_order.source().to_string();
        report.fills = fills.to_vec();
        report
    }

    /// Populates a Canceled execution report. `source` is the cancel
    /// requester, which may differ from the order's original source.
    pub fn execution_report_canceled(
        &self,
        source: &str,
        working_order: &WorkingOrder,
        exec_id: String,
    ) -> ExecutionReport {
        let mut report = self.factory.new_execution_report();
        report.cl_ord_id = working_order.cl_ord_id().to_string();
        report.cum_qty = working_order.cum_qty();
        report.exec_id = exec_id;
        report.exec_type = ExecType::Canceled;
        report.leaves_qty = working_order.leaves_qty();
        report.order_id = working_order.order_id_string();
        report.ord_status = OrdStatus::Canceled;
        report.side = working_order.side();
        report.symbol = working_order.symbol().to_string();
        report.source = source.to_string();
        report
    }

    /// Populates an `UnknownOrder` cancel-reject for a cancel request that
    /// matched no resting order.
    pub fn cancel_reject(&self, source: &str, cancel: &OrderCancelRequest) -> OrderCancelReject {
        let mut reject = self.factory.new_cancel_reject();
        reject.cl_ord_id = cancel.cl_ord_id.clone();
        reject.cxl_rej_reason = CxlRejReason::UnknownOrder;
        reject.order_id = "None".to_string();
        reject.ord_status = OrdStatus::Rejected;
        reject.source = source.to_string();
        reject
    }
}
