use crate::engine::error::MatchEngineError;
use crate::engine::message::NewOrderSingle;
use crypto_bigint::{U256, Zero};

/// Price is the type used for prices in the order.
/// Fixed-scale, exact, never binary floating point.
pub type Price = U256;

/// Quantity is the type used for quantities in the order.
pub type Quantity = U256;

/// Timestamp is a monotonically non-decreasing instant, microsecond or finer
/// precision, captured from a [`crate::engine::clock::Clock`].
pub type Timestamp = u64;

/// Side indicates the direction of the order.
#[derive(PartialEq, Eq, Default, Copy, Clone, Debug)]
pub enum Side {
    /// Buy means the user wants to acquire the asset, matching against sell orders.
    #[default]
    Buy,
    /// Sell means the user wants to dispose of the asset, matching against buy orders.
    Sell,
}

impl Side {
    /// Returns the contra side used to find eligible counterparties.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// OrdType determines how the order will be executed.
#[derive(PartialEq, Eq, Default, Copy, Clone, Debug)]
pub enum OrdType {
    /// Limit orders carry a price and may rest in the book.
    #[default]
    Limit,
    /// Market orders have no usable price and are immediate-or-cancel.
    Market,
}

/// OrdStatus represents the current status of a working order.
#[derive(PartialEq, Eq, Default, Copy, Clone, Debug)]
pub enum OrdStatus {
    #[default]
    New,
    PartiallyFilled,
    Filled,
    Canceled,
    Rejected,
}

/// ExecType classifies the reason an ExecutionReport was emitted.
#[derive(PartialEq, Eq, Default, Copy, Clone, Debug)]
pub enum ExecType {
    #[default]
    New,
    Trade,
    Canceled,
    Rejected,
}

/// CxlRejReason enumerates reasons a cancel request was rejected.
/// The core only ever produces `UnknownOrder`.
#[derive(PartialEq, Eq, Default, Copy, Clone, Debug)]
pub enum CxlRejReason {
    #[default]
    UnknownOrder,
}

/// BookKey is a composite key for an order's position in its side of the book.
///
/// Ordering semantics (price/time priority):
/// - For Buy orders: higher price is better (sorted descending), ties broken
///   by earlier `entry_time`, residual ties by `order_id` ascending.
/// - For Sell orders: lower price is better (sorted ascending), same tie-breaks.
///
/// This lets a single ordered map sort one side of the book correctly without
/// a secondary level of price grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookKey {
    pub price: Price,
    pub entry_time: Timestamp,
    pub order_id: u32,
    pub side: Side,
}

impl Ord for BookKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.side {
            Side::Buy => self
                .price
                .cmp(&other.price)
                .reverse()
                .then(self.entry_time.cmp(&other.entry_time))
                .then(self.order_id.cmp(&other.order_id)),
            Side::Sell => self
                .price
                .cmp(&other.price)
                .then(self.entry_time.cmp(&other.entry_time))
                .then(self.order_id.cmp(&other.order_id)),
        }
    }
}

impl PartialOrd for BookKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// WorkingOrder is the central entity: an order's identity, side, price, and
/// quantity state as it moves through the engine.
///
/// Invariants: `cum_qty + leaves_qty == order_qty`; `cum_qty` never
/// decreases; once `open` is false no further execution or cancellation is
/// permitted; `entry_time` is set at construction and never mutated.
#[derive(Debug, Clone)]
pub struct WorkingOrder {
    order_id: u32,
    cl_ord_id: String,
    source: String,
    symbol: String,
    side: Side,
    ord_type: OrdType,
    price: Option<Price>,
    order_qty: Quantity,
    cum_qty: Quantity,
    leaves_qty: Quantity,
    entry_time: Timestamp,
    open: bool,
}

impl WorkingOrder {
    /// Snapshots the inbound order's fields, assigning the engine's id and
    /// entry time, with `cum_qty = 0` and `leaves_qty = order_qty`.
    pub fn from_new_order(
        order: NewOrderSingle,
        source: String,
        order_id: u32,
        entry_time: Timestamp,
    ) -> Self {
        Self {
            order_id,
            cl_ord_id: order.cl_ord_id,
            source,
            symbol: order.symbol,
            side: order.side,
            ord_type: order.ord_type,
            price: order.price,
            order_qty: order.order_qty,
            cum_qty: Quantity::ZERO,
            leaves_qty: order.order_qty,
            entry_time,
            open: true,
        }
    }

    /// Fills `qty` against this order.
    ///
    /// Precondition: `open && 0 < qty <= leaves_qty`; violating it is a bug
    /// in the caller (over-fill or mutating a closed order), not a domain
    /// error, so it is reported as [`MatchEngineError::InvalidState`].
    pub fn execute(&mut self, qty: Quantity) -> Result<(), MatchEngineError> {
        let qty_is_zero: bool = qty.is_zero().into();
        if !self.open || qty_is_zero || qty > self.leaves_qty {
            return Err(MatchEngineError::InvalidState(
                "execute: quantity out of range or order not open",
            ));
        }
        self.cum_qty += qty;
        self.leaves_qty -= qty;
        Ok(())
    }

    /// Marks the order closed. The engine never calls this twice on the same order.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn order_id(&self) -> u32 {
        self.order_id
    }

    /// The wire-format order id, `"O<n>"`.
    pub fn order_id_string(&self) -> String {
        format!("O{}", self.order_id)
    }

    pub fn cl_ord_id(&self) -> &str {
        &self.cl_ord_id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn ord_type(&self) -> OrdType {
        self.ord_type
    }

    pub fn price(&self) -> Option<Price> {
        self.price
    }

    pub fn order_qty(&self) -> Quantity {
        self.order_qty
    }

    pub fn cum_qty(&self) -> Quantity {
        self.cum_qty
    }

    pub fn leaves_qty(&self) -> Quantity {
        self.leaves_qty
    }

    pub fn entry_time(&self) -> Timestamp {
        self.entry_time
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The key this order occupies in its `OrderBook` side container.
    /// Only meaningful for `Limit` orders, which always carry a price.
    pub fn book_key(&self) -> BookKey {
        BookKey {
            price: self.price.unwrap_or(Price::ZERO),
            entry_time: self.entry_time,
            order_id: self.order_id,
            side: self.side,
        }
    }
}
