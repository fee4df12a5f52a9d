use crate::engine::error::MatchEngineError;
use crate::engine::types::{BookKey, OrdType, Price, Side, WorkingOrder};
use std::collections::BTreeMap;

/// The result a matching walk callback returns for one resting order:
/// whether to remove the entry just visited, and whether to stop walking
/// altogether.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOutcome {
    pub remove: bool,
    pub stop: bool,
}

impl WalkOutcome {
    pub fn more() -> Self {
        Self {
            remove: false,
            stop: false,
        }
    }

    pub fn remove_and_more() -> Self {
        Self {
            remove: true,
            stop: false,
        }
    }

    pub fn stop() -> Self {
        Self {
            remove: false,
            stop: true,
        }
    }

    pub fn remove_and_stop() -> Self {
        Self {
            remove: true,
            stop: true,
        }
    }
}

/// Per-symbol order book: two price/time-priority ordered containers, one
/// per side, holding the currently resting, still-open orders for that
/// symbol.
#[derive(Debug, Default)]
pub struct OrderBook {
    symbol: String,
    bids: BTreeMap<BookKey, WorkingOrder>,
    asks: BTreeMap<BookKey, WorkingOrder>,
}

impl OrderBook {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    fn side_map(&self, side: Side) -> &BTreeMap<BookKey, WorkingOrder> {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn side_map_mut(&mut self, side: Side) -> &mut BTreeMap<BookKey, WorkingOrder> {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Inserts a resting order into its side's container.
    ///
    /// Precondition: `order` is `Limit`, open, and has `leaves_qty > 0`.
    pub fn add_order(&mut self, order: WorkingOrder) -> Result<(), MatchEngineError> {
        if order.ord_type() != OrdType::Limit {
            return Err(MatchEngineError::InvalidState(
                "only limit orders may rest in the book",
            ));
        }
        if !order.is_open() {
            return Err(MatchEngineError::InvalidState(
                "cannot rest a closed order",
            ));
        }
        let leaves_is_zero: bool = {
            use crypto_bigint::Zero;
            order.leaves_qty().is_zero().into()
        };
        if leaves_is_zero {
            return Err(MatchEngineError::InvalidState(
                "cannot rest an order with no leaves quantity",
            ));
        }
        let key = order.book_key();
        self.side_map_mut(order.side()).insert(key, order);
        Ok(())
    }

    /// Removes and returns the open order on `side` whose `(cl_ord_id,
    /// source)` matches, choosing the best-priority match if more than one
    /// resting order shares that pair.
    pub fn remove_order(
        &mut self,
        side: Side,
        cl_ord_id: &str,
        source: &str,
    ) -> Option<WorkingOrder> {
        let key = self
            .side_map(side)
            .iter()
            .find(|(_, order)| order.cl_ord_id() == cl_ord_id && order.source() == source)
            .map(|(key, _)| *key)?;
        self.side_map_mut(side).remove(&key)
    }

    /// Walks the resting orders on `resting_side` eligible to trade against
    /// a `limit_price` (the incoming order's price for a `Limit` order,
    /// `None` for a `Market` order, which is eligible against every resting
    /// order), in execution order (best price first, then earliest entry).
    ///
    /// `walk` is called once per eligible order in order; its
    /// [`WalkOutcome`] says whether the order just visited should be
    /// removed (fully drained) and whether iteration should stop (the
    /// incoming order has no leaves left). This is the live, removable view
    /// a matching loop needs.
    pub fn walk_matches(
        &mut self,
        resting_side: Side,
        limit_price: Option<Price>,
        walk: &mut dyn FnMut(&mut WorkingOrder) -> WalkOutcome,
    ) {
        let map = self.side_map_mut(resting_side);
        let keys: Vec<BookKey> = match limit_price {
            None => map.keys().copied().collect(),
            Some(incoming_limit) => map
                .keys()
                .copied()
                .take_while(|key| Self::eligible(resting_side, key.price, incoming_limit))
                .collect(),
        };

        for key in keys {
            let Some(order) = map.get_mut(&key) else {
                continue;
            };
            let outcome = walk(order);
            if outcome.remove {
                map.remove(&key);
            }
            if outcome.stop {
                break;
            }
        }
    }

    fn eligible(resting_side: Side, resting_price: Price, incoming_limit: Price) -> bool {
        match resting_side {
            // Resting asks are eligible against an incoming Buy at price <= P.
            Side::Sell => resting_price <= incoming_limit,
            // Resting bids are eligible against an incoming Sell at price >= P.
            Side::Buy => resting_price >= incoming_limit,
        }
    }

    /// Read-only view of the resting bids, in priority order.
    pub fn bids(&self) -> impl Iterator<Item = &WorkingOrder> {
        self.bids.values()
    }

    /// Read-only view of the resting asks, in priority order.
    pub fn asks(&self) -> impl Iterator<Item = &WorkingOrder> {
        self.asks.values()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}
