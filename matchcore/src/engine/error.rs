/// Programmer-error channel for the matching core.
///
/// `UnknownOrder` is deliberately not a variant here: it is a domain
/// condition that always becomes an outbound `OrderCancelReject`, never a
/// Rust error raised to the caller.
#[derive(Debug, thiserror::Error)]
pub enum MatchEngineError {
    /// A malformed inbound order: non-positive quantity, or a `Limit` order
    /// without a strictly positive price. Raised before any book state is
    /// mutated.
    #[error("invalid order: {0}")]
    InvalidOrder(&'static str),

    /// An internal precondition was violated inside `WorkingOrder::execute`
    /// (e.g. an attempted over-fill). Indicates a bug in the engine itself.
    #[error("invalid order state: {0}")]
    InvalidState(&'static str),
}
