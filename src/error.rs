//! Crate-wide error types.
//!
//! [`TradingError`] covers every recoverable failure the core can report:
//! construction-time constraint violations, malformed identifiers, cross
//! currency arithmetic, illegal order state transitions, structurally
//! disallowed operations and duplicate event replays. All variants are
//! local, synchronous and recoverable; none are fatal to the process, and a
//! failed construction or transition leaves the entity in its prior state.

use thiserror::Error;

use crate::enums::{OrderStatus, OrderType};

/// Errors that can occur within the trading core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TradingError {
    /// A construction-time constraint was violated (negative quantity,
    /// precision out of range, disallowed time-in-force, overflow).
    #[error("invalid value: {reason}")]
    InvalidValue {
        /// Description of the violated constraint.
        reason: String,
    },

    /// An identifier string was malformed (empty, oversized or unparsable).
    #[error("invalid {kind} identifier: {reason}")]
    InvalidIdentifier {
        /// The identifier type that rejected the input.
        kind: &'static str,
        /// Description of the problem.
        reason: String,
    },

    /// Arithmetic was attempted between two [`Money`](crate::types::Money)
    /// values denominated in different currencies.
    #[error("currency mismatch: {lhs} vs {rhs}")]
    CurrencyMismatch {
        /// Currency code of the left-hand operand.
        lhs: &'static str,
        /// Currency code of the right-hand operand.
        rhs: &'static str,
    },

    /// An order event is not applicable in the order's current state.
    #[error("invalid state transition: {event} not applicable from {current}")]
    InvalidStateTransition {
        /// The order state at the time the event was applied.
        current: OrderStatus,
        /// The event variant that was rejected.
        event: &'static str,
    },

    /// The operation is structurally disallowed for this order variant,
    /// e.g. amending a market order.
    #[error("unsupported operation for {order_type} order: {operation}")]
    UnsupportedOperation {
        /// The order variant that rejected the operation.
        order_type: OrderType,
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// A fill carrying an already-applied execution id was replayed.
    #[error("duplicate event: execution id {execution_id} already applied")]
    DuplicateEvent {
        /// The execution id that had already been recorded.
        execution_id: String,
    },
}

impl TradingError {
    /// Shorthand for an [`InvalidValue`](Self::InvalidValue) error.
    pub(crate) fn invalid_value(reason: impl Into<String>) -> Self {
        TradingError::InvalidValue {
            reason: reason.into(),
        }
    }

    /// Shorthand for an [`InvalidIdentifier`](Self::InvalidIdentifier) error.
    pub(crate) fn invalid_identifier(kind: &'static str, reason: impl Into<String>) -> Self {
        TradingError::InvalidIdentifier {
            kind,
            reason: reason.into(),
        }
    }
}
