//! Opaque, interned, string-backed identifier types.
//!
//! Identifiers are pure value types used as keys and correlation handles
//! throughout the core. They are `Copy` (the backing string is interned for
//! the life of the process), compare and hash by string value, and carry no
//! mutation operations — `as_str`/`Display` is the only projection.
//!
//! Construction fails with [`TradingError::InvalidIdentifier`] if the input
//! is empty or exceeds [`MAX_IDENTIFIER_LEN`] bytes.

pub(crate) mod intern;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TradingError;
use intern::intern;

/// Maximum identifier length in bytes.
pub const MAX_IDENTIFIER_LEN: usize = 64;

fn validated(value: &str, kind: &'static str) -> Result<&'static str, TradingError> {
    if value.is_empty() {
        return Err(TradingError::invalid_identifier(kind, "value is empty"));
    }
    if value.len() > MAX_IDENTIFIER_LEN {
        return Err(TradingError::invalid_identifier(
            kind,
            format!(
                "value length {} exceeds maximum {MAX_IDENTIFIER_LEN}",
                value.len()
            ),
        ));
    }
    Ok(intern(value))
}

macro_rules! define_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name {
            value: &'static str,
        }

        impl $name {
            /// Creates the identifier from a string value.
            ///
            /// # Errors
            /// Returns [`TradingError::InvalidIdentifier`] if `value` is
            /// empty or longer than [`MAX_IDENTIFIER_LEN`] bytes.
            pub fn new(value: &str) -> Result<Self, TradingError> {
                Ok(Self {
                    value: validated(value, stringify!($name))?,
                })
            }

            /// The identifier's string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                self.value
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.value)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.value)
            }
        }

        impl FromStr for $name {
            type Err = TradingError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.value)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Self::new(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

define_identifier!(
    /// A tradable instrument's ticker symbol.
    Symbol
);
define_identifier!(
    /// A trading venue or exchange code.
    Venue
);
define_identifier!(
    /// The identifier of a trader (a person or desk).
    TraderId
);
define_identifier!(
    /// The identifier of a trading strategy instance.
    StrategyId
);
define_identifier!(
    /// The identifier of an execution or data client.
    ClientId
);
define_identifier!(
    /// A client-assigned order identifier, unique per trader.
    ClientOrderId
);
define_identifier!(
    /// A venue-assigned order identifier.
    VenueOrderId
);
define_identifier!(
    /// A brokerage or exchange account identifier.
    AccountId
);
define_identifier!(
    /// The identifier of an open position.
    PositionId
);
define_identifier!(
    /// A venue-assigned trade (match) identifier.
    TradeId
);
define_identifier!(
    /// The unique identifier of a single fill execution, used to detect
    /// replayed fill events.
    ExecutionId
);
define_identifier!(
    /// The identifier of a system component.
    ComponentId
);
define_identifier!(
    /// The identifier of a contingent order list.
    OrderListId
);

/// The composite identifier of a tradable instrument: a [`Symbol`] at a
/// [`Venue`]. Two instrument ids are equal iff both components are equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstrumentId {
    /// The instrument's ticker symbol.
    pub symbol: Symbol,
    /// The venue the instrument trades on.
    pub venue: Venue,
}

impl InstrumentId {
    /// Creates an instrument id from its components.
    #[must_use]
    pub const fn new(symbol: Symbol, venue: Venue) -> Self {
        Self { symbol, venue }
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.symbol, self.venue)
    }
}

impl fmt::Debug for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InstrumentId({:?})", self.to_string())
    }
}

impl FromStr for InstrumentId {
    type Err = TradingError;

    /// Parses `SYMBOL.VENUE`, splitting on the last `.` so symbols
    /// containing dots remain representable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (symbol, venue) = s.rsplit_once('.').ok_or_else(|| {
            TradingError::invalid_identifier(
                "InstrumentId",
                format!("missing '.' separator in {s:?}"),
            )
        })?;
        Ok(Self {
            symbol: Symbol::new(symbol)?,
            venue: Venue::new(venue)?,
        })
    }
}

impl Serialize for InstrumentId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for InstrumentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
