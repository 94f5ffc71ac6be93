//! Currency metadata and the process-scoped currency registry.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use super::fixed::check_precision;
use crate::enums::CurrencyType;
use crate::error::TradingError;
use crate::identifiers::intern::intern;

/// Metadata describing a currency: ISO 4217 code and numeric code, decimal
/// precision and crypto/fiat classification.
///
/// `Currency` is a cheap `Copy` handle — the code and name strings are
/// interned for the life of the process. Instances are immutable once
/// constructed; the registry publishes each code at most once and never
/// mutates a published entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Currency {
    /// The currency code, e.g. `"USD"` or `"BTC"`.
    pub code: &'static str,
    /// Decimal precision of the minor unit.
    pub precision: u8,
    /// ISO 4217 numeric code (0 for currencies outside the standard).
    pub iso4217: u16,
    /// The currency's full name.
    pub name: &'static str,
    /// Crypto or fiat classification.
    pub currency_type: CurrencyType,
}

static REGISTRY: OnceLock<DashMap<&'static str, Currency>> = OnceLock::new();

fn registry() -> &'static DashMap<&'static str, Currency> {
    REGISTRY.get_or_init(|| {
        let map = DashMap::new();
        for currency in seeded() {
            map.insert(currency.code, currency);
        }
        map
    })
}

/// The built-in currency table. Venue adapters register anything exotic at
/// startup via [`Currency::register`].
fn seeded() -> Vec<Currency> {
    let fiat = |code, iso4217, name| Currency {
        code: intern(code),
        precision: 2,
        iso4217,
        name: intern(name),
        currency_type: CurrencyType::Fiat,
    };
    let crypto = |code, precision, name| Currency {
        code: intern(code),
        precision,
        iso4217: 0,
        name: intern(name),
        currency_type: CurrencyType::Crypto,
    };
    vec![
        fiat("AUD", 36, "Australian dollar"),
        fiat("CAD", 124, "Canadian dollar"),
        fiat("CHF", 756, "Swiss franc"),
        fiat("EUR", 978, "Euro"),
        fiat("GBP", 826, "British pound"),
        Currency {
            code: intern("JPY"),
            precision: 0,
            iso4217: 392,
            name: intern("Japanese yen"),
            currency_type: CurrencyType::Fiat,
        },
        fiat("USD", 840, "United States dollar"),
        crypto("BTC", 8, "Bitcoin"),
        crypto("ETH", 8, "Ether"),
        crypto("SOL", 8, "Solana"),
        crypto("USDC", 6, "USD Coin"),
        crypto("USDT", 6, "Tether"),
        crypto("XRP", 6, "Ripple"),
    ]
}

impl Currency {
    /// Creates a currency without publishing it to the registry.
    ///
    /// # Errors
    /// Returns [`TradingError::InvalidIdentifier`] for an empty or oversized
    /// code or name, or [`TradingError::InvalidValue`] for a precision
    /// beyond the fixed-point maximum.
    pub fn new(
        code: &str,
        precision: u8,
        iso4217: u16,
        name: &str,
        currency_type: CurrencyType,
    ) -> Result<Self, TradingError> {
        if code.is_empty() || code.len() > 16 {
            return Err(TradingError::invalid_identifier(
                "Currency",
                format!("invalid code {code:?}"),
            ));
        }
        if name.is_empty() {
            return Err(TradingError::invalid_identifier(
                "Currency",
                "name is empty",
            ));
        }
        check_precision(precision)?;
        Ok(Self {
            code: intern(code),
            precision,
            iso4217,
            name: intern(name),
            currency_type,
        })
    }

    /// Looks up a published currency by code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        registry().get(code).map(|entry| *entry.value())
    }

    /// Publishes `currency` to the registry and returns the published
    /// instance.
    ///
    /// Published entries are append-only: registering a code that already
    /// exists returns the existing entry unchanged.
    pub fn register(currency: Currency) -> Currency {
        *registry().entry(currency.code).or_insert(currency).value()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl FromStr for Currency {
    type Err = TradingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::from_code(s).ok_or_else(|| {
            TradingError::invalid_identifier("Currency", format!("unknown currency code {s:?}"))
        })
    }
}

impl Serialize for Currency {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.code)
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_new() {
        let currency =
            Currency::new("AUD", 2, 36, "Australian dollar", CurrencyType::Fiat).unwrap();
        assert_eq!(currency.code, "AUD");
        assert_eq!(currency.precision, 2);
        assert_eq!(currency.iso4217, 36);
        assert_eq!(currency.name, "Australian dollar");
        assert_eq!(currency.currency_type, CurrencyType::Fiat);
    }

    #[test]
    fn test_invalid_currency_rejected() {
        assert!(Currency::new("", 2, 0, "nameless", CurrencyType::Fiat).is_err());
        assert!(Currency::new("USD", 10, 840, "precision", CurrencyType::Fiat).is_err());
        assert!(Currency::new("USD", 2, 840, "", CurrencyType::Fiat).is_err());
    }

    #[test]
    fn test_builtin_lookup() {
        let usd = Currency::from_code("USD").unwrap();
        assert_eq!(usd.precision, 2);
        assert_eq!(usd.iso4217, 840);
        assert_eq!(usd.currency_type, CurrencyType::Fiat);
        let btc = Currency::from_code("BTC").unwrap();
        assert_eq!(btc.precision, 8);
        assert_eq!(btc.currency_type, CurrencyType::Crypto);
        assert!(Currency::from_code("ZZZ").is_none());
    }

    #[test]
    fn test_register_is_append_only() {
        let custom = Currency::new("ZWG", 2, 924, "Zimbabwe gold", CurrencyType::Fiat).unwrap();
        let published = Currency::register(custom);
        assert_eq!(published, custom);

        // A second registration under the same code does not replace the
        // published entry.
        let conflicting = Currency::new("ZWG", 4, 924, "Zimbabwe gold", CurrencyType::Fiat).unwrap();
        let existing = Currency::register(conflicting);
        assert_eq!(existing.precision, 2);
        assert_eq!(Currency::from_code("ZWG").unwrap().precision, 2);
    }

    #[test]
    fn test_serde_round_trip_by_code() {
        let eur = Currency::from_code("EUR").unwrap();
        let json = serde_json::to_string(&eur).unwrap();
        assert_eq!(json, "\"EUR\"");
        let back: Currency = serde_json::from_str(&json).unwrap();
        assert_eq!(back, eur);
        assert!(serde_json::from_str::<Currency>("\"ZZZ\"").is_err());
    }
}
