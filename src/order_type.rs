//! Order kinds: controls order lifetime and how the remainder is handled

use std::fmt;
use std::str::FromStr;

/// How long an order remains active and what happens to its unfilled remainder.
///
/// Only [`GoodTillCancel`](OrderType::GoodTillCancel) and
/// [`FillAndKill`](OrderType::FillAndKill) have matching behavior of their own.
/// The other kinds are recognized so callers can name them, but the book
/// either rejects them or treats them as inert limit orders, depending on
/// [`UnsupportedKindPolicy`](crate::UnsupportedKindPolicy).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrderType {
    /// Rests on book until filled or explicitly cancelled.
    #[default]
    GoodTillCancel,

    /// Matches what it can on arrival; the remainder is cancelled, never rests.
    FillAndKill,

    /// Fill entirely or not at all. No matching semantics in this book.
    FillOrKill,

    /// Expires at the end of the trading day. Expiry needs an external sweep.
    GoodForDay,

    /// No limit price. Carries [`Price::INVALID`](crate::Price::INVALID).
    Market,
}

impl OrderType {
    /// Returns true if the matching engine implements this kind's semantics.
    #[inline]
    pub fn is_supported(self) -> bool {
        matches!(self, OrderType::GoodTillCancel | OrderType::FillAndKill)
    }

    /// Returns true if an order of this kind may remain on the book after
    /// the call that submitted it.
    #[inline]
    pub fn can_rest(self) -> bool {
        !matches!(self, OrderType::FillAndKill | OrderType::Market)
    }

    /// Short code used by `Display` and the CLI.
    pub fn code(self) -> &'static str {
        match self {
            OrderType::GoodTillCancel => "GTC",
            OrderType::FillAndKill => "FAK",
            OrderType::FillOrKill => "FOK",
            OrderType::GoodForDay => "GFD",
            OrderType::Market => "MKT",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for OrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GTC" => Ok(OrderType::GoodTillCancel),
            "FAK" | "IOC" => Ok(OrderType::FillAndKill),
            "FOK" => Ok(OrderType::FillOrKill),
            "GFD" | "DAY" => Ok(OrderType::GoodForDay),
            "MKT" | "MARKET" => Ok(OrderType::Market),
            other => Err(format!("unknown order type '{other}'")),
        }
    }
}
