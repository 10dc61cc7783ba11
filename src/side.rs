//! Order side: Buy (bid) or Sell (ask)

use std::fmt;
use std::str::FromStr;

/// Side of an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Returns the opposite side.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Returns true if an order on this side at `price` would cross `resting`,
    /// a price on the opposite side.
    ///
    /// - Buy crosses if `price >= resting`
    /// - Sell crosses if `price <= resting`
    #[inline]
    pub fn crosses(self, price: crate::Price, resting: crate::Price) -> bool {
        match self {
            Side::Buy => price >= resting,
            Side::Sell => price <= resting,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buy" | "b" | "bid" => Ok(Side::Buy),
            "sell" | "s" | "ask" => Ok(Side::Sell),
            other => Err(format!("unknown side '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Price;

    #[test]
    fn opposite_is_involution() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite().opposite(), Side::Sell);
    }

    #[test]
    fn crosses() {
        assert!(Side::Buy.crosses(Price(100), Price(100)));
        assert!(Side::Buy.crosses(Price(101), Price(100)));
        assert!(!Side::Buy.crosses(Price(99), Price(100)));

        assert!(Side::Sell.crosses(Price(100), Price(100)));
        assert!(Side::Sell.crosses(Price(99), Price(100)));
        assert!(!Side::Sell.crosses(Price(101), Price(100)));
    }

    #[test]
    fn parse() {
        assert_eq!("BUY".parse::<Side>(), Ok(Side::Buy));
        assert_eq!("ask".parse::<Side>(), Ok(Side::Sell));
        assert!("hold".parse::<Side>().is_err());
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Side::Buy), "BUY");
        assert_eq!(format!("{}", Side::Sell), "SELL");
    }
}
