//! Wei-scale signed 256-bit numeric type backed by alloy I256.
//!
//! Provides canonical decimal-string parsing and formatting (no hex, no
//! exponent notation) and checked arithmetic for financial calculations.

use alloy_primitives::{Sign, I256, U256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Signed 256-bit integer representing a fixed-point value with 18 decimal
/// places (wei scale).
///
/// Serializes as a decimal string so values survive any intermediate
/// textual/JSON representation without precision loss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Wei(I256);

/// Continuous payment speed: wei per second, signed. Negative means net
/// outflow; zero means no flow.
pub type FlowRate = Wei;

impl Wei {
    /// The additive identity (0).
    pub const ZERO: Wei = Wei(I256::ZERO);

    /// Create a Wei from an I256.
    pub fn new(value: I256) -> Self {
        Wei(value)
    }

    /// Parse a Wei from a decimal string losslessly.
    ///
    /// # Errors
    /// Returns an error if the string is not a valid signed decimal integer
    /// or exceeds the 256-bit range.
    pub fn from_dec_str(s: &str) -> Result<Self, EngineError> {
        I256::from_dec_str(s)
            .map(Wei)
            .map_err(|e| EngineError::InvalidArgument(format!("invalid wei amount {s:?}: {e}")))
    }

    /// Format as a canonical decimal string.
    pub fn to_dec_string(&self) -> String {
        self.0.to_string()
    }

    /// Get the underlying I256.
    pub fn inner(&self) -> I256 {
        self.0
    }

    /// Returns true if the value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the value is > 0.
    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    /// Returns true if the value is < 0.
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Checked addition; `None` on 256-bit overflow.
    pub fn checked_add(self, rhs: Wei) -> Option<Wei> {
        self.0.checked_add(rhs.0).map(Wei)
    }

    /// Checked subtraction; `None` on 256-bit overflow.
    pub fn checked_sub(self, rhs: Wei) -> Option<Wei> {
        self.0.checked_sub(rhs.0).map(Wei)
    }

    /// Checked multiplication; `None` on 256-bit overflow.
    pub fn checked_mul(self, rhs: Wei) -> Option<Wei> {
        self.0.checked_mul(rhs.0).map(Wei)
    }

    /// Checked division, truncating toward zero; `None` when `rhs` is zero.
    pub fn checked_div(self, rhs: Wei) -> Option<Wei> {
        self.0.checked_div(rhs.0).map(Wei)
    }

    /// Checked negation; `None` for the minimum value.
    pub fn checked_neg(self) -> Option<Wei> {
        self.0.checked_neg().map(Wei)
    }
}

impl From<i64> for Wei {
    fn from(value: i64) -> Self {
        // An i64 always fits in 256 bits.
        Wei(I256::try_from(value).unwrap_or(I256::ZERO))
    }
}

impl fmt::Display for Wei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Wei {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_dec_str(s)
    }
}

impl Serialize for Wei {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Wei {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Wei::from_dec_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Convert a non-negative unsigned quantity into signed wei space.
///
/// # Errors
/// Returns `Overflow` when the value exceeds the signed 256-bit range.
pub(crate) fn signed_from_unsigned(value: U256) -> Result<I256, EngineError> {
    I256::checked_from_sign_and_abs(Sign::Positive, value).ok_or(EngineError::Overflow)
}

/// Serde codec for U256 fields as decimal strings (pool units).
///
/// alloy's own serde impl uses hex strings; the engine boundary requires
/// decimal-string-safe encoding for all quantities.
pub mod serde_u256_dec {
    use alloy_primitives::U256;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<U256>().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wei_parse_roundtrip() {
        let test_cases = vec![
            "0",
            "1",
            "-1",
            "1000000000000000000",
            "-385802469135802469135",
            "57896044618658097711785492504343953926634992332820282019728792003956564819967",
        ];

        for s in test_cases {
            let wei = Wei::from_dec_str(s).expect("parse failed");
            let formatted = wei.to_dec_string();
            let reparsed = Wei::from_dec_str(&formatted).expect("reparse failed");
            assert_eq!(wei, reparsed, "roundtrip failed for {}", s);
            assert_eq!(formatted, s);
        }
    }

    #[test]
    fn test_wei_rejects_garbage() {
        assert!(Wei::from_dec_str("").is_err());
        assert!(Wei::from_dec_str("12.5").is_err());
        assert!(Wei::from_dec_str("0x10").is_err());
        assert!(Wei::from_dec_str("ten").is_err());
    }

    #[test]
    fn test_wei_checked_arithmetic() {
        let a = Wei::from(10);
        let b = Wei::from(4);

        assert_eq!(a.checked_add(b), Some(Wei::from(14)));
        assert_eq!(a.checked_sub(b), Some(Wei::from(6)));
        assert_eq!(a.checked_mul(b), Some(Wei::from(40)));
        assert_eq!(a.checked_div(b), Some(Wei::from(2)));
        assert_eq!(a.checked_div(Wei::ZERO), None);
    }

    #[test]
    fn test_wei_division_truncates_toward_zero() {
        let a = Wei::from(-7);
        let b = Wei::from(2);
        assert_eq!(a.checked_div(b), Some(Wei::from(-3)));
    }

    #[test]
    fn test_wei_overflow_detected() {
        let max = Wei::new(I256::MAX);
        assert_eq!(max.checked_add(Wei::from(1)), None);
        assert_eq!(max.checked_mul(Wei::from(2)), None);
        assert_eq!(Wei::new(I256::MIN).checked_neg(), None);
    }

    #[test]
    fn test_wei_sign_predicates() {
        assert!(Wei::ZERO.is_zero());
        assert!(!Wei::ZERO.is_positive());
        assert!(!Wei::ZERO.is_negative());
        assert!(Wei::from(5).is_positive());
        assert!(Wei::from(-5).is_negative());
    }

    #[test]
    fn test_wei_json_is_decimal_string() {
        let wei = Wei::from_dec_str("-1000000000000000000").unwrap();
        let json = serde_json::to_value(wei).unwrap();
        assert!(json.is_string());
        assert_eq!(json, serde_json::json!("-1000000000000000000"));

        let back: Wei = serde_json::from_value(json).unwrap();
        assert_eq!(back, wei);
    }

    #[test]
    fn test_u256_serde_is_decimal_string() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Units(#[serde(with = "super::serde_u256_dec")] U256);

        let units = Units(U256::from(123456789u64));
        let json = serde_json::to_string(&units).unwrap();
        assert_eq!(json, "\"123456789\"");
        let back: Units = serde_json::from_str(&json).unwrap();
        assert_eq!(back.0, units.0);
    }

    #[test]
    fn test_signed_from_unsigned_overflow() {
        assert!(signed_from_unsigned(U256::MAX).is_err());
        assert_eq!(
            signed_from_unsigned(U256::from(42u64)).unwrap(),
            I256::try_from(42i64).unwrap()
        );
    }
}
