//! Discount Model

use serde::{Deserialize, Deserializer, Serialize};

use crate::util::lenient_f64;

/// How a discount value is interpreted
///
/// Serialized as `"Fixed"` / `"Percentage"`. Decoding is lenient: the
/// backend sometimes sends an empty string for "no discount type", which
/// is treated as `Fixed` (a fixed discount of 0 is a no-op).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum DiscountType {
    /// Flat currency amount
    #[default]
    Fixed,
    /// Percentage of the relevant base amount (20 = 20%)
    Percentage,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "Fixed",
            Self::Percentage => "Percentage",
        }
    }

    /// Parse a wire value; anything other than "percentage" is `Fixed`
    pub fn parse_lenient(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("percentage") {
            Self::Percentage
        } else {
            Self::Fixed
        }
    }
}

impl<'de> Deserialize<'de> for DiscountType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::parse_lenient).unwrap_or_default())
    }
}

/// A discount: type plus value
///
/// Used both per row and as the document-level (footer) discount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Discount {
    #[serde(rename = "discount_type", default)]
    pub kind: DiscountType,
    #[serde(rename = "discount_value", default, deserialize_with = "lenient_f64")]
    pub value: f64,
}

impl Discount {
    pub const NONE: Discount = Discount {
        kind: DiscountType::Fixed,
        value: 0.0,
    };

    pub fn fixed(value: f64) -> Self {
        Self {
            kind: DiscountType::Fixed,
            value,
        }
    }

    pub fn percentage(value: f64) -> Self {
        Self {
            kind: DiscountType::Percentage,
            value,
        }
    }
}
