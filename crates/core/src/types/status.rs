//! Status enums for catalog entities.

use serde::{Deserialize, Serialize};

/// Catalog product publication status.
///
/// Maps to the `status` field of the product API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    Active,
    Inactive,
    Draft,
}

impl ProductStatus {
    /// Whether a product in this status may be added to a cart.
    #[must_use]
    pub const fn is_purchasable(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
            Self::Draft => write!(f, "draft"),
        }
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "draft" => Ok(Self::Draft),
            _ => Err(format!("invalid product status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_status_serde() {
        let json = serde_json::to_string(&ProductStatus::Inactive).unwrap();
        assert_eq!(json, "\"inactive\"");
        let parsed: ProductStatus = serde_json::from_str("\"draft\"").unwrap();
        assert_eq!(parsed, ProductStatus::Draft);
    }

    #[test]
    fn test_product_status_round_trips_through_display() {
        for status in [
            ProductStatus::Active,
            ProductStatus::Inactive,
            ProductStatus::Draft,
        ] {
            assert_eq!(status.to_string().parse::<ProductStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_only_active_is_purchasable() {
        assert!(ProductStatus::Active.is_purchasable());
        assert!(!ProductStatus::Inactive.is_purchasable());
        assert!(!ProductStatus::Draft.is_purchasable());
    }
}
