pub mod asset;
pub mod investment;
pub mod liability;
pub mod transaction;

pub use asset::{Asset, AssetFields, NewAsset};
pub use investment::{Investment, InvestmentFields, NewInvestment};
pub use liability::{Liability, LiabilityFields, NewLiability};
pub use transaction::{NewTransaction, Transaction, TransactionFields};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::error::ApiError;

/// Serde helper: normalize a type discriminator to lowercase on input so
/// stored values are already canonical.
pub(crate) fn lowercase<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s.to_lowercase())
}

/// Enforce the store's `numeric(max_digits, 2)` column bounds before any
/// store access. Trailing zeros are not counted against the scale.
pub(crate) fn check_money(
    field: &'static str,
    value: Decimal,
    max_digits: u32,
) -> Result<(), ApiError> {
    if value.normalize().scale() > 2 {
        return Err(ApiError::invalid_input(format!(
            "{} allows at most 2 decimal places",
            field
        )));
    }

    let limit = Decimal::from(10_i64.pow(max_digits - 2));
    if value.abs() >= limit {
        return Err(ApiError::invalid_input(format!(
            "{} exceeds {} total digits",
            field, max_digits
        )));
    }

    Ok(())
}
