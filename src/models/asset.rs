use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::check_money;
use crate::store::EntityRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetFields {
    pub asset_type: String,
    #[serde(default)]
    pub asset_name: Option<String>,
    pub value: Decimal,
    #[serde(default)]
    pub acquired_date: Option<NaiveDate>,
}

impl AssetFields {
    pub fn validate(&self) -> Result<(), ApiError> {
        check_money("value", self.value, 12)?;
        if self.value.is_sign_negative() {
            return Err(ApiError::invalid_input("value must be non-negative"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAsset {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub fields: AssetFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: i64,
    pub user_id: Uuid,
    #[serde(flatten)]
    pub fields: AssetFields,
}

impl EntityRecord for Asset {
    const TABLE: &'static str = "assets";
    const DATE_FIELDS: &'static [&'static str] = &["acquired_date"];
}
