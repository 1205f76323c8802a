use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{check_money, lowercase};
use crate::store::EntityRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiabilityFields {
    #[serde(deserialize_with = "lowercase")]
    pub liability_type: String,
    #[serde(default)]
    pub description: Option<String>,
    pub amount: Decimal,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl LiabilityFields {
    pub fn validate(&self) -> Result<(), ApiError> {
        check_money("amount", self.amount, 12)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLiability {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub fields: LiabilityFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Liability {
    pub id: i64,
    pub user_id: Uuid,
    #[serde(flatten)]
    pub fields: LiabilityFields,
}

impl EntityRecord for Liability {
    const TABLE: &'static str = "liabilities";
    const DATE_FIELDS: &'static [&'static str] = &["due_date"];
}
