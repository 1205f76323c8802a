use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{check_money, lowercase};
use crate::store::EntityRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionFields {
    pub amount: Decimal,
    pub category_type: String,
    #[serde(deserialize_with = "lowercase")]
    pub transaction_type: String,
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, with = "crate::dates::flexible_datetime")]
    pub transaction_date: Option<NaiveDateTime>,
}

impl TransactionFields {
    pub fn validate(&self) -> Result<(), ApiError> {
        check_money("amount", self.amount, 12)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub fields: TransactionFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: Uuid,
    #[serde(flatten)]
    pub fields: TransactionFields,
}

impl EntityRecord for Transaction {
    const TABLE: &'static str = "transactions";
}
