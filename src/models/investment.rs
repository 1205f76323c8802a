use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{check_money, lowercase};
use crate::store::EntityRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentFields {
    #[serde(deserialize_with = "lowercase")]
    pub investment_type: String,
    pub asset_name: String,
    pub quantity: Decimal,
    pub purchase_price: Decimal,
    pub current_value: Decimal,
    #[serde(default, with = "crate::dates::flexible_datetime")]
    pub purchase_date: Option<NaiveDateTime>,
}

impl InvestmentFields {
    pub fn validate(&self) -> Result<(), ApiError> {
        check_money("quantity", self.quantity, 10)?;
        check_money("purchase_price", self.purchase_price, 12)?;
        check_money("current_value", self.current_value, 12)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInvestment {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub fields: InvestmentFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
    pub id: i64,
    pub user_id: Uuid,
    #[serde(flatten)]
    pub fields: InvestmentFields,
}

impl EntityRecord for Investment {
    const TABLE: &'static str = "investments";
}
