//! Dashboard aggregation engine.
//!
//! Consumes the raw per-user record collections and computes the summary
//! report: income/expense totals, net worth, a six-month trend, and an
//! expense-category breakdown. Transactions with absent or unparseable
//! dates are skipped from the monthly trend without failing the whole
//! computation; the skip count is reported so it stays observable.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dates;
use crate::store::{EntityRecord, Gateway, StoreError, TableStore};

/// Tolerant projections of the stored rows: only the columns the dashboard
/// needs, with the transaction date kept as a raw string so malformed values
/// reach the aggregator instead of failing the decode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionRow {
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub category_type: Option<String>,
    #[serde(default)]
    pub transaction_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetRow {
    #[serde(default)]
    pub value: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LiabilityRow {
    #[serde(default)]
    pub amount: Option<Decimal>,
}

impl EntityRecord for TransactionRow {
    const TABLE: &'static str = "transactions";
}

impl EntityRecord for AssetRow {
    const TABLE: &'static str = "assets";
}

impl EntityRecord for LiabilityRow {
    const TABLE: &'static str = "liabilities";
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_worth: Decimal,
    pub monthly_data: Vec<MonthlySummary>,
    pub expense_categories: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlySummary {
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug)]
pub struct DashboardReport {
    pub data: DashboardData,
    /// Transactions excluded from the monthly trend because their date was
    /// absent or unparseable.
    pub skipped_dates: usize,
}

/// Fetch the three per-user collections and aggregate them. The reads are
/// issued concurrently; if any of them fails the whole aggregation fails.
pub async fn build_dashboard(
    store: Arc<dyn TableStore>,
    user_id: Uuid,
) -> Result<DashboardReport, StoreError> {
    let transactions = Gateway::<TransactionRow>::new(store.clone());
    let assets = Gateway::<AssetRow>::new(store.clone());
    let liabilities = Gateway::<LiabilityRow>::new(store);

    let (transactions, assets, liabilities) = tokio::try_join!(
        transactions.get_all_for_user(user_id),
        assets.get_all_for_user(user_id),
        liabilities.get_all_for_user(user_id),
    )?;

    Ok(aggregate(&transactions, &assets, &liabilities))
}

/// Pure aggregation over already-fetched rows.
pub fn aggregate(
    transactions: &[TransactionRow],
    assets: &[AssetRow],
    liabilities: &[LiabilityRow],
) -> DashboardReport {
    let mut total_income = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;
    for t in transactions {
        let amount = t.amount.unwrap_or_default();
        match t.transaction_type.as_deref() {
            Some("income") => total_income += amount,
            Some("expense") => total_expenses += amount,
            _ => {}
        }
    }

    let asset_total: Decimal = assets.iter().map(|a| a.value.unwrap_or_default()).sum();
    let liability_total: Decimal = liabilities
        .iter()
        .map(|l| l.amount.unwrap_or_default())
        .sum();
    let net_worth = asset_total - liability_total;

    // Buckets keyed by (year, month) so calendar order is intrinsic
    let mut buckets: BTreeMap<(i32, u32), MonthlySummary> = BTreeMap::new();
    let mut skipped_dates = 0usize;

    for t in transactions {
        let Some(date) = dates::normalize_date(t.transaction_date.as_deref()) else {
            skipped_dates += 1;
            continue;
        };

        let bucket = buckets
            .entry((date.year(), date.month()))
            .or_insert_with(|| MonthlySummary {
                month: date.format("%b %Y").to_string(),
                income: Decimal::ZERO,
                expense: Decimal::ZERO,
            });

        let amount = t.amount.unwrap_or_default();
        match t.transaction_type.as_deref() {
            Some("income") => bucket.income += amount,
            Some("expense") => bucket.expense += amount,
            _ => {}
        }
    }

    // Most recent first, capped at six months
    let monthly_data: Vec<MonthlySummary> = buckets.into_values().rev().take(6).collect();

    // Stable sort keeps first-seen order for equal amounts
    let mut expense_categories: Vec<CategoryTotal> = Vec::new();
    for t in transactions {
        if t.transaction_type.as_deref() != Some("expense") {
            continue;
        }
        let category = t
            .category_type
            .clone()
            .unwrap_or_else(|| "uncategorized".to_string());
        let amount = t.amount.unwrap_or_default();

        match expense_categories.iter_mut().find(|c| c.category == category) {
            Some(existing) => existing.amount += amount,
            None => expense_categories.push(CategoryTotal { category, amount }),
        }
    }
    expense_categories.sort_by(|a, b| b.amount.cmp(&a.amount));

    DashboardReport {
        data: DashboardData {
            total_income,
            total_expenses,
            net_worth,
            monthly_data,
            expense_categories,
        },
        skipped_dates,
    }
}
