use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::dates;
use crate::store::error::StoreError;
use crate::store::postgrest::TableStore;

/// Typed view over a store table. `TABLE` names the remote table;
/// `DATE_FIELDS` lists the calendar-date columns that must be trimmed of any
/// time component when a record is re-hydrated.
pub trait EntityRecord: DeserializeOwned {
    const TABLE: &'static str;
    const DATE_FIELDS: &'static [&'static str] = &[];
}

/// Codec layer between domain types and the raw [`TableStore`]. Writes go
/// through serde (decimals as numbers, dates as ISO strings, UUIDs as
/// strings); reads normalize date fields before decoding.
pub struct Gateway<T> {
    store: Arc<dyn TableStore>,
    _marker: std::marker::PhantomData<T>,
}

impl<T: EntityRecord> Gateway<T> {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self {
            store,
            _marker: std::marker::PhantomData,
        }
    }

    pub async fn create(&self, payload: &(impl Serialize + Sync)) -> Result<T, StoreError> {
        let record = serde_json::to_value(payload)?;
        let rows = self.store.insert(T::TABLE, record).await?;
        self.first_row(rows).ok_or_else(|| StoreError::EmptyWrite {
            table: T::TABLE.to_string(),
        })?
    }

    pub async fn get_by_id(&self, id: i64) -> Result<T, StoreError> {
        let rows = self.store.select_by_id(T::TABLE, id).await?;
        self.first_row(rows).ok_or_else(|| StoreError::NotFound {
            table: T::TABLE.to_string(),
        })?
    }

    pub async fn get_all_for_user(&self, user_id: Uuid) -> Result<Vec<T>, StoreError> {
        let rows = self.store.select_by_user(T::TABLE, user_id).await?;
        rows.into_iter().map(|row| self.decode(row)).collect()
    }

    pub async fn update(&self, id: i64, payload: &(impl Serialize + Sync)) -> Result<T, StoreError> {
        let record = serde_json::to_value(payload)?;
        let rows = self.store.update(T::TABLE, id, record).await?;
        self.first_row(rows).ok_or_else(|| StoreError::NotFound {
            table: T::TABLE.to_string(),
        })?
    }

    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let rows = self.store.delete(T::TABLE, id).await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound {
                table: T::TABLE.to_string(),
            });
        }
        Ok(())
    }

    fn first_row(&self, rows: Vec<Value>) -> Option<Result<T, StoreError>> {
        rows.into_iter().next().map(|row| self.decode(row))
    }

    fn decode(&self, mut row: Value) -> Result<T, StoreError> {
        rehydrate_dates(&mut row, T::DATE_FIELDS);
        Ok(serde_json::from_value(row)?)
    }
}

/// Trim stored date fields down to their calendar-date portion in place.
/// A value that fails to normalize becomes null rather than an error.
fn rehydrate_dates(row: &mut Value, fields: &[&str]) {
    let Value::Object(map) = row else { return };

    for field in fields {
        if let Some(value) = map.get_mut(*field) {
            *value = match dates::normalize_date(value.as_str()) {
                Some(date) => Value::String(date.format("%Y-%m-%d").to_string()),
                None => Value::Null,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Row {
        id: i64,
        due_date: Option<NaiveDate>,
    }

    impl EntityRecord for Row {
        const TABLE: &'static str = "rows";
        const DATE_FIELDS: &'static [&'static str] = &["due_date"];
    }

    /// Canned store that answers every call with the same row set.
    struct CannedStore(Vec<Value>);

    #[async_trait]
    impl TableStore for CannedStore {
        async fn insert(&self, _table: &str, _record: Value) -> Result<Vec<Value>, StoreError> {
            Ok(self.0.clone())
        }
        async fn select_by_id(&self, _table: &str, _id: i64) -> Result<Vec<Value>, StoreError> {
            Ok(self.0.clone())
        }
        async fn select_by_user(
            &self,
            _table: &str,
            _user_id: Uuid,
        ) -> Result<Vec<Value>, StoreError> {
            Ok(self.0.clone())
        }
        async fn update(
            &self,
            _table: &str,
            _id: i64,
            _record: Value,
        ) -> Result<Vec<Value>, StoreError> {
            Ok(self.0.clone())
        }
        async fn delete(&self, _table: &str, _id: i64) -> Result<Vec<Value>, StoreError> {
            Ok(self.0.clone())
        }
    }

    fn gateway(rows: Vec<Value>) -> Gateway<Row> {
        Gateway::new(Arc::new(CannedStore(rows)))
    }

    #[tokio::test]
    async fn get_by_id_maps_zero_rows_to_not_found() {
        let err = gateway(vec![]).get_by_id(1).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn create_maps_zero_rows_to_empty_write() {
        let err = gateway(vec![]).create(&json!({})).await.unwrap_err();
        assert!(matches!(err, StoreError::EmptyWrite { .. }));
    }

    #[tokio::test]
    async fn delete_maps_zero_rows_to_not_found() {
        let err = gateway(vec![]).delete(1).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn empty_user_listing_is_not_an_error() {
        let rows = gateway(vec![]).get_all_for_user(Uuid::new_v4()).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn rehydrates_stored_timestamps_to_calendar_dates() {
        let gateway = gateway(vec![json!({"id": 1, "due_date": "2024-03-11T00:00:00"})]);
        let row = gateway.get_by_id(1).await.unwrap();
        assert_eq!(row.due_date, NaiveDate::from_ymd_opt(2024, 3, 11));
    }

    #[tokio::test]
    async fn malformed_stored_dates_degrade_to_null() {
        let gateway = gateway(vec![json!({"id": 1, "due_date": "garbage"})]);
        let row = gateway.get_by_id(1).await.unwrap();
        assert_eq!(row.due_date, None);
        assert_eq!(row.id, 1);
    }
}
