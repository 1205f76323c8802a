pub mod error;
pub mod gateway;
pub mod postgrest;

pub use error::StoreError;
pub use gateway::{EntityRecord, Gateway};
pub use postgrest::{PostgrestStore, TableStore};
