pub mod store;

pub use store::{PageRecord, PageStore, SqlitePageStore, StoreError};
