pub mod row_store;

pub use row_store::{RowStore, SheetsRowStore};
#[cfg(test)]
pub use row_store::MockRowStore;
