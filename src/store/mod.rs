mod errors;
pub mod repository;
mod snapshot;

pub use errors::StoreError;
pub use repository::{DateRange, InMemoryResultStore, ResultStore};
pub use snapshot::ResultSnapshot;
