//! In-memory storage for the dashboard's records.

mod collection;
mod stores;

pub use collection::CollectionStore;
pub use stores::{Snapshot, Stores};
