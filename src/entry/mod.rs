pub mod item;
pub mod store;

pub use item::{Entry, EntryId, is_valid_title};
pub use store::{EntryStore, Snapshot, StoreEvent, StoreObserver};
