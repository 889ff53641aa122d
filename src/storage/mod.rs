pub mod document;
pub mod file;
pub mod writer;

pub use file::{SaveMode, load_entries, preserve_corrupt_file, save_entries};
pub use writer::{AutoSave, PersistenceWriter, SaveQueue};
