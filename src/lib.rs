pub mod cli;
pub mod config;
pub mod database;
pub mod list_store;
pub mod logging;
pub mod models;
pub mod quotes;
pub mod storage;
pub mod summary;
pub mod utils;
pub mod weather;

pub use config::Config;
pub use database::Database;
pub use list_store::{ListStore, Placement, Record, StoreError};
pub use models::{Habit, JournalEntry, Priority, Task};
pub use storage::{KeyValueStore, MemoryStore};
pub use utils::Profile;
