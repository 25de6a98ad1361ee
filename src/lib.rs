//! taskbook: a JSON-backed task tracker and a bookstore REST client.
//!
//! The task tracker keeps every task in memory and rewrites a single JSON file
//! after each change. The bookstore client issues one blocking HTTP call per
//! operation against a remote catalog.
//!
//! # Example
//!
//! ```no_run
//! use taskbook::{Confirmation, Status, TaskStore};
//!
//! // Load (or create) the tasks file
//! let loaded = TaskStore::load("tasks.json");
//! if let Some(warning) = &loaded.warning {
//!     eprintln!("Warning: {}", warning);
//! }
//! let mut store = loaded.store;
//!
//! // Create a task due on some future date
//! let id = store.create("Write report", "Q3 summary", "2099-01-31").unwrap().value;
//!
//! // Finish it, then remove it
//! store.complete(&id).unwrap();
//! assert_eq!(store.get(&id).unwrap().status, Status::Complete);
//! store.delete(&id, Confirmation::Yes).unwrap();
//! ```

mod id;
mod storage;
mod store;
mod types;

pub mod bookstore;
pub mod config;
pub mod console;
pub mod logging;
pub mod tracker;

// Re-export public API
pub use bookstore::{Book, BookDraft, BookstoreClient, BookstoreError, BookstoreErrorKind, BookstoreShell};
pub use config::{BookstoreConfig, Config};
pub use console::Console;
pub use storage::TASKS_FILE;
pub use store::{Committed, Confirmation, Deletion, Loaded, StoreError, StoreWarning, TaskStore, TaskUpdate};
pub use tracker::TaskShell;
pub use types::{CREATED_DATE_FORMAT, DUE_DATE_FORMAT, Status, Task, ValidationError, parse_due_date};
