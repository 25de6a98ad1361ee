//! Client for the remote bookstore catalog API.

mod client;
mod error;
mod shell;
mod types;

pub use client::BookstoreClient;
pub use error::{BookstoreError, BookstoreErrorKind};
pub use shell::{BookstoreShell, write_book_table};
pub use types::{Book, BookDraft, parse_in_stock};
