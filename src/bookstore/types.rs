//! Wire types for the bookstore API.

use serde::{Deserialize, Deserializer, Serialize};

/// A book as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Server-assigned id; some servers send numbers, some strings
    #[serde(deserialize_with = "id_as_text")]
    pub id: String,

    pub title: String,

    pub author: String,

    #[serde(default)]
    pub price: f64,

    #[serde(default)]
    pub in_stock: bool,
}

/// Body for creating or replacing a book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub price: f64,
    pub in_stock: bool,
}

impl From<&Book> for BookDraft {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            price: book.price,
            in_stock: book.in_stock,
        }
    }
}

fn id_as_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Integer(n) => n.to_string(),
    })
}

/// Interpret a yes/no answer about stock.
pub fn parse_in_stock(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "true" | "t" | "1")
}
