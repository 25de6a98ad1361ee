//! Blocking HTTP client for the bookstore API. One request per call, no retries.

use super::error::BookstoreError;
use super::types::{Book, BookDraft};
use crate::config::BookstoreConfig;
use log::debug;
use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

pub type Result<T> = std::result::Result<T, BookstoreError>;

#[derive(Debug, Clone)]
pub struct BookstoreClient {
    http: Client,
    books_url: Url,
}

impl BookstoreClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(BookstoreError::from_reqwest)?;
        let books_url = format!("{}/api/books", base_url.trim_end_matches('/'));
        let books_url = Url::parse(&books_url)
            .map_err(|e| BookstoreError::validation(format!("invalid base URL '{}': {}", base_url, e)))?;
        Ok(Self { http, books_url })
    }

    pub fn from_config(config: &BookstoreConfig) -> Result<Self> {
        Self::new(&config.base_url, config.timeout())
    }

    pub fn books_url(&self) -> &str {
        self.books_url.as_str()
    }

    /// `books_url` plus one more path segment, percent-encoded.
    fn child_url(&self, segment: &str) -> Result<Url> {
        let mut url = self.books_url.clone();
        url.path_segments_mut()
            .map_err(|()| BookstoreError::validation(format!("base URL '{}' cannot hold a path", self.books_url)))?
            .push(segment);
        Ok(url)
    }

    fn book_url(&self, id: &str) -> Result<Url> {
        let id = id.trim();
        if id.is_empty() {
            return Err(BookstoreError::validation("book ID cannot be empty"));
        }
        self.child_url(id)
    }

    /// Send a request and return the status and body text.
    fn send(&self, request: RequestBuilder, not_found: &str, invalid: &str) -> Result<(u16, String)> {
        let response = request.send().map_err(BookstoreError::from_reqwest)?;
        let status = response.status();
        let url = response.url().to_string();
        let body = response.text().map_err(BookstoreError::from_reqwest)?;
        debug!("{} -> {}", url, status);

        if !status.is_success() {
            let fallback = if status.as_u16() == 404 { not_found } else { invalid };
            return Err(BookstoreError::from_status(status.as_u16(), &body, fallback));
        }
        Ok((status.as_u16(), body))
    }

    fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, not_found: &str, invalid: &str) -> Result<T> {
        let (status, body) = self.send(request, not_found, invalid)?;
        serde_json::from_str(&body).map_err(|e| BookstoreError::decode(status, e, &body))
    }

    /// GET /api/books
    pub fn list_books(&self) -> Result<Vec<Book>> {
        debug!("Listing books");
        self.send_json(self.http.get(self.books_url.clone()), "Books not found", "Invalid request")
    }

    /// GET /api/books/{id}
    pub fn get_book(&self, id: &str) -> Result<Book> {
        let url = self.book_url(id)?;
        let not_found = format!("Book with ID '{}' not found", id.trim());
        self.send_json(self.http.get(url), &not_found, "Invalid request")
    }

    /// POST /api/books
    pub fn add_book(&self, draft: &BookDraft) -> Result<Book> {
        debug!("Adding book {:?}", draft.title);
        self.send_json(
            self.http.post(self.books_url.clone()).json(draft),
            "Books endpoint not found",
            "Invalid request format",
        )
    }

    /// PUT /api/books/{id}
    pub fn update_book(&self, id: &str, draft: &BookDraft) -> Result<Book> {
        let url = self.book_url(id)?;
        let not_found = format!("Book with ID '{}' not found", id.trim());
        self.send_json(self.http.put(url).json(draft), &not_found, "Invalid update data")
    }

    /// DELETE /api/books/{id}. Returns the server's message, if it sent one.
    pub fn delete_book(&self, id: &str) -> Result<Option<String>> {
        let url = self.book_url(id)?;
        let not_found = format!("Book with ID '{}' not found", id.trim());
        let (status, body) = self.send(self.http.delete(url), &not_found, "Invalid request")?;

        if body.trim().is_empty() {
            return Ok(None);
        }
        let value: Value = serde_json::from_str(&body).map_err(|e| BookstoreError::decode(status, e, &body))?;
        Ok(value.get("message").and_then(Value::as_str).map(str::to_string))
    }

    /// GET /api/books/search?query=...
    pub fn search_books(&self, query: &str) -> Result<Vec<Book>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(BookstoreError::validation("search query cannot be empty"));
        }
        let url = self.child_url("search")?;
        self.send_json(
            self.http.get(url).query(&[("query", query)]),
            "Search endpoint not found",
            "Invalid search request",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookstore::BookstoreErrorKind;

    #[test]
    fn test_books_url_trims_trailing_slash() {
        let client = BookstoreClient::new("http://localhost:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.books_url(), "http://localhost:5000/api/books");
    }

    #[test]
    fn test_book_url_encodes_id() {
        let client = BookstoreClient::new("http://localhost:5000", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.book_url("a/b?x=2").unwrap().as_str(),
            "http://localhost:5000/api/books/a%2Fb%3Fx=2"
        );
        assert_eq!(client.book_url(" 7 ").unwrap().as_str(), "http://localhost:5000/api/books/7");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = BookstoreClient::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert_eq!(err.kind(), BookstoreErrorKind::Validation);
    }

    #[test]
    fn test_blank_id_rejected_locally() {
        let client = BookstoreClient::new("http://localhost:5000", Duration::from_secs(1)).unwrap();
        let err = client.get_book("  ").unwrap_err();
        assert_eq!(err.kind(), BookstoreErrorKind::Validation);
    }

    #[test]
    fn test_blank_query_rejected_locally() {
        let client = BookstoreClient::new("http://localhost:5000", Duration::from_secs(1)).unwrap();
        let err = client.search_books("").unwrap_err();
        assert_eq!(err.kind(), BookstoreErrorKind::Validation);
    }
}
