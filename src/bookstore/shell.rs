//! Interactive bookstore menu.

use super::client::BookstoreClient;
use super::types::{Book, BookDraft, parse_in_stock};
use crate::console::{Console, is_input_closed};
use crate::store::Confirmation;
use eyre::Result;
use log::info;
use std::io::{BufRead, Write};

const MENU: [&str; 7] = [
    "View All Books",
    "View Book Details",
    "Add New Book",
    "Update Book",
    "Delete Book",
    "Search Books",
    "Exit",
];

/// Write books as an aligned table.
pub fn write_book_table(out: &mut impl Write, books: &[Book]) -> Result<()> {
    if books.is_empty() {
        writeln!(out, "No books found.")?;
        return Ok(());
    }

    writeln!(out, "{:<8}  {:<30}  {:<20}  {:>9}  {:<8}", "ID", "Title", "Author", "Price", "In Stock")?;
    writeln!(out, "{}", "-".repeat(83))?;
    for book in books {
        writeln!(
            out,
            "{:<8}  {:<30}  {:<20}  {:>9}  {:<8}",
            book.id,
            book.title,
            book.author,
            format!("${:.2}", book.price),
            if book.in_stock { "Yes" } else { "No" }
        )?;
    }
    Ok(())
}

pub struct BookstoreShell<R, W> {
    client: BookstoreClient,
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> BookstoreShell<R, W> {
    pub fn new(client: BookstoreClient, console: Console<R, W>) -> Self {
        Self { client, console }
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    fn display_menu(&mut self) -> Result<()> {
        self.console.heading("Bookstore Client")?;
        for (i, label) in MENU.iter().enumerate() {
            self.console.line(format!("{}. {}", i + 1, label))?;
        }
        Ok(())
    }

    /// Run until Exit is chosen or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.display_menu()?;

            let step = self.console.menu_choice(MENU.len()).and_then(|choice| {
                let handled = match choice {
                    1 => self.display_all_books(),
                    2 => self.display_book_details(),
                    3 => self.add_book(),
                    4 => self.update_book(),
                    5 => self.delete_book(),
                    6 => self.search_books(),
                    _ => return Ok(false),
                };
                handled.map(|()| true)
            });

            match step {
                Ok(true) => {}
                Ok(false) => {
                    self.console.info("Exiting Bookstore Client. Goodbye!")?;
                    return Ok(());
                }
                Err(e) if is_input_closed(&e) => {
                    info!("Input closed, leaving bookstore menu");
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn show_books(&mut self, books: &[Book]) -> Result<()> {
        let mut buf = Vec::new();
        write_book_table(&mut buf, books)?;
        self.console.line(String::from_utf8_lossy(&buf).trim_end())
    }

    fn display_all_books(&mut self) -> Result<()> {
        self.console.info("Fetching all books...")?;
        match self.client.list_books() {
            Ok(books) => self.show_books(&books),
            Err(e) => self.console.error(e),
        }
    }

    fn display_book_details(&mut self) -> Result<()> {
        let id = self.console.prompt_required("Enter book ID: ", "Book ID")?;
        match self.client.get_book(&id) {
            Ok(book) => self.show_books(std::slice::from_ref(&book)),
            Err(e) => self.console.error(e),
        }
    }

    fn prompt_price(&mut self, label: &str, current: Option<f64>) -> Result<f64> {
        loop {
            let answer = self.console.prompt(label)?;
            let answer = answer.trim();
            if answer.is_empty()
                && let Some(current) = current
            {
                return Ok(current);
            }
            match answer.parse::<f64>() {
                Ok(price) if price.is_finite() && price >= 0.0 => return Ok(price),
                _ => self.console.error("Price must be a valid number (e.g. 29.99)")?,
            }
        }
    }

    fn add_book(&mut self) -> Result<()> {
        let title = self.console.prompt_required("Enter the book title: ", "Book title")?;
        let author = self.console.prompt_required("Enter the book's author: ", "Book author")?;
        let price = self.prompt_price("Enter the book's price: ", None)?;
        let in_stock = parse_in_stock(&self.console.prompt("Is the book in stock? (yes/no): ")?);

        let draft = BookDraft {
            title,
            author,
            price,
            in_stock,
        };

        match self.client.add_book(&draft) {
            Ok(book) => self
                .console
                .success(&format!("Successfully added book with ID: {}", book.id)),
            Err(e) => self.console.error(e),
        }
    }

    fn update_book(&mut self) -> Result<()> {
        let id = self.console.prompt_required("Enter the book ID to update: ", "Book ID")?;
        let current = match self.client.get_book(&id) {
            Ok(book) => book,
            Err(e) => return self.console.error(e),
        };

        self.console.info("Current values (press Enter to keep):")?;
        let mut draft = BookDraft::from(&current);

        let title = self.console.prompt(&format!("Title [{}]: ", current.title))?;
        if !title.trim().is_empty() {
            draft.title = title.trim().to_string();
        }
        let author = self.console.prompt(&format!("Author [{}]: ", current.author))?;
        if !author.trim().is_empty() {
            draft.author = author.trim().to_string();
        }
        draft.price = self.prompt_price(&format!("Price [${:.2}]: ", current.price), Some(current.price))?;

        let stock_label = if current.in_stock { "yes" } else { "no" };
        let stock = self
            .console
            .prompt(&format!("In stock? (yes/no) [{}]: ", stock_label))?;
        if !stock.trim().is_empty() {
            draft.in_stock = parse_in_stock(&stock);
        }

        match self.client.update_book(&id, &draft) {
            Ok(book) => {
                self.console.success("Book updated successfully")?;
                self.show_books(std::slice::from_ref(&book))
            }
            Err(e) => self.console.error(e),
        }
    }

    fn delete_book(&mut self) -> Result<()> {
        let id = self.console.prompt_required("Enter the book ID to delete: ", "Book ID")?;
        let answer = self
            .console
            .prompt(&format!("Are you sure you want to delete book {}? (y/n): ", id))?;
        if Confirmation::from_answer(&answer) == Confirmation::No {
            return self.console.info("Deletion cancelled.");
        }

        match self.client.delete_book(&id) {
            Ok(message) => {
                let message = message.unwrap_or_else(|| "Book deleted successfully".to_string());
                self.console.success(&message)
            }
            Err(e) => self.console.error(e),
        }
    }

    fn search_books(&mut self) -> Result<()> {
        let query = self
            .console
            .prompt_required("Enter search query (title or author): ", "Search query")?;
        match self.client.search_books(&query) {
            Ok(books) if books.is_empty() => self.console.info("No books found matching your search"),
            Ok(books) => {
                let noun = if books.len() == 1 { "book" } else { "books" };
                self.console.success(&format!("Found {} matching {}:", books.len(), noun))?;
                self.show_books(&books)
            }
            Err(e) => self.console.error(e),
        }
    }
}
