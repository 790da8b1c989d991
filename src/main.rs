//! Demo: binds a small catalog from JSON and reports what is wrong with it.

use resource_framework::Resource;
use resource_recipe::binding::{self, BindError, ValidationReport};
use resource_recipe::lifecycle::{setup_tracing, warm_up};
use resource_recipe::model::{Author, Book, Shelf};
use std::sync::Arc;
use tracing::{error, info, warn};

fn main() -> Result<(), BindError> {
    setup_tracing();

    info!("Starting catalog demo");
    warm_up();

    let author: Author =
        binding::bind(r#"{ "full_name": "Frank Herbert", "born": 1920, "email": null }"#)?;
    let author = Arc::new(author);

    let mut book: Book = binding::bind(
        r#"{ "title": "Dune", "isbn": "978-0-441-17271-9", "pages": 412, "price": 9.99, "tags": ["sf", "classic"] }"#,
    )?;
    if !book.set(Book::AUTHORS, Arc::clone(&author)) {
        warn!(field = Book::AUTHORS, "Author not linked");
    }
    info!(title = %book.title.value(), authors = ?book.author_names(), "Book catalogued");

    // A payload with an empty title, a bad ISBN and a key the book does not have.
    match binding::bind::<Book>(r#"{ "title": "", "isbn": "12-34", "publisher": "Chilton" }"#) {
        Ok(book) => warn!(title = %book.title.value(), "Unexpectedly valid"),
        Err(BindError::Invalid(err)) => match ValidationReport::from_error(&err) {
            Some(report) => info!(report = %report.to_json()?, "Rejected payload"),
            None => error!(error = %err, "Binding failed"),
        },
        Err(err) => error!(error = %err, "Binding failed"),
    }

    let mut shelf = Shelf::new("Science Fiction");
    shelf.books.add(book);
    info!(
        shelf = %shelf.label.value(),
        books = shelf.books.len(),
        over_capacity = shelf.is_over_capacity(),
        "Shelf stocked"
    );
    info!(values = %binding::render(&shelf)?, "Shelf rendered");

    info!("Demo completed successfully");
    Ok(())
}
