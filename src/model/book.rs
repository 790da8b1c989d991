use super::Author;
use resource_framework::resource;
use resource_framework::rule::{ensure, Bounds, MaxLen, NonEmpty};
use resource_framework::Property;

resource! {
    /// A catalog entry.
    ///
    /// # Resource Framework
    /// `authors` is a relationship: it is reachable by name but never validated,
    /// an invalid author does not make the book invalid. `cover` is plain data and
    /// is not part of the registry.
    #[derive(Clone)]
    pub struct Book {
        pub property title: String = Property::new(String::new())
            .rule(NonEmpty)
            .rule(MaxLen(200)),
        pub property isbn: String = Property::new(String::new())
            .rule(ensure(|isbn: &String| is_isbn(isbn), "must be a 10 or 13 digit ISBN")),
        pub property pages: u32 = Property::new(1).rule(Bounds::between(1, 10_000)),
        pub property price: f64 = Property::new(0.0).rule(Bounds::at_least(0.0)),
        pub property tags: Vec<String> = Property::new(Vec::new()).rule(MaxLen(8)),
        pub relationship authors: Author,
        pub data cover: Option<Vec<u8>>,
    }
}

impl Book {
    pub fn new(title: impl Into<String>, isbn: impl Into<String>) -> Self {
        let mut book = Self::default();
        book.title.set(title.into());
        book.isbn.set(isbn.into());
        book
    }

    /// Names of the linked authors, in link order.
    pub fn author_names(&self) -> Vec<String> {
        self.authors
            .iter()
            .map(|author| author.full_name.value().clone())
            .collect()
    }
}

/// Hyphens and spaces are ignored; a trailing `X` is allowed in the 10 digit form.
pub fn is_isbn(isbn: &str) -> bool {
    let digits: Vec<char> = isbn.chars().filter(|c| !matches!(c, '-' | ' ')).collect();
    match digits.len() {
        13 => digits.iter().all(char::is_ascii_digit),
        10 => {
            digits[..9].iter().all(char::is_ascii_digit)
                && (digits[9].is_ascii_digit() || digits[9] == 'X')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isbn_forms() {
        assert!(is_isbn("978-0-441-17271-9"));
        assert!(is_isbn("0-441-17271-7"));
        assert!(is_isbn("080442957X"));
        assert!(!is_isbn("978-0-441"));
        assert!(!is_isbn("97804411727A9"));
        assert!(!is_isbn(""));
    }
}
