use super::Book;
use resource_framework::resource;
use resource_framework::rule::{Bounds, NonEmpty};
use resource_framework::Property;

resource! {
    /// A physical shelf holding books.
    pub struct Shelf {
        pub property label: String = Property::new(String::new()).rule(NonEmpty),
        pub property capacity: u32 = Property::new(20).rule(Bounds::between(1, 500)),
        pub relationship books: Book,
    }
}

impl Shelf {
    pub fn new(label: impl Into<String>) -> Self {
        let mut shelf = Self::default();
        shelf.label.set(label.into());
        shelf
    }

    /// Relationships are not validated, so capacity is checked here.
    pub fn is_over_capacity(&self) -> bool {
        self.books.len() > *self.capacity.value() as usize
    }
}
