use resource_framework::resource;
use resource_framework::rule::{ensure, Bounds, MaxLen, NonEmpty, Optional};
use resource_framework::Property;

resource! {
    /// A person credited on one or more books.
    ///
    /// # Resource Framework
    /// Declared with [`resource!`](resource_framework::resource!), so it implements
    /// [`Resource`](resource_framework::Resource): every `property` below is
    /// validated by [`is_valid`](resource_framework::Resource::is_valid) and
    /// reachable by name through `get`/`set`.
    #[derive(Clone)]
    pub struct Author {
        pub property full_name: String = Property::new(String::new())
            .rule(NonEmpty)
            .rule(MaxLen(120)),
        pub property email: Option<String> = Property::new(None)
            .rule(Optional(ensure(|email: &String| email.contains('@'), "must be an email address"))),
        pub property born: Option<i32> = Property::new(None)
            .rule(Optional(Bounds::between(1000, 2100))),
    }
}

impl Author {
    /// Creates an author with only a name set.
    pub fn new(full_name: impl Into<String>) -> Self {
        let mut author = Self::default();
        author.full_name.set(full_name.into());
        author
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email.set(Some(email.into()));
        self
    }
}
