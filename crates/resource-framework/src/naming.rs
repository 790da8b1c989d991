//! Table-name derivation.
//!
//! Storage layers address a resource type by a lower-cased plural of its
//! declared name. The rules here cover regular English plurals only; callers
//! that need more pass their own pluralizer to
//! [`Resource::table_name_with`](crate::Resource::table_name_with).

/// `"Category"` -> `"categories"`.
pub fn table_name(type_name: &str) -> String {
    pluralize(&type_name.to_lowercase())
}

/// Regular English plural of a lower-case word.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    if let Some(stem) = word.strip_suffix('y') {
        let after_consonant = stem
            .chars()
            .last()
            .is_some_and(|c| !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'));
        if after_consonant {
            return format!("{stem}ies");
        }
    }

    // shelf, leaf, knife; other `-f` words (roof, chef) take a plain `s`.
    if let Some(stem) = word.strip_suffix("ife") {
        return format!("{stem}ives");
    }
    if let Some(stem) = word
        .strip_suffix("lf")
        .map(|stem| format!("{stem}l"))
        .or_else(|| word.strip_suffix("eaf").map(|stem| format!("{stem}ea")))
    {
        return format!("{stem}ves");
    }

    let sibilant = ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| word.ends_with(suffix));
    if sibilant {
        return format!("{word}es");
    }

    format!("{word}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("book"), "books");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("address"), "addresses");
        assert_eq!(pluralize("branch"), "branches");
        assert_eq!(pluralize("y"), "ys");
        assert_eq!(pluralize("shelf"), "shelves");
        assert_eq!(pluralize("leaf"), "leaves");
        assert_eq!(pluralize("knife"), "knives");
        assert_eq!(pluralize("roof"), "roofs");
        assert_eq!(pluralize("chef"), "chefs");
        assert_eq!(pluralize(""), "");
    }

    #[test]
    fn test_table_name_lowercases() {
        assert_eq!(table_name("LibraryBranch"), "librarybranches");
        assert_eq!(table_name("Author"), "authors");
        assert_eq!(table_name("Shelf"), "shelves");
    }
}
