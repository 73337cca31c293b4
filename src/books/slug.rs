use slug::slugify;

/// URL-safe form of a title: lowercase, hyphen-separated, ASCII.
///
/// The slug is recomputed from the title on every write, so it only ever
/// reflects the last saved title.
pub fn derive_slug(title: &str) -> String {
    slugify(title)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_spaces_become_hyphens() {
        assert_eq!(derive_slug("Harry Potter"), "harry-potter");
    }

    #[test]
    fn test_single_word_is_lowercased() {
        assert_eq!(derive_slug("Dune"), "dune");
    }

    #[test]
    fn test_punctuation_becomes_separators() {
        assert_eq!(
            derive_slug("The Hitchhiker's Guide"),
            "the-hitchhiker-s-guide"
        );
    }

    #[test]
    fn test_derivation_is_deterministic() {
        assert_eq!(derive_slug("My Brilliant Friend"), derive_slug("My Brilliant Friend"));
    }
}
