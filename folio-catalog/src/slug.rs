//! Slug derivation for project ids.

/// Convert a title to a URL-safe slug.
///
/// ASCII word characters are lowercased and kept, runs of whitespace and hyphens
/// collapse to a single `-`, and everything else (apostrophes, quotes, `#`,
/// `&`, punctuation, non-ASCII letters) is dropped without introducing a
/// separator.
///
/// ```
/// use folio_catalog::slugify;
///
/// assert_eq!(slugify("Don't Miss a Moment Film #1"), "dont-miss-a-moment-film-1");
/// assert_eq!(slugify("Otropo \"Hair Salon\""), "otropo-hair-salon");
/// ```
pub fn slugify(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut pending_separator = false;

    for c in s.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_separator && !result.is_empty() {
                result.push('-');
            }
            pending_separator = false;
            result.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' {
            pending_separator = true;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_separators() {
        assert_eq!(slugify("TAB - Kelly Myers Resilence"), "tab-kelly-myers-resilence");
        assert_eq!(slugify("  Warning   Levels "), "warning-levels");
    }

    #[test]
    fn drops_punctuation_without_separator() {
        assert_eq!(slugify("Racism. It Stops With Me."), "racism-it-stops-with-me");
        assert_eq!(slugify("Deakin Alumni '25 - Andy"), "deakin-alumni-25-andy");
    }

    #[test]
    fn non_ascii_letters_are_dropped() {
        assert_eq!(slugify("Café Reel"), "caf-reel");
        assert_eq!(slugify("Ōtautahi Nights"), "tautahi-nights");
    }

    #[test]
    fn empty_when_nothing_usable() {
        assert_eq!(slugify("#!?"), "");
    }
}
