const SEPARATOR: char = '-';
const FALLBACK: &str = "claim";

/// Lowercase slug: alphanumerics kept, every other run becomes a single `-`.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;
    for c in input.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push(SEPARATOR);
            }
            pending_separator = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }
    if slug.is_empty() {
        slug.push_str(FALLBACK);
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn collapses_runs_and_trims_edges() {
        assert_eq!(slugify("  My Holiday -- 2019!! "), "my-holiday-2019");
        assert_eq!(slugify("a_b.c"), "a-b-c");
    }

    #[test]
    fn keeps_unicode_letters() {
        assert_eq!(slugify("Été à Paris"), "été-à-paris");
    }

    #[test]
    fn empty_slug_falls_back() {
        assert_eq!(slugify("___"), "claim");
        assert_eq!(slugify(""), "claim");
    }
}
