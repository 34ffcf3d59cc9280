/// Derive a URL-safe workspace slug from a display name.
/// Lowercases ASCII alphanumerics and collapses everything else into single
/// hyphens; leading and trailing separators are dropped.
pub fn create_slug(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c.to_ascii_lowercase());
            pending_separator = false;
        } else {
            pending_separator = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_hyphenates() {
        assert_eq!(create_slug("Acme Inc"), "acme-inc");
    }

    #[test]
    fn test_collapses_separators() {
        assert_eq!(create_slug("  Family -- Budget  "), "family-budget");
    }

    #[test]
    fn test_strips_symbols() {
        assert_eq!(create_slug("Miguel's Workspace!"), "miguel-s-workspace");
    }

    #[test]
    fn test_empty_for_symbol_only_input() {
        assert_eq!(create_slug("!!!"), "");
    }
}
