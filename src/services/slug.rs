use std::collections::HashSet;

/// Used when a title has no ASCII alphanumerics at all.
pub const FALLBACK_SLUG: &str = "press-release";

/// Lower-cases `input` and collapses every run of non-alphanumeric
/// characters into a single hyphen, trimming hyphens at both ends.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut prev_hyphen = true;

    for ch in input.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Derives a slug for `title` that is not in `existing`.
///
/// The bare base is used when free; otherwise `base-2`, `base-3`, ... are
/// tried in order and the first free one wins.
pub fn generate_unique_slug<S>(title: &str, existing: &HashSet<S>) -> String
where
    S: std::borrow::Borrow<str> + Eq + std::hash::Hash,
{
    let mut base = slugify(title);
    if base.is_empty() {
        base = FALLBACK_SLUG.to_string();
    }

    if !existing.contains(base.as_str()) {
        return base;
    }

    let mut suffix: u64 = 2;
    loop {
        let candidate = format!("{base}-{suffix}");
        if !existing.contains(candidate.as_str()) {
            return candidate;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn normalizes_title() {
        assert_eq!(slugify("Acme Corp Launches!!"), "acme-corp-launches");
        assert_eq!(slugify("  --Q3 Results: Up 20%--  "), "q3-results-up-20");
        assert_eq!(slugify("Café Ünïcode"), "caf-n-code");
    }

    #[test]
    fn free_base_is_returned_unchanged() {
        assert_eq!(
            generate_unique_slug("Acme Corp Launches!!", &set(&[])),
            "acme-corp-launches"
        );
    }

    #[test]
    fn first_collision_gets_suffix_two() {
        assert_eq!(
            generate_unique_slug("Acme Corp Launches!!", &set(&["acme-corp-launches"])),
            "acme-corp-launches-2"
        );
        assert_eq!(
            generate_unique_slug(
                "Acme Corp Launches",
                &set(&["acme-corp-launches", "acme-corp-launches-2", "acme-corp-launches-4"])
            ),
            "acme-corp-launches-3"
        );
    }

    #[test]
    fn empty_base_falls_back_to_placeholder() {
        assert_eq!(generate_unique_slug("!!! ???", &set(&[])), FALLBACK_SLUG);
        assert_eq!(
            generate_unique_slug("", &set(&[FALLBACK_SLUG])),
            "press-release-2"
        );
    }

    #[test]
    fn growing_set_never_repeats() {
        let mut existing = HashSet::new();
        let mut produced = Vec::new();

        for _ in 0..25 {
            let slug = generate_unique_slug("Same Title", &existing);
            assert!(existing.insert(slug.clone()), "duplicate slug {slug}");
            produced.push(slug);
        }

        assert_eq!(produced[0], "same-title");
        assert_eq!(produced[1], "same-title-2");
        assert_eq!(produced[24], "same-title-25");
    }

    #[test]
    fn deterministic_for_same_input() {
        let existing = set(&["launch", "launch-2"]);
        assert_eq!(
            generate_unique_slug("Launch", &existing),
            generate_unique_slug("Launch", &existing)
        );
    }
}
