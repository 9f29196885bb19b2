//! Locale-aware title ordering.
//!
//! Titles are compared with the CLDR root collation at its default
//! (tertiary) strength: accents and case only break ties between titles
//! that are otherwise equal, whitespace and punctuation sort before digits,
//! and digits sort before letters. Raw byte order settles the rest so the
//! ordering is total.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorBorrowed};
use once_cell::sync::Lazy;

static COLLATOR: Lazy<CollatorBorrowed<'static>> = Lazy::new(|| {
    Collator::try_new(Default::default(), Default::default())
        .expect("compiled root collation data")
});

/// Compare two titles the way a reader expects them alphabetised.
#[must_use]
pub fn title_cmp(a: &str, b: &str) -> Ordering {
    COLLATOR.compare(a, b).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive_at_first_level() {
        assert_eq!(title_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(title_cmp("Banana", "apple"), Ordering::Greater);
        // Byte order would put "Z" before "a".
        assert_eq!(title_cmp("Zebra", "aardvark"), Ordering::Greater);
    }

    #[test]
    fn lower_case_first_on_ties() {
        assert_eq!(title_cmp("api", "API"), Ordering::Less);
        assert_eq!(title_cmp("API", "API"), Ordering::Equal);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(
            title_cmp("API Gateway", "API Gateway vs Service Mesh"),
            Ordering::Less
        );
    }

    #[test]
    fn punctuation_before_digits_before_letters() {
        assert_eq!(title_cmp("CAP, PACELC", "Capacity Planning"), Ordering::Less);
        assert_eq!(title_cmp("15 Open-Source", "A Brief History"), Ordering::Less);
        assert_eq!(title_cmp("A-B", "A1"), Ordering::Less);
        assert_eq!(title_cmp("A B", "A-B"), Ordering::Less);
    }

    #[test]
    fn accented_letters_sort_with_their_base_letter() {
        assert_eq!(title_cmp("Élan", "Zebra"), Ordering::Less);
        assert_eq!(title_cmp("éclair", "edge"), Ordering::Less);
        assert_eq!(title_cmp("Ångström", "Beta"), Ordering::Less);
        // Accent only breaks the tie.
        assert_eq!(title_cmp("resume", "résumé"), Ordering::Less);
    }
}
