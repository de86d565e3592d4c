//! Property-based tests for feed identifiers.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::identifier::{validate, FeedId, IDENTIFIER_LEN, URN_PREFIX};
    use proptest::prelude::*;

    proptest! {
        /// Property: every generated identifier passes validation
        #[test]
        fn generated_identifiers_validate(bytes in any::<[u8; 16]>()) {
            let id = FeedId::from_random_bytes(bytes);
            prop_assert!(validate(id.as_str()).is_ok(), "rejected {}", id);
        }

        /// Property: accepted identifiers have the fixed shape, and
        /// re-validating them succeeds
        #[test]
        fn accepted_identifiers_have_fixed_shape(bytes in any::<[u8; 16]>()) {
            let id = FeedId::from_random_bytes(bytes);
            let parsed = FeedId::parse(id.as_str()).unwrap();
            prop_assert!(FeedId::parse(parsed.as_str()).is_ok());

            let text = parsed.as_str();
            prop_assert_eq!(text.len(), IDENTIFIER_LEN);
            prop_assert!(text.starts_with(URN_PREFIX));
            prop_assert_eq!(&text[23..24], "4");
            prop_assert_eq!(&text[28..29], "8");
        }

        /// Property: the no-italics sibling differs in the variant nibble only
        #[test]
        fn noitalics_changes_one_character(bytes in any::<[u8; 16]>()) {
            let id = FeedId::from_random_bytes(bytes);
            let sibling = id.noitalics();
            prop_assert_eq!(&sibling.as_str()[28..29], "9");
            prop_assert_eq!(&sibling.as_str()[..28], &id.as_str()[..28]);
            prop_assert_eq!(&sibling.as_str()[29..], &id.as_str()[29..]);
        }

        /// Property: arbitrary strings never panic the validator
        #[test]
        fn validate_never_panics(input in ".*") {
            let _ = validate(&input);
        }

        /// Property: any single-character change to the version nibble is rejected
        #[test]
        fn wrong_version_rejected(bytes in any::<[u8; 16]>(), nibble in "[0-35-9a-f]") {
            let id = FeedId::from_random_bytes(bytes);
            let mut text = id.as_str().to_string();
            text.replace_range(23..24, &nibble);
            prop_assert!(validate(&text).is_err());
        }
    }
}
