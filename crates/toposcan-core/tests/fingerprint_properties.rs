use proptest::prelude::*;
use toposcan_core::{content_fingerprint, FINGERPRINT_HEX_LEN};

proptest! {
    #[test]
    fn fingerprint_is_deterministic(raw in ".{0,256}") {
        let h1 = content_fingerprint(&raw);
        let h2 = content_fingerprint(&raw);
        prop_assert_eq!(h1, h2);
    }

    #[test]
    fn fingerprint_is_fixed_width_lowercase_hex(raw in ".{0,256}") {
        let h = content_fingerprint(&raw);
        prop_assert_eq!(h.len(), FINGERPRINT_HEX_LEN);
        prop_assert!(h.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn appending_a_byte_changes_the_fingerprint(raw in ".{0,256}") {
        let mut edited = raw.clone();
        edited.push('x');
        prop_assert_ne!(content_fingerprint(&raw), content_fingerprint(&edited));
    }
}
