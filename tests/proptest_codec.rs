//! Property-based tests for the codec layer.
//!
//! The string-map codec is the most grammar-heavy part of the crate, so it
//! gets fuzzed through its public surface: whatever goes in through `set`
//! must come back out through `get`, and every produced blob must pass the
//! decodability probe.

use proptest::prelude::*;
use standard_bom::codec::string_map;
use standard_bom::HashAlgorithm;

proptest! {
    #[test]
    fn set_then_get_round_trips(
        key in "[A-Za-z][A-Za-z0-9._-]{0,30}",
        value in "\\PC{1,200}",
    ) {
        let blob = string_map::set(None, &key, Some(&value));
        let expected = value.trim();
        if expected.is_empty() {
            prop_assert_eq!(blob, None);
        } else {
            let blob = blob.expect("non-blank value must produce a blob");
            prop_assert!(string_map::is_decodable(&blob));
            let got = string_map::get(Some(&blob), &key);
            prop_assert_eq!(got.as_deref(), Some(expected));
        }
    }

    #[test]
    fn entries_do_not_interfere(
        value_a in "\\PC{1,100}",
        value_b in "\\PC{1,100}",
    ) {
        prop_assume!(!value_a.trim().is_empty() && !value_b.trim().is_empty());
        let blob = string_map::set(None, "KeyA", Some(&value_a));
        let blob = string_map::set(blob.as_deref(), "KeyB", Some(&value_b));
        let got_a = string_map::get(blob.as_deref(), "KeyA");
        prop_assert_eq!(got_a.as_deref(), Some(value_a.trim()));
        let got_b = string_map::get(blob.as_deref(), "KeyB");
        prop_assert_eq!(got_b.as_deref(), Some(value_b.trim()));
    }

    #[test]
    fn removing_the_last_entry_yields_absent(value in "\\PC{1,100}") {
        prop_assume!(!value.trim().is_empty());
        let blob = string_map::set(None, "Key", Some(&value));
        prop_assert_eq!(string_map::set(blob.as_deref(), "Key", None), None);
    }

    #[test]
    fn decodability_probe_never_panics(blob in "\\PC{0,500}") {
        let _ = string_map::is_decodable(&blob);
        let _ = string_map::get(Some(&blob), "Key");
    }

    #[test]
    fn hash_setter_never_panics(value in "\\PC{0,200}") {
        let mut hashes = None;
        let _ = standard_bom::codec::hash_field::set(&mut hashes, HashAlgorithm::Sha256, Some(&value));
    }

    #[test]
    fn valid_hex_is_always_accepted_lowercase(hex in "[0-9a-fA-F]{64}") {
        let mut hashes = None;
        standard_bom::codec::hash_field::set(&mut hashes, HashAlgorithm::Sha256, Some(&hex))
            .expect("valid hex of the right length must be accepted");
        let stored = standard_bom::codec::hash_field::get(hashes.as_deref(), HashAlgorithm::Sha256)
            .expect("hash must be stored");
        prop_assert_eq!(stored, hex.to_lowercase());
    }
}
