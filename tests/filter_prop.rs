//! Filter engine property tests
//!
//! Name filtering is checked against a lowercase substring model, size
//! comparators against plain integer arithmetic.

use astrum::file::{DirectoryEntry, EntryKind, EntryPermissions};
use astrum::filter::query::APPROX_TOLERANCE;
use astrum::filter::{Comparator, FilterEngine, FilterQuery, SizeSpec};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use std::path::PathBuf;

fn file_entry(name: &str, size: u64) -> DirectoryEntry {
    DirectoryEntry {
        name: name.to_string(),
        path: PathBuf::from("/data").join(name),
        kind: EntryKind::File,
        target_kind: EntryKind::File,
        size,
        created_at: None,
        modified_at: None,
        accessed_at: None,
        permissions: EntryPermissions::default(),
        synthetic: false,
    }
}

fn entry_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.-]{1,16}"
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn name_filter_matches_substring_model(
        names in proptest::collection::vec(entry_name(), 0..24),
        needle in "[a-zA-Z0-9]{0,3}"
    ) {
        let entries: Vec<DirectoryEntry> = names.iter().map(|name| file_entry(name, 0)).collect();
        let filtered = FilterEngine::apply(&entries, &FilterQuery::name(needle.clone()));

        let expected: Vec<&String> = names
            .iter()
            .filter(|name| name.to_lowercase().contains(&needle.to_lowercase()))
            .collect();
        let actual: Vec<&String> = filtered.iter().map(|entry| &entry.name).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn filter_result_is_ordered_subset(
        names in proptest::collection::vec(entry_name(), 0..24),
        needle in "[a-z]{1,2}"
    ) {
        let entries: Vec<DirectoryEntry> = names.iter().map(|name| file_entry(name, 0)).collect();
        let filtered = FilterEngine::apply(&entries, &FilterQuery::name(needle));

        let mut cursor = entries.iter();
        for entry in &filtered {
            prop_assert!(cursor.any(|candidate| candidate == entry));
        }
    }

    #[test]
    fn greater_and_less_agree_with_arithmetic(
        size in 0u64..(1u64 << 40),
        magnitude in 0u64..4096,
        unit in prop_oneof![Just("B"), Just("KB"), Just("MB"), Just("GB")]
    ) {
        let multiplier: u64 = match unit {
            "KB" => 1024,
            "MB" => 1024 * 1024,
            "GB" => 1024 * 1024 * 1024,
            _ => 1,
        };
        let target = magnitude * multiplier;
        let entries = vec![file_entry("f", size)];

        let greater = FilterEngine::apply(&entries, &FilterQuery::size(format!(">{}{}", magnitude, unit)));
        prop_assert_eq!(greater.len() == 1, size > target);

        let less = FilterEngine::apply(&entries, &FilterQuery::size(format!("<{}{}", magnitude, unit)));
        prop_assert_eq!(less.len() == 1, size < target);
    }

    #[test]
    fn approx_band_is_five_percent(size in 0u64..10_000_000, target in 1u64..10_000_000) {
        let spec = SizeSpec::parse(&format!("={}", target)).unwrap();
        prop_assert_eq!(spec.comparator, Comparator::Approx);

        let ratio = size as f64 / target as f64;
        let band = 1.0 - APPROX_TOLERANCE..=1.0 + APPROX_TOLERANCE;
        prop_assert_eq!(spec.matches(size), band.contains(&ratio));
    }

    #[test]
    fn unparseable_size_is_fail_open(text in "[g-zG-Z]{1,8}", size in any::<u64>()) {
        let entries = vec![file_entry("f", size)];
        let filtered = FilterEngine::apply(&entries, &FilterQuery::size(text));
        prop_assert_eq!(filtered.len(), 1);
    }
}
