use img_shrink::inventory::{has_supported_extension, relative_to};
use img_shrink::{first_free_name, format_file_size};
use proptest::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

proptest! {
    #[test]
    fn relative_path_round_trips(
        root_parts in prop::collection::vec("[a-zA-Z0-9_-]{1,8}", 1..4),
        rel_parts in prop::collection::vec("[a-zA-Z0-9_.-]{1,8}", 1..6)
    ) {
        prop_assume!(rel_parts.iter().all(|p| p != "." && p != ".."));

        let root: PathBuf = std::iter::once("/".to_string()).chain(root_parts).collect();
        let absolute: PathBuf = rel_parts.iter().fold(root.clone(), |acc, p| acc.join(p));

        let relative = relative_to(&absolute, &root).unwrap();
        prop_assert_eq!(root.join(relative), absolute);
    }

    #[test]
    fn small_sizes_print_raw_bytes(bytes in 0u64..1024) {
        prop_assert_eq!(format_file_size(bytes), format!("{} b", bytes));
    }

    #[test]
    fn sizes_use_known_unit(bytes in any::<u64>()) {
        let formatted = format_file_size(bytes);
        let (value, unit) = formatted.split_once(' ').unwrap();
        prop_assert!(["b", "k", "m", "g"].contains(&unit));

        let value: f64 = value.parse().unwrap();
        prop_assert!(value >= 0.0);
        if unit != "g" {
            prop_assert!(value < 1024.0 + 0.005);
        }
    }

    #[test]
    fn extension_match_is_case_sensitive(
        stem in "[a-z0-9_]{1,10}",
        extension in prop::sample::select(vec!["png", "PNG", "Png", "jpg", "txt", "pngx"])
    ) {
        let filename = format!("{}.{}", stem, extension);
        prop_assert_eq!(has_supported_extension(Path::new(&filename)), extension == "png");
    }

    #[test]
    fn first_free_name_picks_lowest_free(taken_counters in prop::collection::hash_set(0u64..20, 0..20)) {
        // Counter 0 stands for the bare name.
        let taken: HashSet<String> = taken_counters
            .iter()
            .map(|n| if *n == 0 { "img_optimized".to_string() } else { format!("img_optimized_{}", n) })
            .collect();

        let name = first_free_name("img_optimized", |candidate| taken.contains(candidate));
        prop_assert!(!taken.contains(&name));

        let expected = (0u64..).find(|n| !taken_counters.contains(n)).unwrap();
        if expected == 0 {
            prop_assert_eq!(name, "img_optimized");
        } else {
            prop_assert_eq!(name, format!("img_optimized_{}", expected));
        }
    }
}
