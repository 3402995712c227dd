//! Property-based tests for navigation and array formatting.

use h5tui::store::MemoryStore;
use h5tui::tui::{escape_name, format_array, EDGE_ITEMS, LINE_WIDTH, SUMMARY_THRESHOLD};
use h5tui::{ArrayValues, BrowserConfig, Controller};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn shape_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..12, 0..4)
}

fn int_array_strategy() -> impl Strategy<Value = ArrayValues> {
    shape_strategy().prop_flat_map(|shape| {
        let n: usize = shape.iter().product();
        prop::collection::vec(-100_000i64..100_000, n)
            .prop_map(move |data| ArrayValues::from_i64(shape.clone(), data).unwrap())
    })
}

fn float_array_strategy() -> impl Strategy<Value = ArrayValues> {
    (1usize..40).prop_flat_map(|n| {
        prop::collection::vec(-1e6f64..1e6, n).prop_map(move |data| {
            ArrayValues::from_f64(vec![n], data).unwrap()
        })
    })
}

/// Floats mixing tiny and ordinary magnitudes, so suppression flips notation.
fn mixed_magnitude_strategy() -> impl Strategy<Value = ArrayValues> {
    (
        prop::collection::vec(1.0f64..1000.0, 1..30),
        1e-7f64..5e-5,
        any::<prop::sample::Index>(),
    )
        .prop_map(|(mut data, tiny, at)| {
            let at = at.index(data.len() + 1);
            data.insert(at, tiny);
            ArrayValues::from_f64(vec![data.len()], data).unwrap()
        })
}

/// Integer arrays past the summary threshold, so truncation elides elements.
fn oversized_strategy() -> impl Strategy<Value = ArrayValues> {
    prop_oneof![
        ((SUMMARY_THRESHOLD + 1)..3000usize).prop_map(|n| vec![n]),
        (2usize..5, (SUMMARY_THRESHOLD / 2 + 1)..1500usize).prop_map(|(a, b)| vec![a, b]),
    ]
    .prop_map(|shape| {
        let n: usize = shape.iter().product();
        ArrayValues::from_i64(shape, (0..n as i64).collect()).unwrap()
    })
}

/// An array paired with the flag that visibly changes its content:
/// `true` for truncation, `false` for suppression.
fn toggle_case_strategy() -> impl Strategy<Value = (ArrayValues, bool)> {
    prop_oneof![
        oversized_strategy().prop_map(|values| (values, true)),
        mixed_magnitude_strategy().prop_map(|values| (values, false)),
    ]
}

/// A chain of nested groups with `width` children at every level.
fn nested_store(depth: usize, width: usize) -> MemoryStore {
    let mut store = MemoryStore::new();
    let mut path = String::new();
    for level in 0..depth {
        for i in 0..width {
            store.add_group(&format!("{path}/g{i}")).unwrap();
        }
        path.push_str(&format!("/g{}", level % width));
    }
    store
}

// ============================================================================
// Formatting Properties
// ============================================================================

proptest! {
    /// Property: formatting is a pure function of values and flags
    #[test]
    fn prop_format_deterministic(values in int_array_strategy(), t in any::<bool>(), s in any::<bool>()) {
        prop_assert_eq!(format_array(&values, t, s), format_array(&values, t, s));
    }

    /// Property: brackets are balanced
    #[test]
    fn prop_format_brackets_balanced(values in int_array_strategy()) {
        let text = format_array(&values, true, false);
        let open = text.matches('[').count();
        let close = text.matches(']').count();
        prop_assert_eq!(open, close);
    }

    /// Property: small arrays are never summarized
    #[test]
    fn prop_small_arrays_not_truncated(values in int_array_strategy()) {
        prop_assume!(values.len() <= SUMMARY_THRESHOLD);
        prop_assert_eq!(format_array(&values, true, false), format_array(&values, false, false));
    }

    /// Property: no output line is wider than the line width
    #[test]
    fn prop_lines_fit_width(values in int_array_strategy()) {
        let text = format_array(&values, false, false);
        for line in text.lines() {
            prop_assert!(line.len() <= LINE_WIDTH, "{:?}", line);
        }
    }

    /// Property: suppress never changes integer output
    #[test]
    fn prop_suppress_ignored_for_ints(values in int_array_strategy()) {
        prop_assert_eq!(format_array(&values, true, true), format_array(&values, true, false));
    }

    /// Property: every float is rendered with a decimal point
    #[test]
    fn prop_floats_have_points(values in float_array_strategy(), s in any::<bool>()) {
        let text = format_array(&values, true, s);
        let inner = text.trim_start_matches('[').trim_end_matches(']');
        for word in inner.split_whitespace() {
            prop_assert!(word.contains('.'), "{:?} in {:?}", word, text);
        }
    }

    /// Property: a long 1-D array shows exactly the edge items around "..."
    #[test]
    fn prop_truncated_1d_edges(n in (SUMMARY_THRESHOLD + 1)..5000usize) {
        let values = ArrayValues::from_i64(vec![n], (0..n as i64).collect()).unwrap();
        let text = format_array(&values, true, false);
        let words: Vec<&str> = text
            .trim_start_matches('[')
            .trim_end_matches(']')
            .split_whitespace()
            .collect();
        prop_assert_eq!(words.len(), 2 * EDGE_ITEMS + 1);
        prop_assert_eq!(words[EDGE_ITEMS], "...");
        let last = (n - 1).to_string();
        prop_assert_eq!(words[2 * EDGE_ITEMS], last.as_str());
    }

    /// Property: escaping never shortens a name and leaves plain names alone
    #[test]
    fn prop_escape_plain_identity(name in "[a-zA-Z0-9_ .-]{1,20}") {
        prop_assert_eq!(escape_name(&name), name.as_str());
    }

    #[test]
    fn prop_escape_never_shrinks(name in "\\PC{0,20}") {
        prop_assert!(escape_name(&name).len() >= name.len());
    }
}

// ============================================================================
// Navigation Properties
// ============================================================================

proptest! {
    /// Property: descending then ascending the same number of levels with
    /// per-depth memory restores the root and its highlight
    #[test]
    fn prop_round_trip_per_depth(depth in 1usize..6, width in 1usize..5, start in 0usize..5) {
        let config = BrowserConfig::default().with_remember_all_levels(true);
        let mut c = Controller::new(nested_store(depth, width), config).unwrap();
        c.set_highlighted(start);
        let root_highlight = c.highlighted();

        let mut highlights = Vec::new();
        for level in 0..depth {
            let before = c.current_path().depth();
            c.set_highlighted(if level == 0 { root_highlight } else { level % width });
            let highlight = c.highlighted();
            c.activate_selection();
            if c.current_path().depth() == before {
                break;
            }
            highlights.push(highlight);
        }
        let entered = c.current_path().depth();
        for _ in 0..entered {
            c.go_back();
            let expected = highlights.pop().unwrap();
            prop_assert_eq!(c.highlighted(), expected);
        }
        prop_assert!(c.current_path().is_root());
        prop_assert_eq!(c.highlighted(), root_highlight);
        prop_assert_eq!(c.current_header(), "Path: /");
    }

    /// Property: toggles change the displayed content and toggling twice
    /// restores it byte for byte
    #[test]
    fn prop_toggles_involutive((values, truncate) in toggle_case_strategy()) {
        let mut store = MemoryStore::new();
        store.add_dataset("/d", values).unwrap();
        let mut c = Controller::new(store, BrowserConfig::default()).unwrap();
        c.activate_selection();
        let toggle = |c: &mut Controller<MemoryStore>| {
            if truncate { c.toggle_truncate() } else { c.toggle_suppress() }
        };

        let before = c.current_content().map(str::to_string);
        toggle(&mut c);
        let flipped = c.current_content().map(str::to_string);
        prop_assert!(flipped.is_some());
        prop_assert_ne!(&flipped, &before);
        toggle(&mut c);
        prop_assert_eq!(c.current_content().map(str::to_string), before);
    }

    /// Property: toggling the flag that does not apply to an array leaves
    /// its content unchanged
    #[test]
    fn prop_inapplicable_toggle_is_identity(values in int_array_strategy()) {
        let mut store = MemoryStore::new();
        store.add_dataset("/d", values).unwrap();
        let mut c = Controller::new(store, BrowserConfig::default()).unwrap();
        c.activate_selection();
        let before = c.current_content().map(str::to_string);
        c.toggle_suppress();
        prop_assert!(c.suppress());
        prop_assert_eq!(c.current_content().map(str::to_string), before);
    }

    /// Property: no key sequence moves the path while a dataset is open
    #[test]
    fn prop_viewing_pins_path(ops in prop::collection::vec(0u8..5, 0..30)) {
        let mut store = MemoryStore::new();
        store.add_dataset("/g/d", ArrayValues::from_i64(vec![2], vec![1, 2]).unwrap()).unwrap();
        store.add_group("/g/h").unwrap();
        let mut c = Controller::new(store, BrowserConfig::default()).unwrap();
        c.activate_selection();
        c.activate_selection();
        let path = c.current_path().clone();
        for op in ops {
            if !c.is_viewing_dataset() {
                break;
            }
            match op {
                0 => c.activate_selection(),
                1 => c.select_next(),
                2 => c.toggle_truncate(),
                3 => c.toggle_suppress(),
                _ => c.set_highlighted(1),
            }
            prop_assert_eq!(c.current_path(), &path);
        }
    }
}
