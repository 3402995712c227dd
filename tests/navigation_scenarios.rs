//! Navigation Scenario Tests
//!
//! End-to-end browsing sessions driven through the public `Controller` API
//! against in-memory stores, including stores that change or fail while a
//! session is open.

use std::cell::RefCell;
use std::rc::Rc;

use h5tui::store::{HierarchicalStore, MemoryStore, NodeKind, StoreError, StoreResult};
use h5tui::{ArrayValues, BrowserConfig, Controller, NodePath};

// ============================================================================
// Test Helpers
// ============================================================================

fn ints(shape: Vec<usize>) -> ArrayValues {
    let n: usize = shape.iter().product();
    ArrayValues::from_i64(shape, (0..n as i64).collect()).unwrap()
}

/// Root with `a/{x, y}` and `b/{c/{deep}, z}`.
fn sample_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store
        .add_dataset("/a/x", ArrayValues::from_i64(vec![3], vec![1, 2, 3]).unwrap())
        .unwrap();
    store.add_dataset("/a/y", ints(vec![5000])).unwrap();
    store.add_dataset("/b/c/deep", ints(vec![2, 2])).unwrap();
    store.add_dataset("/b/z", ints(vec![])).unwrap();
    store
}

fn browser(store: MemoryStore) -> Controller<MemoryStore> {
    Controller::new(store, BrowserConfig::default()).unwrap()
}

/// Records every path the browser asks about.
struct RecordingStore {
    inner: MemoryStore,
    queries: RefCell<Vec<String>>,
}

impl RecordingStore {
    fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            queries: RefCell::new(Vec::new()),
        }
    }

    fn record(&self, path: &NodePath) {
        self.queries.borrow_mut().push(path.as_str().to_string());
    }
}

impl HierarchicalStore for RecordingStore {
    fn children(&self, path: &NodePath) -> StoreResult<Vec<String>> {
        self.record(path);
        self.inner.children(path)
    }

    fn kind(&self, path: &NodePath) -> StoreResult<NodeKind> {
        self.record(path);
        self.inner.kind(path)
    }

    fn read(&self, path: &NodePath) -> StoreResult<ArrayValues> {
        self.record(path);
        self.inner.read(path)
    }
}

/// A store the test can edit while the browser holds it.
#[derive(Clone)]
struct SharedStore(Rc<RefCell<MemoryStore>>);

impl HierarchicalStore for SharedStore {
    fn children(&self, path: &NodePath) -> StoreResult<Vec<String>> {
        self.0.borrow().children(path)
    }

    fn kind(&self, path: &NodePath) -> StoreResult<NodeKind> {
        self.0.borrow().kind(path)
    }

    fn read(&self, path: &NodePath) -> StoreResult<ArrayValues> {
        self.0.borrow().read(path)
    }
}

/// Answers `kind` but fails every read.
struct UnreadableStore(MemoryStore);

impl HierarchicalStore for UnreadableStore {
    fn children(&self, path: &NodePath) -> StoreResult<Vec<String>> {
        self.0.children(path)
    }

    fn kind(&self, path: &NodePath) -> StoreResult<NodeKind> {
        self.0.kind(path)
    }

    fn read(&self, _path: &NodePath) -> StoreResult<ArrayValues> {
        Err(StoreError::backend("disk on fire"))
    }
}

// ============================================================================
// Basic Sessions
// ============================================================================

#[test]
fn test_open_dataset_in_group() {
    let mut c = browser(sample_store());
    c.activate_selection();
    assert_eq!(c.current_header(), "Path: /a");
    c.activate_selection();
    assert!(c.is_viewing_dataset());
    assert_eq!(c.current_header(), "Path: /a\nDataset: x (3,)");
    assert_eq!(c.current_content(), Some("[1 2 3]"));
}

#[test]
fn test_round_trip_restores_root() {
    let mut c = browser(sample_store());
    c.activate_selection();
    c.activate_selection();
    c.go_back();
    c.go_back();
    assert_eq!(c.current_header(), "Path: /");
    assert!(c.current_path().is_root());
    assert_eq!(c.highlighted(), 0);
    assert!(!c.is_viewing_dataset());
    assert_eq!(c.current_listing(), vec!["a", "b"]);
}

#[test]
fn test_go_back_while_viewing_keeps_path() {
    let mut c = browser(sample_store());
    c.set_highlighted(1);
    c.activate_selection();
    c.activate_selection();
    c.activate_selection();
    assert_eq!(c.current_path().as_str(), "/b/c");
    assert!(c.is_viewing_dataset());
    c.go_back();
    assert_eq!(c.current_path().as_str(), "/b/c");
    assert!(!c.is_viewing_dataset());
    assert_eq!(c.current_header(), "Path: /b/c");
}

#[test]
fn test_go_back_at_root_is_noop() {
    let mut c = browser(sample_store());
    c.go_back();
    c.go_back();
    assert_eq!(c.current_header(), "Path: /");
    assert_eq!(c.current_listing(), vec!["a", "b"]);
}

#[test]
fn test_scalar_dataset_header() {
    let mut c = browser(sample_store());
    c.select_last();
    c.activate_selection();
    c.select_last();
    c.activate_selection();
    assert_eq!(c.current_header(), "Path: /b\nDataset: z ()");
    assert_eq!(c.current_content(), Some("0"));
}

// ============================================================================
// Highlight Memory
// ============================================================================

#[test]
fn test_single_level_memory_restores_last_level() {
    let mut c = browser(sample_store());
    c.set_highlighted(1);
    c.activate_selection();
    c.go_back();
    assert_eq!(c.highlighted(), 1);
}

#[test]
fn test_per_depth_memory_restores_every_level() {
    let config = BrowserConfig::default().with_remember_all_levels(true);
    let mut c = Controller::new(sample_store(), config).unwrap();
    c.set_highlighted(1);
    c.activate_selection(); // /b
    assert_eq!(c.current_listing(), vec!["c", "z"]);
    c.activate_selection(); // /b/c
    c.go_back();
    assert_eq!(c.highlighted(), 0);
    c.go_back();
    assert_eq!(c.highlighted(), 1);
    assert!(c.current_path().is_root());
}

#[test]
fn test_default_memory_reuses_single_value() {
    let mut c = browser(sample_store());
    c.set_highlighted(1);
    c.activate_selection(); // /b, remembers 1
    c.activate_selection(); // /b/c, remembers 0
    c.go_back();
    c.go_back();
    assert_eq!(c.highlighted(), 0);
}

// ============================================================================
// Formatting Toggles
// ============================================================================

#[test]
fn test_truncate_toggle_on_large_dataset() {
    let mut c = browser(sample_store());
    c.activate_selection();
    c.select_next();
    c.activate_selection();
    assert_eq!(c.current_header(), "Path: /a\nDataset: y (5000,)");
    let truncated = c.current_content().unwrap().to_string();
    assert_eq!(truncated, "[   0    1    2 ... 4997 4998 4999]");

    c.toggle_truncate();
    let full = c.current_content().unwrap().to_string();
    assert!(full.len() > truncated.len());
    assert!(!full.contains("..."));

    c.toggle_truncate();
    assert_eq!(c.current_content().unwrap(), truncated);
}

#[test]
fn test_toggles_do_not_touch_store() {
    let store = RecordingStore::new(sample_store());
    let mut c = Controller::new(store, BrowserConfig::default()).unwrap();
    c.activate_selection();
    c.activate_selection();
    let before = c.store().queries.borrow().len();
    c.toggle_truncate();
    c.toggle_suppress();
    c.toggle_truncate();
    assert_eq!(c.store().queries.borrow().len(), before);
}

// ============================================================================
// Escaping
// ============================================================================

#[test]
fn test_bracket_name_escaped_for_display_only() {
    let mut inner = MemoryStore::new();
    inner.add_group("/a[1]").unwrap();
    inner.add_dataset("/a[1]/v", ints(vec![2])).unwrap();
    let mut c = Controller::new(RecordingStore::new(inner), BrowserConfig::default()).unwrap();

    assert_eq!(c.current_listing(), vec!["a\\[1]"]);
    c.activate_selection();
    assert_eq!(c.current_header(), "Path: /a[1]");

    let queries = c.store().queries.borrow().clone();
    assert!(queries.contains(&"/a[1]".to_string()));
    assert!(queries.iter().all(|q| !q.contains('\\')));
}

// ============================================================================
// Failing and Changing Stores
// ============================================================================

#[test]
fn test_vanished_child_is_ignored() {
    let shared = SharedStore(Rc::new(RefCell::new(sample_store())));
    let mut c = Controller::new(shared.clone(), BrowserConfig::default()).unwrap();

    shared.0.borrow_mut().remove(&NodePath::parse("/a").unwrap());
    c.activate_selection();

    assert_eq!(c.current_header(), "Path: /");
    assert!(c.current_path().is_root());
    assert_eq!(c.current_listing(), vec!["a", "b"]);
}

#[test]
fn test_vanished_parent_keeps_position() {
    let shared = SharedStore(Rc::new(RefCell::new(sample_store())));
    let mut c = Controller::new(shared.clone(), BrowserConfig::default()).unwrap();
    c.set_highlighted(1);
    c.activate_selection();
    c.activate_selection();
    assert_eq!(c.current_path().as_str(), "/b/c");

    shared.0.borrow_mut().remove(&NodePath::parse("/b").unwrap());
    c.go_back();

    assert_eq!(c.current_path().as_str(), "/b/c");
    assert_eq!(c.current_header(), "Path: /b/c");
    assert_eq!(c.current_listing(), vec!["deep"]);
}

#[test]
fn test_read_failure_leaves_listing() {
    let mut c = Controller::new(UnreadableStore(sample_store()), BrowserConfig::default()).unwrap();
    c.activate_selection();
    c.activate_selection();
    assert!(!c.is_viewing_dataset());
    assert_eq!(c.current_header(), "Path: /a");
    assert!(c.current_content().is_none());
}

#[test]
fn test_unsupported_element_type_is_skipped() {
    /// Rejects `/a/x` the way the HDF5 store rejects string datasets.
    struct TextDataset(MemoryStore);
    impl HierarchicalStore for TextDataset {
        fn children(&self, path: &NodePath) -> StoreResult<Vec<String>> {
            self.0.children(path)
        }
        fn kind(&self, path: &NodePath) -> StoreResult<NodeKind> {
            self.0.kind(path)
        }
        fn read(&self, path: &NodePath) -> StoreResult<ArrayValues> {
            if path.as_str() == "/a/x" {
                return Err(StoreError::backend(format!(
                    "{path}: unsupported element type VarLenUnicode"
                )));
            }
            self.0.read(path)
        }
    }

    let mut c = Controller::new(TextDataset(sample_store()), BrowserConfig::default()).unwrap();
    c.activate_selection();
    c.activate_selection();
    assert!(!c.is_viewing_dataset());
    assert_eq!(c.current_header(), "Path: /a");
    assert_eq!(c.highlighted(), 0);

    c.select_next();
    c.activate_selection();
    assert!(c.is_viewing_dataset());
    assert_eq!(c.current_header(), "Path: /a\nDataset: y (5000,)");
}

#[test]
fn test_shrunk_parent_clamps_highlight() {
    let shared = SharedStore(Rc::new(RefCell::new(sample_store())));
    let mut c = Controller::new(shared.clone(), BrowserConfig::default()).unwrap();
    c.set_highlighted(1);
    c.activate_selection();

    shared.0.borrow_mut().remove(&NodePath::parse("/a").unwrap());
    c.go_back();
    assert_eq!(c.current_listing(), vec!["b"]);
    assert_eq!(c.highlighted(), 0);
}

#[test]
fn test_unlistable_root_is_fatal() {
    struct Broken;
    impl HierarchicalStore for Broken {
        fn children(&self, _: &NodePath) -> StoreResult<Vec<String>> {
            Err(StoreError::backend("no file"))
        }
        fn kind(&self, _: &NodePath) -> StoreResult<NodeKind> {
            Err(StoreError::backend("no file"))
        }
        fn read(&self, _: &NodePath) -> StoreResult<ArrayValues> {
            Err(StoreError::backend("no file"))
        }
    }
    assert!(Controller::new(Broken, BrowserConfig::default()).is_err());
}
