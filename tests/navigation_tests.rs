mod common;

use astrum::config::{AstrumConfig, Bookmark};
use astrum::core::{ListingChanged, ListingListener};
use astrum::file::{DirectoryReader, NO_ACCESS_LABEL};
use astrum::filter::FilterQuery;
use astrum::FileManager;
use common::{manager_at, populate_home};
use std::cell::RefCell;
use std::fs;
use std::rc::Rc;
use tempfile::tempdir;

#[test]
fn test_home_scenario_counts() {
    let temp_dir = tempdir().unwrap();
    populate_home(temp_dir.path());
    let mut manager = manager_at(temp_dir.path());

    assert_eq!(manager.item_count_label(false), "Items: 4");

    manager.set_filter(FilterQuery::name("doc"));
    assert_eq!(manager.entries().len(), 1);
    assert_eq!(manager.item_count_label(true), "Filtered: 1");
}

#[test]
fn test_listing_contains_direct_children_only() {
    let temp_dir = tempdir().unwrap();
    populate_home(temp_dir.path());
    fs::write(temp_dir.path().join("projects").join("nested.rs"), "").unwrap();
    let manager = manager_at(temp_dir.path());

    let listing = manager.listing(temp_dir.path()).expect("listing");
    assert_eq!(listing.len(), 4);
    for entry in &listing {
        assert_eq!(entry.path.parent(), Some(temp_dir.path()));
        assert!(entry.path.is_absolute());
        assert_ne!(entry.name, ".");
        assert_ne!(entry.name, "..");
    }
}

#[test]
fn test_listing_order_is_case_insensitive() {
    let temp_dir = tempdir().unwrap();
    for name in ["beta", "Alpha", "gamma", "Delta"] {
        fs::write(temp_dir.path().join(name), "").unwrap();
    }
    let manager = manager_at(temp_dir.path());

    let names: Vec<&str> = manager.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "beta", "Delta", "gamma"]);
}

#[test]
fn test_hidden_entries() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join(".profile"), "").unwrap();
    fs::write(temp_dir.path().join("visible"), "").unwrap();
    let mut manager = manager_at(temp_dir.path());

    assert_eq!(manager.item_count_label(false), "Items: 1");
    manager.set_show_hidden(true);
    assert_eq!(manager.item_count_label(false), "Items: 2");
}

#[test]
fn test_filtered_listing_does_not_move() {
    let temp_dir = tempdir().unwrap();
    populate_home(temp_dir.path());
    let projects = temp_dir.path().join("projects");
    let manager = manager_at(&projects);

    let filtered = manager
        .filtered_listing(temp_dir.path(), &FilterQuery::file_type("mp3"))
        .expect("filtered listing");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "song.mp3");
    assert_eq!(manager.current_path(), projects.as_path());

    let unfiltered = manager
        .filtered_listing(temp_dir.path(), &FilterQuery::name(""))
        .expect("empty filter");
    assert_eq!(unfiltered.len(), 4);
}

#[test]
fn test_missing_directory_listing_errors() {
    let temp_dir = tempdir().unwrap();
    let manager = manager_at(temp_dir.path());

    let result = manager.listing(&temp_dir.path().join("missing"));
    assert!(result.is_err());
}

#[test]
fn test_navigate_into_missing_directory_shows_marker() {
    let temp_dir = tempdir().unwrap();
    let mut manager = manager_at(temp_dir.path());
    let missing = temp_dir.path().join("missing");

    assert!(!manager.navigate_to(&missing));
    assert_eq!(manager.current_path(), missing.as_path());
    assert_eq!(manager.entries().len(), 1);
    assert_eq!(manager.entries()[0].name, NO_ACCESS_LABEL);
    assert_eq!(manager.item_count_label(false), "Items: 0");
    assert_eq!(manager.item_count_label(true), "Items: 0");

    // 親へ戻れば通常表示
    assert!(manager.go_up());
    assert_eq!(manager.current_path(), temp_dir.path());
}

#[test]
fn test_up_back_forward() {
    let temp_dir = tempdir().unwrap();
    populate_home(temp_dir.path());
    let projects = temp_dir.path().join("projects");
    let mut manager = manager_at(&projects);

    assert!(manager.go_back());
    assert_eq!(manager.current_path(), temp_dir.path());

    assert!(!manager.go_forward());
    assert_eq!(manager.current_path(), temp_dir.path());

    manager.navigate_to(&projects);
    assert!(manager.go_up());
    assert_eq!(manager.current_path(), temp_dir.path());
    assert_eq!(manager.history().get(0), Some(&projects));
}

#[test]
fn test_root_has_no_parent() {
    let mut manager = manager_at(std::path::Path::new("/"));
    assert!(!manager.go_up());
    assert!(!manager.go_back());
    assert_eq!(manager.current_path(), std::path::Path::new("/"));
}

#[test]
fn test_relative_navigation_is_normalized() {
    let temp_dir = tempdir().unwrap();
    populate_home(temp_dir.path());
    let mut manager = manager_at(temp_dir.path());

    manager.navigate_to(&temp_dir.path().join("projects").join(".."));
    assert_eq!(manager.current_path(), temp_dir.path());
}

#[test]
fn test_filter_survives_navigation_and_refresh() {
    let temp_dir = tempdir().unwrap();
    populate_home(temp_dir.path());
    let projects = temp_dir.path().join("projects");
    fs::write(projects.join("docs.md"), "").unwrap();
    fs::write(projects.join("main.rs"), "").unwrap();
    let mut manager = manager_at(temp_dir.path());

    manager.set_filter(FilterQuery::name("doc"));
    manager.navigate_to(&projects);
    assert_eq!(manager.entries().len(), 1);
    assert_eq!(manager.entries()[0].name, "docs.md");

    fs::write(projects.join("docker.yml"), "").unwrap();
    manager.refresh();
    assert_eq!(manager.item_count_label(true), "Filtered: 2");

    manager.clear_filter();
    assert_eq!(manager.item_count_label(false), "Items: 3");
}

struct CountingListener {
    events: Rc<RefCell<Vec<ListingChanged>>>,
}

impl ListingListener for CountingListener {
    fn on_listing_changed(&mut self, event: &ListingChanged) {
        self.events.borrow_mut().push(event.clone());
    }
}

#[test]
fn test_listener_follows_navigation() {
    let temp_dir = tempdir().unwrap();
    populate_home(temp_dir.path());
    let mut manager = manager_at(temp_dir.path());
    let events = Rc::new(RefCell::new(Vec::new()));
    let id = manager.add_listener(Box::new(CountingListener {
        events: events.clone(),
    }));

    manager.navigate_to(&temp_dir.path().join("projects"));
    manager.go_up();
    manager.refresh();

    {
        let events = events.borrow();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].total, 0);
        assert_eq!(events[1].path, temp_dir.path().to_path_buf());
        assert_eq!(events[2].total, 4);
        assert!(!events[2].filtered);
    }

    assert!(manager.remove_listener(id));
    manager.refresh();
    assert_eq!(events.borrow().len(), 3);
}

#[test]
fn test_manager_from_config() {
    let temp_dir = tempdir().unwrap();
    populate_home(temp_dir.path());
    fs::write(temp_dir.path().join(".hidden"), "").unwrap();
    let config = AstrumConfig {
        start_path: Some(temp_dir.path().to_path_buf()),
        show_hidden: true,
        bookmarks: vec![Bookmark::new("Projects", temp_dir.path().join("projects"))],
        log_level: None,
        log_file: None,
    };

    let mut manager = FileManager::new(&config);
    assert_eq!(manager.current_path(), temp_dir.path());
    assert_eq!(manager.item_count_label(false), "Items: 5");

    assert_eq!(manager.bookmarks().len(), 1);
    assert!(manager.open_bookmark(0).expect("bookmark"));
    assert_eq!(manager.current_path(), temp_dir.path().join("projects").as_path());
}

#[test]
fn test_reader_lists_hidden_when_enabled() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join(".env"), "").unwrap();

    let entries = DirectoryReader::with_hidden(true)
        .list(temp_dir.path())
        .expect("listing");
    assert_eq!(entries.len(), 1);
}
