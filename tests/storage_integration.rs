use mdlive::storage::{PrefKey, Preferences, Store};

#[test]
fn test_session_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = Store::open(dir.path().to_path_buf());
        store.write_content("# My notes\n\nstill here");
        let mut prefs = Preferences::load(&store);
        prefs.toggle_sync_scroll(&store);
        prefs.toggle_dark(&store);
    }

    // A fresh adapter over the same directory sees everything.
    let store = Store::open(dir.path().to_path_buf());
    assert_eq!(
        store.read_content().as_deref(),
        Some("# My notes\n\nstill here")
    );
    let prefs = Preferences::load(&store);
    assert!(prefs.sync_scroll);
    assert!(prefs.dark);
    assert!(prefs.navbar_expanded, "untouched keys keep their defaults");
}

#[test]
fn test_storage_layout_one_file_per_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().to_path_buf());

    store.write_content("text");
    store.write_json(PrefKey::SyncScroll, &true);
    store.write_json(PrefKey::Theme, &false);
    store.write_json(PrefKey::NavbarExpanded, &true);

    assert!(dir.path().join("content").is_file());
    assert!(dir.path().join("syncScroll").is_file());
    assert!(dir.path().join("theme").is_file());
    assert!(dir.path().join("navbarExpanded").is_file());

    // Preferences are JSON on disk; content is the raw string.
    assert_eq!(
        std::fs::read_to_string(dir.path().join("syncScroll")).unwrap(),
        "true"
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join("content")).unwrap(),
        "text"
    );
}

#[test]
fn test_defaults_apply_before_anything_is_stored() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().to_path_buf());

    let prefs = Preferences::load(&store);
    assert_eq!(prefs, Preferences::default());
    assert_eq!(store.read_content(), None);

    // Loading never writes: a later hydration still finds nothing stored.
    assert!(!dir.path().join("syncScroll").exists());
    assert!(!dir.path().join("theme").exists());
}

#[test]
fn test_malformed_values_fall_back_without_clobbering_others() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("theme"), "{not valid json").unwrap();
    std::fs::write(dir.path().join("navbarExpanded"), "false").unwrap();

    let store = Store::open(dir.path().to_path_buf());
    let prefs = Preferences::load(&store);
    assert!(!prefs.dark, "malformed value falls back to the default");
    assert!(!prefs.navbar_expanded, "valid neighbors still load");
}

#[test]
fn test_unavailable_directory_is_swallowed() {
    // A file where the directory should be: creation fails, nothing panics.
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("occupied");
    std::fs::write(&blocker, "file, not a directory").unwrap();

    let store = Store::open(blocker.join("nested"));
    store.write_content("dropped");
    assert_eq!(store.read_content(), None);
    let prefs = Preferences::load(&store);
    assert_eq!(prefs, Preferences::default());
}

#[test]
fn test_clear_then_reload_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().to_path_buf());
    store.write_content("something");
    let mut prefs = Preferences::load(&store);
    prefs.toggle_dark(&store);

    store.clear();

    let fresh = Store::open(dir.path().to_path_buf());
    assert_eq!(fresh.read_content(), None);
    assert_eq!(Preferences::load(&fresh), Preferences::default());
}
