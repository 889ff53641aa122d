use proptest::prelude::*;
use std::collections::HashSet;
use std::fs;
use tempfile::TempDir;
use tray_clip::app::Controller;
use tray_clip::clipboard::ClipboardSink;
use tray_clip::entry::{Entry, EntryStore};
use tray_clip::menu::project;
use tray_clip::storage::{SaveMode, load_entries, save_entries};

struct NullClipboard;

impl ClipboardSink for NullClipboard {
    fn set_text(&mut self, _text: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    Remove(usize),
    Select(usize),
    Edit(usize, String),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    // Few distinct titles so duplicates are common.
    let title = prop_oneof![
        Just(String::new()),
        Just("  ".to_string()),
        "[a-d]{1,2}",
    ];
    prop_oneof![
        title.prop_map(Op::Add),
        (0usize..8).prop_map(Op::Remove),
        (0usize..8).prop_map(Op::Select),
        ((0usize..8), "[a-z ]{0,6}").prop_map(|(i, c)| Op::Edit(i, c)),
    ]
}

fn titles(controller: &Controller) -> Vec<String> {
    controller.entries().iter().map(|e| e.title.clone()).collect()
}

proptest! {
    #[test]
    fn titles_stay_unique_and_selection_never_dangles(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut controller = Controller::new(EntryStore::new(), Box::new(NullClipboard));

        for op in ops {
            let before = controller.entries().len();
            match op {
                Op::Add(title) => {
                    let existed = controller.store().contains_title(&title);
                    let added = controller.add_entry(&title).is_some();
                    let expect_added = !title.trim().is_empty() && !existed;
                    prop_assert_eq!(added, expect_added);
                    prop_assert_eq!(controller.entries().len(), before + usize::from(added));
                }
                Op::Remove(i) => {
                    if let Some(id) = controller.entries().get(i).map(|e| e.id) {
                        controller.remove_entry(id);
                        prop_assert!(controller.store().get(id).is_none());
                        prop_assert_ne!(controller.selected(), Some(id));
                    }
                }
                Op::Select(i) => {
                    if let Some(id) = controller.entries().get(i).map(|e| e.id) {
                        controller.select_entry(id);
                        prop_assert_eq!(controller.selected(), Some(id));
                    }
                }
                Op::Edit(i, content) => {
                    if let Some(id) = controller.entries().get(i).map(|e| e.id) {
                        controller.edit_content(id, content.clone());
                        prop_assert_eq!(&controller.store().get(id).unwrap().content, &content);
                    }
                }
            }

            let all = titles(&controller);
            let unique: HashSet<&String> = all.iter().collect();
            prop_assert_eq!(unique.len(), all.len());

            if let Some(selected) = controller.selected() {
                prop_assert!(controller.store().get(selected).is_some());
            }
        }
    }

    #[test]
    fn projection_is_stable_without_structural_change(names in prop::collection::hash_set("[a-z]{1,8}", 0..10)) {
        let entries: Vec<Entry> = names.into_iter().map(Entry::new).collect();
        let first = project(&entries);
        prop_assert_eq!(&first, &project(&entries));
        prop_assert_eq!(first.len(), entries.len());
        for (item, entry) in first.iter().zip(&entries) {
            prop_assert_eq!(&item.label, &entry.title);
            prop_assert_eq!(&item.activation_key, &entry.title);
        }
    }

    #[test]
    fn save_then_load_preserves_the_set(records in prop::collection::hash_map("[a-zA-Z0-9 ]{1,10}", ".{0,20}", 0..12)) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("entries.json");

        let store = EntryStore::from_records(records.clone()).unwrap();
        save_entries(&path, &store.snapshot(), SaveMode::Atomic).unwrap();

        let loaded: HashSet<(String, String)> = load_entries(&path).unwrap().into_iter().collect();
        let expected: HashSet<(String, String)> = records.into_iter().collect();
        prop_assert_eq!(loaded, expected);
    }
}

#[test]
fn corrupt_file_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("entries.json");

    let store = EntryStore::from_records(vec![("todo".to_string(), "buy milk".to_string())]).unwrap();
    save_entries(&path, &store.snapshot(), SaveMode::Atomic).unwrap();
    fs::write(&path, "7").unwrap();

    let err = load_entries(&path).unwrap_err();
    assert!(err.is_corrupt());
}
