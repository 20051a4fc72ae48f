//! A row abstraction persisting only changed columns.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Mutex;

use tracked_map::TrackedMap;

/// Builds the `SET` clause of an update from the dirty columns.
fn update_clause(row: &mut TrackedMap<String, Rc<str>>) -> Vec<String> {
    let mut columns: Vec<_> = row
        .take_dirty_slice()
        .into_iter()
        .map(|(column, value)| format!("{column} = '{value}'"))
        .collect();
    columns.sort();
    columns
}

fn loaded_row() -> TrackedMap<String, Rc<str>> {
    [("name", "ada"), ("lang", "en")]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), Rc::from(v)))
        .collect()
}

#[test]
fn only_changed_columns_are_written() {
    let mut row = loaded_row();
    let name = Rc::clone(&row["name"]);
    row.set("name".to_owned(), name);
    row.set("lang".to_owned(), Rc::from("fr"));

    assert_eq!(update_clause(&mut row), vec!["lang = 'fr'".to_owned()]);
    assert!(update_clause(&mut row).is_empty(), "taking the slice resets");
}

#[test]
fn equal_text_in_new_allocation_is_written() {
    let mut row = loaded_row();
    row.set("name".to_owned(), Rc::from("ada"));
    assert_eq!(update_clause(&mut row), vec!["name = 'ada'".to_owned()]);
}

#[test]
fn deleted_column_is_visible_in_entries() {
    let mut row = loaded_row();
    row.remove("lang");
    let entries: HashMap<_, _> = row
        .dirty_entries()
        .map(|(k, v)| (k.clone(), v.is_some()))
        .collect();
    assert_eq!(entries, HashMap::from([("lang".to_owned(), false)]));
}

#[test]
fn shared_across_threads_behind_mutex() {
    let map = Mutex::new(TrackedMap::<u32, u32>::new());
    std::thread::scope(|s| {
        for i in 0..4 {
            let map = &map;
            s.spawn(move || {
                map.lock().expect("lock").set(i, i * 10);
            });
        }
    });
    let map = map.into_inner().expect("lock");
    assert_eq!(map.dirty_len(), 4);
    assert_eq!(map.get(&3), Some(&30));
}
