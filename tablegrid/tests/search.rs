use std::cmp::Ordering;

use tablegrid::{
    Collator, DelegateOptions, FocusMode, GridCollection, GridKeyboardDelegate, Key,
    KeyboardDelegate, NodeSpec, TableCollection, TableKeyboardDelegate, TableOptions,
};

fn row(key: &str, cells: &[(&str, &str)]) -> NodeSpec {
    NodeSpec::item(key).children(
        cells
            .iter()
            .map(|(column, text)| NodeSpec::cell(format!("{key}-{column}")).text(*text)),
    )
}

fn table(rows: Vec<NodeSpec>) -> TableCollection {
    TableCollection::new(
        vec![
            NodeSpec::column("name").text("Name").row_header(),
            NodeSpec::column("type").text("Type"),
            NodeSpec::body("body").children(rows),
        ],
        TableOptions::default(),
    )
    .unwrap()
}

fn pokemon() -> TableCollection {
    table(vec![
        row("row-1", &[("name", "Pikachu"), ("type", "Electric")]),
        row("row-2", &[("name", "Squirtle"), ("type", "Water")]),
        row("row-3", &[("name", "Charmander"), ("type", "Fire")]),
    ])
}

fn key(key: &str) -> Option<Key> {
    Some(Key::from(key))
}

/// Exact, case-sensitive comparison.
#[derive(Debug)]
struct ExactCollator;

impl Collator for ExactCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.cmp(b)
    }
}

// ============================================================================
// Table Search
// ============================================================================

#[test]
fn test_search_matches_row_header_text() {
    let table = pokemon();
    let nav = TableKeyboardDelegate::new(&table, DelegateOptions::default());

    assert_eq!(nav.key_for_search("pi", None), key("row-1"));
    assert_eq!(nav.key_for_search("Char", None), key("row-3"));
}

#[test]
fn test_search_from_cell_returns_cell() {
    let table = pokemon();
    let nav = TableKeyboardDelegate::new(&table, DelegateOptions::default());

    assert_eq!(nav.key_for_search("sq", Some("row-1-type")), key("row-2-name"));
}

#[test]
fn test_search_starts_at_current_row() {
    let table = pokemon();
    let nav = TableKeyboardDelegate::new(&table, DelegateOptions::default());

    assert_eq!(nav.key_for_search("pi", Some("row-1")), key("row-1"));
    assert_eq!(nav.key_for_search("sq", Some("row-2-name")), key("row-2-name"));
}

#[test]
fn test_search_from_column_starts_at_first_row() {
    let table = pokemon();
    let nav = TableKeyboardDelegate::new(&table, DelegateOptions::default());

    assert_eq!(nav.key_for_search("na", Some("name")), None);
    assert_eq!(nav.key_for_search("ty", Some("type")), None);
    assert_eq!(nav.key_for_search("sq", Some("name")), key("row-2"));
    assert_eq!(nav.key_for_search("pi", Some("type")), key("row-1"));
}

#[test]
fn test_search_wraps_around() {
    let table = pokemon();
    let nav = TableKeyboardDelegate::new(&table, DelegateOptions::default());

    assert_eq!(nav.key_for_search("pi", Some("row-2")), key("row-1"));
    assert_eq!(nav.key_for_search("pi", Some("row-3-type")), key("row-1-name"));
}

#[test]
fn test_search_without_match() {
    let table = pokemon();
    let nav = TableKeyboardDelegate::new(&table, DelegateOptions::default());

    assert_eq!(nav.key_for_search("zz", None), None);
    assert_eq!(nav.key_for_search("zz", Some("row-2")), None);
}

#[test]
fn test_search_ignores_non_row_header_columns() {
    let table = pokemon();
    let nav = TableKeyboardDelegate::new(&table, DelegateOptions::default());

    assert_eq!(nav.key_for_search("water", None), None);
}

#[test]
fn test_search_ignores_case_and_accents() {
    let table = table(vec![
        row("row-1", &[("name", "Pikachu"), ("type", "Electric")]),
        row("row-2", &[("name", "Flabébé"), ("type", "Fairy")]),
    ]);
    let nav = TableKeyboardDelegate::new(&table, DelegateOptions::default());

    assert_eq!(nav.key_for_search("PI", None), key("row-1"));
    assert_eq!(nav.key_for_search("flabe", None), key("row-2"));
}

#[test]
fn test_row_text_is_matched_before_cells() {
    let table = table(vec![
        row("row-1", &[("name", "Pikachu"), ("type", "Electric")]),
        row("row-2", &[("name", "Squirtle"), ("type", "Water")]).text("Blastoise"),
    ]);
    let nav = TableKeyboardDelegate::new(&table, DelegateOptions::default());

    assert_eq!(nav.key_for_search("bl", None), key("row-2"));
    assert_eq!(nav.key_for_search("bl", Some("row-1-name")), key("row-2"));
}

#[test]
fn test_search_is_disabled_without_collator() {
    let table = pokemon();
    let nav = TableKeyboardDelegate::new(&table, DelegateOptions::default().without_collator());

    assert_eq!(nav.key_for_search("pi", None), None);
}

#[test]
fn test_search_uses_custom_collator() {
    let table = pokemon();
    let nav = TableKeyboardDelegate::new(&table, DelegateOptions::default().collator(ExactCollator));

    assert_eq!(nav.key_for_search("pi", None), None);
    assert_eq!(nav.key_for_search("Pi", None), key("row-1"));
}

#[test]
fn test_search_skips_disabled_rows_when_moving_on() {
    let table = pokemon();
    let options = DelegateOptions::default().disabled_keys(["row-2"]);
    let nav = TableKeyboardDelegate::new(&table, options);

    assert_eq!(nav.key_for_search("sq", None), None);
}

// ============================================================================
// Grid Search
// ============================================================================

fn grid() -> GridCollection {
    GridCollection::new(
        vec![
            row("a", &[("x", "1"), ("y", "2")]).text("Alpha"),
            row("b", &[("x", "3"), ("y", "4")]).text("Beta"),
        ],
        2,
    )
    .unwrap()
}

#[test]
fn test_grid_search_matches_row_text() {
    let grid = grid();
    let nav = GridKeyboardDelegate::new(&grid, DelegateOptions::default());

    assert_eq!(nav.key_for_search("be", None), key("b"));
    assert_eq!(nav.key_for_search("al", Some("b")), key("a"));
}

#[test]
fn test_grid_search_focuses_first_cell_in_cell_mode() {
    let grid = grid();
    let options = DelegateOptions::default().focus_mode(FocusMode::Cell);
    let nav = GridKeyboardDelegate::new(&grid, options);

    assert_eq!(nav.key_for_search("be", None), key("b-x"));
    assert_eq!(nav.key_for_search("al", Some("b-y")), key("a-x"));
}
