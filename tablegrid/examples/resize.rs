use std::fs::File;

use simplelog::{Config, LevelFilter, WriteLogger};
use tablegrid::{
    DelegateOptions, KeyboardDelegate, NavDirection, NodeSpec, TableCollection, TableColumnLayout,
    TableColumnResizeState, TableKeyboardDelegate, TableOptions,
};

fn row(key: &str, name: &str, kind: &str, level: &str) -> NodeSpec {
    NodeSpec::item(key)
        .child(NodeSpec::cell(format!("{key}-name")).text(name))
        .child(NodeSpec::cell(format!("{key}-type")).text(kind))
        .child(NodeSpec::cell(format!("{key}-level")).text(level))
}

fn print_widths(state: &mut TableColumnResizeState<'_>) {
    let keys: Vec<_> = state.collection().column_keys().cloned().collect();
    let widths: Vec<String> = keys
        .iter()
        .map(|key| format!("{key}={}", state.column_width(key)))
        .collect();
    println!("  {} ({}px)", widths.join(", "), state.table_width());
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up file logging
    let log_file = File::create("tablegrid.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let table = TableCollection::new(
        vec![
            NodeSpec::column("info")
                .text("Pokemon")
                .child(NodeSpec::column("name").text("Name").row_header().min_width(100))
                .child(NodeSpec::column("type").text("Type").default_width("2fr")),
            NodeSpec::column("level").text("Level").width(80),
            NodeSpec::body("body")
                .child(row("row-1", "Pikachu", "Electric", "25"))
                .child(row("row-2", "Squirtle", "Water", "12"))
                .child(row("row-3", "Charmander", "Fire", "9")),
        ],
        TableOptions {
            show_selection_checkboxes: true,
            ..TableOptions::default()
        },
    )?;

    println!("Header rows:");
    for header_row in table.header_rows() {
        let cells: Vec<String> = header_row.child_keys.iter().map(ToString::to_string).collect();
        println!("  {}: {}", header_row.key, cells.join(" | "));
    }

    let mut state = TableColumnResizeState::new(&table, 800.0, TableColumnLayout::default());
    println!("Widths:");
    print_widths(&mut state);

    state.start_resize("name");
    state.update_resized_columns("name", 240.0);
    state.end_resize();
    println!("After resizing 'name' to 240:");
    print_widths(&mut state);

    state.set_table_width(640.0);
    println!("After shrinking the table:");
    print_widths(&mut state);

    let nav = TableKeyboardDelegate::new(&table, DelegateOptions::default());
    let moves = [
        NavDirection::Down,
        NavDirection::Down,
        NavDirection::Right,
        NavDirection::Down,
        NavDirection::Up,
        NavDirection::Up,
    ];
    let mut focus = table
        .column(1)
        .map(|column| column.key.clone())
        .ok_or("table has no data columns")?;
    println!("Navigation from '{focus}':");
    for direction in moves {
        match nav.key_in_direction(direction, &focus) {
            Some(next) => {
                println!("  {direction:?} -> {next}");
                focus = next;
            }
            None => println!("  {direction:?} -> (stays on {focus})"),
        }
    }

    if let Some(found) = nav.key_for_search("sq", Some(focus.as_str())) {
        println!("Search 'sq' -> {found}");
    }

    Ok(())
}
