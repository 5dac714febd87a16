use tablegrid::{
    ColumnProps, ColumnSize, DelegateOptions, Direction, DisabledBehavior, FocusMode, GridRegistry,
    LayoutConfig, NavigationConfig, RegistryError, TableOptions,
};

// ============================================================================
// Column Sizes
// ============================================================================

#[test]
fn test_column_size_from_json() {
    let sizes: Vec<ColumnSize> = serde_json::from_str(r#"[120, 40.5, "25%", "2fr"]"#).unwrap();

    assert_eq!(sizes, vec![
        ColumnSize::Px(120.0),
        ColumnSize::Px(40.5),
        ColumnSize::Percent(25.0),
        ColumnSize::Fr(2.0),
    ]);
}

#[test]
fn test_column_size_rejects_unsupported_text() {
    assert!(serde_json::from_str::<ColumnSize>(r#""wide""#).is_err());
    assert!(serde_json::from_str::<ColumnSize>(r#""12.5%""#).is_err());
    assert!(serde_json::from_str::<ColumnSize>(r#""120""#).is_err());
    assert!(serde_json::from_str::<ColumnSize>("true").is_err());
}

#[test]
fn test_column_size_to_json() {
    let json = serde_json::to_string(&vec![
        ColumnSize::Px(150.0),
        ColumnSize::Percent(50.0),
        ColumnSize::Fr(1.5),
    ])
    .unwrap();

    assert_eq!(json, r#"[150.0,"50%","1.5fr"]"#);
}

#[test]
fn test_column_props_from_json() {
    let props: ColumnProps = serde_json::from_str(
        r#"{"isRowHeader": true, "width": 200, "minWidth": "10%", "defaultWidth": "3fr"}"#,
    )
    .unwrap();

    assert!(props.is_row_header);
    assert!(!props.allows_sorting);
    assert!(!props.is_marker());
    assert_eq!(props.sizing.width, Some(ColumnSize::Px(200.0)));
    assert_eq!(props.sizing.min_width, Some(ColumnSize::Percent(10.0)));
    assert_eq!(props.sizing.default_width, Some(ColumnSize::Fr(3.0)));
    assert_eq!(props.sizing.max_width, None);
}

// ============================================================================
// Layout and Table Options
// ============================================================================

#[test]
fn test_layout_config_defaults() {
    let config: LayoutConfig = serde_json::from_str("{}").unwrap();

    assert_eq!(config, LayoutConfig::default());
    assert_eq!(config.default_width, ColumnSize::Fr(1.0));
    assert_eq!(config.default_min_width, ColumnSize::Px(75.0));
}

#[test]
fn test_layout_config_overrides() {
    let config: LayoutConfig =
        serde_json::from_str(r#"{"defaultWidth": 100, "defaultMinWidth": "5%"}"#).unwrap();

    assert_eq!(config.default_width, ColumnSize::Px(100.0));
    assert_eq!(config.default_min_width, ColumnSize::Percent(5.0));
}

#[test]
fn test_table_options_from_json() {
    let options: TableOptions = serde_json::from_str(r#"{"showSelectionCheckboxes": true}"#).unwrap();

    assert!(options.show_selection_checkboxes);
    assert!(!options.show_drag_buttons);
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn test_navigation_config_from_json() {
    let config: NavigationConfig = serde_json::from_str(
        r#"{"direction": "rtl", "focusMode": "cell", "disabledKeys": ["row-2"], "pageSize": 5}"#,
    )
    .unwrap();

    assert_eq!(config.direction, Direction::Rtl);
    assert_eq!(config.focus_mode, FocusMode::Cell);
    assert_eq!(config.disabled_behavior, DisabledBehavior::All);
    assert_eq!(config.page_size, 5);

    let options = DelegateOptions::from(config);
    assert!(options.disabled_keys.contains("row-2"));
    assert!(options.collator.is_some());
    assert_eq!(options.page_size, 5);
}

#[test]
fn test_navigation_config_defaults() {
    let config: NavigationConfig = serde_json::from_str("{}").unwrap();

    assert_eq!(config, NavigationConfig::default());
    assert_eq!(config.direction, Direction::Ltr);
    assert_eq!(config.focus_mode, FocusMode::Row);
    assert_eq!(config.page_size, 10);
}

#[test]
fn test_navigation_config_rejects_unknown_direction() {
    assert!(serde_json::from_str::<NavigationConfig>(r#"{"direction": "up"}"#).is_err());
}

// ============================================================================
// Grid Registry
// ============================================================================

#[test]
fn test_registry_derives_element_ids() {
    let mut registry = GridRegistry::new();
    let grid = registry.register("pokedex");

    assert_eq!(registry.grid_id(grid).unwrap(), "pokedex");
    assert_eq!(registry.column_header_id(grid, "name").unwrap(), "pokedex-name");
    assert_eq!(
        registry.cell_id(grid, "row 1", "first name").unwrap(),
        "pokedex-row1-firstname"
    );
}

#[test]
fn test_registry_generated_ids_are_unique() {
    let mut registry = GridRegistry::new();
    let first = registry.register_generated();
    let second = registry.register_generated();

    assert_ne!(first, second);
    assert_eq!(registry.grid_id(first).unwrap(), first.to_string());
    assert!(first.to_string().starts_with("__grid_"));
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_registry_unregister() {
    let mut registry = GridRegistry::new();
    let grid = registry.register("pokedex");

    let meta = registry.unregister(grid).unwrap();

    assert_eq!(meta.id, "pokedex");
    assert!(registry.is_empty());
    assert!(!registry.contains(grid));
    assert_eq!(
        registry.cell_id(grid, "row-1", "name"),
        Err(RegistryError::unknown_grid(grid))
    );
    assert!(matches!(
        registry.unregister(grid),
        Err(RegistryError::UnknownGrid { .. })
    ));
}
