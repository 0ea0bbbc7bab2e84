use carryover_sheet::{
    column_index_to_label, render, save_workbook, strip_marker, worksheet_names, Grid,
    HighlightStyle, Result, SheetError,
};
use tempfile::tempdir;

// ===== Grid Tests =====

#[test]
fn test_grid_a1_access() -> Result<()> {
    let grid = Grid::from_rows(
        "Status",
        vec![vec!["", "", "", "2024-01"], vec!["id1", "Ann", "ops", "open"]],
    );

    assert_eq!(grid.get_a1("D1")?, "2024-01");
    assert_eq!(grid.get_a1("b2")?, "Ann");
    assert!(matches!(
        grid.get_a1("E1"),
        Err(SheetError::IndexOutOfBounds { .. })
    ));
    assert!(matches!(
        grid.get_a1("1A"),
        Err(SheetError::InvalidCellNotation(_))
    ));

    Ok(())
}

// ===== Labels =====

#[test]
fn test_column_labels_are_bijective_base26() {
    let expected = [(1, "A"), (26, "Z"), (27, "AA"), (52, "AZ"), (702, "ZZ"), (703, "AAA")];
    for (n, label) in expected {
        assert_eq!(column_index_to_label(n), label);
    }
}

// ===== Write-back Tests =====

#[test]
fn test_render_contract() {
    let grid = Grid::from_rows(
        "Status",
        vec![
            vec!["", "", "", "2024-01", "new|"],
            vec!["id1", "Ann", "ops", "open", "open|"],
            vec!["id2", "Bob", "ops", "open", "|"],
        ],
    );

    let rendered = render(grid);

    for row in &rendered.values {
        for value in row {
            assert_eq!(strip_marker(value), value);
        }
    }
    let addresses: Vec<&str> = rendered.highlights.iter().map(|h| h.address.as_str()).collect();
    assert_eq!(addresses, vec!["E1", "E2", "E3"]);
    assert_eq!(rendered.values[2][4], "");
}

#[test]
fn test_csv_to_xlsx_and_back() -> Result<()> {
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("may.csv");
    std::fs::write(&csv_path, ",,,2024-05\nid1,Ann,ops,open|\nid2,Bob,ops,closed\n")?;

    let grid = Grid::from_csv(&csv_path)?;
    assert_eq!(grid.name(), "may");

    let xlsx_path = dir.path().join("out.xlsx");
    save_workbook(&xlsx_path, &[render(grid)], HighlightStyle::default())?;

    assert_eq!(worksheet_names(&xlsx_path)?, vec!["may"]);
    let loaded = Grid::from_xlsx_sheet(&xlsx_path, "may")?;
    assert_eq!(loaded.row_count(), 3);
    assert_eq!(loaded.get_a1("D2")?, "open");
    assert_eq!(loaded.get_a1("D3")?, "closed");

    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let err = Grid::from_csv("/nonexistent/may.csv").unwrap_err();
    assert!(matches!(err, SheetError::Io(_)));
}
