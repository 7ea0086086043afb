//! Table rendering for parsed documents.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use ies_model::{CandelaScale, IesDocument, ModelError};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// One-row overview: file, tilt, entity counts and the candela range.
pub fn summary_table(document: &IesDocument) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Tilt"),
        header_cell("Keywords"),
        header_cell("Fields"),
        header_cell("Vertical"),
        header_cell("Horizontal"),
        header_cell("Candela values"),
        header_cell("Peak cd"),
    ]);
    apply_table_style(&mut table);
    for index in 2..8 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let peak = document
        .iter_candela()
        .map(|(_, _, candela)| candela.value)
        .fold(None, |peak: Option<f64>, value| {
            Some(peak.map_or(value, |peak| peak.max(value)))
        });
    table.add_row(vec![
        Cell::new(document.filename.as_deref().unwrap_or("-")),
        Cell::new(
            document
                .tilt
                .as_ref()
                .map_or_else(|| "-".to_string(), |tilt| tilt.directive().to_string()),
        ),
        Cell::new(document.keyword_count()),
        Cell::new(document.field_count()),
        Cell::new(document.vertical_angles().len()),
        Cell::new(document.horizontal_angles().len()),
        Cell::new(document.candela_count()),
        Cell::new(peak.map_or_else(|| "-".to_string(), |peak| peak.to_string())),
    ]);
    table
}

pub fn keywords_table(document: &IesDocument) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Keyword"), header_cell("Value")]);
    apply_table_style(&mut table);
    for keyword in document.keywords() {
        table.add_row(vec![
            Cell::new(&keyword.name).fg(Color::Blue),
            Cell::new(&keyword.value),
        ]);
    }
    table
}

pub fn fields_table(document: &IesDocument) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for field in document.fields() {
        table.add_row(vec![
            Cell::new(&field.name).fg(Color::Blue),
            Cell::new(field.value),
        ]);
    }
    table
}

/// Candela grid with one row per vertical angle and one column per
/// horizontal angle.
///
/// With a `scale`, cells hold computed values (multiplier and ballast factor
/// applied) instead of raw samples. Missing cells render as `-`.
pub fn candela_table(
    document: &IesDocument,
    scale: Option<CandelaScale>,
) -> Result<Table, ModelError> {
    let factor = match scale {
        Some(scale) => scale.factor(document)?,
        None => 1.0,
    };
    let horizontal = document.horizontal_angles();

    let mut table = Table::new();
    let mut header = vec![header_cell("V \\ H")];
    header.extend(horizontal.iter().map(|h| header_cell(&h.to_string())));
    table.set_header(header);
    apply_table_style(&mut table);
    for index in 0..=horizontal.len() {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for vertical in document.vertical_angles() {
        let mut row = vec![
            Cell::new(vertical)
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
        ];
        row.extend(horizontal.iter().map(|h| {
            match document.candela_at(vertical, *h) {
                Some(candela) => Cell::new(candela.value * factor),
                None => Cell::new("-").fg(Color::DarkGrey),
            }
        }));
        table.add_row(row);
    }
    Ok(table)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
