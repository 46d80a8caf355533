use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use fieldmap_cli::script::{ClickStep, describe_outcome};
use fieldmap_map::ClickOutcome;
use fieldmap_model::{Mapping, SchemaSide};

use crate::types::{CompareReport, InspectReport, MapReport, MergeReport};

pub fn print_inspect(report: &InspectReport) {
    let schema = &report.schema;
    println!("File: {}", report.path.display());

    let mut tables = Table::new();
    tables.set_header(vec![
        header_cell("Table"),
        header_cell("Records"),
        header_cell("Fields"),
    ]);
    apply_table_style(&mut tables);
    align_column(&mut tables, 1, CellAlignment::Right);
    align_column(&mut tables, 2, CellAlignment::Right);
    for table in schema.tables().iter() {
        let name = if table.name == schema.active_table() {
            Cell::new(format!("{} *", table.name))
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(&table.name)
        };
        tables.add_row(vec![
            name,
            Cell::new(table.records.len()),
            Cell::new(table.field_names().len()),
        ]);
    }
    println!("{tables}");

    print_preview(schema, report.rows);
}

fn print_preview(schema: &SchemaSide, rows: usize) {
    if schema.fields().is_empty() {
        println!("Table '{}' has no fields.", schema.active_table());
        return;
    }
    let total = schema.records().len();
    let shown = total.min(rows);
    println!(
        "Preview of '{}' ({shown} of {total} records):",
        schema.active_table()
    );
    let mut table = Table::new();
    table.set_header(schema.fields().iter().map(|f| header_cell(f)));
    apply_table_style(&mut table);
    for row in schema.preview(rows) {
        table.add_row(row);
    }
    println!("{table}");
}

pub fn print_comparison(report: &CompareReport) {
    let comparison = &report.comparison;
    println!(
        "Existing: table '{}' ({} fields)",
        report.existing.active_table(),
        report.existing.fields().len()
    );
    println!(
        "New: table '{}' ({} fields)",
        report.new.active_table(),
        report.new.fields().len()
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Existing"),
        header_cell("New"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Center);
    for field in &comparison.shared {
        table.add_row(vec![Cell::new(field), yes_cell(), yes_cell()]);
    }
    for field in &comparison.only_existing {
        table.add_row(vec![
            Cell::new(field).fg(Color::Yellow),
            yes_cell(),
            dim_cell("-"),
        ]);
    }
    for field in &comparison.only_new {
        table.add_row(vec![
            Cell::new(field).fg(Color::Yellow),
            dim_cell("-"),
            yes_cell(),
        ]);
    }
    println!("{table}");

    if comparison.is_identical() {
        println!("Schemas match.");
    } else {
        println!(
            "{} only in existing, {} only in new, {} shared.",
            comparison.only_existing.len(),
            comparison.only_new.len(),
            comparison.shared.len()
        );
    }
}

pub fn print_map(report: &MapReport) {
    print_steps(&report.steps);
    print_mappings(&report.document.mappings);
    println!(
        "Exported {} mapping(s) to {}",
        report.document.mappings.len(),
        report.export_path.display()
    );
}

pub fn print_merge(report: &MergeReport) {
    print_steps(&report.steps);
    print_mappings(&report.mappings);
    if !report.matching_fields.is_empty() {
        println!("Matching fields: {}", report.matching_fields.join(", "));
    }
    println!("Submitted {} record(s).", report.records);
    println!("{}", report.message);
}

fn print_steps(steps: &[ClickStep]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Click"),
        header_cell("Result"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, step) in steps.iter().enumerate() {
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(&step.click),
            outcome_cell(&step.outcome),
        ]);
    }
    println!("{table}");
}

fn print_mappings(mappings: &[Mapping]) {
    if mappings.is_empty() {
        println!("No field mappings.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Existing"),
        header_cell("New"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, mapping) in mappings.iter().enumerate() {
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(&mapping.existing),
            Cell::new(&mapping.new),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn outcome_cell(outcome: &ClickOutcome) -> Cell {
    let color = match outcome {
        ClickOutcome::Mapped { .. } => Color::Green,
        ClickOutcome::Removed { .. } => Color::Red,
        ClickOutcome::Armed(_) => Color::Blue,
        ClickOutcome::AlreadyMapped(_) | ClickOutcome::Discarded(_) => Color::DarkGrey,
    };
    Cell::new(describe_outcome(outcome)).fg(color)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn yes_cell() -> Cell {
    Cell::new("yes").fg(Color::Green)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
