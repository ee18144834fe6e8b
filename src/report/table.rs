use super::style::Palette;
use crate::volume::{VolumeRecord, VolumeReport};
use comfy_table::{Cell, CellAlignment, Color, Table};

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

const HEADER: [&str; 7] =
    ["Volume", "Type", "Total (GB)", "Free (GB)", "Used (GB)", "Usage %", "Note"];

/// Convert bytes to binary gigabytes for display.
fn to_gb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GB
}

/// Build the report table. Unavailable volumes keep their row with zeroed
/// numbers and a note.
pub(crate) fn build_table(report: &VolumeReport, palette: Palette, warn_percent: f64) -> Table {
    let mut table = Table::new();
    if palette.enabled() {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }

    table.set_header(HEADER);
    for record in report.iter() {
        table.add_row(row(record, palette, warn_percent));
    }

    for index in 2..=5 {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    table
}

fn row(record: &VolumeRecord, palette: Palette, warn_percent: f64) -> Vec<Cell> {
    let (note, color) = if record.capacity_unavailable() {
        ("capacity unavailable", Some(Color::DarkGrey))
    } else if record.total_bytes() > 0 && record.used_percentage() >= warn_percent {
        ("nearly full", Some(Color::Red))
    } else {
        ("", None)
    };

    let cells = vec![
        Cell::new(record.id.as_str()),
        Cell::new(record.volume_type.label()),
        Cell::new(format!("{:.2}", to_gb(record.total_bytes()))),
        Cell::new(format!("{:.2}", to_gb(record.free_bytes()))),
        Cell::new(format!("{:.2}", to_gb(record.used_bytes()))),
        Cell::new(format!("{:.2}", record.used_percentage())),
        Cell::new(note),
    ];

    match color.filter(|_| palette.enabled()) {
        Some(color) => cells.into_iter().map(|cell| cell.fg(color)).collect(),
        None => cells,
    }
}
