pub(crate) mod style;
pub(crate) mod table;

use style::{styled_line, Palette};
use table::build_table;

use crate::config::{AppConfig, OutputFormat};
use crate::volume::VolumeReport;
use anyhow::{Context, Result};
use std::io::Write;

/// Render a report in the configured format.
pub(crate) fn write_report<W: Write>(
    out: &mut W,
    report: &VolumeReport,
    config: &AppConfig,
) -> Result<()> {
    match config.output {
        OutputFormat::Json => write_json(out, report),
        OutputFormat::Table => {
            write_table(out, report, Palette::resolve(config.color), config.warn_percent)
        }
    }
}

pub(crate) fn write_json<W: Write>(out: &mut W, report: &VolumeReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report).context("Failed to serialize report")?;
    writeln!(out)?;
    Ok(())
}

pub(crate) fn write_table<W: Write>(
    out: &mut W,
    report: &VolumeReport,
    palette: Palette,
    warn_percent: f64,
) -> Result<()> {
    styled_line(out, palette.title(), "Storage volumes")?;

    if report.is_empty() {
        writeln!(out, "No volumes found")?;
    } else {
        writeln!(out, "{}", build_table(report, palette, warn_percent))?;
        styled_line(
            out,
            palette.muted(),
            &format!(
                "{} volume(s), {} without capacity data",
                report.len(),
                report.unavailable_count()
            ),
        )?;
    }

    if report.interrupted {
        styled_line(out, palette.warning(), "Interrupted: not every volume was inspected")?;
    }

    Ok(())
}
