//! Terminal rendering of leaderboard views
//!
//! `TableRenderer` paints a coloured table with the statistics line above
//! it; `JsonRenderer` writes the same view as pretty-printed JSON for
//! scripting. Both write to any `io::Write` so output can be captured.

use crate::app::models::{LapRecord, RecordField};
use crate::app::services::view_controller::{LeaderboardView, Renderer};
use crate::constants::{PODIUM_SIZE, SENTINEL_TIME, markers, placeholders};
use crate::{Error, Result};
use colored::*;
use std::io::Write;

/// Column headers, in `RecordField::ALL` order
const HEADERS: [&str; 12] = [
    "#",
    "Car",
    "Track",
    "Layout",
    "Time",
    "Power",
    "Drivetrain",
    "Power type",
    "Start",
    "Control",
    "Mod",
    "Date",
];

/// Drivetrain colour classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrivetrainClass {
    FrontWheel,
    RearWheel,
    AllWheel,
}

impl DrivetrainClass {
    /// Classify a drivetrain description by substring; the first match wins
    pub fn classify(drivetrain: Option<&str>) -> Option<Self> {
        let drivetrain = drivetrain?;
        if drivetrain.contains(markers::FRONT_WHEEL_DRIVE) {
            Some(Self::FrontWheel)
        } else if drivetrain.contains(markers::REAR_WHEEL_DRIVE) {
            Some(Self::RearWheel)
        } else if drivetrain.contains(markers::ALL_WHEEL_DRIVE) {
            Some(Self::AllWheel)
        } else {
            None
        }
    }

    fn paint(self, text: &str) -> ColoredString {
        match self {
            Self::FrontWheel => text.bright_blue(),
            Self::RearWheel => text.bright_red(),
            Self::AllWheel => text.bright_green(),
        }
    }
}

pub fn power_type_icon(power_type: Option<&str>) -> &'static str {
    if power_type == Some(markers::ELECTRIC) {
        "⚡"
    } else {
        "⛽"
    }
}

pub fn start_type_icon(start_type: Option<&str>) -> &'static str {
    if start_type == Some(markers::STATIC_START) {
        "🛑"
    } else {
        "🚦"
    }
}

fn is_modified(record: &LapRecord) -> bool {
    record.mod_status.as_deref() == Some(markers::MODIFIED)
}

fn or_empty(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(placeholders::EMPTY)
}

/// Plain-text cells of one table row; `position` is 1-based
pub fn row_cells(position: usize, record: &LapRecord) -> Vec<String> {
    let power = match record.power {
        Some(hp) if hp != 0.0 && hp.is_finite() => format!("{} hp", hp),
        _ => placeholders::EMPTY.to_string(),
    };
    let time = match record.time_text() {
        "" => SENTINEL_TIME,
        text => text,
    };
    let mod_cell = if is_modified(record) {
        format!("✅ {}", markers::MODIFIED)
    } else {
        format!("❌ {}", markers::UNMODIFIED)
    };

    vec![
        position.to_string(),
        record
            .car
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(placeholders::CAR)
            .to_string(),
        record
            .track
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(placeholders::TRACK)
            .to_string(),
        or_empty(record.layout.as_deref()).to_string(),
        time.to_string(),
        power,
        or_empty(record.drivetrain.as_deref()).to_string(),
        format!(
            "{} {}",
            power_type_icon(record.power_type.as_deref()),
            or_empty(record.power_type.as_deref())
        ),
        format!(
            "{} {}",
            start_type_icon(record.start_type.as_deref()),
            or_empty(record.start_type.as_deref())
        ),
        or_empty(record.control_type.as_deref()).to_string(),
        mod_cell,
        or_empty(record.date.as_deref()).to_string(),
    ]
}

/// Header labels with the sort indicator on the sorted column
pub fn header_cells(view: &LeaderboardView<'_>) -> Vec<String> {
    HEADERS
        .iter()
        .zip(RecordField::ALL)
        .map(|(label, field)| {
            if field == view.sort.field {
                format!("{} {}", label, view.sort.indicator())
            } else {
                label.to_string()
            }
        })
        .collect()
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// Highlight the first rows of the table
fn podium(index: usize, line: String) -> String {
    if index >= PODIUM_SIZE {
        return line;
    }
    match index {
        0 => line.on_bright_yellow().black().to_string(),
        1 => line.on_white().black().to_string(),
        _ => line.on_yellow().black().to_string(),
    }
}

fn write_error(e: std::io::Error) -> Error {
    Error::io("Failed to write leaderboard output", e)
}

/// Coloured table output
pub struct TableRenderer<W: Write> {
    out: W,
    title: Option<String>,
}

impl<W: Write> TableRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, title: None }
    }

    /// Heading printed above the statistics, e.g. a track name
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_stats(&mut self, view: &LeaderboardView<'_>) -> std::io::Result<()> {
        let stats = &view.stats;
        let fastest = match &stats.fastest_record_label {
            Some(label) => format!("{} ({})", stats.fastest_time, label),
            None => stats.fastest_time.clone(),
        };

        writeln!(
            self.out,
            "{} {}  {} {}  {} {}  {} {}",
            "Records:".bright_cyan(),
            stats.count.to_string().bright_white().bold(),
            "Matches:".bright_cyan(),
            stats.search_matches.to_string().bright_white(),
            "Fastest:".bright_cyan(),
            fastest.bright_white().bold(),
            "Driver:".bright_cyan(),
            stats.driver_label.bright_white()
        )?;
        if let Some(updated) = view.updated {
            writeln!(self.out, "{} {}", "Updated:".bright_cyan(), updated)?;
        }
        Ok(())
    }

    fn write_table(&mut self, view: &LeaderboardView<'_>) -> std::io::Result<()> {
        let headers = header_cells(view);
        let rows: Vec<Vec<String>> = view
            .rows
            .iter()
            .enumerate()
            .map(|(index, record)| row_cells(index + 1, record))
            .collect();

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header_line: Vec<String> = headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| pad(h, *w).bold().to_string())
            .collect();
        writeln!(self.out, "{}", header_line.join("  "))?;

        for (index, (record, cells)) in view.rows.iter().zip(&rows).enumerate() {
            let drivetrain = DrivetrainClass::classify(record.drivetrain.as_deref());
            let line: Vec<String> = cells
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(column, (cell, width))| {
                    let padded = pad(cell, *width);
                    match RecordField::ALL[column] {
                        RecordField::Time => padded.bright_white().bold().to_string(),
                        RecordField::Drivetrain => match drivetrain {
                            Some(class) => class.paint(&padded).to_string(),
                            None => padded,
                        },
                        RecordField::Mod if is_modified(record) => {
                            padded.bright_magenta().to_string()
                        }
                        _ => padded,
                    }
                })
                .collect();
            writeln!(self.out, "{}", podium(index, line.join("  ")))?;
        }
        Ok(())
    }
}

impl<W: Write> Renderer for TableRenderer<W> {
    fn render(&mut self, view: &LeaderboardView<'_>) -> Result<()> {
        if let Some(title) = &self.title {
            writeln!(self.out, "\n{}", title.bright_green().bold()).map_err(write_error)?;
        }
        self.write_stats(view).map_err(write_error)?;

        if let Some(message) = view.error {
            writeln!(
                self.out,
                "{} {}",
                "Failed to load data:".bright_red().bold(),
                message
            )
            .map_err(write_error)?;
        }

        if view.rows.is_empty() {
            writeln!(self.out, "{}", "No matching records".bright_yellow())
                .map_err(write_error)?;
        } else {
            self.write_table(view).map_err(write_error)?;
        }

        self.out.flush().map_err(write_error)
    }
}

/// Pretty-printed JSON output
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, view: &LeaderboardView<'_>) -> Result<()> {
        let json = serde_json::to_string_pretty(view)
            .map_err(|e| Error::json("Failed to serialize leaderboard view", e))?;
        writeln!(self.out, "{}", json).map_err(write_error)?;
        self.out.flush().map_err(write_error)
    }
}
