//! Report layout: projection of annotated records onto the requested
//! columns, with per-cell styles decided before anything is written.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::warn;

use inspekt_domain::model::{AnnotatedDataset, UrgencyTier, DATE_FIELD, LABEL_FIELD};
use inspekt_domain::service::{classify, parse_due_date};
use inspekt_types::Result;

use crate::constants::{CRITICAL_FILL, NORMAL_FILL, SHEET_NAME, WARNING_FILL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Plain,
    /// Solid background fill, 0xRRGGBB
    Background(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportCell {
    pub text: String,
    pub style: CellStyle,
}

/// One data row of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub cells: Vec<ReportCell>,
    pub tier: UrgencyTier,
    /// First label color of the record, if it has one
    pub label_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSheet {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<ReportRow>,
}

impl ReportSheet {
    pub fn tier_counts(&self) -> BTreeMap<UrgencyTier, usize> {
        let mut counts: BTreeMap<UrgencyTier, usize> =
            UrgencyTier::ALL.iter().map(|tier| (*tier, 0)).collect();
        for row in &self.rows {
            *counts.entry(row.tier).or_insert(0) += 1;
        }
        counts
    }

    /// Whether any cell carries a background fill
    pub fn has_background(&self) -> bool {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .any(|cell| cell.style != CellStyle::Plain)
    }
}

pub fn tier_fill(tier: UrgencyTier) -> u32 {
    match tier {
        UrgencyTier::Critical => CRITICAL_FILL,
        UrgencyTier::Warning => WARNING_FILL,
        UrgencyTier::Normal => NORMAL_FILL,
    }
}

/// Excel's named colors, as the xlsx writers spell them
const NAMED_COLORS: [(&str, u32); 16] = [
    ("black", 0x000000),
    ("blue", 0x0000FF),
    ("brown", 0x800000),
    ("cyan", 0x00FFFF),
    ("gray", 0x808080),
    ("green", 0x008000),
    ("lime", 0x00FF00),
    ("magenta", 0xFF00FF),
    ("navy", 0x000080),
    ("orange", 0xFF6600),
    ("pink", 0xFF00FF),
    ("purple", 0x800080),
    ("red", 0xFF0000),
    ("silver", 0xC0C0C0),
    ("white", 0xFFFFFF),
    ("yellow", 0xFFFF00),
];

/// Parse `#RRGGBB`, `RRGGBB` or a named color (`red`, `navy`, ...) into 0xRRGGBB
pub fn parse_color(code: &str) -> Option<u32> {
    let code = code.trim();
    if let Some((_, rgb)) = NAMED_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(code))
    {
        return Some(*rgb);
    }

    let hex = code.trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

/// Lay out the dataset for the given columns.
///
/// Every row's inspection date is parsed strictly; the first malformed date
/// aborts the layout. With `colorize` off no cell gets a fill, including the
/// label column.
pub fn build_sheet(
    dataset: &AnnotatedDataset,
    columns: &[String],
    colorize: bool,
    today: NaiveDate,
) -> Result<ReportSheet> {
    let label_position = columns.iter().position(|c| c == LABEL_FIELD);

    let mut rows = Vec::with_capacity(dataset.len());
    for (idx, annotated) in dataset.records.iter().enumerate() {
        let due = parse_due_date(&annotated.record.text(DATE_FIELD), idx + 1)?;
        let tier = classify(today, due);
        let label_color = annotated.color_codes.primary().map(str::to_string);

        let row_style = if colorize {
            CellStyle::Background(tier_fill(tier))
        } else {
            CellStyle::Plain
        };
        let label_style = match (&label_color, colorize) {
            (Some(code), true) => match parse_color(code) {
                Some(rgb) => Some(CellStyle::Background(rgb)),
                None => {
                    warn!("row {}: unusable label color {:?}", idx + 1, code);
                    None
                }
            },
            _ => None,
        };

        let cells = columns
            .iter()
            .enumerate()
            .map(|(col, name)| {
                let style = match label_style {
                    Some(style) if Some(col) == label_position => style,
                    _ => row_style,
                };
                ReportCell {
                    text: annotated.record.text(name),
                    style,
                }
            })
            .collect();

        rows.push(ReportRow {
            cells,
            tier,
            label_color,
        });
    }

    Ok(ReportSheet {
        name: SHEET_NAME.to_string(),
        header: columns.to_vec(),
        rows,
    })
}
