//! Excel export of a laid-out report

use std::collections::HashMap;
use std::path::Path;

use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};

use inspekt_types::{Error, Result};

use super::layout::{CellStyle, ReportSheet};
use crate::constants::COLUMN_WIDTH;

/// Write the sheet to a new workbook at `output_path`
pub fn write_workbook(sheet: &ReportSheet, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let worksheet = workbook.add_worksheet();
    write_sheet(worksheet, sheet)?;

    workbook
        .save(output_path)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &ReportSheet) -> Result<()> {
    worksheet
        .set_name(&sheet.name)
        .map_err(|e| Error::Excel(e.to_string()))?;

    let header_format = Format::new().set_bold();
    for (col, title) in sheet.header.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, title, &header_format)
            .map_err(|e| Error::Excel(e.to_string()))?;
        worksheet
            .set_column_width(col as u16, COLUMN_WIDTH)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    // one format per distinct fill
    let mut fills: HashMap<u32, Format> = HashMap::new();

    for (row_idx, row) in sheet.rows.iter().enumerate() {
        let excel_row = (row_idx + 1) as u32;
        for (col, cell) in row.cells.iter().enumerate() {
            match cell.style {
                CellStyle::Plain => {
                    worksheet
                        .write_string(excel_row, col as u16, &cell.text)
                        .map_err(|e| Error::Excel(e.to_string()))?;
                }
                CellStyle::Background(rgb) => {
                    let format = fills
                        .entry(rgb)
                        .or_insert_with(|| Format::new().set_background_color(Color::RGB(rgb)));
                    worksheet
                        .write_string_with_format(excel_row, col as u16, &cell.text, format)
                        .map_err(|e| Error::Excel(e.to_string()))?;
                }
            }
        }
    }

    Ok(())
}
