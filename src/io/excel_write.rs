use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::report::SheetTable;

/// Writes the table to a single-sheet workbook at `path`. The column headers
/// occupy the first row in bold.
#[instrument(level = "debug", skip(table), fields(path = %path.display(), rows = table.rows.len()))]
pub fn write_workbook(path: &Path, table: &SheetTable) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&table.sheet_name)?;

    for (col_idx, header) in table.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col_idx as u16, header, &header_format)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            worksheet.write_string((row_idx + 1) as u32, col_idx as u16, cell)?;
        }
    }
    worksheet.autofit();

    workbook.save(path)?;
    debug!("workbook saved");
    Ok(())
}
