// Excel import and annotated export

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Color, Format, Workbook};

use recibos_compare::model::Report;
use recibos_compare::Dataset;

/// Solid fill applied to every cell of a highlighted row.
pub const HIGHLIGHT_COLOR: u32 = 0xFFC7CE;

/// Import the first sheet of an Excel file (xlsx, xls, xlsb, ods).
pub fn import(path: &Path) -> Result<Dataset, String> {
    import_sheet(path, None)
}

/// Import a named sheet, or the first one when `sheet` is `None`.
/// The first row is the header; all cells are converted to strings.
pub fn import_sheet(path: &Path, sheet: Option<&str>) -> Result<Dataset, String> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| format!("Failed to open Excel file: {e}"))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let name = match sheet {
        Some(wanted) => sheet_names
            .iter()
            .find(|n| n.as_str() == wanted)
            .cloned()
            .ok_or_else(|| {
                format!("sheet '{wanted}' not found (available: {})", sheet_names.join(", "))
            })?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| "Excel file contains no sheets".to_string())?,
    };

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| format!("Failed to read sheet '{name}': {e}"))?;

    let mut rows = range.rows();
    let header = match rows.next() {
        Some(cells) => cells.iter().map(cell_to_string).collect(),
        None => return Err(format!("sheet '{name}' is empty: no header row")),
    };

    let mut dataset = Dataset::new(header);
    for cells in rows {
        dataset.push_row(cells.iter().map(cell_to_string).collect());
    }

    Ok(dataset)
}

/// Convert one calamine cell to the string form the engine parses.
/// Integral floats drop the trailing `.0` so numeric vouchers join against
/// text vouchers.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => format!("{e:?}"),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

/// Write the report as an XLSX file: bold header row, then one row per
/// joined voucher, with every cell of a highlighted row filled solid.
pub fn export_report(report: &Report, path: &Path) -> Result<(), String> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new().set_bold();
    let highlight_format = Format::new().set_background_color(Color::RGB(HIGHLIGHT_COLOR));

    for (col, name) in report.columns.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, name, &header_format)
            .map_err(|e| format!("Failed to write header '{name}': {e}"))?;
    }

    for (i, row) in report.rows.iter().enumerate() {
        let row_idx = (i + 1) as u32;
        for (col, cell) in row.cells.iter().enumerate() {
            let col_idx = col as u16;
            let written = if row.highlight {
                worksheet.write_string_with_format(row_idx, col_idx, cell, &highlight_format)
            } else {
                worksheet.write_string(row_idx, col_idx, cell)
            };
            written.map_err(|e| format!("Failed to write cell: {e}"))?;
        }
    }

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {e}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    use recibos_compare::model::{ReportRow, STATUS_COLUMN};
    use tempfile::tempdir;

    fn sample_report() -> Report {
        Report {
            columns: vec![
                "voucher".to_string(),
                "valor_extraida".to_string(),
                "valor_referencia".to_string(),
                STATUS_COLUMN.to_string(),
            ],
            rows: vec![
                ReportRow {
                    cells: vec!["100".into(), "50,00".into(), "50,00".into(), "Correto".into()],
                    highlight: false,
                },
                ReportRow {
                    cells: vec![
                        "200".into(),
                        "30,00".into(),
                        String::new(),
                        "Voucher não encontrado".into(),
                    ],
                    highlight: true,
                },
            ],
        }
    }

    #[test]
    fn export_then_import_round_trips_cells() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("resultado.xlsx");
        export_report(&sample_report(), &path).unwrap();

        let dataset = import(&path).unwrap();
        assert_eq!(
            dataset.columns,
            vec!["voucher", "valor_extraida", "valor_referencia", STATUS_COLUMN]
        );
        assert_eq!(dataset.rows.len(), 2);
        assert_eq!(dataset.rows[0][3], "Correto");
        assert_eq!(dataset.rows[1][0], "200");
        assert_eq!(dataset.rows[1][2], "");
        assert_eq!(dataset.rows[1][3], "Voucher não encontrado");
    }

    #[test]
    fn highlight_color_lands_in_styles_xml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("resultado.xlsx");
        export_report(&sample_report(), &path).unwrap();

        let file = std::fs::File::open(&path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut styles = String::new();
        archive
            .by_name("xl/styles.xml")
            .unwrap()
            .read_to_string(&mut styles)
            .unwrap();
        assert!(styles.contains("FFC7CE"), "highlight fill missing from styles.xml");
    }

    #[test]
    fn integral_floats_import_without_decimal_tail() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("numeric.xlsx");

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "Número do Voucher").unwrap();
        worksheet.write_string(0, 1, "Valor do Recibo (R$)").unwrap();
        worksheet.write_number(1, 0, 100.0).unwrap();
        worksheet.write_number(1, 1, 50.25).unwrap();
        workbook.save(&path).unwrap();

        let dataset = import(&path).unwrap();
        assert_eq!(dataset.rows[0][0], "100"); // not "100.0"
        assert_eq!(dataset.rows[0][1], "50.25");
    }

    #[test]
    fn missing_sheet_name_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("one_sheet.xlsx");
        export_report(&sample_report(), &path).unwrap();

        let err = import_sheet(&path, Some("Inexistente")).unwrap_err();
        assert!(err.contains("not found"));
    }
}
