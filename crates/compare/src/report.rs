use crate::model::{
    CompareSummary, JoinedRow, MatchKind, Report, ReportRow, Side, REASON_DISTANCIA, REASON_VALOR,
    STATUS_COLUMN, STATUS_CORRETO,
};

/// Render hundredths as a fixed-point display string: two fraction digits,
/// comma separator, no thousands separator. Missing renders as empty.
/// Presentation only — equality was already decided on the hundredths.
pub fn format_hundredths(value: Option<i64>) -> String {
    match value {
        None => String::new(),
        Some(v) => {
            let sign = if v < 0 { "-" } else { "" };
            let v = v.abs();
            format!("{sign}{},{:02}", v / 100, v % 100)
        }
    }
}

/// Build the presentation table: voucher, the extracted columns, the
/// reference columns (each side suffixed), then the status column.
pub fn build_report(
    rows: &[JoinedRow],
    extracted_extras: &[String],
    reference_extras: &[String],
) -> Report {
    let mut columns = vec!["voucher".to_string()];
    columns.push(format!("valor{}", Side::Extracted.suffix()));
    columns.push(format!("distancia{}", Side::Extracted.suffix()));
    for name in extracted_extras {
        columns.push(format!("{name}{}", Side::Extracted.suffix()));
    }
    columns.push(format!("valor{}", Side::Reference.suffix()));
    columns.push(format!("distancia{}", Side::Reference.suffix()));
    for name in reference_extras {
        columns.push(format!("{name}{}", Side::Reference.suffix()));
    }
    columns.push(STATUS_COLUMN.to_string());

    let report_rows = rows
        .iter()
        .map(|row| {
            let mut cells = Vec::with_capacity(columns.len());
            cells.push(row.voucher.clone());
            cells.push(format_hundredths(row.valor_extraida));
            cells.push(format_hundredths(row.distancia_extraida));
            push_extras(&mut cells, row.extras_extraida.as_deref(), extracted_extras.len());
            cells.push(format_hundredths(row.valor_referencia));
            cells.push(format_hundredths(row.distancia_referencia));
            push_extras(&mut cells, row.extras_referencia.as_deref(), reference_extras.len());
            cells.push(row.status.clone());
            ReportRow { cells, highlight: row.highlight }
        })
        .collect();

    Report { columns, rows: report_rows }
}

/// Absent side → empty cells so every row matches the header width.
fn push_extras(cells: &mut Vec<String>, extras: Option<&[String]>, width: usize) {
    match extras {
        Some(values) => {
            for i in 0..width {
                cells.push(values.get(i).cloned().unwrap_or_default());
            }
        }
        None => cells.extend(std::iter::repeat(String::new()).take(width)),
    }
}

/// Compute summary statistics from the joined rows.
pub fn compute_summary(rows: &[JoinedRow], duplicates_ignored: usize) -> CompareSummary {
    let mut summary = CompareSummary {
        total_rows: rows.len(),
        correct: 0,
        valor_mismatches: 0,
        distancia_mismatches: 0,
        left_only: 0,
        right_only: 0,
        duplicates_ignored,
    };

    for row in rows {
        if row.status == STATUS_CORRETO {
            summary.correct += 1;
        }
        if row.status.contains(REASON_VALOR) {
            summary.valor_mismatches += 1;
        }
        if row.status.contains(REASON_DISTANCIA) {
            summary.distancia_mismatches += 1;
        }
        match row.match_kind {
            MatchKind::LeftOnly => summary.left_only += 1,
            MatchKind::RightOnly => summary.right_only += 1,
            MatchKind::Both => {}
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::STATUS_NAO_ENCONTRADO;

    fn joined(voucher: &str, status: &str, highlight: bool, match_kind: MatchKind) -> JoinedRow {
        JoinedRow {
            voucher: voucher.into(),
            valor_extraida: Some(5000),
            valor_referencia: Some(5000),
            distancia_extraida: None,
            distancia_referencia: None,
            match_kind,
            status: status.into(),
            highlight,
            extras_extraida: Some(vec!["ana".into()]),
            extras_referencia: None,
        }
    }

    #[test]
    fn formats_with_comma_and_two_digits() {
        assert_eq!(format_hundredths(Some(5000)), "50,00");
        assert_eq!(format_hundredths(Some(5001)), "50,01");
        assert_eq!(format_hundredths(Some(5)), "0,05");
        assert_eq!(format_hundredths(Some(-1050)), "-10,50");
        assert_eq!(format_hundredths(Some(-5)), "-0,05");
        assert_eq!(format_hundredths(Some(123_456)), "1234,56");
        assert_eq!(format_hundredths(None), "");
    }

    #[test]
    fn format_round_trips_through_parse() {
        use crate::normalize::parse_decimal;
        for hundredths in [0i64, 1, 99, 100, 5001, -1050, 123_456] {
            let display = format_hundredths(Some(hundredths));
            assert_eq!(parse_decimal(&display), Some(hundredths), "value {display}");
        }
    }

    #[test]
    fn over_range_cell_formats_as_empty() {
        use crate::normalize::parse_decimal;
        let huge = format!("-{}", "9".repeat(320));
        assert_eq!(format_hundredths(parse_decimal(&huge)), "");
    }

    #[test]
    fn report_columns_and_row_width() {
        let rows = vec![joined("100", STATUS_NAO_ENCONTRADO, true, MatchKind::LeftOnly)];
        let report = build_report(&rows, &["motorista".into()], &["obs".into()]);
        assert_eq!(
            report.columns,
            vec![
                "voucher",
                "valor_extraida",
                "distancia_extraida",
                "motorista_extraida",
                "valor_referencia",
                "distancia_referencia",
                "obs_referencia",
                STATUS_COLUMN,
            ]
        );
        let row = &report.rows[0];
        assert_eq!(row.cells.len(), report.columns.len());
        assert_eq!(row.cells[3], "ana");
        assert_eq!(row.cells[6], ""); // reference side absent
        assert_eq!(row.cells[7], STATUS_NAO_ENCONTRADO);
        assert!(row.highlight);
    }

    #[test]
    fn summary_counts_statuses() {
        let rows = vec![
            joined("1", STATUS_CORRETO, false, MatchKind::Both),
            joined("2", "Valor divergente | Distância divergente", true, MatchKind::Both),
            joined("3", REASON_DISTANCIA, true, MatchKind::Both),
            joined("4", STATUS_NAO_ENCONTRADO, true, MatchKind::LeftOnly),
            joined("5", STATUS_NAO_ENCONTRADO, true, MatchKind::RightOnly),
        ];
        let summary = compute_summary(&rows, 2);
        assert_eq!(summary.total_rows, 5);
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.valor_mismatches, 1);
        assert_eq!(summary.distancia_mismatches, 2);
        assert_eq!(summary.left_only, 1);
        assert_eq!(summary.right_only, 1);
        assert_eq!(summary.duplicates_ignored, 2);
    }
}
