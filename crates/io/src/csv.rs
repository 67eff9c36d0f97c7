// CSV/TSV import

use std::io::Read;
use std::path::Path;

use recibos_compare::Dataset;

pub fn import(path: &Path) -> Result<Dataset, String> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    import_from_string(&content, delimiter)
}

pub fn import_with_delimiter(path: &Path, delimiter: u8) -> Result<Dataset, String> {
    let content = read_file_as_utf8(path)?;
    import_from_string(&content, delimiter)
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins. Brazilian exports very
/// often use semicolons, so sniffing beats assuming comma.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Must produce >1 field on the first line to be viable
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // Score: (number of lines with same field count as line 1) * field_count
        // Higher field count breaks ties — more columns = more likely real delimiter
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| e.to_string())?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for Excel-exported CSVs)
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// First record is the header row; every following record is a data row.
/// Ragged records are kept as-is (the engine reads short rows as empty cells).
fn import_from_string(content: &str, delimiter: u8) -> Result<Dataset, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records();
    let header = match records.next() {
        Some(record) => record.map_err(|e| e.to_string())?,
        None => return Err("empty file: no header row".to_string()),
    };

    let mut dataset = Dataset::new(header.iter().map(|h| h.to_string()).collect());
    for result in records {
        let record = result.map_err(|e| e.to_string())?;
        dataset.push_row(record.iter().map(|c| c.to_string()).collect());
    }

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn sniff_semicolon_delimiter() {
        let content = "Número do Voucher;Valor do Recibo (R$)\n100;50,00\n101;30,00\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn sniff_comma_delimiter() {
        let content = "voucher,valor,distancia\n100,50.00,10\n";
        assert_eq!(sniff_delimiter(content), b',');
    }

    #[test]
    fn sniff_tab_delimiter() {
        let content = "voucher\tvalor\n100\t50.00\n";
        assert_eq!(sniff_delimiter(content), b'\t');
    }

    #[test]
    fn semicolon_import() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("extraida.csv");
        fs::write(&path, "Número do Voucher;Valor do Recibo (R$)\n100;\"50,00\"\n").unwrap();

        let dataset = import(&path).unwrap();
        assert_eq!(dataset.columns, vec!["Número do Voucher", "Valor do Recibo (R$)"]);
        assert_eq!(dataset.rows, vec![vec!["100", "50,00"]]);
    }

    #[test]
    fn windows_1252_fallback() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.csv");
        // "Distância" encoded as Windows-1252 (0xE2 = â)
        let mut bytes = b"voucher,Dist".to_vec();
        bytes.push(0xE2);
        bytes.extend_from_slice(b"ncia (km)\n100,10\n");
        fs::write(&path, bytes).unwrap();

        let dataset = import(&path).unwrap();
        assert_eq!(dataset.columns[1], "Distância (km)");
    }

    #[test]
    fn empty_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "").unwrap();
        assert!(import(&path).is_err());
    }

    #[test]
    fn header_only_file_yields_zero_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("header.csv");
        fs::write(&path, "voucher,valor,distancia\n").unwrap();

        let dataset = import(&path).unwrap();
        assert_eq!(dataset.columns.len(), 3);
        assert!(dataset.rows.is_empty());
    }
}
