use crate::config::CompareConfig;
use crate::error::CompareError;
use crate::model::{Dataset, NormalDataset, NormalRow, Side};

/// Canonical column names after alias mapping.
pub const CANON_VOUCHER: &str = "voucher";
pub const CANON_VALOR: &str = "valor";
pub const CANON_DISTANCIA: &str = "distancia";

/// Fixed alias table: known source labels (already trimmed/lowercased)
/// mapped to canonical names. Extra aliases come from the config.
const ALIASES: &[(&str, &str)] = &[
    ("número do voucher", CANON_VOUCHER),
    ("valor do recibo (r$)", CANON_VALOR),
    ("distância (km)", CANON_DISTANCIA),
];

/// Trim, lowercase, then apply the alias tables. Unknown columns pass
/// through under their trimmed/lowercased name.
pub fn canonical_name(raw: &str, config: &CompareConfig) -> String {
    let lowered = raw.trim().to_lowercase();
    if let Some((_, canon)) = ALIASES.iter().find(|(source, _)| *source == lowered) {
        return (*canon).to_string();
    }
    if let Some(canon) = config.aliases.get(&lowered) {
        return canon.clone();
    }
    lowered
}

/// Normalize a raw dataset: canonical column names, coerced numeric fields.
///
/// Per-cell parse failures degrade to missing and never abort the batch.
/// Structural problems (no voucher column, colliding canonical names) are
/// fatal because the join cannot proceed.
pub fn normalize(
    side: Side,
    dataset: &Dataset,
    config: &CompareConfig,
) -> Result<NormalDataset, CompareError> {
    let canon: Vec<String> = dataset
        .columns
        .iter()
        .map(|c| canonical_name(c, config))
        .collect();

    for (i, name) in canon.iter().enumerate() {
        if canon[..i].contains(name) {
            return Err(CompareError::DuplicateColumn { side, column: name.clone() });
        }
    }

    let voucher_idx = canon
        .iter()
        .position(|c| c == CANON_VOUCHER)
        .ok_or(CompareError::MissingVoucherColumn { side })?;
    let valor_idx = canon.iter().position(|c| c == CANON_VALOR);
    let distancia_idx = canon.iter().position(|c| c == CANON_DISTANCIA);

    let extra_indices: Vec<usize> = (0..canon.len())
        .filter(|&i| i != voucher_idx && Some(i) != valor_idx && Some(i) != distancia_idx)
        .collect();
    let extra_columns: Vec<String> = extra_indices.iter().map(|&i| canon[i].clone()).collect();

    let mut rows = Vec::with_capacity(dataset.rows.len());
    for raw in &dataset.rows {
        // Short rows read as empty cells; ragged input is a per-cell issue,
        // not a structural one.
        let cell = |i: usize| raw.get(i).map(String::as_str).unwrap_or("");

        rows.push(NormalRow {
            voucher: cell(voucher_idx).trim().to_string(),
            valor: valor_idx.and_then(|i| parse_decimal(cell(i))),
            distancia: distancia_idx.and_then(|i| parse_decimal(cell(i))),
            extras: extra_indices.iter().map(|&i| cell(i).to_string()).collect(),
        });
    }

    Ok(NormalDataset { side, extra_columns, rows })
}

/// Parse a money/distance string into hundredths, or None if non-numeric:
/// - Strip `R$`, whitespace
/// - Handle `(123,45)` → `-123,45`
/// - Comma wins as the decimal separator when present; periods then act as
///   thousands separators. Without a comma, the period is the decimal
///   separator (matches how a plain numeric parser reads the cell).
/// - Returns None if non-numeric characters remain after stripping
pub fn parse_decimal(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (is_negative, inner) = if trimmed.starts_with('(') && trimmed.ends_with(')') {
        (true, &trimmed[1..trimmed.len() - 1])
    } else {
        (false, trimmed)
    };

    let lowered = inner.trim().to_lowercase();
    let bare = lowered.strip_prefix("r$").unwrap_or(&lowered);

    let stripped: String = bare.chars().filter(|c| !c.is_whitespace()).collect();
    if stripped.is_empty() {
        return None;
    }

    let normalized = if stripped.contains(',') {
        stripped.replace('.', "").replace(',', ".")
    } else {
        stripped
    };

    // After stripping, only digits, '.', and a leading sign should remain
    for (i, c) in normalized.chars().enumerate() {
        match c {
            '0'..='9' | '.' => {}
            '-' | '+' if i == 0 && !is_negative => {}
            _ => return None, // Non-numeric character → missing
        }
    }

    let value: f64 = normalized.parse().ok()?;
    let value = if is_negative { -value } else { value };

    // Values whose hundredths overflow f64 or i64 degrade to missing, same
    // as any other unusable cell. `as i64` would otherwise saturate.
    let scaled = value * 100.0;
    if !scaled.is_finite() || scaled.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(round_half_away(value))
}

/// Round to two fraction digits, half away from zero, returning hundredths.
///
/// `f64::round` rounds half-way cases away from zero. Rounding happens on
/// the binary double after scaling by 100, so the outcome for boundary
/// inputs is defined by the f64 value of `value * 100.0` (e.g. 50.005
/// scales to exactly 5000.5 and rounds up to 50.01).
pub fn round_half_away(value: f64) -> i64 {
    (value * 100.0).round() as i64
}
