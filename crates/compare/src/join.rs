use std::collections::{BTreeMap, BTreeSet};

use crate::config::{CompareConfig, DuplicatePolicy};
use crate::error::CompareError;
use crate::model::{
    DuplicateVoucher, JoinedRow, MatchKind, NormalDataset, NormalRow, REASON_DELIMITER,
    REASON_DISTANCIA, REASON_VALOR, STATUS_CORRETO, STATUS_NAO_ENCONTRADO,
};

#[derive(Debug)]
pub struct JoinOutput {
    pub rows: Vec<JoinedRow>,
    /// Rows dropped under the `first` duplicate policy.
    pub duplicates_ignored: usize,
}

/// Full outer join on voucher, ascending voucher order.
///
/// Every voucher appearing on either side yields exactly one `JoinedRow`.
/// Duplicates within one side are never cross-joined: depending on the
/// configured policy they either fail the run or collapse to the first
/// occurrence.
pub fn join(
    extracted: &NormalDataset,
    reference: &NormalDataset,
    config: &CompareConfig,
) -> Result<JoinOutput, CompareError> {
    let (left, mut duplicates) = index_by_voucher(extracted);
    let (right, right_duplicates) = index_by_voucher(reference);
    duplicates.extend(right_duplicates);

    let duplicates_ignored = duplicates.iter().map(|d| d.count - 1).sum();
    if !duplicates.is_empty() && config.on_duplicate == DuplicatePolicy::Error {
        return Err(CompareError::DuplicateVouchers(duplicates));
    }

    let mut vouchers: BTreeSet<&String> = BTreeSet::new();
    vouchers.extend(left.keys());
    vouchers.extend(right.keys());

    let mut rows = Vec::with_capacity(vouchers.len());
    for voucher in vouchers {
        let l = left.get(voucher).copied();
        let r = right.get(voucher).copied();

        let match_kind = match (l, r) {
            (Some(_), Some(_)) => MatchKind::Both,
            (Some(_), None) => MatchKind::LeftOnly,
            (None, Some(_)) => MatchKind::RightOnly,
            (None, None) => unreachable!("voucher came from one of the sides"),
        };

        let valor_extraida = l.and_then(|row| row.valor);
        let valor_referencia = r.and_then(|row| row.valor);
        let distancia_extraida = l.and_then(|row| row.distancia);
        let distancia_referencia = r.and_then(|row| row.distancia);

        let status = classify(
            match_kind,
            valor_extraida,
            valor_referencia,
            distancia_extraida,
            distancia_referencia,
        );
        let highlight = status != STATUS_CORRETO;

        rows.push(JoinedRow {
            voucher: voucher.clone(),
            valor_extraida,
            valor_referencia,
            distancia_extraida,
            distancia_referencia,
            match_kind,
            status,
            highlight,
            extras_extraida: l.map(|row| row.extras.clone()),
            extras_referencia: r.map(|row| row.extras.clone()),
        });
    }

    Ok(JoinOutput { rows, duplicates_ignored })
}

/// Index a side by voucher, first occurrence wins. Returns the index plus
/// any vouchers seen more than once.
fn index_by_voucher(
    dataset: &NormalDataset,
) -> (BTreeMap<String, &NormalRow>, Vec<DuplicateVoucher>) {
    let mut index: BTreeMap<String, &NormalRow> = BTreeMap::new();
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

    for row in &dataset.rows {
        *counts.entry(row.voucher.as_str()).or_insert(0) += 1;
        index.entry(row.voucher.clone()).or_insert(row);
    }

    let duplicates = counts
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(voucher, count)| DuplicateVoucher {
            side: dataset.side,
            voucher: voucher.to_string(),
            count,
        })
        .collect();

    (index, duplicates)
}

/// Derive the status string for one joined row.
///
/// Comparison is exact equality on the rounded hundredths; missing equals
/// missing, missing vs present diverges. Reasons keep a fixed order, value
/// before distance.
pub fn classify(
    match_kind: MatchKind,
    valor_extraida: Option<i64>,
    valor_referencia: Option<i64>,
    distancia_extraida: Option<i64>,
    distancia_referencia: Option<i64>,
) -> String {
    if match_kind != MatchKind::Both {
        return STATUS_NAO_ENCONTRADO.to_string();
    }

    let mut reasons = Vec::new();
    if valor_extraida != valor_referencia {
        reasons.push(REASON_VALOR);
    }
    if distancia_extraida != distancia_referencia {
        reasons.push(REASON_DISTANCIA);
    }

    if reasons.is_empty() {
        STATUS_CORRETO.to_string()
    } else {
        reasons.join(REASON_DELIMITER)
    }
}
