use crate::config::CompareConfig;
use crate::error::CompareError;
use crate::join::join;
use crate::model::{CompareMeta, CompareResult, Dataset, Side};
use crate::normalize::normalize;
use crate::report::{build_report, compute_summary};

/// Run one comparison: normalize both sides, join, classify, build the
/// report. All state is request-local; inputs are only borrowed.
pub fn run(
    extracted: &Dataset,
    reference: &Dataset,
    config: &CompareConfig,
) -> Result<CompareResult, CompareError> {
    let left = normalize(Side::Extracted, extracted, config)?;
    let right = normalize(Side::Reference, reference, config)?;

    let joined = join(&left, &right, config)?;
    let summary = compute_summary(&joined.rows, joined.duplicates_ignored);
    let report = build_report(&joined.rows, &left.extra_columns, &right.extra_columns);

    Ok(CompareResult {
        meta: CompareMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        rows: joined.rows,
        report,
    })
}
