use serde::Serialize;

// ---------------------------------------------------------------------------
// Status strings
// ---------------------------------------------------------------------------

/// Status of a row whose fields all match.
pub const STATUS_CORRETO: &str = "Correto";
/// Status of a row whose voucher exists on only one side.
pub const STATUS_NAO_ENCONTRADO: &str = "Voucher não encontrado";
/// Reason fragment for a value mismatch.
pub const REASON_VALOR: &str = "Valor divergente";
/// Reason fragment for a distance mismatch.
pub const REASON_DISTANCIA: &str = "Distância divergente";
/// Joins multiple reason fragments, value before distance.
pub const REASON_DELIMITER: &str = " | ";
/// Exact header of the status column in the rendered report.
pub const STATUS_COLUMN: &str = "Status da Verificação";

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Raw tabular input: a header row plus data rows, all cells as strings.
/// File parsing (CSV, XLSX) lives in `recibos-io`; tests build these inline.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

/// Which input a dataset (or error) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Extracted,
    Reference,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Extracted => "extraida",
            Side::Reference => "referencia",
        }
    }

    /// Column suffix used in the report for this side's columns.
    pub fn suffix(&self) -> &'static str {
        match self {
            Side::Extracted => "_extraida",
            Side::Reference => "_referencia",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Normalized
// ---------------------------------------------------------------------------

/// One row after column mapping and numeric coercion.
///
/// `valor` and `distancia` are stored in hundredths (value rounded to two
/// fraction digits, then scaled by 100), so equality on them is exact.
/// `None` means the cell was absent or not parseable as a number.
#[derive(Debug, Clone)]
pub struct NormalRow {
    pub voucher: String,
    pub valor: Option<i64>,
    pub distancia: Option<i64>,
    /// Cells of the passthrough columns, in `extra_columns` order.
    pub extras: Vec<String>,
}

/// A dataset after normalization. The original `Dataset` is not kept.
#[derive(Debug, Clone)]
pub struct NormalDataset {
    pub side: Side,
    /// Trimmed/lowercased names of columns that are not voucher/valor/distancia.
    pub extra_columns: Vec<String>,
    pub rows: Vec<NormalRow>,
}

// ---------------------------------------------------------------------------
// Join
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Both,
    LeftOnly,
    RightOnly,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Both => "both",
            MatchKind::LeftOnly => "left_only",
            MatchKind::RightOnly => "right_only",
        }
    }
}

/// A voucher that appears more than once within a single side.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateVoucher {
    pub side: Side,
    pub voucher: String,
    pub count: usize,
}

/// One voucher's pairing of extracted and reference rows, fully classified.
/// Numeric fields are in hundredths; display formatting happens in the report.
#[derive(Debug, Clone, Serialize)]
pub struct JoinedRow {
    pub voucher: String,
    pub valor_extraida: Option<i64>,
    pub valor_referencia: Option<i64>,
    pub distancia_extraida: Option<i64>,
    pub distancia_referencia: Option<i64>,
    pub match_kind: MatchKind,
    pub status: String,
    pub highlight: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras_extraida: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras_referencia: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Presentation table handed to the rendering collaborator. Every cell is a
/// display string; `highlight` tells the renderer to fill the whole row.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub columns: Vec<String>,
    pub rows: Vec<ReportRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub cells: Vec<String>,
    pub highlight: bool,
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct CompareSummary {
    pub total_rows: usize,
    pub correct: usize,
    pub valor_mismatches: usize,
    pub distancia_mismatches: usize,
    pub left_only: usize,
    pub right_only: usize,
    /// Rows dropped under the `first` duplicate policy (0 otherwise).
    pub duplicates_ignored: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareMeta {
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareResult {
    pub meta: CompareMeta,
    pub summary: CompareSummary,
    pub rows: Vec<JoinedRow>,
    pub report: Report,
}
