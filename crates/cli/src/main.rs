// recibos CLI - compare an extracted receipts sheet against a reference sheet

mod exit_codes;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use exit_codes::{
    EXIT_DIVERGENT, EXIT_DUPLICATE, EXIT_PARSE, EXIT_STRUCTURE, EXIT_SUCCESS, EXIT_USAGE,
};
use recibos_compare::{CompareConfig, CompareError, CompareResult, Dataset};

#[derive(Parser)]
#[command(name = "recibos")]
#[command(about = "Compare an extracted receipts spreadsheet against a reference spreadsheet")]
#[command(version)]
#[command(after_help = "\
Examples:
  recibos extraida.xlsx referencia.xlsx
  recibos extraida.csv referencia.csv -o resultado.xlsx
  recibos extraida.xlsx referencia.xlsx --json --no-output
  recibos extraida.xlsx referencia.xlsx --config recibos.toml")]
struct Cli {
    /// Extracted spreadsheet (the one under verification)
    extraida: PathBuf,

    /// Reference spreadsheet (the trusted baseline)
    referencia: PathBuf,

    /// Annotated XLSX output path
    #[arg(long, short = 'o', default_value = "resultado_comparacao.xlsx")]
    output: PathBuf,

    /// Skip writing the annotated XLSX
    #[arg(long)]
    no_output: bool,

    /// Print the full result as JSON on stdout
    #[arg(long)]
    json: bool,

    /// TOML config file (extra column aliases, duplicate policy)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sheet name to read from Excel inputs (default: first sheet)
    #[arg(long)]
    sheet: Option<String>,

    /// Suppress the human summary on stderr
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {message}");
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {hint}");
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    fn parse(msg: impl Into<String>) -> Self {
        Self { code: EXIT_PARSE, message: msg.into(), hint: None }
    }

    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Map an engine error to its exit code, with an actionable hint.
    fn from_compare(err: CompareError) -> Self {
        let (code, hint) = match &err {
            CompareError::ConfigParse(_) | CompareError::ConfigValidation(_) => (EXIT_USAGE, None),
            CompareError::MissingVoucherColumn { .. } => (
                EXIT_STRUCTURE,
                Some(
                    "expected a column named 'voucher' or 'Número do Voucher' \
                     (add an [aliases] entry in the config for other labels)"
                        .to_string(),
                ),
            ),
            CompareError::DuplicateColumn { .. } => (EXIT_STRUCTURE, None),
            CompareError::DuplicateVouchers(_) => (
                EXIT_DUPLICATE,
                Some("set on_duplicate = \"first\" in the config to keep first occurrences".to_string()),
            ),
        };
        Self { code, message: err.to_string(), hint }
    }
}

fn run(cli: Cli) -> Result<u8, CliError> {
    let config = match &cli.config {
        Some(path) => {
            let config_str = std::fs::read_to_string(path).map_err(|e| {
                CliError::parse(format!("cannot read config {}: {e}", path.display()))
            })?;
            CompareConfig::from_toml(&config_str).map_err(CliError::from_compare)?
        }
        None => CompareConfig::default(),
    };

    let extraida = load_dataset(&cli.extraida, cli.sheet.as_deref())?;
    let referencia = load_dataset(&cli.referencia, cli.sheet.as_deref())?;

    let result =
        recibos_compare::run(&extraida, &referencia, &config).map_err(CliError::from_compare)?;

    if !cli.no_output {
        recibos_io::xlsx::export_report(&result.report, &cli.output)
            .map_err(|e| CliError::parse(format!("{}: {e}", cli.output.display())))?;
    }

    if cli.json {
        let json_str = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::parse(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }

    if !cli.quiet {
        print_summary(&result, &cli);
    }

    let divergent = result.rows.iter().any(|row| row.highlight);
    Ok(if divergent { EXIT_DIVERGENT } else { EXIT_SUCCESS })
}

/// Pick the importer by file extension.
fn load_dataset(path: &Path, sheet: Option<&str>) -> Result<Dataset, CliError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let imported = match ext.as_str() {
        "csv" | "tsv" | "txt" => recibos_io::csv::import(path),
        "xlsx" | "xls" | "xlsb" | "ods" => recibos_io::xlsx::import_sheet(path, sheet),
        other => {
            return Err(CliError::usage(format!(
                "unsupported input format '.{other}' for {}",
                path.display()
            ))
            .with_hint("expected .csv, .tsv, .xlsx, .xls, .xlsb or .ods"))
        }
    };

    imported.map_err(|e| CliError::parse(format!("{}: {e}", path.display())))
}

/// Human summary to stderr (stdout is reserved for --json).
fn print_summary(result: &CompareResult, cli: &Cli) {
    let s = &result.summary;
    eprintln!(
        "{} voucher(s) — {} correto(s), {} valor divergente(s), {} distância divergente(s), {} não encontrado(s)",
        s.total_rows,
        s.correct,
        s.valor_mismatches,
        s.distancia_mismatches,
        s.left_only + s.right_only,
    );
    if s.duplicates_ignored > 0 {
        eprintln!("{} duplicate row(s) ignored (on_duplicate = \"first\")", s.duplicates_ignored);
    }
    if !cli.no_output {
        eprintln!("wrote {}", cli.output.display());
    }
}
