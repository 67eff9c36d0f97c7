use std::fmt;

use crate::model::{DuplicateVoucher, Side};

#[derive(Debug)]
pub enum CompareError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (alias target not a canonical column, etc.).
    ConfigValidation(String),
    /// No column maps to `voucher`; the join cannot proceed.
    MissingVoucherColumn { side: Side },
    /// Two columns map to the same canonical name after normalization.
    DuplicateColumn { side: Side, column: String },
    /// Repeated vouchers within one side (under the `error` policy).
    DuplicateVouchers(Vec<DuplicateVoucher>),
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingVoucherColumn { side } => {
                write!(f, "planilha {side}: no column maps to 'voucher'")
            }
            Self::DuplicateColumn { side, column } => {
                write!(f, "planilha {side}: duplicate column '{column}' after normalization")
            }
            Self::DuplicateVouchers(dups) => {
                writeln!(f, "duplicate vouchers found:")?;
                for dup in dups {
                    writeln!(
                        f,
                        "  planilha {} voucher {:?} appears {} times",
                        dup.side, dup.voucher, dup.count
                    )?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for CompareError {}
