//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! | Code | Description                                    |
//! |------|------------------------------------------------|
//! | 0    | Success, all rows "Correto"                    |
//! | 1    | Divergences found (like `diff(1)`)             |
//! | 2    | CLI usage error (bad args, bad config)         |
//! | 3    | Duplicate vouchers within one side             |
//! | 4    | Structural error (no voucher column)           |
//! | 5    | Parse or IO error reading/writing files        |

/// Success - comparison ran and every row is "Correto".
pub const EXIT_SUCCESS: u8 = 0;

/// Divergences found.
/// Like `diff(1)`, exit 1 means "the sheets differ."
pub const EXIT_DIVERGENT: u8 = 1;

/// Usage error - bad arguments, missing required options, bad config.
pub const EXIT_USAGE: u8 = 2;

/// Duplicate vouchers found within one side (under the `error` policy).
pub const EXIT_DUPLICATE: u8 = 3;

/// Structural error - a dataset has no voucher-mappable column.
pub const EXIT_STRUCTURE: u8 = 4;

/// Parse or IO error reading input files or writing the output file.
pub const EXIT_PARSE: u8 = 5;
