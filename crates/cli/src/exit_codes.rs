//! CLI Exit Code Registry
//!
//! Single source of truth for `tally` exit codes. Exit codes are part of
//! the shell contract — scripts rely on them.
//!
//! | Code | Description                                  |
//! |------|----------------------------------------------|
//! | 0    | Success                                      |
//! | 1    | Runtime error, or drift found (validate)     |
//! | 2    | Usage error (bad args, missing file)         |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General runtime error. `validate-costs` also exits 1 when stored
/// costs drift from recomputation, like `diff(1)`'s "files differ".
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing input files.
pub const EXIT_USAGE: u8 = 2;
