//! CLI Exit Code Registry
//!
//! Single source of truth for all `loom` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                            |
//! |------|----------------------------------------------------|
//! | 0    | Success                                            |
//! | 1    | General error (unspecified)                        |
//! | 2    | Usage error (bad args, missing reference)          |
//! | 3    | `check`: computed totals disagree with reference   |
//! | 4    | Fixture document rejected                          |
//! | 5    | Finance config rejected                            |
//! | 6    | `apply`: at least one command rejected             |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - IO failures, serialization errors.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required input.
pub const EXIT_USAGE: u8 = 2;

/// Consistency check found drift between computed and reference totals.
pub const EXIT_INCONSISTENT: u8 = 3;

/// Fixture file could not be read, parsed or validated.
pub const EXIT_INVALID_FIXTURES: u8 = 4;

/// Finance config could not be read, parsed or validated.
pub const EXIT_INVALID_CONFIG: u8 = 5;

/// One or more commands in an `apply` batch were rejected.
pub const EXIT_COMMAND_REJECTED: u8 = 6;
