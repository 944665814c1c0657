/// Application name
pub const APP_NAME: &str = "refit";

/// Application version
pub const APP_VERSION: &str = "0.1.0";

/// File left at the root of a transformed application while manual
/// follow-up instructions are unresolved. Its presence blocks the next run.
pub const PENDING_INSTRUCTIONS_FILE: &str = "REFIT-PENDING-INSTRUCTIONS.md";

/// Directory holding the rendered per-template instruction documents
pub const INSTRUCTIONS_DIR: &str = "refit-instructions";

/// File name of the serialized transformation result report
pub const RESULT_REPORT_FILE: &str = "transformation-result.json";

/// Suffix appended to the application directory name when no explicit
/// output location is configured for a copy-mode run
pub const DEFAULT_OUTPUT_SUFFIX: &str = "-transformed";
