use std::path::PathBuf;

/// Default cap on the number of accounts in one root email update run.
pub const DEFAULT_ROOT_EMAIL_BATCH_LIMIT: usize = 15;

/// Session settings assembled from command-line flags and their environment
/// fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Named AWS profile; the SDK default chain is used when absent.
    pub profile: Option<String>,
    /// AWS region override.
    pub region: Option<String>,
    /// Directory receiving generated reports.
    pub report_dir: PathBuf,
    /// Maximum number of accounts accepted by a root email update run.
    pub root_email_batch_limit: usize,
    /// Whether terminal output is styled with ANSI codes.
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profile: None,
            region: None,
            report_dir: PathBuf::from("."),
            root_email_batch_limit: DEFAULT_ROOT_EMAIL_BATCH_LIMIT,
            color: false,
        }
    }
}
