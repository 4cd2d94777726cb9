use std::path::PathBuf;

use aws_contacts_manager::backend::aws::AwsBackend;
use aws_contacts_manager::config::{DEFAULT_ROOT_EMAIL_BATCH_LIMIT, Settings};
use aws_contacts_manager::prompt::TerminalPrompter;
use aws_contacts_manager::shell::Shell;
use aws_contacts_manager::{ManagerError, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging(&cli.log_level)?;

    let settings = cli.settings();
    let backend = AwsBackend::connect(settings.profile.as_deref(), settings.region.as_deref())?;
    let mut shell = Shell::new(backend, TerminalPrompter, settings);
    shell.run()
}

fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("aws_contacts_manager={default_level}")))
        .map_err(|err| ManagerError::Logging(err.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| ManagerError::Logging(err.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Batch-manage AWS account alternate contacts, primary contact information and root email addresses across an AWS Organization."
)]
struct Cli {
    /// Named AWS profile to use instead of the default credential chain.
    #[arg(long, env = "AWS_PROFILE")]
    profile: Option<String>,

    /// AWS region for the service clients.
    #[arg(long, env = "AWS_REGION")]
    region: Option<String>,

    /// Directory the contacts report is written to.
    #[arg(long, env = "CONTACTS_MANAGER_REPORT_DIR", default_value = ".")]
    report_dir: PathBuf,

    /// Maximum number of accounts accepted by one root email update run.
    #[arg(
        long,
        env = "CONTACTS_MANAGER_ROOT_EMAIL_BATCH_LIMIT",
        default_value_t = DEFAULT_ROOT_EMAIL_BATCH_LIMIT
    )]
    root_email_batch_limit: usize,

    /// Disable ANSI styling of terminal output.
    #[arg(long)]
    no_color: bool,

    /// Log level used when `RUST_LOG` is not set.
    #[arg(long, env = "CONTACTS_MANAGER_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            profile: self.profile.clone(),
            region: self.region.clone(),
            report_dir: self.report_dir.clone(),
            root_email_batch_limit: self.root_email_batch_limit,
            color: !self.no_color && std::io::stdout().is_terminal(),
        }
    }
}
