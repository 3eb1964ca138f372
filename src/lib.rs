use clap::{Args, Parser, Subcommand};
use jira_api::IssueCreator;
use log::{debug, error, info, warn};
use std::fs::File;
use std::fmt;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

mod config;
mod events;
pub use config::{Config, ConfigManager};
pub use events::{read_events, EventLine, EventReader};

/// Files scanner findings as Jira issues.
#[derive(Parser)]
#[command(name = "jira-reporter", version, about)]
pub struct Cli {
    /// Config file; defaults to the platform config directory.
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// API token, overriding the one stored in the config file.
    #[arg(long, env = "JIRA_REPORTER_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl fmt::Debug for Cli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cli")
            .field("config", &self.config)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("command", &self.command)
            .finish()
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create one issue per result event.
    Report(ReportArgs),
    /// Verify the configured credentials against `/myself`.
    Check,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// JSON-lines file of result events; reads stdin when omitted.
    pub events: Option<PathBuf>,

    /// Print the issues instead of creating them.
    #[arg(long)]
    pub dry_run: bool,
}

/// Outcome counters of a report run. Dry runs count `printed`, never `created`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub created: usize,
    pub printed: usize,
    pub failed: usize,
}

impl ReportSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Initializes logging and executes the parsed command. Returns whether every
/// step succeeded.
pub async fn run(cli: Cli) -> Result<bool, String> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();

    let manager = match &cli.config {
        Some(path) => ConfigManager::from_path(path),
        None => ConfigManager::new()?,
    };
    debug!("Loading config from {}", manager.path().display());
    let config = manager.load(cli.token.as_deref())?;
    let creator = IssueCreator::new(config.to_jira_config())
        .map_err(|err| format!("Failed to initialize Jira client: {err}"))?;

    match cli.command {
        Command::Check => check(&creator).await.map(|_| true),
        Command::Report(args) => {
            let input: Box<dyn BufRead> = match &args.events {
                Some(path) => {
                    let file = File::open(path)
                        .map_err(|err| format!("Failed to open {}: {err}", path.display()))?;
                    Box::new(BufReader::new(file))
                }
                None => Box::new(io::stdin().lock()),
            };
            let stdout = io::stdout();
            let summary =
                report_events(&creator, read_events(input), args.dry_run, &mut stdout.lock())
                    .await;
            if args.dry_run {
                info!(
                    "Dry run finished: {} printed, {} failed",
                    summary.printed, summary.failed
                );
            } else {
                info!(
                    "Report finished: {} created, {} failed",
                    summary.created, summary.failed
                );
            }
            Ok(summary.is_success())
        }
    }
}

async fn check(creator: &IssueCreator) -> Result<(), String> {
    let profile = creator
        .client()
        .get_myself()
        .await
        .map_err(|err| format!("Credential check failed: {err}"))?;
    let configured = &creator.config().account_id;
    if profile.account_id.as_deref() != Some(configured.as_str()) {
        warn!(
            "Authenticated account differs from configured account-id {}",
            configured
        );
    }
    info!("Authenticated as {}", profile.label());
    Ok(())
}

/// Creates one issue per parsed event, sequentially, as lines arrive.
/// Failures are logged and counted; they never stop the run.
pub async fn report_events<I, W>(
    creator: &IssueCreator,
    lines: I,
    dry_run: bool,
    out: &mut W,
) -> ReportSummary
where
    I: IntoIterator<Item = EventLine>,
    W: Write,
{
    let mut summary = ReportSummary::default();
    for line in lines {
        let event = match line.event {
            Ok(event) => event,
            Err(err) => {
                error!("{err}");
                summary.failed += 1;
                continue;
            }
        };

        if dry_run {
            let issue = creator.build_issue(&event);
            if let Err(err) = writeln!(
                out,
                "== {}\n{}",
                issue.fields.summary, issue.fields.description
            ) {
                error!("Failed to write dry-run output: {err}");
                summary.failed += 1;
                continue;
            }
            summary.printed += 1;
            continue;
        }

        match creator.create_issue(&event).await {
            Ok(()) => summary.created += 1,
            Err(err) => {
                error!(
                    "Failed to create issue for line {} ({} on {}): {err}",
                    line.line_number, event.template_id, event.host
                );
                summary.failed += 1;
            }
        }
    }
    summary
}
