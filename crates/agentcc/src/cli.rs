//! Command-line entry point shared by all three tools.

use std::process::ExitCode;

use agentcc_config::load_settings;
use clap::{Arg, ArgAction, CommandFactory, FromArgMatches, Parser};
use console::Style;

use crate::error::{ExchangeError, Result};
use crate::exchange::{CLEAR_COMMAND, Exchange};
use crate::logging;
use crate::variant::Variant;

/// Printed after a successful `/clear`.
const CLEARED_MESSAGE: &str = "Context cleared.";

/// Arguments: a single free-text prompt.
///
/// Help and version are long-only and the prompt accepts leading hyphens,
/// so prompts like `-1 plus 1?` or `-v` are sent as written.
#[derive(Debug, Parser)]
#[command(version, long_about = None, disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Prompt to send, or "/clear" to forget the conversation
    #[arg(value_name = "PROMPT", allow_hyphen_values = true)]
    pub prompt: Option<String>,
}

impl Cli {
    /// Parse the process arguments for `variant`.
    pub fn parse_for(variant: Variant) -> std::result::Result<Self, clap::Error> {
        Self::parse_from_for(variant, std::env::args_os())
    }

    /// Parse `args` (including the program name) for `variant`.
    pub fn parse_from_for<I, T>(variant: Variant, args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = Self::command()
            .name(variant.binary_name())
            .bin_name(variant.binary_name())
            .about(variant.about())
            .arg(
                Arg::new("help")
                    .long("help")
                    .action(ArgAction::Help)
                    .help("Print help"),
            )
            .arg(
                Arg::new("version")
                    .long("version")
                    .action(ArgAction::Version)
                    .help("Print version"),
            )
            .try_get_matches_from(args)?;
        Self::from_arg_matches(&matches)
    }
}

/// Run one invocation of `variant` and return the process exit code.
pub async fn run(variant: Variant) -> ExitCode {
    let cli = match Cli::parse_for(variant) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let prompt = match cli.prompt {
        Some(prompt) if !prompt.is_empty() => prompt,
        _ => {
            println!("{}", variant.usage());
            return ExitCode::FAILURE;
        }
    };

    let _guard = match logging::init(variant.binary_name()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Warning: {:#}", e);
            None
        }
    };

    match execute(variant, &prompt).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!(error = ?err, "Exchange failed");
            report(variant, &err);
            ExitCode::FAILURE
        }
    }
}

/// Clear the context or run an exchange; returns what to print.
async fn execute(variant: Variant, prompt: &str) -> Result<String> {
    let exchange = Exchange::new(variant.store()?);

    if prompt == CLEAR_COMMAND {
        exchange.clear()?;
        return Ok(CLEARED_MESSAGE.to_string());
    }

    let loaded = load_settings();
    if let Some(ref source) = loaded.source {
        tracing::debug!(path = %source.display(), "Loaded settings");
    }
    exchange
        .run(prompt, || variant.resolve_backend(&loaded.settings))
        .await
}

fn report(variant: Variant, err: &ExchangeError) {
    let report = variant.failure_report(err);
    let red = Style::new().red().for_stderr();
    eprintln!("{} {}", red.apply_to("Error:"), report.headline);
    for line in &report.details {
        eprintln!("{}", line);
    }
}
