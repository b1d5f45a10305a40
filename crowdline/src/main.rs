#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use crowdconfig::CrowdConfig;
use crowdcontrol::types::{AuthenticationResponse, GroupResponse};
use crowdcontrol::{CrowdClient, Either, Error as CrowdError};
use serde::Serialize;
use std::fmt::Display;
use std::io::{self, BufRead, IsTerminal, Write};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crowdline", about = "A CLI for Atlassian Crowd")]
struct Cli {
    /// Print Crowd's decoded response as JSON
    #[arg(long, global = true)]
    json: bool,
    /// Log requests to stderr (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Authenticate a user; the password is read from the first line of stdin
    Auth {
        /// The username to authenticate
        username: String,
    },
    /// Check whether a user is a direct member of a group
    Member {
        /// The username
        username: String,
        /// The group name
        group: String,
    },
    /// Print the location of the config file
    ConfigPath,
    /// Generate shell completions
    #[command(hide = true)]
    Completions {
        /// The shell to generate completions for
        shell: Shell,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn get_client() -> Result<CrowdClient> {
    let config = CrowdConfig::load_or_onboard().with_context(|| "Failed to load crowd config")?;
    let credentials = config
        .credentials()
        .with_context(|| "Invalid Crowd settings in crowd config")?;
    debug!(?credentials, "loaded Crowd settings");

    let client = CrowdClient::new(credentials);
    match config.timeout() {
        Some(timeout) => Ok(client.with_timeout(timeout)?),
        None => Ok(client),
    }
}

fn read_password() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprint!("Password: ");
        io::stderr().flush()?;
    }

    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .with_context(|| "Failed to read password from stdin")?;
    Ok(line.trim_end_matches(|c| c == '\n' || c == '\r').to_string())
}

fn format_user(user: &AuthenticationResponse) -> String {
    let mut output = format!("{} <{}>", user.display_name, user.email);
    if !user.active {
        output.push_str(&" (inactive)".yellow().to_string());
    }
    output
}

fn format_group(username: &str, group: &GroupResponse) -> String {
    let name = group.name.as_deref().unwrap_or("group");
    format!("{} {username} is a direct member of {name}", "yes".green())
}

fn format_rejection(error: &impl Display) -> String {
    error.to_string().red().to_string()
}

/// Prints the outcome and reports whether Crowd accepted the request.
fn report<S, E>(outcome: &Either<S, E>, json: bool, describe: impl FnOnce(&S) -> String) -> Result<bool>
where
    S: Serialize,
    E: Serialize + Display,
{
    if json {
        let rendered = match outcome {
            Either::Value(value) => serde_json::to_string_pretty(value)?,
            Either::Error(error) => serde_json::to_string_pretty(error)?,
        };
        println!("{rendered}");
        return Ok(!outcome.is_error());
    }

    match outcome {
        Either::Value(value) => println!("{}", describe(value)),
        Either::Error(error) => eprintln!("{}", format_rejection(error)),
    }
    Ok(!outcome.is_error())
}

fn handle_error(err: &anyhow::Error) -> ! {
    if let Some(CrowdError::Http(source)) = err.downcast_ref::<CrowdError>() {
        eprintln!("Could not talk to Crowd: {source}");
        process::exit(2);
    }

    eprintln!("{err:#}");
    process::exit(2);
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => handle_error(&err),
    }
}

async fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "crowdline", &mut io::stdout());
            Ok(true)
        }
        Command::ConfigPath => {
            let path = CrowdConfig::path().with_context(|| "Failed to locate crowd config")?;
            println!("{}", path.display());
            Ok(true)
        }
        Command::Auth { username } => {
            let client = get_client()?;
            let password = read_password()?;
            let outcome = client.authenticate(&username, &password).await?;
            report(&outcome, cli.json, format_user)
        }
        Command::Member { username, group } => {
            let client = get_client()?;
            let outcome = client.direct_membership(&username, &group).await?;
            if let Either::Error(error) = &outcome {
                if !cli.json {
                    println!("{} {username} is not a direct member of {group}", "no".red());
                }
                debug!(reason = %error.reason, "membership lookup rejected");
            }
            report(&outcome, cli.json, |found| format_group(&username, found))
        }
    }
}
