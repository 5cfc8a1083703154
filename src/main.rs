//! Daily Wordle
//!
//! CLI entry point with global panic handler.

use std::io::{self, Write};
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use daily_wordle::cli::{
    PlayCommand, ServeCommand, ServeOptions, StatsCommand, StatsOptions, WordCommand, WordOptions,
};
use daily_wordle::client::Client;
use daily_wordle::config::{wordle_home, Config};
use daily_wordle::error::exit_codes;

// =============================================================================
// CLI Definition
// =============================================================================

/// Daily Wordle - one shared word per day, six guesses each
#[derive(Parser)]
#[command(name = "wordle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// [Server] Accept players and keep today's statistics
    Serve {
        /// Address to listen on (overrides config)
        #[arg(long, short)]
        address: Option<String>,
        /// Keep statistics in memory only
        #[arg(long)]
        ephemeral: bool,
    },

    /// [Player] Play today's game in the terminal
    Play {
        /// Server address (overrides config)
        #[arg(long, short)]
        address: Option<String>,
    },

    /// [Player] Show today's statistics from a running server
    Stats {
        /// Server address (overrides config)
        #[arg(long, short)]
        address: Option<String>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
    },

    /// [Operator] Show the word selected for a date
    Word {
        /// Date as YYYY-MM-DD (defaults to today)
        #[arg(long, short)]
        date: Option<NaiveDate>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
    },
}

// =============================================================================
// Main
// =============================================================================

fn main() -> ExitCode {
    setup_panic_handler();
    init_tracing();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("wordle error: {}", e);
            ExitCode::from(exit_codes::ERROR as u8)
        }
    }
}

/// Logs go to stderr so they never interleave with the game on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("daily_wordle=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Whether a panic on the named thread ends the process.
///
/// Only the main thread exits. A connection thread unwinds alone and the
/// server keeps serving every other session.
fn exits_on_panic(thread_name: Option<&str>) -> bool {
    thread_name == Some("main")
}

/// Set up the global panic handler.
///
/// On panic, appends to ~/.wordle/crash.log. Panics on the main thread then
/// exit with the crash code.
fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        let thread = std::thread::current();
        let name = thread.name();
        eprintln!("wordle panic on {}: {}", name.unwrap_or("<unnamed>"), info);

        if let Some(home) = wordle_home() {
            let crash_log = home.join("crash.log");
            if let Ok(mut file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&crash_log)
            {
                let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
                let _ = writeln!(
                    file,
                    "[{}] {}: {}",
                    timestamp,
                    name.unwrap_or("<unnamed>"),
                    info
                );
            }
        }

        if exits_on_panic(name) {
            std::process::exit(exit_codes::CRASH);
        }
    }));
}

/// Run the CLI and return the exit code.
fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load();

    match cli.command {
        Commands::Serve { address, ephemeral } => run_serve(config, address, ephemeral),
        Commands::Play { address } => run_play(&config, address),
        Commands::Stats { address, json } => run_stats(&config, address, json),
        Commands::Word { date, json } => run_word(config, date, json),
    }
}

fn success_to_exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::from(exit_codes::SUCCESS as u8)
    } else {
        ExitCode::from(exit_codes::ERROR as u8)
    }
}

fn client_for(config: &Config, address: Option<String>) -> Client {
    Client::new(address.unwrap_or_else(|| config.server.address.clone()))
}

fn run_serve(
    config: Config,
    address: Option<String>,
    ephemeral: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let options = ServeOptions { address, ephemeral };
    ServeCommand::new(config).run(&options)?;
    Ok(success_to_exit_code(true))
}

fn run_play(
    config: &Config,
    address: Option<String>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cmd = PlayCommand::new(client_for(config, address));
    cmd.run(io::stdin().lock(), io::stdout().lock())?;
    Ok(success_to_exit_code(true))
}

fn run_stats(
    config: &Config,
    address: Option<String>,
    json: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cmd = StatsCommand::new(client_for(config, address));
    let options = StatsOptions { json };
    let output = cmd.run();

    print!("{}", cmd.format_output(&output, &options));
    Ok(success_to_exit_code(output.success))
}

fn run_word(
    config: Config,
    date: Option<NaiveDate>,
    json: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cmd = WordCommand::new(config);
    let options = WordOptions { date, json };
    let output = cmd.run(&options);

    print!("{}", cmd.format_output(&output, &options));
    Ok(success_to_exit_code(output.success))
}

// =============================================================================
// Tests
// =============================================================================
