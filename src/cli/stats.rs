//! Stats command.
//!
//! Queries a running server for today's statistics.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::protocol::StatisticsResponse;

/// Options for the stats command.
#[derive(Debug, Clone, Default)]
pub struct StatsOptions {
    /// Output as JSON.
    pub json: bool,
}

/// Output format for the stats command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOutput {
    /// Whether the query succeeded.
    pub success: bool,
    /// Today's statistics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<StatisticsResponse>,
    /// Error message if the query failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The stats command implementation.
pub struct StatsCommand {
    client: Client,
}

impl StatsCommand {
    /// Create a new stats command.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Run the stats command.
    pub fn run(&self) -> StatsOutput {
        match self.client.statistics() {
            Ok(stats) => StatsOutput {
                success: true,
                statistics: Some(stats),
                error: None,
            },
            Err(e) => StatsOutput {
                success: false,
                statistics: None,
                error: Some(format!("{} ({})", e, self.client.address())),
            },
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &StatsOutput, options: &StatsOptions) -> String {
        if options.json {
            return serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string());
        }

        match &output.statistics {
            Some(stats) if output.success => format_statistics(stats),
            _ => format!(
                "Stats failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}

/// Human-readable statistics block.
pub fn format_statistics(stats: &StatisticsResponse) -> String {
    let mut lines = vec![
        "Statistics".to_string(),
        "----------".to_string(),
        String::new(),
        format!("Players: {}", stats.num_players),
        format!("Winners: {:.1}%", stats.winners_percentage),
        format!("Average Guesses: {:.1}", stats.average_guesses),
    ];

    if !stats.guess_distribution.is_empty() {
        lines.push(String::new());
        lines.push("Guess Distribution:".to_string());
        for (guesses, players) in &stats.guess_distribution {
            lines.push(format!("{} guesses: {} player(s)", guesses, players));
        }
    }

    lines.join("\n") + "\n"
}
