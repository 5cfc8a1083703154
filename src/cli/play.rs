//! Play command: interactive console client.

use std::io::{BufRead, Write};

use crate::cli::stats::format_statistics;
use crate::client::Client;
use crate::core::{Word, GUESS_LIMIT};
use crate::error::Result;
use crate::protocol::GuessResponse;

const BANNER: &str = "\
+-------------------+
| W O R D L E   D   |
+-------------------+

You have 6 chances to guess a 5-letter word.
Each guess must be a 'playable' 5 letter word.
After a guess the game will display a series of
characters to show you how good your guess was.
x - means the letter above is not in the word.
? - means the letter should be in another spot.
* - means the letter is correct in this spot.
";

/// How an interactive game went.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaySummary {
    /// Counted guesses.
    pub guesses: u32,
    pub won: bool,
    /// False when input ran out before the game ended.
    pub finished: bool,
}

/// The play command implementation.
pub struct PlayCommand {
    client: Client,
}

impl PlayCommand {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Play one game reading guesses from `input`, then show statistics.
    ///
    /// Connection failures are returned; a failed statistics query after the
    /// game is only reported on `output`.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<PlaySummary> {
        writeln!(output, "{}", BANNER)?;

        let mut game = self.client.start_game()?;
        let mut summary = PlaySummary::default();

        while summary.guesses < GUESS_LIMIT {
            write!(output, "({}): ", summary.guesses + 1)?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                break;
            }
            let guess = line.trim().to_lowercase();

            if Word::parse(&guess).is_err() {
                writeln!(output, "Please enter a 5-letter word.")?;
                continue;
            }

            let response = game.guess(&guess)?;
            if response.is_rejected() {
                writeln!(output, "Invalid word. Try again.")?;
                continue;
            }

            summary.guesses += 1;
            write!(output, "{}", render_guess(&response))?;

            if response.is_game_over {
                summary.finished = true;
                summary.won = response.is_correct;
                writeln!(
                    output,
                    "{}",
                    if response.is_correct { "You win!" } else { "Game over!" }
                )?;
                break;
            }
        }
        if let Err(e) = game.close() {
            tracing::debug!("Failed to close game cleanly: {}", e);
        }

        match self.client.statistics() {
            Ok(stats) => write!(output, "\n{}", format_statistics(&stats))?,
            Err(e) => writeln!(output, "Error retrieving statistics: {}", e)?,
        }

        Ok(summary)
    }
}

/// Marks line followed by the three letter lists.
pub fn render_guess(response: &GuessResponse) -> String {
    format!(
        "{}\n\nIncluded: {}\nAvailable: {}\nExcluded: {}\n\n",
        response.marks(),
        response.included_letters.join(","),
        response.unused_letters.join(","),
        response.excluded_letters.join(","),
    )
}
