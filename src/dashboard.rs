//! Interactive dashboard loop and selection state.
//!
//! The selection state mirrors the row-click behavior of the summary
//! table: picking a year makes the drill-down visible, and `back`
//! dismisses it again.

use crate::analysis::{distinct_years, summarize_by_year, summarize_job_titles};
use crate::chat::{CompletionClient, FALLBACK_REPLY};
use crate::models::SalaryRecord;
use crate::report::{render_title_table, render_year_table};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::warn;

/// Presentation state: which year is selected and whether the
/// drill-down is visible. Not part of the aggregation contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected_year: Option<u16>,
    drilldown_visible: bool,
}

impl Selection {
    /// Initial state: no selection, drill-down hidden.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a year and show the drill-down.
    pub fn select(&mut self, year: u16) {
        self.selected_year = Some(year);
        self.drilldown_visible = true;
    }

    /// Dismiss the drill-down and clear the selection.
    pub fn dismiss(&mut self) {
        self.selected_year = None;
        self.drilldown_visible = false;
    }

    /// The currently selected year, if any.
    pub fn selected_year(&self) -> Option<u16> {
        self.selected_year
    }

    /// Whether the drill-down is visible.
    pub fn is_drilldown_visible(&self) -> bool {
        self.drilldown_visible
    }
}

/// Run the interactive dashboard loop over stdin.
///
/// Commands: a year selects it and shows the drill-down, `back`
/// dismisses, `ask <question>` queries the completion service (when a
/// client is configured), `help` reprints the commands, `quit` exits.
pub async fn run_interactive(
    records: &[SalaryRecord],
    max_title_rows: usize,
    chat: Option<&CompletionClient>,
) -> Result<()> {
    let summaries = summarize_by_year(records);
    let mut selection = Selection::new();

    println!("\n📊 Tech Jobs and Salary Details\n");
    print!("{}", render_year_table(&summaries));
    print_help();

    let stdin = std::io::stdin();
    loop {
        print!("salaryboard> ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            // EOF
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            "quit" | "exit" => break,
            "help" => print_help(),
            "back" => {
                selection.dismiss();
                print!("{}", render_year_table(&summaries));
            }
            _ => {
                if let Some(question) = input.strip_prefix("ask ") {
                    handle_ask(question.trim(), records, chat).await;
                } else if let Ok(year) = input.parse::<u16>() {
                    selection.select(year);
                    if !distinct_years(records).contains(&year) {
                        println!("No records for year {}.", year);
                    }
                    println!("\nTotal Jobs for Year {}", year);
                    print!(
                        "{}",
                        render_title_table(&summarize_job_titles(records, year), max_title_rows)
                    );
                } else {
                    println!("Unrecognized command: {} (try 'help')", input);
                }
            }
        }
    }

    Ok(())
}

async fn handle_ask(question: &str, records: &[SalaryRecord], chat: Option<&CompletionClient>) {
    if question.is_empty() {
        println!("Usage: ask <question>");
        return;
    }

    let Some(client) = chat else {
        println!("No API key configured; set OPENAI_API_KEY to enable questions.");
        return;
    };

    match client.ask(question, records).await {
        Ok(answer) => println!("{}", answer),
        Err(e) => {
            warn!("Completion request failed: {}", e);
            println!("{}", FALLBACK_REPLY);
        }
    }
}

fn print_help() {
    println!("\nCommands:");
    println!("  <year>          drill down into a year's job titles");
    println!("  back            dismiss the drill-down");
    println!("  ask <question>  ask the completion service about the data");
    println!("  help            show this help");
    println!("  quit            exit\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_starts_hidden() {
        let selection = Selection::new();
        assert_eq!(selection.selected_year(), None);
        assert!(!selection.is_drilldown_visible());
    }

    #[test]
    fn test_select_shows_drilldown() {
        let mut selection = Selection::new();
        selection.select(2021);

        assert_eq!(selection.selected_year(), Some(2021));
        assert!(selection.is_drilldown_visible());
    }

    #[test]
    fn test_reselect_replaces_year() {
        let mut selection = Selection::new();
        selection.select(2021);
        selection.select(2022);

        assert_eq!(selection.selected_year(), Some(2022));
        assert!(selection.is_drilldown_visible());
    }

    #[test]
    fn test_dismiss_returns_to_initial_state() {
        let mut selection = Selection::new();
        selection.select(2021);
        selection.dismiss();

        assert_eq!(selection, Selection::new());
    }
}
