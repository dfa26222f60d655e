use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use stainarea_core::result::CalculationResult;
use stainarea_core::session::CalculationSession;

use crate::settings::{load_config, GlobalArgs};
use crate::summary::{print_history_summary, print_history_table, print_result};

#[derive(Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub action: HistoryAction,
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List recorded results, most recent first
    List {
        /// Show at most N results
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show one result in detail
    Show {
        /// Result id or a unique prefix of it
        id: String,
    },
    /// Remove one result
    Remove {
        /// Result id or a unique prefix of it
        id: String,
    },
    /// Remove every result
    Clear {
        /// Confirm removal of all results
        #[arg(long)]
        yes: bool,
    },
    /// Averages over all recorded results
    Summary,
}

/// Find the single result whose id starts with `prefix`.
fn find_by_prefix(results: &[CalculationResult], prefix: &str) -> Result<CalculationResult> {
    let prefix = prefix.to_ascii_lowercase();
    let matches: Vec<&CalculationResult> = results
        .iter()
        .filter(|r| r.id.to_string().starts_with(&prefix))
        .collect();
    match matches.as_slice() {
        [one] => Ok((*one).clone()),
        [] => bail!("No result with id {prefix}"),
        _ => bail!("Id prefix {prefix} is ambiguous ({} matches)", matches.len()),
    }
}

pub fn run(args: &HistoryArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let session = CalculationSession::from_config(&config)?;
    let results = session.list_results();

    match &args.action {
        HistoryAction::List { limit } => {
            let shown = limit.unwrap_or(results.len()).min(results.len());
            print_history_table(&results[..shown]);
            if shown < results.len() {
                println!("\n{} of {} results shown", shown, results.len());
            }
        }
        HistoryAction::Show { id } => {
            let result = find_by_prefix(&results, id)?;
            print_result(&result);
        }
        HistoryAction::Remove { id } => {
            let result = find_by_prefix(&results, id)?;
            session.remove_result(&result.id);
            println!("Removed {} ({})", result.id, result.image_name);
        }
        HistoryAction::Clear { yes } => {
            if !yes {
                bail!(
                    "Refusing to remove {} results without --yes",
                    results.len()
                );
            }
            session.clear_results();
            println!("Removed {} results", results.len());
        }
        HistoryAction::Summary => {
            print_history_summary(&session.summary());
        }
    }

    Ok(())
}
