//! Console output helpers for the codecull CLI.

use std::io::{self, Write};

use codecull_rs::core::pipeline::CurationOutcome;
use codecull_rs::{LmTask, PathSet};

/// Print the curated path list to stdout, one path per line.
pub fn print_path_list(paths: &PathSet) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for path in paths {
        writeln!(out, "{}", path.display())?;
    }
    Ok(())
}

/// Print the run summary to stderr so it never mixes with the path
/// list on stdout.
pub fn print_summary(outcome: &CurationOutcome, lm_task: LmTask) {
    if outcome.cancelled {
        eprintln!("Curation cancelled; partial results above");
        return;
    }

    if let Some(stats) = &outcome.stats {
        eprintln!("{stats}");
    }

    let task = match lm_task {
        LmTask::Causal => "causal",
        LmTask::Masked => "masked",
    };
    eprintln!(
        "Curated {} files for {task} LM training",
        outcome.paths.len()
    );
}
