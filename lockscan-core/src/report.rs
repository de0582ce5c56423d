use crate::analysis::running::RunningNumber;
use crate::analysis::scorer::ScoreRecord;
use crate::analysis::{Analysis, ComboAnalysis, ComboReport};
use crate::markup::Markup;

pub const DIGIT_SEPARATOR: &str = "-";

/// Line between the two formula sections.
pub fn section_separator() -> String {
    format!("\n\n{}\n\n", "═".repeat(25))
}

pub fn render_combos(combos: &ComboAnalysis, markup: Markup) -> String {
    match combos {
        ComboAnalysis::AllDoubles { found } => markup.text(&format!(
            "Found {} sets but all of them are doubles, nothing to analyze (formula 1)",
            found
        )),
        ComboAnalysis::NoFullCoverage { total_locks } => markup.text(&format!(
            "No 3-digit set covers every lock ({}/{})",
            total_locks, total_locks
        )),
        ComboAnalysis::Recommended(report) => render_recommendation(report, markup),
    }
}

fn render_recommendation(report: &ComboReport, markup: Markup) -> String {
    let n = report.total_locks;
    let selection = &report.selection;
    let mut lines = Vec::new();

    lines.push(format!("📊 {}", markup.bold("Formula 1: 3-digit set analysis")));
    let short = if report.last_lock_is_short() {
        format!(" (lock {} has {} rounds)", n, report.last_lock_len)
    } else {
        String::new()
    };
    lines.push(markup.text(&format!(
        "From rounds 1–{} (locks 1–{}{})",
        report.total_rounds, n, short
    )));
    lines.push(format!(
        "Looks only at the {} of the top three\n",
        markup.bold("tens + units")
    ));

    lines.push("Three criteria per lock:".to_string());
    lines.push(format!("{} = at least one digit of the set appears", markup.bold("ANY")));
    lines.push(format!(
        "{} = a round has both of its last two digits in the set",
        markup.bold("BOTH")
    ));
    lines.push(format!("{} = the lock holds all 3 digits of the set\n", markup.bold("ALL3")));

    lines.push(markup.bold("Recommended sets (19-door top run):"));
    lines.push(format!(
        "{} covers every lock, highest ALL3 ({}/{})",
        markup.bold(&format!("Primary 1: {}", joined(&selection.primary_all3))),
        selection.primary_all3.all3,
        n
    ));
    lines.push(format!(
        "{} covers every lock, highest BOTH ({}/{})",
        markup.bold(&format!("Primary 2: {}", joined(&selection.primary_both))),
        selection.primary_both.both,
        n
    ));
    if let Some(supplement) = &selection.supplement {
        lines.push(format!(
            "{} BOTH {}/{}",
            markup.bold(&format!("Supplement: {}", joined(supplement))),
            supplement.both,
            n
        ));
    }

    if !selection.others.is_empty() {
        let others: Vec<String> = selection
            .others
            .iter()
            .map(|r| r.candidate.joined(""))
            .collect();
        lines.push(format!("\n{} {}", markup.bold("Other options:"), others.join(", ")));
    }

    lines.join("\n")
}

fn joined(record: &ScoreRecord) -> String {
    record.candidate.joined(DIGIT_SEPARATOR)
}

pub fn render_running(running: &RunningNumber, markup: Markup) -> String {
    let mut lines = Vec::new();
    lines.push(format!("📊 {}", markup.bold("Formula 2: running number")));
    lines.push("─".repeat(20));
    lines.push(format!("From the latest {}-round lock:", running.lock.len()));

    let block: Vec<String> = running
        .lock
        .iter()
        .map(|d| {
            let prefix = d
                .round
                .filter(|&r| r != 0)
                .map(|r| format!("{:>3}: ", r))
                .unwrap_or_default();
            markup.code(&format!("{}{} - {}", prefix, d.top3, d.bottom2))
        })
        .collect();
    lines.push(block.join("\n"));

    lines.push(format!(
        "\n→ {} {} (suggested for the 19-door top run)",
        markup.bold("Result:"),
        markup.code(&running.joined(DIGIT_SEPARATOR))
    ));
    lines.join("\n")
}

/// Formula sections joined by [`section_separator`]; `None` when both are absent.
pub fn assemble(sections: impl IntoIterator<Item = String>) -> Option<String> {
    let parts: Vec<String> = sections.into_iter().collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(&section_separator()))
    }
}

pub fn render(analysis: &Analysis, markup: Markup) -> Option<String> {
    let combos = analysis.combos.as_ref().map(|c| render_combos(c, markup));
    let running = analysis.running.as_ref().map(|r| render_running(r, markup));
    assemble(combos.into_iter().chain(running))
}
