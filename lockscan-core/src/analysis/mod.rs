pub mod running;
pub mod scorer;
pub mod selector;

use lockscan_db::models::{Draw, LockSize, Top3};

use crate::locks::lock_profiles;
use crate::parser::parse_results;
use running::{RunningNumber, running_number};
use scorer::{ScoreRecord, score_all};
use selector::{Selection, full_coverage, select};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboReport {
    pub lock_size: LockSize,
    /// Rounds left after removing doubles.
    pub total_rounds: usize,
    pub total_locks: u32,
    pub last_lock_len: usize,
    pub selection: Selection,
}

impl ComboReport {
    pub fn last_lock_is_short(&self) -> bool {
        self.last_lock_len != self.lock_size.get()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComboAnalysis {
    /// Every input value ended in a double.
    AllDoubles { found: usize },
    NoFullCoverage { total_locks: u32 },
    Recommended(ComboReport),
}

/// Full-coverage candidates of one input, ranked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTable {
    /// Rounds left after removing doubles.
    pub total_rounds: usize,
    pub total_locks: u32,
    pub last_lock_len: usize,
    pub ranked: Vec<ScoreRecord>,
}

/// Scores the tens/units pair of every non-double top three.
/// `None` when no usable pair is left.
pub fn score_table(top3s: &[Top3], lock_size: LockSize) -> Option<ScoreTable> {
    let pairs: Vec<(u8, u8)> = top3s
        .iter()
        .filter(|t| !t.is_double())
        .map(|t| t.tail_pair())
        .collect();

    let locks = lock_profiles(&pairs, lock_size);
    let last_lock_len = locks.last()?.len();
    let total_locks = locks.len() as u32;
    let scores = score_all(&locks);

    Some(ScoreTable {
        total_rounds: pairs.len(),
        total_locks,
        last_lock_len,
        ranked: full_coverage(&scores, total_locks),
    })
}

/// The combination formula. `None` when there is nothing to partition.
pub fn analyze_combos(top3s: &[Top3], lock_size: LockSize) -> Option<ComboAnalysis> {
    if top3s.is_empty() {
        return None;
    }
    let Some(table) = score_table(top3s, lock_size) else {
        return Some(ComboAnalysis::AllDoubles { found: top3s.len() });
    };
    let Some(selection) = select(&table.ranked) else {
        return Some(ComboAnalysis::NoFullCoverage {
            total_locks: table.total_locks,
        });
    };

    Some(ComboAnalysis::Recommended(ComboReport {
        lock_size,
        total_rounds: table.total_rounds,
        total_locks: table.total_locks,
        last_lock_len: table.last_lock_len,
        selection,
    }))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub lock_size: LockSize,
    pub combos: Option<ComboAnalysis>,
    pub running: Option<RunningNumber>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing recognisable in the input.
    NoInput,
    /// Input parsed, but neither formula had anything to say. The combination
    /// formula reports on any non-empty input, so today this only guards
    /// formula sets where every member can decline.
    NothingActionable,
    Analyzed(Analysis),
}

impl Outcome {
    fn from_parts(
        lock_size: LockSize,
        combos: Option<ComboAnalysis>,
        running: Option<RunningNumber>,
    ) -> Self {
        if combos.is_none() && running.is_none() {
            return Outcome::NothingActionable;
        }
        Outcome::Analyzed(Analysis {
            lock_size,
            combos,
            running,
        })
    }
}

pub fn analyze_text(text: &str, lock_size: LockSize) -> Outcome {
    let Some(parsed) = parse_results(text) else {
        return Outcome::NoInput;
    };
    log::debug!("Parsed {} results (paired: {})", parsed.len(), !parsed.draws().is_empty());

    let combos = analyze_combos(&parsed.top3s(), lock_size);
    let running = running_number(parsed.draws(), lock_size);
    Outcome::from_parts(lock_size, combos, running)
}

/// Same formulas over already-structured draws, e.g. from the daily feed.
pub fn analyze_draws(draws: &[Draw], lock_size: LockSize) -> Outcome {
    if draws.is_empty() {
        return Outcome::NoInput;
    }
    let top3s: Vec<Top3> = draws.iter().map(|d| d.top3).collect();
    let combos = analyze_combos(&top3s, lock_size);
    let running = running_number(draws, lock_size);
    Outcome::from_parts(lock_size, combos, running)
}
