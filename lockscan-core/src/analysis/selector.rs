use super::scorer::ScoreRecord;

pub const OTHER_OPTIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Highest `all3` among full-coverage candidates.
    pub primary_all3: ScoreRecord,
    /// Highest `both` among full-coverage candidates; may repeat `primary_all3`.
    pub primary_both: ScoreRecord,
    pub supplement: Option<ScoreRecord>,
    pub others: Vec<ScoreRecord>,
}

/// Candidates touching every lock, stably sorted by `(both, all3)` descending.
/// Input order (the enumeration order) settles remaining ties.
pub fn full_coverage(scores: &[ScoreRecord], total_locks: u32) -> Vec<ScoreRecord> {
    let mut ranked: Vec<ScoreRecord> = scores
        .iter()
        .filter(|r| r.any == total_locks)
        .copied()
        .collect();
    ranked.sort_by(|a, b| (b.both, b.all3).cmp(&(a.both, a.all3)));
    ranked
}

/// First element holding the maximum key. `Iterator::max_by_key` keeps the
/// last one, which would not match the ranking order.
fn first_max_by_key<F>(ranked: &[ScoreRecord], key: F) -> Option<ScoreRecord>
where
    F: Fn(&ScoreRecord) -> u32,
{
    let mut best: Option<ScoreRecord> = None;
    for r in ranked {
        if best.is_none_or(|b| key(r) > key(&b)) {
            best = Some(*r);
        }
    }
    best
}

/// `ranked` must come from [`full_coverage`]. Returns `None` when it is empty.
pub fn select(ranked: &[ScoreRecord]) -> Option<Selection> {
    let primary_all3 = first_max_by_key(ranked, |r| r.all3)?;
    let primary_both = first_max_by_key(ranked, |r| r.both)?;

    let chosen = [primary_all3.candidate, primary_both.candidate];
    let supplement = ranked
        .iter()
        .find(|r| !chosen.contains(&r.candidate))
        .copied();

    let others = ranked
        .iter()
        .filter(|r| {
            !chosen.contains(&r.candidate)
                && supplement.is_none_or(|s| s.candidate != r.candidate)
        })
        .take(OTHER_OPTIONS)
        .copied()
        .collect();

    Some(Selection {
        primary_all3,
        primary_both,
        supplement,
        others,
    })
}
