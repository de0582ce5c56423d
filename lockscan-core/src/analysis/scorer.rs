use crate::locks::{DigitSet, LockProfile};

pub const CANDIDATE_COUNT: usize = 120;

/// Three distinct digits, stored ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate([u8; 3]);

impl Candidate {
    pub fn new(mut digits: [u8; 3]) -> Option<Self> {
        digits.sort_unstable();
        if digits[2] > 9 || digits[0] == digits[1] || digits[1] == digits[2] {
            return None;
        }
        Some(Self(digits))
    }

    pub fn digits(&self) -> [u8; 3] {
        self.0
    }

    pub fn set(&self) -> DigitSet {
        DigitSet::from_digits(&self.0)
    }

    /// "1-4-7"
    pub fn joined(&self, sep: &str) -> String {
        self.0.iter().map(|d| d.to_string()).collect::<Vec<_>>().join(sep)
    }
}

/// All C(10,3) subsets in ascending lexicographic order. Tie-breaks downstream
/// depend on this order.
pub fn candidates() -> Vec<Candidate> {
    let mut out = Vec::with_capacity(CANDIDATE_COUNT);
    for a in 0..10u8 {
        for b in (a + 1)..10 {
            for c in (b + 1)..10 {
                out.push(Candidate([a, b, c]));
            }
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRecord {
    pub candidate: Candidate,
    /// Locks sharing at least one digit with the candidate.
    pub any: u32,
    /// Locks holding a pair made only of candidate digits.
    pub both: u32,
    /// Locks containing all three candidate digits.
    pub all3: u32,
}

pub fn score_candidate(candidate: Candidate, locks: &[LockProfile]) -> ScoreRecord {
    let set = candidate.set();
    let mut record = ScoreRecord {
        candidate,
        any: 0,
        both: 0,
        all3: 0,
    };
    for lock in locks {
        if set.intersects(lock.digits) {
            record.any += 1;
        }
        if set.is_subset_of(lock.digits) {
            record.all3 += 1;
        }
        if lock.pairs.iter().any(|pair| pair.is_subset_of(set)) {
            record.both += 1;
        }
    }
    record
}

/// Scores in enumeration order.
pub fn score_all(locks: &[LockProfile]) -> Vec<ScoreRecord> {
    candidates()
        .into_iter()
        .map(|c| score_candidate(c, locks))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locks::lock_profiles;
    use lockscan_db::models::LockSize;
    use std::collections::HashSet;

    #[test]
    fn test_candidate_enumeration() {
        let all = candidates();
        assert_eq!(all.len(), CANDIDATE_COUNT);
        let distinct: HashSet<[u8; 3]> = all.iter().map(|c| c.digits()).collect();
        assert_eq!(distinct.len(), CANDIDATE_COUNT);
        assert!(all.iter().all(|c| {
            let [a, b, c] = c.digits();
            a < b && b < c && c <= 9
        }));
        assert_eq!(all[0].digits(), [0, 1, 2]);
        assert_eq!(all[1].digits(), [0, 1, 3]);
        assert_eq!(all[CANDIDATE_COUNT - 1].digits(), [7, 8, 9]);
        assert!(all.windows(2).all(|w| w[0].digits() < w[1].digits()));
    }

    #[test]
    fn test_candidate_new() {
        assert_eq!(Candidate::new([5, 1, 3]).unwrap().digits(), [1, 3, 5]);
        assert!(Candidate::new([1, 1, 3]).is_none());
        assert!(Candidate::new([1, 2, 10]).is_none());
        assert_eq!(Candidate::new([9, 0, 4]).unwrap().joined("-"), "0-4-9");
    }

    #[test]
    fn test_metrics_on_known_locks() {
        // lock 1: pairs 12 34 ; lock 2: pairs 15 67
        let locks = lock_profiles(&[(1, 2), (3, 4), (1, 5), (6, 7)], LockSize::new(2).unwrap());
        let c = Candidate::new([1, 2, 3]).unwrap();
        let r = score_candidate(c, &locks);
        assert_eq!(r.any, 2);
        assert_eq!(r.both, 1);
        assert_eq!(r.all3, 1);

        let r = score_candidate(Candidate::new([1, 5, 9]).unwrap(), &locks);
        assert_eq!((r.any, r.both, r.all3), (2, 1, 0));

        let r = score_candidate(Candidate::new([0, 8, 9]).unwrap(), &locks);
        assert_eq!((r.any, r.both, r.all3), (0, 0, 0));
    }

    #[test]
    fn test_all3_never_exceeds_any() {
        let pairs: Vec<(u8, u8)> = (0..37u8).map(|i| ((i * 3) % 10, (i * 7 + 1) % 10)).collect();
        let locks = lock_profiles(&pairs, LockSize::new(3).unwrap());
        for r in score_all(&locks) {
            assert!(r.all3 <= r.any);
            assert!(r.any as usize <= locks.len());
            assert!(r.both as usize <= locks.len());
        }
    }

    #[test]
    fn test_no_locks_scores_zero() {
        let scores = score_all(&[]);
        assert_eq!(scores.len(), CANDIDATE_COUNT);
        assert!(scores.iter().all(|r| r.any == 0 && r.both == 0 && r.all3 == 0));
    }
}
