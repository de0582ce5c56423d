use lockscan_db::models::{Draw, LockSize};

use crate::locks::last_full_lock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningNumber {
    pub digits: [u8; 3],
    /// The complete lock the digits were taken from, oldest first.
    pub lock: Vec<Draw>,
}

impl RunningNumber {
    pub fn joined(&self, sep: &str) -> String {
        self.digits.iter().map(|d| d.to_string()).collect::<Vec<_>>().join(sep)
    }
}

/// Running digits from the last two draws (r3, r4) of the newest complete lock:
///
/// - (hundreds of r3 top + hundreds of r4 top) mod 10
/// - (units of r4 top + tens of r4 bottom) mod 10
/// - (units of r3 bottom + units of r4 bottom) mod 10
///
/// `None` without a complete lock of at least two draws.
pub fn running_number(draws: &[Draw], lock_size: LockSize) -> Option<RunningNumber> {
    let lock = last_full_lock(draws, lock_size)?;
    let [.., r3, r4] = lock else {
        log::debug!("Running number needs two draws per lock, lock size is {}", lock_size);
        return None;
    };

    let digits = [
        (r3.top3.hundreds() + r4.top3.hundreds()) % 10,
        (r4.top3.units() + r4.bottom2.tens()) % 10,
        (r3.bottom2.units() + r4.bottom2.units()) % 10,
    ];
    Some(RunningNumber {
        digits,
        lock: lock.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draws(items: &[(&str, &str)]) -> Vec<Draw> {
        items
            .iter()
            .enumerate()
            .map(|(i, (t, b))| Draw::parse(Some(i as u32 + 1), t, b).unwrap())
            .collect()
    }

    fn size(n: i64) -> LockSize {
        LockSize::new(n).unwrap()
    }

    #[test]
    fn test_known_example() {
        let d = draws(&[("900", "00"), ("555", "55"), ("123", "45"), ("671", "89")]);
        let r = running_number(&d, size(4)).unwrap();
        assert_eq!(r.digits, [7, 9, 4]);
        assert_eq!(r.joined("-"), "7-9-4");
        assert_eq!(r.lock.len(), 4);
    }

    #[test]
    fn test_uses_last_complete_lock_only() {
        let d = draws(&[
            ("000", "00"),
            ("000", "00"),
            ("123", "45"),
            ("671", "89"),
            ("999", "99"),
            ("999", "99"),
        ]);
        let r = running_number(&d, size(4)).unwrap();
        assert_eq!(r.joined("-"), "7-9-4");
        assert_eq!(r.lock[0].round, Some(1));
    }

    #[test]
    fn test_wraps_modulo_ten() {
        let d = draws(&[("909", "99"), ("989", "99")]);
        let r = running_number(&d, size(2)).unwrap();
        assert_eq!(r.digits, [(9 + 9) % 10, (9 + 9) % 10, (9 + 9) % 10]);
    }

    #[test]
    fn test_insufficient_data() {
        let d = draws(&[("123", "45"), ("671", "89"), ("111", "11")]);
        assert!(running_number(&d, size(4)).is_none());
        assert!(running_number(&d, size(1)).is_none());
        assert!(running_number(&[], size(4)).is_none());
    }
}
