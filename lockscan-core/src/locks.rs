use lockscan_db::models::LockSize;

/// Consecutive blocks of `lock_size`; the last one keeps the remainder.
pub fn partition<T>(items: &[T], lock_size: LockSize) -> Vec<&[T]> {
    items.chunks(lock_size.get()).collect()
}

/// The newest lock that is complete, ignoring a trailing partial one.
pub fn last_full_lock<T>(items: &[T], lock_size: LockSize) -> Option<&[T]> {
    let size = lock_size.get();
    let usable = (items.len() / size) * size;
    if usable == 0 {
        return None;
    }
    Some(&items[usable - size..usable])
}

/// Bit set over the digits 0-9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DigitSet(u16);

impl DigitSet {
    pub fn from_digits(digits: &[u8]) -> Self {
        digits.iter().fold(Self::default(), |set, &d| set.with(d))
    }

    pub fn with(self, digit: u8) -> Self {
        debug_assert!(digit < 10);
        Self(self.0 | (1 << digit))
    }

    pub fn contains(self, digit: u8) -> bool {
        self.0 & (1 << digit) != 0
    }

    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_subset_of(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Ascending.
    pub fn digits(self) -> Vec<u8> {
        (0..10).filter(|&d| self.contains(d)).collect()
    }
}

/// One lock reduced to what the scorer needs: its tail pairs and their union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockProfile {
    pub pairs: Vec<DigitSet>,
    pub digits: DigitSet,
}

impl LockProfile {
    pub fn from_pairs(pairs: &[(u8, u8)]) -> Self {
        let pairs: Vec<DigitSet> = pairs
            .iter()
            .map(|&(tens, units)| DigitSet::from_digits(&[tens, units]))
            .collect();
        let digits = pairs
            .iter()
            .fold(DigitSet::default(), |acc, p| DigitSet(acc.0 | p.0));
        Self { pairs, digits }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

pub fn lock_profiles(pairs: &[(u8, u8)], lock_size: LockSize) -> Vec<LockProfile> {
    partition(pairs, lock_size)
        .into_iter()
        .map(LockProfile::from_pairs)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: i64) -> LockSize {
        LockSize::new(n).unwrap()
    }

    #[test]
    fn test_partition_sizes() {
        let items: Vec<u32> = (0..10).collect();
        let locks = partition(&items, size(4));
        let lens: Vec<usize> = locks.iter().map(|l| l.len()).collect();
        assert_eq!(lens, vec![4, 4, 2]);

        let locks = partition(&items[..8], size(4));
        assert_eq!(locks.len(), 2);
        assert!(locks.iter().all(|l| l.len() == 4));

        assert!(partition::<u32>(&[], size(4)).is_empty());
    }

    #[test]
    fn test_partition_preserves_sequence() {
        let items: Vec<u32> = (0..23).map(|i| i * 7 % 11).collect();
        for n in 1..=9 {
            let rebuilt: Vec<u32> = partition(&items, size(n)).concat();
            assert_eq!(rebuilt, items);
        }
    }

    #[test]
    fn test_last_full_lock() {
        let items: Vec<u32> = (0..10).collect();
        assert_eq!(last_full_lock(&items, size(4)), Some(&items[4..8]));
        assert_eq!(last_full_lock(&items, size(5)), Some(&items[5..10]));
        assert_eq!(last_full_lock(&items[..3], size(4)), None);
    }

    #[test]
    fn test_single_lock_digit_set() {
        let locks = lock_profiles(&[(1, 2), (3, 4), (5, 6), (7, 8)], size(4));
        assert_eq!(locks.len(), 1);
        assert_eq!(locks[0].digits.digits(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(locks[0].len(), 4);
    }

    #[test]
    fn test_digit_set_ops() {
        let a = DigitSet::from_digits(&[1, 2]);
        let b = DigitSet::from_digits(&[1, 2, 9]);
        assert!(a.is_subset_of(b));
        assert!(!b.is_subset_of(a));
        assert!(a.intersects(b));
        assert!(!a.intersects(DigitSet::from_digits(&[0, 3])));
        assert_eq!(b.len(), 3);
        assert!(DigitSet::default().is_empty());
    }
}
