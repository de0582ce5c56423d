use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOCK_SIZE: usize = 4;

/// Fixed-width run of decimal digits, e.g. the "123" of a top-three result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digits<const N: usize>([u8; N]);

pub type Top3 = Digits<3>;
pub type Bottom2 = Digits<2>;

impl<const N: usize> Digits<N> {
    /// Accepts exactly `N` ASCII digits and nothing else.
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != N || !bytes.iter().all(u8::is_ascii_digit) {
            return None;
        }
        let mut digits = [0u8; N];
        for (slot, b) in digits.iter_mut().zip(bytes) {
            *slot = b - b'0';
        }
        Some(Self(digits))
    }

    pub fn as_array(&self) -> &[u8; N] {
        &self.0
    }

    pub fn tens(&self) -> u8 {
        self.0[N - 2]
    }

    pub fn units(&self) -> u8 {
        self.0[N - 1]
    }
}

impl Digits<3> {
    pub fn hundreds(&self) -> u8 {
        self.0[0]
    }

    /// (tens, units): the part of the top three the combination formula looks at.
    pub fn tail_pair(&self) -> (u8, u8) {
        (self.tens(), self.units())
    }

    /// x11, x22, ...
    pub fn is_double(&self) -> bool {
        self.tens() == self.units()
    }
}

impl<const N: usize> fmt::Display for Digits<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.0 {
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    pub round: Option<u32>,
    pub top3: Top3,
    pub bottom2: Bottom2,
}

impl Draw {
    pub fn new(round: Option<u32>, top3: Top3, bottom2: Bottom2) -> Self {
        Self { round, top3, bottom2 }
    }

    pub fn parse(round: Option<u32>, top3: &str, bottom2: &str) -> Result<Self> {
        let Some(t) = Top3::parse(top3) else {
            bail!("Three-digit result '{}' is not exactly 3 digits", top3);
        };
        let Some(b) = Bottom2::parse(bottom2) else {
            bail!("Two-digit result '{}' is not exactly 2 digits", bottom2);
        };
        Ok(Self::new(round, t, b))
    }
}

/// Number of consecutive draws grouped into one lock. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct LockSize(usize);

impl LockSize {
    pub fn new(size: i64) -> Result<Self> {
        if size <= 0 {
            bail!("Lock size must be a positive integer (got {})", size);
        }
        if size > i64::from(u32::MAX) {
            bail!("Lock size {} is larger than any day's round count", size);
        }
        let size = usize::try_from(size).context("Lock size does not fit this platform")?;
        Ok(Self(size))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for LockSize {
    fn default() -> Self {
        Self(DEFAULT_LOCK_SIZE)
    }
}

impl TryFrom<i64> for LockSize {
    type Error = anyhow::Error;

    fn try_from(size: i64) -> Result<Self> {
        Self::new(size)
    }
}

impl From<LockSize> for u64 {
    fn from(size: LockSize) -> u64 {
        size.0 as u64
    }
}

impl FromStr for LockSize {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let size: i64 = s
            .trim()
            .parse()
            .with_context(|| format!("Lock size '{}' is not an integer", s.trim()))?;
        Self::new(size)
    }
}

impl fmt::Display for LockSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-day delivery cursor: how many rounds of that day were already reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCursor {
    pub day: NaiveDate,
    pub last_processed_round_count: u32,
}

impl DailyCursor {
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day,
            last_processed_round_count: 0,
        }
    }

    pub fn complete_locks(&self, lock_size: LockSize) -> u32 {
        (self.last_processed_round_count as usize / lock_size.get()) as u32
    }
}
