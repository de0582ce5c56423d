//! Day-keyed result feed.
//!
//! The daily file maps a source key to an object of per-round records:
//!
//! ```json
//! { "0122": { "r1": { "lotto_type": "01", "lotto_subtype": "22", "round_number": "1",
//!                     "result": { "top_three": "123", "bottom_two": "45" } } } }
//! ```

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use lockscan_db::models::Draw;

pub const LOTTO_TYPE: &str = "01";
pub const LOTTO_SUBTYPE: &str = "22";
/// Used when no key carries a matching type/subtype sample.
pub const FALLBACK_KEY: &str = "0122";

#[derive(Debug, Clone, Default)]
pub struct DailyFeed {
    sources: Map<String, Value>,
}

impl DailyFeed {
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).context("Daily feed is not valid JSON")?;
        Ok(Self::from_value(value))
    }

    /// Anything but a top-level object is an empty feed.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(sources) => Self { sources },
            _ => Self::default(),
        }
    }

    /// Precedence: among keys whose first record is of the expected type and
    /// subtype, the one with the most rounds (first seen wins a tie); else
    /// [`FALLBACK_KEY`] if present; else none.
    pub fn pick_source_key(&self) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for (key, rounds) in &self.sources {
            let Some(rounds) = rounds.as_object() else {
                continue;
            };
            let Some(sample) = rounds.values().next() else {
                continue;
            };
            let matches = sample.get("lotto_type").and_then(Value::as_str) == Some(LOTTO_TYPE)
                && sample.get("lotto_subtype").and_then(Value::as_str) == Some(LOTTO_SUBTYPE);
            if matches && best.is_none_or(|(_, len)| rounds.len() > len) {
                best = Some((key.as_str(), rounds.len()));
            }
        }

        match best {
            Some((key, _)) => Some(key),
            None => self.sources.contains_key(FALLBACK_KEY).then_some(FALLBACK_KEY),
        }
    }

    /// Every well-formed result under `key`, sorted by round number.
    pub fn results_for(&self, key: &str) -> Vec<Draw> {
        let Some(records) = self.sources.get(key).and_then(Value::as_object) else {
            return Vec::new();
        };

        let mut records: Vec<&Map<String, Value>> =
            records.values().filter_map(Value::as_object).collect();
        records.sort_by_key(|rec| round_key(rec).unwrap_or(0));

        let total = records.len();
        let draws: Vec<Draw> = records.into_iter().filter_map(record_to_draw).collect();
        if draws.len() < total {
            log::debug!("{}: dropped {} malformed records", key, total - draws.len());
        }
        draws
    }

    /// Key selection plus extraction in one step.
    pub fn results(&self) -> Option<(String, Vec<Draw>)> {
        let key = self.pick_source_key()?;
        Some((key.to_string(), self.results_for(key)))
    }
}

/// Integer value of `round_number`: numbers (floats truncated toward zero)
/// or numeric strings. Negative rounds still sort, but are not displayed.
fn round_key(rec: &Map<String, Value>) -> Option<i64> {
    match rec.get("round_number")? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn round_number(rec: &Map<String, Value>) -> Option<u32> {
    round_key(rec).and_then(|r| u32::try_from(r).ok())
}

fn record_to_draw(rec: &Map<String, Value>) -> Option<Draw> {
    let result = rec.get("result")?;
    let top3 = result.get("top_three")?.as_str()?;
    let bottom2 = result.get("bottom_two")?.as_str()?;
    Draw::parse(round_number(rec), top3, bottom2).ok()
}
