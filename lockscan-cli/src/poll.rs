use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{NaiveDate, TimeDelta, Utc};
use lockscan_db::rusqlite::Connection;

use lockscan_core::analysis::{Outcome, analyze_draws};
use lockscan_core::feed::DailyFeed;
use lockscan_core::markup::Markup;
use lockscan_core::report::render;
use lockscan_db::db::{load_cursor, save_cursor};
use lockscan_db::models::{DailyCursor, LockSize};

/// Results are published on Bangkok time (UTC+7, no DST).
const FEED_UTC_OFFSET_HOURS: i64 = 7;

pub fn feed_today() -> NaiveDate {
    (Utc::now() + TimeDelta::hours(FEED_UTC_OFFSET_HOURS)).date_naive()
}

pub trait FeedSource {
    /// `Ok(None)` when the day has no feed yet.
    fn fetch(&self, day: NaiveDate) -> Result<Option<DailyFeed>>;
}

/// Reads `<dir>/<YYYY-MM-DD>.json`.
pub struct DirectoryFeed {
    pub dir: PathBuf,
}

impl FeedSource for DirectoryFeed {
    fn fetch(&self, day: NaiveDate) -> Result<Option<DailyFeed>> {
        let path = self.dir.join(format!("{}.json", day.format("%Y-%m-%d")));
        if !path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("Cannot read feed {:?}", path))?;
        DailyFeed::from_json(&json).map(Some)
    }
}

pub trait ReportSink {
    fn deliver(&mut self, report: &str) -> Result<()>;
}

pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn deliver(&mut self, report: &str) -> Result<()> {
        println!("{report}\n");
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    NoFeed,
    NoSourceKey,
    /// No new complete lock since the last delivery.
    Waiting { rounds: u32 },
    /// Cursor advanced; `delivered` is false when the analysis had no report.
    Processed { rounds: u32, delivered: bool },
}

pub struct Poller<'a, S: FeedSource, K: ReportSink> {
    pub conn: &'a Connection,
    pub source: S,
    pub sink: K,
    pub lock_size: LockSize,
    pub markup: Markup,
}

impl<S: FeedSource, K: ReportSink> Poller<'_, S, K> {
    /// Reports only when the round count grew and lands exactly on a lock boundary.
    pub fn poll_once(&mut self, day: NaiveDate) -> Result<CycleOutcome> {
        let cursor = load_cursor(self.conn, day)?;
        log::info!("Checking for new results ({})", day);

        let Some(feed) = self.source.fetch(day)? else {
            log::warn!("No feed available for {}", day);
            return Ok(CycleOutcome::NoFeed);
        };
        let Some((key, draws)) = feed.results() else {
            log::warn!("Could not determine the source key for {}", day);
            return Ok(CycleOutcome::NoSourceKey);
        };

        let rounds = draws.len();
        let size = self.lock_size.get();
        log::info!(
            "Rounds: {} (was {}), key={}, lock_size={}",
            rounds, cursor.last_processed_round_count, key, size
        );

        let count = u32::try_from(rounds).context("Round count does not fit the cursor")?;
        if rounds <= cursor.last_processed_round_count as usize || rounds % size != 0 {
            log::info!("No new full lock to analyze");
            return Ok(CycleOutcome::Waiting { rounds: count });
        }

        log::info!(
            "New full lock, analyzing rounds {}..{}",
            cursor.last_processed_round_count + 1,
            rounds
        );
        let report = match analyze_draws(&draws, self.lock_size) {
            Outcome::Analyzed(analysis) => render(&analysis, self.markup),
            Outcome::NoInput | Outcome::NothingActionable => None,
        };
        let delivered = match &report {
            Some(text) => {
                self.sink.deliver(text)?;
                true
            }
            None => false,
        };

        save_cursor(
            self.conn,
            &DailyCursor {
                day,
                last_processed_round_count: count,
            },
        )?;
        Ok(CycleOutcome::Processed { rounds: count, delivered })
    }

    /// Never returns unless `once`; failed cycles are logged and retried next tick.
    pub fn run(&mut self, interval: Duration, once: bool) -> Result<()> {
        loop {
            match self.poll_once(feed_today()) {
                Ok(outcome) => log::debug!("Cycle finished: {:?}", outcome),
                Err(e) if once => return Err(e),
                Err(e) => log::error!("Poll cycle failed: {:#}", e),
            }
            if once {
                return Ok(());
            }
            thread::sleep(interval);
        }
    }
}
