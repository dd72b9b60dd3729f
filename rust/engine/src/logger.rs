use serde::{Deserialize, Serialize};

use crate::engine::Transition;
use crate::game::Outcome;
use crate::hand::Hand;

/// Summary of one settled round, written as a single JSONL line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Identifier in `YYYYMMDD-NNNNNN` form
    pub round_id: String,
    pub session_id: String,
    pub player_hand: Hand,
    pub dealer_hand: Hand,
    pub player_score: u32,
    pub dealer_score: u32,
    pub outcome: Outcome,
    /// RFC 3339 timestamp, filled in on write when missing
    #[serde(default)]
    pub ts: Option<String>,
}

impl RoundRecord {
    /// Builds a record from a finished round; `None` while the round continues.
    pub fn from_transition(round_id: String, transition: &Transition) -> Option<Self> {
        let outcome = transition.outcome()?;
        let state = transition.state();
        Some(Self {
            round_id,
            session_id: state.session_id.clone(),
            player_hand: state.player_hand.clone(),
            dealer_hand: state.dealer_hand.clone(),
            player_score: state.player_score,
            dealer_score: state.dealer_score,
            outcome,
            ts: None,
        })
    }
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct RoundLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl RoundLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// Logger that only hands out ids; nothing is written.
    pub fn detached(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_round_id(&self.date, self.seq)
    }

    /// Records `transition` if it settled a round. Returns whether a line was written.
    pub fn log_transition(&mut self, transition: &Transition) -> std::io::Result<bool> {
        if !transition.is_round_over() {
            return Ok(false);
        }
        let id = self.next_id();
        match RoundRecord::from_transition(id, transition) {
            Some(record) => {
                self.write(&record)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
