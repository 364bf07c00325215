// src/types.rs
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::analysis::RunoutError;

/// Physical sensor channel an edge was seen on.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelId {
    /// Encoder disc pulses, `steps_per_revolution` per turn.
    Pulse,
    /// Once-per-revolution reference mark.
    Index,
}

impl ChannelId {
    pub fn label(&self) -> &'static str {
        match self {
            ChannelId::Pulse => "pulse",
            ChannelId::Index => "id",
        }
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChannelId {
    type Err = RunoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pulse" | "p" => Ok(ChannelId::Pulse),
            "index" | "id" => Ok(ChannelId::Index),
            other => Err(RunoutError::InvalidArgument(format!(
                "unknown channel '{other}', expected 'pulse' or 'index'"
            ))),
        }
    }
}

/// One detected transition, timestamped in nanoseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeSample {
    pub channel: ChannelId,
    pub timestamp_ns: i64,
}

impl EdgeSample {
    pub fn new(channel: ChannelId, timestamp_ns: i64) -> Self {
        Self {
            channel,
            timestamp_ns,
        }
    }
}

/// Reference timestamp from the index channel marking a revolution start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevolutionMark(pub i64);

impl RevolutionMark {
    /// First mark of a capture, if any.
    pub fn first_of(marks: &[i64]) -> Option<Self> {
        marks.first().copied().map(RevolutionMark)
    }
}
