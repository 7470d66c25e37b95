use std::{fmt, str::FromStr};

use thiserror::Error;
use uuid::Uuid;

use crate::Employee;

/// How new records get their id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IdStrategy {
    /// `collection size + 1`. Reuses ids after deletions.
    #[default]
    Count,
    /// Monotonic counter seeded past the largest numeric id.
    Sequence,
    Uuid,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown id strategy `{0}` (expected count, sequence or uuid)")]
pub struct ParseIdStrategyError(String);

impl IdStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            IdStrategy::Count => "count",
            IdStrategy::Sequence => "sequence",
            IdStrategy::Uuid => "uuid",
        }
    }
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdStrategy {
    type Err = ParseIdStrategyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "count" => Ok(IdStrategy::Count),
            "sequence" | "seq" => Ok(IdStrategy::Sequence),
            "uuid" => Ok(IdStrategy::Uuid),
            _ => Err(ParseIdStrategyError(value.to_string())),
        }
    }
}

#[derive(Debug)]
pub(crate) struct IdAllocator {
    strategy: IdStrategy,
    next_sequence: u64,
}

impl IdAllocator {
    pub(crate) fn new(strategy: IdStrategy, existing: &[Employee]) -> Self {
        let highest = existing
            .iter()
            .filter_map(|employee| employee.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            strategy,
            next_sequence: highest.saturating_add(1),
        }
    }

    pub(crate) fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    pub(crate) fn next_id(&mut self, current_len: usize) -> String {
        match self.strategy {
            IdStrategy::Count => (current_len + 1).to_string(),
            IdStrategy::Sequence => {
                let id = self.next_sequence;
                self.next_sequence = self.next_sequence.saturating_add(1);
                id.to_string()
            }
            IdStrategy::Uuid => Uuid::new_v4().to_string(),
        }
    }
}
