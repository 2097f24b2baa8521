use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{WarmingError, WarmingResult};

/// How the forest is removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    /// Whole-stand removal. Warming is applied at full strength.
    ClearFell,
    /// Patchy removal. Warming is attenuated uniformly.
    Fragmented,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ClearFell => "clear-fell",
            Self::Fragmented => "fragmented",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = WarmingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "clear-fell" => Ok(Self::ClearFell),
            "fragmented" => Ok(Self::Fragmented),
            other => Err(WarmingError::invalid_event_type(format!(
                "\"{other}\" (expected \"clear-fell\" or \"fragmented\")"
            ))),
        }
    }
}

impl<'de> serde::Deserialize<'de> for EventType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A deforestation scenario applied to a loss grid.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DeforestationEvent {
    amount: f64,
    event_type: EventType,
}

impl DeforestationEvent {
    /// `amount` is the percentage of cover removed, in `(0, 100]`.
    pub fn new(amount: f64, event_type: EventType) -> WarmingResult<Self> {
        if !amount.is_finite() || amount <= 0.0 || amount > 100.0 {
            return Err(WarmingError::validation(format!(
                "deforestation amount must be in (0, 100], got {amount}"
            )));
        }
        Ok(Self { amount, event_type })
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/event.rs"]
mod tests;
