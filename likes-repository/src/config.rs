//! Configuration types for the LikesService.
use std::fmt;
use std::str::FromStr;

/// How [`LikesService`](crate::LikesService) performs a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleStrategy {
    /// One conditional delete-or-insert executed by the store.
    #[default]
    Atomic,
    /// Look the tuple up, then delete or insert in a second round trip.
    ///
    /// Two overlapping toggles on a fresh tuple can both try to insert; the
    /// loser fails with a constraint violation.
    CheckThenAct,
}

impl FromStr for ToggleStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "atomic" => Ok(Self::Atomic),
            "check-then-act" | "check_then_act" | "checkthenact" => Ok(Self::CheckThenAct),
            other => Err(format!("unknown toggle strategy: {other}")),
        }
    }
}

impl fmt::Display for ToggleStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToggleStrategy::Atomic => f.write_str("atomic"),
            ToggleStrategy::CheckThenAct => f.write_str("check-then-act"),
        }
    }
}

/// Configuration for the LikesService.
#[derive(Debug, Clone, Default)]
pub struct LikesServiceConfig {
    pub toggle_strategy: ToggleStrategy,
}

impl LikesServiceConfig {
    /// Create a config with the given toggle strategy.
    pub fn with_toggle_strategy(toggle_strategy: ToggleStrategy) -> Self {
        Self { toggle_strategy }
    }
}
