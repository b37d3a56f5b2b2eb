use std::{fmt::Display, time::Duration};

use clap::ValueEnum;

use super::prompts::{DESCRIBE_DETAILED, DESCRIBE_SHORT};

/// Bundles the description prompt with the interval and token budget it was tuned for. Each
/// value can still be overridden individually through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    /// Compact prompt, ~300 token answers, capture every 3 seconds
    Short,
    /// Five-point prompt, ~1000 token answers, capture every 6 seconds
    Detailed,
}

impl Profile {
    pub fn describe_prompt(self) -> &'static str {
        match self {
            Profile::Short => DESCRIBE_SHORT,
            Profile::Detailed => DESCRIBE_DETAILED,
        }
    }

    pub fn interval(self) -> Duration {
        match self {
            Profile::Short => Duration::from_secs(3),
            Profile::Detailed => Duration::from_secs(6),
        }
    }

    pub fn describe_max_tokens(self) -> u32 {
        match self {
            Profile::Short => 300,
            Profile::Detailed => 1000,
        }
    }
}

impl Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Profile::Short => write!(f, "short"),
            Profile::Detailed => write!(f, "detailed"),
        }
    }
}
