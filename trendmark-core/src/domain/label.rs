//! Trend label — the per-step directional classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Directional label assigned to each index of the series.
///
/// Serialized with the tokens `up`, `down` and `no` (flat).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendLabel {
    #[serde(rename = "up")]
    Up,
    #[serde(rename = "down")]
    Down,
    #[serde(rename = "no")]
    Flat,
}

impl TrendLabel {
    pub fn as_token(self) -> &'static str {
        match self {
            TrendLabel::Up => "up",
            TrendLabel::Down => "down",
            TrendLabel::Flat => "no",
        }
    }

    pub fn is_up(self) -> bool {
        self == TrendLabel::Up
    }
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl FromStr for TrendLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(TrendLabel::Up),
            "down" => Ok(TrendLabel::Down),
            "no" => Ok(TrendLabel::Flat),
            other => Err(format!("unknown trend label '{other}' (expected up, down or no)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_match_output_contract() {
        assert_eq!(TrendLabel::Up.to_string(), "up");
        assert_eq!(TrendLabel::Down.to_string(), "down");
        assert_eq!(TrendLabel::Flat.to_string(), "no");
    }

    #[test]
    fn parses_tokens_back() {
        assert_eq!("up".parse::<TrendLabel>(), Ok(TrendLabel::Up));
        assert_eq!("down".parse::<TrendLabel>(), Ok(TrendLabel::Down));
        assert_eq!("no".parse::<TrendLabel>(), Ok(TrendLabel::Flat));
        assert!("flat".parse::<TrendLabel>().is_err());
    }

    #[test]
    fn serde_uses_tokens() {
        let json = serde_json::to_string(&TrendLabel::Flat).unwrap();
        assert_eq!(json, "\"no\"");
        let back: TrendLabel = serde_json::from_str("\"down\"").unwrap();
        assert_eq!(back, TrendLabel::Down);
    }
}
