use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unit a serving is entered in, and the unit a per-100 value was measured per.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitChoice {
    G,
    Ml,
    Oz,
}

impl UnitChoice {
    /// Preference order used when offering units and when falling back.
    pub const PREFERENCE: [UnitChoice; 3] = [UnitChoice::G, UnitChoice::Ml, UnitChoice::Oz];

    pub fn as_str(self) -> &'static str {
        match self {
            UnitChoice::G => "g",
            UnitChoice::Ml => "ml",
            UnitChoice::Oz => "oz",
        }
    }

    /// Suffix used by Open Food Facts nutriment keys, e.g. `_100g`.
    pub fn per100_suffix(self) -> &'static str {
        match self {
            UnitChoice::G => "_100g",
            UnitChoice::Ml => "_100ml",
            UnitChoice::Oz => "_100oz",
        }
    }
}

impl fmt::Display for UnitChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown unit: {0}")]
pub struct UnknownUnit(pub String);

impl FromStr for UnitChoice {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "g" => Ok(UnitChoice::G),
            "ml" => Ok(UnitChoice::Ml),
            "oz" => Ok(UnitChoice::Oz),
            other => Err(UnknownUnit(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("ML".parse::<UnitChoice>().unwrap(), UnitChoice::Ml);
        assert_eq!(" g ".parse::<UnitChoice>().unwrap(), UnitChoice::G);
        assert!("cup".parse::<UnitChoice>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&UnitChoice::Oz).unwrap();
        assert_eq!(json, "\"oz\"");
    }
}
