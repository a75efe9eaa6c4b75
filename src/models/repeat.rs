use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed repeat period selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Daily,
    Weekly,
    Monthly,
}

impl Cadence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cadence::Daily => "daily",
            Cadence::Weekly => "weekly",
            Cadence::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatUnit {
    Days,
    Weeks,
    Months,
}

impl RepeatUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatUnit::Days => "days",
            RepeatUnit::Weeks => "weeks",
            RepeatUnit::Months => "months",
        }
    }
}

/// How a task repeats.
///
/// On the wire this is either the string `"none"`, one of the cadence
/// strings, or `{ "unit": "...", "interval": n }`. The enum makes it
/// impossible to carry a cadence and a custom interval at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RepeatRuleRepr", into = "RepeatRuleRepr")]
pub enum RepeatRule {
    #[default]
    None,
    Cadence(Cadence),
    Custom { unit: RepeatUnit, interval: u32 },
}

impl RepeatRule {
    pub fn is_recurring(&self) -> bool {
        !matches!(self, RepeatRule::None)
    }
}

impl fmt::Display for RepeatRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepeatRule::None => f.write_str("none"),
            RepeatRule::Cadence(c) => f.write_str(c.as_str()),
            RepeatRule::Custom { unit, interval } => {
                write!(f, "every {} {}", interval, unit.as_str())
            }
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RepeatRuleRepr {
    Keyword(String),
    Custom { unit: RepeatUnit, interval: u32 },
}

impl TryFrom<RepeatRuleRepr> for RepeatRule {
    type Error = String;

    fn try_from(repr: RepeatRuleRepr) -> Result<Self, Self::Error> {
        match repr {
            RepeatRuleRepr::Keyword(word) => match word.as_str() {
                "none" => Ok(RepeatRule::None),
                "daily" => Ok(RepeatRule::Cadence(Cadence::Daily)),
                "weekly" => Ok(RepeatRule::Cadence(Cadence::Weekly)),
                "monthly" => Ok(RepeatRule::Cadence(Cadence::Monthly)),
                other => Err(format!("unknown repeat rule: {}", other)),
            },
            RepeatRuleRepr::Custom { interval: 0, .. } => {
                Err("repeat interval must be at least 1".to_string())
            }
            RepeatRuleRepr::Custom { unit, interval } => Ok(RepeatRule::Custom { unit, interval }),
        }
    }
}

impl From<RepeatRule> for RepeatRuleRepr {
    fn from(rule: RepeatRule) -> Self {
        match rule {
            RepeatRule::None => RepeatRuleRepr::Keyword("none".to_string()),
            RepeatRule::Cadence(c) => RepeatRuleRepr::Keyword(c.as_str().to_string()),
            RepeatRule::Custom { unit, interval } => RepeatRuleRepr::Custom { unit, interval },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_keywords_and_custom_intervals() {
        let daily: RepeatRule = serde_json::from_value(json!("daily")).unwrap();
        assert_eq!(daily, RepeatRule::Cadence(Cadence::Daily));

        let none: RepeatRule = serde_json::from_value(json!("none")).unwrap();
        assert!(!none.is_recurring());

        let custom: RepeatRule =
            serde_json::from_value(json!({ "unit": "months", "interval": 2 })).unwrap();
        assert_eq!(
            custom,
            RepeatRule::Custom {
                unit: RepeatUnit::Months,
                interval: 2
            }
        );
    }

    #[test]
    fn rejects_unknown_keyword_and_zero_interval() {
        assert!(serde_json::from_value::<RepeatRule>(json!("yearly")).is_err());
        assert!(
            serde_json::from_value::<RepeatRule>(json!({ "unit": "days", "interval": 0 })).is_err()
        );
    }

    #[test]
    fn serializes_back_to_wire_shape() {
        assert_eq!(
            serde_json::to_value(RepeatRule::Cadence(Cadence::Weekly)).unwrap(),
            json!("weekly")
        );
        assert_eq!(
            serde_json::to_value(RepeatRule::Custom {
                unit: RepeatUnit::Days,
                interval: 3
            })
            .unwrap(),
            json!({ "unit": "days", "interval": 3 })
        );
    }

    #[test]
    fn displays_lowercase_units() {
        let rule = RepeatRule::Custom {
            unit: RepeatUnit::Months,
            interval: 2,
        };
        assert_eq!(rule.to_string(), "every 2 months");
        assert_eq!(RepeatRule::Cadence(Cadence::Daily).to_string(), "daily");
    }
}
