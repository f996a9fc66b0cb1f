//! TripPlan domain type
//!
//! The backend-generated itinerary consumed by the result screen. The shape is
//! owned by the server and produced by a language model, so fields are parsed
//! leniently: text fields accept numbers, missing fields become empty.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Key under which the backend reports the budget total
pub const TOTAL_KEY: &str = "total";

/// A generated trip plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    /// Trip headline
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    /// Human-readable duration ("3 days", "2 nights", ...)
    #[serde(default, deserialize_with = "lenient_text")]
    pub duration: String,
    /// Itinerary entries, in the order the server sent them
    #[serde(default)]
    pub activities: Vec<Activity>,
    /// Estimated costs per category plus a total
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_breakdown: Option<BudgetBreakdown>,
}

/// A single itinerary entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default, deserialize_with = "lenient_text")]
    pub time: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    /// Day tag; the model sends either "Day 1" or 1
    #[serde(default, deserialize_with = "lenient_text")]
    pub day: String,
}

/// Accept a string, number, bool or null where text is expected
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

/// A single budget amount
///
/// Normally an integer; decimals, strings and anything else the model emits
/// are kept so they can be shown verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BudgetAmount {
    Integer(i64),
    Decimal(f64),
    Text(String),
    Other(Value),
}

impl fmt::Display for BudgetAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::Decimal(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
            Self::Other(Value::Null) => Ok(()),
            Self::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for BudgetAmount {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

/// Category → cost mapping that keeps the server's key order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetBreakdown {
    entries: Vec<(String, BudgetAmount)>,
}

impl BudgetBreakdown {
    /// Build from ordered (category, amount) pairs
    pub fn from_entries<K, A, I>(entries: I) -> Self
    where
        K: Into<String>,
        A: Into<BudgetAmount>,
        I: IntoIterator<Item = (K, A)>,
    {
        Self {
            entries: entries.into_iter().map(|(k, a)| (k.into(), a.into())).collect(),
        }
    }

    /// Itemized categories in received order, without the total
    pub fn items(&self) -> impl Iterator<Item = (&str, &BudgetAmount)> {
        self.entries
            .iter()
            .filter(|(k, _)| k != TOTAL_KEY)
            .map(|(k, a)| (k.as_str(), a))
    }

    /// The reported total, if the server sent one
    pub fn total(&self) -> Option<&BudgetAmount> {
        self.get(TOTAL_KEY)
    }

    /// Look up a category by exact name
    pub fn get(&self, key: &str) -> Option<&BudgetAmount> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, a)| a)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for BudgetBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, amount) in &self.entries {
            map.serialize_entry(key, amount)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for BudgetBreakdown {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BreakdownVisitor;

        impl<'de> Visitor<'de> for BreakdownVisitor {
            type Value = BudgetBreakdown;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of budget category to amount")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, amount)) = access.next_entry::<String, BudgetAmount>()? {
                    // Duplicate keys keep their first position, last value wins
                    if let Some(slot) = entries.iter_mut().find(|entry: &&mut (String, BudgetAmount)| entry.0 == key) {
                        slot.1 = amount;
                    } else {
                        entries.push((key, amount));
                    }
                }
                debug!(entry_count = entries.len(), "BudgetBreakdown: deserialized");
                Ok(BudgetBreakdown { entries })
            }
        }

        deserializer.deserialize_map(BreakdownVisitor)
    }
}
