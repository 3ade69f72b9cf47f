use serde::{Deserialize, Serialize};

use super::value_objects::Signal;
use crate::time_utils;

/// Server-issued annotation identity.
///
/// The backend is inconsistent about the wire form: REST responses carry
/// integers while some pushed rows carry strings. Both forms of the same id
/// must compare equal, so comparisons go through [`AnnotationId::matches`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationId {
    Int(i64),
    Text(String),
}

impl AnnotationId {
    /// String form used in DOM attributes and API paths.
    pub fn as_key(&self) -> String {
        match self {
            AnnotationId::Int(n) => n.to_string(),
            AnnotationId::Text(s) => s.clone(),
        }
    }

    /// True when `key` names this id in either numeric or string form.
    pub fn matches(&self, key: &str) -> bool {
        match self {
            AnnotationId::Int(n) => key.parse::<i64>().map(|k| k == *n).unwrap_or(false),
            AnnotationId::Text(s) => {
                if s == key {
                    return true;
                }
                match (s.parse::<i64>(), key.parse::<i64>()) {
                    (Ok(a), Ok(b)) => a == b,
                    _ => false,
                }
            }
        }
    }
}

/// Entity - a trade-signal annotation attached to a (stock, timestamp, price)
///
/// Identity is assigned by the server; `id` is absent until persisted. An
/// unparseable `timestamp` keeps the annotation in the raw store (the table
/// lists it with placeholders) but excludes it from chart rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AnnotationId>,
    pub stock: String,
    pub timestamp: String,
    #[serde(default)]
    pub price: Option<f64>,
    pub signal: Signal,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub formatted_timestamp: Option<String>,
}

impl Annotation {
    /// Timestamp as epoch seconds; `None` when unparseable.
    pub fn epoch_seconds(&self) -> Option<f64> {
        time_utils::epoch_seconds(&self.timestamp)
    }

    /// Price when present and finite; `None` otherwise.
    pub fn finite_price(&self) -> Option<f64> {
        self.price.filter(|p| p.is_finite())
    }

    /// True when the annotation can be placed on a chart.
    pub fn is_plottable(&self) -> bool {
        self.epoch_seconds().is_some() && self.finite_price().is_some()
    }

    /// `YYYY-MM-DD` prefix of the timestamp.
    pub fn date_part(&self) -> Option<&str> {
        time_utils::date_part(&self.timestamp)
    }

    /// Display timestamp: precomputed server string, else derived, else "Unknown".
    pub fn display_timestamp(&self) -> String {
        if let Some(formatted) = &self.formatted_timestamp {
            if !formatted.is_empty() {
                return formatted.clone();
            }
        }
        time_utils::format_display(&self.timestamp).unwrap_or_else(|| "Unknown".to_string())
    }

    /// Price formatted to two decimals, "N/A" when absent or non-finite.
    pub fn display_price(&self) -> String {
        match self.finite_price() {
            Some(p) => format!("{p:.2}"),
            None => "N/A".to_string(),
        }
    }

    /// Reason text with the table's "-" placeholder.
    pub fn display_reason(&self) -> String {
        match &self.reason {
            Some(r) if !r.is_empty() => r.clone(),
            _ => "-".to_string(),
        }
    }

    /// True when `key` names this annotation's id in either form.
    pub fn id_matches(&self, key: &str) -> bool {
        self.id.as_ref().map(|id| id.matches(key)).unwrap_or(false)
    }
}
