use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumString};

/// Value Object - trade signal kind
///
/// Unrecognized wire values are preserved verbatim in `Unknown` rather than
/// rejected; they render with a neutral style.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, StrumDisplay, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Signal {
    #[strum(serialize = "long_entry")]
    LongEntry,
    #[strum(serialize = "long_exit")]
    LongExit,
    #[strum(serialize = "short_entry")]
    ShortEntry,
    #[strum(serialize = "short_exit")]
    ShortExit,
    #[strum(default)]
    Unknown(String),
}

impl From<String> for Signal {
    fn from(value: String) -> Self {
        Signal::from_str(&value).unwrap_or(Signal::Unknown(value))
    }
}

impl From<Signal> for String {
    fn from(value: Signal) -> Self {
        value.to_string()
    }
}

/// Marker glyph shared by both chart adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Glyph {
    #[display(fmt = "triangle-up")]
    TriangleUp,
    #[display(fmt = "triangle-down")]
    TriangleDown,
    #[display(fmt = "circle")]
    Circle,
}

impl Glyph {
    /// Unicode symbol rendered inside DOM overlay markers.
    pub fn symbol(&self) -> &'static str {
        match self {
            Glyph::TriangleUp => "\u{25b2}",
            Glyph::TriangleDown => "\u{25bc}",
            Glyph::Circle => "\u{25cf}",
        }
    }
}

/// Value Object - resolved visual style for a signal
#[derive(Debug, Clone, PartialEq)]
pub struct SignalStyle {
    pub color: &'static str,
    pub glyph: Glyph,
    pub label: String,
    pub badge_class: &'static str,
}

/// Total mapping from signal kind to visual style.
///
/// Entries point in the direction of the position being opened: long_entry
/// and short_exit point up, long_exit and short_entry point down. The same
/// convention applies to both chart adapters.
pub fn style_for(signal: &Signal) -> SignalStyle {
    match signal {
        Signal::LongEntry => SignalStyle {
            color: "#2ca02c",
            glyph: Glyph::TriangleUp,
            label: "L-ENTRY".to_string(),
            badge_class: "bg-success",
        },
        Signal::LongExit => SignalStyle {
            color: "#1f77b4",
            glyph: Glyph::TriangleDown,
            label: "L-EXIT".to_string(),
            badge_class: "bg-primary",
        },
        Signal::ShortEntry => SignalStyle {
            color: "#d62728",
            glyph: Glyph::TriangleDown,
            label: "S-ENTRY".to_string(),
            badge_class: "bg-danger",
        },
        Signal::ShortExit => SignalStyle {
            color: "#ff7f0e",
            glyph: Glyph::TriangleUp,
            label: "S-EXIT".to_string(),
            badge_class: "bg-warning",
        },
        Signal::Unknown(raw) => SignalStyle {
            color: "#7f7f7f",
            glyph: Glyph::Circle,
            label: raw.clone(),
            badge_class: "bg-secondary",
        },
    }
}

/// Value Object - the current (stock, date) selection
///
/// The filtered view is empty until both halves are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionFilter {
    pub stock: Option<String>,
    pub date: Option<String>,
}

impl SelectionFilter {
    pub fn new(stock: Option<String>, date: Option<String>) -> Self {
        Self { stock, date }
    }

    pub fn is_complete(&self) -> bool {
        self.stock.is_some() && self.date.is_some()
    }
}

/// Value Object - chart point picked by the user as the anchor for a new annotation
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedPoint {
    pub timestamp: String,
    pub price: f64,
}
