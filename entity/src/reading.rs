use serde::{Deserialize, Serialize};

/// A computed ratio that may be missing from a response.
///
/// An absent or `null` metric decodes to `Unknown`; a reported zero stays
/// `Known(0.0)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Reading {
    Known(f64),
    #[default]
    Unknown,
}

impl Reading {
    pub fn value(&self) -> Option<f64> {
        match self {
            Reading::Known(value) => Some(*value),
            Reading::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Reading::Known(_))
    }

    /// The ratio expressed as a percentage, e.g. `0.85` as `85.0`.
    pub fn as_percent(&self) -> Option<f64> {
        self.value().map(|ratio| ratio * 100.0)
    }
}

impl From<Option<f64>> for Reading {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(value) if value.is_finite() => Reading::Known(value),
            _ => Reading::Unknown,
        }
    }
}

impl From<Reading> for Option<f64> {
    fn from(reading: Reading) -> Self {
        reading.value()
    }
}

impl std::fmt::Display for Reading {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_percent() {
            Some(percent) => write!(fmt, "{percent:.0}%"),
            None => write!(fmt, "--"),
        }
    }
}
