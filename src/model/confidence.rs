//! Support values of clades.
//!
//! Provides the [Confidence] enum, which stores a numeric support value
//! either as integer (e.g. bootstrap counts like `95`) or as float
//! (e.g. posterior probabilities like `0.95`).

use std::fmt;

// =#========================================================================#=
// CONFIDENCE
// =#========================================================================$=
/// Numeric support value of a clade.
///
/// Integer-valued support (an all-digit label such as `95`) is kept as
/// [Confidence::Int], anything else numeric as [Confidence::Float].
/// No range is enforced; values outside `[0, 1]` or negative values are
/// stored as given.
///
/// Equality is numeric, so `Int(95) == Float(95.0)`.
#[derive(Debug, Clone, Copy)]
pub enum Confidence {
    /// For integer values
    Int(i64),
    /// For floating point values
    Float(f64),
}

impl Confidence {
    /// Tries to interpret the given text as support value.
    ///
    /// An all-digit text is read as integer; otherwise a float parse of the
    /// (whitespace-trimmed) text is attempted.
    ///
    /// # Returns
    /// * `Some(Confidence)` - if the text is numeric
    /// * `None` - otherwise; this never fails loudly
    ///
    /// # Examples
    /// ```
    /// use newick_io::model::Confidence;
    ///
    /// assert!(matches!(Confidence::parse("95"), Some(Confidence::Int(95))));
    /// assert!(matches!(Confidence::parse("0.95"), Some(Confidence::Float(v)) if v == 0.95));
    /// assert!(Confidence::parse("clade1").is_none());
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            // Digit runs too long for i64 still make a (float) confidence
            if let Ok(value) = text.parse::<i64>() {
                return Some(Confidence::Int(value));
            }
        }

        text.trim().parse::<f64>().ok().map(Confidence::Float)
    }

    /// Returns the value as `f64`.
    pub fn value(&self) -> f64 {
        match self {
            Confidence::Int(v) => *v as f64,
            Confidence::Float(v) => *v,
        }
    }

    /// Returns `true` if this is an integer support value.
    pub fn is_int(&self) -> bool {
        matches!(self, Confidence::Int(_))
    }
}

impl PartialEq for Confidence {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Confidence::Int(a), Confidence::Int(b)) => a == b,
            _ => self.value() == other.value(),
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Int(v) => write!(f, "{v}"),
            Confidence::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<f64> for Confidence {
    fn from(v: f64) -> Self {
        Confidence::Float(v)
    }
}

impl From<f32> for Confidence {
    fn from(v: f32) -> Self {
        Confidence::Float(v as f64)
    }
}

impl From<i64> for Confidence {
    fn from(v: i64) -> Self {
        Confidence::Int(v)
    }
}

impl From<i32> for Confidence {
    fn from(v: i32) -> Self {
        Confidence::Int(v as i64)
    }
}
