use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Defines whether the cost should be maximized or minimized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptimizationDirection {
    Maximize,
    Minimize,
}

impl OptimizationDirection {
    /// Orders two costs so that the better one comes first.
    ///
    /// Missing (unevaluated) and NaN costs always rank last, whatever the
    /// direction, so sorting never promotes an individual nobody measured.
    pub fn rank(self, a: Option<f64>, b: Option<f64>) -> Ordering {
        let a = a.filter(|v| !v.is_nan());
        let b = b.filter(|v| !v.is_nan());
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => match self {
                OptimizationDirection::Maximize => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
                OptimizationDirection::Minimize => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            },
        }
    }

    /// Returns true if `candidate` is strictly better than `incumbent`
    pub fn is_better(self, candidate: Option<f64>, incumbent: Option<f64>) -> bool {
        self.rank(candidate, incumbent) == Ordering::Less
    }
}

impl Default for OptimizationDirection {
    fn default() -> Self {
        OptimizationDirection::Minimize
    }
}

/// Which chromosome representation the genetic operators act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Representation {
    /// Operators work gene by gene on the real vector
    Real,
    /// Operators work on the concatenated bit strings
    Binary,
}

impl Default for Representation {
    fn default() -> Self {
        Representation::Binary
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Representation::Real => write!(f, "real"),
            Representation::Binary => write!(f, "binary"),
        }
    }
}
