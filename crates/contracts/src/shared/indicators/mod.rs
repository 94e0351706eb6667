use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Display metadata for KPI cards
// ---------------------------------------------------------------------------

/// How to format the numeric value on the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ValueFormat {
    Number { decimals: u8 },
    Percent { decimals: u8 },
    Minutes,
    Integer,
}

/// Visual status of the indicator (drives colour).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorStatus {
    Good,
    Bad,
    #[default]
    Neutral,
    Warning,
}

/// Thresholds for a percentage where higher is better.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateThresholds {
    pub good_from: f64,
    pub warning_from: f64,
}

impl RateThresholds {
    pub const COMPLETION: RateThresholds = RateThresholds {
        good_from: 90.0,
        warning_from: 70.0,
    };
    pub const ON_TIME: RateThresholds = RateThresholds {
        good_from: 85.0,
        warning_from: 60.0,
    };

    /// `None` (no data) is neutral.
    pub fn status(&self, rate: Option<f64>) -> IndicatorStatus {
        match rate {
            None => IndicatorStatus::Neutral,
            Some(v) if v >= self.good_from => IndicatorStatus::Good,
            Some(v) if v >= self.warning_from => IndicatorStatus::Warning,
            Some(_) => IndicatorStatus::Bad,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_status() {
        let t = RateThresholds::COMPLETION;
        assert_eq!(t.status(Some(95.0)), IndicatorStatus::Good);
        assert_eq!(t.status(Some(90.0)), IndicatorStatus::Good);
        assert_eq!(t.status(Some(75.0)), IndicatorStatus::Warning);
        assert_eq!(t.status(Some(10.0)), IndicatorStatus::Bad);
        assert_eq!(t.status(None), IndicatorStatus::Neutral);
    }
}
