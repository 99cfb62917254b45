use serde::{Deserialize, Serialize};

/// Per-type multipliers applied when weighting is enabled.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringWeights {
    pub standard_question: f64,
    pub data_control_question: f64,
    pub sub_question_multiplier: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            standard_question: 1.0,
            data_control_question: 1.2,
            sub_question_multiplier: 0.8,
        }
    }
}

/// Scoring configuration.
///
/// Passed by reference into every engine call. Controls the default maximum
/// score of a question, optional type weighting and how results are rounded.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    pub default_max_score: f64,
    pub weights: ScoringWeights,
    pub enable_weighting: bool,
    pub round_scores: bool,
    pub decimal_places: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            default_max_score: 10.0,
            weights: ScoringWeights::default(),
            enable_weighting: false,
            round_scores: true,
            decimal_places: 2,
        }
    }
}

/// Partial scoring configuration, as found under `scoring:` in the config file.
///
/// Every field is optional; missing fields keep their current value when
/// applied. Weights are replaced as a whole.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   enable_weighting: true
///   decimal_places: 1
///   weights:
///     standard_question: 1.0
///     data_control_question: 1.5
///     sub_question_multiplier: 0.5
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfigUpdate {
    #[serde(default)]
    pub default_max_score: Option<f64>,

    #[serde(default)]
    pub weights: Option<ScoringWeights>,

    #[serde(default)]
    pub enable_weighting: Option<bool>,

    #[serde(default)]
    pub round_scores: Option<bool>,

    #[serde(default)]
    pub decimal_places: Option<u32>,
}

impl ScoringConfig {
    /// Merge an update into this configuration. Always accepted.
    pub fn apply(&mut self, update: &ScoringConfigUpdate) {
        if let Some(max) = update.default_max_score {
            self.default_max_score = max;
        }
        if let Some(weights) = update.weights {
            self.weights = weights;
        }
        if let Some(enabled) = update.enable_weighting {
            self.enable_weighting = enabled;
        }
        if let Some(round) = update.round_scores {
            self.round_scores = round;
        }
        if let Some(places) = update.decimal_places {
            self.decimal_places = places;
        }
    }

    /// Restore the default configuration.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Round to `decimal_places`, halves rounding up. Identity when rounding
    /// is disabled, or when `decimal_places` is too large to scale `value`.
    pub fn round_score(&self, value: f64) -> f64 {
        if !self.round_scores {
            return value;
        }
        let places = i32::try_from(self.decimal_places).unwrap_or(i32::MAX);
        let factor = 10f64.powi(places);
        let rounded = (value * factor + 0.5).floor() / factor;
        if rounded.is_finite() {
            rounded
        } else {
            value
        }
    }

    /// Percentage of `score` out of `max_score`; 0 when there is no maximum.
    pub fn percentage(&self, score: f64, max_score: f64) -> f64 {
        if max_score == 0.0 {
            return 0.0;
        }
        self.round_score(score / max_score * 100.0)
    }
}
