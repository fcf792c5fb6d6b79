//! Solver configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.
//!
//! # Objective Presets
//!
//! | Preset | w1 makespan | w2 imbalance | w3 overload | w4 team size |
//! |--------|-------------|--------------|-------------|--------------|
//! | Default | 0.60 | 0.25 | 0.05 | 0.20 |
//! | Balanced | 0.60 | 0.25 | 0.10 | 0.15 |
//! | Fastest | 0.80 | 0.10 | 0.05 | 0.05 |
//! | BestBalance | 0.40 | 0.40 | 0.10 | 0.10 |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SolverError;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Weights of the four objective terms.
///
/// Weights need not sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveWeights {
    /// Normalized makespan weight.
    #[serde(rename = "w1")]
    pub makespan: f64,
    /// Load imbalance weight.
    #[serde(rename = "w2")]
    pub imbalance: f64,
    /// Operation cap overload weight.
    #[serde(rename = "w3")]
    pub overload: f64,
    /// Used-employee ratio weight.
    #[serde(rename = "w4")]
    pub employee_count: f64,
}

impl ObjectiveWeights {
    /// Creates a weight set.
    pub fn new(makespan: f64, imbalance: f64, overload: f64, employee_count: f64) -> Self {
        Self {
            makespan,
            imbalance,
            overload,
            employee_count,
        }
    }

    fn as_array(&self) -> [(&'static str, f64); 4] {
        [
            ("w1", self.makespan),
            ("w2", self.imbalance),
            ("w3", self.overload),
            ("w4", self.employee_count),
        ]
    }
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        ObjectivePreset::Default.weights()
    }
}

/// Named weight sets used on the production floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectivePreset {
    Default,
    Balanced,
    Fastest,
    BestBalance,
}

impl ObjectivePreset {
    /// Weights for this preset.
    pub fn weights(self) -> ObjectiveWeights {
        match self {
            ObjectivePreset::Default => ObjectiveWeights::new(0.6, 0.25, 0.05, 0.2),
            ObjectivePreset::Balanced => ObjectiveWeights::new(0.6, 0.25, 0.1, 0.15),
            ObjectivePreset::Fastest => ObjectiveWeights::new(0.8, 0.1, 0.05, 0.05),
            ObjectivePreset::BestBalance => ObjectiveWeights::new(0.4, 0.4, 0.1, 0.1),
        }
    }
}

impl fmt::Display for ObjectivePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectivePreset::Default => write!(f, "default"),
            ObjectivePreset::Balanced => write!(f, "balanced"),
            ObjectivePreset::Fastest => write!(f, "fastest"),
            ObjectivePreset::BestBalance => write!(f, "best-balance"),
        }
    }
}

impl FromStr for ObjectivePreset {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(ObjectivePreset::Default),
            "balanced" => Ok(ObjectivePreset::Balanced),
            "fastest" => Ok(ObjectivePreset::Fastest),
            "best-balance" | "best_balance" | "bestbalance" => Ok(ObjectivePreset::BestBalance),
            other => Err(SolverError::invalid_input(format!(
                "unknown objective preset '{other}'"
            ))),
        }
    }
}

/// Per-request solver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SolverConfig {
    /// Operation cap per employee. `None` = number of expanded operations.
    pub max_operations_per_employee: Option<usize>,
    /// Local search iteration budget.
    pub max_iterations: usize,
    /// Consecutive non-improving iterations before stopping.
    pub patience: usize,
    /// Objective weights (ignored when `preset` is set).
    pub weights: ObjectiveWeights,
    /// Named weight set overriding `weights`.
    pub preset: Option<ObjectivePreset>,
    /// Whether the used-employee term participates in the score.
    pub minimize_employee_count: bool,
    /// Efficiency assumed for pairs the predictor did not cover.
    pub default_efficiency: f64,
    /// Splitting target. `None` = mean base duration.
    pub target_duration: Option<f64>,
    /// RNG seed. `None` = drawn at solve time and reported back.
    pub seed: Option<u64>,
    /// Independent local search runs from the same greedy seed.
    pub restarts: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_operations_per_employee: None,
            max_iterations: 2000,
            patience: 200,
            weights: ObjectiveWeights::default(),
            preset: None,
            minimize_employee_count: true,
            default_efficiency: 1.0,
            target_duration: None,
            seed: None,
            restarts: 1,
        }
    }
}

impl SolverConfig {
    /// Creates a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-employee operation cap.
    pub fn with_max_operations_per_employee(mut self, cap: usize) -> Self {
        self.max_operations_per_employee = Some(cap);
        self
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the patience.
    pub fn with_patience(mut self, patience: usize) -> Self {
        self.patience = patience;
        self
    }

    /// Sets explicit objective weights and clears any preset.
    pub fn with_weights(mut self, weights: ObjectiveWeights) -> Self {
        self.weights = weights;
        self.preset = None;
        self
    }

    /// Selects a named weight set.
    pub fn with_preset(mut self, preset: ObjectivePreset) -> Self {
        self.preset = Some(preset);
        self
    }

    /// Enables or disables the used-employee term.
    pub fn with_minimize_employee_count(mut self, enabled: bool) -> Self {
        self.minimize_employee_count = enabled;
        self
    }

    /// Sets the fallback efficiency.
    pub fn with_default_efficiency(mut self, efficiency: f64) -> Self {
        self.default_efficiency = efficiency;
        self
    }

    /// Overrides the splitting target.
    pub fn with_target_duration(mut self, target: f64) -> Self {
        self.target_duration = Some(target);
        self
    }

    /// Fixes the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the number of restarts.
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }

    /// Weights actually used for scoring.
    pub fn effective_weights(&self) -> ObjectiveWeights {
        self.preset.map(ObjectivePreset::weights).unwrap_or(self.weights)
    }

    /// Operation cap for a problem with `op_count` expanded operations.
    pub fn cap_for(&self, op_count: usize) -> usize {
        self.max_operations_per_employee.unwrap_or(op_count)
    }

    /// Checks value ranges. Returns every problem found.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.max_operations_per_employee == Some(0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidConfig,
                "maxOperationsPerEmployee must be at least 1",
            ));
        }
        if self.restarts == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidConfig,
                "restarts must be at least 1",
            ));
        }
        if !(self.default_efficiency.is_finite() && self.default_efficiency > 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidConfig,
                format!(
                    "defaultEfficiency must be a positive number, got {}",
                    self.default_efficiency
                ),
            ));
        }
        if let Some(target) = self.target_duration {
            if !(target.is_finite() && target > 0.0) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidConfig,
                    format!("targetDuration must be a positive number, got {target}"),
                ));
            }
        }
        for (name, w) in self.effective_weights().as_array() {
            if !(w.is_finite() && w >= 0.0) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidConfig,
                    format!("weight {name} must be a non-negative number, got {w}"),
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SolverConfig::default();
        assert_eq!(c.max_iterations, 2000);
        assert_eq!(c.patience, 200);
        assert_eq!(c.restarts, 1);
        assert!(c.minimize_employee_count);
        assert!((c.default_efficiency - 1.0).abs() < 1e-10);
        assert_eq!(c.effective_weights(), ObjectiveWeights::new(0.6, 0.25, 0.05, 0.2));
        assert_eq!(c.cap_for(7), 7);
        assert!(c.validate().is_empty());
    }

    #[test]
    fn test_empty_json_is_default() {
        let c: SolverConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(c, SolverConfig::default());
    }

    #[test]
    fn test_json_fields() {
        let c: SolverConfig = serde_json::from_str(
            r#"{
                "maxOperationsPerEmployee": 3,
                "maxIterations": 50,
                "weights": {"w1": 1.0, "w2": 0.0, "w3": 0.0, "w4": 0.0},
                "seed": 7
            }"#,
        )
        .unwrap();
        assert_eq!(c.cap_for(10), 3);
        assert_eq!(c.max_iterations, 50);
        assert_eq!(c.patience, 200);
        assert_eq!(c.seed, Some(7));
        assert_eq!(c.effective_weights(), ObjectiveWeights::new(1.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_preset_overrides_weights() {
        let c = SolverConfig::new()
            .with_weights(ObjectiveWeights::new(1.0, 1.0, 1.0, 1.0))
            .with_preset(ObjectivePreset::Fastest);
        assert_eq!(c.effective_weights(), ObjectiveWeights::new(0.8, 0.1, 0.05, 0.05));

        let c = c.with_weights(ObjectiveWeights::new(1.0, 0.0, 0.0, 0.0));
        assert_eq!(c.preset, None);
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!("balanced".parse::<ObjectivePreset>().unwrap(), ObjectivePreset::Balanced);
        assert_eq!(
            "Best-Balance".parse::<ObjectivePreset>().unwrap(),
            ObjectivePreset::BestBalance
        );
        assert!("quickest".parse::<ObjectivePreset>().is_err());
        assert_eq!(ObjectivePreset::BestBalance.to_string(), "best-balance");
    }

    #[test]
    fn test_validate_ranges() {
        let c = SolverConfig::new()
            .with_max_operations_per_employee(0)
            .with_restarts(0)
            .with_default_efficiency(0.0)
            .with_target_duration(-1.0)
            .with_weights(ObjectiveWeights::new(f64::NAN, 0.1, 0.1, -0.1));
        let errors = c.validate();
        assert_eq!(errors.len(), 6);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::InvalidConfig));
    }
}
