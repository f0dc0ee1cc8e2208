//! Engine configuration file support.
//!
//! The engine reads a `config.json` from its working directory alongside the
//! "map" and "network" containers. The harness writes that file so an
//! experiment directory is fully self-contained. Field names and defaults
//! mirror exactly what the engine parses; the harness itself interprets
//! none of the numeric parameters.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_dt() -> f64 {
    1.0
}
fn default_tau_w() -> f64 {
    2.0
}
fn default_tau() -> f64 {
    1.0
}
fn default_weight_nudge() -> f64 {
    0.001
}
fn default_divergence_threshold() -> f64 {
    0.000001
}
fn default_max_convergence_steps() -> u32 {
    400
}

/// Reference to one task-map container plus its training wiring.
///
/// `output_id` names the node trained against the map's target column;
/// `context_id`/`context_val` optionally clamp one input node to a constant
/// while this map is sampled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSpec {
    /// Container file name, relative to the working directory
    pub filename: String,

    /// Node trained against the target column
    #[serde(rename = "outputID", skip_serializing_if = "Option::is_none")]
    pub output_id: Option<u32>,

    /// Node clamped to `context_val` while this map is active
    #[serde(rename = "contextID", skip_serializing_if = "Option::is_none")]
    pub context_id: Option<u32>,

    /// Clamp value for `context_id`
    #[serde(rename = "contextVal", skip_serializing_if = "Option::is_none")]
    pub context_val: Option<f64>,
}

impl MapSpec {
    /// Spec for a map trained against `output_id`, no context clamp.
    pub fn new(filename: impl Into<String>, output_id: u32) -> Self {
        Self {
            filename: filename.into(),
            output_id: Some(output_id),
            context_id: None,
            context_val: None,
        }
    }
}

/// Parameters the engine reads from `config.json`.
///
/// Defaults match the engine's own fallbacks, so a default-constructed
/// config changes nothing about a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Integration step size
    #[serde(default = "default_dt")]
    pub dt: f64,

    /// Weight time constant
    #[serde(rename = "tauW", default = "default_tau_w")]
    pub tau_w: f64,

    /// Forward activation time constant
    #[serde(rename = "tauX", default = "default_tau")]
    pub tau_x: f64,

    /// Backward activation time constant
    #[serde(rename = "tauY", default = "default_tau")]
    pub tau_y: f64,

    /// Magnitude of the random weight perturbation
    #[serde(rename = "weightNudgeSize", default = "default_weight_nudge")]
    pub weight_nudge_size: f64,

    /// Convergence threshold for the relaxation loops
    #[serde(rename = "divergenceThreshold", default = "default_divergence_threshold")]
    pub divergence_threshold: f64,

    /// Cap on relaxation iterations per sample
    #[serde(rename = "maxConvergenceSteps", default = "default_max_convergence_steps")]
    pub max_convergence_steps: u32,

    /// Input node indices beyond the engine's implicit first two
    #[serde(rename = "inputID", default, skip_serializing_if = "Vec::is_empty")]
    pub input_ids: Vec<u32>,

    /// Task maps to train on
    #[serde(default)]
    pub maps: Vec<MapSpec>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dt: default_dt(),
            tau_w: default_tau_w(),
            tau_x: default_tau(),
            tau_y: default_tau(),
            weight_nudge_size: default_weight_nudge(),
            divergence_threshold: default_divergence_threshold(),
            max_convergence_steps: default_max_convergence_steps(),
            input_ids: Vec::new(),
            maps: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the config to a file.
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a config back from a file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_engine_fallbacks() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.dt, 1.0);
        assert_eq!(cfg.tau_w, 2.0);
        assert_eq!(cfg.tau_x, 1.0);
        assert_eq!(cfg.tau_y, 1.0);
        assert_eq!(cfg.weight_nudge_size, 0.001);
        assert_eq!(cfg.divergence_threshold, 0.000001);
        assert_eq!(cfg.max_convergence_steps, 400);
        assert!(cfg.maps.is_empty());
    }

    #[test]
    fn test_json_key_names() {
        let mut cfg = EngineConfig::default();
        cfg.maps.push(MapSpec::new("map.dat", 4));
        cfg.input_ids = vec![2];
        let json = cfg.to_json().unwrap();

        // the engine parses these exact keys
        assert!(json.contains("\"tauW\""));
        assert!(json.contains("\"weightNudgeSize\""));
        assert!(json.contains("\"maxConvergenceSteps\""));
        assert!(json.contains("\"inputID\""));
        assert!(json.contains("\"outputID\""));
        assert!(!json.contains("\"contextID\""));
    }

    #[test]
    fn test_round_trip() {
        let mut cfg = EngineConfig::default();
        cfg.dt = 0.5;
        cfg.maps.push(MapSpec {
            filename: "map.dat".to_string(),
            output_id: Some(4),
            context_id: Some(2),
            context_val: Some(1.0),
        });

        let back = EngineConfig::from_json(&cfg.to_json().unwrap()).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg = EngineConfig::from_json(r#"{"dt": 0.1}"#).unwrap();
        assert_eq!(cfg.dt, 0.1);
        assert_eq!(cfg.tau_w, 2.0);
        assert_eq!(cfg.max_convergence_steps, 400);
    }
}
