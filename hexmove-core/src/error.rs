//! Error types for loading rules and scenarios

use std::path::PathBuf;

use crate::board::Hex;

/// Errors raised while loading or validating [`crate::rules::MovementRules`]
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("failed to read rules file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse rules: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("move denominator must be positive, got {0}")]
    InvalidDenominator(i32),

    #[error("{name} must not be negative, got {value}")]
    NegativeSurcharge { name: &'static str, value: i32 },

    #[error("{entry} costs {value}, expected 0..={max}")]
    CostOutOfRange { entry: String, value: i32, max: i32 },
}

/// Errors raised while loading a [`crate::scenario::Scenario`]
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tile {0} is defined twice")]
    DuplicateTile(Hex),

    #[error("unit {unit} is placed on {hex}, which has no tile")]
    UnitOffMap { unit: u32, hex: Hex },

    #[error("unit {0} is defined twice")]
    DuplicateUnit(u32),

    #[error("invalid rules in scenario: {0}")]
    Rules(#[from] RulesError),
}
