//! HEXMOVE Core - Movement cost rules for hex-grid strategy maps
//!
//! This crate computes what a single step costs a unit:
//! - Board geometry (hex grid with axial coordinates)
//! - Movement rule tables and configuration
//! - Read-only world snapshot (tiles, units, players, teams, cities)
//! - Promotion modifiers on terrain costs
//! - Zone of control
//! - Step cost evaluation with budget clamping

pub mod board;
pub mod error;
pub mod ids;
pub mod modifiers;
pub mod movement;
pub mod rules;
pub mod scenario;
pub mod terrain;
pub mod units;
pub mod world;
pub mod zoc;

// Re-exports for convenient access
pub use board::{Hex, DIRECTIONS};
pub use error::{RulesError, ScenarioError};
pub use ids::{CityId, PlayerId, TeamId, UnitId};
pub use modifiers::{PromotionModifiers, SpeedRule, IGNORE_TERRAIN_COST};
pub use movement::{MoveBudget, MoveCost, StepCost, StepRequest, StopReason, UnitMovement};
pub use rules::{MovementRules, PromotionModel};
pub use scenario::Scenario;
pub use terrain::{Feature, Route, Terrain};
pub use units::{Domain, Promotion, Unit};
pub use world::{City, Player, PlayerTraits, Team, Tile, World, WorldMap};
pub use zoc::{is_slowed_by_zoc, is_slowed_by_zoc_ignoring};
