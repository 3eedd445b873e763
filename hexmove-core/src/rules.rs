//! MovementRules - global movement configuration
//!
//! Passed explicitly to every evaluator; nothing here is ambient state.

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::RulesError;
use crate::terrain::{
    default_feature_info, default_route_info, default_terrain_info, Feature, FeatureInfo, Route,
    RouteInfo, Terrain, TerrainInfo,
};

/// Fixed-point units per full move point in the stock rules
pub const DEFAULT_MOVE_DENOMINATOR: i32 = 60;

/// Upper bound for terrain and feature costs, in whole move points
pub const MAX_TABLE_MOVE_COST: i32 = 1_000;

/// Which promotion-modifier flavor feeds the terrain path
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionModel {
    /// Multiplier scales the terrain cost, adder is added on top
    #[default]
    Multiplicative,
    /// Single adder; double-move traits turn into "ignore terrain cost"
    Combined,
}

/// Movement rule configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementRules {
    pub move_denominator: i32,
    /// Whole move points added for entering hills or mountains
    pub hills_extra_movement: i32,
    /// Whole move points added for crossing a river
    pub river_extra_movement: i32,
    pub zone_of_control_enabled: bool,
    /// Whether units ignoring terrain cost also skip the river surcharge
    pub ignore_terrain_cost_includes_rivers: bool,
    pub promotion_model: PromotionModel,
    /// Amphibious units crossing a river ignore the destination's terrain cost
    pub amphibious_ignores_river_terrain: bool,
    /// Woodland movement bonus only counts inside the unit's own borders
    pub woodland_bonus_requires_ownership: bool,
    /// Fixed-point cost of an embark/disembark made free by city policy
    pub free_embark_cost: i32,
    pub terrains: FxHashMap<Terrain, TerrainInfo>,
    pub features: FxHashMap<Feature, FeatureInfo>,
    pub routes: FxHashMap<Route, RouteInfo>,
}

impl Default for MovementRules {
    fn default() -> Self {
        Self {
            move_denominator: DEFAULT_MOVE_DENOMINATOR,
            hills_extra_movement: 1,
            river_extra_movement: 10,
            zone_of_control_enabled: true,
            ignore_terrain_cost_includes_rivers: true,
            promotion_model: PromotionModel::Multiplicative,
            amphibious_ignores_river_terrain: true,
            woodland_bonus_requires_ownership: false,
            free_embark_cost: 0,
            terrains: Terrain::ALL.into_iter().map(|t| (t, default_terrain_info(t))).collect(),
            features: Feature::ALL.into_iter().map(|f| (f, default_feature_info(f))).collect(),
            routes: Route::ALL.into_iter().map(|r| (r, default_route_info(r))).collect(),
        }
    }
}

impl MovementRules {
    /// Rules with the combined promotion model selected
    pub fn combined() -> Self {
        Self {
            promotion_model: PromotionModel::Combined,
            ..Self::default()
        }
    }

    /// One full move point in fixed-point units
    #[inline]
    pub fn full_move(&self) -> i32 {
        self.move_denominator
    }

    /// Terrain cost in whole move points; missing entries cost nothing
    pub fn terrain_cost(&self, terrain: Terrain) -> i32 {
        self.terrains.get(&terrain).map_or(0, |info| info.move_cost)
    }

    /// Feature cost in whole move points; missing entries cost nothing
    pub fn feature_cost(&self, feature: Feature) -> i32 {
        self.features.get(&feature).map_or(0, |info| info.move_cost)
    }

    /// Route costs `(variable, flat)`; missing entries cost nothing
    pub fn route_costs(&self, route: Route) -> (i32, i32) {
        self.routes
            .get(&route)
            .map_or((0, 0), |info| (info.move_cost, info.flat_move_cost))
    }

    pub fn is_rough_terrain(&self, terrain: Terrain) -> bool {
        self.terrains.get(&terrain).is_some_and(|info| info.rough)
    }

    pub fn is_rough_feature(&self, feature: Feature) -> bool {
        self.features.get(&feature).is_some_and(|info| info.rough)
    }

    /// Reject configurations the cost model cannot work with
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.move_denominator <= 0 {
            return Err(RulesError::InvalidDenominator(self.move_denominator));
        }
        let surcharges = [
            ("hills_extra_movement", self.hills_extra_movement),
            ("river_extra_movement", self.river_extra_movement),
            ("free_embark_cost", self.free_embark_cost),
        ];
        for (name, value) in surcharges {
            if value < 0 {
                return Err(RulesError::NegativeSurcharge { name, value });
            }
        }

        let whole_points = self
            .terrains
            .iter()
            .map(|(terrain, info)| (format!("terrain {terrain:?}"), info.move_cost))
            .chain(self.features.iter().map(|(feature, info)| (format!("feature {feature:?}"), info.move_cost)));
        for (entry, value) in whole_points {
            if !(0..=MAX_TABLE_MOVE_COST).contains(&value) {
                return Err(RulesError::CostOutOfRange { entry, value, max: MAX_TABLE_MOVE_COST });
            }
        }

        // route costs are fixed-point already
        let max_route = MAX_TABLE_MOVE_COST.saturating_mul(self.move_denominator);
        for (route, info) in &self.routes {
            for value in [info.move_cost, info.flat_move_cost] {
                if !(0..=max_route).contains(&value) {
                    return Err(RulesError::CostOutOfRange {
                        entry: format!("route {route:?}"),
                        value,
                        max: max_route,
                    });
                }
            }
        }
        Ok(())
    }

    /// Parse and validate rules from JSON text. Omitted fields keep their defaults.
    pub fn from_json(content: &str) -> Result<Self, RulesError> {
        let rules: MovementRules = serde_json::from_str(content)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> Result<Self, RulesError> {
        let content = std::fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let rules = Self::from_json(&content)?;
        tracing::debug!(
            "Loaded movement rules from {} (denominator={}, model={:?})",
            path.display(),
            rules.move_denominator,
            rules.promotion_model
        );
        Ok(rules)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> Result<(), RulesError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| RulesError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
