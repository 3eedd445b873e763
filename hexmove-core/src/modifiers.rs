//! Promotion modifiers on terrain/feature costs
//!
//! Three flavors share one first-match rule table ([`speed_rule`]):
//! - multiplier: fixed-point factor on the terrain cost (denominator = x1)
//! - adder: extra fixed-point cost from extra-move records
//! - combined: a single adder where "faster" means ignore terrain cost

use serde::{Deserialize, Serialize};

use crate::rules::{MovementRules, PromotionModel};
use crate::terrain::Terrain;
use crate::units::{Promotion, Unit};
use crate::world::Tile;

/// Combined-model result meaning "treat the terrain cost as ignored"
pub const IGNORE_TERRAIN_COST: i32 = -1;

/// Speed promotion matched on a tile, in priority order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpeedRule {
    HillsDoubleMove,
    HillsHalfMove,
    MountainsDoubleMove,
    DoubleMove,
    HalfMove,
}

impl SpeedRule {
    /// Evaluation order; the first rule that applies wins
    pub const PRIORITY: [SpeedRule; 5] = [
        SpeedRule::HillsDoubleMove,
        SpeedRule::HillsHalfMove,
        SpeedRule::MountainsDoubleMove,
        SpeedRule::DoubleMove,
        SpeedRule::HalfMove,
    ];

    fn applies(self, unit: &Unit, tile: &Tile) -> bool {
        match self {
            SpeedRule::HillsDoubleMove => tile.is_hills() && unit.has(Promotion::HillsDoubleMove),
            SpeedRule::HillsHalfMove => tile.is_hills() && unit.is_terrain_half_move(Terrain::Hill),
            SpeedRule::MountainsDoubleMove => {
                tile.is_mountain() && unit.has(Promotion::MountainsDoubleMove)
            }
            SpeedRule::DoubleMove => {
                unit.is_terrain_double_move(tile.terrain) || unit.is_feature_double_move(tile.feature)
            }
            SpeedRule::HalfMove => {
                unit.is_terrain_half_move(tile.terrain) || unit.is_feature_half_move(tile.feature)
            }
        }
    }
}

/// First speed rule that applies to `unit` on `tile`
pub fn speed_rule(unit: &Unit, tile: &Tile) -> Option<SpeedRule> {
    SpeedRule::PRIORITY.into_iter().find(|rule| rule.applies(unit, tile))
}

/// Multiplier form. Denominator means unchanged, half of it double speed.
pub fn cost_multiplier(rules: &MovementRules, unit: &Unit, tile: &Tile) -> i32 {
    let base = rules.move_denominator;
    match speed_rule(unit, tile) {
        Some(SpeedRule::HillsDoubleMove | SpeedRule::MountainsDoubleMove | SpeedRule::DoubleMove) => {
            base / 2
        }
        Some(SpeedRule::HillsHalfMove | SpeedRule::HalfMove) => base * 2,
        None => base,
    }
}

/// Adder form. Zero unless an extra-move record matches the tile.
pub fn cost_adder(rules: &MovementRules, unit: &Unit, tile: &Tile) -> i32 {
    rules.move_denominator * extra_move_count(unit, tile)
}

/// Combined form: [`IGNORE_TERRAIN_COST`] for any speed-up, else the slowdown.
///
/// Hill half-move counts as a speed-up here, unlike in [`cost_multiplier`].
pub fn cost_change(rules: &MovementRules, unit: &Unit, tile: &Tile) -> i32 {
    let slowdown = match speed_rule(unit, tile) {
        Some(
            SpeedRule::HillsDoubleMove
            | SpeedRule::HillsHalfMove
            | SpeedRule::MountainsDoubleMove
            | SpeedRule::DoubleMove,
        ) => return IGNORE_TERRAIN_COST,
        Some(SpeedRule::HalfMove) => rules.move_denominator,
        None => 0,
    };
    slowdown + cost_adder(rules, unit, tile)
}

// hill record first, then base terrain, then feature; only one applies
fn extra_move_count(unit: &Unit, tile: &Tile) -> i32 {
    let hill = if tile.is_hills() { unit.terrain_extra_moves(Terrain::Hill) } else { None };
    hill.or_else(|| unit.terrain_extra_moves(tile.terrain))
        .or_else(|| unit.feature_extra_moves(tile.feature))
        .unwrap_or(0)
}

/// Promotion modifiers for one step, optionally precomputed by the caller.
///
/// `None` means "derive it during evaluation".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionModifiers {
    pub multiplier: Option<i32>,
    pub adder: Option<i32>,
}

impl PromotionModifiers {
    /// Derive nothing up front
    pub const LAZY: PromotionModifiers = PromotionModifiers { multiplier: None, adder: None };

    /// Precompute the modifiers the active promotion model will ask for
    pub fn resolve(rules: &MovementRules, unit: &Unit, tile: &Tile) -> Self {
        match rules.promotion_model {
            PromotionModel::Multiplicative => Self {
                multiplier: Some(cost_multiplier(rules, unit, tile)),
                adder: Some(cost_adder(rules, unit, tile)),
            },
            PromotionModel::Combined => Self {
                multiplier: None,
                adder: Some(cost_change(rules, unit, tile)),
            },
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Hex;
    use crate::ids::{PlayerId, TeamId};
    use crate::terrain::Feature;
    use crate::units::Domain;

    fn scout() -> Unit {
        Unit::new(1, PlayerId(0), TeamId(0), Domain::Land, 2)
    }

    /// Grassland hill
    fn hills() -> Tile {
        Tile::new(Hex::new(0, 0), Terrain::Grassland).with_hills()
    }

    fn forest() -> Tile {
        Tile::new(Hex::new(0, 0), Terrain::Plains).with_feature(Feature::Forest)
    }

    #[test]
    fn test_no_promotions_is_neutral() {
        let rules = MovementRules::default();
        assert_eq!(speed_rule(&scout(), &forest()), None);
        assert_eq!(cost_multiplier(&rules, &scout(), &forest()), 60);
        assert_eq!(cost_adder(&rules, &scout(), &forest()), 0);
        assert_eq!(cost_change(&rules, &scout(), &forest()), 0);
    }

    #[test]
    fn test_hills_double_beats_generic_double() {
        let rules = MovementRules::default();
        let both = scout()
            .with_promotion(Promotion::HillsDoubleMove)
            .with_promotion(Promotion::TerrainDoubleMove { terrain: Terrain::Grassland });
        let alone = scout().with_promotion(Promotion::HillsDoubleMove);
        assert_eq!(speed_rule(&both, &hills()), Some(SpeedRule::HillsDoubleMove));
        assert_eq!(cost_multiplier(&rules, &both, &hills()), cost_multiplier(&rules, &alone, &hills()));
        assert_eq!(cost_multiplier(&rules, &both, &hills()), 30);
    }

    #[test]
    fn test_first_match_does_not_stack() {
        let rules = MovementRules::default();
        // double on the feature and half on the terrain: only the double applies
        let unit = scout()
            .with_promotion(Promotion::FeatureDoubleMove { feature: Feature::Forest })
            .with_promotion(Promotion::TerrainHalfMove { terrain: Terrain::Plains });
        assert_eq!(cost_multiplier(&rules, &unit, &forest()), 30);
    }

    #[test]
    fn test_half_move_doubles_multiplier() {
        let rules = MovementRules::default();
        let unit = scout().with_promotion(Promotion::FeatureHalfMove { feature: Feature::Forest });
        assert_eq!(cost_multiplier(&rules, &unit, &forest()), 120);
        assert_eq!(cost_change(&rules, &unit, &forest()), 60);
    }

    #[test]
    fn test_hill_half_move_diverges_between_models() {
        let rules = MovementRules::default();
        let unit = scout().with_promotion(Promotion::TerrainHalfMove { terrain: Terrain::Hill });
        assert_eq!(speed_rule(&unit, &hills()), Some(SpeedRule::HillsHalfMove));
        assert_eq!(cost_multiplier(&rules, &unit, &hills()), 120);
        assert_eq!(cost_change(&rules, &unit, &hills()), IGNORE_TERRAIN_COST);
    }

    #[test]
    fn test_mountain_double_only_on_mountains() {
        let rules = MovementRules::default();
        let unit = scout().with_promotion(Promotion::MountainsDoubleMove);
        let mountain = Tile::new(Hex::new(0, 0), Terrain::Mountain);
        assert_eq!(cost_multiplier(&rules, &unit, &mountain), 30);
        assert_eq!(cost_multiplier(&rules, &unit, &hills()), 60);
    }

    #[test]
    fn test_adder_prefers_terrain_over_feature() {
        let rules = MovementRules::default();
        let unit = scout()
            .with_promotion(Promotion::TerrainExtraMove { terrain: Terrain::Plains, count: 1 })
            .with_promotion(Promotion::FeatureExtraMove { feature: Feature::Forest, count: 2 });
        assert_eq!(cost_adder(&rules, &unit, &forest()), 60);

        let feature_only = scout()
            .with_promotion(Promotion::FeatureExtraMove { feature: Feature::Forest, count: 2 });
        assert_eq!(cost_adder(&rules, &feature_only, &forest()), 120);
    }

    #[test]
    fn test_combined_accumulates_half_and_extra() {
        let rules = MovementRules::default();
        let unit = scout()
            .with_promotion(Promotion::FeatureHalfMove { feature: Feature::Forest })
            .with_promotion(Promotion::FeatureExtraMove { feature: Feature::Forest, count: 1 });
        assert_eq!(cost_change(&rules, &unit, &forest()), 120);
    }

    #[test]
    fn test_combined_double_ignores_extra() {
        let rules = MovementRules::default();
        let unit = scout()
            .with_promotion(Promotion::HillsDoubleMove)
            .with_promotion(Promotion::TerrainExtraMove { terrain: Terrain::Hill, count: 3 });
        assert_eq!(cost_change(&rules, &unit, &hills()), IGNORE_TERRAIN_COST);
    }

    #[test]
    fn test_base_terrain_rules_apply_on_hills() {
        let rules = MovementRules::default();
        let grass_double = scout().with_promotion(Promotion::TerrainDoubleMove { terrain: Terrain::Grassland });
        assert_eq!(speed_rule(&grass_double, &hills()), Some(SpeedRule::DoubleMove));
        assert_eq!(cost_multiplier(&rules, &grass_double, &hills()), 30);

        let grass_extra = scout().with_promotion(Promotion::TerrainExtraMove { terrain: Terrain::Grassland, count: 1 });
        assert_eq!(cost_adder(&rules, &grass_extra, &hills()), 60);

        // the hill record wins over the base terrain record
        let both = grass_extra.with_promotion(Promotion::TerrainExtraMove { terrain: Terrain::Hill, count: 2 });
        assert_eq!(cost_adder(&rules, &both, &hills()), 120);
        let flat = Tile::new(Hex::new(0, 0), Terrain::Grassland);
        assert_eq!(cost_adder(&rules, &both, &flat), 60);
    }

    #[test]
    fn test_resolve_follows_model() {
        let unit = scout().with_promotion(Promotion::HillsDoubleMove);
        let multiplicative = PromotionModifiers::resolve(&MovementRules::default(), &unit, &hills());
        assert_eq!(multiplicative, PromotionModifiers { multiplier: Some(30), adder: Some(0) });

        let combined = PromotionModifiers::resolve(&MovementRules::combined(), &unit, &hills());
        assert_eq!(combined, PromotionModifiers { multiplier: None, adder: Some(IGNORE_TERRAIN_COST) });
    }
}
