//! Step cost evaluation
//!
//! [`UnitMovement`] answers "what does it cost this unit to step from one
//! tile to an adjacent one". Costs are fixed-point, one move point being
//! [`MovementRules::move_denominator`]. Rules are checked in a fixed order and
//! the first terminal rule decides the result:
//!
//! 1. unrevealed destination (human players) ends the turn
//! 2. air units always pay one move point
//! 3. routes (real or granted by traits); a city at the end of a route
//!    takes the route cost as is
//! 4. embarking / disembarking
//! 5. flat-cost units pay one move point
//! 6. border obstacles, rough terrain, shore conversion end the turn
//! 7. friendly cities count as flat ground
//! 8. cargo landing with the flat embark trait is free
//! 9. terrain/feature cost with promotion modifiers, capped by the route cost
//!
//! The `movement_cost*` entry points check zone of control after rules 1-2
//! and before the rest, and clamp the result to the unit's budget.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::board::Hex;
use crate::modifiers::{self, PromotionModifiers};
use crate::rules::{MovementRules, PromotionModel};
use crate::terrain::Route;
use crate::units::{Domain, Promotion, Unit};
use crate::world::{CityEmbarkPolicy, PlayerTraits, Team, Tile, World};
use crate::zoc;

// ============================================================================
// RESULT TYPES
// ============================================================================

/// Raw cost of a step before budget clamping
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepCost {
    /// Fixed-point cost
    Moves(i32),
    /// Taking the step ends the turn, or it is not possible this turn
    EndsTurn,
}

impl StepCost {
    pub fn ends_turn(self) -> bool {
        self == StepCost::EndsTurn
    }
}

/// Why a step consumes all remaining movement
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Slowed by enemy zone of control; the step itself is legal
    ZoneOfControl,
    /// The cost model ends the turn or forbids the step this turn
    EndsTurn,
}

/// Movement deducted for a step, clamped to the unit's remaining movement
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveCost {
    pub moves: i32,
    pub stop: Option<StopReason>,
}

impl MoveCost {
    fn stopped(remaining: i32, reason: StopReason) -> Self {
        Self {
            moves: remaining,
            stop: Some(reason),
        }
    }
}

/// Movement available for a step, in fixed-point units
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveBudget {
    pub remaining: i32,
    /// Maximum movement the unit may keep in the domain it steps into
    pub max_for_new_domain: i32,
}

/// After a domain change the unit never keeps more than its new allowance;
/// the excess is added to the cost. The result never exceeds `remaining`.
pub fn clamp_to_budget(cost: i32, budget: MoveBudget) -> i32 {
    let left_over = budget.remaining.saturating_sub(cost);
    let cost = if left_over > budget.max_for_new_domain {
        cost + (left_over - budget.max_for_new_domain)
    } else {
        cost
    };
    cost.min(budget.remaining)
}

/// One step to evaluate in a batch
#[derive(Clone, Copy, Debug)]
pub struct StepRequest<'u> {
    pub unit: &'u Unit,
    pub from: Hex,
    pub to: Hex,
    pub remaining: i32,
}

/// Embark/disembark classification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EmbarkTransition {
    Free,
    Cheap,
    FullCost,
}

// ============================================================================
// EVALUATOR
// ============================================================================

/// Movement cost evaluator over a read-only world snapshot
pub struct UnitMovement<'a, W: World + ?Sized> {
    world: &'a W,
    rules: &'a MovementRules,
}

impl<'a, W: World + ?Sized> UnitMovement<'a, W> {
    pub fn new(world: &'a W, rules: &'a MovementRules) -> Self {
        Self { world, rules }
    }

    // ========================================================================
    // ENTRY POINTS
    // ========================================================================

    /// Cost of the step including zone of control
    pub fn movement_cost(
        &self,
        unit: &Unit,
        from: &Tile,
        to: &Tile,
        budget: MoveBudget,
        modifiers: PromotionModifiers,
    ) -> MoveCost {
        if self.early_terminal(unit, to).is_none() && self.is_slowed_by_zoc(unit, from, to) {
            return MoveCost::stopped(budget.remaining, StopReason::ZoneOfControl);
        }
        self.movement_cost_no_zoc(unit, from, to, budget, modifiers)
    }

    /// Cost of the step including zone of control, except from flank tiles in `ignore`
    pub fn movement_cost_selective_zoc(
        &self,
        unit: &Unit,
        from: &Tile,
        to: &Tile,
        budget: MoveBudget,
        modifiers: PromotionModifiers,
        ignore: &FxHashSet<Hex>,
    ) -> MoveCost {
        if self.early_terminal(unit, to).is_none()
            && self.is_slowed_by_zoc_ignoring(unit, from, to, ignore)
        {
            return MoveCost::stopped(budget.remaining, StopReason::ZoneOfControl);
        }
        self.movement_cost_no_zoc(unit, from, to, budget, modifiers)
    }

    /// Cost of the step without zone of control
    pub fn movement_cost_no_zoc(
        &self,
        unit: &Unit,
        from: &Tile,
        to: &Tile,
        budget: MoveBudget,
        modifiers: PromotionModifiers,
    ) -> MoveCost {
        match self.costs_for_move(unit, from, to, modifiers) {
            StepCost::EndsTurn => MoveCost::stopped(budget.remaining, StopReason::EndsTurn),
            StepCost::Moves(cost) => MoveCost {
                moves: clamp_to_budget(cost, budget),
                stop: None,
            },
        }
    }

    pub fn is_slowed_by_zoc(&self, unit: &Unit, from: &Tile, to: &Tile) -> bool {
        zoc::is_slowed_by_zoc(self.world, self.rules, unit, from, to)
    }

    pub fn is_slowed_by_zoc_ignoring(
        &self,
        unit: &Unit,
        from: &Tile,
        to: &Tile,
        ignore: &FxHashSet<Hex>,
    ) -> bool {
        zoc::is_slowed_by_zoc_ignoring(self.world, self.rules, unit, from, to, ignore)
    }

    /// Full allowance of the domain the unit is in on `tile`
    pub fn max_moves_for(&self, unit: &Unit, tile: &Tile) -> i32 {
        let moves = if tile.needs_embarkation(unit) {
            unit.embarked_moves
        } else {
            unit.base_moves
        };
        moves * self.rules.full_move()
    }

    /// Evaluate a step given by coordinates; `None` if either tile is missing
    pub fn evaluate(&self, request: &StepRequest<'_>) -> Option<MoveCost> {
        let from = self.world.tile(request.from)?;
        let to = self.world.tile(request.to)?;
        let budget = MoveBudget {
            remaining: request.remaining,
            max_for_new_domain: self.max_moves_for(request.unit, to),
        };
        Some(self.movement_cost(request.unit, from, to, budget, PromotionModifiers::LAZY))
    }

    pub fn movement_costs(&self, requests: &[StepRequest<'_>]) -> Vec<Option<MoveCost>> {
        requests.iter().map(|request| self.evaluate(request)).collect()
    }

    /// Batch evaluation across threads; the snapshot is only read
    #[cfg(feature = "parallel")]
    pub fn par_movement_costs(&self, requests: &[StepRequest<'_>]) -> Vec<Option<MoveCost>>
    where
        W: Sync,
    {
        use rayon::prelude::*;

        requests.par_iter().map(|request| self.evaluate(request)).collect()
    }

    // ========================================================================
    // COST MODEL
    // ========================================================================

    /// Raw cost of stepping from `from` to `to`, before zone of control and clamping
    pub fn costs_for_move(
        &self,
        unit: &Unit,
        from: &Tile,
        to: &Tile,
        modifiers: PromotionModifiers,
    ) -> StepCost {
        if let Some(cost) = self.early_terminal(unit, to) {
            return cost;
        }
        let full_move = self.rules.full_move();

        let traits = self.world.traits_of(unit.owner);
        let team = self.world.team(unit.team);
        let bridge_building = team.is_some_and(|t| t.bridge_building);
        let river_crossing = is_river_crossing(from, to);

        let route_from = self.has_valid_route(unit, from);
        let route_to = self.has_valid_route(unit, to);

        let route_cost = self.route_cost(unit, from, to, route_from, route_to, river_crossing, traits, team);
        if let Some(cost) = route_cost {
            if to.is_city() {
                return StepCost::Moves(cost);
            }
        }

        if unit.can_embark() {
            match self.embark_transition(unit, from, to, traits, team) {
                Some(EmbarkTransition::FullCost) => return StepCost::EndsTurn,
                Some(EmbarkTransition::Free) if !unit.cargo => {
                    return StepCost::Moves(self.rules.free_embark_cost)
                }
                Some(EmbarkTransition::Cheap) if !unit.cargo => return StepCost::Moves(full_move),
                _ => {}
            }
        }

        if unit.has(Promotion::FlatMovementCost) {
            return StepCost::Moves(full_move);
        }

        if self.is_blocked_by_border(unit, from, to) {
            tracing::trace!("unit {} stopped by border obstacle at {}", unit.id, to.hex);
            return StepCost::EndsTurn;
        }

        if to.is_rough(self.rules)
            && unit.has(Promotion::RoughTerrainEndsTurn)
            && !(route_from && route_to)
        {
            return StepCost::EndsTurn;
        }

        if unit.has(Promotion::ConvertsOnShore) && crosses_shore(unit.domain, from, to) {
            return StepCost::EndsTurn;
        }

        // cities count as flat open ground
        if to.is_city() && !self.is_at_war_with_owner(unit, to) && (!river_crossing || bridge_building) {
            return StepCost::Moves(full_move);
        }

        let regular_cost = if unit.cargo
            && unit.domain == Domain::Land
            && traits.embarked_to_land_flat_cost
            && to.coastal
            && !to.is_water()
            && from.is_water()
        {
            0
        } else {
            self.terrain_cost(unit, to, river_crossing, traits, modifiers)
        };

        // a route may still beat the terrain cost
        StepCost::Moves(route_cost.map_or(regular_cost, |route| regular_cost.min(route)))
    }

    /// Fog and air rules, which win over zone of control and everything else
    fn early_terminal(&self, unit: &Unit, to: &Tile) -> Option<StepCost> {
        if self.world.is_human(unit.owner) && !to.is_revealed(unit.team) {
            // path costs must not leak what lies under the fog
            tracing::trace!("unit {} stepping into unrevealed {}", unit.id, to.hex);
            return Some(StepCost::EndsTurn);
        }
        if unit.domain == Domain::Air {
            return Some(StepCost::Moves(self.rules.full_move()));
        }
        None
    }

    /// Route present, intact and usable by the unit
    fn has_valid_route(&self, unit: &Unit, tile: &Tile) -> bool {
        if tile.route.is_none() || tile.route_pillaged {
            return false;
        }
        let hostile_owner = self
            .world
            .tile_team(tile)
            .is_some_and(|owner| self.world.is_at_war(unit.team, owner));
        !hostile_owner || unit.has(Promotion::UseEnemyRoutes)
    }

    /// Trait-granted movement counting as a road on `tile`
    fn is_fake_route(&self, unit: &Unit, tile: &Tile, traits: PlayerTraits, along_river: bool) -> bool {
        if traits.river_movement_bonus && along_river {
            return true;
        }
        self.rules.promotion_model == PromotionModel::Multiplicative
            && traits.woodland_movement_bonus
            && tile.feature.is_some_and(|f| f.is_woodland())
            && (!self.rules.woodland_bonus_requires_ownership
                || self.world.tile_team(tile) == Some(unit.team))
    }

    #[allow(clippy::too_many_arguments)]
    fn route_cost(
        &self,
        unit: &Unit,
        from: &Tile,
        to: &Tile,
        route_from: bool,
        route_to: bool,
        river_crossing: bool,
        traits: PlayerTraits,
        team: Option<&Team>,
    ) -> Option<i32> {
        if unit.is_hovering() {
            return None;
        }
        if river_crossing && !team.is_some_and(|t| t.bridge_building) && !unit.is_amphibious() {
            return None;
        }

        // no check that both tiles sit on the same river
        let along_river = from.is_river() && to.is_river() && !river_crossing;
        let fake_from = self.is_fake_route(unit, from, traits, along_river);
        let fake_to = self.is_fake_route(unit, to, traits, along_river);
        if !(route_from || fake_from) || !(route_to || fake_to) {
            return None;
        }

        let from_route = if fake_from { Route::Road } else { from.route? };
        let to_route = if fake_to { Route::Road } else { to.route? };
        let (from_variable, from_flat) = self.rules.route_costs(from_route);
        let (to_variable, to_flat) = self.rules.route_costs(to_route);
        let change = |route: Route| team.map_or(0, |t| t.route_change(route));

        // routes only exist on land, so the native allowance applies
        let variable = from_variable
            .saturating_add(change(from_route))
            .max(to_variable.saturating_add(change(to_route)));
        let flat = from_flat.max(to_flat).saturating_mul(unit.base_moves);
        Some(variable.min(flat))
    }

    fn embark_transition(
        &self,
        unit: &Unit,
        from: &Tile,
        to: &Tile,
        traits: PlayerTraits,
        team: Option<&Team>,
    ) -> Option<EmbarkTransition> {
        let (flat_cost_promotion, harbor) = match (from.needs_embarkation(unit), to.needs_embarkation(unit)) {
            (true, false) => (Promotion::DisembarkFlatCost, to),
            (false, true) => (Promotion::EmbarkFlatCost, from),
            _ => return None,
        };

        let mut cheap = traits.embarked_to_land_flat_cost || unit.has(flat_cost_promotion);
        let mut free = false;
        if harbor.is_coastal_haven(unit.owner) {
            match team.map_or(CityEmbarkPolicy::Normal, |t| t.city_embark) {
                CityEmbarkPolicy::Free => free = true,
                CityEmbarkPolicy::Reduced => cheap = true,
                CityEmbarkPolicy::Normal => {}
            }
        }

        Some(if free {
            EmbarkTransition::Free
        } else if cheap {
            EmbarkTransition::Cheap
        } else {
            EmbarkTransition::FullCost
        })
    }

    /// Great-wall style obstacles at the borders of a team without open borders
    fn is_blocked_by_border(&self, unit: &Unit, from: &Tile, to: &Tile) -> bool {
        let Some(to_team) = self.world.tile_team(to) else {
            return false;
        };
        if to_team == unit.team || Some(to_team) == self.world.tile_team(from) {
            return false;
        }
        if self.world.allows_open_borders(to_team, unit.team) {
            return false;
        }

        let land_step = !to.is_water() && unit.domain == Domain::Land;
        let team_obstacle = self.world.team(to_team).is_some_and(|t| t.border_obstacle);
        let player_obstacle = to.owner.is_some_and(|p| self.world.traits_of(p).border_obstacle);
        if land_step && (team_obstacle || player_obstacle) {
            return true;
        }

        let Some(city) = to.owning_city.and_then(|id| self.world.city(id)) else {
            return false;
        };
        if land_step && city.border_obstacle_land {
            return true;
        }
        to.is_water()
            && city.border_obstacle_water
            && (unit.domain == Domain::Sea || to.needs_embarkation(unit))
    }

    fn is_at_war_with_owner(&self, unit: &Unit, tile: &Tile) -> bool {
        self.world
            .tile_team(tile)
            .is_some_and(|owner| self.world.is_at_war(unit.team, owner))
    }

    /// Terrain/feature path: base cost, surcharges, discount, promotions
    fn terrain_cost(
        &self,
        unit: &Unit,
        to: &Tile,
        river_crossing: bool,
        traits: PlayerTraits,
        modifiers: PromotionModifiers,
    ) -> i32 {
        let rules = self.rules;
        let full_move = rules.full_move();
        let amphibious = unit.is_amphibious();

        // ignoring terrain cost is not flat movement: promotions still apply
        let mut ignore_terrain = unit.has(Promotion::IgnoreTerrainCost)
            || (rules.amphibious_ignores_river_terrain && amphibious && river_crossing)
            || (traits.faster_in_hills && to.is_hills())
            || (traits.mountain_pass && to.is_mountain());

        let mut adder = modifiers.adder;
        if rules.promotion_model == PromotionModel::Combined {
            let change = adder.unwrap_or_else(|| modifiers::cost_change(rules, unit, to));
            if change < 0 {
                ignore_terrain = true;
                adder = Some(0);
            } else {
                adder = Some(change);
            }
        }

        let rivers_allowed =
            !river_crossing || unit.is_hovering() || amphibious || rules.ignore_terrain_cost_includes_rivers;
        let mut cost = if ignore_terrain && rivers_allowed {
            1
        } else {
            let mut base = match to.feature {
                Some(feature) => rules.feature_cost(feature),
                None => rules.terrain_cost(to.terrain),
            };
            if to.is_hills() || to.is_mountain() {
                base += rules.hills_extra_movement;
            }
            if river_crossing && !amphibious && unit.domain == Domain::Land {
                base += rules.river_extra_movement;
            }
            base
        };

        if cost > 0 {
            cost = (cost - unit.extra_move_discount()).max(1);
        }
        cost = cost.saturating_mul(full_move);

        if rules.promotion_model == PromotionModel::Multiplicative {
            let multiplier = modifiers
                .multiplier
                .unwrap_or_else(|| modifiers::cost_multiplier(rules, unit, to));
            cost = cost.saturating_mul(multiplier) / full_move;
        }
        cost = cost.saturating_add(adder.unwrap_or_else(|| modifiers::cost_adder(rules, unit, to)));

        if self.is_slowed_in_enemy_land(unit, to) {
            cost = cost.saturating_add(full_move);
        }
        cost
    }

    fn is_slowed_in_enemy_land(&self, unit: &Unit, to: &Tile) -> bool {
        let foreign = self.world.tile_team(to).is_some_and(|owner| owner != unit.team);
        foreign
            && !self.world.is_friendly_territory(to, unit.team)
            && unit.has(Promotion::SlowInEnemyLand)
    }
}

/// Step crosses a river edge between two river tiles
fn is_river_crossing(from: &Tile, to: &Tile) -> bool {
    from.is_river()
        && to.is_river()
        && from
            .hex
            .direction_to(to.hex)
            .is_some_and(|direction| from.is_river_crossing(direction))
}

/// Sea unit reaching land, or land unit reaching water
fn crosses_shore(domain: Domain, from: &Tile, to: &Tile) -> bool {
    match domain {
        Domain::Sea => !to.is_water() && from.is_water(),
        Domain::Land => to.is_water() && !from.is_water(),
        Domain::Air => false,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{NORTH, SOUTH};
    use crate::ids::{PlayerId, TeamId};
    use crate::terrain::{Feature, Terrain};
    use crate::world::{Player, WorldMap};

    fn world() -> WorldMap {
        let mut world = WorldMap::filled(4, 4, Terrain::Plains);
        world.add_team(Team::new(0));
        world.add_player(Player::new(0, 0));
        world
    }

    fn warrior() -> Unit {
        Unit::new(1, PlayerId(0), TeamId(0), Domain::Land, 2)
    }

    fn tile(world: &WorldMap, q: i32, r: i32) -> Tile {
        world.tile(Hex::new(q, r)).cloned().unwrap()
    }

    #[test]
    fn test_clamp_folds_domain_excess() {
        let budget = MoveBudget { remaining: 180, max_for_new_domain: 60 };
        assert_eq!(clamp_to_budget(12, budget), 120);
    }

    #[test]
    fn test_clamp_never_exceeds_remaining() {
        let budget = MoveBudget { remaining: 60, max_for_new_domain: 120 };
        assert_eq!(clamp_to_budget(120, budget), 60);
        assert_eq!(clamp_to_budget(30, budget), 30);
        assert_eq!(clamp_to_budget(i32::MAX, budget), 60);
    }

    #[test]
    fn test_plains_cost_one_move() {
        let world = world();
        let rules = MovementRules::default();
        let eval = UnitMovement::new(&world, &rules);
        let cost = eval.costs_for_move(&warrior(), &tile(&world, 1, 1), &tile(&world, 1, 0), PromotionModifiers::LAZY);
        assert_eq!(cost, StepCost::Moves(60));
    }

    #[test]
    fn test_river_crossing_surcharge() {
        let mut world = world();
        world.insert_tile(Tile::new(Hex::new(1, 1), Terrain::Plains).with_river(NORTH));
        world.insert_tile(Tile::new(Hex::new(1, 0), Terrain::Plains).with_river(SOUTH));
        let rules = MovementRules::default();
        let eval = UnitMovement::new(&world, &rules);
        let (from, to) = (tile(&world, 1, 1), tile(&world, 1, 0));

        let cost = eval.costs_for_move(&warrior(), &from, &to, PromotionModifiers::LAZY);
        assert_eq!(cost, StepCost::Moves(11 * 60));

        // amphibious units ignore both the surcharge and the terrain
        let marine = warrior().with_promotion(Promotion::Amphibious);
        assert_eq!(eval.costs_for_move(&marine, &from, &to, PromotionModifiers::LAZY), StepCost::Moves(60));
    }

    #[test]
    fn test_ignore_terrain_cost_and_rivers_option() {
        let mut world = world();
        world.insert_tile(Tile::new(Hex::new(1, 1), Terrain::Plains).with_river(NORTH));
        world.insert_tile(
            Tile::new(Hex::new(1, 0), Terrain::Plains)
                .with_hills()
                .with_feature(Feature::Forest)
                .with_river(SOUTH),
        );
        let unit = warrior().with_promotion(Promotion::IgnoreTerrainCost);
        let (from, to) = (tile(&world, 1, 1), tile(&world, 1, 0));

        let rules = MovementRules::default();
        let eval = UnitMovement::new(&world, &rules);
        assert_eq!(eval.costs_for_move(&unit, &from, &to, PromotionModifiers::LAZY), StepCost::Moves(60));

        let strict = MovementRules { ignore_terrain_cost_includes_rivers: false, ..MovementRules::default() };
        let eval = UnitMovement::new(&world, &strict);
        // forest 2 + hills 1 + river 10
        assert_eq!(eval.costs_for_move(&unit, &from, &to, PromotionModifiers::LAZY), StepCost::Moves(13 * 60));
    }

    #[test]
    fn test_discount_floors_at_one() {
        let mut world = world();
        world.insert_tile(Tile::new(Hex::new(1, 0), Terrain::Plains).with_feature(Feature::Forest));
        let rules = MovementRules::default();
        let eval = UnitMovement::new(&world, &rules);
        let unit = warrior().with_promotion(Promotion::ExtraMoveDiscount { amount: 5 });
        let cost = eval.costs_for_move(&unit, &tile(&world, 1, 1), &tile(&world, 1, 0), PromotionModifiers::LAZY);
        assert_eq!(cost, StepCost::Moves(60));
    }

    #[test]
    fn test_huge_table_cost_saturates() {
        let world = world();
        let mut rules = MovementRules::default();
        rules.terrains.get_mut(&Terrain::Plains).unwrap().move_cost = 100_000_000;
        let eval = UnitMovement::new(&world, &rules);
        let (from, to) = (tile(&world, 1, 1), tile(&world, 1, 0));

        let cost = eval.costs_for_move(&warrior(), &from, &to, PromotionModifiers::LAZY);
        assert!(matches!(cost, StepCost::Moves(moves) if moves > 1_000_000));
        let budget = MoveBudget { remaining: 120, max_for_new_domain: 120 };
        let clamped = eval.movement_cost_no_zoc(&warrior(), &from, &to, budget, PromotionModifiers::LAZY);
        assert_eq!(clamped, MoveCost { moves: 120, stop: None });
    }

    #[test]
    fn test_precomputed_modifiers_are_used() {
        let world = world();
        let rules = MovementRules::default();
        let eval = UnitMovement::new(&world, &rules);
        let (from, to) = (tile(&world, 1, 1), tile(&world, 1, 0));
        let modifiers = PromotionModifiers { multiplier: Some(30), adder: Some(15) };
        assert_eq!(eval.costs_for_move(&warrior(), &from, &to, modifiers), StepCost::Moves(45));
    }

    #[test]
    fn test_shore_conversion_ends_turn() {
        let mut world = world();
        world.insert_tile(Tile::new(Hex::new(1, 0), Terrain::Coast));
        let rules = MovementRules::default();
        let eval = UnitMovement::new(&world, &rules);
        let mut boat = Unit::new(2, PlayerId(0), TeamId(0), Domain::Sea, 4);
        boat.promotions.push(Promotion::ConvertsOnShore);
        let cost = eval.costs_for_move(&boat, &tile(&world, 1, 0), &tile(&world, 1, 1), PromotionModifiers::LAZY);
        assert_eq!(cost, StepCost::EndsTurn);

        let plain_boat = Unit::new(3, PlayerId(0), TeamId(0), Domain::Sea, 4);
        let cost = eval.costs_for_move(&plain_boat, &tile(&world, 1, 0), &tile(&world, 1, 1), PromotionModifiers::LAZY);
        assert!(!cost.ends_turn());
    }

    #[test]
    fn test_max_moves_for_domain() {
        let mut world = world();
        world.insert_tile(Tile::new(Hex::new(1, 0), Terrain::Ocean));
        let rules = MovementRules::default();
        let eval = UnitMovement::new(&world, &rules);
        let mut unit = warrior();
        unit.embarked_moves = 3;
        assert_eq!(eval.max_moves_for(&unit, &tile(&world, 1, 1)), 120);
        assert_eq!(eval.max_moves_for(&unit, &tile(&world, 1, 0)), 180);
    }
}
