//! Zone of control
//!
//! A step is slowed when one of the two tiles flanking it holds an enemy city
//! or a visible, hostile, non-embarked combat unit able to reach the mover's
//! domain. Only the flanks are examined: on a hex grid they are the only
//! tiles touching both ends of the step.

use rustc_hash::FxHashSet;

use crate::board::Hex;
use crate::rules::MovementRules;
use crate::units::{Domain, Unit};
use crate::world::{Tile, World};

/// Whether the step `from -> to` ends the unit's movement through zone of control
pub fn is_slowed_by_zoc<W: World + ?Sized>(
    world: &W,
    rules: &MovementRules,
    unit: &Unit,
    from: &Tile,
    to: &Tile,
) -> bool {
    slowed_by_zoc(world, rules, unit, from, to, None)
}

/// Like [`is_slowed_by_zoc`], disregarding flank tiles listed in `ignore`
pub fn is_slowed_by_zoc_ignoring<W: World + ?Sized>(
    world: &W,
    rules: &MovementRules,
    unit: &Unit,
    from: &Tile,
    to: &Tile,
    ignore: &FxHashSet<Hex>,
) -> bool {
    let skip: &dyn Fn(Hex) -> bool = &|hex| ignore.contains(&hex);
    slowed_by_zoc(world, rules, unit, from, to, Some(skip))
}

/// Shared implementation; `skip` filters out flank tiles before inspection
pub(crate) fn slowed_by_zoc<W: World + ?Sized>(
    world: &W,
    rules: &MovementRules,
    unit: &Unit,
    from: &Tile,
    to: &Tile,
    skip: Option<&dyn Fn(Hex) -> bool>,
) -> bool {
    // aircraft don't step between tiles
    if unit.ignores_zoc() || unit.domain == Domain::Air || !rules.zone_of_control_enabled {
        return false;
    }

    let Some(direction) = from.hex.direction_to(to.hex) else {
        return false;
    };

    for flank in from.hex.flanks(direction) {
        if skip.is_some_and(|skip| skip(flank)) {
            continue;
        }
        let Some(flank_tile) = world.tile(flank) else {
            continue;
        };

        if world.is_enemy_city(flank_tile, unit) {
            tracing::trace!("unit {} slowed by enemy city at {}", unit.id, flank);
            return true;
        }

        let exerting = world
            .units_at(flank)
            .iter()
            .filter(|other| other.owner != unit.owner)
            .find(|other| exerts_zoc_on(world, unit, other, from, to));
        if let Some(other) = exerting {
            tracing::trace!("unit {} slowed by unit {} at {}", unit.id, other.id, flank);
            return true;
        }
    }

    false
}

fn exerts_zoc_on<W: World + ?Sized>(
    world: &W,
    unit: &Unit,
    other: &Unit,
    from: &Tile,
    to: &Tile,
) -> bool {
    if other.delayed_death || other.is_invisible_to(unit.team) {
        return false;
    }
    if !other.combat || other.embarked {
        return false;
    }

    let hostile = world.is_barbarian(other.team)
        || world.is_at_war(unit.team, other.team)
        || other.always_hostile;
    if !hostile {
        return false;
    }

    let from_embarked = from.needs_embarkation(unit);
    let to_embarked = to.needs_embarkation(unit);

    if other.domain != unit.domain {
        // hovering units reach every domain; ships reach embarking land units
        other.is_hovering() || (other.domain == Domain::Sea && (from_embarked || to_embarked))
    } else {
        // land units don't reach units that stay embarked
        !(other.domain == Domain::Land && from_embarked && to_embarked)
    }
}

// ============================================================================
// TESTS
// ============================================================================
