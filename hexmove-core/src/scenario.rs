//! Scenario files: a JSON description of a world snapshot
//!
//! ```json
//! {
//!   "fill": { "width": 6, "height": 6, "terrain": "grassland" },
//!   "tiles": [{ "hex": { "q": 2, "r": 1 }, "terrain": "plains", "hills": true, "feature": "forest" }],
//!   "teams": [{ "id": 0 }, { "id": 1 }],
//!   "players": [{ "id": 0, "team": 0 }, { "id": 1, "team": 1 }],
//!   "wars": [[0, 1]],
//!   "units": [{ "hex": { "q": 2, "r": 2 }, "id": 1, "owner": 0, "team": 0,
//!               "domain": "land", "base_moves": 2 }]
//! }
//! ```
//!
//! Explicit `tiles` replace filled ones but must not repeat each other.

use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::board::Hex;
use crate::error::ScenarioError;
use crate::ids::{TeamId, UnitId};
use crate::rules::MovementRules;
use crate::terrain::Terrain;
use crate::units::Unit;
use crate::world::{City, Player, Team, Tile, World, WorldMap};

/// Rectangle of uniform tiles laid down before the explicit ones
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Fill {
    pub width: i32,
    pub height: i32,
    pub terrain: Terrain,
}

/// A unit and the tile it stands on
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Placement {
    pub hex: Hex,
    #[serde(flatten)]
    pub unit: Unit,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub name: Option<String>,
    pub fill: Option<Fill>,
    pub tiles: Vec<Tile>,
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
    pub cities: Vec<City>,
    /// Pairs of teams at war
    pub wars: Vec<(TeamId, TeamId)>,
    pub units: Vec<Placement>,
    /// Keep `revealed_to` as written; otherwise every tile is revealed to every team
    pub fog: bool,
    /// Rules shipped with the scenario, overridable by the caller
    pub rules: Option<MovementRules>,
}

impl Scenario {
    pub fn from_json(content: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_json::from_str(content)?;
        if let Some(rules) = &scenario.rules {
            rules.validate()?;
        }
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario = Self::from_json(&content)?;
        tracing::debug!(
            "Loaded scenario {} ({} tiles, {} units)",
            scenario.name.clone().unwrap_or_else(|| path.display().to_string()),
            scenario.tiles.len(),
            scenario.units.len()
        );
        Ok(scenario)
    }

    /// Rules of the scenario, or the stock rules
    pub fn rules_or_default(&self) -> MovementRules {
        self.rules.clone().unwrap_or_default()
    }

    /// Build the world snapshot
    pub fn build(&self) -> Result<WorldMap, ScenarioError> {
        let mut world = match self.fill {
            Some(fill) => WorldMap::filled(fill.width, fill.height, fill.terrain),
            None => WorldMap::new(),
        };

        let mut explicit = FxHashSet::default();
        for tile in &self.tiles {
            if !explicit.insert(tile.hex) {
                return Err(ScenarioError::DuplicateTile(tile.hex));
            }
            world.insert_tile(tile.clone());
        }

        for team in &self.teams {
            world.add_team(team.clone());
        }
        for player in &self.players {
            world.add_player(player.clone());
        }
        for city in &self.cities {
            world.add_city(city.clone());
        }
        for &(a, b) in &self.wars {
            world.declare_war(a, b);
        }

        let mut seen: FxHashSet<UnitId> = FxHashSet::default();
        for placement in &self.units {
            let id = placement.unit.id;
            if !seen.insert(id) {
                return Err(ScenarioError::DuplicateUnit(id.0));
            }
            if world.tile(placement.hex).is_none() {
                return Err(ScenarioError::UnitOffMap { unit: id.0, hex: placement.hex });
            }
            world.place_unit(placement.hex, placement.unit.clone());
        }

        if !self.fog {
            let teams: FxHashSet<TeamId> = self
                .teams
                .iter()
                .map(|t| t.id)
                .chain(self.players.iter().map(|p| p.team))
                .collect();
            for team in teams {
                world.reveal_all(team);
            }
        }

        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::PlayerId;

    const SAMPLE: &str = r#"{
        "name": "river crossing",
        "fill": { "width": 4, "height": 4, "terrain": "plains" },
        "tiles": [
            { "hex": { "q": 1, "r": 1 }, "terrain": "plains", "hills": true, "feature": "forest", "river_edges": 1 }
        ],
        "teams": [{ "id": 0 }, { "id": 1, "bridge_building": true }],
        "players": [{ "id": 0, "team": 0, "human": true }, { "id": 1, "team": 1 }],
        "wars": [[0, 1]],
        "units": [
            { "hex": { "q": 0, "r": 0 }, "id": 1, "owner": 0, "team": 0, "domain": "land", "base_moves": 2 },
            { "hex": { "q": 2, "r": 2 }, "id": 2, "owner": 1, "team": 1, "domain": "land", "base_moves": 2,
              "promotions": [{ "kind": "ignore_zone_of_control" }] }
        ]
    }"#;

    #[test]
    fn test_build_sample() {
        let scenario = Scenario::from_json(SAMPLE).unwrap();
        let world = scenario.build().unwrap();

        assert_eq!(world.tile_count(), 16);
        let hill = world.tile(Hex::new(1, 1)).unwrap();
        assert!(hill.is_hills());
        assert!(hill.is_river());
        assert!(world.is_at_war(TeamId(1), TeamId(0)));
        assert!(world.team(TeamId(1)).unwrap().bridge_building);
        assert!(world.is_human(PlayerId(0)));
        assert!(hill.is_revealed(TeamId(0)));

        let (hex, unit) = world.find_unit(UnitId(2)).unwrap();
        assert_eq!(hex, Hex::new(2, 2));
        assert!(unit.ignores_zoc());
        assert!(unit.combat);
    }

    #[test]
    fn test_fog_keeps_revealed_set() {
        let mut scenario = Scenario::from_json(SAMPLE).unwrap();
        scenario.fog = true;
        let world = scenario.build().unwrap();
        assert!(!world.tile(Hex::new(1, 1)).unwrap().is_revealed(TeamId(0)));
    }

    #[test]
    fn test_duplicate_tile_rejected() {
        let mut scenario = Scenario::from_json(SAMPLE).unwrap();
        scenario.tiles.push(Tile::new(Hex::new(1, 1), Terrain::Desert));
        assert!(matches!(scenario.build(), Err(ScenarioError::DuplicateTile(h)) if h == Hex::new(1, 1)));
    }

    #[test]
    fn test_unit_errors() {
        let mut scenario = Scenario::from_json(SAMPLE).unwrap();
        let mut stray = scenario.units[0].clone();
        stray.hex = Hex::new(9, 9);
        stray.unit.id = UnitId(3);
        scenario.units.push(stray);
        assert!(matches!(scenario.build(), Err(ScenarioError::UnitOffMap { unit: 3, .. })));

        let mut scenario = Scenario::from_json(SAMPLE).unwrap();
        let twin = scenario.units[1].clone();
        scenario.units.push(twin);
        assert!(matches!(scenario.build(), Err(ScenarioError::DuplicateUnit(2))));
    }

    #[test]
    fn test_scenario_rules_are_validated() {
        let json = r#"{ "rules": { "move_denominator": 0 } }"#;
        assert!(matches!(Scenario::from_json(json), Err(ScenarioError::Rules(_))));

        let json = r#"{ "rules": { "promotion_model": "combined" } }"#;
        let scenario = Scenario::from_json(json).unwrap();
        let rules = scenario.rules_or_default();
        assert_eq!(rules.promotion_model, crate::rules::PromotionModel::Combined);
        assert_eq!(rules.move_denominator, 60);
    }
}
