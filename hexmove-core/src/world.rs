//! Read-only world snapshot: tiles, stationed units, players, teams and cities
//!
//! The movement rules only ever read through the [`World`] trait. [`WorldMap`]
//! is the in-memory implementation used by tests, the CLI and embedders that
//! don't already have their own storage.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::board::{edge_bit, Hex};
use crate::ids::{CityId, PlayerId, TeamId};
use crate::rules::MovementRules;
use crate::terrain::{Feature, Route, Terrain};
use crate::units::{Domain, Unit};

// ============================================================================
// TILE
// ============================================================================

/// A map tile
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tile {
    pub hex: Hex,
    /// Base terrain, also on hills
    pub terrain: Terrain,
    /// Hills raised over the base terrain
    #[serde(default)]
    pub hills: bool,
    #[serde(default)]
    pub feature: Option<Feature>,
    #[serde(default)]
    pub route: Option<Route>,
    #[serde(default)]
    pub route_pillaged: bool,
    /// Player whose borders contain the tile
    #[serde(default)]
    pub owner: Option<PlayerId>,
    /// City standing on this tile
    #[serde(default)]
    pub city: Option<CityId>,
    /// City whose borders contain this tile
    #[serde(default)]
    pub owning_city: Option<CityId>,
    /// Land tile adjacent to water
    #[serde(default)]
    pub coastal: bool,
    /// Fort or canal that ships may enter
    #[serde(default)]
    pub passable_improvement: bool,
    /// Bit `d` set: a river runs along the edge in direction `d`
    #[serde(default)]
    pub river_edges: u8,
    #[serde(default)]
    pub revealed_to: Vec<TeamId>,
}

impl Tile {
    pub fn new(hex: Hex, terrain: Terrain) -> Self {
        Self {
            hex,
            terrain,
            hills: false,
            feature: None,
            route: None,
            route_pillaged: false,
            owner: None,
            city: None,
            owning_city: None,
            coastal: false,
            passable_improvement: false,
            river_edges: 0,
            revealed_to: Vec::new(),
        }
    }

    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.feature = Some(feature);
        self
    }

    pub fn with_hills(mut self) -> Self {
        self.hills = true;
        self
    }

    pub fn with_route(mut self, route: Route) -> Self {
        self.route = Some(route);
        self
    }

    pub fn with_owner(mut self, owner: PlayerId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_river(mut self, direction: u8) -> Self {
        self.river_edges |= edge_bit(direction);
        self
    }

    pub fn is_water(&self) -> bool {
        self.terrain.is_water()
    }

    pub fn is_hills(&self) -> bool {
        self.hills
    }

    pub fn is_mountain(&self) -> bool {
        self.terrain == Terrain::Mountain
    }

    pub fn is_city(&self) -> bool {
        self.city.is_some()
    }

    /// Rough terrain, hills or a rough feature, as flagged in the rule tables.
    /// Hills read the [`Terrain::Hill`] entry.
    pub fn is_rough(&self, rules: &MovementRules) -> bool {
        rules.is_rough_terrain(self.terrain)
            || (self.hills && rules.is_rough_terrain(Terrain::Hill))
            || self.feature.is_some_and(|f| rules.is_rough_feature(f))
    }

    pub fn is_river(&self) -> bool {
        self.river_edges != 0
    }

    pub fn is_river_crossing(&self, direction: u8) -> bool {
        self.river_edges & edge_bit(direction) != 0
    }

    pub fn is_revealed(&self, team: TeamId) -> bool {
        self.revealed_to.contains(&team)
    }

    /// Land units must embark to enter open water
    pub fn needs_embarkation(&self, unit: &Unit) -> bool {
        unit.domain == Domain::Land && self.is_water() && !self.is_city() && !unit.is_hovering()
    }

    /// Coastal city or passable improvement owned by `player`
    pub fn is_coastal_haven(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
            && (self.passable_improvement || (self.is_city() && self.coastal))
    }
}

// ============================================================================
// PLAYERS, TEAMS, CITIES
// ============================================================================

/// Civilization-wide movement traits
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTraits {
    /// Moving along rivers counts as a road
    pub river_movement_bonus: bool,
    /// Forest and jungle count as roads
    pub woodland_movement_bonus: bool,
    /// Embarking and disembarking cost a single move point
    pub embarked_to_land_flat_cost: bool,
    pub faster_in_hills: bool,
    pub mountain_pass: bool,
    /// Borders end the turn of foreign land units (great wall)
    pub border_obstacle: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub team: TeamId,
    #[serde(default)]
    pub human: bool,
    #[serde(default)]
    pub traits: PlayerTraits,
}

impl Player {
    pub fn new(id: u16, team: u16) -> Self {
        Self {
            id: PlayerId(id),
            team: TeamId(team),
            human: false,
            traits: PlayerTraits::default(),
        }
    }
}

/// Team-wide reduction of the embark/disembark penalty at own coastal cities
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CityEmbarkPolicy {
    #[default]
    Normal,
    /// One move point
    Reduced,
    /// Only the configured free embark cost
    Free,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Team {
    pub id: TeamId,
    /// Hostile to everyone
    pub barbarian: bool,
    pub at_war_with: FxHashSet<TeamId>,
    /// Teams this team lets through its borders
    pub open_borders_to: FxHashSet<TeamId>,
    pub border_obstacle: bool,
    /// Roads connect across rivers
    pub bridge_building: bool,
    /// Fixed-point adjustment added to each route's variable cost
    pub route_change: FxHashMap<Route, i32>,
    pub city_embark: CityEmbarkPolicy,
}

impl Team {
    pub fn new(id: u16) -> Self {
        Self {
            id: TeamId(id),
            ..Self::default()
        }
    }

    pub fn is_at_war(&self, other: TeamId) -> bool {
        self.at_war_with.contains(&other)
    }

    pub fn route_change(&self, route: Route) -> i32 {
        self.route_change.get(&route).copied().unwrap_or(0)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub owner: PlayerId,
    pub team: TeamId,
    /// Land units of teams without open borders end their turn on entry
    #[serde(default)]
    pub border_obstacle_land: bool,
    /// Same for ships and embarked units on the city's water tiles
    #[serde(default)]
    pub border_obstacle_water: bool,
}

// ============================================================================
// WORLD TRAIT
// ============================================================================

/// Read-only queries the movement rules need from the game state
pub trait World {
    fn tile(&self, hex: Hex) -> Option<&Tile>;

    /// Units stationed on a tile, in stacking order
    fn units_at(&self, hex: Hex) -> &[Unit];

    fn player(&self, id: PlayerId) -> Option<&Player>;

    fn team(&self, id: TeamId) -> Option<&Team>;

    fn city(&self, id: CityId) -> Option<&City>;

    fn is_at_war(&self, team: TeamId, other: TeamId) -> bool {
        self.team(team).is_some_and(|t| t.is_at_war(other))
    }

    fn is_barbarian(&self, team: TeamId) -> bool {
        self.team(team).is_some_and(|t| t.barbarian)
    }

    /// Whether `owner` opens its borders to `visitor`
    fn allows_open_borders(&self, owner: TeamId, visitor: TeamId) -> bool {
        self.team(owner).is_some_and(|t| t.open_borders_to.contains(&visitor))
    }

    fn traits_of(&self, player: PlayerId) -> PlayerTraits {
        self.player(player).map(|p| p.traits).unwrap_or_default()
    }

    fn is_human(&self, player: PlayerId) -> bool {
        self.player(player).is_some_and(|p| p.human)
    }

    /// Team owning the tile, if any
    fn tile_team(&self, tile: &Tile) -> Option<TeamId> {
        tile.owner.and_then(|owner| self.player(owner)).map(|p| p.team)
    }

    /// Own territory or territory of a team granting open borders
    fn is_friendly_territory(&self, tile: &Tile, team: TeamId) -> bool {
        match self.tile_team(tile) {
            Some(owner) => owner == team || self.allows_open_borders(owner, team),
            None => false,
        }
    }

    /// City on the tile belonging to a team at war with the unit
    fn is_enemy_city(&self, tile: &Tile, unit: &Unit) -> bool {
        tile.city
            .and_then(|id| self.city(id))
            .is_some_and(|city| self.is_at_war(unit.team, city.team) || self.is_barbarian(city.team))
    }
}

// ============================================================================
// IN-MEMORY SNAPSHOT
// ============================================================================

/// Hash-map backed world snapshot
#[derive(Clone, Debug, Default)]
pub struct WorldMap {
    tiles: FxHashMap<Hex, Tile>,
    units: FxHashMap<Hex, Vec<Unit>>,
    players: FxHashMap<PlayerId, Player>,
    teams: FxHashMap<TeamId, Team>,
    cities: FxHashMap<CityId, City>,
}

impl WorldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rectangle of identical tiles in axial coordinates
    pub fn filled(width: i32, height: i32, terrain: Terrain) -> Self {
        let mut world = Self::new();
        for q in 0..width {
            for r in 0..height {
                world.insert_tile(Tile::new(Hex::new(q, r), terrain));
            }
        }
        world
    }

    /// Insert or replace a tile, returning the previous one
    pub fn insert_tile(&mut self, tile: Tile) -> Option<Tile> {
        self.tiles.insert(tile.hex, tile)
    }

    pub fn tile_mut(&mut self, hex: Hex) -> Option<&mut Tile> {
        self.tiles.get_mut(&hex)
    }

    /// Station a unit on a tile (appended to the stack)
    pub fn place_unit(&mut self, hex: Hex, unit: Unit) {
        self.units.entry(hex).or_default().push(unit);
    }

    pub fn add_player(&mut self, player: Player) {
        self.players.insert(player.id, player);
    }

    pub fn add_team(&mut self, team: Team) {
        self.teams.insert(team.id, team);
    }

    pub fn team_mut(&mut self, id: TeamId) -> Option<&mut Team> {
        self.teams.get_mut(&id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    pub fn add_city(&mut self, city: City) {
        self.cities.insert(city.id, city);
    }

    /// Put both teams at war with each other
    pub fn declare_war(&mut self, a: TeamId, b: TeamId) {
        self.teams.entry(a).or_insert_with(|| Team::new(a.0)).at_war_with.insert(b);
        self.teams.entry(b).or_insert_with(|| Team::new(b.0)).at_war_with.insert(a);
    }

    /// Reveal every tile to `team`
    pub fn reveal_all(&mut self, team: TeamId) {
        for tile in self.tiles.values_mut() {
            if !tile.is_revealed(team) {
                tile.revealed_to.push(team);
            }
        }
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Find a stationed unit by id
    pub fn find_unit(&self, id: crate::ids::UnitId) -> Option<(Hex, &Unit)> {
        self.units
            .iter()
            .find_map(|(&hex, stack)| stack.iter().find(|u| u.id == id).map(|u| (hex, u)))
    }
}

impl World for WorldMap {
    fn tile(&self, hex: Hex) -> Option<&Tile> {
        self.tiles.get(&hex)
    }

    fn units_at(&self, hex: Hex) -> &[Unit] {
        self.units.get(&hex).map_or(&[], Vec::as_slice)
    }

    fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(&id)
    }

    fn city(&self, id: CityId) -> Option<&City> {
        self.cities.get(&id)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{NORTH, SOUTH};
    use crate::units::Promotion;

    fn two_teams() -> WorldMap {
        let mut world = WorldMap::filled(3, 3, Terrain::Grassland);
        world.add_team(Team::new(0));
        world.add_team(Team::new(1));
        world.add_player(Player::new(0, 0));
        world.add_player(Player::new(1, 1));
        world
    }

    #[test]
    fn test_needs_embarkation() {
        let land = Unit::new(1, PlayerId(0), TeamId(0), Domain::Land, 2);
        let ship = Unit::new(2, PlayerId(0), TeamId(0), Domain::Sea, 4);
        let hover = land.clone().with_promotion(Promotion::Hover);
        let coast = Tile::new(Hex::new(0, 0), Terrain::Coast);

        assert!(coast.needs_embarkation(&land));
        assert!(!coast.needs_embarkation(&ship));
        assert!(!coast.needs_embarkation(&hover));
        assert!(!Tile::new(Hex::new(0, 0), Terrain::Plains).needs_embarkation(&land));
    }

    #[test]
    fn test_rough_ground() {
        let rules = MovementRules::default();
        let hill = Tile::new(Hex::new(0, 0), Terrain::Grassland).with_hills();
        assert!(hill.is_hills());
        assert_eq!(hill.terrain, Terrain::Grassland);
        assert!(hill.is_rough(&rules));
        assert!(Tile::new(Hex::new(0, 0), Terrain::Plains)
            .with_feature(Feature::Jungle)
            .is_rough(&rules));
        assert!(!Tile::new(Hex::new(0, 0), Terrain::Plains).is_rough(&rules));
    }

    #[test]
    fn test_river_edges() {
        let tile = Tile::new(Hex::new(0, 0), Terrain::Plains).with_river(NORTH);
        assert!(tile.is_river());
        assert!(tile.is_river_crossing(NORTH));
        assert!(!tile.is_river_crossing(SOUTH));
    }

    #[test]
    fn test_war_is_symmetric() {
        let mut world = two_teams();
        world.declare_war(TeamId(0), TeamId(1));
        assert!(world.is_at_war(TeamId(0), TeamId(1)));
        assert!(world.is_at_war(TeamId(1), TeamId(0)));
        assert!(!world.is_at_war(TeamId(0), TeamId(2)));
    }

    #[test]
    fn test_friendly_territory() {
        let mut world = two_teams();
        let tile = Tile::new(Hex::new(0, 0), Terrain::Plains).with_owner(PlayerId(1));
        assert!(world.is_friendly_territory(&tile, TeamId(1)));
        assert!(!world.is_friendly_territory(&tile, TeamId(0)));

        world.team_mut(TeamId(1)).unwrap().open_borders_to.insert(TeamId(0));
        assert!(world.is_friendly_territory(&tile, TeamId(0)));

        let unowned = Tile::new(Hex::new(1, 0), Terrain::Plains);
        assert!(!world.is_friendly_territory(&unowned, TeamId(0)));
    }

    #[test]
    fn test_units_at_keeps_stack_order() {
        let mut world = two_teams();
        let hex = Hex::new(1, 1);
        world.place_unit(hex, Unit::new(5, PlayerId(1), TeamId(1), Domain::Land, 2));
        world.place_unit(hex, Unit::new(6, PlayerId(1), TeamId(1), Domain::Land, 2));
        let ids: Vec<_> = world.units_at(hex).iter().map(|u| u.id.0).collect();
        assert_eq!(ids, vec![5, 6]);
        assert!(world.units_at(Hex::new(2, 2)).is_empty());
        assert_eq!(world.find_unit(crate::ids::UnitId(6)).map(|(h, _)| h), Some(hex));
    }
}
