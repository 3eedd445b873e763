//! Terrain, feature and route kinds with their stock movement tables

use serde::{Deserialize, Serialize};

/// Terrain kind.
///
/// `Hill` is never a tile's base terrain: hills are a tile flag over the base
/// terrain, and `Hill` keys the hill entries of promotions and rule tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    Grassland,
    Plains,
    Desert,
    Tundra,
    Snow,
    Hill,
    Mountain,
    Coast,
    Ocean,
    Lake,
}

impl Terrain {
    pub const ALL: [Terrain; 10] = [
        Terrain::Grassland,
        Terrain::Plains,
        Terrain::Desert,
        Terrain::Tundra,
        Terrain::Snow,
        Terrain::Hill,
        Terrain::Mountain,
        Terrain::Coast,
        Terrain::Ocean,
        Terrain::Lake,
    ];

    pub fn is_water(self) -> bool {
        matches!(self, Terrain::Coast | Terrain::Ocean | Terrain::Lake)
    }
}

/// Terrain feature layered on top of the base terrain
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Forest,
    Jungle,
    Marsh,
    Oasis,
    FloodPlains,
    Ice,
    Reef,
}

impl Feature {
    pub const ALL: [Feature; 7] = [
        Feature::Forest,
        Feature::Jungle,
        Feature::Marsh,
        Feature::Oasis,
        Feature::FloodPlains,
        Feature::Ice,
        Feature::Reef,
    ];

    /// Forest and jungle, the features woodland movement bonuses apply to
    pub fn is_woodland(self) -> bool {
        matches!(self, Feature::Forest | Feature::Jungle)
    }
}

/// Built route
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Road,
    Railroad,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::Road, Route::Railroad];
}

/// Movement entry for a terrain kind (cost in whole move points)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainInfo {
    pub move_cost: i32,
    #[serde(default)]
    pub rough: bool,
}

/// Movement entry for a feature kind (cost in whole move points)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureInfo {
    pub move_cost: i32,
    #[serde(default)]
    pub rough: bool,
}

/// Movement entry for a route kind (costs in fixed-point units).
///
/// `flat_move_cost` is scaled by the unit's base moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub move_cost: i32,
    pub flat_move_cost: i32,
}

/// Stock terrain table
pub fn default_terrain_info(terrain: Terrain) -> TerrainInfo {
    let rough = matches!(terrain, Terrain::Hill);
    TerrainInfo { move_cost: 1, rough }
}

/// Stock feature table
pub fn default_feature_info(feature: Feature) -> FeatureInfo {
    match feature {
        Feature::Forest | Feature::Jungle => FeatureInfo { move_cost: 2, rough: true },
        Feature::Marsh => FeatureInfo { move_cost: 2, rough: false },
        Feature::Oasis | Feature::FloodPlains | Feature::Ice | Feature::Reef => {
            FeatureInfo { move_cost: 1, rough: false }
        }
    }
}

/// Stock route table
pub fn default_route_info(route: Route) -> RouteInfo {
    match route {
        Route::Road => RouteInfo { move_cost: 20, flat_move_cost: 10 },
        Route::Railroad => RouteInfo { move_cost: 10, flat_move_cost: 5 },
    }
}
