//! Unit snapshots and their promotion records

use serde::{Deserialize, Serialize};

use crate::ids::{PlayerId, TeamId, UnitId};
use crate::terrain::{Feature, Terrain};

/// Movement domain
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Land,
    Sea,
    Air,
}

/// A movement-relevant capability granted by a promotion, trait or unit class.
///
/// Flags carry no payload; the terrain/feature records name the kind they
/// apply to and, for extra-move records, how many move points they add.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Promotion {
    IgnoreTerrainCost,
    IgnoreZoneOfControl,
    /// Land unit can enter water tiles by embarking
    Embarkation,
    EmbarkFlatCost,
    DisembarkFlatCost,
    Hover,
    /// Crosses rivers without penalty
    Amphibious,
    /// Every step costs exactly one move point
    FlatMovementCost,
    SlowInEnemyLand,
    RoughTerrainEndsTurn,
    /// Switches between sea and land domain when touching the shore
    ConvertsOnShore,
    /// Roads in hostile territory still count
    UseEnemyRoutes,
    /// Whole move points knocked off terrain costs (never below one)
    ExtraMoveDiscount { amount: i32 },
    HillsDoubleMove,
    MountainsDoubleMove,
    TerrainDoubleMove { terrain: Terrain },
    FeatureDoubleMove { feature: Feature },
    TerrainHalfMove { terrain: Terrain },
    FeatureHalfMove { feature: Feature },
    TerrainExtraMove { terrain: Terrain, count: i32 },
    FeatureExtraMove { feature: Feature, count: i32 },
}

/// Snapshot of a unit as seen by the movement rules
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub owner: PlayerId,
    pub team: TeamId,
    pub domain: Domain,
    /// Whole move points in the unit's native domain
    pub base_moves: i32,
    /// Whole move points while embarked
    #[serde(default = "default_embarked_moves")]
    pub embarked_moves: i32,
    #[serde(default = "default_true")]
    pub combat: bool,
    #[serde(default)]
    pub embarked: bool,
    /// Carried by another unit
    #[serde(default)]
    pub cargo: bool,
    /// Killed this turn, removal pending
    #[serde(default)]
    pub delayed_death: bool,
    #[serde(default)]
    pub always_hostile: bool,
    /// Teams that cannot see this unit
    #[serde(default)]
    pub hidden_from: Vec<TeamId>,
    #[serde(default)]
    pub promotions: Vec<Promotion>,
}

fn default_embarked_moves() -> i32 {
    2
}

fn default_true() -> bool {
    true
}

impl Unit {
    /// Combat unit with no promotions
    pub fn new(id: u32, owner: PlayerId, team: TeamId, domain: Domain, base_moves: i32) -> Self {
        Self {
            id: UnitId(id),
            owner,
            team,
            domain,
            base_moves,
            embarked_moves: default_embarked_moves(),
            combat: true,
            embarked: false,
            cargo: false,
            delayed_death: false,
            always_hostile: false,
            hidden_from: Vec::new(),
            promotions: Vec::new(),
        }
    }

    pub fn with_promotion(mut self, promotion: Promotion) -> Self {
        self.promotions.push(promotion);
        self
    }

    pub fn has(&self, promotion: Promotion) -> bool {
        self.promotions.contains(&promotion)
    }

    pub fn is_invisible_to(&self, team: TeamId) -> bool {
        self.hidden_from.contains(&team)
    }

    pub fn is_hovering(&self) -> bool {
        self.has(Promotion::Hover)
    }

    pub fn is_amphibious(&self) -> bool {
        self.has(Promotion::Amphibious)
    }

    pub fn can_embark(&self) -> bool {
        self.has(Promotion::Embarkation)
    }

    pub fn ignores_zoc(&self) -> bool {
        self.has(Promotion::IgnoreZoneOfControl)
    }

    /// Sum of all flat terrain discounts
    pub fn extra_move_discount(&self) -> i32 {
        self.promotions
            .iter()
            .map(|p| match p {
                Promotion::ExtraMoveDiscount { amount } => *amount,
                _ => 0,
            })
            .sum()
    }

    pub fn is_terrain_double_move(&self, terrain: Terrain) -> bool {
        self.has(Promotion::TerrainDoubleMove { terrain })
    }

    pub fn is_feature_double_move(&self, feature: Option<Feature>) -> bool {
        feature.is_some_and(|feature| self.has(Promotion::FeatureDoubleMove { feature }))
    }

    pub fn is_terrain_half_move(&self, terrain: Terrain) -> bool {
        self.has(Promotion::TerrainHalfMove { terrain })
    }

    pub fn is_feature_half_move(&self, feature: Option<Feature>) -> bool {
        feature.is_some_and(|feature| self.has(Promotion::FeatureHalfMove { feature }))
    }

    /// Extra move points on `terrain`, `None` if no record applies
    pub fn terrain_extra_moves(&self, terrain: Terrain) -> Option<i32> {
        let counts = self.promotions.iter().filter_map(|p| match p {
            Promotion::TerrainExtraMove { terrain: t, count } if *t == terrain => Some(*count),
            _ => None,
        });
        sum_if_any(counts)
    }

    /// Extra move points on `feature`, `None` if no record applies
    pub fn feature_extra_moves(&self, feature: Option<Feature>) -> Option<i32> {
        let feature = feature?;
        let counts = self.promotions.iter().filter_map(|p| match p {
            Promotion::FeatureExtraMove { feature: f, count } if *f == feature => Some(*count),
            _ => None,
        });
        sum_if_any(counts)
    }
}

fn sum_if_any(mut counts: impl Iterator<Item = i32>) -> Option<i32> {
    let first = counts.next()?;
    Some(first + counts.sum::<i32>())
}
