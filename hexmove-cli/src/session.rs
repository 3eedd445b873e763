//! Shared command setup: scenario, rules and the moving unit

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use hexmove_core::{Hex, MovementRules, Scenario, Tile, Unit, UnitId, UnitMovement, World, WorldMap};

#[derive(Args, Clone, Debug)]
pub struct SessionArgs {
    /// Scenario JSON file
    #[arg(long, value_name = "FILE")]
    pub scenario: PathBuf,

    /// Rules JSON file (overrides the rules shipped with the scenario)
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Id of the moving unit
    #[arg(long)]
    pub unit: u32,
}

/// Everything a command needs to evaluate moves
pub struct Session {
    pub world: WorldMap,
    pub rules: MovementRules,
    pub unit: Unit,
    /// Where the unit stands in the scenario
    pub position: Hex,
}

impl Session {
    pub fn load(args: &SessionArgs) -> Result<Self> {
        let scenario = Scenario::load(&args.scenario)
            .with_context(|| format!("Failed to load scenario: {}", args.scenario.display()))?;
        Self::from_scenario(&scenario, args.rules.as_deref(), args.unit)
    }

    pub fn from_scenario(scenario: &Scenario, rules: Option<&Path>, unit: u32) -> Result<Self> {
        let world = scenario.build().context("Invalid scenario")?;

        let rules = match rules {
            Some(path) => MovementRules::load(path)
                .with_context(|| format!("Failed to load rules: {}", path.display()))?,
            None => scenario.rules_or_default(),
        };

        let (position, unit) = world
            .find_unit(UnitId(unit))
            .map(|(hex, unit)| (hex, unit.clone()))
            .with_context(|| format!("Unit {} is not in the scenario", unit))?;

        Ok(Self {
            world,
            rules,
            unit,
            position,
        })
    }

    pub fn tile(&self, hex: Hex) -> Result<&Tile> {
        self.world
            .tile(hex)
            .with_context(|| format!("No tile at {}", hex))
    }

    pub fn movement(&self) -> UnitMovement<'_, WorldMap> {
        UnitMovement::new(&self.world, &self.rules)
    }

    /// Fixed-point value as move points, e.g. `1.50`
    pub fn format_moves(&self, value: i32) -> String {
        format_moves(value, self.rules.move_denominator)
    }
}

pub fn format_moves(value: i32, denominator: i32) -> String {
    format!("{:.2}", value as f64 / denominator as f64)
}
