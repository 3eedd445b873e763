//! Path command - walk a fixed hex sequence turn by turn
//!
//! Movement is refilled whenever the unit starts a step with nothing left.
//! A step that ends the turn is still taken; the unit arrives with no moves.
//!
//! ## Architecture
//!
//! - Level 1: run() - orchestration
//! - Level 2: walk_path(), report_path()
//! - Level 3: formatting utilities

use anyhow::{Context, Result};
use clap::Args;
use rustc_hash::FxHashSet;
use serde::Serialize;

use hexmove_core::{Hex, MoveBudget, MoveCost, PromotionModifiers};

use crate::session::{Session, SessionArgs};
use crate::step_cmd::{describe_stop, ensure_adjacent};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args, Clone, Debug)]
pub struct PathArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Hexes to walk through, starting next to the unit
    #[arg(long, value_name = "Q,R", num_args = 1.., required = true, allow_hyphen_values = true)]
    pub hexes: Vec<Hex>,

    /// Movement left on the first turn (defaults to a full allowance)
    #[arg(long)]
    pub remaining: Option<i32>,

    /// Flank hexes whose zone of control is disregarded
    #[arg(long, value_name = "Q,R", num_args = 1.., allow_hyphen_values = true)]
    pub ignore: Vec<Hex>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// One step along the walked path
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PathStep {
    /// Turn the step is taken in, starting at 1
    pub turn: u32,
    pub from: Hex,
    pub to: Hex,
    pub cost: MoveCost,
    /// Movement left after the step
    pub remaining: i32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: PathArgs) -> Result<()> {
    let session = Session::load(&args.session)?;
    let ignore: FxHashSet<Hex> = args.ignore.iter().copied().collect();

    let steps = walk_path(&session, &args.hexes, args.remaining, &ignore)?;
    tracing::info!(
        "Unit {} walked {} steps in {} turns",
        session.unit.id,
        steps.len(),
        steps.last().map_or(0, |s| s.turn)
    );

    report_path(&session, &steps, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

pub fn walk_path(
    session: &Session,
    hexes: &[Hex],
    first_turn_moves: Option<i32>,
    ignore: &FxHashSet<Hex>,
) -> Result<Vec<PathStep>> {
    let eval = session.movement();
    let mut unit = session.unit.clone();
    let mut position = session.position;

    let start = session.tile(position)?;
    unit.embarked = start.needs_embarkation(&unit);
    let mut remaining = first_turn_moves.unwrap_or_else(|| eval.max_moves_for(&unit, start));
    let mut turn = 1;
    let mut steps = Vec::with_capacity(hexes.len());

    for &next in hexes {
        if next == position {
            continue;
        }
        ensure_adjacent(position, next).with_context(|| format!("Path breaks after {} steps", steps.len()))?;
        let (from, to) = (session.tile(position)?, session.tile(next)?);

        if remaining <= 0 {
            turn += 1;
            remaining = eval.max_moves_for(&unit, from);
        }

        let budget = MoveBudget {
            remaining,
            max_for_new_domain: eval.max_moves_for(&unit, to),
        };
        let modifiers = PromotionModifiers::resolve(&session.rules, &unit, to);
        let cost = eval.movement_cost_selective_zoc(&unit, from, to, budget, modifiers, ignore);

        remaining -= cost.moves;
        unit.embarked = to.needs_embarkation(&unit);
        tracing::debug!("turn {}: {} -> {} costs {:?}", turn, position, next, cost);

        steps.push(PathStep {
            turn,
            from: position,
            to: next,
            cost,
            remaining,
        });
        position = next;
    }

    Ok(steps)
}

fn report_path(session: &Session, steps: &[PathStep], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(steps)?);
        return Ok(());
    }

    println!("\n=== Path of unit {} ===", session.unit.id);
    for step in steps {
        let stop = step.cost.stop.map(describe_stop).unwrap_or("");
        println!(
            "turn {:>2}  {} -> {}  cost {:>5}  left {:>5}  {}",
            step.turn,
            step.from,
            step.to,
            session.format_moves(step.cost.moves),
            session.format_moves(step.remaining),
            stop
        );
    }
    if let Some(last) = steps.last() {
        println!("Arrives at {} on turn {}", last.to, last.turn);
    }
    Ok(())
}
