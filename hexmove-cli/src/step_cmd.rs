//! Step and zoc commands - evaluate a single step
//!
//! ## Architecture
//!
//! - Level 1: run(), run_zoc() - orchestration
//! - Level 2: evaluate_step(), report_step()
//! - Level 3: formatting utilities

use anyhow::{bail, Result};
use clap::Args;
use rustc_hash::FxHashSet;
use serde::Serialize;

use hexmove_core::{
    Hex, MoveBudget, MoveCost, PromotionModifiers, StepCost, StopReason, UnitId,
};

use crate::session::{Session, SessionArgs};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args, Clone, Debug)]
pub struct StepArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Origin hex as q,r (defaults to the unit's position)
    #[arg(long, value_name = "Q,R", allow_hyphen_values = true)]
    pub from: Option<Hex>,

    /// Destination hex as q,r
    #[arg(long, value_name = "Q,R", allow_hyphen_values = true)]
    pub to: Hex,

    /// Remaining movement in fixed-point units (defaults to a full allowance)
    #[arg(long)]
    pub remaining: Option<i32>,

    /// Flank hexes whose zone of control is disregarded
    #[arg(long, value_name = "Q,R", num_args = 1.., allow_hyphen_values = true)]
    pub ignore: Vec<Hex>,

    /// Skip the zone of control check
    #[arg(long)]
    pub no_zoc: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Outcome of one evaluated step
#[derive(Clone, Debug, Serialize)]
pub struct StepReport {
    pub unit: UnitId,
    pub from: Hex,
    pub to: Hex,
    /// Cost before zone of control and clamping
    pub raw: StepCost,
    pub cost: MoveCost,
    pub remaining_before: i32,
    pub remaining_after: i32,
    #[serde(skip)]
    pub denominator: i32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: StepArgs) -> Result<()> {
    let session = Session::load(&args.session)?;
    let report = evaluate_step(&session, &args)?;
    report_step(&report, args.json)
}

/// Only answer whether the step is slowed by zone of control
pub fn run_zoc(args: StepArgs) -> Result<()> {
    let session = Session::load(&args.session)?;
    let from = args.from.unwrap_or(session.position);
    ensure_adjacent(from, args.to)?;

    let eval = session.movement();
    let ignore: FxHashSet<Hex> = args.ignore.iter().copied().collect();
    let slowed = eval.is_slowed_by_zoc_ignoring(&session.unit, session.tile(from)?, session.tile(args.to)?, &ignore);

    if args.json {
        println!("{}", serde_json::json!({ "from": from, "to": args.to, "slowed": slowed }));
    } else if slowed {
        println!("{} -> {}: slowed by zone of control", from, args.to);
    } else {
        println!("{} -> {}: free", from, args.to);
    }
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

pub fn evaluate_step(session: &Session, args: &StepArgs) -> Result<StepReport> {
    let from_hex = args.from.unwrap_or(session.position);
    ensure_adjacent(from_hex, args.to)?;
    let (from, to) = (session.tile(from_hex)?, session.tile(args.to)?);

    let eval = session.movement();
    let unit = &session.unit;
    let modifiers = PromotionModifiers::resolve(&session.rules, unit, to);
    let budget = MoveBudget {
        remaining: args.remaining.unwrap_or_else(|| eval.max_moves_for(unit, from)),
        max_for_new_domain: eval.max_moves_for(unit, to),
    };

    let cost = if args.no_zoc {
        eval.movement_cost_no_zoc(unit, from, to, budget, modifiers)
    } else if args.ignore.is_empty() {
        eval.movement_cost(unit, from, to, budget, modifiers)
    } else {
        let ignore: FxHashSet<Hex> = args.ignore.iter().copied().collect();
        eval.movement_cost_selective_zoc(unit, from, to, budget, modifiers, &ignore)
    };
    tracing::debug!("unit {} {} -> {}: {:?}", unit.id, from_hex, args.to, cost);

    Ok(StepReport {
        unit: unit.id,
        from: from_hex,
        to: args.to,
        raw: eval.costs_for_move(unit, from, to, modifiers),
        cost,
        remaining_before: budget.remaining,
        remaining_after: budget.remaining - cost.moves,
        denominator: session.rules.move_denominator,
    })
}

fn report_step(report: &StepReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let moves = |value| crate::session::format_moves(value, report.denominator);
    println!("Unit {}: {} -> {}", report.unit, report.from, report.to);
    match report.raw {
        StepCost::Moves(raw) => println!("  raw cost:  {} ({})", moves(raw), raw),
        StepCost::EndsTurn => println!("  raw cost:  ends turn"),
    }
    println!("  deducted:  {} ({})", moves(report.cost.moves), report.cost.moves);
    println!("  remaining: {} -> {}", moves(report.remaining_before), moves(report.remaining_after));
    if let Some(reason) = report.cost.stop {
        println!("  stop:      {}", describe_stop(reason));
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - UTILITIES
// ============================================================================

pub fn ensure_adjacent(from: Hex, to: Hex) -> Result<()> {
    if from.direction_to(to).is_none() {
        bail!("{} and {} are not adjacent", from, to);
    }
    Ok(())
}

pub fn describe_stop(reason: StopReason) -> &'static str {
    match reason {
        StopReason::ZoneOfControl => "enemy zone of control",
        StopReason::EndsTurn => "step ends the turn",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexmove_core::Scenario;

    const SCENARIO: &str = r#"{
        "fill": { "width": 5, "height": 5, "terrain": "grassland" },
        "tiles": [{ "hex": { "q": 2, "r": 1 }, "terrain": "grassland", "hills": true }],
        "teams": [{ "id": 0 }, { "id": 1 }],
        "players": [{ "id": 0, "team": 0 }, { "id": 1, "team": 1 }],
        "wars": [[0, 1]],
        "units": [
            { "hex": { "q": 2, "r": 2 }, "id": 1, "owner": 0, "team": 0, "domain": "land", "base_moves": 2 },
            { "hex": { "q": 3, "r": 1 }, "id": 2, "owner": 1, "team": 1, "domain": "land", "base_moves": 2 }
        ]
    }"#;

    fn session() -> Session {
        let scenario = Scenario::from_json(SCENARIO).unwrap();
        Session::from_scenario(&scenario, None, 1).unwrap()
    }

    fn args(to: Hex) -> StepArgs {
        StepArgs {
            session: SessionArgs { scenario: "unused.json".into(), rules: None, unit: 1 },
            from: None,
            to,
            remaining: None,
            ignore: Vec::new(),
            no_zoc: false,
            json: false,
        }
    }

    #[test]
    fn test_step_into_zoc() {
        // (3,1) flanks the step north from (2,2)
        let report = evaluate_step(&session(), &args(Hex::new(2, 1))).unwrap();
        assert_eq!(report.raw, StepCost::Moves(120));
        assert_eq!(report.cost, MoveCost { moves: 120, stop: Some(StopReason::ZoneOfControl) });
        assert_eq!(report.remaining_after, 0);
    }

    #[test]
    fn test_step_ignoring_zoc() {
        let mut step = args(Hex::new(2, 1));
        step.ignore = vec![Hex::new(3, 1)];
        step.remaining = Some(100);
        let report = evaluate_step(&session(), &step).unwrap();
        assert_eq!(report.cost, MoveCost { moves: 100, stop: None });

        step.ignore.clear();
        step.no_zoc = true;
        step.remaining = None;
        let report = evaluate_step(&session(), &step).unwrap();
        assert_eq!(report.cost, MoveCost { moves: 120, stop: None });
        assert_eq!(report.remaining_after, 0);
    }

    #[test]
    fn test_non_adjacent_step_rejected() {
        assert!(evaluate_step(&session(), &args(Hex::new(0, 0))).is_err());
        assert!(evaluate_step(&session(), &args(Hex::new(2, 9))).is_err());
    }
}
