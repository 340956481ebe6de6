//! SQLite export of run history.
//!
//! Writes the per-turn summaries and the full event stream to a small
//! relational schema for downstream analysis with standard tooling.

use crate::error::{Result, SimulationError};
use crate::result::RunResult;
use crate::state::GameState;
use log::info;
use rusqlite::{params, Connection};
use std::path::Path;

/// Exports a finished run to a SQLite database at `path`, replacing any
/// existing tables.
pub fn export_run<P: AsRef<Path>>(
    path: P,
    run: &RunResult,
    state: &GameState,
) -> Result<()> {
    let mut connection = Connection::open(path.as_ref())
        .map_err(|e| SimulationError::DatabaseExport(e.to_string()))?;
    let transaction = connection
        .transaction()
        .map_err(|e| SimulationError::DatabaseExport(e.to_string()))?;

    transaction
        .execute_batch(
            "DROP TABLE IF EXISTS turns;
             DROP TABLE IF EXISTS events;
             CREATE TABLE turns (
                 turn INTEGER PRIMARY KEY,
                 current_bp INTEGER NOT NULL,
                 debt_tokens INTEGER NOT NULL,
                 total_income INTEGER NOT NULL,
                 total_expenses INTEGER NOT NULL,
                 colony_count INTEGER NOT NULL,
                 total_population INTEGER NOT NULL,
                 corporation_count INTEGER NOT NULL,
                 planet_count INTEGER NOT NULL,
                 active_contracts INTEGER NOT NULL,
                 active_missions INTEGER NOT NULL,
                 ship_count INTEGER NOT NULL,
                 events_emitted INTEGER NOT NULL
             );
             CREATE TABLE events (
                 id INTEGER PRIMARY KEY,
                 turn INTEGER NOT NULL,
                 category TEXT NOT NULL,
                 priority TEXT NOT NULL,
                 title TEXT NOT NULL,
                 description TEXT NOT NULL,
                 dismissed INTEGER NOT NULL
             );",
        )
        .map_err(|e| SimulationError::DatabaseExport(e.to_string()))?;

    for summary in &run.summaries {
        transaction
            .execute(
                "INSERT INTO turns (turn, current_bp, debt_tokens, total_income,
                     total_expenses, colony_count, total_population,
                     corporation_count, planet_count, active_contracts,
                     active_missions, ship_count, events_emitted)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    summary.turn,
                    summary.current_bp,
                    summary.debt_tokens,
                    summary.total_income,
                    summary.total_expenses,
                    summary.colony_count as i64,
                    summary.total_population,
                    summary.corporation_count as i64,
                    summary.planet_count as i64,
                    summary.active_contracts as i64,
                    summary.active_missions as i64,
                    summary.ship_count as i64,
                    summary.events_emitted as i64,
                ],
            )
            .map_err(|e| SimulationError::DatabaseExport(e.to_string()))?;
    }

    for event in &state.events {
        transaction
            .execute(
                "INSERT INTO events (id, turn, category, priority, title,
                     description, dismissed)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    event.id.0 as i64,
                    event.turn,
                    event.category.to_string(),
                    event.priority.to_string(),
                    event.title,
                    event.description,
                    event.dismissed as i64,
                ],
            )
            .map_err(|e| SimulationError::DatabaseExport(e.to_string()))?;
    }

    transaction
        .commit()
        .map_err(|e| SimulationError::DatabaseExport(e.to_string()))?;
    info!(
        "exported {} turns and {} events to {}",
        run.summaries.len(),
        state.events.len(),
        path.as_ref().display()
    );
    Ok(())
}
