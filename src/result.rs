//! Run results: per-turn summaries, aggregation, and streaming output.

use crate::error::{Result, SimulationError};
use crate::state::GameState;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Snapshot of the headline numbers after one resolved turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnSummary {
    pub turn: u32,
    pub current_bp: i64,
    pub debt_tokens: u8,
    pub total_income: i64,
    pub total_expenses: i64,
    pub colony_count: usize,
    pub total_population: u32,
    pub corporation_count: usize,
    pub planet_count: usize,
    pub active_contracts: usize,
    pub active_missions: usize,
    pub ship_count: usize,
    pub events_emitted: usize,
    pub discoveries_remaining: usize,
}

impl TurnSummary {
    /// Captures a summary from a freshly resolved state.
    pub fn capture(state: &GameState, events_emitted: usize) -> Self {
        TurnSummary {
            turn: state.turn,
            current_bp: state.current_bp,
            debt_tokens: state.debt_tokens,
            total_income: state.budget.total_income(),
            total_expenses: state.budget.total_expenses(),
            colony_count: state.colonies.len(),
            total_population: state.colonies.values().map(|c| c.population).sum(),
            corporation_count: state.corporations.len(),
            planet_count: state.planets.len(),
            active_contracts: state
                .contracts
                .values()
                .filter(|c| c.completed_turn.is_none())
                .count(),
            active_missions: state
                .missions
                .values()
                .filter(|m| m.completed_turn.is_none())
                .count(),
            ship_count: state.ships.len(),
            events_emitted,
            discoveries_remaining: state.discovery_pool.len(),
        }
    }
}

/// Metadata attached to a full run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub seed: u64,
    pub preset: Option<String>,
    pub turns_requested: u32,
}

/// Aggregated result of a headless run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub metadata: RunMetadata,
    pub summaries: Vec<TurnSummary>,
    pub final_bp: i64,
    pub final_debt_tokens: u8,
    pub total_events: usize,
    pub total_population: u32,
}

impl RunResult {
    pub fn from_summaries(metadata: RunMetadata, summaries: Vec<TurnSummary>) -> Self {
        let last = summaries.last();
        RunResult {
            final_bp: last.map(|s| s.current_bp).unwrap_or(0),
            final_debt_tokens: last.map(|s| s.debt_tokens).unwrap_or(0),
            total_events: summaries.iter().map(|s| s.events_emitted).sum(),
            total_population: last.map(|s| s.total_population).unwrap_or(0),
            metadata,
            summaries,
        }
    }

    /// Serializes the result to a JSON file, gzip-compressed when
    /// `compress` is set (a `.gz` suffix is appended if absent).
    pub fn write_json<P: AsRef<Path>>(&self, path: P, compress: bool) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SimulationError::JsonSerialize(e.to_string()))?;
        if compress {
            let mut path = path.as_ref().to_path_buf();
            if path.extension().and_then(|e| e.to_str()) != Some("gz") {
                let mut name = path
                    .file_name()
                    .map(|n| n.to_os_string())
                    .unwrap_or_else(|| "result.json".into());
                name.push(".gz");
                path.set_file_name(name);
            }
            let file = File::create(&path)?;
            let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
            encoder.write_all(json.as_bytes())?;
            encoder.finish()?;
        } else {
            let mut file = BufWriter::new(File::create(path.as_ref())?);
            file.write_all(json.as_bytes())?;
        }
        Ok(())
    }
}

/// Opens a line-oriented stream writer; transparently gzips when the path
/// ends in `.gz`.
pub fn open_stream_writer<P: AsRef<Path>>(path: P) -> Result<Box<dyn Write>> {
    let path = path.as_ref();
    let file = File::create(path)?;
    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        Ok(Box::new(GzEncoder::new(
            BufWriter::new(file),
            Compression::default(),
        )))
    } else {
        Ok(Box::new(BufWriter::new(file)))
    }
}

/// Writes one turn summary as a JSON line.
pub fn write_turn_to_stream(writer: &mut dyn Write, summary: &TurnSummary) -> Result<()> {
    let line = serde_json::to_string(summary)
        .map_err(|e| SimulationError::JsonSerialize(e.to_string()))?;
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::rng::TurnRng;
    use crate::setup::create_initial_state;

    fn sample_summaries() -> Vec<TurnSummary> {
        let config = GameConfig::default();
        let state = create_initial_state(&config, &mut TurnRng::seeded(1)).unwrap();
        vec![
            TurnSummary::capture(&state, 2),
            TurnSummary { turn: 2, events_emitted: 3, ..TurnSummary::capture(&state, 0) },
        ]
    }

    #[test]
    fn test_run_result_aggregation() {
        let metadata = RunMetadata { seed: 1, preset: None, turns_requested: 2 };
        let result = RunResult::from_summaries(metadata, sample_summaries());
        assert_eq!(result.total_events, 5);
        assert_eq!(result.summaries.len(), 2);
    }

    #[test]
    fn test_stream_writer_plain_and_gz() {
        let dir = tempfile::tempdir().unwrap();
        let summaries = sample_summaries();

        let plain = dir.path().join("run.jsonl");
        {
            let mut writer = open_stream_writer(&plain).unwrap();
            for summary in &summaries {
                write_turn_to_stream(writer.as_mut(), summary).unwrap();
            }
        }
        let contents = std::fs::read_to_string(&plain).unwrap();
        assert_eq!(contents.lines().count(), 2);

        let gz = dir.path().join("run.jsonl.gz");
        {
            let mut writer = open_stream_writer(&gz).unwrap();
            for summary in &summaries {
                write_turn_to_stream(writer.as_mut(), summary).unwrap();
            }
        }
        let raw = std::fs::read(&gz).unwrap();
        // Gzip magic bytes.
        assert_eq!(&raw[..2], &[0x1f, 0x8b]);
    }

    #[test]
    fn test_write_json_compressed_appends_gz() {
        let dir = tempfile::tempdir().unwrap();
        let metadata = RunMetadata { seed: 1, preset: None, turns_requested: 2 };
        let result = RunResult::from_summaries(metadata, sample_summaries());
        result.write_json(dir.path().join("result.json"), true).unwrap();
        assert!(dir.path().join("result.json.gz").exists());
    }
}
