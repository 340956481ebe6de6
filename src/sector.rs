//! Sectors and the galaxy adjacency map.
//!
//! The galaxy is a set of sectors joined by jump lanes. Adjacency drives
//! exploration range checks, trade-route validation, and mission travel
//! times; hop distances are computed with unit-weight Dijkstra over an
//! undirected graph built from the adjacency lists.

use petgraph::algo::dijkstra;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unique identifier for a sector.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SectorId(pub u32);

impl std::fmt::Display for SectorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sector-{}", self.0)
    }
}

/// How crowded a sector's starfield is; flavors generation and event text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectorDensity {
    Sparse,
    Moderate,
    Dense,
}

/// One region of the galaxy.
///
/// Created at galaxy generation, mutated as exploration progresses, never
/// destroyed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub id: SectorId,
    pub name: String,
    pub density: SectorDensity,
    /// 0..=100; exploration contracts push this up
    pub exploration_percent: u32,
    /// Hazard level; suppression missions can lower it, floor 0
    pub threat_modifier: u32,
    /// Turn the empire first operated here, if ever
    pub first_entered_turn: Option<u32>,
}

impl Sector {
    pub fn new(id: SectorId, name: impl Into<String>, density: SectorDensity) -> Self {
        Sector {
            id,
            name: name.into(),
            density,
            exploration_percent: 0,
            threat_modifier: 0,
            first_entered_turn: None,
        }
    }

    /// Raises exploration by `gain`, capping at 100, and records first entry.
    pub fn advance_exploration(&mut self, gain: u32, turn: u32) {
        self.exploration_percent = (self.exploration_percent + gain).min(100);
        if self.first_entered_turn.is_none() {
            self.first_entered_turn = Some(turn);
        }
    }
}

/// The sector map: every sector plus symmetric jump-lane adjacency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Galaxy {
    pub sectors: BTreeMap<SectorId, Sector>,
    /// Jump lanes; kept symmetric by [`Galaxy::link`]
    pub adjacency: BTreeMap<SectorId, Vec<SectorId>>,
}

impl Galaxy {
    pub fn new() -> Self {
        Galaxy::default()
    }

    pub fn insert(&mut self, sector: Sector) {
        self.adjacency.entry(sector.id).or_default();
        self.sectors.insert(sector.id, sector);
    }

    /// Adds a symmetric jump lane between two sectors.
    pub fn link(&mut self, a: SectorId, b: SectorId) {
        let fwd = self.adjacency.entry(a).or_default();
        if !fwd.contains(&b) {
            fwd.push(b);
        }
        let back = self.adjacency.entry(b).or_default();
        if !back.contains(&a) {
            back.push(a);
        }
    }

    pub fn contains(&self, id: SectorId) -> bool {
        self.sectors.contains_key(&id)
    }

    pub fn neighbors(&self, id: SectorId) -> &[SectorId] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn are_adjacent(&self, a: SectorId, b: SectorId) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Shortest hop count between two sectors, or `None` when unreachable.
    ///
    /// Unit-weight Dijkstra over the lane graph; zero for a sector to
    /// itself.
    pub fn hop_distance(&self, from: SectorId, to: SectorId) -> Option<u32> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }
        if from == to {
            return Some(0);
        }

        let mut graph: UnGraph<SectorId, ()> = UnGraph::new_undirected();
        let mut nodes: BTreeMap<SectorId, NodeIndex> = BTreeMap::new();
        for id in self.sectors.keys() {
            nodes.insert(*id, graph.add_node(*id));
        }
        for (id, neighbors) in &self.adjacency {
            for neighbor in neighbors {
                // Adjacency is symmetric; only add each lane once.
                if id < neighbor {
                    if let (Some(&a), Some(&b)) = (nodes.get(id), nodes.get(neighbor)) {
                        graph.add_edge(a, b, ());
                    }
                }
            }
        }

        let start = nodes[&from];
        let goal = nodes[&to];
        let distances = dijkstra(&graph, start, Some(goal), |_| 1u32);
        distances.get(&goal).copied()
    }
}
