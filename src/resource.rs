//! Resources and infrastructure domains.
//!
//! The production economy is a fixed mapping: each infrastructure domain
//! either extracts a raw resource (gated by planetary deposits), manufactures
//! a processed resource from inputs, or provides a service with no market
//! resource at all. The mapping here is the single source of truth consumed
//! by the market resolver, the colony simulation, and the corporate AI.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// A tradeable resource tracked by sector markets.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
pub enum Resource {
    Food,
    Minerals,
    Gases,
    Exotics,
    ConsumerGoods,
    AdvancedGoods,
    ShipParts,
    TransportCapacity,
}

impl Resource {
    /// The single domain that produces this resource.
    pub fn producing_domain(self) -> InfraDomain {
        match self {
            Resource::Food => InfraDomain::Agricultural,
            Resource::Minerals => InfraDomain::Mining,
            Resource::Gases => InfraDomain::GasExtraction,
            Resource::Exotics => InfraDomain::Exploitation,
            Resource::ConsumerGoods => InfraDomain::LowIndustry,
            Resource::AdvancedGoods => InfraDomain::HighIndustry,
            Resource::ShipParts => InfraDomain::SpaceIndustry,
            Resource::TransportCapacity => InfraDomain::Transport,
        }
    }

    /// Whether every population level consumes one unit of this resource.
    pub fn consumed_by_population(self) -> bool {
        matches!(
            self,
            Resource::Food | Resource::ConsumerGoods | Resource::TransportCapacity
        )
    }
}

/// One of the twelve productive categories present on every colony.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
pub enum InfraDomain {
    Civilian,
    Agricultural,
    Mining,
    GasExtraction,
    Exploitation,
    LowIndustry,
    HighIndustry,
    SpaceIndustry,
    Science,
    Military,
    Transport,
    Commerce,
}

impl InfraDomain {
    /// The resource this domain puts on the sector market, if any.
    pub fn produced_resource(self) -> Option<Resource> {
        match self {
            InfraDomain::Agricultural => Some(Resource::Food),
            InfraDomain::Mining => Some(Resource::Minerals),
            InfraDomain::GasExtraction => Some(Resource::Gases),
            InfraDomain::Exploitation => Some(Resource::Exotics),
            InfraDomain::LowIndustry => Some(Resource::ConsumerGoods),
            InfraDomain::HighIndustry => Some(Resource::AdvancedGoods),
            InfraDomain::SpaceIndustry => Some(Resource::ShipParts),
            InfraDomain::Transport => Some(Resource::TransportCapacity),
            InfraDomain::Civilian
            | InfraDomain::Science
            | InfraDomain::Military
            | InfraDomain::Commerce => None,
        }
    }

    /// Input resources required per infrastructure level for manufacturing
    /// domains. Empty for extraction and service domains.
    pub fn required_inputs(self) -> &'static [Resource] {
        match self {
            InfraDomain::LowIndustry => &[Resource::Minerals],
            InfraDomain::HighIndustry => &[Resource::Minerals, Resource::Gases],
            InfraDomain::SpaceIndustry => &[Resource::Minerals, Resource::AdvancedGoods],
            _ => &[],
        }
    }

    /// Whether output from this domain is gated by a matching planetary
    /// deposit.
    pub fn is_extraction(self) -> bool {
        matches!(
            self,
            InfraDomain::Mining | InfraDomain::GasExtraction | InfraDomain::Exploitation
        )
    }

    /// Whether this domain manufactures from inputs (tier-2 production).
    pub fn is_manufacturing(self) -> bool {
        !self.required_inputs().is_empty()
    }
}
