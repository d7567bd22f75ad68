//! Result values handed to downstream installation and cost phases.
//!
//! [`DesignResult`] serializes to the fixed key layout the plant pipeline
//! reads (`num_substations`, `offshore_substation_topside`,
//! `offshore_substation_substructure`, `export_system.cable`).
//! [`DetailedOutput`] adds aggregate totals for reporting.

use oswe_core::{CableSpec, Diagnostics, Kilometers, Megawatts, Meters, OsweResult, Tonnes, Usd};
use serde::Serialize;

use crate::export::ExportCableResult;
use crate::substation::{SubstationResult, SubstructureType};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopsideOutput {
    pub deck_space: f64,
    pub mass: Tonnes,
    /// Total procurement cost of the topside and its equipment
    pub unit_cost: Usd,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubstructureOutput {
    #[serde(rename = "type")]
    pub kind: SubstructureType,
    pub deck_space: f64,
    pub mass: Tonnes,
    pub length: Meters,
    pub unit_cost: Usd,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportCableOutput {
    /// t/km
    pub linear_density: f64,
    /// Length of each installed section; one entry per cable run
    pub sections: Vec<Kilometers>,
    pub number: usize,
    pub cable_power: Megawatts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSystemOutput {
    pub cable: ExportCableOutput,
}

/// Design outputs consumed by the plant pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignResult {
    pub num_substations: usize,
    pub offshore_substation_topside: TopsideOutput,
    pub offshore_substation_substructure: SubstructureOutput,
    pub export_system: ExportSystemOutput,
}

impl DesignResult {
    pub fn assemble(
        export: &ExportCableResult,
        cable: &CableSpec,
        substation: &SubstationResult,
    ) -> Self {
        Self {
            num_substations: substation.num_substations,
            offshore_substation_topside: TopsideOutput {
                deck_space: substation.topside_deck_space,
                mass: substation.topside_mass,
                unit_cost: substation.substation_cost,
            },
            offshore_substation_substructure: SubstructureOutput {
                kind: substation.substructure_type,
                deck_space: substation.substructure_deck_space,
                mass: substation.substructure_mass,
                length: substation.substructure_length,
                unit_cost: substation.substructure_cost,
            },
            export_system: ExportSystemOutput {
                cable: ExportCableOutput {
                    linear_density: cable.linear_density,
                    sections: vec![export.length],
                    number: export.num_cables,
                    cable_power: cable.cable_power,
                },
            },
        }
    }

    /// The result as a JSON mapping.
    pub fn to_value(&self) -> OsweResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Design result plus totals for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedOutput {
    #[serde(flatten)]
    pub design: DesignResult,
    pub export_system_total_mass: Tonnes,
    pub export_system_total_length: Kilometers,
    pub export_system_total_cost: Usd,
    pub export_system_cable_power: Megawatts,
    pub substation_mpt_rating: Megawatts,
    pub substation_topside_mass: Tonnes,
    pub substation_topside_cost: Usd,
    pub substation_substructure_mass: Tonnes,
    pub substation_substructure_cost: Usd,
    /// Topside cost across all substations
    pub substation_total_cost: Usd,
    /// Substructure cost across all substations
    pub substation_total_substructure_cost: Usd,
    pub diagnostics: Diagnostics,
}

impl DetailedOutput {
    pub fn assemble(
        design: DesignResult,
        export: &ExportCableResult,
        cable: &CableSpec,
        substation: &SubstationResult,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            design,
            export_system_total_mass: export.total_mass,
            export_system_total_length: export.total_length,
            export_system_total_cost: export.total_cost,
            export_system_cable_power: cable.cable_power,
            substation_mpt_rating: substation.mpt_rating,
            substation_topside_mass: substation.topside_mass,
            substation_topside_cost: substation.topside_cost,
            substation_substructure_mass: substation.substructure_mass,
            substation_substructure_cost: substation.substructure_cost,
            substation_total_cost: substation.total_substation_cost(),
            substation_total_substructure_cost: substation.total_substructure_cost(),
            diagnostics,
        }
    }

    pub fn num_substations(&self) -> usize {
        self.design.num_substations
    }

    pub fn to_value(&self) -> OsweResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
