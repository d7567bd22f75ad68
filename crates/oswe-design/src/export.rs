//! Export cable sizing.
//!
//! Packs plant output into whole cables of the selected type and sizes one
//! cable run from the offshore substation to the onshore interconnection:
//!
//! ```text
//! num_cables = ceil(capacity / cable_power) + num_redundant
//! length     = (free_cable_length + (distance_to_landfall - touchdown/1000)
//!               + interconnection_distance) * (1 + percent_added_length)
//! mass       = length * linear_density
//! ```
//!
//! Lengths and masses are rounded to 10 decimal places to keep results
//! stable across platforms. A touchdown offset longer than the route yields a
//! non-positive length; it is passed through unchanged.

use oswe_core::{CableSystem, Kilometers, OsweError, OsweResult, Tonnes, Usd};
use serde::Serialize;

use crate::config::DesignInputs;

/// Decimal places kept on cable lengths and masses
pub const CABLE_ROUNDING_DECIMALS: i32 = 10;

/// Upper bound on export cables in one design, redundant spares included
pub const MAX_EXPORT_CABLES: usize = 10_000;

/// Sized export cable system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportCableResult {
    pub num_cables: usize,
    /// Length of one cable run
    pub length: Kilometers,
    /// Mass of one cable run
    pub mass: Tonnes,
    pub total_length: Kilometers,
    pub total_mass: Tonnes,
    pub total_cost: Usd,
}

/// Sizes the export cables against a cable system it borrows from the phase.
pub struct ExportCableSizer<'a> {
    inputs: &'a DesignInputs,
    system: &'a mut CableSystem,
}

impl<'a> ExportCableSizer<'a> {
    /// Fails with a configuration error when the system's cable cannot carry power.
    pub fn new(inputs: &'a DesignInputs, system: &'a mut CableSystem) -> OsweResult<Self> {
        system.cable().validate()?;
        Ok(Self { inputs, system })
    }

    /// Whole cables needed to carry full plant output, plus redundant spares.
    pub fn compute_num_cables(&self) -> OsweResult<usize> {
        let cable_power = self.system.cable().cable_power;
        let required = (self.inputs.capacity.value() / cable_power.value()).ceil();
        let too_many = || {
            OsweError::config(format!(
                "plant capacity {} on '{}' ({} per cable) with {} redundant \
                 needs more than {} export cables",
                self.inputs.capacity,
                self.system.cable().name,
                cable_power,
                self.inputs.num_redundant,
                MAX_EXPORT_CABLES
            ))
        };
        if !required.is_finite() || required > MAX_EXPORT_CABLES as f64 {
            return Err(too_many());
        }
        (required as usize)
            .checked_add(self.inputs.num_redundant as usize)
            .filter(|&num_cables| num_cables <= MAX_EXPORT_CABLES)
            .ok_or_else(too_many)
    }

    pub fn compute_cable_length(&self) -> Kilometers {
        let added_length = 1.0 + self.inputs.percent_added_length;
        let offshore = self.inputs.distance_to_landfall - self.system.touchdown().to_kilometers();
        ((self.system.free_cable_length() + offshore + self.inputs.interconnection_distance)
            * added_length)
            .round_to(CABLE_ROUNDING_DECIMALS)
    }

    pub fn compute_cable_mass(&self, length: Kilometers) -> Tonnes {
        Tonnes(length.value() * self.system.cable().linear_density)
            .round_to(CABLE_ROUNDING_DECIMALS)
    }

    /// Total length and mass over all cables
    pub fn compute_total_cable(
        &self,
        num_cables: usize,
        length: Kilometers,
        mass: Tonnes,
    ) -> (Kilometers, Tonnes) {
        let n = num_cables as f64;
        (
            (length * n).round_to(CABLE_ROUNDING_DECIMALS),
            (mass * n).round_to(CABLE_ROUNDING_DECIMALS),
        )
    }

    /// One entry of `length` per cable, in the shape the cable system lays sections from.
    pub fn sections_cable_lengths(&self, num_cables: usize, length: Kilometers) -> Vec<Kilometers> {
        vec![length; num_cables]
    }

    /// One entry of the cable name per cable.
    pub fn sections_cables(&self, num_cables: usize) -> Vec<String> {
        vec![self.system.cable().name.clone(); num_cables]
    }

    /// Sum of the cable system's cost by type.
    pub fn total_cable_cost(&self) -> Usd {
        self.system.cost_by_type().values().sum()
    }

    /// Run all sizing steps in order and lay the resulting sections.
    pub fn run(self) -> OsweResult<ExportCableResult> {
        let num_cables = self.compute_num_cables()?;
        let length = self.compute_cable_length();
        let mass = self.compute_cable_mass(length);
        let (total_length, total_mass) = self.compute_total_cable(num_cables, length, mass);

        let names = self.sections_cables(num_cables);
        let lengths = self.sections_cable_lengths(num_cables, length);
        self.system.initialize_sections(&names, &lengths)?;
        let total_cost = self.total_cable_cost();

        tracing::debug!(
            num_cables,
            length_km = length.value(),
            total_mass_t = total_mass.value(),
            total_cost_usd = total_cost.value(),
            "sized export cables"
        );

        Ok(ExportCableResult {
            num_cables,
            length,
            mass,
            total_length,
            total_mass,
            total_cost,
        })
    }
}
