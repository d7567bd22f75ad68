//! Offshore substation sizing and costing.
//!
//! ## Computation Order
//!
//! ```text
//!  1. num_substations      override, else ceil(capacity / 800)
//!  2. substructure_length  depth + 10 m
//!  3. deck spaces          constant 1 (placeholder)
//!  4. MPTs                 one per export cable; rating snapped to 10 MW
//!  5. shunt reactors       touchdown * compensation_factor * shunt_cost_rate
//!  6. switchgear           one unit per export cable
//!  7. topside              3.85 * rating * num_mpt + 285 t
//!  8. ancillary systems    backup gen + workspace + other
//!  9. land assembly        factor * (switchgear + shunt + ancillary)
//! 10. substructure         0.4 * topside, plus 8 * m^0.5574 of pile
//! ```
//!
//! Each step reads only inputs and outputs of earlier steps.

use oswe_core::{
    round_to, CableSpec, Megavars, Megawatts, Meters, OsweError, OsweResult, Tonnes, Usd,
};
use serde::Serialize;

use crate::config::{DesignInputs, SUBSTATION_CAPACITY_MW};

/// Height of the substructure above the seabed beyond the water depth (m)
pub const SUBSTRUCTURE_FREEBOARD_M: f64 = 10.0;

/// Transformer ratings come in steps of this size (MW)
pub const MPT_RATING_STEP_MW: f64 = 10.0;

/// Topside mass per MW of installed transformer rating (t/MW)
pub const TOPSIDE_MASS_PER_MW: f64 = 3.85;

/// Hull and deck structure mass independent of equipment (t)
pub const TOPSIDE_BASE_MASS_T: f64 = 285.0;

pub const SUBSTRUCTURE_TO_TOPSIDE_MASS_RATIO: f64 = 0.4;
pub const PILE_MASS_COEFFICIENT: f64 = 8.0;
pub const PILE_MASS_EXPONENT: f64 = 0.5574;

/// Substructure types the installation phases can handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SubstructureType {
    Monopile,
}

/// Substructure mass split and cost
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubstructureSizing {
    /// Jacket/transition mass, excluding piles
    pub structure_mass: Tonnes,
    pub pile_mass: Tonnes,
    pub cost: Usd,
}

impl SubstructureSizing {
    /// Structure plus pile mass
    pub fn total_mass(&self) -> Tonnes {
        self.structure_mass + self.pile_mass
    }
}

/// Sized offshore substation (values are per substation).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubstationResult {
    pub num_substations: usize,
    pub num_mpt: usize,
    pub mpt_rating: Megawatts,
    pub mpt_cost: Usd,
    pub shunt_compensation: Megavars,
    pub shunt_reactor_cost: Usd,
    pub switchgear_cost: Usd,
    pub topside_mass: Tonnes,
    pub topside_cost: Usd,
    pub ancillary_system_cost: Usd,
    pub land_assembly_cost: Usd,
    /// Structure plus pile mass
    pub substructure_mass: Tonnes,
    pub substructure_pile_mass: Tonnes,
    pub substructure_length: Meters,
    pub substructure_cost: Usd,
    pub substructure_type: SubstructureType,
    pub substructure_deck_space: f64,
    pub topside_deck_space: f64,
    /// Sum of the topside cost components
    pub substation_cost: Usd,
}

impl SubstationResult {
    /// Topside cost over all substations
    pub fn total_substation_cost(&self) -> Usd {
        self.substation_cost * self.num_substations as f64
    }

    /// Substructure cost over all substations
    pub fn total_substructure_cost(&self) -> Usd {
        self.substructure_cost * self.num_substations as f64
    }
}

/// Sizes the substation from plant inputs and the export cable count.
pub struct SubstationSizer<'a> {
    inputs: &'a DesignInputs,
    cable: &'a CableSpec,
    num_cables: usize,
}

impl<'a> SubstationSizer<'a> {
    pub fn new(inputs: &'a DesignInputs, cable: &'a CableSpec, num_cables: usize) -> Self {
        Self {
            inputs,
            cable,
            num_cables,
        }
    }

    pub fn calc_num_substations(&self) -> usize {
        match self.inputs.substation.num_substations {
            Some(n) => n as usize,
            None => (self.inputs.capacity.value() / SUBSTATION_CAPACITY_MW).ceil() as usize,
        }
    }

    pub fn calc_substructure_length(&self) -> Meters {
        self.inputs.depth + Meters(SUBSTRUCTURE_FREEBOARD_M)
    }

    pub fn calc_substructure_deck_space(&self) -> f64 {
        1.0
    }

    pub fn calc_topside_deck_space(&self) -> f64 {
        1.0
    }

    /// One MPT per export cable, rated for an equal share of plant capacity.
    pub fn calc_num_mpt_and_rating(
        &self,
        num_substations: usize,
    ) -> OsweResult<(usize, Megawatts)> {
        let num_mpt = self.num_cables;
        let units = num_mpt
            .checked_mul(num_substations)
            .filter(|&units| units > 0)
            .ok_or_else(|| {
                OsweError::config(format!(
                    "cannot rate transformers for {} cables across {} substations",
                    num_mpt, num_substations
                ))
            })?;
        let share = self.inputs.capacity.value() / units as f64;
        let rating = round_to(share / MPT_RATING_STEP_MW, 0) * MPT_RATING_STEP_MW;
        Ok((num_mpt, Megawatts(rating)))
    }

    pub fn calc_mpt_cost(&self, num_mpt: usize) -> Usd {
        Usd(num_mpt as f64 * self.inputs.substation.mpt_cost_rate)
    }

    /// Reactive compensation and the cost of the shunt reactors providing it.
    pub fn calc_shunt_reactor_cost(&self) -> (Megavars, Usd) {
        let compensation =
            Megavars(self.inputs.touchdown_distance.value() * self.cable.compensation_factor);
        let cost = Usd(compensation.value() * self.inputs.substation.shunt_cost_rate);
        (compensation, cost)
    }

    pub fn calc_switchgear_cost(&self) -> Usd {
        Usd(self.num_cables as f64 * self.inputs.substation.switchgear_cost)
    }

    pub fn calc_topside_mass_and_cost(
        &self,
        mpt_rating: Megawatts,
        num_mpt: usize,
    ) -> (Tonnes, Usd) {
        let rates = &self.inputs.substation;
        let mass = Tonnes(
            TOPSIDE_MASS_PER_MW * mpt_rating.value() * num_mpt as f64 + TOPSIDE_BASE_MASS_T,
        );
        let cost = Usd(mass.value() * rates.topside_fab_cost_rate + rates.topside_design_cost);
        (mass, cost)
    }

    pub fn calc_ancillary_system_cost(&self) -> Usd {
        let rates = &self.inputs.substation;
        Usd(rates.backup_gen_cost + rates.workspace_cost + rates.other_ancillary_cost)
    }

    /// Assembly is charged on the equipment being assembled, not on the topside structure.
    pub fn calc_assembly_cost(&self, switchgear: Usd, shunt_reactor: Usd, ancillary: Usd) -> Usd {
        (switchgear + shunt_reactor + ancillary) * self.inputs.substation.topside_assembly_factor
    }

    pub fn calc_substructure_mass_and_cost(&self, topside_mass: Tonnes) -> SubstructureSizing {
        let rates = &self.inputs.substation;
        let structure_mass = topside_mass * SUBSTRUCTURE_TO_TOPSIDE_MASS_RATIO;
        let pile_mass =
            Tonnes(PILE_MASS_COEFFICIENT * structure_mass.value().powf(PILE_MASS_EXPONENT));
        let cost = Usd(structure_mass.value() * rates.oss_substructure_cost_rate
            + pile_mass.value() * rates.oss_pile_cost_rate);
        SubstructureSizing {
            structure_mass,
            pile_mass,
            cost,
        }
    }

    /// Run all steps in dependency order.
    pub fn run(&self) -> OsweResult<SubstationResult> {
        let num_substations = self.calc_num_substations();
        let substructure_length = self.calc_substructure_length();
        let substructure_deck_space = self.calc_substructure_deck_space();
        let topside_deck_space = self.calc_topside_deck_space();

        let (num_mpt, mpt_rating) = self.calc_num_mpt_and_rating(num_substations)?;
        let mpt_cost = self.calc_mpt_cost(num_mpt);
        let (shunt_compensation, shunt_reactor_cost) = self.calc_shunt_reactor_cost();
        let switchgear_cost = self.calc_switchgear_cost();
        let (topside_mass, topside_cost) = self.calc_topside_mass_and_cost(mpt_rating, num_mpt);
        let ancillary_system_cost = self.calc_ancillary_system_cost();
        let land_assembly_cost =
            self.calc_assembly_cost(switchgear_cost, shunt_reactor_cost, ancillary_system_cost);
        let substructure = self.calc_substructure_mass_and_cost(topside_mass);

        let substation_cost: Usd = [
            mpt_cost,
            shunt_reactor_cost,
            switchgear_cost,
            topside_cost,
            ancillary_system_cost,
            land_assembly_cost,
        ]
        .iter()
        .sum();

        tracing::debug!(
            num_substations,
            num_mpt,
            mpt_rating_mw = mpt_rating.value(),
            topside_mass_t = topside_mass.value(),
            substructure_mass_t = substructure.total_mass().value(),
            "sized offshore substation"
        );

        Ok(SubstationResult {
            num_substations,
            num_mpt,
            mpt_rating,
            mpt_cost,
            shunt_compensation,
            shunt_reactor_cost,
            switchgear_cost,
            topside_mass,
            topside_cost,
            ancillary_system_cost,
            land_assembly_cost,
            substructure_mass: substructure.total_mass(),
            substructure_pile_mass: substructure.pile_mass,
            substructure_length,
            substructure_cost: substructure.cost,
            substructure_type: SubstructureType::Monopile,
            substructure_deck_space,
            topside_deck_space,
            substation_cost,
        })
    }
}
