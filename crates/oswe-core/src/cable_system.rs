//! Cable system collaborator shared by the export sizer.
//!
//! Holds the cable types in play, the slack length and touchdown offset that
//! apply to every section, and, once [`CableSystem::initialize_sections`] has
//! run, the laid sections from which costs are derived.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::catalog::{CableSpec, DEFAULT_POWER_FACTOR};
use crate::error::{OsweError, OsweResult};
use crate::units::{Kilometers, Meters, Usd};

/// One laid cable section: a cable type and its length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CableSection {
    pub cable: String,
    pub length: Kilometers,
}

/// Cable types, shared geometry constants and laid sections for one design.
#[derive(Debug, Clone)]
pub struct CableSystem {
    cables: BTreeMap<String, CableSpec>,
    primary: String,
    free_cable_length: Kilometers,
    touchdown: Meters,
    sections: Vec<CableSection>,
}

impl CableSystem {
    /// Build a single-type system, as export systems use exactly one cable type.
    pub fn new(cable: CableSpec, free_cable_length: Kilometers, touchdown: Meters) -> Self {
        let primary = cable.name.clone();
        let mut cables = BTreeMap::new();
        cables.insert(primary.clone(), cable);
        Self {
            cables,
            primary,
            free_cable_length,
            touchdown,
            sections: Vec::new(),
        }
    }

    /// All cable types known to this system, keyed by name
    pub fn cables(&self) -> &BTreeMap<String, CableSpec> {
        &self.cables
    }

    /// The cable type the system was built around
    pub fn cable(&self) -> &CableSpec {
        &self.cables[&self.primary]
    }

    /// Slack length added to each section (km)
    pub fn free_cable_length(&self) -> Kilometers {
        self.free_cable_length
    }

    /// Distance from shore at which the route goes underground (m)
    pub fn touchdown(&self) -> Meters {
        self.touchdown
    }

    pub fn power_factor(&self) -> f64 {
        self.cable().power_factor.unwrap_or(DEFAULT_POWER_FACTOR)
    }

    /// Reactive compensation per km of the primary cable (Mvar/km)
    pub fn compensation_factor(&self) -> f64 {
        self.cable().compensation_factor
    }

    pub fn sections(&self) -> &[CableSection] {
        &self.sections
    }

    /// Lay sections from parallel arrays of cable names and lengths.
    ///
    /// Replaces any previously laid sections.
    pub fn initialize_sections(
        &mut self,
        cables: &[String],
        lengths: &[Kilometers],
    ) -> OsweResult<()> {
        if cables.len() != lengths.len() {
            return Err(OsweError::config(format!(
                "section arrays differ in length: {} cables, {} lengths",
                cables.len(),
                lengths.len()
            )));
        }
        let mut sections = Vec::with_capacity(cables.len());
        for (name, length) in cables.iter().zip(lengths) {
            if !self.cables.contains_key(name) {
                return Err(OsweError::config(format!(
                    "section references unknown cable type '{}'",
                    name
                )));
            }
            sections.push(CableSection {
                cable: name.clone(),
                length: *length,
            });
        }
        tracing::debug!(sections = sections.len(), "initialized cable sections");
        self.sections = sections;
        Ok(())
    }

    /// Total laid length per cable type
    pub fn length_by_type(&self) -> BTreeMap<String, Kilometers> {
        let mut totals: BTreeMap<String, Kilometers> = BTreeMap::new();
        for section in &self.sections {
            let entry = totals.entry(section.cable.clone()).or_default();
            *entry = *entry + section.length;
        }
        totals
    }

    /// Procurement cost per cable type (laid length x cost per km)
    pub fn cost_by_type(&self) -> BTreeMap<String, Usd> {
        self.length_by_type()
            .into_iter()
            .map(|(name, length)| {
                let rate = self.cables[&name].cost_per_km;
                (name, Usd(length.value() * rate))
            })
            .collect()
    }

    pub fn total_cost(&self) -> Usd {
        self.cost_by_type().values().sum()
    }
}
