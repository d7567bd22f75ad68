//! The electrical export design phase.
//!
//! [`ElectricalDesign`] composes the two sizers over a [`CableSystem`] it
//! owns. Construction validates the configuration and resolves the cable
//! spec; [`ElectricalDesign::run`] sizes the export cables, then the
//! substation, and stores one immutable set of outputs. Reading outputs
//! before a successful run is a [`OsweError::Sequencing`] error.

use oswe_core::{
    CableLibrary, CableSpec, CableSystem, Diagnostics, Kilometers, Meters, OsweError, OsweResult,
    Usd,
};

use crate::config::{DesignInputs, ElectricalDesignConfig};
use crate::export::{ExportCableResult, ExportCableSizer};
use crate::result::{DesignResult, DetailedOutput};
use crate::substation::{SubstationResult, SubstationSizer};

/// Everything a completed run produced.
#[derive(Debug, Clone, PartialEq)]
struct DesignOutputs {
    export: ExportCableResult,
    substation: SubstationResult,
    result: DesignResult,
    detailed: DetailedOutput,
}

/// Export cable and offshore substation design for one plant configuration.
#[derive(Debug, Clone)]
pub struct ElectricalDesign {
    inputs: DesignInputs,
    cable_system: CableSystem,
    outputs: Option<DesignOutputs>,
}

/// Riser length through the water column at the substation end.
pub fn free_cable_length(depth: Meters) -> Kilometers {
    depth.to_kilometers()
}

impl ElectricalDesign {
    /// Validate `config` and resolve its cable type from `library`.
    pub fn new<L>(config: &ElectricalDesignConfig, library: &L) -> OsweResult<Self>
    where
        L: CableLibrary + ?Sized,
    {
        let inputs = DesignInputs::resolve(config)?;
        let cable = library.resolve(&inputs.cable_name)?;
        let cable_system = CableSystem::new(
            cable,
            free_cable_length(inputs.depth),
            inputs.touchdown_distance,
        );
        Ok(Self {
            inputs,
            cable_system,
            outputs: None,
        })
    }

    pub fn inputs(&self) -> &DesignInputs {
        &self.inputs
    }

    pub fn cable_system(&self) -> &CableSystem {
        &self.cable_system
    }

    pub fn cable(&self) -> &CableSpec {
        self.cable_system.cable()
    }

    /// Size cables and substation. A failed run leaves no outputs behind.
    pub fn run(&mut self) -> OsweResult<&DesignResult> {
        self.outputs = None;

        let export = ExportCableSizer::new(&self.inputs, &mut self.cable_system)?.run()?;
        let cable = self.cable_system.cable();
        let substation = SubstationSizer::new(&self.inputs, cable, export.num_cables).run()?;

        let diagnostics = self.collect_diagnostics(&export, &substation);
        for issue in &diagnostics.issues {
            tracing::warn!(%issue, "electrical design finding");
        }

        let result = DesignResult::assemble(&export, cable, &substation);
        let detailed =
            DetailedOutput::assemble(result.clone(), &export, cable, &substation, diagnostics);

        tracing::info!(
            cable = %cable.name,
            num_cables = export.num_cables,
            num_substations = substation.num_substations,
            export_cost_usd = export.total_cost.value(),
            substation_cost_usd = substation.substation_cost.value(),
            "electrical export design complete"
        );

        let outputs = self.outputs.insert(DesignOutputs {
            export,
            substation,
            result,
            detailed,
        });
        Ok(&outputs.result)
    }

    fn collect_diagnostics(
        &self,
        export: &ExportCableResult,
        substation: &SubstationResult,
    ) -> Diagnostics {
        let mut diag = Diagnostics::new();
        if self.inputs.touchdown_distance.to_kilometers() > self.inputs.distance_to_landfall {
            diag.add_warning_with_entity(
                "geometry",
                &format!(
                    "touchdown distance {} exceeds distance to landfall {}",
                    self.inputs.touchdown_distance, self.inputs.distance_to_landfall
                ),
                "export cable",
            );
        }
        if export.length.value() <= 0.0 {
            diag.add_warning_with_entity(
                "geometry",
                &format!("export cable length {} is not positive", export.length),
                "export cable",
            );
        }
        let topside_mass = substation.topside_mass.value();
        if topside_mass.is_nan() || topside_mass <= 0.0 {
            diag.add_error_with_entity(
                "mass",
                &format!("topside mass {} is not positive", substation.topside_mass),
                "topside",
            );
        }
        if !substation.substructure_mass.is_finite() {
            diag.add_error_with_entity("mass", "substructure mass is not finite", "substructure");
        }
        diag
    }

    fn outputs(&self) -> OsweResult<&DesignOutputs> {
        self.outputs.as_ref().ok_or_else(|| {
            OsweError::Sequencing(
                "electrical design outputs requested before run() completed".into(),
            )
        })
    }

    /// Outputs in the layout the plant pipeline consumes.
    pub fn design_result(&self) -> OsweResult<&DesignResult> {
        Ok(&self.outputs()?.result)
    }

    pub fn detailed_output(&self) -> OsweResult<&DetailedOutput> {
        Ok(&self.outputs()?.detailed)
    }

    pub fn export_cables(&self) -> OsweResult<&ExportCableResult> {
        Ok(&self.outputs()?.export)
    }

    pub fn substation(&self) -> OsweResult<&SubstationResult> {
        Ok(&self.outputs()?.substation)
    }

    /// Sum of the cable system's cost by type after a run.
    pub fn total_cable_cost(&self) -> OsweResult<Usd> {
        self.outputs()?;
        Ok(self.cable_system.cost_by_type().values().sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oswe_core::{CableCatalog, Megawatts};

    fn catalog() -> CableCatalog {
        CableCatalog::new().with_cable(
            CableSpec::new("XLPE_500mm_132kV", 50.0, Megawatts(200.0)).with_cost_per_km(400_000.0),
        )
    }

    #[test]
    fn reading_before_run_is_sequencing_error() {
        let config = ElectricalDesignConfig::new(50.0, 30.0, 500.0, "XLPE_500mm_132kV");
        let design = ElectricalDesign::new(&config, &catalog()).unwrap();
        assert!(design.design_result().unwrap_err().is_sequencing());
        assert!(design.detailed_output().unwrap_err().is_sequencing());
        assert!(design.total_cable_cost().unwrap_err().is_sequencing());
    }

    #[test]
    fn unknown_cable_fails_at_construction() {
        let config = ElectricalDesignConfig::new(50.0, 30.0, 500.0, "HVDC_2000mm_320kV");
        let err = ElectricalDesign::new(&config, &catalog()).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn failed_run_clears_previous_outputs() {
        let config = ElectricalDesignConfig::new(50.0, 30.0, 500.0, "XLPE_500mm_132kV");
        let mut design = ElectricalDesign::new(&config, &catalog()).unwrap();
        design.run().unwrap();
        assert!(design.design_result().is_ok());

        design.inputs.substation.num_substations = Some(0);
        assert!(design.run().unwrap_err().is_config());
        assert!(design.design_result().unwrap_err().is_sequencing());
    }

    #[test]
    fn free_length_is_water_depth() {
        assert_eq!(free_cable_length(Meters(30.0)), Kilometers(0.03));
    }

    #[test]
    fn cable_cost_matches_laid_length() {
        let config = ElectricalDesignConfig::new(50.0, 30.0, 500.0, "XLPE_500mm_132kV");
        let mut design = ElectricalDesign::new(&config, &catalog()).unwrap();
        design.run().unwrap();
        let export = design.export_cables().unwrap();
        let expected = export.total_length.value() * 400_000.0;
        assert!((design.total_cable_cost().unwrap().value() - expected).abs() < 1e-3);
        assert_eq!(design.total_cable_cost().unwrap(), export.total_cost);
    }
}
