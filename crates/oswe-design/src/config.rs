//! Design configuration: the raw input tree and its validated form.
//!
//! [`ElectricalDesignConfig`] mirrors the plant configuration sections this
//! phase reads. Every field is optional at the serde level so that a missing
//! required key surfaces as a configuration error naming the key, instead of
//! a deserialization failure. [`DesignInputs::resolve`] is the single place
//! where required keys are checked and optional keys take their defaults.

use anyhow::{Context, Result};
use oswe_core::{Kilometers, Megawatts, Meters, OsweError, OsweResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Interconnection distance when `landfall.interconnection_distance` is absent (km)
pub const DEFAULT_INTERCONNECTION_DISTANCE_KM: f64 = 3.0;

/// Plant capacity served by one offshore substation when not overridden (MW)
pub const SUBSTATION_CAPACITY_MW: f64 = 800.0;

/// Main power transformer cost (USD per transformer)
pub const DEFAULT_MPT_COST_RATE: f64 = 1_750_000.0;
/// Topside fabrication cost (USD/t)
pub const DEFAULT_TOPSIDE_FAB_COST_RATE: f64 = 14_500.0;
/// Topside design cost (USD per substation)
pub const DEFAULT_TOPSIDE_DESIGN_COST: f64 = 4_500_000.0;
/// Shunt reactor cost (USD/Mvar)
pub const DEFAULT_SHUNT_COST_RATE: f64 = 120_000.0;
/// Switchgear cost (USD per unit)
pub const DEFAULT_SWITCHGEAR_COST: f64 = 134_000.0;
/// Backup generator cost (USD per substation)
pub const DEFAULT_BACKUP_GEN_COST: f64 = 1_000_000.0;
/// Workspace and accommodation cost (USD per substation)
pub const DEFAULT_WORKSPACE_COST: f64 = 2_000_000.0;
/// Other ancillary systems cost (USD per substation)
pub const DEFAULT_OTHER_ANCILLARY_COST: f64 = 3_000_000.0;
/// Land assembly surcharge as a fraction of equipment cost
pub const DEFAULT_TOPSIDE_ASSEMBLY_FACTOR: f64 = 0.075;
/// Substructure steel cost (USD/t)
pub const DEFAULT_OSS_SUBSTRUCTURE_COST_RATE: f64 = 3_000.0;
/// Pile cost (USD/t)
pub const DEFAULT_OSS_PILE_COST_RATE: f64 = 0.0;

/// Raw configuration for the electrical export design phase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectricalDesignConfig {
    pub site: SiteConfig,
    pub landfall: LandfallConfig,
    pub plant: PlantConfig,
    pub export_system_design: ExportSystemDesignConfig,
    pub substation_design: SubstationDesignConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// km
    pub distance_to_landfall: Option<f64>,
    /// m
    pub depth: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandfallConfig {
    /// km
    pub interconnection_distance: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantConfig {
    /// MW
    pub capacity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSystemDesignConfig {
    /// Cable type name, a key into the cable catalog
    pub cables: Option<String>,
    pub num_redundant: Option<u32>,
    /// m
    pub touchdown_distance: Option<f64>,
    /// Fraction of route length added for routing slack
    pub percent_added_length: Option<f64>,
}

/// Optional substation cost overrides. Absent fields take the `DEFAULT_*`
/// constants of this module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstationDesignConfig {
    /// USD per transformer
    pub mpt_cost_rate: Option<f64>,
    /// USD/t
    pub topside_fab_cost_rate: Option<f64>,
    /// USD
    pub topside_design_cost: Option<f64>,
    /// USD/Mvar
    pub shunt_cost_rate: Option<f64>,
    /// USD per switchgear unit
    pub switchgear_cost: Option<f64>,
    pub backup_gen_cost: Option<f64>,
    pub workspace_cost: Option<f64>,
    pub other_ancillary_cost: Option<f64>,
    pub topside_assembly_factor: Option<f64>,
    /// USD/t
    pub oss_substructure_cost_rate: Option<f64>,
    /// USD/t
    pub oss_pile_cost_rate: Option<f64>,
    pub num_substations: Option<u32>,
}

impl ElectricalDesignConfig {
    /// Config with every required key set and all optional keys absent.
    pub fn new(
        distance_to_landfall_km: f64,
        depth_m: f64,
        capacity_mw: f64,
        cable: impl Into<String>,
    ) -> Self {
        Self {
            site: SiteConfig {
                distance_to_landfall: Some(distance_to_landfall_km),
                depth: Some(depth_m),
            },
            plant: PlantConfig {
                capacity: Some(capacity_mw),
            },
            export_system_design: ExportSystemDesignConfig {
                cables: Some(cable.into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn with_interconnection_distance(mut self, km: f64) -> Self {
        self.landfall.interconnection_distance = Some(km);
        self
    }

    pub fn with_num_redundant(mut self, num_redundant: u32) -> Self {
        self.export_system_design.num_redundant = Some(num_redundant);
        self
    }

    pub fn with_touchdown_distance(mut self, meters: f64) -> Self {
        self.export_system_design.touchdown_distance = Some(meters);
        self
    }

    pub fn with_percent_added_length(mut self, fraction: f64) -> Self {
        self.export_system_design.percent_added_length = Some(fraction);
        self
    }

    pub fn with_substation_design(mut self, design: SubstationDesignConfig) -> Self {
        self.substation_design = design;
        self
    }
}

/// Read a design configuration from YAML or JSON.
///
/// The format is chosen from the file extension; unknown extensions try YAML
/// first, then JSON.
pub fn load_config_from_path(path: &Path) -> Result<ElectricalDesignConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading design config '{}'", path.display()))?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
            serde_yaml::from_str(&data).context("parsing design config yaml")
        }
        Some(ext) if ext.eq_ignore_ascii_case("json") => {
            serde_json::from_str(&data).context("parsing design config json")
        }
        _ => serde_yaml::from_str(&data)
            .or_else(|_| serde_json::from_str(&data))
            .context("parsing design config"),
    }
}

/// Substation cost rates after defaulting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubstationRates {
    pub mpt_cost_rate: f64,
    pub topside_fab_cost_rate: f64,
    pub topside_design_cost: f64,
    pub shunt_cost_rate: f64,
    pub switchgear_cost: f64,
    pub backup_gen_cost: f64,
    pub workspace_cost: f64,
    pub other_ancillary_cost: f64,
    pub topside_assembly_factor: f64,
    pub oss_substructure_cost_rate: f64,
    pub oss_pile_cost_rate: f64,
    /// Explicit substation count; `None` derives it from plant capacity
    pub num_substations: Option<u32>,
}

impl Default for SubstationRates {
    fn default() -> Self {
        Self::from_overrides(&SubstationDesignConfig::default())
    }
}

impl SubstationRates {
    /// Apply the documented default to every absent override.
    pub fn from_overrides(design: &SubstationDesignConfig) -> Self {
        Self {
            mpt_cost_rate: design.mpt_cost_rate.unwrap_or(DEFAULT_MPT_COST_RATE),
            topside_fab_cost_rate: design
                .topside_fab_cost_rate
                .unwrap_or(DEFAULT_TOPSIDE_FAB_COST_RATE),
            topside_design_cost: design
                .topside_design_cost
                .unwrap_or(DEFAULT_TOPSIDE_DESIGN_COST),
            shunt_cost_rate: design.shunt_cost_rate.unwrap_or(DEFAULT_SHUNT_COST_RATE),
            switchgear_cost: design.switchgear_cost.unwrap_or(DEFAULT_SWITCHGEAR_COST),
            backup_gen_cost: design.backup_gen_cost.unwrap_or(DEFAULT_BACKUP_GEN_COST),
            workspace_cost: design.workspace_cost.unwrap_or(DEFAULT_WORKSPACE_COST),
            other_ancillary_cost: design
                .other_ancillary_cost
                .unwrap_or(DEFAULT_OTHER_ANCILLARY_COST),
            topside_assembly_factor: design
                .topside_assembly_factor
                .unwrap_or(DEFAULT_TOPSIDE_ASSEMBLY_FACTOR),
            oss_substructure_cost_rate: design
                .oss_substructure_cost_rate
                .unwrap_or(DEFAULT_OSS_SUBSTRUCTURE_COST_RATE),
            oss_pile_cost_rate: design
                .oss_pile_cost_rate
                .unwrap_or(DEFAULT_OSS_PILE_COST_RATE),
            num_substations: design.num_substations,
        }
    }

    fn validate(&self) -> OsweResult<()> {
        let rates = [
            ("mpt_cost_rate", self.mpt_cost_rate),
            ("topside_fab_cost_rate", self.topside_fab_cost_rate),
            ("topside_design_cost", self.topside_design_cost),
            ("shunt_cost_rate", self.shunt_cost_rate),
            ("switchgear_cost", self.switchgear_cost),
            ("backup_gen_cost", self.backup_gen_cost),
            ("workspace_cost", self.workspace_cost),
            ("other_ancillary_cost", self.other_ancillary_cost),
            ("topside_assembly_factor", self.topside_assembly_factor),
            ("oss_substructure_cost_rate", self.oss_substructure_cost_rate),
            ("oss_pile_cost_rate", self.oss_pile_cost_rate),
        ];
        for (key, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(OsweError::config(format!(
                    "substation_design.{key} must be a non-negative finite number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Validated, defaulted inputs for one design run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignInputs {
    pub distance_to_landfall: Kilometers,
    pub depth: Meters,
    pub interconnection_distance: Kilometers,
    pub capacity: Megawatts,
    /// Cable type name to look up in the catalog
    pub cable_name: String,
    pub num_redundant: u32,
    pub touchdown_distance: Meters,
    pub percent_added_length: f64,
    pub substation: SubstationRates,
}

impl DesignInputs {
    /// Check required keys and apply defaults to optional ones.
    pub fn resolve(config: &ElectricalDesignConfig) -> OsweResult<Self> {
        let distance_to_landfall =
            required(config.site.distance_to_landfall, "site.distance_to_landfall")?;
        let depth = required(config.site.depth, "site.depth")?;
        let capacity = required(config.plant.capacity, "plant.capacity")?;
        if capacity < 0.0 {
            return Err(OsweError::config(format!(
                "plant.capacity must not be negative, got {capacity}"
            )));
        }

        let cable_name = config
            .export_system_design
            .cables
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| OsweError::config("export_system_design.cables is required"))?
            .to_string();

        let interconnection_distance = optional(
            config.landfall.interconnection_distance,
            "landfall.interconnection_distance",
            DEFAULT_INTERCONNECTION_DISTANCE_KM,
        )?;
        let touchdown_distance = optional(
            config.export_system_design.touchdown_distance,
            "export_system_design.touchdown_distance",
            0.0,
        )?;
        let percent_added_length = optional(
            config.export_system_design.percent_added_length,
            "export_system_design.percent_added_length",
            0.0,
        )?;

        let substation = SubstationRates::from_overrides(&config.substation_design);
        substation.validate()?;

        Ok(Self {
            distance_to_landfall: Kilometers(distance_to_landfall),
            depth: Meters(depth),
            interconnection_distance: Kilometers(interconnection_distance),
            capacity: Megawatts(capacity),
            cable_name,
            num_redundant: config.export_system_design.num_redundant.unwrap_or(0),
            touchdown_distance: Meters(touchdown_distance),
            percent_added_length,
            substation,
        })
    }
}

fn required(value: Option<f64>, key: &str) -> OsweResult<f64> {
    let value = value.ok_or_else(|| OsweError::config(format!("{key} is required")))?;
    finite(value, key)
}

fn optional(value: Option<f64>, key: &str, default: f64) -> OsweResult<f64> {
    finite(value.unwrap_or(default), key)
}

fn finite(value: f64, key: &str) -> OsweResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(OsweError::config(format!("{key} must be finite, got {value}")))
    }
}
