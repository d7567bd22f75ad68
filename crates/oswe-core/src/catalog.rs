//! Named cable specifications and the lookup interface the design engine consumes.
//!
//! The engine never reads component libraries itself; it asks a
//! [`CableLibrary`] for a spec by name. [`CableCatalog`] is the in-memory
//! implementation, built in code or read from a YAML/JSON file of the form:
//!
//! ```yaml
//! XLPE_1000mm_220kV:
//!   linear_density: 90.0
//!   cable_power: 300.0
//!   compensation_factor: 0.5
//!   cost_per_km: 850000
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{OsweError, OsweResult};
use crate::units::Megawatts;

/// Power factor assumed when a cable spec does not carry one.
pub const DEFAULT_POWER_FACTOR: f64 = 0.95;

/// Physical and cost properties of one export cable type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableSpec {
    /// Catalog key; filled from the map key when loaded from a file
    #[serde(default)]
    pub name: String,
    /// Linear density (t/km)
    pub linear_density: f64,
    /// Maximum power one cable carries
    pub cable_power: Megawatts,
    /// Reactive compensation required per km of cable (Mvar/km)
    #[serde(default)]
    pub compensation_factor: f64,
    /// Procurement cost (USD/km)
    #[serde(default)]
    pub cost_per_km: f64,
    /// Rated voltage (kV)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rated_voltage: Option<f64>,
    /// Current capacity (A)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_capacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_factor: Option<f64>,
}

impl CableSpec {
    /// Create a spec with the properties the sizing formulas need.
    pub fn new(name: impl Into<String>, linear_density: f64, cable_power: Megawatts) -> Self {
        Self {
            name: name.into(),
            linear_density,
            cable_power,
            compensation_factor: 0.0,
            cost_per_km: 0.0,
            rated_voltage: None,
            current_capacity: None,
            power_factor: None,
        }
    }

    pub fn with_compensation_factor(mut self, mvar_per_km: f64) -> Self {
        self.compensation_factor = mvar_per_km;
        self
    }

    pub fn with_cost_per_km(mut self, usd_per_km: f64) -> Self {
        self.cost_per_km = usd_per_km;
        self
    }

    pub fn with_rated_voltage(mut self, kv: f64) -> Self {
        self.rated_voltage = Some(kv);
        self
    }

    pub fn with_power_factor(mut self, power_factor: f64) -> Self {
        self.power_factor = Some(power_factor);
        self
    }

    /// Reject specs that would make cable packing divide by zero or yield
    /// non-finite masses.
    pub fn validate(&self) -> OsweResult<()> {
        let power = self.cable_power.value();
        if !power.is_finite() || power <= 0.0 {
            return Err(OsweError::config(format!(
                "cable '{}' has cable_power {}; it must be a positive finite number",
                self.name, power
            )));
        }
        if !self.linear_density.is_finite() || self.linear_density < 0.0 {
            return Err(OsweError::config(format!(
                "cable '{}' has linear_density {}; it must be a non-negative finite number",
                self.name, self.linear_density
            )));
        }
        if !self.compensation_factor.is_finite() || !self.cost_per_km.is_finite() {
            return Err(OsweError::config(format!(
                "cable '{}' has a non-finite compensation factor or cost",
                self.name
            )));
        }
        Ok(())
    }
}

/// Lookup interface for named cable specs.
pub trait CableLibrary {
    /// Returns the spec registered under `name`, if any.
    fn cable(&self, name: &str) -> Option<&CableSpec>;

    /// Look up and validate a spec, failing with a configuration error when
    /// the name is unknown or the spec is unusable.
    fn resolve(&self, name: &str) -> OsweResult<CableSpec> {
        let spec = self.cable(name).ok_or_else(|| {
            OsweError::config(format!("cable type '{}' not found in catalog", name))
        })?;
        spec.validate()?;
        Ok(spec.clone())
    }
}

/// In-memory cable catalog keyed by cable name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CableCatalog {
    cables: BTreeMap<String, CableSpec>,
}

impl CableCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a spec under its own name, replacing any previous entry.
    pub fn insert(&mut self, spec: CableSpec) {
        self.cables.insert(spec.name.clone(), spec);
    }

    pub fn with_cable(mut self, spec: CableSpec) -> Self {
        self.insert(spec);
        self
    }

    pub fn from_specs(specs: impl IntoIterator<Item = CableSpec>) -> Self {
        let mut catalog = Self::new();
        for spec in specs {
            catalog.insert(spec);
        }
        catalog
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cables.is_empty()
    }

    pub fn from_yaml_str(data: &str) -> Result<Self> {
        let parsed: Self = serde_yaml::from_str(data).context("parsing cable catalog yaml")?;
        Ok(parsed.with_keys_as_names())
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        let parsed: Self = serde_json::from_str(data).context("parsing cable catalog json")?;
        Ok(parsed.with_keys_as_names())
    }

    /// Read a catalog file, choosing the format from the extension and
    /// falling back to YAML then JSON.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading cable catalog '{}'", path.display()))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::from_yaml_str(&data)
            }
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&data),
            _ => Self::from_yaml_str(&data)
                .or_else(|_| Self::from_json_str(&data))
                .with_context(|| format!("parsing cable catalog '{}'", path.display())),
        }
    }

    fn with_keys_as_names(mut self) -> Self {
        for (key, spec) in self.cables.iter_mut() {
            if spec.name.is_empty() {
                spec.name = key.clone();
            }
        }
        self
    }
}

impl CableLibrary for CableCatalog {
    fn cable(&self, name: &str) -> Option<&CableSpec> {
        self.cables.get(name)
    }
}
