//! # oswe-design: Export Cable and Offshore Substation Design
//!
//! Deterministic sizing and costing of an offshore wind plant's electrical
//! export system, in two stages:
//!
//! ```text
//! ┌───────────────────┐  num_cables  ┌───────────────────┐
//! │ ExportCableSizer  │ ───────────▶ │ SubstationSizer   │
//! │  count, length,   │              │  MPTs, reactors,  │
//! │  mass, cost       │              │  topside, piles   │
//! └───────────────────┘              └───────────────────┘
//!           └────────────┬─────────────────────┘
//!                        ▼
//!          DesignResult / DetailedOutput
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oswe_core::{CableCatalog, CableSpec, Megawatts};
//! use oswe_design::{ElectricalDesign, ElectricalDesignConfig};
//!
//! let catalog = CableCatalog::new()
//!     .with_cable(CableSpec::new("XLPE_500mm_132kV", 50.0, Megawatts(200.0)));
//! let config = ElectricalDesignConfig::new(50.0, 30.0, 500.0, "XLPE_500mm_132kV");
//!
//! let mut design = ElectricalDesign::new(&config, &catalog).unwrap();
//! let result = design.run().unwrap();
//! assert_eq!(result.export_system.cable.number, 3);
//! assert_eq!(result.num_substations, 1);
//! ```

pub mod config;
pub mod export;
pub mod phase;
pub mod result;
pub mod substation;
pub mod sweep;

pub use config::{
    load_config_from_path, DesignInputs, ElectricalDesignConfig, ExportSystemDesignConfig,
    LandfallConfig, PlantConfig, SiteConfig, SubstationDesignConfig, SubstationRates,
};
pub use export::{ExportCableResult, ExportCableSizer};
pub use phase::{free_cable_length, ElectricalDesign};
pub use result::{
    DesignResult, DetailedOutput, ExportCableOutput, ExportSystemOutput, SubstructureOutput,
    TopsideOutput,
};
pub use substation::{SubstationResult, SubstationSizer, SubstructureSizing, SubstructureType};
pub use sweep::{run_one, run_sweep, SweepSummary};
