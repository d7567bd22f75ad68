//! # oswe-core: Offshore Wind Export Core Types
//!
//! Shared building blocks for sizing the electrical export system of an
//! offshore wind plant:
//!
//! - [`units`] - unit-safe newtypes (MW, Mvar, km, m, t, USD)
//! - [`error`] - [`OsweError`] and the [`OsweResult`] alias
//! - [`catalog`] - [`CableSpec`], the [`CableLibrary`] lookup trait and the
//!   in-memory [`CableCatalog`]
//! - [`cable_system`] - the [`CableSystem`] collaborator that tracks laid
//!   sections and cost by cable type
//! - [`diagnostics`] - non-fatal findings recorded during a run
//!
//! ## Quick Start
//!
//! ```rust
//! use oswe_core::*;
//!
//! let catalog = CableCatalog::new().with_cable(
//!     CableSpec::new("XLPE_500mm_132kV", 42.5, Megawatts(200.0)).with_cost_per_km(650_000.0),
//! );
//!
//! let spec = catalog.resolve("XLPE_500mm_132kV").unwrap();
//! let mut system = CableSystem::new(spec, Kilometers(0.03), Meters(0.0));
//! system
//!     .initialize_sections(&["XLPE_500mm_132kV".to_string()], &[Kilometers(40.0)])
//!     .unwrap();
//! assert_eq!(system.total_cost(), Usd(26_000_000.0));
//! ```

pub mod cable_system;
pub mod catalog;
pub mod diagnostics;
pub mod error;
pub mod units;

pub use cable_system::{CableSection, CableSystem};
pub use catalog::{CableCatalog, CableLibrary, CableSpec, DEFAULT_POWER_FACTOR};
pub use diagnostics::{DiagnosticIssue, Diagnostics, Severity};
pub use error::{OsweError, OsweResult};
pub use units::{round_to, Kilometers, Megavars, Megawatts, Meters, Tonnes, Usd};
