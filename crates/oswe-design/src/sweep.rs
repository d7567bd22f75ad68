//! Batch evaluation of many independent design configurations.
//!
//! Each configuration gets its own [`ElectricalDesign`], so runs share no
//! mutable state and fan out across threads with rayon when the `parallel`
//! feature is enabled. One bad configuration yields an `Err` in its slot and
//! does not stop the others.

use oswe_core::{CableLibrary, OsweResult};

use crate::config::ElectricalDesignConfig;
use crate::phase::ElectricalDesign;
use crate::result::DetailedOutput;

/// Outcomes of a sweep, in input order.
#[derive(Debug)]
pub struct SweepSummary {
    pub success: usize,
    pub failure: usize,
    pub outcomes: Vec<OsweResult<DetailedOutput>>,
}

/// Design one configuration from scratch.
pub fn run_one<L>(config: &ElectricalDesignConfig, library: &L) -> OsweResult<DetailedOutput>
where
    L: CableLibrary + ?Sized,
{
    let mut design = ElectricalDesign::new(config, library)?;
    design.run()?;
    design.detailed_output().cloned()
}

pub fn run_sweep<L>(configs: &[ElectricalDesignConfig], library: &L) -> SweepSummary
where
    L: CableLibrary + Sync + ?Sized,
{
    #[cfg(feature = "parallel")]
    let outcomes: Vec<OsweResult<DetailedOutput>> = {
        use rayon::prelude::*;
        configs
            .par_iter()
            .map(|config| run_one(config, library))
            .collect()
    };
    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<OsweResult<DetailedOutput>> = configs
        .iter()
        .map(|config| run_one(config, library))
        .collect();

    let success = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
    let failure = outcomes.len() - success;
    tracing::info!(success, failure, "electrical design sweep finished");

    SweepSummary {
        success,
        failure,
        outcomes,
    }
}
