//! One entry point over the four (timing model x pruning) combinations

use std::fmt;

use crate::gs_async::{estimate_asynchronous, estimate_asynchronous_fast};
use crate::gs_interface::{SpreadError, SpreadParams, SpreadingTime};
use crate::gs_random::RandomSource;
use crate::gs_sync::{estimate_synchronous, estimate_synchronous_fast};
use crate::gs_topology::Topology;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreaderKind {
    Synchronous,
    SynchronousFast,
    Asynchronous,
    AsynchronousFast,
}

impl SpreaderKind {
    pub const ALL: [SpreaderKind; 4] = [
        SpreaderKind::Synchronous,
        SpreaderKind::SynchronousFast,
        SpreaderKind::Asynchronous,
        SpreaderKind::AsynchronousFast,
    ];

    pub fn is_synchronous(&self) -> bool {
        matches!(self, SpreaderKind::Synchronous | SpreaderKind::SynchronousFast)
    }

    pub fn estimate<R: RandomSource + ?Sized>(
        &self,
        topology: &Topology,
        params: &SpreadParams,
        rng: &mut R,
    ) -> Result<SpreadingTime, SpreadError> {
        match self {
            SpreaderKind::Synchronous => {
                estimate_synchronous(topology, params, rng).map(SpreadingTime::Rounds)
            }
            SpreaderKind::SynchronousFast => {
                estimate_synchronous_fast(topology, params, rng).map(SpreadingTime::Rounds)
            }
            SpreaderKind::Asynchronous => {
                estimate_asynchronous(topology, params, rng).map(SpreadingTime::Time)
            }
            SpreaderKind::AsynchronousFast => {
                estimate_asynchronous_fast(topology, params, rng).map(SpreadingTime::Time)
            }
        }
    }
}

impl fmt::Display for SpreaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpreaderKind::Synchronous => "synchronous",
            SpreaderKind::SynchronousFast => "synchronous (fast)",
            SpreaderKind::Asynchronous => "asynchronous",
            SpreaderKind::AsynchronousFast => "asynchronous (fast)",
        };
        write!(f, "{}", name)
    }
}
