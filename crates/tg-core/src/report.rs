//! Shortfall records for capped sampling loops.
//!
//! A pick-until-valid loop that hits its attempt cap does not fail the run.
//! It returns what it produced and reports a [`Shortfall`]; the pipeline
//! collects these so the caller can tell a complete run from a truncated one.

use std::fmt;

/// Pipeline stage that owns a sampling loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    Region,
    Stops,
    Edges,
    Routes,
    Connections,
    Queries,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Region      => "region",
            Stage::Stops       => "stops",
            Stage::Edges       => "edges",
            Stage::Routes      => "routes",
            Stage::Connections => "connections",
            Stage::Queries     => "queries",
        };
        f.write_str(name)
    }
}

/// A stage produced fewer items than requested before its attempt cap.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shortfall {
    pub stage:     Stage,
    pub requested: usize,
    pub produced:  usize,
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: produced {} of {} requested",
            self.stage, self.produced, self.requested
        )
    }
}
