//! Relab - Experiment Harness for Recurrent-Network Simulators
//!
//! Relab drives an external recurrent-network simulation engine: it builds
//! the experiment inputs (a connectivity graph and an input/output task
//! map), serializes them into structured container files, launches the
//! engine as a subprocess, and decodes the engine's output arrays for
//! analysis.
//!
//! # Data contract
//!
//! The harness and the engine share nothing but three container files in
//! one working directory, each an ordered collection of named, typed 1-D
//! arrays:
//!
//! - **network**: `pre`, `post` - parallel integer sequences describing
//!   directed edges over nodes `[0, N)`
//! - **map**: input coordinate columns and a target column `F`, all of
//!   sample count `M`
//! - **outputs** (engine-produced): `responses` (length `N * M`) and
//!   `error` (one value per logged training checkpoint)
//!
//! The engine binary is invoked as `engine <working_dir> <seed> <steps>`;
//! negative step counts select its replay/inspect mode.
//!
//! # Example
//!
//! ```no_run
//! use relab::{Engine, Experiment, InputLayout, TaskMap, Topology, Result};
//!
//! # fn main() -> Result<()> {
//! // 5 nodes, all-to-all without self-loops
//! let topology = Topology::fully_connected(5, false);
//!
//! // XOR task
//! let mut map = TaskMap::new();
//! map.add_input("X", vec![0.0, 0.0, 1.0, 1.0])?;
//! map.add_input("Y", vec![0.0, 1.0, 0.0, 1.0])?;
//! map.set_target(vec![0.0, 1.0, 1.0, 0.0])?;
//!
//! let mut exp = Experiment::new("runs/xor", Engine::new("/opt/sim/engine"));
//! let (responses, error_trace) =
//!     exp.execute(&topology, &map, InputLayout::Merged, 42, 100_000)?;
//!
//! let node0 = responses.grid(0)?; // 2 x 2 view of node 0 over the map
//! # Ok(())
//! # }
//! ```
//!
//! # Failure model
//!
//! Each run is a stateless, single-threaded pipeline; every shape, I/O and
//! process error is fatal to the run and reported through [`RelabError`]
//! with the offending field, file or shape named. After any failure the
//! working directory's outputs must not be trusted.

// Module declarations
pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod experiment;
pub mod outputs;
pub mod response;
pub mod task_map;
pub mod topology;
pub mod utils;

// Re-exports for convenient access
pub use config::{EngineConfig, MapSpec};
pub use dataset::{Dataset, Field};
pub use engine::Engine;
pub use error::{RelabError, Result};
pub use experiment::{Experiment, CONFIG_FILE, MAP_FILE, NETWORK_FILE, OUTPUTS_FILE};
pub use outputs::{EngineOutputs, ERROR_FIELD, RESPONSES_FIELD};
pub use response::ResponseMatrix;
pub use task_map::{InputLayout, TaskMap};
pub use topology::{ConnectionPolicy, Topology};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = "Relab";

/// Get version string
pub fn version() -> String {
    format!("{} v{}", NAME, VERSION)
}
