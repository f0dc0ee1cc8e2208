//! Experiment - the sequential harness pipeline.
//!
//! One experiment is one working directory: the harness writes the
//! "network" and "map" containers plus the engine's `config.json` into it,
//! blocks on the engine subprocess, and reads the "outputs" container back.
//!
//! ```text
//! topology -+
//!           +-> write_inputs() -> run() -> read_outputs() -> ResponseMatrix
//! task map -+
//! ```
//!
//! Write happens-before invocation happens-before read, enforced by program
//! order. The working directory must be exclusive to one run at a time;
//! two concurrent runs targeting the same directory would race the first
//! run's still-executing engine against the second's freshly written
//! inputs.

use crate::{
    Dataset, Engine, EngineConfig, EngineOutputs, InputLayout, MapSpec, RelabError,
    ResponseMatrix, Result, TaskMap, Topology,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the task-map container in a working directory.
pub const MAP_FILE: &str = "map.dat";
/// File name of the topology container in a working directory.
pub const NETWORK_FILE: &str = "network.dat";
/// File name of the engine-produced outputs container.
pub const OUTPUTS_FILE: &str = "outputs.dat";
/// File name of the engine parameter file.
pub const CONFIG_FILE: &str = "config.json";

/// A single experiment run bound to one working directory.
pub struct Experiment {
    dir: PathBuf,
    engine: Engine,
    config: EngineConfig,
}

impl Experiment {
    /// Create an experiment in `dir`, driven by `engine`, with a default
    /// engine config.
    pub fn new(dir: impl Into<PathBuf>, engine: Engine) -> Self {
        Self {
            dir: dir.into(),
            engine,
            config: EngineConfig::default(),
        }
    }

    /// Replace the engine config written alongside the containers.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// The working directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Mutable access to the engine config (e.g. to add map specs).
    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    /// Write the experiment inputs: `network.dat`, `map.dat` and
    /// `config.json`. Creates the working directory if needed.
    ///
    /// If the config has no map entry yet, one pointing at [`MAP_FILE`] is
    /// added, trained against the topology's last node.
    ///
    /// On any error the directory contents must be treated as invalid and
    /// the engine must not be invoked.
    pub fn write_inputs(
        &mut self,
        topology: &Topology,
        task_map: &TaskMap,
        layout: InputLayout,
    ) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        topology.to_dataset().write(self.dir.join(NETWORK_FILE))?;
        task_map.encode(layout)?.write(self.dir.join(MAP_FILE))?;

        if self.config.maps.is_empty() {
            let output_id = topology.num_nodes().saturating_sub(1) as u32;
            self.config.maps.push(MapSpec::new(MAP_FILE, output_id));
        }
        self.config.to_json_file(self.dir.join(CONFIG_FILE))?;

        info!(
            dir = %self.dir.display(),
            nodes = topology.num_nodes(),
            edges = topology.num_edges(),
            samples = task_map.num_samples().unwrap_or(0),
            "wrote experiment inputs"
        );
        Ok(())
    }

    /// Invoke the engine on the working directory, then verify it actually
    /// produced an outputs container.
    ///
    /// `steps > 0` trains for that many iterations; `steps < 0` selects the
    /// engine's replay/inspect mode.
    ///
    /// # Errors
    ///
    /// `Process` if the engine fails (see [`Engine::run`]) or if it exits
    /// cleanly without writing [`OUTPUTS_FILE`].
    pub fn run(&self, seed: u64, steps: i64) -> Result<()> {
        self.engine.run(&self.dir, seed, steps)?;

        let outputs = self.dir.join(OUTPUTS_FILE);
        if !outputs.exists() {
            return Err(RelabError::Process {
                reason: format!(
                    "engine exited cleanly but wrote no '{}' in {}",
                    OUTPUTS_FILE,
                    self.dir.display()
                ),
            });
        }
        Ok(())
    }

    /// Read the engine's outputs container.
    pub fn read_outputs(&self) -> Result<EngineOutputs> {
        EngineOutputs::read(self.dir.join(OUTPUTS_FILE))
    }

    /// Read back the task-map container previously written to the
    /// directory (e.g. to recover the sample count for reshaping).
    pub fn read_map(&self) -> Result<Dataset> {
        Dataset::read(self.dir.join(MAP_FILE))
    }

    /// The full sequential pipeline: write inputs, block on the engine,
    /// read the outputs, and reshape the responses over the topology's
    /// node count.
    pub fn execute(
        &mut self,
        topology: &Topology,
        task_map: &TaskMap,
        layout: InputLayout,
        seed: u64,
        steps: i64,
    ) -> Result<(ResponseMatrix, Vec<f64>)> {
        self.write_inputs(topology, task_map, layout)?;
        self.run(seed, steps)?;
        let outputs = self.read_outputs()?;
        let matrix = ResponseMatrix::from_flat(outputs.responses, topology.num_nodes())?;
        Ok((matrix, outputs.error))
    }
}
