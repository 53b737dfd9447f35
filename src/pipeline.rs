//! Generation followed by interpretation, as a single regenerate call.

use crate::geometry::PlantGeometry;
use crate::grammar::RewriteEngine;
use crate::instance::InstanceBuffers;
use crate::interpreter::{TurtleConfig, TurtleInterpreter};
use crate::presets::Preset;
use tracing::{info, warn};

/// Estimated string length above which [`PlantPipeline::regenerate`] warns.
pub const DEFAULT_LENGTH_WARNING: u64 = 1_000_000;

/// Owns a [`RewriteEngine`] and a [`TurtleInterpreter`] and feeds one into the other.
#[derive(Clone, Debug)]
pub struct PlantPipeline {
    engine: RewriteEngine,
    interpreter: TurtleInterpreter,
    generations: usize,
    length_warning: u64,
}

impl PlantPipeline {
    pub fn new(engine: RewriteEngine, interpreter: TurtleInterpreter, generations: usize) -> Self {
        Self {
            engine,
            interpreter,
            generations,
            length_warning: DEFAULT_LENGTH_WARNING,
        }
    }

    /// Builds a pipeline from a preset. The preset decides the 2D/3D mode and
    /// generation count; everything else comes from `config`.
    pub fn from_preset(preset: &Preset, config: TurtleConfig) -> Self {
        let mut interpreter = TurtleInterpreter::new(config);
        interpreter.set_3d_mode(preset.is_3d);
        Self::new(preset.engine(), interpreter, preset.generations)
    }

    /// Sets the estimated length that triggers a warning (builder pattern).
    pub fn with_length_warning(mut self, limit: u64) -> Self {
        self.length_warning = limit;
        self
    }

    pub fn engine(&self) -> &RewriteEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut RewriteEngine {
        &mut self.engine
    }

    pub fn interpreter(&self) -> &TurtleInterpreter {
        &self.interpreter
    }

    pub fn interpreter_mut(&mut self) -> &mut TurtleInterpreter {
        &mut self.interpreter
    }

    pub fn generations(&self) -> usize {
        self.generations
    }

    pub fn set_generations(&mut self, generations: usize) {
        self.generations = generations;
    }

    /// Whether the configured generation count is expected to produce a
    /// string longer than the warning threshold.
    pub fn exceeds_length_warning(&self) -> bool {
        self.engine.estimate_length(self.generations) > self.length_warning
    }

    /// Regenerates the string and interprets it with the grammar's angle.
    ///
    /// Large requests are still computed to completion; the caller only gets
    /// a logged warning.
    pub fn regenerate(&mut self) -> &PlantGeometry {
        let estimate = self.engine.estimate_length(self.generations);
        if estimate > self.length_warning {
            warn!(
                generations = self.generations,
                estimate,
                limit = self.length_warning,
                "generation will produce a very long string"
            );
        }

        let angle = self.engine.angle();
        let symbols = self.engine.generate(self.generations);
        let geometry = self.interpreter.interpret(symbols, angle);
        info!(
            generations = self.generations,
            branches = geometry.branch_count(),
            decorations = geometry.decoration_count(),
            "plant regenerated"
        );
        geometry
    }

    /// Packs the current geometry for upload.
    pub fn instances(&self) -> InstanceBuffers {
        InstanceBuffers::from_geometry(self.interpreter.geometry())
    }
}
