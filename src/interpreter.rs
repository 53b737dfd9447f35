//! Interpreter that converts an L-System symbol string into [`PlantGeometry`].
//!
//! The entry point is [`TurtleInterpreter`]. Configure it with a [`TurtleConfig`],
//! then call [`TurtleInterpreter::interpret`] with the string produced by a
//! [`RewriteEngine`](crate::RewriteEngine) and the grammar's angle.

use crate::geometry::{BranchSegment, Decoration, DecorationKind, PlantGeometry};
use crate::turtle::{PLANAR_AXIS, TurtleOp, TurtleState};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use tracing::debug;

/// Flowers are drawn this much larger than leaves.
pub const FLOWER_SCALE: f32 = 1.5;

/// How the rendering collaborator should draw branches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    /// One line per branch.
    #[default]
    Lines,
    /// Instanced tapered cylinders.
    Cylinders,
}

/// Configuration for turtle interpretation.
///
/// No validation is performed: degenerate values such as a zero step length
/// simply produce zero-length segments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurtleConfig {
    /// Distance covered by `F` and `f`.
    pub step_length: f32,
    /// Branch radius at the start of every interpretation.
    pub initial_width: f32,
    /// Multiplier applied by `!`, `[` and along each drawn segment.
    pub width_decay: f32,
    /// Leaf scale. Flowers use `leaf_size * FLOWER_SCALE`.
    pub leaf_size: f32,
    /// Starting branch color.
    pub branch_color: Vec3,
    pub leaf_color: Vec3,
    pub flower_color: Vec3,
    /// When false, yaw uses the fixed world Z axis and pitch/roll are ignored.
    pub is_3d: bool,
    pub render_mode: RenderMode,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            step_length: 0.08,
            initial_width: 0.02,
            width_decay: 0.7,
            leaf_size: 0.08,
            branch_color: Vec3::new(0.4, 0.25, 0.1),
            leaf_color: Vec3::new(0.15, 0.55, 0.15),
            flower_color: Vec3::new(1.0, 0.45, 0.7),
            is_3d: false,
            render_mode: RenderMode::Lines,
        }
    }
}

/// Interprets L-System output to build a [`PlantGeometry`].
#[derive(Clone, Debug, Default)]
pub struct TurtleInterpreter {
    config: TurtleConfig,
    turtle: TurtleState,
    stack: Vec<TurtleState>,
    geometry: PlantGeometry,
    unmatched_pops: usize,
}

impl TurtleInterpreter {
    /// Creates a new interpreter with the given configuration and no geometry.
    pub fn new(config: TurtleConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &TurtleConfig {
        &self.config
    }

    /// Mutable access to every configuration field.
    ///
    /// Changes take effect on the next [`interpret`](Self::interpret).
    pub fn config_mut(&mut self) -> &mut TurtleConfig {
        &mut self.config
    }

    pub fn is_3d_mode(&self) -> bool {
        self.config.is_3d
    }

    pub fn set_3d_mode(&mut self, enable: bool) {
        self.config.is_3d = enable;
    }

    pub fn render_mode(&self) -> RenderMode {
        self.config.render_mode
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.config.render_mode = mode;
    }

    /// Geometry produced by the last interpretation.
    pub fn geometry(&self) -> &PlantGeometry {
        &self.geometry
    }

    /// Moves the last geometry out, leaving an empty snapshot behind.
    pub fn take_geometry(&mut self) -> PlantGeometry {
        std::mem::take(&mut self.geometry)
    }

    pub fn branch_count(&self) -> usize {
        self.geometry.branch_count()
    }

    pub fn decoration_count(&self) -> usize {
        self.geometry.decoration_count()
    }

    /// The live turtle as left by the last symbol interpreted.
    pub fn turtle(&self) -> &TurtleState {
        &self.turtle
    }

    /// Number of states still saved, i.e. unclosed `[`.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Number of `]` ignored during the last interpretation because nothing was saved.
    pub fn unmatched_pops(&self) -> usize {
        self.unmatched_pops
    }

    /// Interprets `symbols` and returns the resulting [`PlantGeometry`].
    ///
    /// Clears previous geometry and the save stack, resets the turtle to the
    /// origin facing `+Y` with the configured width and branch color, then
    /// executes each symbol in order. `angle` (degrees) is used by every
    /// rotation command. Unknown symbols are ignored.
    ///
    /// # Push / Pop
    ///
    /// `[` saves the full turtle state, increments depth and thins the width
    /// immediately. `]` restores the saved copy; an unmatched `]` is a no-op.
    pub fn interpret(&mut self, symbols: &str, angle: f32) -> &PlantGeometry {
        self.geometry.clear();
        self.stack.clear();
        self.unmatched_pops = 0;
        self.turtle = TurtleState {
            width: self.config.initial_width,
            color: self.config.branch_color,
            ..Default::default()
        };

        let angle = angle.to_radians();
        for symbol in symbols.chars() {
            self.execute(TurtleOp::from_symbol(symbol), angle);
        }

        debug!(
            branches = self.geometry.branch_count(),
            decorations = self.geometry.decoration_count(),
            unclosed = self.stack.len(),
            unmatched_pops = self.unmatched_pops,
            "interpretation complete"
        );
        &self.geometry
    }

    /// Executes a single command against the live turtle. `angle` is in radians.
    pub fn execute(&mut self, op: TurtleOp, angle: f32) {
        let decay = self.config.width_decay;

        match op {
            // --- MOVEMENT ---
            TurtleOp::Draw => {
                let start = self.turtle.position;
                let end = self.turtle.ahead(self.config.step_length);
                self.geometry.branches.push(BranchSegment {
                    start,
                    end,
                    radius_start: self.turtle.width,
                    radius_end: self.turtle.width * decay,
                    color: self.turtle.color,
                });
                self.turtle.position = end;
            }
            TurtleOp::Move => self.turtle.position = self.turtle.ahead(self.config.step_length),

            // --- ROTATION ---
            TurtleOp::Yaw(s) => self.yaw(angle * s),
            TurtleOp::TurnAround => self.yaw(PI),
            TurtleOp::Pitch(s) => {
                if self.config.is_3d {
                    self.turtle.pitch(angle * s);
                }
            }
            TurtleOp::Roll(s) => {
                if self.config.is_3d {
                    self.turtle.roll(angle * s);
                }
            }

            // --- FLOW ---
            TurtleOp::Push => {
                self.stack.push(self.turtle);
                self.turtle.depth += 1;
                self.turtle.thin(decay);
            }
            TurtleOp::Pop => match self.stack.pop() {
                Some(saved) => self.turtle = saved,
                None => self.unmatched_pops += 1,
            },

            // --- DECORATIONS ---
            TurtleOp::Leaf => self.place(DecorationKind::Leaf),
            TurtleOp::Flower => self.place(DecorationKind::Flower),

            // --- MODIFIERS ---
            TurtleOp::Thin => self.turtle.thin(decay),
            TurtleOp::ColorDrift => self.turtle.drift_color(),
            TurtleOp::Ignore => {}
        }
    }

    fn yaw(&mut self, angle: f32) {
        if self.config.is_3d {
            self.turtle.yaw(angle);
        } else {
            self.turtle.yaw_around(PLANAR_AXIS, angle);
        }
    }

    fn place(&mut self, kind: DecorationKind) {
        let (color, size) = match kind {
            DecorationKind::Leaf => (self.config.leaf_color, self.config.leaf_size),
            DecorationKind::Flower => (
                self.config.flower_color,
                self.config.leaf_size * FLOWER_SCALE,
            ),
        };
        self.geometry.decorations.push(Decoration {
            position: self.turtle.position,
            orientation: self.turtle.orientation(),
            color,
            size,
            kind,
        });
    }
}
