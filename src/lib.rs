//! # lsystem-flora
//!
//! Deterministic L-System growth paired with a 3D turtle interpreter that turns
//! the grown string into engine-agnostic plant geometry.
//!
//! The data flows one way: a [`RewriteEngine`] rewrites its axiom for N
//! generations, a [`TurtleInterpreter`] walks the result and emits a
//! [`PlantGeometry`] (branch segments plus leaf/flower decorations), and
//! [`InstanceBuffers`] packs that geometry into flat records that a renderer
//! can upload for instanced drawing.
//!
//! ```
//! use lsystem_flora::{RewriteEngine, TurtleConfig, TurtleInterpreter};
//!
//! let mut engine = RewriteEngine::new();
//! engine.set_axiom("F");
//! engine.add_rule('F', "F[+F][-F]");
//! engine.set_angle(25.0);
//!
//! let mut interpreter = TurtleInterpreter::new(TurtleConfig::default());
//! let angle = engine.angle();
//! let geometry = interpreter.interpret(engine.generate(2), angle);
//! assert_eq!(geometry.branch_count(), 9);
//! ```

pub mod error;
pub mod geometry;
pub mod grammar;
pub mod instance;
pub mod interpreter;
pub mod pipeline;
pub mod presets;
pub mod turtle;

pub use error::GrammarError;
pub use geometry::*;
pub use grammar::*;
pub use instance::*;
pub use interpreter::*;
pub use pipeline::*;
pub use presets::{PRESETS, Preset};
pub use turtle::*;
