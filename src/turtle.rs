//! Turtle state and frame operations for plant interpretation.

use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Fixed yaw axis used when interpreting in 2D mode.
pub const PLANAR_AXIS: Vec3 = Vec3::Z;

/// Green gained per color drift (`'`).
pub const COLOR_DRIFT_GREEN: f32 = 0.05;

/// Red lost per color drift (`'`).
pub const COLOR_DRIFT_RED: f32 = 0.02;

/// Rotates `v` by `angle` radians around `axis` using Rodrigues' formula.
///
/// `axis` is normalized before use.
pub fn rotate_around_axis(v: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    let k = axis.normalize();
    let (sin_a, cos_a) = angle.sin_cos();
    v * cos_a + k.cross(v) * sin_a + k * k.dot(v) * (1.0 - cos_a)
}

/// The state of the plant turtle.
///
/// Position plus a right-handed orthonormal frame (heading, left, up), along
/// with the current pen: branch width, color and nesting depth.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current world-space position of the cursor.
    pub position: Vec3,

    /// Direction of travel (H).
    pub heading: Vec3,

    /// Left of the heading (L).
    pub left: Vec3,

    /// Up relative to the heading (U). `heading × left == up`.
    pub up: Vec3,

    /// Current branch radius.
    pub width: f32,

    /// Current branch color (RGB, 0-1).
    pub color: Vec3,

    /// Branch nesting depth.
    pub depth: u32,
}

impl Default for TurtleState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            heading: Vec3::Y, // Grow upwards
            left: Vec3::NEG_X,
            up: Vec3::Z,
            width: 0.02,
            color: Vec3::new(0.45, 0.30, 0.15),
            depth: 0,
        }
    }
}

impl TurtleState {
    /// The point `distance` units ahead along the heading.
    pub fn ahead(&self, distance: f32) -> Vec3 {
        self.position + self.heading * distance
    }

    /// Rotates heading and left around the turtle's own up vector.
    pub fn yaw(&mut self, angle: f32) {
        self.yaw_around(self.up, angle);
    }

    /// Rotates heading and left around an externally supplied axis.
    ///
    /// Used with [`PLANAR_AXIS`] to keep the turtle in the XY plane.
    pub fn yaw_around(&mut self, axis: Vec3, angle: f32) {
        self.heading = rotate_around_axis(self.heading, axis, angle);
        self.left = rotate_around_axis(self.left, axis, angle);
        self.orthonormalize();
    }

    /// Rotates heading and up around the left vector. Positive pitches down.
    pub fn pitch(&mut self, angle: f32) {
        let axis = self.left;
        self.heading = rotate_around_axis(self.heading, axis, angle);
        self.up = rotate_around_axis(self.up, axis, angle);
        self.orthonormalize();
    }

    /// Rotates left and up around the heading. Positive rolls left.
    pub fn roll(&mut self, angle: f32) {
        let axis = self.heading;
        self.left = rotate_around_axis(self.left, axis, angle);
        self.up = rotate_around_axis(self.up, axis, angle);
        self.orthonormalize();
    }

    /// Removes floating-point drift from the frame (Gram-Schmidt on heading,
    /// then left; up is rebuilt from both).
    pub fn orthonormalize(&mut self) {
        self.heading = self.heading.normalize();
        self.left = self
            .left
            .reject_from_normalized(self.heading)
            .normalize();
        self.up = self.heading.cross(self.left);
    }

    /// Multiplies the width by `factor`.
    pub fn thin(&mut self, factor: f32) {
        self.width *= factor;
    }

    /// Nudges the color towards green, clamping each channel to `[0, 1]`.
    pub fn drift_color(&mut self) {
        self.color.y = (self.color.y + COLOR_DRIFT_GREEN).min(1.0);
        self.color.x = (self.color.x - COLOR_DRIFT_RED).max(0.0);
    }

    /// Orientation matrix for an ornament placed at the turtle.
    ///
    /// Columns are `right = heading × up`, `heading`, and an up vector
    /// recomputed as `right × heading`, so the result is orthonormal even if
    /// the stored frame has drifted.
    pub fn orientation(&self) -> Mat4 {
        let forward = self.heading.normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward);
        Mat4::from_cols(
            right.extend(0.0),
            forward.extend(0.0),
            up.extend(0.0),
            Vec4::W,
        )
    }

    /// Checks that heading, left and up are unit length and mutually
    /// orthogonal within `tolerance`.
    pub fn is_orthonormal(&self, tolerance: f32) -> bool {
        let unit = |v: Vec3| (v.length() - 1.0).abs() <= tolerance;
        unit(self.heading)
            && unit(self.left)
            && unit(self.up)
            && self.heading.dot(self.left).abs() <= tolerance
            && self.heading.dot(self.up).abs() <= tolerance
            && self.left.dot(self.up).abs() <= tolerance
    }
}

/// Operations that can be performed by the plant turtle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TurtleOp {
    /// Move forward, emitting a branch segment (`F`, `G`, `A`, `B`).
    Draw,
    /// Move forward without drawing (`f`).
    Move,
    /// Rotate around up, scaled by the sign (`+`/`-`).
    Yaw(f32),
    /// Rotate around left (`&`/`^`). 3D only.
    Pitch(f32),
    /// Rotate around heading (`\` / `/`). 3D only.
    Roll(f32),
    /// Turn 180 degrees around up (`|`).
    TurnAround,
    /// Save the full turtle state (`[`).
    Push,
    /// Restore the most recently pushed state (`]`).
    Pop,
    /// Place a leaf (`L`, `l`).
    Leaf,
    /// Place a flower (`K`, `k`).
    Flower,
    /// Multiply the width by the decay factor (`!`).
    Thin,
    /// Shift the color towards green (`'`).
    ColorDrift,
    /// No-op. The symbol is grammar vocabulary with no graphical meaning.
    Ignore,
}

impl TurtleOp {
    /// Maps an L-System symbol to its turtle command.
    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            'F' | 'G' | 'A' | 'B' => Self::Draw,
            'f' => Self::Move,
            '+' => Self::Yaw(1.0),
            '-' => Self::Yaw(-1.0),
            '&' => Self::Pitch(1.0),
            '^' => Self::Pitch(-1.0),
            '\\' => Self::Roll(1.0),
            '/' => Self::Roll(-1.0),
            '|' => Self::TurnAround,
            '[' => Self::Push,
            ']' => Self::Pop,
            'L' | 'l' => Self::Leaf,
            'K' | 'k' => Self::Flower,
            '!' => Self::Thin,
            '\'' => Self::ColorDrift,
            _ => Self::Ignore,
        }
    }
}
