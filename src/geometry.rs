use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// The complete, engine-agnostic geometry of one interpreted plant.
///
/// This is a snapshot: every [`interpret`](crate::TurtleInterpreter::interpret)
/// call replaces it wholesale. Clone it out if it must outlive the next call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlantGeometry {
    /// One segment per draw-forward symbol, in string order.
    pub branches: Vec<BranchSegment>,

    /// Leaves and flowers, in string order.
    pub decorations: Vec<Decoration>,
}

impl PlantGeometry {
    pub fn clear(&mut self) {
        self.branches.clear();
        self.decorations.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty() && self.decorations.is_empty()
    }

    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    pub fn decoration_count(&self) -> usize {
        self.decorations.len()
    }

    pub fn leaves(&self) -> impl Iterator<Item = &Decoration> {
        self.decorations_of(DecorationKind::Leaf)
    }

    pub fn flowers(&self) -> impl Iterator<Item = &Decoration> {
        self.decorations_of(DecorationKind::Flower)
    }

    /// Decorations of a single kind, preserving their relative order.
    pub fn decorations_of(&self, kind: DecorationKind) -> impl Iterator<Item = &Decoration> {
        self.decorations.iter().filter(move |d| d.kind == kind)
    }

    /// Axis-aligned bounds of every branch endpoint and decoration anchor.
    ///
    /// Returns `None` for empty geometry.
    pub fn bounds(&self) -> Option<Aabb> {
        let points = self
            .branches
            .iter()
            .flat_map(|b| [b.start, b.end])
            .chain(self.decorations.iter().map(|d| d.position));
        Aabb::from_points(points)
    }
}

/// A single drawn branch, rendered as a tapered cylinder or a line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BranchSegment {
    pub start: Vec3,
    pub end: Vec3,
    pub radius_start: f32,
    pub radius_end: f32,
    pub color: Vec3,
}

impl BranchSegment {
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// What a [`Decoration`] depicts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecorationKind {
    Leaf,
    Flower,
}

/// A point-placed ornament.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    /// World-space anchor.
    pub position: Vec3,

    /// Rotation-only matrix with columns (right, heading, up, w).
    pub orientation: Mat4,

    pub color: Vec3,

    /// Uniform scale factor.
    pub size: f32,

    pub kind: DecorationKind,
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Smallest box containing every point, or `None` if there are none.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut aabb = Self {
            min: first,
            max: first,
        };
        for p in points {
            aabb.min = aabb.min.min(p);
            aabb.max = aabb.max.max(p);
        }
        Some(aabb)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Radius of the sphere through the box corners, centered on [`center`](Self::center).
    pub fn radius(&self) -> f32 {
        self.size().length() * 0.5
    }
}
