//! GPU-friendly instance layouts for [`PlantGeometry`].
//!
//! All records are `#[repr(C)]` runs of `f32` with no padding, so they can be
//! uploaded as-is through [`bytemuck::cast_slice`].

use crate::geometry::{BranchSegment, Decoration, DecorationKind, PlantGeometry};
use bytemuck::{Pod, Zeroable};

/// Floats per [`LineVertex`].
pub const LINE_VERTEX_FLOATS: usize = 6;
/// Floats per [`BranchInstance`].
pub const BRANCH_INSTANCE_FLOATS: usize = 11;
/// Floats per [`DecorationInstance`].
pub const DECORATION_INSTANCE_FLOATS: usize = 23;

/// One end of a branch in line mode: position + color.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Per-instance data for a tapered cylinder.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct BranchInstance {
    pub start: [f32; 3],
    pub end: [f32; 3],
    pub radius_start: f32,
    pub radius_end: f32,
    pub color: [f32; 3],
}

impl From<&BranchSegment> for BranchInstance {
    fn from(b: &BranchSegment) -> Self {
        Self {
            start: b.start.to_array(),
            end: b.end.to_array(),
            radius_start: b.radius_start,
            radius_end: b.radius_end,
            color: b.color.to_array(),
        }
    }
}

/// Per-instance data for a leaf or flower quad.
///
/// `orientation` is column-major.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct DecorationInstance {
    pub position: [f32; 3],
    pub orientation: [f32; 16],
    pub color: [f32; 3],
    pub size: f32,
}

impl From<&Decoration> for DecorationInstance {
    fn from(d: &Decoration) -> Self {
        Self {
            position: d.position.to_array(),
            orientation: d.orientation.to_cols_array(),
            color: d.color.to_array(),
            size: d.size,
        }
    }
}

/// Packed buffers ready for upload.
///
/// Decorations are grouped with all leaves first and flowers after them, so
/// each kind can be drawn with a single instanced call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InstanceBuffers {
    lines: Vec<LineVertex>,
    branches: Vec<BranchInstance>,
    decorations: Vec<DecorationInstance>,
    /// Number of leading entries in `decorations` that are leaves.
    leaf_count: usize,
}

impl InstanceBuffers {
    pub fn from_geometry(geometry: &PlantGeometry) -> Self {
        let mut lines = Vec::with_capacity(geometry.branches.len() * 2);
        for b in &geometry.branches {
            let color = b.color.to_array();
            lines.push(LineVertex {
                position: b.start.to_array(),
                color,
            });
            lines.push(LineVertex {
                position: b.end.to_array(),
                color,
            });
        }

        let branches = geometry.branches.iter().map(BranchInstance::from).collect();

        let mut decorations: Vec<DecorationInstance> =
            Vec::with_capacity(geometry.decorations.len());
        decorations.extend(
            geometry
                .decorations_of(DecorationKind::Leaf)
                .map(DecorationInstance::from),
        );
        let leaf_count = decorations.len();
        decorations.extend(
            geometry
                .decorations_of(DecorationKind::Flower)
                .map(DecorationInstance::from),
        );

        Self {
            lines,
            branches,
            decorations,
            leaf_count,
        }
    }

    /// Two vertices per branch (start, end).
    pub fn lines(&self) -> &[LineVertex] {
        &self.lines
    }

    pub fn branches(&self) -> &[BranchInstance] {
        &self.branches
    }

    /// Every decoration, leaves first.
    pub fn decorations(&self) -> &[DecorationInstance] {
        &self.decorations
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    pub fn flower_count(&self) -> usize {
        self.decorations.len() - self.leaf_count
    }

    pub fn leaf_instances(&self) -> &[DecorationInstance] {
        &self.decorations[..self.leaf_count]
    }

    pub fn flower_instances(&self) -> &[DecorationInstance] {
        &self.decorations[self.leaf_count..]
    }

    pub fn line_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lines)
    }

    pub fn branch_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.branches)
    }

    pub fn decoration_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.decorations)
    }
}
