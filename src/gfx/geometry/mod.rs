//! # Procedural Geometry Generation
//!
//! Shape descriptors and the functions that tessellate them.
//!
//! A [`Geometry`] is the immutable description a mesh is built from (torus,
//! sphere, box). It is tessellated into [`GeometryData`] only when the
//! renderer uploads it, and identical descriptors share one set of GPU
//! buffers through [`Geometry::cache_key`].
//!
//! ## Usage
//!
//! ```rust
//! use nebula::gfx::geometry::Geometry;
//!
//! let torus = Geometry::torus(10.0, 3.0, 16, 100);
//! let data = torus.tessellate();
//! assert_eq!(data.triangle_count(), 16 * 100 * 2);
//! ```

pub mod lines;
pub mod primitives;

pub use lines::{generate_grid, generate_wire_sphere};
pub use primitives::*;

use crate::gfx::scene::vertex::Vertex3D;

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaves the attribute streams into the renderer's vertex format
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        (0..self.vertices.len())
            .map(|i| Vertex3D {
                position: self.vertices[i],
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                tex_coords: self.tex_coords.get(i).copied().unwrap_or([0.0, 0.0]),
            })
            .collect()
    }
}

/// Immutable shape parameters of a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// Ring in the XY plane around the Z axis
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    /// UV sphere around the Y axis
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// Axis-aligned box centered at the origin
    Box { width: f32, height: f32, depth: f32 },
}

/// Hashable identity of a [`Geometry`], used to share GPU buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryKey {
    kind: u8,
    params: [u32; 4],
}

impl Geometry {
    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        Geometry::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
        }
    }

    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Geometry::Sphere {
            radius,
            width_segments,
            height_segments,
        }
    }

    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Geometry::Box {
            width,
            height,
            depth,
        }
    }

    /// Generates the triangle data for this shape
    pub fn tessellate(&self) -> GeometryData {
        match *self {
            Geometry::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => generate_torus(radius, tube, radial_segments, tubular_segments),
            Geometry::Sphere {
                radius,
                width_segments,
                height_segments,
            } => generate_sphere(radius, width_segments, height_segments),
            Geometry::Box {
                width,
                height,
                depth,
            } => generate_box(width, height, depth),
        }
    }

    pub fn cache_key(&self) -> GeometryKey {
        match *self {
            Geometry::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => GeometryKey {
                kind: 0,
                params: [
                    radius.to_bits(),
                    tube.to_bits(),
                    radial_segments,
                    tubular_segments,
                ],
            },
            Geometry::Sphere {
                radius,
                width_segments,
                height_segments,
            } => GeometryKey {
                kind: 1,
                params: [radius.to_bits(), width_segments, height_segments, 0],
            },
            Geometry::Box {
                width,
                height,
                depth,
            } => GeometryKey {
                kind: 2,
                params: [width.to_bits(), height.to_bits(), depth.to_bits(), 0],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_descriptors_share_key() {
        let a = Geometry::sphere(0.25, 24, 24);
        let b = Geometry::sphere(0.25, 24, 24);
        let c = Geometry::sphere(3.0, 32, 32);
        assert_eq!(a.cache_key(), b.cache_key());
        assert_ne!(a.cache_key(), c.cache_key());
        assert_ne!(
            Geometry::cuboid(3.0, 3.0, 3.0).cache_key(),
            Geometry::sphere(3.0, 3, 3).cache_key()
        );
    }

    #[test]
    fn test_to_vertices_interleaves_all_attributes() {
        let data = Geometry::cuboid(1.0, 1.0, 1.0).tessellate();
        let vertices = data.to_vertices();
        assert_eq!(vertices.len(), data.vertex_count());
        assert_eq!(vertices[5].tex_coords, data.tex_coords[5]);
        assert_eq!(vertices[5].normal, data.normals[5]);
    }
}
