//! # Primitive Shape Generation
//!
//! Torus, sphere and box tessellation. All shapes carry outward normals and
//! texture coordinates with v = 0 at the top edge of the image.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a torus lying in the XY plane, centered at the origin
///
/// # Arguments
/// * `radius` - Distance from the center to the middle of the tube
/// * `tube` - Radius of the tube
/// * `radial_segments` - Subdivisions around the tube cross-section
/// * `tubular_segments` - Subdivisions along the ring
pub fn generate_torus(
    radius: f32,
    tube: f32,
    radial_segments: u32,
    tubular_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);

    for j in 0..=radial {
        let v = j as f32 / radial as f32 * 2.0 * PI;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * 2.0 * PI;

            let x = (radius + tube * v.cos()) * u.cos();
            let y = (radius + tube * v.cos()) * u.sin();
            let z = tube * v.sin();
            data.vertices.push([x, y, z]);

            // Normal points away from the tube's center line
            let center = [radius * u.cos(), radius * u.sin(), 0.0];
            let n = [x - center[0], y - center[1], z - center[2]];
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt().max(f32::EPSILON);
            data.normals.push([n[0] / len, n[1] / len, n[2] / len]);

            data.tex_coords
                .push([i as f32 / tubular as f32, 1.0 - j as f32 / radial as f32]);
        }
    }

    let row = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;

            data.indices.extend_from_slice(&[a, b, d]);
            data.indices.extend_from_slice(&[b, c, d]);
        }
    }

    data
}

/// Generate a UV sphere with specified radius and resolution
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `width_segments` - Number of longitude segments
/// * `height_segments` - Number of latitude segments
///
/// The poles sit on the Y axis; the degenerate triangles at each pole are skipped.
pub fn generate_sphere(radius: f32, width_segments: u32, height_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let width = width_segments.max(3);
    let height = height_segments.max(2);

    for iy in 0..=height {
        let v = iy as f32 / height as f32;
        for ix in 0..=width {
            let u = ix as f32 / width as f32;

            let x = -radius * (u * 2.0 * PI).cos() * (v * PI).sin();
            let y = radius * (v * PI).cos();
            let z = radius * (u * 2.0 * PI).sin() * (v * PI).sin();

            data.vertices.push([x, y, z]);
            let len = (x * x + y * y + z * z).sqrt().max(f32::EPSILON);
            data.normals.push([x / len, y / len, z / len]);
            data.tex_coords.push([u, v]);
        }
    }

    let row = width + 1;
    for iy in 0..height {
        for ix in 0..width {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;

            if iy != 0 {
                data.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height - 1 {
                data.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    data
}

/// Generate an axis-aligned box centered at the origin
///
/// Each face has its own four vertices so normals stay flat and every face
/// maps the full texture.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();

    let half = [width * 0.5, height * 0.5, depth * 0.5];

    // (normal, right, up) per face; right x up == normal
    #[rustfmt::skip]
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([ 1.0,  0.0,  0.0], [ 0.0, 0.0, -1.0], [0.0, 1.0,  0.0]),
        ([-1.0,  0.0,  0.0], [ 0.0, 0.0,  1.0], [0.0, 1.0,  0.0]),
        ([ 0.0,  1.0,  0.0], [ 1.0, 0.0,  0.0], [0.0, 0.0, -1.0]),
        ([ 0.0, -1.0,  0.0], [ 1.0, 0.0,  0.0], [0.0, 0.0,  1.0]),
        ([ 0.0,  0.0,  1.0], [ 1.0, 0.0,  0.0], [0.0, 1.0,  0.0]),
        ([ 0.0,  0.0, -1.0], [-1.0, 0.0,  0.0], [0.0, 1.0,  0.0]),
    ];

    let scaled = |axis: [f32; 3], sign: f32| -> [f32; 3] {
        [
            axis[0] * half[0] * sign,
            axis[1] * half[1] * sign,
            axis[2] * half[2] * sign,
        ]
    };

    for (normal, right, up) in faces {
        let base = data.vertices.len() as u32;
        let center = scaled(normal, 1.0);

        // Top-left, top-right, bottom-right, bottom-left seen from outside
        let corners = [(-1.0, 1.0), (1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)];
        let uvs = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

        for ((sr, su), uv) in corners.into_iter().zip(uvs) {
            let r = scaled(right, sr);
            let u = scaled(up, su);
            data.vertices.push([
                center[0] + r[0] + u[0],
                center[1] + r[1] + u[1],
                center[2] + r[2] + u[2],
            ]);
            data.normals.push(normal);
            data.tex_coords.push(uv);
        }

        // Counter-clockwise: bottom-left, bottom-right, top-right, top-left
        data.indices
            .extend_from_slice(&[base + 3, base + 2, base + 1, base + 3, base + 1, base]);
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_indices_in_range(data: &GeometryData) {
        let count = data.vertex_count() as u32;
        assert!(data.indices.iter().all(|&i| i < count));
        assert_eq!(data.indices.len() % 3, 0);
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    #[test]
    fn test_torus_generation() {
        let torus = generate_torus(10.0, 3.0, 16, 100);
        assert_eq!(torus.vertex_count(), 17 * 101);
        assert_eq!(torus.triangle_count(), 16 * 100 * 2);
        assert_eq!(torus.vertices.len(), torus.normals.len());
        assert_eq!(torus.vertices.len(), torus.tex_coords.len());
        assert_indices_in_range(&torus);

        // Every vertex lies on the tube surface
        for v in &torus.vertices {
            let ring = (v[0] * v[0] + v[1] * v[1]).sqrt() - 10.0;
            let dist = (ring * ring + v[2] * v[2]).sqrt();
            assert!((dist - 3.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(3.0, 32, 32);
        assert_eq!(sphere.vertex_count(), 33 * 33);
        assert_eq!(sphere.triangle_count(), 2 * 32 * 31);
        assert_indices_in_range(&sphere);

        for v in &sphere.vertices {
            let r = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((r - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_sphere_winding_faces_outward() {
        let sphere = generate_sphere(1.0, 8, 6);
        for tri in sphere.indices.chunks(3) {
            let [a, b, c] = [
                sphere.vertices[tri[0] as usize],
                sphere.vertices[tri[1] as usize],
                sphere.vertices[tri[2] as usize],
            ];
            let n = cross(sub(b, a), sub(c, a));
            let centroid = [
                (a[0] + b[0] + c[0]) / 3.0,
                (a[1] + b[1] + c[1]) / 3.0,
                (a[2] + b[2] + c[2]) / 3.0,
            ];
            assert!(dot(n, centroid) > 0.0);
        }
    }

    #[test]
    fn test_box_generation() {
        let cube = generate_box(3.0, 3.0, 3.0);
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
        assert_indices_in_range(&cube);

        for v in &cube.vertices {
            assert!(v.iter().all(|c| (c.abs() - 1.5).abs() < 1e-6));
        }

        // Winding agrees with the stored face normal
        for tri in cube.indices.chunks(3) {
            let [a, b, c] = [
                cube.vertices[tri[0] as usize],
                cube.vertices[tri[1] as usize],
                cube.vertices[tri[2] as usize],
            ];
            let n = cross(sub(b, a), sub(c, a));
            assert!(dot(n, cube.normals[tri[0] as usize]) > 0.0);
        }
    }
}
