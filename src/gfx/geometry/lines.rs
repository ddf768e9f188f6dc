//! Line-list geometry for debug helpers.

use std::f32::consts::PI;

use crate::gfx::scene::vertex::LineVertex;

/// Generate a square grid on the XZ plane
///
/// Produces `divisions + 1` lines along each axis; the two lines through the
/// origin use `center_color`.
pub fn generate_grid(
    size: f32,
    divisions: u32,
    center_color: [f32; 3],
    grid_color: [f32; 3],
) -> Vec<LineVertex> {
    let divisions = divisions.max(1);
    let step = size / divisions as f32;
    let half = size / 2.0;
    let center = divisions / 2;

    let mut lines = Vec::with_capacity(4 * (divisions as usize + 1));
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        let color = if i == center { center_color } else { grid_color };

        lines.push(LineVertex { position: [-half, 0.0, k], color });
        lines.push(LineVertex { position: [half, 0.0, k], color });
        lines.push(LineVertex { position: [k, 0.0, -half], color });
        lines.push(LineVertex { position: [k, 0.0, half], color });
    }
    lines
}

/// Generate three orthogonal circles around `center`, a wireframe sphere marker
pub fn generate_wire_sphere(
    center: [f32; 3],
    radius: f32,
    segments: u32,
    color: [f32; 3],
) -> Vec<LineVertex> {
    let segments = segments.max(3);
    let mut lines = Vec::with_capacity(6 * segments as usize);

    let point = |plane: usize, angle: f32| -> [f32; 3] {
        let (s, c) = angle.sin_cos();
        let offset = match plane {
            0 => [c, s, 0.0],
            1 => [c, 0.0, s],
            _ => [0.0, c, s],
        };
        [
            center[0] + offset[0] * radius,
            center[1] + offset[1] * radius,
            center[2] + offset[2] * radius,
        ]
    };

    for plane in 0..3 {
        for i in 0..segments {
            let a0 = i as f32 / segments as f32 * 2.0 * PI;
            let a1 = (i + 1) as f32 / segments as f32 * 2.0 * PI;
            lines.push(LineVertex { position: point(plane, a0), color });
            lines.push(LineVertex { position: point(plane, a1), color });
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_line_count() {
        let grid = generate_grid(200.0, 50, [0.5; 3], [0.25; 3]);
        // Two lines of two endpoints per division boundary
        assert_eq!(grid.len(), 4 * 51);
        assert!(grid
            .iter()
            .all(|v| v.position.iter().all(|c| c.abs() <= 100.0 + 1e-3)));
    }

    #[test]
    fn test_grid_center_lines_use_center_color() {
        let grid = generate_grid(10.0, 2, [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
        let center: Vec<_> = grid.iter().filter(|v| v.color == [1.0, 0.0, 0.0]).collect();
        assert_eq!(center.len(), 4);
        assert!(center
            .iter()
            .all(|v| v.position[0].abs() < 1e-6 || v.position[2].abs() < 1e-6));
    }

    #[test]
    fn test_wire_sphere_points_on_radius() {
        let marker = generate_wire_sphere([5.0, 5.0, 5.0], 1.0, 12, [1.0; 3]);
        assert_eq!(marker.len(), 3 * 12 * 2);
        for v in &marker {
            let d = [v.position[0] - 5.0, v.position[1] - 5.0, v.position[2] - 5.0];
            let r = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
            assert!((r - 1.0).abs() < 1e-5);
        }
    }
}
