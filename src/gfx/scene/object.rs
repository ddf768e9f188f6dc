use cgmath::{Matrix4, Rad, Vector3};

use crate::gfx::{geometry::Geometry, scene::material::Material};

/// A renderable entity: shape + surface + transform.
///
/// Geometry and material are fixed at construction; only the transform
/// fields change afterwards. `rotation` holds Euler angles in radians,
/// applied in X, Y, Z order, and is never wrapped.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    geometry: Geometry,
    material: Material,
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Mesh {
    /// Create a new mesh at the origin with identity rotation and scale
    pub fn new(name: &str, geometry: Geometry, material: Material) -> Self {
        Self {
            name: name.to_string(),
            geometry,
            material,
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Set translation
    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.position = Vector3::new(x, y, z);
    }

    /// Adds per-axis angles (radians) to the current rotation
    pub fn rotate_by(&mut self, delta: Vector3<f32>) {
        self.rotation += delta;
    }

    /// Set non-uniform scale
    pub fn set_scale_xyz(&mut self, scale: Vector3<f32>) {
        self.scale = scale;
    }

    /// Model matrix: T * Rx * Ry * Rz * S
    pub fn model_matrix(&self) -> Matrix4<f32> {
        let t = Matrix4::from_translation(self.position);
        let r = Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z));
        let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        t * r * s // Order matters: T * R * S
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Vector4};
    use std::f32::consts::FRAC_PI_2;

    fn cube() -> Mesh {
        Mesh::new(
            "cube",
            Geometry::cuboid(1.0, 1.0, 1.0),
            Material::basic([1.0; 3]),
        )
    }

    #[test]
    fn test_model_matrix_applies_translation_last() {
        let mut mesh = cube();
        mesh.set_position(-10.0, 0.0, 30.0);
        mesh.rotation.y = FRAC_PI_2;
        mesh.set_scale_xyz(Vector3::new(2.0, 2.0, 2.0));

        let p = mesh.model_matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        // +X rotated a quarter turn about Y lands on -Z, scaled by two
        let expected = Vector3::new(-10.0, 0.0, 28.0);
        assert!((p.truncate() - expected).magnitude() < 1e-5);
    }

    #[test]
    fn test_rotation_accumulates_without_wrapping() {
        let mut mesh = cube();
        for _ in 0..1000 {
            mesh.rotate_by(Vector3::new(0.01, 0.0, 0.0));
        }
        assert!(mesh.rotation.x > 9.9);
    }
}
