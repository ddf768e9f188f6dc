use crate::gfx::{
    geometry::{generate_grid, generate_wire_sphere},
    resources::texture::{TextureCache, TextureId},
    scene::{light::Light, object::Mesh, vertex::LineVertex},
};

/// Stable handle to a mesh. Meshes are never removed, so indices stay valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(usize);

/// Stable handle to a light
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightId(usize);

/// Diagnostic line overlays; they never influence other entities
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Helper {
    /// Wireframe marker following a point light
    PointLight { light: LightId, sphere_size: f32 },
    /// Ground grid on the XZ plane
    Grid {
        size: f32,
        divisions: u32,
        center_color: [f32; 3],
        grid_color: [f32; 3],
    },
}

/// Root container of everything rendered in a frame
#[derive(Default)]
pub struct Scene {
    meshes: Vec<Mesh>,
    lights: Vec<Light>,
    helpers: Vec<Helper>,
    pub background: Option<TextureId>,
    pub textures: TextureCache,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mesh; it stays in the scene for the scene's lifetime
    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.push(mesh);
        MeshId(self.meshes.len() - 1)
    }

    pub fn add_light(&mut self, light: Light) -> LightId {
        self.lights.push(light);
        LightId(self.lights.len() - 1)
    }

    pub fn add_helper(&mut self, helper: Helper) {
        self.helpers.push(helper);
    }

    pub fn set_background(&mut self, texture: TextureId) {
        self.background = Some(texture);
    }

    /// Handles always come from this scene, so lookups cannot miss
    pub fn mesh(&self, id: MeshId) -> &Mesh {
        &self.meshes[id.0]
    }

    pub fn mesh_mut(&mut self, id: MeshId) -> &mut Mesh {
        &mut self.meshes[id.0]
    }

    pub fn light(&self, id: LightId) -> &Light {
        &self.lights[id.0]
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn helpers(&self) -> &[Helper] {
        &self.helpers
    }

    /// Number of meshes with the given name
    pub fn count_named(&self, name: &str) -> usize {
        self.meshes.iter().filter(|m| m.name == name).count()
    }

    /// Collects finished texture loads; returns the textures that changed
    pub fn update(&mut self) -> Vec<TextureId> {
        self.textures.poll()
    }

    /// World-space line list for all helpers
    pub fn helper_lines(&self) -> Vec<LineVertex> {
        let mut lines = Vec::new();
        for helper in &self.helpers {
            match *helper {
                Helper::PointLight { light, sphere_size } => {
                    let light = self.light(light);
                    if let Some(position) = light.position() {
                        let color = match light {
                            Light::Point { color, .. } => *color,
                            Light::Ambient { color, .. } => *color,
                        };
                        lines.extend(generate_wire_sphere(
                            position.into(),
                            sphere_size,
                            16,
                            color,
                        ));
                    }
                }
                Helper::Grid {
                    size,
                    divisions,
                    center_color,
                    grid_color,
                } => lines.extend(generate_grid(size, divisions, center_color, grid_color)),
            }
        }
        lines
    }

    /// Gets statistics about the scene
    pub fn get_statistics(&self) -> SceneStatistics {
        SceneStatistics {
            mesh_count: self.meshes.len(),
            light_count: self.lights.len(),
            helper_count: self.helpers.len(),
            texture_count: self.textures.len(),
        }
    }
}

/// Scene statistics for debugging and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub mesh_count: usize,
    pub light_count: usize,
    pub helper_count: usize,
    pub texture_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{geometry::Geometry, scene::material::Material};
    use cgmath::Vector3;

    #[test]
    fn test_handles_are_stable() {
        let mut scene = Scene::new();
        let a = scene.add_mesh(Mesh::new(
            "a",
            Geometry::sphere(1.0, 8, 8),
            Material::basic([1.0; 3]),
        ));
        let b = scene.add_mesh(Mesh::new(
            "b",
            Geometry::sphere(1.0, 8, 8),
            Material::basic([1.0; 3]),
        ));
        scene.mesh_mut(b).set_position(1.0, 2.0, 3.0);

        assert_eq!(scene.mesh(a).name, "a");
        assert_eq!(scene.mesh(b).position, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(scene.count_named("a"), 1);
    }

    #[test]
    fn test_helper_lines_follow_light() {
        let mut scene = Scene::new();
        let light = scene.add_light(Light::point(Vector3::new(5.0, 5.0, 5.0), [1.0; 3]));
        scene.add_helper(Helper::PointLight {
            light,
            sphere_size: 1.0,
        });
        scene.add_helper(Helper::Grid {
            size: 200.0,
            divisions: 50,
            center_color: [0.5; 3],
            grid_color: [0.25; 3],
        });

        let lines = scene.helper_lines();
        assert_eq!(lines.len(), 3 * 16 * 2 + 4 * 51);
        assert!((lines[0].position[0] - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_statistics() {
        let mut scene = Scene::new();
        scene.add_light(Light::ambient([1.0; 3]));
        let stats = scene.get_statistics();
        assert_eq!(stats.light_count, 1);
        assert_eq!(stats.mesh_count, 0);
    }
}
