use cgmath::Vector3;

/// Light source stored in the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Emits in all directions from a position
    Point {
        position: Vector3<f32>,
        color: [f32; 3],
        intensity: f32,
    },
    /// Uniform light with no position
    Ambient { color: [f32; 3], intensity: f32 },
}

impl Light {
    pub fn point(position: Vector3<f32>, color: [f32; 3]) -> Self {
        Light::Point {
            position,
            color,
            intensity: 1.0,
        }
    }

    pub fn ambient(color: [f32; 3]) -> Self {
        Light::Ambient {
            color,
            intensity: 1.0,
        }
    }

    pub fn position(&self) -> Option<Vector3<f32>> {
        match self {
            Light::Point { position, .. } => Some(*position),
            Light::Ambient { .. } => None,
        }
    }

    /// Color already multiplied by intensity
    pub fn radiance(&self) -> [f32; 3] {
        let (color, intensity) = match self {
            Light::Point {
                color, intensity, ..
            } => (color, intensity),
            Light::Ambient { color, intensity } => (color, intensity),
        };
        [
            color[0] * intensity,
            color[1] * intensity,
            color[2] * intensity,
        ]
    }
}
