//! Surface appearance descriptors
//!
//! A [`Material`] says how a mesh looks: a base color, an optional color map
//! and normal map, and whether it reacts to scene lights. Materials are plain
//! values owned by their mesh and never change after construction; the GPU
//! side lives in [`crate::gfx::resources::material`].

use crate::gfx::resources::texture::TextureId;

/// Lighting model of a material
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Unlit: color (times map) is written as-is
    Basic,
    /// Diffuse response to point and ambient lights
    Standard,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    shading: Shading,
    color: [f32; 3],
    map: Option<TextureId>,
    normal_map: Option<TextureId>,
}

impl Material {
    /// Unlit material with a linear RGB color
    pub fn basic(color: [f32; 3]) -> Self {
        Self {
            shading: Shading::Basic,
            color,
            map: None,
            normal_map: None,
        }
    }

    /// Lit material with a linear RGB color
    pub fn standard(color: [f32; 3]) -> Self {
        Self {
            shading: Shading::Standard,
            color,
            map: None,
            normal_map: None,
        }
    }

    /// Builder pattern: modulate the color with a texture
    pub fn with_map(mut self, texture: TextureId) -> Self {
        self.map = Some(texture);
        self
    }

    /// Builder pattern: perturb normals with a tangent-space normal map
    pub fn with_normal_map(mut self, texture: TextureId) -> Self {
        self.normal_map = Some(texture);
        self
    }

    pub fn shading(&self) -> Shading {
        self.shading
    }

    pub fn is_lit(&self) -> bool {
        self.shading == Shading::Standard
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn map(&self) -> Option<TextureId> {
        self.map
    }

    pub fn normal_map(&self) -> Option<TextureId> {
        self.normal_map
    }

    /// True if the material samples `texture`
    pub fn uses_texture(&self, texture: TextureId) -> bool {
        self.map == Some(texture) || self.normal_map == Some(texture)
    }
}

/// Converts a 0xRRGGBB sRGB color into linear RGB
pub fn color_from_hex(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xFF) as f32 / 255.0);
    [channel(16), channel(8), channel(0)]
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_conversion() {
        assert_eq!(color_from_hex(0xFFFFFF), [1.0, 1.0, 1.0]);
        assert_eq!(color_from_hex(0x000000), [0.0, 0.0, 0.0]);

        let tomato = color_from_hex(0xFF6347);
        assert_eq!(tomato[0], 1.0);
        assert!(tomato[1] > 0.1 && tomato[1] < 0.15);
        assert!(tomato[2] > 0.05 && tomato[2] < 0.07);
    }

    #[test]
    fn test_basic_material_is_unlit() {
        let material = Material::basic([1.0; 3]);
        assert!(!material.is_lit());
        assert_eq!(material.map(), None);
        assert!(Material::standard([1.0; 3]).is_lit());
    }
}
