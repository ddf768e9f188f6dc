use cgmath::{Matrix4, SquareMatrix};

/// Source of a combined projection * view matrix
pub trait Camera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

/// Camera part of the per-frame globals
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// Eye position, w = 1 (vec4 keeps the WGSL layout aligned)
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0, 0.0, 0.0, 1.0],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

/// Column-major array layout expected by WGSL `mat4x4<f32>`
pub fn convert_matrix4_to_array(matrix: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_conversion_is_column_major() {
        let m = Matrix4::from_translation(cgmath::Vector3::new(1.0, 2.0, 3.0));
        let array = convert_matrix4_to_array(m);
        // Translation lives in the fourth column
        assert_eq!(array[3], [1.0, 2.0, 3.0, 1.0]);
    }
}
