use cgmath::{Deg, Matrix4, Point3, Vector3};

use crate::matrix4_to_array;

pub const IDENTITY_MATRIX_4: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub eye: Point3<f64>,
    pub target: Point3<f64>,
    pub up: Vector3<f64>,
    pub aspect: f64,
    /// Vertical field of view in degrees.
    pub fovy: f64,
    pub znear: f64,
    pub zfar: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            // above and to the side, looking at the globe centre
            eye: Point3::new(2.0, 2.0, 2.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::unit_y(),
            aspect: 1.0,
            fovy: 60.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

impl Camera {
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    // cgmath builds OpenGL clip space (z in -1..1); the host converts if its
    // backend wants 0..1
    pub fn build_view_projection_matrix(&self) -> (Matrix4<f64>, Matrix4<f64>, Matrix4<f64>) {
        let view = Matrix4::look_at_rh(self.eye, self.target, self.up);
        let proj = cgmath::perspective(Deg(self.fovy), self.aspect, self.znear, self.zfar);
        (proj * view, view, proj)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj_matrix: [[f32; 4]; 4],
    pub view_matrix: [[f32; 4]; 4],
    pub proj_matrix: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj_matrix: IDENTITY_MATRIX_4,
            view_matrix: IDENTITY_MATRIX_4,
            proj_matrix: IDENTITY_MATRIX_4,
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera) {
        let (view_proj_matrix, view_matrix, proj_matrix) = camera.build_view_projection_matrix();
        self.view_proj_matrix = matrix4_to_array(view_proj_matrix);
        self.view_matrix = matrix4_to_array(view_matrix);
        self.proj_matrix = matrix4_to_array(proj_matrix);
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}
