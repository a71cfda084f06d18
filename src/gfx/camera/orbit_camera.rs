use cgmath::*;
use winit::dpi::PhysicalSize;

use super::{
    camera_controller::{InputStates, KeyStates, MouseStates},
    camera_utils::{convert_matrix4_to_array, Camera, CameraUniform, OPENGL_TO_WGPU_MATRIX},
};

/// Largest rotation a single pointer move may request.
const MAX_POINTER_STEP: Deg<f32> = Deg(2.5);
const MOUSE_ACCELERATION: f32 = 100.0;
const TOUCH_ACCELERATION: f32 = 150.0;

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraConfig {
    pub radius: f32,
    /// Angular acceleration per millisecond of input
    pub rotation_sensitivity: f32,
    /// Fraction of the angular velocity lost per millisecond
    pub damping_factor: f32,
    pub initial_yaw: Deg<f32>,
    pub initial_pitch: Deg<f32>,
}

impl Default for OrbitCameraConfig {
    fn default() -> Self {
        Self {
            radius: 2.0,
            rotation_sensitivity: 0.0002,
            damping_factor: 0.002,
            initial_yaw: Deg(35.0),
            initial_pitch: Deg(-20.0),
        }
    }
}

/// Camera on a sphere around the origin, always looking at it.
///
/// Input accelerates an angular velocity (yaw, pitch, roll) that is applied
/// about the camera's own axes and decays every update.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    config: OrbitCameraConfig,
    orientation: Quaternion<f32>,
    position: Vector3<f32>,
    velocity: Vector3<f32>,
    previous_cursor_position: Vector2<f32>,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.position);
        let target = Point3::from_vec(self.position + self.forward());
        let view = Matrix4::look_at_rh(eye, target, self.orientation * Vector3::unit_y());
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl OrbitCamera {
    pub fn new(config: OrbitCameraConfig, aspect: f32) -> Self {
        let yaw = Quaternion::from_axis_angle(Vector3::unit_y(), config.initial_yaw);
        let pitch = Quaternion::from_axis_angle(Vector3::unit_x(), config.initial_pitch);

        let mut camera = Self {
            config,
            orientation: pitch * yaw,
            position: Vector3::unit_z() * config.radius,
            velocity: Vector3::zero(),
            previous_cursor_position: Vector2::zero(),
            aspect,
            fovy: Deg(45.0).into(),
            znear: 0.5,
            zfar: 100.0,
            uniform: CameraUniform::default(),
        };
        camera.update_position();
        camera.update_view_proj();
        camera
    }

    pub fn config(&self) -> &OrbitCameraConfig {
        &self.config
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    /// Angular velocity in radians per update: yaw, pitch, roll.
    pub fn velocity(&self) -> Vector3<f32> {
        self.velocity
    }

    /// Advances the camera by `dt` milliseconds.
    pub fn update(&mut self, input: &InputStates, viewport: PhysicalSize<u32>, dt: f32) {
        self.process_mouse_input(&input.mouse_states, viewport, dt);
        self.process_key_input(&input.key_states, dt);

        if !is_zero(self.velocity) {
            let yaw = Quaternion::from_axis_angle(
                self.orientation * Vector3::unit_y(),
                Rad(self.velocity.x),
            );
            self.orientation = yaw * self.orientation;

            let pitch = Quaternion::from_axis_angle(
                self.orientation * Vector3::unit_x(),
                Rad(self.velocity.y),
            );
            self.orientation = pitch * self.orientation;

            let roll = Quaternion::from_axis_angle(
                self.orientation * Vector3::unit_z(),
                Rad(self.velocity.z),
            );
            self.orientation = (roll * self.orientation).normalize();
        }

        self.update_position();
        self.velocity *= 1.0 - (self.config.damping_factor * dt).clamp(0.0, 1.0);
        self.update_view_proj();
    }

    fn process_mouse_input(&mut self, mouse: &MouseStates, viewport: PhysicalSize<u32>, dt: f32) {
        if !mouse.button_pressed && !mouse.touch_active {
            return;
        }

        let cursor_moved = mouse.current_cursor_position - self.previous_cursor_position;
        self.previous_cursor_position = mouse.current_cursor_position;
        if is_zero(cursor_moved) || viewport.width == 0 || viewport.height == 0 {
            return;
        }

        let size = Vector2::new(viewport.width as f32, viewport.height as f32);
        let clamp = |v: Vector2<f32>| Vector2::new(v.x.clamp(0.0, size.x), v.y.clamp(0.0, size.y));

        let delta = clamp(mouse.last_cursor_position) - clamp(mouse.current_cursor_position);
        if is_zero(delta) {
            return;
        }

        let delta = Vector2::new(delta.x / size.x, delta.y / size.y);
        let step = delta.magnitude().min(Rad::from(MAX_POINTER_STEP).0);
        let acceleration = if mouse.touch_active {
            TOUCH_ACCELERATION
        } else {
            MOUSE_ACCELERATION
        };

        let delta = delta.normalize() * step * acceleration * self.config.rotation_sensitivity * dt;
        self.velocity += delta.extend(0.0);
    }

    fn process_key_input(&mut self, keys: &KeyStates, dt: f32) {
        let axis = |positive: bool, negative: bool| positive as i8 as f32 - negative as i8 as f32;
        let delta = Vector3::new(
            axis(keys.d_pressed, keys.a_pressed),
            axis(keys.w_pressed, keys.s_pressed),
            axis(keys.e_pressed, keys.q_pressed),
        );
        if is_zero(delta) {
            return;
        }

        self.velocity += delta.normalize() * self.config.rotation_sensitivity * dt;
    }

    fn forward(&self) -> Vector3<f32> {
        self.orientation * -Vector3::unit_z()
    }

    fn update_position(&mut self) {
        self.position = -self.forward() * self.config.radius;
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = self.position.extend(1.0).into();
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

fn is_zero<V: InnerSpace<Scalar = f32>>(vector: V) -> bool {
    vector.magnitude2() <= f32::EPSILON * f32::EPSILON
}
