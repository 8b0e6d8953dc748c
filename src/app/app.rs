use crate::gameplay::{Camera, CameraCreateInfo, CameraDesc};
use crate::window::{WindowState, WindowStateDesc};
use anyhow::Result;
use glam::{Mat4, Vec3};
use winit::{
    event::{DeviceEvent, ElementState, MouseScrollDelta, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowId,
};

/// Scroll distance of one wheel notch on touchpads reporting pixels.
const PIXELS_PER_SCROLL_LINE: f32 = 20.0;

/// Seconds between two camera state reports in the log.
const REPORT_INTERVAL: f32 = 1.0;

/// Everything a renderer needs from the camera for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameUniforms {
    pub view_mat: Mat4,
    pub proj_mat: Mat4,
    pub skybox_view_mat: Mat4,
    pub view_location: Vec3,
}

impl FrameUniforms {
    pub fn from_camera(camera: &Camera, aspect_ratio: f32) -> Self {
        Self {
            view_mat: camera.get_view_mat(),
            proj_mat: camera.get_proj_mat(aspect_ratio),
            skybox_view_mat: camera.get_skybox_view_mat(),
            view_location: camera.position(),
        }
    }
}

/// Converts a wheel event into the vertical scroll amount in lines.
pub fn scroll_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(position) => position.y as f32 / PIXELS_PER_SCROLL_LINE,
    }
}

pub struct App {
    window_state: WindowState,
    camera: Camera,

    /// Unbounded cursor position built from raw mouse motion, so the view
    /// keeps turning when the real cursor is held at the window border.
    virtual_cursor: (f64, f64),
    since_last_report: f32,
}

impl App {
    pub fn new(event_loop: &ActiveEventLoop, camera_desc: CameraDesc) -> Result<Self> {
        let window_state = Self::create_window_state(event_loop)?;

        let camera = Camera::new(CameraCreateInfo {
            desc: camera_desc,
            ..Default::default()
        })?;

        Ok(Self {
            window_state,
            camera,
            virtual_cursor: (0.0, 0.0),
            since_last_report: 0.0,
        })
    }

    fn create_window_state(event_loop: &ActiveEventLoop) -> Result<WindowState> {
        let window_descriptor = WindowStateDesc {
            cursor_locked: true,
            cursor_visible: false,
            ..Default::default()
        };
        WindowState::new(event_loop, &window_descriptor)
    }

    pub fn on_terminate(&mut self, event_loop: &ActiveEventLoop) {
        log::info!(
            "Exiting, camera at {} (yaw {:.1}, pitch {:.1}, fov {:.1})",
            self.camera.position(),
            self.camera.yaw(),
            self.camera.pitch(),
            self.camera.fov()
        );
        event_loop.exit();
    }

    fn is_capturing_input(&self) -> bool {
        self.window_state.is_cursor_grabbed()
    }

    pub fn on_window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.on_terminate(event_loop);
            }
            WindowEvent::Resized(size) => {
                log::debug!("Window resized to {}x{}", size.width, size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let pressed = event.state == ElementState::Pressed;
                if pressed && event.physical_key == PhysicalKey::Code(KeyCode::Escape) {
                    self.on_terminate(event_loop);
                    return;
                }
                if pressed && !event.repeat && event.physical_key == PhysicalKey::Code(KeyCode::KeyE)
                {
                    self.window_state.toggle_cursor_capture();
                    self.camera.reset_cursor();
                    return;
                }
                // releases always go through so no key stays held after the cursor is freed
                if self.is_capturing_input() || !pressed {
                    self.camera.handle_keyboard(&event);
                    log::debug!("Current position is {}", self.camera.position());
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if self.is_capturing_input() {
                    self.camera.modify_fov(scroll_lines(delta));
                }
            }
            WindowEvent::RedrawRequested => {
                if self.window_state.is_minimized() {
                    // keep the clock current so restoring does not produce one huge step
                    self.camera.update_time_counter();
                    return;
                }
                self.on_frame();
            }
            _ => (),
        }
    }

    pub fn on_device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.is_capturing_input() {
                self.virtual_cursor.0 += delta.0;
                self.virtual_cursor.1 += delta.1;
                self.camera
                    .handle_cursor(self.virtual_cursor.0 as f32, self.virtual_cursor.1 as f32);
            }
        }
    }

    pub fn on_about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        self.window_state.request_redraw();
    }

    fn on_frame(&mut self) {
        self.camera.update_frame();

        let uniforms = FrameUniforms::from_camera(&self.camera, self.window_state.aspect_ratio());
        log::trace!(
            "view: {:?}, proj: {:?}, skybox view: {:?}",
            uniforms.view_mat,
            uniforms.proj_mat,
            uniforms.skybox_view_mat
        );

        self.since_last_report += self.camera.delta_time();
        if self.since_last_report >= REPORT_INTERVAL {
            self.since_last_report = 0.0;
            log::debug!(
                "fps: {:.1}, eye: {}, front: {}, fov: {:.1}",
                self.camera.time_info().display_fps(),
                uniforms.view_location,
                self.camera.front(),
                self.camera.fov()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_scroll_lines() {
        assert_eq!(scroll_lines(MouseScrollDelta::LineDelta(0.0, 2.0)), 2.0);
        assert_eq!(
            scroll_lines(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -40.0))),
            -2.0
        );
    }

    #[test]
    fn test_frame_uniforms_from_default_camera() {
        let camera = Camera::new(CameraCreateInfo::default()).unwrap();
        let uniforms = FrameUniforms::from_camera(&camera, 4.0 / 3.0);

        assert_eq!(uniforms.view_location, Vec3::new(0.0, 0.0, 6.0));
        assert_eq!(uniforms.view_mat, camera.get_view_mat());
        assert_eq!(uniforms.proj_mat, camera.get_proj_mat(4.0 / 3.0));
        assert_eq!(uniforms.skybox_view_mat.w_axis, glam::Vec4::W);
    }
}
