use super::app::App;
use crate::gameplay::CameraDesc;
use winit::{
    application::ApplicationHandler, event::WindowEvent, event_loop::ActiveEventLoop,
    window::WindowId,
};

/// Creates the [`App`] once the event loop is running.
#[derive(Default)]
pub struct AppController {
    camera_desc: CameraDesc,
    initialized: Option<App>,
}

impl AppController {
    pub fn new(camera_desc: CameraDesc) -> Self {
        Self {
            camera_desc,
            initialized: None,
        }
    }
}

impl ApplicationHandler for AppController {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.initialized.is_some() {
            return;
        }
        match App::new(event_loop, self.camera_desc.clone()) {
            Ok(app) => self.initialized = Some(app),
            Err(e) => {
                log::error!("Failed to initialize app: {:?}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if let Some(initialized) = &mut self.initialized {
            initialized.on_window_event(event_loop, id, event);
        }
    }

    fn device_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        if let Some(initialized) = &mut self.initialized {
            initialized.on_device_event(event_loop, device_id, event);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(initialized) = &mut self.initialized {
            initialized.on_about_to_wait(event_loop);
        }
    }
}
