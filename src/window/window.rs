use anyhow::{Context, Result};
use std::sync::Arc;
use winit::{
    dpi::{LogicalPosition, LogicalSize},
    event_loop::ActiveEventLoop,
    window::{CursorGrabMode, Window},
};

/// Describes the information
/// needed for creating a
/// window.
#[derive(Debug, Clone)]
pub struct WindowStateDesc {
    /// The requested logical
    /// width of the window's
    /// client area.
    pub width: f32,

    /// The requested logical
    /// height of the window's
    /// client area.
    pub height: f32,

    /// The position on the
    /// screen that the window
    /// will be centered at.
    ///
    /// If set to `None`, some
    /// platform-specific
    /// position will be
    /// chosen.
    pub position: Option<[f32; 2]>,

    pub title: String,

    pub resizable: bool,

    /// Sets whether the
    /// cursor is visible when
    /// the window has focus.
    pub cursor_visible: bool,

    /// Sets whether the
    /// window locks the
    /// cursor inside its
    /// borders when the
    /// window has focus.
    pub cursor_locked: bool,
}

impl Default for WindowStateDesc {
    fn default() -> Self {
        WindowStateDesc {
            title: "Interactive Camera Model".to_string(),
            width: 800.0,
            height: 600.0,
            position: None,
            resizable: true,
            cursor_locked: true,
            cursor_visible: false,
        }
    }
}

/// winit::window::Window does
/// not remember the cursor
/// state, so we wrap it in
/// this struct to keep track
pub struct WindowState {
    window: Arc<Window>,
    window_descriptor: WindowStateDesc,
}

impl WindowState {
    pub fn new(event_loop: &ActiveEventLoop, window_descriptor: &WindowStateDesc) -> Result<Self> {
        let WindowStateDesc {
            width,
            height,
            position,
            ..
        } = *window_descriptor;

        let mut winit_window_attributes =
            Window::default_attributes().with_inner_size(LogicalSize::new(width, height));
        if let Some(position) = position {
            winit_window_attributes = winit_window_attributes
                .with_position(LogicalPosition::new(position[0] as f64, position[1] as f64));
        }

        // set window to be invisible first to avoid flickering during window creation
        let winit_window_attributes = winit_window_attributes
            .with_visible(false)
            .with_resizable(window_descriptor.resizable)
            .with_title(&window_descriptor.title);

        let window = event_loop
            .create_window(winit_window_attributes)
            .context("Failed to create window")?;

        let mut state = Self {
            window: Arc::new(window),
            window_descriptor: window_descriptor.clone(),
        };
        state.set_cursor_grab(window_descriptor.cursor_locked);
        state.set_cursor_visibility(window_descriptor.cursor_visible);
        state.window.set_visible(true);

        log::info!(
            "Created window \"{}\" ({}x{})",
            window_descriptor.title,
            state.window_size()[0],
            state.window_size()[1]
        );
        Ok(state)
    }

    /// Sets the cursor
    /// visibility, do not
    /// change it on the winit
    /// window directly,
    /// otherwise the internal
    /// state will be out of
    /// sync.
    pub fn set_cursor_visibility(&mut self, cursor_visible: bool) {
        self.window_descriptor.cursor_visible = cursor_visible;
        self.window.set_cursor_visible(cursor_visible);
    }

    pub fn is_cursor_grabbed(&self) -> bool {
        self.window_descriptor.cursor_locked
    }

    /// Sets the cursor grab,
    /// same caveat as
    /// [`Self::set_cursor_visibility`].
    pub fn set_cursor_grab(&mut self, cursor_locked: bool) {
        self.window_descriptor.cursor_locked = cursor_locked;
        let res = self
            .window
            .set_cursor_grab(Self::get_cursor_grab_mode(cursor_locked));
        if let Err(e) = res {
            log::warn!("Failed to grab cursor: {:?}", e);
        }
    }

    /// Captures or releases the cursor, hiding it while captured.
    pub fn toggle_cursor_capture(&mut self) {
        let capture = !self.is_cursor_grabbed();
        self.set_cursor_grab(capture);
        self.set_cursor_visibility(!capture);
    }

    /// Size of the physical
    /// window, in (width,
    /// height).
    pub fn window_size(&self) -> [u32; 2] {
        let size = self.window.inner_size();
        [size.width, size.height]
    }

    pub fn is_minimized(&self) -> bool {
        self.window.is_minimized().unwrap_or(false)
    }

    /// Return aspect ratio of
    /// the window. (width /
    /// height)
    pub fn aspect_ratio(&self) -> f32 {
        aspect_ratio_of(self.window_size())
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    /// Returns the cursor
    /// grab mode that should
    /// be used for the
    /// current platform.
    fn get_cursor_grab_mode(locked: bool) -> CursorGrabMode {
        if !locked {
            return CursorGrabMode::None;
        }
        // macos only supports locked, windows and x11 only confined
        if cfg!(target_os = "macos") {
            CursorGrabMode::Locked
        } else {
            CursorGrabMode::Confined
        }
    }
}

/// Falls back to 1.0 for a zero sized (minimized) window.
pub fn aspect_ratio_of(size: [u32; 2]) -> f32 {
    if size[0] == 0 || size[1] == 0 {
        return 1.0;
    }
    size[0] as f32 / size[1] as f32
}
