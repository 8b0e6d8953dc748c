mod app;
pub use app::*;

mod app_controller;
pub use app_controller::*;
