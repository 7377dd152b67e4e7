mod app;
mod config;
mod error;
mod inputmap;
mod painter;
mod render;
mod window;

pub use self::{
    app::FlowchartApp,
    config::ViewerConf,
    error::{AppError, ErrorKind},
    inputmap::{InputDef, InputMap},
};

pub type EventLoop = winit::event_loop::EventLoop<()>;

/// Named input actions understood by the viewer.
pub mod actions {
    /// Close the window.
    pub const EXIT: &str = "exit";
    /// Write the figure to the configured SVG path.
    pub const EXPORT: &str = "export";
}

/// Open the viewer window and block until it is closed.
pub fn run_viewer(conf: ViewerConf) -> Result<(), AppError> {
    let mut event_loop = FlowchartApp::create_event_loop();
    let mut app = FlowchartApp::new(&event_loop, conf)?;
    app.run(&mut event_loop)
}
