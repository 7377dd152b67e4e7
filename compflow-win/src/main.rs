use std::error::Error;

use compflow_win::{FlowchartApp, ViewerConf};
use log::{error, info};
use slog::Drain;

fn main() -> Result<(), Box<dyn Error>> {
    let decorator = slog_term::PlainDecorator::new(std::io::stdout());
    let drain = slog_term::CompactFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let logger = slog::Logger::root(drain, slog::o!("version" => env!("CARGO_PKG_VERSION")));

    let _scope_guard = slog_scope::set_global_logger(logger);
    slog_stdlog::init_with_level(log::Level::Trace)?;

    info!("starting...");
    let conf = match std::env::args().nth(1) {
        Some(filepath) => ViewerConf::from_file(filepath)?,
        None => ViewerConf::default(),
    };

    let mut event_loop = FlowchartApp::create_event_loop();
    let mut app = FlowchartApp::new(&event_loop, conf)?;

    if let Err(err) = app.run(&mut event_loop) {
        error!("{err}");
        // Flush the async drain before leaving.
        drop(_scope_guard);
        std::process::exit(1);
    }

    info!("done");

    Ok(())
}
