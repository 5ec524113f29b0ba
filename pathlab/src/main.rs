use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use log::info;
use pathlab_lib::{App, Config, CrosstermDriver, Runner, logging};

fn run() -> Result<(), Box<dyn Error>> {
    let config = Config::load(std::env::args_os().nth(1).map(PathBuf::from))?;
    logging::init(&config)?;
    info!(
        "starting pathlab: {}x{} grid, {} heuristic",
        config.rows, config.cols, config.heuristic
    );

    let app = App::new(&config)?;
    let mut runner = Runner::new(
        app,
        CrosstermDriver::new(),
        Duration::from_millis(config.step_delay_ms),
    );
    runner.run()?;
    info!("pathlab exited cleanly");
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("pathlab: {e}");
        std::process::exit(1);
    }
}
