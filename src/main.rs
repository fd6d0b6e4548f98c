mod app;

use app::{app_program::Program, config::UserConfig, error::Result, logger};
use eyre::WrapErr;

fn main() -> Result<()> {
    color_eyre::install()?;
    logger::init().wrap_err("Failed to initialize logging")?;

    let config = UserConfig::load()?.with_args(std::env::args().skip(1));
    tracing::info!("Starting convlist with {:?}", config);

    let program = Program::new(config)?;
    program.run()
}
