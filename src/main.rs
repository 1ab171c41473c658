mod app;
mod config;
mod controls;
mod error;
mod gpu;
mod present;
mod simulation;
mod terminal;

use std::process;

use clap::Parser;
use winit::event_loop::EventLoop;

use app::App;
use config::{Args, Config, Frontend};
use error::AppError;
use simulation::Shape;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Usage errors exit with status 2 from inside clap
    let args = Args::parse();
    if args.list_shapes {
        for name in Shape::names() {
            println!("{name}");
        }
        return;
    }
    let config = Config::from(args);

    log::info!("Rules: {}", config.sim.rule);

    let result = match config.run.frontend {
        Frontend::Text => terminal::run(&config).map_err(AppError::from),
        Frontend::Window => run_window(config),
    };

    if let Err(e) = result {
        log::error!("{}", e);
        process::exit(1);
    }
}

fn run_window(config: Config) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
