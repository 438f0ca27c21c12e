use anyhow::{Context, Result};
use std::rc::Rc;

use nuvola_bridge::{
    config,
    opts::{self, Action},
    paths::BridgePaths,
    server::{self, LoggingControl},
    Bridge, RecordingChannel,
};

fn main() {
    let opts = opts::Opt::from_env();

    let log_level_filter = if opts.log_debug { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    if std::env::var("RUST_LOG").is_ok() {
        pretty_env_logger::init_timed();
    } else {
        pretty_env_logger::formatted_timed_builder()
            .filter(Some("nuvola_bridge"), log_level_filter)
            .filter(Some("nuvola-bridge"), log_level_filter)
            .init();
    }

    if let Err(err) = run(opts) {
        log::error!("{:?}", err);
        std::process::exit(1);
    }
}

fn run(opts: opts::Opt) -> Result<()> {
    let paths = opts
        .config_path
        .map(BridgePaths::from_config_dir)
        .unwrap_or_else(BridgePaths::default)
        .context("Failed to initialize nuvola-bridge paths")?;
    log::debug!("Using paths: {}", paths);

    let config = config::read_from_file(&paths.get_config_file())?;

    match opts.action {
        Action::Run { socket } => {
            let socket = socket.or_else(|| config.socket_path.clone()).unwrap_or_else(|| paths.get_default_socket_file());
            server::run(config, &socket)
        }
        Action::ListActions => {
            let bridge = Bridge::new(&config, Rc::new(RecordingChannel::new()), Rc::new(LoggingControl));
            bridge.player().init();
            for entry in bridge.actions().registered() {
                println!("{}", entry);
            }
            Ok(())
        }
    }
}
