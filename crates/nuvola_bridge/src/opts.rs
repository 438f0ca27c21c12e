use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Struct that gets generated from `RawOpt`.
#[derive(Debug, PartialEq, Eq)]
pub struct Opt {
    pub log_debug: bool,
    pub config_path: Option<PathBuf>,
    pub action: Action,
}

#[derive(Parser, Debug, PartialEq, Eq)]
#[command(version, about)]
pub struct RawOpt {
    /// Write out debug logs.
    #[arg(long = "debug", global = true)]
    log_debug: bool,

    /// Override path to configuration directory (directory that contains bridge.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Action {
    /// Connect to the host and mirror the player state until the host disconnects.
    #[command(name = "run", alias = "r")]
    Run {
        /// Path of the host socket
        #[arg(short, long)]
        socket: Option<PathBuf>,
    },

    /// Print the messages that register the playback actions with the host.
    #[command(name = "list-actions")]
    ListActions,
}

impl Opt {
    pub fn from_env() -> Self {
        let raw: RawOpt = RawOpt::parse();
        raw.into()
    }
}

impl From<RawOpt> for Opt {
    fn from(other: RawOpt) -> Self {
        let RawOpt { action, log_debug, config } = other;
        Opt { action, log_debug, config_path: config }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Opt {
        RawOpt::try_parse_from(args).unwrap().into()
    }

    #[test]
    fn test_run_with_socket() {
        assert_eq!(
            parse(&["nuvola-bridge", "--debug", "run", "--socket", "/tmp/host.sock"]),
            Opt { log_debug: true, config_path: None, action: Action::Run { socket: Some("/tmp/host.sock".into()) } }
        );
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let opt = parse(&["nuvola-bridge", "list-actions", "--config", "/etc/nuvola"]);
        assert_eq!(opt.config_path, Some(PathBuf::from("/etc/nuvola")));
        assert_eq!(opt.action, Action::ListActions);
    }

    #[test]
    fn test_subcommand_required() {
        assert!(RawOpt::try_parse_from(["nuvola-bridge"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        RawOpt::command().debug_assert();
    }
}
