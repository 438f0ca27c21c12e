use anyhow::{Context, Result};
use std::{path::Path, rc::Rc};
use tokio::{
    io::{AsyncRead, AsyncWrite},
    sync::broadcast,
};

use crate::{
    application_lifecycle,
    bridge::{Bridge, HostEvent},
    config::BridgeConfig,
    ipc,
    player::{PlaybackAction, PlaybackControl},
};

/// Playback control used by the daemon: the web page owns the actual player,
/// so activations are only reported in the log.
#[derive(Debug, Default)]
pub struct LoggingControl;

impl PlaybackControl for LoggingControl {
    fn on_playback_action(&self, action: PlaybackAction) -> Result<()> {
        log::info!("Playback action requested: {}", action);
        Ok(())
    }
}

/// Connect to the host at `socket_path` and serve it until it disconnects or the process is asked to exit.
pub fn run(config: BridgeConfig, socket_path: &Path) -> Result<()> {
    let exit = application_lifecycle::subscribe_exit();
    application_lifecycle::install_signal_handler();

    let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().context("Failed to initialize tokio runtime")?;
    rt.block_on(async {
        let stream = tokio::net::UnixStream::connect(socket_path)
            .await
            .with_context(|| format!("Failed to connect to host at {}", socket_path.display()))?;
        log::info!("Connected to host ({})", socket_path.display());
        let (stream_read, stream_write) = stream.into_split();
        serve(config, stream_read, stream_write, Rc::new(LoggingControl), exit).await
    })
}

/// Run the bridge on an already established connection to the host, until the host disconnects
/// or `exit` receives an exit event.
pub async fn serve<R, W>(
    config: BridgeConfig,
    mut stream_read: R,
    stream_write: W,
    control: Rc<dyn PlaybackControl>,
    mut exit: broadcast::Receiver<()>,
) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (msg_send, msg_recv) = tokio::sync::mpsc::unbounded_channel();
    let writer = tokio::spawn(ipc::write_messages(stream_write, msg_recv));

    let bridge = Bridge::new(&config, Rc::new(msg_send), control);
    bridge.start()?;

    crate::loop_select_exiting! { exit;
        event = ipc::read_frame::<_, HostEvent>(&mut stream_read) => match event {
            Ok(Some(event)) => {
                let result = bridge.handle_event(event);
                crate::print_result_err!("while handling host event", result);
            }
            Ok(None) => {
                log::info!("Host closed the connection");
                break;
            }
            Err(err) => {
                log::error!("Failed to read from host: {:?}", err);
                break;
            }
        }
    }

    // dropping the bridge drops the last sender, which lets the writer finish
    drop(bridge);
    writer.await.context("Message writer panicked")??;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        message::{HostMessage, Operation},
        player::{PlaybackState, PlayerSnapshot},
    };
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use tokio::io::AsyncWriteExt;

    #[derive(Default)]
    struct Control(RefCell<Vec<PlaybackAction>>);

    impl PlaybackControl for Control {
        fn on_playback_action(&self, action: PlaybackAction) -> Result<()> {
            self.0.borrow_mut().push(action);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_serve_until_host_disconnects() {
        let (bridge_side, mut host_side) = tokio::io::duplex(64 * 1024);
        let (bridge_read, bridge_write) = tokio::io::split(bridge_side);

        for event in [
            HostEvent::PlayerChanged(PlayerSnapshot {
                song: Some("A".to_string()),
                artist: Some("B".to_string()),
                state: PlaybackState::Playing,
                ..PlayerSnapshot::default()
            }),
            HostEvent::ActionActivated { name: "next-song".into() },
            HostEvent::ActionActivated { name: "no-such-action".into() },
        ] {
            ipc::write_frame(&mut host_side, &event).await.unwrap();
        }
        host_side.shutdown().await.unwrap();

        let control = Rc::new(Control::default());
        let (_exit_send, exit) = broadcast::channel(1);
        serve(BridgeConfig::default(), bridge_read, bridge_write, control.clone(), exit).await.unwrap();

        let mut received = Vec::new();
        while let Some(message) = ipc::read_frame::<_, HostMessage>(&mut host_side).await.unwrap() {
            received.push(message);
        }

        // 6 actions, initial tooltip + actions, then the song update
        assert_eq!(received.len(), 12);
        assert!(received[..6].iter().all(|m| m.is(Operation::ActionsAddAction)));
        assert_eq!(received[8].to_string(), r#"Notification.update("A","by B","nuvolaplayer","")"#);
        assert_eq!(received[11].to_string(), r#"TrayIcon.setActions(["pause","prev-song","next-song","quit"])"#);
        assert_eq!(*control.0.borrow(), vec![PlaybackAction::NextSong]);
    }

    #[tokio::test]
    async fn test_exit_requested_during_startup_flushes_and_stops() {
        let (bridge_side, mut host_side) = tokio::io::duplex(64 * 1024);
        let (bridge_read, bridge_write) = tokio::io::split(bridge_side);
        let (exit_send, exit) = broadcast::channel(1);
        exit_send.send(()).unwrap();

        serve(BridgeConfig::default(), bridge_read, bridge_write, Rc::new(Control::default()), exit).await.unwrap();

        let mut received = Vec::new();
        while let Some(message) = ipc::read_frame::<_, HostMessage>(&mut host_side).await.unwrap() {
            received.push(message);
        }
        assert_eq!(received.len(), 8);
        assert_eq!(received[7].to_string(), r#"TrayIcon.setActions(["quit"])"#);
    }
}
