//! Bridge between a media player web page and its host process.
//!
//! [`signals`] provides named publish/subscribe signals for any type. On top of it,
//! [`player::Player`] tracks the player state and pushes notification and tray updates
//! through a [`channel::MessageChannel`], while [`actions::Actions`] turns host-side
//! action activations back into signals. [`bridge::Bridge`] ties these together.

pub mod actions;
pub mod application_lifecycle;
pub mod bridge;
pub mod channel;
pub mod config;
pub mod host_api;
pub mod ipc;
pub mod message;
pub mod opts;
pub mod paths;
pub mod player;
pub mod server;
pub mod signals;
mod util;

pub use bridge::{Bridge, HostEvent};
pub use channel::{MessageChannel, RecordingChannel};
pub use player::{PlaybackAction, PlaybackControl, PlaybackState, Player, PlayerSnapshot};
pub use signals::{EmitError, Handler, SignalRegistry, Signaling, UnknownSignalError};
