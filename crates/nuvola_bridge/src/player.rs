//! Tracks the observable state of the media player and mirrors it to the host.
//!
//! The integration mutates the public attributes of [`Player`] and calls [`Player::update`].
//! Each update compares the attributes against the values seen during the previous update and,
//! if anything changed, pushes a notification, a tray tooltip and the tray action list.

use anyhow::Result;
use bridge_shared_util::{format_template, ActionName};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, rc::Rc};
use strum::IntoEnumIterator;

use crate::{
    actions::{ActionEntry, Actions, ACTION_ACTIVATED},
    channel::MessageChannel,
    config::BridgeConfig,
    host_api::{Notification, TrayIcon},
    signals::{handler, Handler, Signaling, UnknownSignalError},
};

pub const ACTION_QUIT: &str = "quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display)]
pub enum PlaybackState {
    #[default]
    Unknown,
    Paused,
    Playing,
}

/// Playback commands the host can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum PlaybackAction {
    Play,
    TogglePlay,
    Pause,
    Stop,
    PrevSong,
    NextSong,
}

impl PlaybackAction {
    pub fn action_name(self) -> ActionName {
        ActionName(self.to_string())
    }

    /// The action as it is announced to the host.
    pub fn entry(self) -> ActionEntry {
        let (label, icon) = match self {
            PlaybackAction::Play => ("Play", Some("media-playback-start")),
            PlaybackAction::Pause => ("Pause", Some("media-playback-pause")),
            PlaybackAction::TogglePlay => ("Toggle play/pause", None),
            PlaybackAction::Stop => ("Stop", Some("media-playback-stop")),
            PlaybackAction::PrevSong => ("Previous song", Some("media-skip-backward")),
            PlaybackAction::NextSong => ("Next song", Some("media-skip-forward")),
        };
        let entry = ActionEntry::new("playback", "win", self.action_name(), label);
        match icon {
            Some(icon) => entry.with_icon(icon),
            None => entry,
        }
    }

    /// Order in which the actions are registered with the host.
    pub const REGISTRATION_ORDER: [PlaybackAction; 6] = [
        PlaybackAction::Play,
        PlaybackAction::Pause,
        PlaybackAction::TogglePlay,
        PlaybackAction::Stop,
        PlaybackAction::PrevSong,
        PlaybackAction::NextSong,
    ];
}

/// Receives the playback commands activated by the user on the host side.
pub trait PlaybackControl {
    fn on_playback_action(&self, action: PlaybackAction) -> Result<()>;
}

/// The attributes tracked by [`Player`], in comparison order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum PlayerField {
    Song,
    Artist,
    Album,
    Artwork,
    State,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FieldValue {
    Text(Option<String>),
    State(PlaybackState),
}

/// A complete copy of the player attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub song: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub artwork: Option<String>,
    #[serde(default)]
    pub state: PlaybackState,
}

/// Text derived from the current song for the notification and the tray tooltip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongSummary {
    pub title: String,
    pub text: String,
    pub tooltip: String,
}

impl SongSummary {
    /// Returns `None` if there is no song. Empty strings count as missing.
    pub fn compose(song: Option<&str>, artist: Option<&str>, album: Option<&str>) -> Option<Self> {
        let song = present(song)?;
        let artist = present(artist);
        let album = present(album);
        let text = match (artist, album) {
            (None, None) => "by unknown artist".to_string(),
            (None, Some(album)) => format_template("from {1}", &[album]),
            (Some(artist), None) => format_template("by {1}", &[artist]),
            (Some(artist), Some(album)) => format_template("by {1} from {2}", &[artist, album]),
        };
        let tooltip = match artist {
            Some(artist) => format_template("{1} by {2}", &[song, artist]),
            None => song.to_string(),
        };
        Some(SongSummary { title: song.to_string(), text, tooltip })
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Forward a host activation to the playback control. Names that aren't playback actions are ignored.
fn dispatch_activation(control: &dyn PlaybackControl, name: &ActionName) -> Result<()> {
    match name.as_str().parse::<PlaybackAction>() {
        Ok(action) => control.on_playback_action(action),
        Err(_) => Ok(()),
    }
}

pub struct Player {
    pub song: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub artwork: Option<String>,
    pub state: PlaybackState,

    /// Values seen during the last update. Fields that were never seen are absent.
    previous: HashMap<PlayerField, FieldValue>,
    activation_handler: Option<Handler<Actions, ActionName>>,

    actions: Rc<Actions>,
    notification: Notification,
    tray_icon: TrayIcon,
    control: Rc<dyn PlaybackControl>,
    app_name: String,
    notification_icon: String,
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("current", &self.snapshot())
            .field("previous", &self.previous)
            .field("connected", &self.activation_handler.is_some())
            .finish()
    }
}

impl Player {
    pub fn new(
        actions: Rc<Actions>,
        channel: Rc<dyn MessageChannel>,
        control: Rc<dyn PlaybackControl>,
        config: &BridgeConfig,
    ) -> Self {
        Player {
            song: None,
            artist: None,
            album: None,
            artwork: None,
            state: PlaybackState::Unknown,
            previous: HashMap::new(),
            activation_handler: None,
            actions,
            notification: Notification::new(channel.clone()),
            tray_icon: TrayIcon::new(channel),
            control,
            app_name: config.app_name.clone(),
            notification_icon: config.notification_icon.clone(),
        }
    }

    /// Announce all playback actions to the host.
    pub fn init(&self) {
        for action in PlaybackAction::REGISTRATION_ORDER {
            self.actions.add_action(action.entry());
        }
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            song: self.song.clone(),
            artist: self.artist.clone(),
            album: self.album.clone(),
            artwork: self.artwork.clone(),
            state: self.state,
        }
    }

    /// Replace all attributes at once. Does not run an update.
    pub fn apply_snapshot(&mut self, snapshot: PlayerSnapshot) {
        let PlayerSnapshot { song, artist, album, artwork, state } = snapshot;
        self.song = song;
        self.artist = artist;
        self.album = album;
        self.artwork = artwork;
        self.state = state;
    }

    fn field(&self, field: PlayerField) -> FieldValue {
        match field {
            PlayerField::Song => FieldValue::Text(self.song.clone()),
            PlayerField::Artist => FieldValue::Text(self.artist.clone()),
            PlayerField::Album => FieldValue::Text(self.album.clone()),
            PlayerField::Artwork => FieldValue::Text(self.artwork.clone()),
            PlayerField::State => FieldValue::State(self.state),
        }
    }

    /// Compare every field against the last seen value, remembering the new values.
    fn take_changes(&mut self) -> Vec<PlayerField> {
        let mut changed = Vec::new();
        for field in PlayerField::iter() {
            let value = self.field(field);
            if self.previous.get(&field) != Some(&value) {
                self.previous.insert(field, value);
                changed.push(field);
            }
        }
        changed
    }

    /// Run one diff cycle and push the result to the host. Returns the fields that changed;
    /// nothing is sent if that list is empty.
    ///
    /// The first call also connects the player to the [`ACTION_ACTIVATED`] signal.
    pub fn update(&mut self) -> Result<Vec<PlayerField>, UnknownSignalError> {
        if self.activation_handler.is_none() {
            let control = self.control.clone();
            let activation = handler(move |_: &Actions, name: &ActionName| dispatch_activation(&*control, name));
            self.actions.connect(ACTION_ACTIVATED, activation.clone())?;
            self.activation_handler = Some(activation);
        }

        let changed = self.take_changes();
        if changed.is_empty() {
            return Ok(changed);
        }
        log::debug!("Player changed: {}", changed.iter().join(", "));

        match SongSummary::compose(self.song.as_deref(), self.artist.as_deref(), self.album.as_deref()) {
            Some(summary) => {
                self.notification.update(&summary.title, &summary.text, Some(&self.notification_icon), None);
                self.notification.show();
                self.tray_icon.set_tooltip(Some(&summary.tooltip));
            }
            None => self.tray_icon.set_tooltip(Some(&self.app_name)),
        }

        self.tray_icon.set_actions(&self.tray_actions());
        Ok(changed)
    }

    /// Actions offered in the tray menu for the current playback state.
    pub fn tray_actions(&self) -> Vec<ActionName> {
        let toggle = match self.state {
            PlaybackState::Playing => PlaybackAction::Pause,
            PlaybackState::Paused => PlaybackAction::Play,
            PlaybackState::Unknown => return vec![ACTION_QUIT.into()],
        };
        vec![
            toggle.action_name(),
            PlaybackAction::PrevSong.action_name(),
            PlaybackAction::NextSong.action_name(),
            ACTION_QUIT.into(),
        ]
    }

    /// Handle an activation of `name` reported by `source`.
    pub fn on_action_activated(&self, _source: &Actions, name: &ActionName) -> Result<()> {
        dispatch_activation(&*self.control, name)
    }

    /// Stop receiving activations. The next [`Player::update`] connects again.
    pub fn detach(&mut self) -> Result<(), UnknownSignalError> {
        if let Some(activation) = self.activation_handler.take() {
            self.actions.disconnect(ACTION_ACTIVATED, &activation)?;
        }
        Ok(())
    }
}
