use bridge_shared_util::ActionName;
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    channel::MessageChannel,
    message::Operation,
    signals::{handler, EmitError, SignalRegistry, Signaling},
};

/// Emitted with the [`ActionName`] whenever the host reports that the user activated an action.
pub const ACTION_ACTIVATED: &str = "action-activated";

/// A host-visible action, as registered through [`Actions::add_action`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEntry {
    pub group: String,
    pub scope: String,
    pub name: ActionName,
    pub label: String,
    pub mnemonic_label: Option<String>,
    pub icon: Option<String>,
    pub keybinding: Option<String>,
}

impl ActionEntry {
    pub fn new(group: &str, scope: &str, name: impl Into<ActionName>, label: &str) -> Self {
        ActionEntry {
            group: group.to_string(),
            scope: scope.to_string(),
            name: name.into(),
            label: label.to_string(),
            mnemonic_label: None,
            icon: None,
            keybinding: None,
        }
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn with_mnemonic_label(mut self, label: &str) -> Self {
        self.mnemonic_label = Some(label.to_string());
        self
    }

    pub fn with_keybinding(mut self, keybinding: &str) -> Self {
        self.keybinding = Some(keybinding.to_string());
        self
    }
}

impl fmt::Display for ActionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}\t{}", self.group, self.scope, self.name, self.label)?;
        if let Some(icon) = &self.icon {
            write!(f, " ({})", icon)?;
        }
        Ok(())
    }
}

/// Registry of host actions. Activations reported by the host are re-emitted as
/// [`ACTION_ACTIVATED`] to whoever is connected.
pub struct Actions {
    channel: Rc<dyn MessageChannel>,
    registered: RefCell<Vec<ActionEntry>>,
    signals: SignalRegistry<Actions, ActionName>,
}

impl fmt::Debug for Actions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actions").field("registered", &self.registered.borrow()).field("signals", &self.signals).finish()
    }
}

impl Actions {
    pub fn new(channel: Rc<dyn MessageChannel>) -> Self {
        let actions = Actions { channel, registered: RefCell::new(Vec::new()), signals: SignalRegistry::new() };
        actions.register_signals([ACTION_ACTIVATED]);
        let debug = handler(|_: &Actions, name: &ActionName| {
            log::debug!("Action activated: {}", name);
            Ok(())
        });
        if let Err(err) = actions.connect(ACTION_ACTIVATED, debug) {
            log::error!("Failed to connect activation logger: {}", err);
        }
        actions
    }

    /// Announce a new action to the host. Missing optional fields are sent as empty strings.
    /// Duplicate names are passed on as-is.
    pub fn add_action(&self, entry: ActionEntry) {
        self.channel.send(
            Operation::ActionsAddAction,
            vec![
                entry.group.as_str().into(),
                entry.scope.as_str().into(),
                entry.name.as_str().into(),
                entry.label.as_str().into(),
                entry.mnemonic_label.as_deref().into(),
                entry.icon.as_deref().into(),
                entry.keybinding.as_deref().into(),
            ],
        );
        self.registered.borrow_mut().push(entry);
    }

    /// All actions added so far, in the order they were added.
    pub fn registered(&self) -> Vec<ActionEntry> {
        self.registered.borrow().clone()
    }

    /// Called when the host reports that the user activated an action.
    pub fn activate(&self, name: &ActionName) -> Result<(), EmitError> {
        self.emit(ACTION_ACTIVATED, name)
    }
}

impl Signaling for Actions {
    type Args = ActionName;

    fn signal_registry(&self) -> &SignalRegistry<Self, ActionName> {
        &self.signals
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{channel::RecordingChannel, message::HostMessage};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_action_message() {
        let channel = Rc::new(RecordingChannel::new());
        let actions = Actions::new(channel.clone());
        actions.add_action(ActionEntry::new("playback", "win", "stop", "Stop").with_icon("media-playback-stop"));
        actions.add_action(
            ActionEntry::new("app", "app", "quit", "Quit").with_mnemonic_label("_Quit").with_keybinding("<ctrl>Q"),
        );

        let messages = channel.take();
        insta::assert_snapshot!(
            messages[0].to_string(),
            @r#"Actions.addAction("playback","win","stop","Stop","","media-playback-stop","")"#
        );
        insta::assert_snapshot!(
            messages[1].to_string(),
            @r#"Actions.addAction("app","app","quit","Quit","_Quit","","<ctrl>Q")"#
        );
        assert_eq!(actions.registered().iter().map(|e| e.name.as_str()).collect::<Vec<_>>(), vec!["stop", "quit"]);
    }

    #[test]
    fn test_entry_display() {
        let plain = ActionEntry::new("playback", "win", "toggle-play", "Toggle play/pause");
        let with_icon = ActionEntry::new("playback", "win", "stop", "Stop").with_icon("media-playback-stop");
        assert_eq!(plain.to_string(), "playback.win.toggle-play\tToggle play/pause");
        assert_eq!(with_icon.to_string(), "playback.win.stop\tStop (media-playback-stop)");
    }

    #[test]
    fn test_duplicates_are_not_filtered() {
        let channel = Rc::new(RecordingChannel::new());
        let actions = Actions::new(channel.clone());
        actions.add_action(ActionEntry::new("playback", "win", "play", "Play"));
        actions.add_action(ActionEntry::new("playback", "win", "play", "Play"));
        assert_eq!(channel.len(), 2);
        assert_eq!(actions.registered().len(), 2);
    }

    #[test]
    fn test_activate_reaches_subscribers() {
        let channel = Rc::new(RecordingChannel::new());
        let actions = Actions::new(channel.clone());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_moved = seen.clone();
        actions
            .connect(
                ACTION_ACTIVATED,
                handler(move |_: &Actions, name: &ActionName| {
                    seen_moved.borrow_mut().push(name.clone());
                    Ok(())
                }),
            )
            .unwrap();

        actions.activate(&"next-song".into()).unwrap();
        actions.activate(&"whatever".into()).unwrap();
        assert_eq!(*seen.borrow(), vec![ActionName::from("next-song"), ActionName::from("whatever")]);
        assert!(channel.is_empty());
    }

    #[test]
    fn test_debug_handler_is_connected() {
        let actions = Actions::new(Rc::new(RecordingChannel::new()));
        assert_eq!(actions.signal_registry().handler_count(ACTION_ACTIVATED), Some(1));
    }

    #[test]
    fn test_recorded_message_equality() {
        let channel = Rc::new(RecordingChannel::new());
        Actions::new(channel.clone()).add_action(ActionEntry::new("g", "s", "n", "l"));
        assert_eq!(
            channel.take(),
            vec![HostMessage::new(
                Operation::ActionsAddAction,
                vec!["g".into(), "s".into(), "n".into(), "l".into(), "".into(), "".into(), "".into()]
            )]
        );
    }
}
