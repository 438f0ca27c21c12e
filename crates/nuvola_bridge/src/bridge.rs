use anyhow::{Context, Result};
use bridge_shared_util::ActionName;
use serde::{Deserialize, Serialize};
use std::{
    cell::{Ref, RefCell, RefMut},
    fmt,
    rc::Rc,
};

use crate::{
    actions::Actions,
    channel::MessageChannel,
    config::BridgeConfig,
    player::{PlaybackControl, Player, PlayerSnapshot},
    signals::{SignalRegistry, Signaling},
};

/// Emitted when the host navigates back to the home page of the web app.
pub const HOME_PAGE: &str = "home-page";

/// Events delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostEvent {
    ActionActivated { name: ActionName },
    HomePage,
    PlayerChanged(PlayerSnapshot),
}

/// Owns everything that talks to the host: the action dispatcher and the player, both sharing one message channel.
pub struct Bridge {
    actions: Rc<Actions>,
    player: RefCell<Player>,
    signals: SignalRegistry<Bridge, ()>,
}

impl fmt::Debug for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("actions", &self.actions)
            .field("player", &*self.player.borrow())
            .field("signals", &self.signals)
            .finish()
    }
}

impl Bridge {
    pub fn new(config: &BridgeConfig, channel: Rc<dyn MessageChannel>, control: Rc<dyn PlaybackControl>) -> Self {
        let actions = Rc::new(Actions::new(channel.clone()));
        let player = Player::new(actions.clone(), channel, control, config);
        let bridge = Bridge { actions, player: RefCell::new(player), signals: SignalRegistry::new() };
        bridge.register_signals([HOME_PAGE]);
        bridge
    }

    pub fn actions(&self) -> &Rc<Actions> {
        &self.actions
    }

    pub fn player(&self) -> Ref<'_, Player> {
        self.player.borrow()
    }

    pub fn player_mut(&self) -> RefMut<'_, Player> {
        self.player.borrow_mut()
    }

    /// Register the playback actions with the host and push the initial player state.
    pub fn start(&self) -> Result<()> {
        let mut player = self.player.borrow_mut();
        player.init();
        player.update().context("Failed to run initial player update")?;
        Ok(())
    }

    pub fn handle_event(&self, event: HostEvent) -> Result<()> {
        log::debug!("<- {:?}", event);
        match event {
            HostEvent::ActionActivated { name } => {
                self.actions.activate(&name).with_context(|| format!("Failed to handle activation of action '{}'", name))?;
            }
            HostEvent::HomePage => {
                self.emit(HOME_PAGE, &()).context("Failed to handle home page event")?;
            }
            HostEvent::PlayerChanged(snapshot) => {
                let mut player = self.player.borrow_mut();
                player.apply_snapshot(snapshot);
                player.update().context("Failed to update player")?;
            }
        }
        Ok(())
    }
}

impl Signaling for Bridge {
    type Args = ();

    fn signal_registry(&self) -> &SignalRegistry<Self, ()> {
        &self.signals
    }
}
