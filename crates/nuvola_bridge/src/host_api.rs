//! Host-side notification and tray icon surfaces. Every call maps to exactly one message.

use bridge_shared_util::ActionName;
use std::rc::Rc;

use crate::{
    channel::MessageChannel,
    message::{MessageArg, Operation},
};

#[derive(Clone)]
pub struct Notification {
    channel: Rc<dyn MessageChannel>,
}

impl Notification {
    pub fn new(channel: Rc<dyn MessageChannel>) -> Self {
        Notification { channel }
    }

    pub fn update(&self, title: &str, text: &str, icon_name: Option<&str>, icon_url: Option<&str>) {
        self.channel.send(Operation::NotificationUpdate, vec![title.into(), text.into(), icon_name.into(), icon_url.into()]);
    }

    pub fn show(&self) {
        self.channel.send(Operation::NotificationShow, Vec::new());
    }
}

#[derive(Clone)]
pub struct TrayIcon {
    channel: Rc<dyn MessageChannel>,
}

impl TrayIcon {
    pub fn new(channel: Rc<dyn MessageChannel>) -> Self {
        TrayIcon { channel }
    }

    pub fn set_tooltip(&self, tooltip: Option<&str>) {
        self.channel.send(Operation::TrayIconSetTooltip, vec![tooltip.into()]);
    }

    pub fn set_actions(&self, actions: &[ActionName]) {
        let actions = actions.iter().map(|a| a.0.clone()).collect::<Vec<_>>();
        self.channel.send(Operation::TrayIconSetActions, vec![MessageArg::List(actions)]);
    }
}
