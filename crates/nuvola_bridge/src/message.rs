use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operations understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum Operation {
    #[strum(serialize = "Notification.update")]
    NotificationUpdate,
    #[strum(serialize = "Notification.show")]
    NotificationShow,
    #[strum(serialize = "TrayIcon.setTooltip")]
    TrayIconSetTooltip,
    #[strum(serialize = "TrayIcon.setActions")]
    TrayIconSetActions,
    #[strum(serialize = "Actions.addAction")]
    ActionsAddAction,
}

/// A single positional argument of a [`HostMessage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageArg {
    Text(String),
    List(Vec<String>),
}

impl From<&str> for MessageArg {
    fn from(s: &str) -> Self {
        MessageArg::Text(s.to_owned())
    }
}

impl From<String> for MessageArg {
    fn from(s: String) -> Self {
        MessageArg::Text(s)
    }
}

impl From<Option<&str>> for MessageArg {
    fn from(s: Option<&str>) -> Self {
        MessageArg::Text(s.unwrap_or_default().to_owned())
    }
}

impl From<Vec<String>> for MessageArg {
    fn from(list: Vec<String>) -> Self {
        MessageArg::List(list)
    }
}

impl fmt::Display for MessageArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageArg::Text(s) => write!(f, "{:?}", s),
            MessageArg::List(list) => write!(f, "[{}]", list.iter().map(|s| format!("{:?}", s)).join(",")),
        }
    }
}

/// A one-way message to the host: an operation name followed by positional arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostMessage {
    pub operation: String,
    pub args: Vec<MessageArg>,
}

impl HostMessage {
    pub fn new(operation: Operation, args: Vec<MessageArg>) -> Self {
        HostMessage { operation: operation.to_string(), args }
    }

    pub fn is(&self, operation: Operation) -> bool {
        self.operation == operation.to_string()
    }
}

/// Renders like a call, i.e. `TrayIcon.setTooltip("A by B")`.
impl fmt::Display for HostMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.operation, self.args.iter().join(","))
    }
}
