use derive_more::{AsRef, Debug, Display, From, FromStr};
use serde::{Deserialize, Serialize};

/// The name of a signal registered on a signaling object
#[derive(Clone, Hash, PartialEq, Eq, Serialize, Deserialize, AsRef, From, FromStr, Display, Debug)]
#[debug("SignalName({})", _0)]
pub struct SignalName(pub String);

impl SignalName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for SignalName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SignalName {
    fn from(s: &str) -> Self {
        SignalName(s.to_owned())
    }
}

/// The identifier of a host-visible action, such as `play` or `next-song`
#[derive(Clone, Hash, PartialEq, Eq, Serialize, Deserialize, AsRef, From, FromStr, Display, Debug)]
#[debug("ActionName({})", _0)]
pub struct ActionName(pub String);

impl ActionName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for ActionName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ActionName {
    fn from(s: &str) -> Self {
        ActionName(s.to_owned())
    }
}

impl PartialEq<str> for ActionName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
