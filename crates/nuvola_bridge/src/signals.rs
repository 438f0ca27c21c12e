//! Named publish/subscribe signals that can be attached to any type.
//!
//! A type becomes signaling by owning a [`SignalRegistry`] and implementing [`Signaling`].
//! Signals must be registered by name before anything can be connected to or emitted on them.
//! Handlers are invoked synchronously, in the order they were connected, and always receive
//! the emitting object as their first argument.

use anyhow::Result;
use bridge_shared_util::SignalName;
use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

/// A subscriber to a signal. Handler identity (used by [`SignalRegistry::disconnect`]) is the
/// identity of the shared allocation, so keep a clone of the `Rc` around to disconnect later.
pub type Handler<S, A> = Rc<dyn Fn(&S, &A) -> Result<()>>;

/// Wrap a closure into a [`Handler`].
pub fn handler<S: ?Sized, A: ?Sized, F>(f: F) -> Handler<S, A>
where
    F: Fn(&S, &A) -> Result<()> + 'static,
{
    Rc::new(f)
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown signal '{0}'.")]
pub struct UnknownSignalError(pub SignalName);

#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error(transparent)]
    Unknown(#[from] UnknownSignalError),

    /// A handler failed. Handlers connected after it were not invoked.
    #[error("Handler of signal '{signal}' failed")]
    Handler {
        signal: SignalName,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

/// Per-object registry of signals and their ordered handler lists.
pub struct SignalRegistry<S: ?Sized, A: ?Sized> {
    signals: RefCell<HashMap<SignalName, Vec<Handler<S, A>>>>,
}

impl<S: ?Sized, A: ?Sized> Default for SignalRegistry<S, A> {
    fn default() -> Self {
        SignalRegistry { signals: RefCell::new(HashMap::new()) }
    }
}

impl<S: ?Sized, A: ?Sized> fmt::Debug for SignalRegistry<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let signals = self.signals.borrow();
        let mut map = f.debug_map();
        for (name, handlers) in signals.iter() {
            map.entry(&name.as_str(), &handlers.len());
        }
        map.finish()
    }
}

impl<S: ?Sized, A: ?Sized> SignalRegistry<S, A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty handler list for each of the given names.
    ///
    /// Registering a name that already exists resets it: all handlers connected to it are dropped.
    pub fn register<I, N>(&self, names: I)
    where
        I: IntoIterator<Item = N>,
        N: Into<SignalName>,
    {
        let mut signals = self.signals.borrow_mut();
        for name in names {
            let name = name.into();
            if let Some(old) = signals.insert(name.clone(), Vec::new()) {
                if !old.is_empty() {
                    log::warn!("Signal '{}' registered again, dropping {} connected handler(s)", name, old.len());
                }
            }
        }
    }

    /// Number of handlers connected to a signal, or `None` if the signal is not registered.
    pub fn handler_count(&self, name: &str) -> Option<usize> {
        self.signals.borrow().get(name).map(Vec::len)
    }

    /// Append a handler to the end of the handler list of a signal.
    /// The same handler may be connected more than once.
    pub fn connect(&self, name: &str, handler: Handler<S, A>) -> Result<(), UnknownSignalError> {
        let mut signals = self.signals.borrow_mut();
        let handlers = signals.get_mut(name).ok_or_else(|| UnknownSignalError(name.into()))?;
        handlers.push(handler);
        log::trace!("Connected handler to signal '{}' ({} connected)", name, handlers.len());
        Ok(())
    }

    /// Remove the first occurrence of `handler` from the handler list of a signal.
    /// Does nothing if the handler is not connected.
    pub fn disconnect(&self, name: &str, handler: &Handler<S, A>) -> Result<(), UnknownSignalError> {
        let mut signals = self.signals.borrow_mut();
        let handlers = signals.get_mut(name).ok_or_else(|| UnknownSignalError(name.into()))?;
        if let Some(index) = handlers.iter().position(|h| Rc::ptr_eq(h, handler)) {
            handlers.remove(index);
        }
        Ok(())
    }

    /// Invoke every handler of a signal in connection order, passing `source` as the emitter.
    ///
    /// The handler list is captured before the first handler runs, so handlers may connect or
    /// disconnect freely; such changes apply from the next emission on.
    /// The first failing handler stops the emission and its error is returned.
    pub fn emit(&self, source: &S, name: &str, args: &A) -> Result<(), EmitError> {
        let handlers = self.signals.borrow().get(name).cloned().ok_or_else(|| UnknownSignalError(name.into()))?;
        log::trace!("Emitting signal '{}' to {} handler(s)", name, handlers.len());
        for handler in handlers {
            handler(source, args).map_err(|err| EmitError::Handler { signal: name.into(), source: err.into() })?;
        }
        Ok(())
    }
}

/// Implemented by types that carry a [`SignalRegistry`] of their own.
///
/// All methods delegate to the registry and pass `self` as the emitting object.
pub trait Signaling {
    /// The arguments passed to handlers after the emitting object.
    type Args: ?Sized;

    fn signal_registry(&self) -> &SignalRegistry<Self, Self::Args>;

    fn register_signals<I, N>(&self, names: I)
    where
        I: IntoIterator<Item = N>,
        N: Into<SignalName>,
    {
        self.signal_registry().register(names)
    }

    fn connect(&self, name: &str, handler: Handler<Self, Self::Args>) -> Result<(), UnknownSignalError> {
        self.signal_registry().connect(name, handler)
    }

    fn disconnect(&self, name: &str, handler: &Handler<Self, Self::Args>) -> Result<(), UnknownSignalError> {
        self.signal_registry().disconnect(name, handler)
    }

    fn emit(&self, name: &str, args: &Self::Args) -> Result<(), EmitError> {
        self.signal_registry().emit(self, name, args)
    }
}
