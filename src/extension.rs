use crate::dom::{DomQuery, NodeId};
use crate::params::Params;
use crate::scope::{ScopeConfig, ScopeMode, resolve};

/// Event name the host raises while assembling a request's parameters.
pub const CONFIG_REQUEST: &str = "config-request";

/// One request-configuration event, borrowed from the host for the duration
/// of a single dispatch.
#[derive(Debug)]
pub struct RequestEvent<'a> {
    /// Element that initiated the request.
    pub trigger: NodeId,
    /// Element the response is destined for.
    pub target: NodeId,
    /// The request's outgoing parameter set; extensions merge into it.
    pub params: &'a mut Params,
}

/// A host-library extension: a single event-handling entry point.
pub trait Extension {
    fn on_event(&self, name: &str, dom: &dyn DomQuery, event: &mut RequestEvent<'_>);
}

/// Handle returned by [`ExtensionRegistry::define`], addressing one
/// registered extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionHandle(usize);

/// Explicit registry standing in for the host library's process-wide
/// extension table. Registration happens once at startup; dispatch fans each
/// event out to every registered extension in definition order.
#[derive(Default)]
pub struct ExtensionRegistry {
    entries: Vec<(String, Box<dyn Extension>)>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an extension under `name`, replacing any previous extension
    /// with the same name.
    pub fn define(&mut self, name: &str, extension: Box<dyn Extension>) -> ExtensionHandle {
        if let Some(pos) = self.entries.iter().position(|(n, _)| n == name) {
            self.entries[pos].1 = extension;
            return ExtensionHandle(pos);
        }
        self.entries.push((name.to_string(), extension));
        ExtensionHandle(self.entries.len() - 1)
    }

    pub fn dispatch(&self, name: &str, dom: &dyn DomQuery, event: &mut RequestEvent<'_>) {
        for (_, extension) in &self.entries {
            extension.on_event(name, dom, event);
        }
    }

    pub fn dispatch_to(
        &self,
        handle: ExtensionHandle,
        name: &str,
        dom: &dyn DomQuery,
        event: &mut RequestEvent<'_>,
    ) {
        if let Some((_, extension)) = self.entries.get(handle.0) {
            extension.on_event(name, dom, event);
        }
    }
}

/// The scoped-inputs extension: runs the scope resolver when the host
/// configures an outgoing request.
#[derive(Debug, Clone, Default)]
pub struct ScopedInputs {
    config: ScopeConfig,
}

impl ScopedInputs {
    pub fn new(mode: ScopeMode) -> Self {
        Self {
            config: ScopeConfig::with_mode(mode),
        }
    }

    pub fn with_config(config: ScopeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScopeConfig {
        &self.config
    }
}

impl Extension for ScopedInputs {
    fn on_event(&self, name: &str, dom: &dyn DomQuery, event: &mut RequestEvent<'_>) {
        if name == CONFIG_REQUEST {
            resolve(dom, event.trigger, event.params, &self.config);
        }
    }
}
