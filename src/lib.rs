use std::error::Error as StdError;
use std::fmt;

mod dom;
mod extension;
mod html;
mod params;
mod scope;
mod selector;

#[cfg(test)]
mod tests;

pub use dom::{Document, DomQuery, NodeId};
pub use extension::{
    CONFIG_REQUEST, Extension, ExtensionHandle, ExtensionRegistry, RequestEvent, ScopedInputs,
};
pub use params::Params;
pub use scope::{ScopeConfig, ScopeMode, resolve};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    UnsupportedSelector(String),
    InvalidNode(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::InvalidNode(msg) => write!(f, "invalid node: {msg}"),
        }
    }
}

impl StdError for Error {}
