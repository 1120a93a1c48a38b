//! This module contains code relevant to the server's runtime, such as signal
//! handlers or [`Config`].

pub mod signals;

mod config;
pub use config::{Config, DocSource, ParseDocSourceError};
