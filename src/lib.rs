//! pfetch library
//!
//! A pretty system information tool: a fixed set of host facts printed as
//! aligned, colorized `label: value` lines.

pub mod app;
pub mod collectors;
pub mod config;
pub mod data;
pub mod display;
pub mod error;
pub mod escape;
pub mod extension;
pub mod logging;
pub mod registry;
pub mod terminal;
pub mod utils;

pub use config::{Context, Settings};
pub use data::{Fact, FactStyle, HostIdentity, OsFamily};
pub use error::{PfetchError, Result};
pub use registry::{Builtin, Registry};
