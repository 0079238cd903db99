//! Plain data types shared by collectors and the renderer

mod fact;
mod host;

pub use fact::{Fact, FactStyle};
pub use host::{HostIdentity, OsFamily};
