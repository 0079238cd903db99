//! Fact providers
//!
//! Each provider inspects the host and returns at most one [`Fact`].
//! Failures never escape a provider: they are logged at debug level and
//! the fact is omitted or shows a placeholder.
//!
//! [`Fact`]: crate::data::Fact

pub mod desktop;
pub mod hardware;
pub mod packages;
pub mod palette;
pub mod system;
