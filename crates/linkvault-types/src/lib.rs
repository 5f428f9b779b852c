//! Types shared between the linkvault storage, api and server crates.

pub mod api;
pub mod models;
pub mod platform;

pub use platform::Platform;
