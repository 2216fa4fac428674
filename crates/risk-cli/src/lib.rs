//! CLI library components for the risk report viewer.

pub mod logging;
pub mod render;
pub mod request;
