//! Port traits at the seams between the core and its collaborators.

pub mod config_port;
pub mod data_port;
pub mod report_port;
pub mod usage_port;
