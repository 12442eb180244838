//! CLI command implementations.

pub mod dispatch;
pub mod heartbeat;
pub mod init;
pub mod serve;
