pub mod config;
pub mod export;
pub mod init;
pub mod log;
pub mod set;
pub mod show;
pub mod split;
pub mod types;
pub mod verify;
