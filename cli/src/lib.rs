pub mod cmd;
pub mod config;
pub mod interactive;
pub mod util;
