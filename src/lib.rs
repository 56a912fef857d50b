pub mod config;
pub mod content;
pub mod domain;
pub mod filters;
pub mod handlers;
pub mod layout;
pub mod logging;
pub mod navigator;
pub mod paths;
pub mod session;
pub mod state;

#[cfg(test)]
pub mod testing;
