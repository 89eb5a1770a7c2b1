pub mod config;
pub mod diag;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod runinfo;
pub mod vds;
pub mod window;
