pub mod cli;
pub mod config;
pub mod engine;
pub mod extract;
pub mod pipeline;
pub mod questions;
pub mod report;
pub mod util;
