pub mod config;
pub mod conflict;
pub mod discovery;
pub mod error;
pub mod escape;
pub mod generator;
pub mod logger;
pub mod project;
pub mod report;
pub mod validity;
pub mod writer;
