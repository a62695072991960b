// src/logger.rs
//! Logging seam for the generation pipeline.
//!
//! The engine reports encoding degradations and skipped projects as
//! warnings that callers (and tests) need to observe, so logging goes
//! through a trait instead of straight to stderr.

use colored::Colorize;

pub trait Logger {
    fn debug(&mut self, message: &str);
    fn info(&mut self, message: &str);
    fn warn(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

/// Logger that writes to the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleLogger {
    pub verbose: bool,
}

impl ConsoleLogger {
    #[must_use]
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Logger for ConsoleLogger {
    fn debug(&mut self, message: &str) {
        if self.verbose {
            println!("{} {message}", "DEBUG".dimmed());
        }
    }

    fn info(&mut self, message: &str) {
        println!("{message}");
    }

    fn warn(&mut self, message: &str) {
        eprintln!("{} {message}", "WARN:".yellow().bold());
    }

    fn error(&mut self, message: &str) {
        eprintln!("{} {message}", "ERROR:".red().bold());
    }
}

/// Logger that records every message, for assertions in tests.
#[derive(Debug, Default)]
pub struct TestLogger {
    pub debug_messages: Vec<String>,
    pub info_messages: Vec<String>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl TestLogger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Logger for TestLogger {
    fn debug(&mut self, message: &str) {
        self.debug_messages.push(message.to_string());
    }

    fn info(&mut self, message: &str) {
        self.info_messages.push(message.to_string());
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}
