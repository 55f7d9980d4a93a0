pub mod aggregate;
pub mod analyst;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod report;
pub mod resolver;

#[cfg(test)]
mod test_helpers;
