mod cli;

pub use cli::CliEngine;
