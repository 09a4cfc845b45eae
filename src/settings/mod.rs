//! Layered settings: a TOML file, then `STORES__*` environment variables,
//! then `DATABASE_URL`.

mod cli;
pub use clap::Parser;
pub use cli::*;

mod settings;
pub use settings::*;
