use super::Parser;

#[derive(Parser, Debug)]
#[command(name = "stores-api", version, about = "Stores REST API server")]
pub struct Cli {
    /// Path of the TOML settings file.
    #[arg(long)]
    pub settings: Option<String>,
}
