use std::path::PathBuf;

use clap::Parser;

use crate::config::{default_config_path, load_or_create_config, Config};
use crate::error::CoreResult;

#[derive(Debug, Parser)]
#[command(
    name = "jqlive",
    version,
    about = "Edit a jq filter with a live, highlighted preview and copy the result"
)]
pub struct Args {
    /// JSON document to filter. Reads stdin when omitted or `-`.
    pub file: Option<PathBuf>,

    /// Config file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Filter engine executable, overriding the config.
    #[arg(long = "jq", env = "JQLIVE_JQ", value_name = "PATH")]
    pub jq: Option<String>,

    /// Print the shorthand table and exit.
    #[arg(long)]
    pub list_shorthands: bool,

    /// Evaluate one filter without the terminal UI and commit its result.
    #[arg(short, long, value_name = "FILTER")]
    pub query: Option<String>,

    /// With --query, write the result to stdout instead of the clipboard.
    #[arg(long, requires = "query")]
    pub print: bool,
}

impl Args {
    /// Loads the config file (creating it if missing) and applies overrides.
    pub fn load_config(&self) -> CoreResult<Config> {
        let path = self.config.clone().or_else(default_config_path);
        let config = match path {
            Some(path) => load_or_create_config(&path)?,
            None => {
                tracing::warn!("no config directory; using defaults");
                Config::default()
            }
        };
        Ok(match &self.jq {
            Some(jq) => config.with_executable(jq.as_str()),
            None => config,
        })
    }
}
