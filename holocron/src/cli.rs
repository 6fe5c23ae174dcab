//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use holocron_core::BrowserConfig;

#[derive(Parser, Debug)]
#[command(
    name = "holocron",
    version,
    about = "Browse Star Wars characters, films, starships and vehicles",
    after_help = "Examples:\n  holocron\n  holocron --favorites ~/.holocron/favorites.json\n  echo '#search luke' | holocron --headless"
)]
pub struct Args {
    /// API root, e.g. https://swapi.dev/api
    #[arg(long, env = "SWAPI_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// Persist favorites to this JSON file
    #[arg(long, env = "HOLOCRON_FAVORITES", value_name = "FILE")]
    pub favorites: Option<PathBuf>,

    /// Write logs to this file (the TUI never logs to the terminal)
    #[arg(long, env = "HOLOCRON_LOG_FILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Read `#` commands from stdin instead of starting the TUI
    #[arg(long)]
    pub headless: bool,
}

impl Args {
    pub fn browser_config(&self) -> BrowserConfig {
        let mut config = BrowserConfig::new();
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url.clone());
        }
        if let Some(path) = &self.favorites {
            config = config.with_favorites_path(path.clone());
        }
        config
    }
}
