//! Layered configuration: an optional `unpress.toml` (platform config
//! directory first, then the current directory) merged under `UNPRESS_*`
//! environment variables. Command-line flags override both.

use std::path::PathBuf;

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::Deserialize;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default output directory for converted posts.
    pub output_dir: Option<PathBuf>,
    /// Default root of the site images tree.
    pub images_dir: Option<PathBuf>,
    /// Hosts whose full-size-image link wrappers get unwrapped.
    pub media_hosts: Option<Vec<String>>,
    /// UTC offset appended to front-matter dates (e.g. "+0100").
    pub utc_offset: Option<String>,
    /// Convert rewritten HTML to Markdown by default.
    pub markdown: Option<bool>,
}

impl Settings {
    pub fn load() -> Result<Self, figment::Error> {
        let mut figment = Figment::new();
        if let Some(dirs) = ProjectDirs::from("", "", "unpress") {
            figment = figment.merge(Toml::file(dirs.config_dir().join("unpress.toml")));
        }
        figment.merge(Toml::file("unpress.toml")).merge(Env::prefixed("UNPRESS_")).extract()
    }
}
