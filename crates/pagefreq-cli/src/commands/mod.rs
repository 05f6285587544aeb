//! CLI subcommands.

pub mod aggregate;
pub mod compare;
pub mod count;
pub mod top;

use std::path::Path;

use pagefreq_core::PagefreqConfig;

pub(crate) fn load_config(config_path: Option<&str>) -> anyhow::Result<PagefreqConfig> {
    match config_path {
        Some(path) => Ok(PagefreqConfig::from_file(Path::new(path))?),
        None => Ok(PagefreqConfig::default()),
    }
}
