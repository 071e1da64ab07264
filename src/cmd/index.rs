//! `surveyor rebuild-index`: regenerate the survey list from disk.

use anyhow::Result;
use colored::Colorize;

use surveyor::config::Config;
use surveyor::index::{self, JsonIndexStore};
use surveyor::ui;

pub fn cmd_rebuild_index(config: &Config) -> Result<i32> {
    let store = JsonIndexStore::new(config.index_path());
    let index = index::rebuild_into(&store, &config.surveys_dir())?;

    if !ui::is_quiet() {
        println!(
            "{} Rebuilt {} ({} surveys)",
            ui::verdict_icon(true),
            store.path().display().to_string().cyan(),
            index.total_count
        );
    }

    Ok(0)
}
