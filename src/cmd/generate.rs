//! `surveyor generate`: validate a survey, render its page, list it.

use anyhow::Result;
use colored::Colorize;

use surveyor::config::Config;
use surveyor::index::{self, IndexEntry, JsonIndexStore};
use surveyor::site::{self, PageGenerator};
use surveyor::survey;
use surveyor::ui;
use surveyor::validation::{self, Validation};

pub fn cmd_generate(id: &str, config: &Config) -> Result<i32> {
    if !survey::is_valid_id(id) {
        anyhow::bail!(
            "Invalid survey id '{}': expected lowercase words joined by dashes (e.g. sleep-habits)",
            id
        );
    }

    let path = survey::survey_path(&config.surveys_dir(), id);
    if !path.exists() {
        anyhow::bail!("Survey file not found: {}", path.display());
    }

    let checker = super::load_schema(config)?;
    let (value, outcome) = validation::validate_file(&path, &checker, &config.rules)?;

    let Validation::Checked {
        doc,
        score,
        diagnostics,
    } = &outcome
    else {
        super::validate::print_text(&outcome, config);
        eprintln!("{} Page not generated for {}", "✗".red(), id.cyan());
        return Ok(1);
    };

    if diagnostics.has_errors() {
        super::validate::print_text(&outcome, config);
        eprintln!("{} Page not generated for {}", "✗".red(), id.cyan());
        return Ok(1);
    }

    for warning in diagnostics.iter() {
        println!("  {}", warning.display_line());
    }

    let page_doc = site::clamp_sample_size(
        doc,
        config.rules.min_sample_size,
        config.rules.max_sample_size,
    );
    let generator = PageGenerator::new()?.with_lang(&config.site.lang);
    let page = generator.write(id, &page_doc, score, &config.output_dir())?;

    let store = JsonIndexStore::new(config.index_path());
    let recorded = index::record(&store, IndexEntry::from_value(id, &value))?;

    if !ui::is_quiet() {
        println!(
            "{} Generated {} ({})",
            ui::verdict_icon(true),
            id.cyan(),
            page.display()
        );
        let action = if recorded.replaced { "Updated" } else { "Added" };
        println!(
            "  {} {} in {} ({} surveys listed)",
            "→".cyan(),
            action,
            store.path().display(),
            recorded.index.total_count
        );
    }

    Ok(0)
}
