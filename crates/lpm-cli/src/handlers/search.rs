use anyhow::Result;
use owo_colors::OwoColorize;

use lpm_settings::Context;

pub struct SearchHandler;

impl SearchHandler {
    pub fn handle_search(ctx: &Context, terms: &[String]) -> Result<()> {
        let matches = lpm_core::search(ctx, terms)?;
        if matches.is_empty() {
            lpm_logger::info(&format!("No packages match '{}'", terms.join(" ")));
            return Ok(());
        }

        for entry in matches {
            println!(
                "{} {}",
                entry.name.bright_cyan().bold(),
                entry.version.bright_black()
            );
            if let Some(description) = entry.description {
                println!("    {description}");
            }
        }
        Ok(())
    }
}
