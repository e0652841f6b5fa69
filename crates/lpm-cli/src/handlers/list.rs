use anyhow::Result;
use owo_colors::OwoColorize;

use lpm_settings::Context;

pub struct ListHandler;

impl ListHandler {
    pub fn handle_list_installed(ctx: &Context) -> Result<()> {
        let packages = lpm_core::list_installed(ctx)?;
        if packages.is_empty() {
            lpm_logger::info("No packages installed");
            return Ok(());
        }

        for pkg in packages {
            println!("{} {}", pkg.name.bright_cyan().bold(), pkg.version.bright_black());
        }
        Ok(())
    }

    pub fn handle_list_available(ctx: &Context) -> Result<()> {
        let packages = lpm_core::list_available(ctx)?;
        if packages.is_empty() {
            lpm_logger::info("The package index is empty, run 'lpm reload'");
            return Ok(());
        }

        for pkg in packages {
            let marker = match pkg.installed.as_deref() {
                Some(local) if pkg.upgradable() => {
                    format!("[upgradable from {local}]").bright_yellow().to_string()
                }
                Some(_) => "[installed]".bright_green().to_string(),
                None => String::new(),
            };
            println!(
                "{} {} {}",
                pkg.entry.name.bright_cyan().bold(),
                pkg.entry.version.bright_black(),
                marker
            );
            if let Some(description) = &pkg.entry.description {
                println!("    {description}");
            }
        }
        Ok(())
    }
}
