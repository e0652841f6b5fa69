use anyhow::Result;
use owo_colors::OwoColorize;

use lpm_settings::Context;
use lpm_settings::config::CONFIG_KEYS;

pub struct ConfigHandler;

impl ConfigHandler {
    pub fn handle_config(ctx: &mut Context, key: Option<&str>, value: Option<&str>) -> Result<()> {
        match (key, value) {
            (None, _) => {
                for key in CONFIG_KEYS {
                    Self::show(ctx, key)?;
                }
            }
            (Some(key), None) => Self::show(ctx, key)?,
            (Some(key), Some(value)) => {
                ctx.config.set(key, value)?;
                ctx.config.save(&ctx.folders.config_file())?;
                lpm_logger::success(&format!("{key} = {}", ctx.config.get(key)?));
            }
        }
        Ok(())
    }

    fn show(ctx: &Context, key: &str) -> Result<()> {
        let value = ctx.config.get(key)?;
        println!("{} = {}", key.bright_cyan().bold(), value.bright_white());
        Ok(())
    }
}
