use anyhow::Result;

use lpm_settings::Context;

pub struct SyncHandler;

impl SyncHandler {
    pub fn handle_reload(ctx: &Context) -> Result<()> {
        let count = lpm_core::reload(ctx)?;
        lpm_logger::finish(&format!("Package index contains {count} packages"));
        Ok(())
    }
}
