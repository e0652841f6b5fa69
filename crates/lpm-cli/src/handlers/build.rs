use std::path::Path;

use anyhow::Result;

use lpm_settings::Context;

use super::{print_header, require_debug_mode};

pub struct BuildHandler;

impl BuildHandler {
    pub fn handle_build(ctx: &Context, folder: &Path) -> Result<()> {
        require_debug_mode(ctx, "build")?;
        print_header("build", &folder.display().to_string());
        let artifact = lpm_core::build_folder(ctx, folder)?;
        lpm_logger::finish(&format!("Package written to {}", artifact.display()));
        Ok(())
    }
}
