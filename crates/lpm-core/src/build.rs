use std::path::{Path, PathBuf};

use lpm_error::{LpmError, Result};
use lpm_settings::Context;
use lpm_store::pack_folder;

pub struct BuildManager<'a> {
    ctx: &'a Context,
}

impl<'a> BuildManager<'a> {
    pub const fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// Packs a package source folder into the temp folder and returns the
    /// artifact path. The result can be installed with `install_local`.
    pub fn build_folder(&self, path: &Path) -> Result<PathBuf> {
        if !self.ctx.config.debug_mode {
            return Err(LpmError::Build(
                "building packages is only available in debug mode".to_string(),
            ));
        }

        lpm_logger::status(&format!("Building {}...", path.display()));

        let packed = pack_folder(path, &self.ctx.folders.temp)
            .map_err(|e| LpmError::Build(format!("{}: {e}", path.display())))?;

        lpm_logger::debug(
            &format!(
                "Packed {} files of {}@{} (sha256 {})",
                packed.file_count, packed.manifest.name, packed.manifest.version, packed.sha256
            ),
            self.ctx.debug(),
        );
        Ok(packed.path)
    }
}
