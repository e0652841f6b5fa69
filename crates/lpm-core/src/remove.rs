use lpm_error::{LpmError, Result};
use lpm_local::LocalRegistry;
use lpm_settings::Context;
use lpm_store::remove_files;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed { version: String },
    NotInstalled,
}

pub struct RemoveManager<'a> {
    ctx: &'a Context,
}

impl<'a> RemoveManager<'a> {
    pub const fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// Deletes the files of `name`, then forgets it. Unknown names are a no-op.
    pub fn remove(&self, name: &str) -> Result<RemoveOutcome> {
        let mut registry = LocalRegistry::load(&self.ctx.folders.installed_file())?;

        let Some(entry) = registry.get(name).cloned() else {
            lpm_logger::debug(&format!("{name} is not installed"), self.ctx.debug());
            return Ok(RemoveOutcome::NotInstalled);
        };

        lpm_logger::status(&format!("Removing {name}@{}...", entry.version));
        lpm_logger::debug(
            &format!("Deleting {} files of {name}", entry.files.len()),
            self.ctx.debug(),
        );

        let failed = remove_files(&self.ctx.folders.root, &entry.files);
        if !failed.is_empty() {
            // Keep the package registered with exactly the files still on disk.
            let remaining = failed.iter().map(|(rel, _)| rel.clone()).collect();
            registry.record_installed(name, &entry.version, remaining, entry.integrity.clone())?;
            let details: Vec<String> = failed
                .iter()
                .map(|(rel, e)| format!("{rel}: {e}"))
                .collect();
            return Err(LpmError::Io(format!(
                "cannot remove files of {name}: {}",
                details.join(", ")
            )));
        }
        registry.remove(name)?;

        Ok(RemoveOutcome::Removed {
            version: entry.version,
        })
    }
}
