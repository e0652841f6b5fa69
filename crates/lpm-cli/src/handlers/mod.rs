pub mod build;
pub mod config;
pub mod help;
pub mod init;
pub mod install;
pub mod list;
pub mod remove;
pub mod search;
pub mod sync;
pub mod update;

pub use build::BuildHandler;
pub use config::ConfigHandler;
pub use help::HelpHandler;
pub use init::InitHandler;
pub use install::InstallHandler;
pub use list::ListHandler;
pub use remove::RemoveHandler;
pub use search::SearchHandler;
pub use sync::SyncHandler;
pub use update::UpdateHandler;

use owo_colors::OwoColorize;

use lpm_constants::BIN_NAME;
use lpm_settings::Context;

pub(crate) fn print_header(command: &str, args: &str) {
    println!(
        "{} {} {}",
        BIN_NAME.bright_cyan().bold(),
        command.bright_white(),
        args.bright_white()
    );
    println!();
}

pub(crate) fn require_debug_mode(ctx: &Context, command: &str) -> anyhow::Result<()> {
    if ctx.debug() {
        Ok(())
    } else {
        anyhow::bail!(
            "'{command}' is only available in debug mode, enable it with '{BIN_NAME} config debugMode on'"
        )
    }
}
