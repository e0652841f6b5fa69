mod commands;
mod handlers;

use std::path::PathBuf;

use clap::Parser;

use commands::{Cli, Commands};
use handlers::{
    BuildHandler, ConfigHandler, HelpHandler, InitHandler, InstallHandler, ListHandler,
    RemoveHandler, SearchHandler, SyncHandler, UpdateHandler,
};
use lpm_settings::{Config, Context, Folders};

pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    lpm_logger::init_logger(false);

    // Help never touches the folders or the config file.
    let command = match cli.command {
        None => return HelpHandler::handle_help(None),
        Some(Commands::Help { command }) => return HelpHandler::handle_help(command.as_deref()),
        Some(command) => command,
    };

    let mut ctx = load_context(cli.save_path, cli.download_path)?;

    match command {
        Commands::Install { package } => InstallHandler::handle_install(&ctx, &package),
        Commands::Remove { package } => RemoveHandler::handle_remove(&ctx, &package),
        Commands::Update => UpdateHandler::handle_update(&ctx),
        Commands::Reload => SyncHandler::handle_reload(&ctx),
        Commands::ListInstalled => ListHandler::handle_list_installed(&ctx),
        Commands::ListAvailable => ListHandler::handle_list_available(&ctx),
        Commands::Search { terms } => SearchHandler::handle_search(&ctx, &terms),
        Commands::Config { key, value } => {
            ConfigHandler::handle_config(&mut ctx, key.as_deref(), value.as_deref())
        }
        Commands::Build { path } => BuildHandler::handle_build(&ctx, &path),
        Commands::GetLocal { path } => InstallHandler::handle_get_local(&ctx, &path),
        Commands::Init => InitHandler::handle_init(&mut ctx),
        Commands::Help { command } => HelpHandler::handle_help(command.as_deref()),
    }
}

fn load_context(
    save_path: Option<PathBuf>,
    download_path: Option<PathBuf>,
) -> anyhow::Result<Context> {
    let save_path = save_path
        .or_else(|| dirs::data_dir().map(|d| d.join("LeoConsole")))
        .ok_or_else(|| anyhow::anyhow!("cannot determine the save path, pass --save-path"))?;
    let download_path = download_path
        .or_else(|| dirs::cache_dir().map(|d| d.join("LeoConsole")))
        .ok_or_else(|| {
            anyhow::anyhow!("cannot determine the download path, pass --download-path")
        })?;

    let folders = Folders::from_host(&save_path, &download_path);
    folders.create_all()?;

    let config = Config::load(&folders.config_file()).unwrap_or_else(|e| {
        lpm_logger::warn(&format!("{e}, using default settings"));
        Config::default()
    });

    Ok(Context::new(config, folders))
}
