use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lpm")]
#[command(version)]
#[command(propagate_version = true)]
#[command(about = "The LeoConsole package manager", long_about = None)]
#[command(disable_help_flag = true)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// LeoConsole save path (install root and config)
    #[arg(long, global = true, value_name = "DIR")]
    pub save_path: Option<PathBuf>,
    /// LeoConsole download path (package staging)
    #[arg(long, global = true, value_name = "DIR")]
    pub download_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Installs or upgrades a package from the index
    #[command(aliases = ["get", "i"])]
    Install {
        /// Name of the package
        package: String,
    },
    /// Removes an installed package
    #[command(aliases = ["uninstall", "r"])]
    Remove {
        /// Name of the package
        package: String,
    },
    /// Upgrades all installed packages
    #[command(aliases = ["upgrade", "u"])]
    Update,
    /// Synchronizes the package index
    #[command(aliases = ["sync", "s"])]
    Reload,
    /// Lists installed packages
    #[command(alias = "l")]
    ListInstalled,
    /// Lists packages in the index
    #[command(alias = "a")]
    ListAvailable,
    /// Searches the index by name and description
    #[command(alias = "f")]
    Search {
        /// Every term must match
        #[arg(required = true)]
        terms: Vec<String>,
    },
    /// Shows or changes the lpm configuration
    #[command(aliases = ["conf", "cfg", "c"])]
    Config {
        /// Setting to show or change (firstRun, debugMode, repositoryUrl)
        key: Option<String>,
        /// New value for the setting
        value: Option<String>,
    },
    /// Packs a folder into a package (debug mode)
    #[command(alias = "b")]
    Build {
        /// Package source folder containing manifest.json and files/
        path: PathBuf,
    },
    /// Installs a local package file (debug mode)
    #[command(alias = "d")]
    GetLocal {
        /// Path to a .lpkg file
        path: PathBuf,
    },
    /// Runs the startup sequence of the plugin
    Init,
    /// Shows help information for lpm or a specific command
    #[command(alias = "h")]
    Help {
        /// The command to show help for (optional)
        command: Option<String>,
    },
}
