pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "The LeoConsole package manager";
pub const REPOSITORY_URL: &str = "https://github.com/alexcoder04/lpm";
pub const BIN_NAME: &str = "lpm";
pub const COMMANDS: &[(&str, &str, &[&str])] = &[
    ("install", "Installs or upgrades a package from the index", &["get", "i"]),
    ("remove", "Removes an installed package", &["uninstall", "r"]),
    ("update", "Upgrades all installed packages", &["upgrade", "u"]),
    ("reload", "Synchronizes the package index", &["sync", "s"]),
    ("list-installed", "Lists installed packages", &["l"]),
    ("list-available", "Lists packages in the index", &["a"]),
    ("search", "Searches the index by name and description", &["f"]),
    ("config", "Shows or changes the lpm configuration", &["conf", "cfg", "c"]),
    ("build", "Packs a folder into a package (debug mode)", &["b"]),
    ("get-local", "Installs a local package file (debug mode)", &["d"]),
    ("init", "Runs the startup sequence of the plugin", &[]),
    ("help", "Shows help information for lpm or a specific command", &["h"]),
];
pub const EXAMPLES: &[(&str, &str)] = &[
    ("lpm reload", "Synchronize the package index"),
    ("lpm install hello", "Install a package"),
    ("lpm update", "Upgrade all packages"),
    ("lpm remove hello", "Remove a package"),
    ("lpm config debugMode on", "Enable debug mode"),
    ("lpm build ./my-package", "Pack a folder (debug mode)"),
];

pub const DEFAULT_REPO: &str =
    "https://raw.githubusercontent.com/alexcoder04/LeoConsole-repo-main/main/index.json";
pub const USER_AGENT: &str = "lpm/0.1.0";
pub const MAX_ATTEMPTS: u32 = 4;

/// Name of the package that provides lpm itself.
pub const SELF_PACKAGE: &str = "lpm";

pub const CONFIG_FILE: &str = "config.json";
pub const INDEX_FILE: &str = "index.json";
pub const INSTALLED_FILE: &str = "installed.json";

pub const MANIFEST_FILE: &str = "manifest.json";
pub const PAYLOAD_DIR: &str = "files";
pub const PACKAGE_EXTENSION: &str = "lpkg";
