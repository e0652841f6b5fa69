use anyhow::Result;
use clap::CommandFactory;
use owo_colors::OwoColorize;

use crate::commands::Cli;
use lpm_constants::{BIN_NAME, COMMANDS, DESCRIPTION, EXAMPLES, REPOSITORY_URL, VERSION};

pub struct HelpHandler;

impl HelpHandler {
    pub fn handle_help(command: Option<&str>) -> Result<()> {
        match command {
            Some(cmd) => Self::show_command_help(cmd),
            None => {
                Self::show_overview();
                Ok(())
            }
        }
    }

    fn show_command_help(command: &str) -> Result<()> {
        let mut cli = Cli::command();
        // Aliases resolve to their command, so `lpm help i` works too.
        let name = resolve_alias(command).unwrap_or(command);

        if let Some(subcommand) = cli.find_subcommand_mut(name) {
            subcommand.print_help()?;
        } else {
            println!(
                "{}: Unknown command '{}'",
                "Error".bright_red().bold(),
                command
            );
            println!();
            Self::show_overview();
        }

        println!();
        Ok(())
    }

    fn show_overview() {
        println!("{}", DESCRIPTION.bright_white().bold());
        println!(
            "{} {}",
            "Version:".bright_white().bold(),
            VERSION.bright_black().bold()
        );
        println!();

        println!("{}", "Usage:".bright_magenta().bold());
        println!(
            "  {} {} {}",
            BIN_NAME.bright_cyan().bold(),
            "<COMMAND>".bright_white(),
            "[ARGS]".bright_black().bold()
        );
        println!();

        println!("{}", "Commands:".bright_magenta().bold());
        let labels: Vec<(String, String)> = COMMANDS
            .iter()
            .map(|(cmd, _, aliases)| {
                let alias_str = if aliases.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", aliases.join(", "))
                };
                ((*cmd).to_string(), alias_str)
            })
            .collect();
        let width = labels
            .iter()
            .map(|(cmd, aliases)| cmd.len() + aliases.len())
            .max()
            .unwrap_or(0);

        for ((cmd, aliases), (_, desc, _)) in labels.iter().zip(COMMANDS) {
            let padding = width - (cmd.len() + aliases.len());
            println!(
                "  {}{}{}  # {}",
                cmd.bright_cyan().bold(),
                aliases.bright_black().bold(),
                " ".repeat(padding),
                desc.bright_black().bold()
            );
        }
        println!();

        println!("{}", "Options:".bright_magenta().bold());
        for (flag, desc) in [
            ("--save-path <DIR>", "LeoConsole save path"),
            ("--download-path <DIR>", "LeoConsole download path"),
            ("-V, --version", "Print version"),
        ] {
            println!(
                "  {}{}  # {}",
                flag.bright_cyan().bold(),
                " ".repeat(22 - flag.len()),
                desc.bright_black().bold()
            );
        }
        println!();

        Self::show_examples();
    }

    fn show_examples() {
        println!("{}", "Examples:".bright_magenta().bold());
        let width = EXAMPLES.iter().map(|(cmd, _)| cmd.len()).max().unwrap_or(0);

        for (cmd, desc) in EXAMPLES {
            let padding = width - cmd.len();
            println!(
                "  {}{}  # {}",
                colorize_example(cmd),
                " ".repeat(padding),
                desc.bright_black().bold()
            );
        }

        println!();
        println!(
            "{} {} {}",
            "For more information about a specific command, use:".bright_magenta(),
            BIN_NAME.bright_cyan().bold(),
            "help <command>".bright_white()
        );
        println!(
            "Visit {} for more information",
            REPOSITORY_URL.bright_cyan().underline()
        );
    }
}

fn resolve_alias(alias: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .find(|(_, _, aliases)| aliases.contains(&alias))
        .map(|(cmd, _, _)| *cmd)
}

fn colorize_example(example: &str) -> String {
    let mut parts = example.split_whitespace();
    let Some(bin) = parts.next() else {
        return String::new();
    };

    let mut out = bin.bright_cyan().bold().to_string();
    for part in parts {
        out.push(' ');
        out.push_str(&part.bright_white().to_string());
    }
    out
}
