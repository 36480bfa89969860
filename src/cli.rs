use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Manage the country-code registry and assemble choropleth figure requests.", long_about = None)]
pub struct Cli {
    /// Registry file to operate on. Overrides the config.toml setting.
    #[arg(short = 'r', long, global = true)]
    pub registry: Option<PathBuf>,

    /// Console log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long, global = true, value_parser = parse_level)]
    pub log_level: Option<Level>,

    /// Also write a debug-level log to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the registry file, seeded with the built-in ISO-3 table.
    Init {
        /// Overwrite an existing registry file.
        #[arg(long)]
        force: bool,
    },

    /// Print every registered country and its code, in file order.
    List,

    /// Register a code for a country. Fails if the code is already taken.
    Add {
        /// Country name, e.g. "Germany".
        country: String,
        /// ISO-3 code, e.g. "DEU".
        code: String,
    },

    /// Drop a code from the registry. Unknown codes are ignored.
    Remove {
        /// ISO-3 code to remove.
        code: String,
    },

    /// Assemble a choropleth request from a JSON table and print the
    /// partitioned option sets without rendering anything.
    Render {
        /// JSON file holding an array of row records with a Country column.
        data: PathBuf,

        /// Figure options as a JSON object.
        #[arg(short = 'o', long, default_value = "{}")]
        options: String,
    },
}

fn parse_level(arg: &str) -> Result<Level, String> {
    arg.parse::<Level>()
        .map_err(|_| format!("unknown log level: {}", arg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Ok(Level::DEBUG));
        assert_eq!(parse_level("INFO"), Ok(Level::INFO));
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::parse_from(["geoviz", "add", "Germany", "DEU"]);
        match cli.command {
            Command::Add { country, code } => {
                assert_eq!(country, "Germany");
                assert_eq!(code, "DEU");
            }
            other => panic!("expected Add, got {:?}", other),
        }

        let cli = Cli::parse_from(["geoviz", "-r", "/tmp/iso3.registry", "list"]);
        assert_eq!(cli.registry, Some(PathBuf::from("/tmp/iso3.registry")));
    }
}
