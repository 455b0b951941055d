//! CLI Argument Parsing
//!
//! Global flags (--json, --color, --verbose, --config) are inherited by
//! both subcommands. Fleet flags override the environment and config files.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use stackfleet::config::ConfigOverrides;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Stackfleet - package and deploy stack sets across an account x region fleet
#[derive(Parser, Debug)]
#[command(name = "stackfleet")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "Required settings (flag, environment or stackfleet.toml):\n  ENV, TARGET_ACCOUNTS, TARGET_REGIONS, STACK_SET_NAME, AWS_STACK_ADMIN_ARN"
)]
pub struct Cli {
    /// Emit NDJSON events instead of human output
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v shows probes and polls)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ./stackfleet.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Package the template for every target and upload it
    Package {
        #[command(flatten)]
        fleet: FleetArgs,
    },

    /// Package, then create or update the stack set and its instances
    Deploy {
        #[command(flatten)]
        fleet: FleetArgs,
    },
}

impl Commands {
    pub fn fleet(&self) -> &FleetArgs {
        match self {
            Commands::Package { fleet } | Commands::Deploy { fleet } => fleet,
        }
    }
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetArgs {
    /// Environment name passed as the stage parameter (ENV)
    #[arg(long = "env", value_name = "NAME")]
    pub environment: Option<String>,

    /// Comma-separated account ids (TARGET_ACCOUNTS)
    #[arg(long, value_name = "IDS")]
    pub accounts: Option<String>,

    /// Comma-separated regions (TARGET_REGIONS)
    #[arg(long, value_name = "REGIONS")]
    pub regions: Option<String>,

    /// Stack set name (STACK_SET_NAME)
    #[arg(long, value_name = "NAME")]
    pub stack_set_name: Option<String>,

    /// Administration role to assume (AWS_STACK_ADMIN_ARN)
    #[arg(long, value_name = "ARN")]
    pub admin_role_arn: Option<String>,
}

impl FleetArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            environment: self.environment.clone(),
            accounts: self.accounts.clone(),
            regions: self.regions.clone(),
            stack_set_name: self.stack_set_name.clone(),
            admin_role_arn: self.admin_role_arn.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_package() {
        let cli = Cli::try_parse_from(["stackfleet", "package"]).unwrap();
        assert!(matches!(cli.command, Commands::Package { .. }));
        assert_eq!(cli.command.fleet(), &FleetArgs::default());
    }

    #[test]
    fn test_cli_parse_deploy_flags() {
        let cli = Cli::try_parse_from([
            "stackfleet",
            "deploy",
            "--env",
            "prod",
            "--accounts",
            "111,222",
            "--regions",
            "us-east-1",
            "--stack-set-name",
            "image-resizer",
            "--admin-role-arn",
            "arn:aws:iam::999:role/admin",
        ])
        .unwrap();

        let Commands::Deploy { fleet } = &cli.command else {
            panic!("Expected Deploy command");
        };
        let overrides = fleet.overrides();
        assert_eq!(overrides.environment.as_deref(), Some("prod"));
        assert_eq!(overrides.accounts.as_deref(), Some("111,222"));
        assert_eq!(overrides.stack_set_name.as_deref(), Some("image-resizer"));
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "stackfleet",
            "deploy",
            "--json",
            "-vv",
            "--config",
            "ci.toml",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("ci.toml")));
    }

    #[test]
    fn test_cli_color_flag() {
        let cli = Cli::try_parse_from(["stackfleet", "--color", "never", "package"]).unwrap();
        assert!(matches!(cli.color, Some(ColorWhen::Never)));
    }

    #[test]
    fn test_cli_rejects_unknown_verb() {
        assert!(Cli::try_parse_from(["stackfleet", "destroy"]).is_err());
    }

    #[test]
    fn test_cli_requires_a_verb() {
        assert!(Cli::try_parse_from(["stackfleet"]).is_err());
    }
}
