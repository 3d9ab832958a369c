use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use cleanup_aws_access_keys::commands;
use cleanup_aws_access_keys::inventory::actions::KeyAction;
use cleanup_aws_access_keys::inventory::report::ReportFormat;
use cleanup_aws_access_keys::inventory::types::{KeyStatus, SearchFilters};

#[derive(Parser)]
#[command(name = "cleanup-aws-access-keys")]
#[command(
    about = "A cloud security tool to search and clean up unused AWS access keys (https://github.com/tuladhar/cleanup-aws-access-keys)",
    long_about = None
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

// Filters shared by every key subcommand
#[derive(Args)]
struct FilterArgs {
    /// Access key was last used at least N days ago (-1 for never used)
    #[arg(
        long,
        default_value_t = 0,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i64).range(-1..)
    )]
    last_used: i64,

    /// Access key owned by this IAM username
    #[arg(long)]
    username: Option<String>,

    /// Access key status
    #[arg(long, value_enum)]
    status: Option<KeyStatus>,
}

impl From<FilterArgs> for SearchFilters {
    fn from(args: FilterArgs) -> Self {
        Self {
            last_used: args.last_used,
            username: args.username,
            status: args.status,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Search for access key(s)
    Search {
        #[command(flatten)]
        filters: FilterArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
        format: ReportFormat,

        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Activate access key(s)
    ///
    /// Only inactive keys are matched, regardless of --status.
    Activate {
        #[command(flatten)]
        filters: FilterArgs,

        /// Automatic yes to prompts and run non-interactively
        #[arg(long)]
        auto_approve: bool,
    },

    /// Deactivate access key(s)
    ///
    /// Only active keys are matched, regardless of --status.
    Deactivate {
        #[command(flatten)]
        filters: FilterArgs,

        /// Automatic yes to prompts and run non-interactively
        #[arg(long)]
        auto_approve: bool,
    },

    /// Delete access key(s)
    ///
    /// Deleted keys cannot be recovered. Consider deactivating first.
    Delete {
        #[command(flatten)]
        filters: FilterArgs,

        /// Automatic yes to prompts and run non-interactively
        #[arg(long)]
        auto_approve: bool,
    },

    /// Generate shell completion scripts
    GenerateCompletion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            filters,
            format,
            output,
        } => commands::search::run(&filters.into(), format, output.as_deref()).await,
        Commands::Activate {
            filters,
            auto_approve,
        } => commands::lifecycle::run(KeyAction::Activate, filters.into(), auto_approve).await,
        Commands::Deactivate {
            filters,
            auto_approve,
        } => commands::lifecycle::run(KeyAction::Deactivate, filters.into(), auto_approve).await,
        Commands::Delete {
            filters,
            auto_approve,
        } => commands::lifecycle::run(KeyAction::Delete, filters.into(), auto_approve).await,
        Commands::GenerateCompletion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(
                shell,
                &mut cmd,
                "cleanup-aws-access-keys",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search_filters() {
        let cli = Cli::try_parse_from([
            "cleanup-aws-access-keys",
            "search",
            "--last-used",
            "90",
            "--username",
            "devops",
            "--status",
            "inactive",
            "--format",
            "csv",
        ])
        .unwrap();

        match cli.command {
            Commands::Search {
                filters, format, ..
            } => {
                let filters: SearchFilters = filters.into();
                assert_eq!(filters.last_used, 90);
                assert_eq!(filters.username.as_deref(), Some("devops"));
                assert_eq!(filters.status, Some(KeyStatus::Inactive));
                assert_eq!(format, ReportFormat::Csv);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_parse_never_used() {
        let cli = Cli::try_parse_from(["cleanup-aws-access-keys", "delete", "--last-used", "-1"])
            .unwrap();
        match cli.command {
            Commands::Delete {
                filters,
                auto_approve,
            } => {
                assert_eq!(filters.last_used, -1);
                assert!(!auto_approve);
            }
            _ => panic!("expected delete"),
        }
    }

    #[test]
    fn test_rejects_last_used_below_never() {
        assert!(
            Cli::try_parse_from(["cleanup-aws-access-keys", "search", "--last-used", "-2"])
                .is_err()
        );
    }

    #[test]
    fn test_rejects_unknown_status() {
        assert!(
            Cli::try_parse_from(["cleanup-aws-access-keys", "search", "--status", "expired"])
                .is_err()
        );
    }

    #[test]
    fn test_auto_approve_flag() {
        let cli = Cli::try_parse_from([
            "cleanup-aws-access-keys",
            "deactivate",
            "--auto-approve",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Deactivate {
                auto_approve: true,
                ..
            }
        ));
    }
}
