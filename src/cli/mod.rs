//! Command-line front end

mod check;
mod report;

pub use check::CheckArgs;
pub use report::{render_monthly, render_organized, render_table};

use std::path::PathBuf;

use chrono::{Local, TimeZone, Utc};
use clap::{Parser, Subcommand};

use crate::parsers::read_table;
use crate::services::{Config, DataLoaderService};
use crate::types::Result;

/// Monthly totals and date-organized views over data entries
#[derive(Parser)]
#[command(name = "entrytally")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Entries export (JSON); defaults to the configured data file
    #[arg(long, global = true, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Only include entries owned by this user
    #[arg(long, global = true, value_name = "USER_ID")]
    owner: Option<String>,

    /// Include entries marked as deleted
    #[arg(long, global = true)]
    include_deleted: bool,

    /// Date entries on the UTC calendar instead of local time
    #[arg(long, global = true)]
    utc: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show monthly totals (default)
    Monthly {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Year to expand instead of the default
        #[arg(long)]
        year: Option<String>,
    },

    /// Show entries organized by year, month and day
    Organized {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Year to expand instead of the default
        #[arg(long)]
        year: Option<String>,

        /// Month (e.g. March) whose days are listed
        #[arg(long)]
        month: Option<String>,
    },

    /// Render a table export with formatted cells
    Table {
        /// Table export (JSON)
        path: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate account details
    Check(CheckArgs),
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        self.dispatch(Config::load)
    }

    /// Run the subcommand; only the views read the config file
    fn dispatch(mut self, load_config: impl FnOnce() -> Result<Config>) -> anyhow::Result<()> {
        match self.command.take() {
            None => self.run_view(load_config, View::Monthly { year: None }, false),
            Some(Commands::Monthly { json, year }) => {
                self.run_view(load_config, View::Monthly { year }, json)
            }
            Some(Commands::Organized { json, year, month }) => {
                self.run_view(load_config, View::Organized { year, month }, json)
            }
            Some(Commands::Table { path, json }) => {
                let table = read_table(&path)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&table)?);
                } else {
                    println!("{}", render_table(&table));
                }
                Ok(())
            }
            Some(Commands::Check(args)) => Ok(args.run()?),
        }
    }

    fn run_view(
        &self,
        load_config: impl FnOnce() -> Result<Config>,
        view: View,
        json: bool,
    ) -> anyhow::Result<()> {
        let config = self.apply_overrides(load_config()?);
        let loader = DataLoaderService::from_config(&config)?;
        if config.utc {
            print_view(&loader, &Utc, view, json)
        } else {
            print_view(&loader, &Local, view, json)
        }
    }

    /// File config with command-line overrides applied
    fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(data) = &self.data {
            config.data_file = Some(data.clone());
        }
        if let Some(owner) = &self.owner {
            config.owner_id = Some(owner.clone());
        }
        config.include_deleted |= self.include_deleted;
        config.utc |= self.utc;
        config
    }
}

enum View {
    Monthly {
        year: Option<String>,
    },
    Organized {
        year: Option<String>,
        month: Option<String>,
    },
}

fn print_view<Tz: TimeZone>(
    loader: &DataLoaderService,
    tz: &Tz,
    view: View,
    json: bool,
) -> anyhow::Result<()> {
    let out = match view {
        View::Monthly { year } => {
            let agg = loader.monthly_totals_in(tz);
            if json {
                serde_json::to_string_pretty(&agg)?
            } else {
                render_monthly(&agg, year.as_deref())
            }
        }
        View::Organized { year, month } => {
            let agg = loader.organized_in(tz);
            if json {
                serde_json::to_string_pretty(&agg)?
            } else {
                render_organized(&agg, year.as_deref(), month.as_deref())
            }
        }
    };
    println!("{}", out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntryTallyError;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::try_parse_from(["entrytally"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.utc);
    }

    #[test]
    fn test_cli_parse_monthly_json() {
        let cli = Cli::try_parse_from(["entrytally", "monthly", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Monthly {
                json: true,
                year: None
            })
        ));
    }

    #[test]
    fn test_cli_parse_organized_with_month() {
        let cli = Cli::try_parse_from([
            "entrytally",
            "organized",
            "--year",
            "2024",
            "--month",
            "March",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Organized { json, year, month }) => {
                assert!(!json);
                assert_eq!(year.as_deref(), Some("2024"));
                assert_eq!(month.as_deref(), Some("March"));
            }
            _ => panic!("expected organized"),
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "entrytally",
            "monthly",
            "--data",
            "export.json",
            "--owner",
            "user-1",
            "--utc",
        ])
        .unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("export.json")));
        assert_eq!(cli.owner.as_deref(), Some("user-1"));
        assert!(cli.utc);
    }

    #[test]
    fn test_cli_parse_table() {
        let cli = Cli::try_parse_from(["entrytally", "table", "t.json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Table { json: false, .. })));
    }

    fn broken_config() -> Result<Config> {
        Err(EntryTallyError::Config("malformed config".into()))
    }

    #[test]
    fn test_check_ignores_broken_config() {
        let cli = Cli::try_parse_from(["entrytally", "check", "--name", "Asha"]).unwrap();
        assert!(cli.dispatch(broken_config).is_ok());
    }

    #[test]
    fn test_table_ignores_broken_config() {
        let cli =
            Cli::try_parse_from(["entrytally", "table", "tests/fixtures/table.json"]).unwrap();
        assert!(cli.dispatch(broken_config).is_ok());
    }

    #[test]
    fn test_views_report_broken_config() {
        let cli = Cli::try_parse_from(["entrytally", "monthly"]).unwrap();
        let err = cli.dispatch(broken_config).unwrap_err();
        assert!(err.to_string().contains("malformed config"));
    }

    #[test]
    fn test_overrides_apply_over_file_config() {
        let cli = Cli::try_parse_from(["entrytally", "--owner", "user-2", "--utc"]).unwrap();
        let config = cli.apply_overrides(Config {
            owner_id: Some("user-1".into()),
            ..Config::default()
        });
        assert_eq!(config.owner_id.as_deref(), Some("user-2"));
        assert!(config.utc);
    }

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::try_parse_from(["entrytally", "check", "--email", "a@b.co"]).unwrap();
        match cli.command {
            Some(Commands::Check(args)) => assert_eq!(args.email.as_deref(), Some("a@b.co")),
            _ => panic!("expected check"),
        }
    }
}
