//! Command-line front end over the survey request handlers.
//!
//! Opens the configured database, runs one handler and prints its JSON
//! envelope. Exit status is non-zero when the handler reports a failure.

use clap::{Parser, Subcommand};
use log::error;
use polcompass_api::ApiResponse;
use polcompass_core::db::open_db;
use polcompass_core::{init_logging, ServiceConfig};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "polcompass", version, about = "Manage two-axis survey definitions")]
struct Cli {
    /// SQLite database file (overrides POLCOMPASS_DB_PATH).
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// trace|debug|info|warn|error (overrides POLCOMPASS_LOG_LEVEL).
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files (overrides POLCOMPASS_LOG_DIR).
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Health check.
    Ping,
    /// Create a survey from a JSON request file (`-` reads stdin).
    Create { file: PathBuf },
    /// Show one survey by id.
    Get {
        #[arg(long)]
        id: Option<String>,
    },
    /// Show the first survey.
    First,
    /// List published surveys.
    Summary {
        #[arg(long)]
        page: Option<String>,
        #[arg(long = "per-page")]
        per_page: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("polcompass: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = init_logging(config.log_level, config.log_target()) {
        eprintln!("polcompass: {err}");
        return ExitCode::FAILURE;
    }

    let response = match run(&config, cli.command) {
        Ok(response) => response,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("polcompass: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", response.body);
    if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn resolve_config(cli: &Cli) -> Result<ServiceConfig, String> {
    let mut config = ServiceConfig::from_env()?;
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(level) = &cli.log_level {
        config.set_log_level(level)?;
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = Some(dir.clone());
    }
    Ok(config)
}

fn run(config: &ServiceConfig, command: Command) -> Result<ApiResponse, String> {
    match command {
        Command::Ping => Ok(polcompass_api::ping()),
        Command::Create { file } => {
            let body = read_request(&file)?;
            with_database(config, |conn| polcompass_api::create_survey(conn, &body))
        }
        Command::Get { id } => {
            with_database(config, |conn| polcompass_api::get_survey(conn, id.as_deref()))
        }
        Command::First => with_database(config, polcompass_api::first_survey),
        Command::Summary { page, per_page } => with_database(config, |conn| {
            polcompass_api::list_summaries(conn, page.as_deref(), per_page.as_deref())
        }),
    }
}

fn with_database(
    config: &ServiceConfig,
    handler: impl FnOnce(&mut Connection) -> ApiResponse,
) -> Result<ApiResponse, String> {
    let mut conn = open_db(&config.db_path).map_err(|err| {
        format!(
            "failed to open database `{}`: {err}",
            config.db_path.display()
        )
    })?;
    Ok(handler(&mut conn))
}

fn read_request(file: &Path) -> Result<String, String> {
    if file.as_os_str() == "-" {
        return std::io::read_to_string(std::io::stdin())
            .map_err(|err| format!("failed to read request from stdin: {err}"));
    }
    std::fs::read_to_string(file)
        .map_err(|err| format!("failed to read request `{}`: {err}", file.display()))
}

#[cfg(test)]
mod tests {
    use super::{run, Cli, Command};
    use clap::Parser;
    use polcompass_core::ServiceConfig;

    fn config_for(dir: &tempfile::TempDir) -> ServiceConfig {
        ServiceConfig {
            db_path: dir.path().join("cli.db"),
            log_level: "info",
            log_dir: None,
        }
    }

    #[test]
    fn parses_summary_flags() {
        let cli = Cli::parse_from(["polcompass", "summary", "--page", "2", "--per-page", "5"]);
        match cli.command {
            Command::Summary { page, per_page } => {
                assert_eq!(page.as_deref(), Some("2"));
                assert_eq!(per_page.as_deref(), Some("5"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn create_then_first_through_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir);
        let request = dir.path().join("request.json");
        std::fs::write(
            &request,
            r#"{"field1_name":"Economic","field2_name":"Social","name":"CLI","description":"From file",
               "questions":[{"question":"Q1","affects":"Social","direction":2}]}"#,
        )
        .unwrap();

        let created = run(&config, Command::Create { file: request }).unwrap();
        assert!(created.is_success());

        let first = run(&config, Command::First).unwrap();
        assert_eq!(first.body["Name"], "CLI");
        assert_eq!(first.body["Field2QuestionQty"], 1);
    }

    #[test]
    fn ping_answers_without_opening_the_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServiceConfig {
            db_path: dir.path().join("absent").join("nested").join("cli.db"),
            log_level: "info",
            log_dir: None,
        };

        let pong = run(&config, Command::Ping).unwrap();
        assert!(pong.is_success());
        assert_eq!(pong.body["message"], "pong");
        assert!(!config.db_path.exists());

        let err = run(&config, Command::First).unwrap_err();
        assert!(err.contains("failed to open database"));
    }

    #[test]
    fn missing_request_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir);
        let err = run(
            &config,
            Command::Create {
                file: dir.path().join("absent.json"),
            },
        )
        .unwrap_err();
        assert!(err.contains("failed to read request"));
    }
}
