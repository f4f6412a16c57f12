//! CLI command implementations
//!
//! `serve` boots in a fixed order: resolve configuration, set the log level,
//! load and validate the seed, bind the listener. Any failure before the
//! listener is bound aborts the boot.

use std::path::{Path, PathBuf};

use serde_json::json;

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::movies::load_seed;
use crate::observability::{log_event, log_event_with_fields, Event, Logger};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Parse process arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command.unwrap_or_default())
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port, seed } => serve(config.as_deref(), port, seed),
        Command::CheckSeed { seed } => check_seed(seed.as_deref()),
    }
}

/// Resolve the server configuration.
///
/// Defaults, then the config file, then `PORT` from `env`, then flags.
pub fn resolve_config<F>(
    config_path: Option<&Path>,
    port: Option<u16>,
    seed: Option<PathBuf>,
    env: F,
) -> CliResult<HttpServerConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let base = match config_path {
        Some(path) => HttpServerConfig::load(path)?,
        None => HttpServerConfig::default(),
    };

    let mut config = base.apply_env(env)?;
    if let Some(port) = port {
        config.port = port;
    }
    if seed.is_some() {
        config.seed_path = seed;
    }

    config.validate()?;
    Ok(config)
}

/// Start the HTTP server and block until shutdown.
///
/// Every failure on the way up is logged as `BOOT_FAILED` before it is
/// returned.
pub fn serve(config_path: Option<&Path>, port: Option<u16>, seed: Option<PathBuf>) -> CliResult<()> {
    log_event(Event::BootStart);
    boot(config_path, port, seed).map_err(report_boot_failure)
}

fn boot(config_path: Option<&Path>, port: Option<u16>, seed: Option<PathBuf>) -> CliResult<()> {
    let config = resolve_config(config_path, port, seed, |key| std::env::var(key).ok())?;
    Logger::set_min_severity(config.severity()?);

    let port_str = config.port.to_string();
    let origins = config.cors_origins.len().to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("host", &config.host), ("port", &port_str), ("cors_origins", &origins)],
    );

    let server = HttpServer::from_config(config)?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

fn report_boot_failure(err: CliError) -> CliError {
    log_event_with_fields(
        Event::BootFailed,
        &[("code", err.code_str()), ("reason", err.message())],
    );
    err
}

/// Validate a seed dataset and print how many records it holds
pub fn check_seed(seed: Option<&Path>) -> CliResult<()> {
    let movies = load_seed(seed)?;
    let source = seed
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "embedded".to_string());

    write_response(json!({
        "source": source,
        "count": movies.len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_defaults() {
        let config = resolve_config(None, None, None, no_env).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.seed_path.is_none());
    }

    #[test]
    fn test_precedence_file_env_flag() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "port": 4000 }}"#).unwrap();

        let from_file = resolve_config(Some(file.path()), None, None, no_env).unwrap();
        assert_eq!(from_file.port, 4000);

        let env = |key: &str| (key == "PORT").then(|| "5000".to_string());
        let from_env = resolve_config(Some(file.path()), None, None, env).unwrap();
        assert_eq!(from_env.port, 5000);

        let from_flag = resolve_config(Some(file.path()), Some(6000), None, env).unwrap();
        assert_eq!(from_flag.port, 6000);
    }

    #[test]
    fn test_seed_flag_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "seed_path": "a.json" }}"#).unwrap();

        let config =
            resolve_config(Some(file.path()), None, Some(PathBuf::from("b.json")), no_env).unwrap();
        assert_eq!(config.seed_path, Some(PathBuf::from("b.json")));
    }

    #[test]
    fn test_bad_env_port_is_config_error() {
        let err = resolve_config(None, None, None, |_| Some("abc".to_string())).unwrap_err();
        assert_eq!(err.code_str(), "MOVIES_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_serve_fails_on_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");

        let err = serve(Some(&missing), None, None).unwrap_err();
        assert_eq!(err.code_str(), "MOVIES_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_serve_fails_on_bad_seed() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[{{}}]").unwrap();

        let err = serve(None, None, Some(file.path().to_path_buf())).unwrap_err();
        assert_eq!(err.code_str(), "MOVIES_CLI_SEED_ERROR");
    }

    #[test]
    fn test_boot_failure_report_keeps_error() {
        let err = report_boot_failure(CliError::boot_failed("address in use"));
        assert_eq!(err.code_str(), "MOVIES_CLI_BOOT_FAILED");
        assert_eq!(err.message(), "address in use");
    }

    #[test]
    fn test_check_embedded_seed() {
        assert!(check_seed(None).is_ok());
    }

    #[test]
    fn test_check_bad_seed() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = check_seed(Some(file.path())).unwrap_err();
        assert_eq!(err.code_str(), "MOVIES_CLI_SEED_ERROR");
    }
}
