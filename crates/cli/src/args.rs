//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use codereadr_client::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use codereadr_protocol::{Action, Section};

/// Call one CodeREADr API action and print the XML response.
#[derive(Debug, Parser)]
#[command(name = "codereadr", version)]
pub struct Cli {
    /// API key sent with every call.
    #[arg(long, env = "CODEREADR_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// API endpoint URL.
    #[arg(long, env = "CODEREADR_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Whole-request timeout in seconds.
    #[arg(long, env = "CODEREADR_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Diagnostic log format (written to stderr).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Resource section: databases, scans, services, or users.
    pub section: Section,

    /// Action within the section, e.g. retrieve or create.
    pub action: Action,

    /// Scalar parameter; may be repeated.
    #[arg(short = 'p', long = "param", value_name = "NAME=VALUE", value_parser = parse_pair)]
    pub params: Vec<(String, String)>,

    /// File parameter: the file's contents are uploaded as a file part
    /// named NAME. May be repeated.
    #[arg(short = 'f', long = "file", value_name = "NAME=PATH", value_parser = parse_file)]
    pub files: Vec<(String, PathBuf)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{raw}'")),
    }
}

fn parse_file(raw: &str) -> Result<(String, PathBuf), String> {
    let (name, path) = parse_pair(raw)?;
    if path.is_empty() {
        return Err(format!("missing file path in '{raw}'"));
    }
    Ok((name, PathBuf::from(path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_splits_on_first_equals() {
        assert_eq!(
            parse_pair("filter=a=b"),
            Ok(("filter".to_string(), "a=b".to_string()))
        );
        assert_eq!(parse_pair("empty="), Ok(("empty".to_string(), String::new())));
        assert!(parse_pair("novalue").is_err());
        assert!(parse_pair("=value").is_err());
    }

    #[test]
    fn file_requires_a_path() {
        assert!(parse_file("upload=").is_err());
        assert_eq!(
            parse_file("upload=values.csv"),
            Ok(("upload".to_string(), PathBuf::from("values.csv")))
        );
    }

    #[test]
    fn full_command_line_parses() {
        let cli = Cli::try_parse_from([
            "codereadr",
            "--api-key",
            "k",
            "databases",
            "upload",
            "-p",
            "database_id=9",
            "-f",
            "upload=values.csv",
        ])
        .unwrap();

        assert_eq!(cli.section, Section::Databases);
        assert_eq!(cli.action, Action::Upload);
        assert_eq!(cli.params, vec![("database_id".to_string(), "9".to_string())]);
        assert_eq!(cli.files.len(), 1);
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    fn unknown_section_is_rejected() {
        let result = Cli::try_parse_from(["codereadr", "--api-key", "k", "widgets", "retrieve"]);
        assert!(result.is_err());
    }
}
