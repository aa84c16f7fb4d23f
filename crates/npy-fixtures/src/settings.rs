use std::env;

use clap::ArgMatches;

pub fn key_or_default(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(val) => val,
        Err(_) => default.into(),
    }
}

pub fn key_or_none(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(val) => Some(val),
        Err(_) => None,
    }
}

/// out_dir: string. folder the fixtures are written to
/// log_file: optional string. log file to append to besides stdout
/// verbosity: u8. number of -v flags
#[derive(Clone, Debug, Default)]
pub struct Settings {
    pub out_dir: String,
    pub log_file: Option<String>,
    pub verbosity: u8,
}

impl Settings {
    /// CLI arguments first, then environment variables, then defaults.
    pub fn from_matches(matches: &ArgMatches) -> Settings {
        let out_dir = matches
            .subcommand_matches("fixtures")
            .and_then(|m| m.value_of("out_dir"))
            .map(String::from)
            .unwrap_or_else(|| key_or_default("NPY_OUT_DIR", "."));
        let log_file = matches
            .value_of("log_file")
            .map(String::from)
            .or_else(|| key_or_none("NPY_LOG_FILE"));
        let verbosity = matches.occurrences_of("v") as u8;

        Settings {
            out_dir,
            log_file,
            verbosity,
        }
    }
}
