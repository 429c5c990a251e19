use std::time::Duration;

use clap::Parser;

use crate::data::loader::DataSource;

/// The published register, exported from Google Sheets as CSV.
pub const DEFAULT_SOURCE_URL: &str =
    "https://docs.google.com/spreadsheets/d/1iz-rjfmBNkfBj4KUxLWBHwaqTOvtfmbu/export?format=csv";

/// Start-up configuration: command line first, then environment, then defaults.
#[derive(Debug, Clone, Parser)]
#[command(name = "care-market-dashboard", version, about = "Care-home market dashboard")]
pub struct AppConfig {
    /// Dataset location: an http(s) URL (Google Sheets links are accepted)
    /// or a local .csv, .tsv, .json or .parquet file.
    #[arg(long, env = "CARE_DASHBOARD_SOURCE", default_value = DEFAULT_SOURCE_URL)]
    pub source: String,

    /// HTTP timeout for fetching the dataset, in seconds.
    #[arg(
        long,
        env = "CARE_DASHBOARD_TIMEOUT_SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,
}

impl AppConfig {
    pub fn data_source(&self) -> DataSource {
        DataSource::parse(&self.source)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cfg = AppConfig::try_parse_from([
            "care-market-dashboard",
            "--source",
            "snapshots/care.parquet",
            "--timeout-secs",
            "5",
        ])
        .expect("parse");
        assert_eq!(
            cfg.data_source(),
            DataSource::File(PathBuf::from("snapshots/care.parquet"))
        );
        assert_eq!(cfg.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let res = AppConfig::try_parse_from(["care-market-dashboard", "--timeout-secs", "0"]);
        assert!(res.is_err());
    }

    #[test]
    fn sheet_links_are_normalised() {
        let cfg = AppConfig::try_parse_from([
            "care-market-dashboard",
            "--source",
            "https://docs.google.com/spreadsheets/d/abc/edit#gid=7",
        ])
        .expect("parse");
        assert_eq!(
            cfg.data_source(),
            DataSource::Url(
                "https://docs.google.com/spreadsheets/d/abc/export?format=csv&gid=7".to_string()
            )
        );
    }
}
