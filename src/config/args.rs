use crate::core::client::DEFAULT_BASE_URL;
use crate::core::ConfigProvider;
use crate::domain::model::{Category, Endpoint, QueryParams, DEFAULT_LIMIT, FIRST_PRIZE_YEAR};
use crate::utils::clock::current_year;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "nobel-etl")]
#[command(about = "Fetch Nobel Prize data and normalize its columns")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, default_value = "laureates", help = "laureates or nobelPrizes")]
    pub endpoint: Endpoint,

    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,

    #[arg(long, default_value_t = FIRST_PRIZE_YEAR)]
    pub year_from: i32,

    #[arg(long, help = "Last award year (default: current year)")]
    pub year_to: Option<i32>,

    #[arg(long, help = "One of che, eco, lit, pea, phy, med (default: all)")]
    pub category: Option<Category>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Keep translation/link columns and '.en' suffixes")]
    pub raw_columns: bool,

    #[arg(long, help = "Bundle the output files into one ZIP archive")]
    pub compress: bool,

    #[arg(long, help = "Fetch and discard the result without writing output")]
    pub fetch_only: bool,

    #[arg(long, help = "TOML file replacing the source, query, transform and load flags")]
    pub config: Option<String>,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Flags set away from their defaults that a `--config` file overrides.
    pub fn flags_ignored_by_config(&self) -> Vec<&'static str> {
        let defaults = CliConfig::parse_from(["nobel-etl"]);
        let mut ignored = Vec::new();
        if self.base_url != defaults.base_url {
            ignored.push("base-url");
        }
        if self.endpoint != defaults.endpoint {
            ignored.push("endpoint");
        }
        if self.limit != defaults.limit {
            ignored.push("limit");
        }
        if self.year_from != defaults.year_from {
            ignored.push("year-from");
        }
        if self.year_to.is_some() {
            ignored.push("year-to");
        }
        if self.category.is_some() {
            ignored.push("category");
        }
        if self.output_path != defaults.output_path {
            ignored.push("output-path");
        }
        if self.timeout_seconds.is_some() {
            ignored.push("timeout-seconds");
        }
        if self.raw_columns {
            ignored.push("raw-columns");
        }
        if self.compress {
            ignored.push("compress");
        }
        ignored
    }
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn query(&self) -> QueryParams {
        QueryParams::new(self.endpoint)
            .with_limit(self.limit)
            .with_years(self.year_from, self.year_to.unwrap_or_else(current_year))
            .with_category(self.category)
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    fn normalize_columns(&self) -> bool {
        !self.raw_columns
    }

    fn compress(&self) -> bool {
        self.compress
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_positive_number("limit", u64::from(self.limit), 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_api_defaults() {
        let config = CliConfig::parse_from(["nobel-etl"]);
        assert_eq!(config.base_url, "https://api.nobelprize.org/2.1");

        let query = config.query();
        assert_eq!(query.endpoint, Endpoint::Laureates);
        assert_eq!(query.limit, 9999);
        assert_eq!(query.year_from, 1901);
        assert_eq!(query.year_to, current_year());
        assert!(query.category.is_none());
        assert!(config.normalize_columns());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_all_query_flags() {
        let config = CliConfig::parse_from([
            "nobel-etl",
            "--endpoint",
            "nobelPrizes",
            "--limit",
            "50",
            "--year-from",
            "1960",
            "--year-to",
            "1970",
            "--category",
            "eco",
            "--raw-columns",
        ]);

        let query = config.query();
        assert_eq!(query.endpoint, Endpoint::NobelPrizes);
        assert_eq!(query.limit, 50);
        assert_eq!((query.year_from, query.year_to), (1960, 1970));
        assert_eq!(query.category, Some(Category::Economics));
        assert!(!config.normalize_columns());
    }

    #[test]
    fn test_rejects_unknown_category() {
        let result = CliConfig::try_parse_from(["nobel-etl", "--category", "bio"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        let config = CliConfig::parse_from(["nobel-etl", "--limit", "0"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_leaves_output_path_to_the_run() {
        let config = CliConfig::parse_from(["nobel-etl", "--output-path", "", "--fetch-only"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags_ignored_by_config() {
        let plain =
            CliConfig::parse_from(["nobel-etl", "--config", "nobel.toml", "-v", "--fetch-only"]);
        assert!(plain.flags_ignored_by_config().is_empty());

        let overridden = CliConfig::parse_from([
            "nobel-etl",
            "--config",
            "nobel.toml",
            "--limit",
            "10",
            "--category",
            "pea",
            "--compress",
        ]);
        assert_eq!(
            overridden.flags_ignored_by_config(),
            vec!["limit", "category", "compress"]
        );
    }
}
