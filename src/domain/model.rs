use crate::domain::table::Table;
use crate::utils::clock::current_year;
use crate::utils::error::NobelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_LIMIT: u32 = 9999;
pub const FIRST_PRIZE_YEAR: i32 = 1901;

/// REST resource served under the API base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Endpoint {
    /// Full per-person/organization records.
    #[default]
    Laureates,
    /// Shorter per-prize records with links back to the laureates.
    NobelPrizes,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Laureates => "laureates",
            Endpoint::NobelPrizes => "nobelPrizes",
        }
    }

    /// Top-level key holding the record array in a response body.
    pub fn records_key(&self) -> &'static str {
        self.path()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Endpoint {
    type Err = NobelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "laureates" => Ok(Endpoint::Laureates),
            "nobelprizes" => Ok(Endpoint::NobelPrizes),
            _ => Err(NobelError::ValidationError {
                message: format!(
                    "Unknown endpoint '{}'. Valid endpoints: laureates, nobelPrizes",
                    s
                ),
            }),
        }
    }
}

/// Prize subject area, identified by the API's three-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "che")]
    Chemistry,
    #[serde(rename = "eco")]
    Economics,
    #[serde(rename = "lit")]
    Literature,
    #[serde(rename = "pea")]
    Peace,
    #[serde(rename = "phy")]
    Physics,
    #[serde(rename = "med")]
    Medicine,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Chemistry,
        Category::Economics,
        Category::Literature,
        Category::Peace,
        Category::Physics,
        Category::Medicine,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Category::Chemistry => "che",
            Category::Economics => "eco",
            Category::Literature => "lit",
            Category::Peace => "pea",
            Category::Physics => "phy",
            Category::Medicine => "med",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Category {
    type Err = NobelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| NobelError::ValidationError {
                message: format!(
                    "Unknown category '{}'. Valid codes: che, eco, lit, pea, phy, med",
                    s
                ),
            })
    }
}

/// Parameters of a single request against the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    pub endpoint: Endpoint,
    pub limit: u32,
    /// First award year, inclusive.
    pub year_from: i32,
    /// Last award year, inclusive.
    pub year_to: i32,
    pub category: Option<Category>,
}

impl QueryParams {
    /// Defaults for `endpoint`; `year_to` is the current year at the time of this call.
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            limit: DEFAULT_LIMIT,
            year_from: FIRST_PRIZE_YEAR,
            year_to: current_year(),
            category: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_years(mut self, year_from: i32, year_to: i32) -> Self {
        self.year_from = year_from;
        self.year_to = year_to;
        self
    }

    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    /// Query string pairs in API naming. An unset category is left out entirely.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("limit", self.limit.to_string()),
            ("nobelPrizeYear", self.year_from.to_string()),
            ("yearTo", self.year_to.to_string()),
        ];
        if let Some(category) = self.category {
            pairs.push(("nobelPrizeCategory", category.code().to_string()));
        }
        pairs
    }
}

impl Default for QueryParams {
    fn default() -> Self {
        Self::new(Endpoint::default())
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub table: Table,
    pub raw: serde_json::Value,
    pub csv_output: String,
    pub tsv_output: String,
}
