//! Fetch Nobel Prize data from the nobelprize.org REST API and normalize
//! the flattened table: translation and Wikidata link columns are dropped and
//! English column names lose their `.en` suffix.

pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use core::{
    client::NobelClient,
    columns::{
        prune_columns, prune_columns_in_place, strip_english_suffix,
        strip_english_suffix_in_place,
    },
    etl::EtlEngine,
    pipeline::NobelPipeline,
};
pub use domain::model::{Category, Endpoint, QueryParams};
pub use domain::table::{Column, ColumnKind, Language, Table};
pub use utils::clock::current_year;
pub use utils::error::{NobelError, Result};
