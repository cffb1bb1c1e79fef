pub mod client;
pub mod columns;
pub mod etl;
pub mod pipeline;

pub use crate::domain::model::{QueryParams, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::domain::table::Table;
pub use crate::utils::error::Result;
