//! Data model for the marketing snapshot pipeline.

pub mod enums;
pub mod error;
pub mod processing;
pub mod report;
pub mod schema;

pub use enums::{AdvertisingPlatform, CampaignChannel, CampaignType, Gender};
pub use error::{PipelineError, Result};
pub use processing::{SnapshotFormat, SnapshotPaths};
pub use report::NormalizeReport;
pub use schema::{
    Check, ColumnSpec, ColumnType, EXTRACTION_DATE, Imputation, PRIMARY_KEY, column_spec, columns,
};
