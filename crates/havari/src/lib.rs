mod client;
mod error;
pub mod models;

pub use client::{fetch_all_reports, HavariClient, ReportSource, BASE_URL};
pub use error::HavariError;
pub use models::{parse_dotnet_date, Report, SearchPage};

pub type Result<T> = std::result::Result<T, HavariError>;
