pub mod client;
pub mod download;
pub mod error;
pub mod types;

pub use client::{DemozooClient, Fetch, ProductionSource, StatusClass, classify_status};
pub use download::{
    ArtifactFetcher, Downloaded, HttpFetcher, fetch_artifact, is_self_link, rewrite_link,
    select_link,
};
pub use error::DemozooError;
pub use types::{Authors, Credit, Link, Named, Nick, ProductionSummary, Releaser, RemoteProduction};
