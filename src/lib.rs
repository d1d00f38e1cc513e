//! NewsGraph: multi-source news collection and relationship analysis.
//!
//! This crate wires provider adapters to the pure analysis pipeline in
//! [`newsgraph_core`]:
//! NewsAPI / Guardian / NewsData → relevance filter → dedup → scorer → report
//!
//! # Architecture
//!
//! - **Sources**: one [`sources::NewsSource`] adapter per provider, queried
//!   concurrently by [`collector::collect_news`]
//! - **Core**: relevance filtering, title dedup and multi-factor relationship
//!   scoring, re-exported from [`newsgraph_core`]
//! - **Report**: plain-text report and JSON export of articles, relationships
//!   and summary statistics
//! - **Config**: TOML configuration with per-provider credentials

pub mod collector;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod report;
pub mod sources;

pub use collector::{collect_news, collect_news_since, CollectionOutcome, SourceReport};
pub use config::NewsGraphConfig;
pub use error::{NewsGraphError, Result, SourceError};
pub use newsgraph_core::{
    analyze, summarize, AnalysisParams, Article, NetworkSummary, Relationship, RelationshipType,
    SourceApi,
};
pub use report::{render_report, ExportBundle};
