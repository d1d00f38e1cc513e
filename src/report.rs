//! Plain-text analysis report plus JSON and CSV export.

use std::fmt::Write as _;
use std::fs::File;
use std::path::Path;

use chrono::NaiveDateTime;
use newsgraph_core::{AnalysisParams, Article, NetworkSummary, Relationship, SourceApi};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Number of outlets listed under "TOP NEWS SOURCES".
pub const TOP_SOURCES: usize = 10;

/// Everything a downstream consumer needs from one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportBundle {
    pub articles: Vec<Article>,
    pub relationships: Vec<Relationship>,
    pub summary: NetworkSummary,
}

impl ExportBundle {
    /// Assemble a bundle, computing the summary.
    pub fn new(articles: Vec<Article>, relationships: Vec<Relationship>) -> Self {
        let summary = newsgraph_core::summarize(&articles, &relationships);
        Self {
            articles,
            relationships,
            summary,
        }
    }

    /// Write the bundle as pretty-printed JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::debug!(path = %path.display(), "export written");
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ArticlesFile {
    Bare(Vec<Article>),
    Wrapped { articles: Vec<Article> },
}

/// Load articles from a JSON file holding either an array of articles or an
/// object with an `articles` array (such as an [`ExportBundle`]). Files
/// with a `.csv` extension are read as [`write_articles_csv`] output.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not hold articles.
pub fn load_articles(path: &Path) -> Result<Vec<Article>> {
    if is_csv(path) {
        return read_articles_csv(path);
    }
    let content = std::fs::read_to_string(path)?;
    let file: ArticlesFile = serde_json::from_str(&content)?;
    Ok(match file {
        ArticlesFile::Bare(articles) | ArticlesFile::Wrapped { articles } => articles,
    })
}

/// Write articles as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_articles(path: &Path, articles: &[Article]) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, serde_json::to_string_pretty(articles)?)?;
    Ok(())
}

const ARTICLE_HEADERS: [&str; 8] = [
    "title",
    "description",
    "content",
    "source_name",
    "source_api",
    "published_at",
    "url",
    "author",
];

const RELATIONSHIP_HEADERS: [&str; 10] = [
    "article1_id",
    "article2_id",
    "article1_title",
    "article2_title",
    "article1_source",
    "article2_source",
    "type",
    "strength",
    "evidence",
    "method",
];

/// One CSV row per article; absent link and byline become empty cells.
#[derive(Serialize)]
struct ArticleRow<'a> {
    title: &'a str,
    description: &'a str,
    content: &'a str,
    source_name: &'a str,
    source_api: SourceApi,
    published_at: &'a str,
    url: &'a str,
    author: &'a str,
}

impl<'a> From<&'a Article> for ArticleRow<'a> {
    fn from(article: &'a Article) -> Self {
        Self {
            title: &article.title,
            description: &article.description,
            content: &article.content,
            source_name: &article.source_name,
            source_api: article.source_api,
            published_at: &article.published_at,
            url: article.url.as_deref().unwrap_or(""),
            author: article.author.as_deref().unwrap_or(""),
        }
    }
}

/// Write articles as CSV with a header row, even when there are none.
///
/// # Errors
///
/// Returns an error if a row cannot be written.
pub fn write_articles_csv_to<W: std::io::Write>(writer: W, articles: &[Article]) -> Result<()> {
    let mut out = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    out.write_record(ARTICLE_HEADERS)?;
    for article in articles {
        out.serialize(ArticleRow::from(article))?;
    }
    out.flush()?;
    Ok(())
}

/// Write articles to a CSV file, creating parent directories.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_articles_csv(path: &Path, articles: &[Article]) -> Result<()> {
    ensure_parent(path)?;
    write_articles_csv_to(File::create(path)?, articles)?;
    tracing::debug!(path = %path.display(), rows = articles.len(), "articles csv written");
    Ok(())
}

/// Write relationships as CSV. The label goes under the `type` header.
///
/// # Errors
///
/// Returns an error if a row cannot be written.
pub fn write_relationships_csv_to<W: std::io::Write>(
    writer: W,
    relationships: &[Relationship],
) -> Result<()> {
    let mut out = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    out.write_record(RELATIONSHIP_HEADERS)?;
    for relationship in relationships {
        out.serialize(relationship)?;
    }
    out.flush()?;
    Ok(())
}

/// Write relationships to a CSV file, creating parent directories.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_relationships_csv(path: &Path, relationships: &[Relationship]) -> Result<()> {
    ensure_parent(path)?;
    write_relationships_csv_to(File::create(path)?, relationships)?;
    tracing::debug!(path = %path.display(), rows = relationships.len(), "relationships csv written");
    Ok(())
}

/// Read articles back from [`write_articles_csv`] output. Empty `url` and
/// `author` cells load as absent.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a row does not parse.
pub fn read_articles_csv(path: &Path) -> Result<Vec<Article>> {
    let mut reader = csv::Reader::from_path(path)?;
    let articles = reader.deserialize().collect::<std::result::Result<Vec<Article>, _>>()?;
    Ok(articles)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Render the plain-text analysis report.
///
/// `generated_at` is passed in so output is reproducible.
pub fn render_report(
    summary: &NetworkSummary,
    params: &AnalysisParams,
    generated_at: NaiveDateTime,
) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_report(&mut out, summary, params, generated_at);
    out
}

fn write_report(
    out: &mut String,
    summary: &NetworkSummary,
    params: &AnalysisParams,
    generated_at: NaiveDateTime,
) -> std::fmt::Result {
    writeln!(out, "NewsGraph Analysis Report")?;
    writeln!(out, "=========================")?;
    writeln!(out, "Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out, "Data Source: News APIs (NewsAPI, Guardian, NewsData)")?;
    writeln!(out)?;

    heading(out, "COLLECTION SUMMARY")?;
    writeln!(out, "Total Articles Collected: {}", summary.article_count)?;
    writeln!(out, "API Sources Used: {}", summary.api_source_count)?;
    writeln!(out, "Unique News Sources: {}", summary.news_source_count)?;
    match (summary.earliest_published, summary.latest_published) {
        (Some(earliest), Some(latest)) => writeln!(
            out,
            "Collection Period: {} to {}",
            earliest.format("%Y-%m-%d %H:%M UTC"),
            latest.format("%Y-%m-%d %H:%M UTC")
        )?,
        _ => writeln!(out, "Collection Period: unknown")?,
    }
    writeln!(out)?;

    heading(out, "API BREAKDOWN")?;
    for entry in &summary.api_counts {
        writeln!(
            out,
            "{}: {} articles",
            entry.source_api.tag().to_uppercase(),
            entry.count
        )?;
    }
    writeln!(out)?;

    heading(out, "RELATIONSHIP ANALYSIS")?;
    writeln!(out, "Total Relationships Found: {}", summary.relationship_count)?;
    writeln!(out, "Network Density: {:.3}", summary.density)?;
    if summary.relationship_count > 0 {
        writeln!(out, "Relationship Types:")?;
        for entry in &summary.type_counts {
            writeln!(out, "- {}: {}", entry.relationship_type, entry.count)?;
        }
        writeln!(out)?;
        writeln!(out, "Strength Analysis:")?;
        writeln!(out, "- Average Strength: {:.3}", summary.average_strength)?;
        writeln!(out, "- Maximum Strength: {:.3}", summary.max_strength)?;
        writeln!(out, "- Minimum Strength: {:.3}", summary.min_strength)?;
        writeln!(
            out,
            "- Strong Connections (>{}): {}",
            newsgraph_core::analytics::STRONG_RELATIONSHIP_MIN,
            summary.strong_relationships
        )?;
    }
    writeln!(out)?;

    heading(out, "TIMELINE")?;
    if summary.timeline.is_empty() {
        writeln!(out, "No parseable publication dates")?;
    }
    for (day, count) in &summary.timeline {
        writeln!(out, "{}: {count} articles", day.format("%Y-%m-%d"))?;
    }
    writeln!(out)?;

    heading(out, "TOP NEWS SOURCES")?;
    for entry in summary.source_counts.iter().take(TOP_SOURCES) {
        writeln!(out, "{}: {} articles", entry.source_name, entry.count)?;
    }
    writeln!(out)?;

    heading(out, "METHODOLOGY")?;
    writeln!(out, "- Data Collection: NewsAPI.org, Guardian API, NewsData.io")?;
    writeln!(out, "- Relevance: query token matching on title, description and content")?;
    writeln!(out, "- Deduplication: title word overlap above 70%")?;
    let methods: Vec<&str> = params.methods.iter().map(|m| m.name()).collect();
    let methods = if methods.is_empty() {
        "none".to_owned()
    } else {
        methods.join(", ")
    };
    writeln!(out, "- Analysis Methods: {methods}")?;
    writeln!(out, "- Similarity Threshold: {:.2}", params.similarity_threshold)?;
    writeln!(out, "- Relationship Detection: {}", newsgraph_core::RELATIONSHIP_METHOD)?;
    Ok(())
}

fn heading(out: &mut String, title: &str) -> std::fmt::Result {
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(title.len()))
}
