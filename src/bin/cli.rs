//! CLI binary for newsgraph.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use newsgraph::report::{self, ExportBundle};
use newsgraph::{analyze, AnalysisParams, Article, NewsGraphConfig, RelationshipType};
use tracing::info;

/// NewsGraph: collect news from several providers and map how stories relate.
#[derive(Parser)]
#[command(name = "newsgraph", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Also write daily rolling log files to this directory.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Collect articles from the enabled providers and write them as JSON or CSV.
    Collect {
        #[command(flatten)]
        collection: CollectionArgs,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Output file. Prints to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Discover relationships in a saved article file and write the export.
    ///
    /// JSON output is the full bundle; CSV output is the relationship table.
    Analyze {
        /// Articles file (JSON, or CSV by extension) written by `collect` or `analyze`.
        articles: PathBuf,

        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Output file. Prints to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the text report for a saved article file.
    Report {
        /// Articles file (JSON, or CSV by extension) written by `collect` or `analyze`.
        articles: PathBuf,

        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Output file. Prints to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Collect, analyze and report in one go.
    Run {
        #[command(flatten)]
        collection: CollectionArgs,

        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Directory for the JSON and CSV exports and `report.txt`.
        #[arg(long, default_value = "newsgraph-output")]
        output_dir: PathBuf,
    },
}

/// Serialization used by `collect` and `analyze`.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

/// Overrides for the `[collection]` config section.
#[derive(Args)]
struct CollectionArgs {
    /// Search query.
    #[arg(short, long)]
    query: Option<String>,

    /// Days to look back (1-7).
    #[arg(long)]
    days_back: Option<u32>,

    /// Articles to request per provider (5-50).
    #[arg(long)]
    max_articles: Option<usize>,
}

/// Overrides for the `[analysis]` config section.
#[derive(Args)]
struct AnalysisArgs {
    /// Minimum relationship strength, strictly between 0 and 1.
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Enabled scoring method; repeat to enable several
    /// (e.g. `--method keyword-overlap --method temporal-proximity`).
    #[arg(long = "method")]
    methods: Vec<RelationshipType>,
}

impl CollectionArgs {
    fn apply(&self, config: &mut NewsGraphConfig) {
        if let Some(ref query) = self.query {
            config.collection.query = query.clone();
        }
        if let Some(days_back) = self.days_back {
            config.collection.days_back = days_back;
        }
        if let Some(max_articles) = self.max_articles {
            config.collection.max_articles = max_articles;
        }
    }
}

impl AnalysisArgs {
    fn apply(&self, config: &mut NewsGraphConfig) {
        if let Some(threshold) = self.threshold {
            config.analysis.similarity_threshold = threshold;
        }
        if !self.methods.is_empty() {
            config.analysis.methods = self.methods.clone();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = newsgraph::logging::init(cli.log_dir.as_deref());

    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Collect {
            collection,
            format,
            output,
        } => {
            collection.apply(&mut config);
            run_collect(&config, format, output.as_deref()).await
        }
        Command::Analyze {
            articles,
            analysis,
            format,
            output,
        } => {
            analysis.apply(&mut config);
            run_analyze(&config.analysis, &articles, format, output.as_deref())
        }
        Command::Report {
            articles,
            analysis,
            output,
        } => {
            analysis.apply(&mut config);
            run_report(&config.analysis, &articles, output.as_deref())
        }
        Command::Run {
            collection,
            analysis,
            output_dir,
        } => {
            collection.apply(&mut config);
            analysis.apply(&mut config);
            run_all(&config, &output_dir).await
        }
    }
}

/// Load the explicit config file, else the default path if it exists, else defaults.
fn load_config(path: Option<&Path>) -> anyhow::Result<NewsGraphConfig> {
    if let Some(path) = path {
        return NewsGraphConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()));
    }
    let default_path = NewsGraphConfig::default_config_path();
    if default_path.exists() {
        NewsGraphConfig::from_file(&default_path)
            .with_context(|| format!("failed to load config from {}", default_path.display()))
    } else {
        Ok(NewsGraphConfig::default())
    }
}

async fn run_collect(
    config: &NewsGraphConfig,
    format: OutputFormat,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let outcome = newsgraph::collect_news(config).await?;
    for source in &outcome.reports {
        match source.error {
            Some(ref err) => eprintln!("{}: {err}", source.source_api.name()),
            None => eprintln!("{}: {} articles", source.source_api.name(), source.articles),
        }
    }
    eprintln!(
        "Collected {} unique articles from {} candidates",
        outcome.articles.len(),
        outcome.candidates
    );

    match (format, output) {
        (OutputFormat::Json, Some(path)) => report::save_articles(path, &outcome.articles)
            .with_context(|| format!("failed to write {}", path.display()))?,
        (OutputFormat::Json, None) => {
            println!("{}", serde_json::to_string_pretty(&outcome.articles)?);
        }
        (OutputFormat::Csv, Some(path)) => report::write_articles_csv(path, &outcome.articles)
            .with_context(|| format!("failed to write {}", path.display()))?,
        (OutputFormat::Csv, None) => {
            report::write_articles_csv_to(std::io::stdout().lock(), &outcome.articles)?;
        }
    }
    Ok(())
}

fn load_and_analyze(params: &AnalysisParams, path: &Path) -> anyhow::Result<ExportBundle> {
    let articles: Vec<Article> = report::load_articles(path)
        .with_context(|| format!("failed to load articles from {}", path.display()))?;
    let relationships = analyze(&articles, params)?;
    info!(
        articles = articles.len(),
        relationships = relationships.len(),
        "analysis complete"
    );
    Ok(ExportBundle::new(articles, relationships))
}

fn run_analyze(
    params: &AnalysisParams,
    articles: &Path,
    format: OutputFormat,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let bundle = load_and_analyze(params, articles)?;
    match (format, output) {
        (OutputFormat::Json, Some(path)) => bundle
            .write_json(path)
            .with_context(|| format!("failed to write {}", path.display()))?,
        (OutputFormat::Json, None) => println!("{}", serde_json::to_string_pretty(&bundle)?),
        (OutputFormat::Csv, Some(path)) => {
            report::write_relationships_csv(path, &bundle.relationships)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        (OutputFormat::Csv, None) => {
            report::write_relationships_csv_to(std::io::stdout().lock(), &bundle.relationships)?;
        }
    }
    Ok(())
}

fn run_report(params: &AnalysisParams, articles: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let bundle = load_and_analyze(params, articles)?;
    let text = report::render_report(&bundle.summary, params, chrono::Local::now().naive_local());
    write_text(output, &text)
}

async fn run_all(config: &NewsGraphConfig, output_dir: &Path) -> anyhow::Result<()> {
    let outcome = newsgraph::collect_news(config).await?;
    let relationships = analyze(&outcome.articles, &config.analysis)?;
    let bundle = ExportBundle::new(outcome.articles, relationships);

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;
    report::save_articles(&output_dir.join("articles.json"), &bundle.articles)?;
    bundle.write_json(&output_dir.join("analysis.json"))?;
    report::write_articles_csv(&output_dir.join("articles.csv"), &bundle.articles)?;
    report::write_relationships_csv(&output_dir.join("relationships.csv"), &bundle.relationships)?;

    let text = report::render_report(
        &bundle.summary,
        &config.analysis,
        chrono::Local::now().naive_local(),
    );
    write_text(Some(&output_dir.join("report.txt")), &text)?;

    println!(
        "{} articles, {} relationships (density {:.3}) written to {}",
        bundle.summary.article_count,
        bundle.summary.relationship_count,
        bundle.summary.density,
        output_dir.display()
    );
    Ok(())
}

fn write_text(output: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{text}"),
    }
    Ok(())
}
