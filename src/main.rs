use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use newslens::model::{AnalysisResult, Article};
use newslens::settings::Settings;
use newslens::{analyze, db, report};

#[derive(Parser)]
#[command(name = "newslens", about = "Lexicon-based bias and factual reliability checks for news articles")]
struct Cli {
    /// SQLite database path (overrides NEWSLENS_DB_PATH / newslens.toml)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct OutputArgs {
    /// Print the raw result as JSON
    #[arg(long)]
    json: bool,
    /// Store the article and its analysis
    #[arg(long)]
    save: bool,
    /// User id to save under (default from settings)
    #[arg(short, long)]
    user: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one article
    Analyze {
        #[arg(short, long, conflicts_with = "file", requires = "content")]
        title: Option<String>,
        #[arg(short, long, conflicts_with = "file", requires = "title")]
        content: Option<String>,
        /// JSON file with title, content and optional source/author/date
        #[arg(short, long)]
        file: Option<PathBuf>,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        author: Option<String>,
        /// Publication date, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        #[command(flatten)]
        out: OutputArgs,
    },
    /// Analyze the built-in sample article
    Example {
        #[command(flatten)]
        out: OutputArgs,
    },
    /// Analyze a JSON Lines file of articles in parallel
    Batch {
        path: PathBuf,
        /// Store every analysed article
        #[arg(long)]
        save: bool,
        #[arg(short, long)]
        user: Option<String>,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
    /// List past analyses for a user
    History {
        #[arg(short, long)]
        user: Option<String>,
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
    /// Print a stored analysis
    Show {
        id: i64,
        #[arg(long)]
        json: bool,
    },
    /// Show database statistics
    Stats,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let mut settings = Settings::load()?;
    if let Some(path) = cli.db {
        settings.db_path = path;
    }

    let result = match cli.command {
        Commands::Analyze { title, content, file, source, author, date, out } => {
            let mut article = match (file, title, content) {
                (Some(path), _, _) => read_article(&path)?,
                (None, Some(title), Some(content)) => Article::new(title, content),
                _ => anyhow::bail!("Provide --title and --content, or --file"),
            };
            if source.is_some() {
                article.source = source;
            }
            if author.is_some() {
                article.author = author;
            }
            if date.is_some() {
                article.date = date;
            }
            article.validate()?;
            run_single(&settings, &article, &out)
        }
        Commands::Example { out } => run_single(&settings, &Article::example(), &out),
        Commands::Batch { path, save, user, limit } => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {:?}", path))?;
            let (articles, skipped) = parse_jsonl(&raw);
            if articles.is_empty() {
                println!("No valid articles in {:?} ({} skipped).", path, skipped);
                return Ok(());
            }

            let conn = if save { Some(open_db(&settings.db_path)?) } else { None };
            let user = user.unwrap_or_else(|| settings.default_user.clone());

            println!("Analyzing {} articles...", articles.len());
            let (rows, mut counts) =
                analyze_batch(conn.as_ref(), &user, articles, settings.batch_chunk_size)?;
            counts.skipped = skipped;

            print_batch_table(&rows, limit);
            counts.print();
            Ok(())
        }
        Commands::History { user, limit } => {
            let conn = open_db(&settings.db_path)?;
            let user = user.unwrap_or_else(|| settings.default_user.clone());
            let rows = db::fetch_history(&conn, &user, limit)?;
            if rows.is_empty() {
                println!("No saved analyses for user '{}'.", user);
                return Ok(());
            }

            println!(
                "{:>5} | {:<36} | {:<18} | {:>5} | {:>5} | {:<19}",
                "ID", "Title", "Source", "Bias", "Fact", "Saved"
            );
            println!("{}", "-".repeat(104));
            for r in &rows {
                let source = r.source.as_deref().unwrap_or("-");
                println!(
                    "{:>5} | {:<36} | {:<18} | {:>5} | {:>5} | {:<19}",
                    r.analysis_id,
                    truncate(&r.title, 33),
                    truncate(source, 15),
                    report::percent(r.overall_bias_score),
                    report::percent(r.overall_factual_score),
                    r.created_at.get(..19).unwrap_or(&r.created_at).replace('T', " "),
                );
            }

            println!("\n{} analyses | details: newslens show <id>", rows.len());
            Ok(())
        }
        Commands::Show { id, json } => {
            let conn = open_db(&settings.db_path)?;
            let Some(stored) = db::fetch_analysis(&conn, id)? else {
                println!("No analysis with id {}.", id);
                return Ok(());
            };
            if json {
                let value = serde_json::json!({
                    "id": stored.analysis_id,
                    "userId": stored.user_id,
                    "createdAt": stored.created_at,
                    "article": stored.article,
                    "result": stored.result,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("Analysis #{} ({}, saved {})\n", stored.analysis_id, stored.user_id, stored.created_at);
                print!("{}", report::render(&stored.article, &stored.result));
            }
            Ok(())
        }
        Commands::Stats => {
            let conn = open_db(&settings.db_path)?;
            let s = db::get_stats(&conn)?;
            println!("Database:    {}", settings.db_path.display());
            println!("Articles:    {}", s.articles);
            println!("Users:       {}", s.users);
            println!("Biases:      {}", s.biases);
            println!("Fact checks: {}", s.fact_checks);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn open_db(path: &Path) -> Result<rusqlite::Connection> {
    let conn = db::connect(path)?;
    db::init_schema(&conn)?;
    Ok(conn)
}

fn read_article(path: &Path) -> Result<Article> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid article JSON in {:?}", path))
}

/// Analyze, print, then optionally save. A failed save never hides the report.
fn run_single(settings: &Settings, article: &Article, out: &OutputArgs) -> Result<()> {
    let result = analyze(article);

    if out.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", report::render(article, &result));
    }

    if out.save {
        let user = out.user.as_deref().unwrap_or(&settings.default_user);
        let saved = open_db(&settings.db_path)
            .and_then(|conn| db::save_analysis(&conn, user, article, &result));
        match saved {
            Ok(id) => eprintln!("Saved as analysis #{}", id),
            Err(e) => {
                warn!(error = %e, "Save failed");
                eprintln!("Could not save analysis: {:#}", e);
            }
        }
    }
    Ok(())
}

/// Valid articles plus the number of skipped lines.
fn parse_jsonl(raw: &str) -> (Vec<Article>, usize) {
    let mut articles = Vec::new();
    let mut skipped = 0;
    for (i, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let parsed = serde_json::from_str::<Article>(line)
            .map_err(anyhow::Error::from)
            .and_then(|a| a.validate().map(|_| a).map_err(anyhow::Error::from));
        match parsed {
            Ok(a) => articles.push(a),
            Err(e) => {
                warn!(line = i + 1, error = %e, "Skipping invalid article");
                skipped += 1;
            }
        }
    }
    (articles, skipped)
}

struct BatchRow {
    title: String,
    result: AnalysisResult,
}

#[derive(Default)]
struct BatchCounts {
    analysed: usize,
    saved: usize,
    skipped: usize,
    flagged: usize,
}

impl BatchCounts {
    fn print(&self) {
        println!(
            "Analysed {} articles ({} with bias findings), saved {}, skipped {}.",
            self.analysed, self.flagged, self.saved, self.skipped,
        );
    }
}

fn analyze_batch(
    conn: Option<&rusqlite::Connection>,
    user: &str,
    articles: Vec<Article>,
    chunk_size: usize,
) -> Result<(Vec<BatchRow>, BatchCounts)> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(articles.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let mut counts = BatchCounts::default();
    let mut rows = Vec::with_capacity(articles.len());

    for chunk in articles.chunks(chunk_size) {
        let results: Vec<(Article, AnalysisResult)> = chunk
            .par_iter()
            .map(|a| (a.clone(), analyze(a)))
            .collect();

        counts.analysed += results.len();
        counts.flagged += results.iter().filter(|(_, r)| !r.biases.is_empty()).count();

        if let Some(conn) = conn {
            match db::save_batch(conn, user, &results) {
                Ok(n) => counts.saved += n,
                Err(e) => warn!(error = %e, size = results.len(), "Batch save failed"),
            }
        }

        rows.extend(results.into_iter().map(|(a, result)| BatchRow { title: a.title, result }));
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    info!(analysed = counts.analysed, saved = counts.saved, "Batch complete");
    Ok((rows, counts))
}

fn print_batch_table(rows: &[BatchRow], limit: usize) {
    println!(
        "{:>4} | {:<40} | {:>5} | {:>5} | {:<30}",
        "#", "Title", "Bias", "Fact", "Findings"
    );
    println!("{}", "-".repeat(98));
    for (i, r) in rows.iter().take(limit).enumerate() {
        let findings: Vec<&str> = r.result.biases.iter().map(|b| b.category.as_str()).collect();
        let findings = if findings.is_empty() { "-".to_string() } else { findings.join(", ") };
        println!(
            "{:>4} | {:<40} | {:>5} | {:>5} | {:<30}",
            i + 1,
            truncate(&r.title, 37),
            report::percent(r.result.overall_bias_score),
            report::percent(r.result.overall_factual_score),
            truncate(&findings, 27),
        );
    }
    if rows.len() > limit {
        println!("... {} more", rows.len() - limit);
    }
    println!();
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jsonl_skips_bad_lines() {
        let raw = r#"{"title":"One","content":"Body."}

not json
{"title":"","content":"Blank title."}
{"title":"Two","content":"Body.","date":"2024-13-40"}
{"title":"Three","content":"Body.","source":"Wire"}
"#;
        let (articles, skipped) = parse_jsonl(raw);
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[1].source.as_deref(), Some("Wire"));
        assert_eq!(skipped, 3);
    }

    #[test]
    fn batch_without_db() {
        let articles = vec![Article::new("One", "Body."), Article::example()];
        let (rows, counts) = analyze_batch(None, "u", articles, 1).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(counts.analysed, 2);
        assert_eq!(counts.saved, 0);
        assert_eq!(rows[1].result, analyze(&Article::example()));
    }

    #[test]
    fn truncate_chars() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééé", 3), "ééé...");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(std::time::Duration::from_secs(75)), "1m 15s");
        assert_eq!(format_duration(std::time::Duration::from_secs(3725)), "1h 2m 5s");
    }
}
