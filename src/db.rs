use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

use crate::model::{AnalysisResult, Article, BiasResult, FactCheckResult};

pub fn connect(path: &Path) -> Result<Connection> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {:?}", dir))?;
    }
    let conn = Connection::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS articles (
            id         INTEGER PRIMARY KEY,
            user_id    TEXT NOT NULL,
            title      TEXT NOT NULL,
            content    TEXT NOT NULL,
            source     TEXT,
            author     TEXT,
            date       TEXT,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_articles_user ON articles(user_id, created_at);

        CREATE TABLE IF NOT EXISTS analysis_results (
            id                    INTEGER PRIMARY KEY,
            article_id            INTEGER NOT NULL UNIQUE REFERENCES articles(id) ON DELETE CASCADE,
            user_id               TEXT NOT NULL,
            overall_bias_score    REAL NOT NULL,
            overall_factual_score REAL NOT NULL,
            summary               TEXT NOT NULL,
            created_at            TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS biases (
            id          INTEGER PRIMARY KEY,
            analysis_id INTEGER NOT NULL REFERENCES analysis_results(id) ON DELETE CASCADE,
            category    TEXT NOT NULL CHECK(category IN ('political','emotional','balance','demographic','sensationalism')),
            score       REAL NOT NULL,
            explanation TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_biases_analysis ON biases(analysis_id);

        CREATE TABLE IF NOT EXISTS fact_checks (
            id          INTEGER PRIMARY KEY,
            analysis_id INTEGER NOT NULL REFERENCES analysis_results(id) ON DELETE CASCADE,
            is_factual  BOOLEAN NOT NULL,
            confidence  REAL NOT NULL,
            explanation TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_fact_checks_analysis ON fact_checks(analysis_id);
        ",
    )?;
    Ok(())
}

// ── Saving ──

/// Article, summary, biases and fact checks in one transaction.
/// Returns the analysis id.
pub fn save_analysis(
    conn: &Connection,
    user_id: &str,
    article: &Article,
    result: &AnalysisResult,
) -> Result<i64> {
    let tx = conn.unchecked_transaction()?;
    let analysis_id = insert_analysis(&tx, user_id, article, result)?;
    tx.commit()?;
    info!(analysis_id, user_id, "Saved analysis");
    Ok(analysis_id)
}

/// One transaction for a chunk of analysed articles.
pub fn save_batch(
    conn: &Connection,
    user_id: &str,
    items: &[(Article, AnalysisResult)],
) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    for (article, result) in items {
        insert_analysis(&tx, user_id, article, result)?;
    }
    tx.commit()?;
    debug!(count = items.len(), user_id, "Saved batch");
    Ok(items.len())
}

fn insert_analysis(
    conn: &Connection,
    user_id: &str,
    article: &Article,
    result: &AnalysisResult,
) -> Result<i64> {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

    conn.execute(
        "INSERT INTO articles (user_id, title, content, source, author, date, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            user_id, article.title, article.content, article.source, article.author,
            article.date, now,
        ],
    )?;
    let article_id = conn.last_insert_rowid();

    conn.execute(
        "INSERT INTO analysis_results
         (article_id, user_id, overall_bias_score, overall_factual_score, summary, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            article_id, user_id, result.overall_bias_score, result.overall_factual_score,
            result.summary, now,
        ],
    )?;
    let analysis_id = conn.last_insert_rowid();

    {
        let mut b_stmt = conn.prepare(
            "INSERT INTO biases (analysis_id, category, score, explanation)
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        for b in &result.biases {
            b_stmt.execute(rusqlite::params![analysis_id, b.category.as_str(), b.score, b.explanation])?;
        }

        let mut f_stmt = conn.prepare(
            "INSERT INTO fact_checks (analysis_id, is_factual, confidence, explanation)
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        for f in &result.fact_check {
            f_stmt.execute(rusqlite::params![analysis_id, f.is_factual, f.confidence, f.explanation])?;
        }
    }

    Ok(analysis_id)
}

// ── History ──

pub struct HistoryRow {
    pub article_id: i64,
    pub analysis_id: i64,
    pub title: String,
    pub source: Option<String>,
    pub created_at: String,
    pub overall_bias_score: f64,
    pub overall_factual_score: f64,
    pub summary: String,
}

/// A user's past articles with their analysis summary, newest first.
pub fn fetch_history(conn: &Connection, user_id: &str, limit: usize) -> Result<Vec<HistoryRow>> {
    let mut stmt = conn.prepare(
        "SELECT a.id, r.id, a.title, a.source, a.created_at,
                r.overall_bias_score, r.overall_factual_score, r.summary
         FROM articles a
         JOIN analysis_results r ON r.article_id = a.id
         WHERE a.user_id = ?1
         ORDER BY a.created_at DESC, a.id DESC
         LIMIT ?2",
    )?;
    let rows = stmt
        .query_map(rusqlite::params![user_id, limit as i64], |row| {
            Ok(HistoryRow {
                article_id: row.get(0)?,
                analysis_id: row.get(1)?,
                title: row.get(2)?,
                source: row.get(3)?,
                created_at: row.get(4)?,
                overall_bias_score: row.get(5)?,
                overall_factual_score: row.get(6)?,
                summary: row.get(7)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub struct StoredAnalysis {
    pub analysis_id: i64,
    pub user_id: String,
    pub created_at: String,
    pub article: Article,
    pub result: AnalysisResult,
}

/// Rebuild a saved article and its full result.
pub fn fetch_analysis(conn: &Connection, analysis_id: i64) -> Result<Option<StoredAnalysis>> {
    let head = conn
        .query_row(
            "SELECT r.user_id, r.created_at, r.overall_bias_score, r.overall_factual_score, r.summary,
                    a.title, a.content, a.source, a.author, a.date
             FROM analysis_results r
             JOIN articles a ON a.id = r.article_id
             WHERE r.id = ?1",
            [analysis_id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, String>(4)?,
                    Article {
                        title: row.get(5)?,
                        content: row.get(6)?,
                        source: row.get(7)?,
                        author: row.get(8)?,
                        date: row.get(9)?,
                    },
                ))
            },
        )
        .optional()?;
    let Some((user_id, created_at, overall_bias_score, overall_factual_score, summary, article)) = head
    else {
        return Ok(None);
    };

    let mut b_stmt = conn.prepare(
        "SELECT category, score, explanation FROM biases WHERE analysis_id = ?1 ORDER BY id",
    )?;
    let raw_biases = b_stmt
        .query_map([analysis_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?, row.get::<_, String>(2)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    let biases = raw_biases
        .into_iter()
        .map(|(category, score, explanation)| {
            Ok(BiasResult {
                category: category.parse()?,
                score,
                explanation,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut f_stmt = conn.prepare(
        "SELECT is_factual, confidence, explanation FROM fact_checks WHERE analysis_id = ?1 ORDER BY id",
    )?;
    let fact_check = f_stmt
        .query_map([analysis_id], |row| {
            Ok(FactCheckResult {
                is_factual: row.get(0)?,
                confidence: row.get(1)?,
                explanation: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(StoredAnalysis {
        analysis_id,
        user_id,
        created_at,
        article,
        result: AnalysisResult {
            biases,
            fact_check,
            overall_bias_score,
            overall_factual_score,
            summary,
        },
    }))
}

// ── Stats ──

pub struct Stats {
    pub articles: usize,
    pub users: usize,
    pub biases: usize,
    pub fact_checks: usize,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let articles: usize = conn.query_row("SELECT COUNT(*) FROM articles", [], |r| r.get(0))?;
    let users: usize =
        conn.query_row("SELECT COUNT(DISTINCT user_id) FROM articles", [], |r| r.get(0))?;
    let biases: usize = conn.query_row("SELECT COUNT(*) FROM biases", [], |r| r.get(0))?;
    let fact_checks: usize = conn.query_row("SELECT COUNT(*) FROM fact_checks", [], |r| r.get(0))?;
    Ok(Stats {
        articles,
        users,
        biases,
        fact_checks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys=ON;").unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    fn sample() -> Article {
        let mut a = Article::new(
            "Shocking! Government FAILS Citizens Again",
            "A stunning crisis, according to Reuters. Critics argue otherwise.",
        );
        a.source = Some("Daily Blaze".into());
        a.date = Some("2024-03-01".into());
        a
    }

    #[test]
    fn save_and_fetch_round_trip() {
        let conn = memory_db();
        let article = sample();
        let result = analyze(&article);
        let id = save_analysis(&conn, "u1", &article, &result).unwrap();

        let stored = fetch_analysis(&conn, id).unwrap().unwrap();
        assert_eq!(stored.analysis_id, id);
        assert_eq!(stored.user_id, "u1");
        assert_eq!(stored.article, article);
        assert_eq!(stored.result, result);
    }

    #[test]
    fn fetch_missing_analysis() {
        let conn = memory_db();
        assert!(fetch_analysis(&conn, 42).unwrap().is_none());
    }

    #[test]
    fn history_is_per_user_newest_first() {
        let conn = memory_db();
        let first = Article::new("First", "Body one.");
        let second = Article::new("Second", "Body two.");
        let other = Article::new("Other", "Body three.");
        save_analysis(&conn, "u1", &first, &analyze(&first)).unwrap();
        save_analysis(&conn, "u1", &second, &analyze(&second)).unwrap();
        save_analysis(&conn, "u2", &other, &analyze(&other)).unwrap();

        let rows = fetch_history(&conn, "u1", 10).unwrap();
        let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "First"]);

        let limited = fetch_history(&conn, "u1", 1).unwrap();
        assert_eq!(limited.len(), 1);
        assert!(fetch_history(&conn, "nobody", 10).unwrap().is_empty());
    }

    #[test]
    fn batch_saves_every_record() {
        let conn = memory_db();
        let items: Vec<(Article, AnalysisResult)> = ["One", "Two", "Three"]
            .iter()
            .map(|t| {
                let a = Article::new(*t, "Plain body.");
                let r = analyze(&a);
                (a, r)
            })
            .collect();
        assert_eq!(save_batch(&conn, "u1", &items).unwrap(), 3);

        let stats = get_stats(&conn).unwrap();
        assert_eq!(stats.articles, 3);
        assert_eq!(stats.users, 1);
        assert_eq!(stats.fact_checks, 6);
        let expected_biases: usize = items.iter().map(|(_, r)| r.biases.len()).sum();
        assert_eq!(stats.biases, expected_biases);
    }

    #[test]
    fn one_analysis_per_article() {
        let conn = memory_db();
        let a = sample();
        let r = analyze(&a);
        save_analysis(&conn, "u1", &a, &r).unwrap();
        let dup = conn.execute(
            "INSERT INTO analysis_results
             (article_id, user_id, overall_bias_score, overall_factual_score, summary, created_at)
             VALUES (1, 'u1', 0, 0, '', '')",
            [],
        );
        assert!(dup.is_err());
    }

    #[test]
    fn connect_creates_parent_dir() {
        let dir = std::env::temp_dir().join(format!("newslens-test-{}", std::process::id()));
        let path = dir.join("nested").join("lens.sqlite");
        let conn = connect(&path).unwrap();
        init_schema(&conn).unwrap();
        assert!(path.exists());
        drop(conn);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
