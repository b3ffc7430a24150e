use std::fmt::Write;

use crate::model::{AnalysisResult, Article};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiasLevel {
    Low,
    Moderate,
    High,
}

impl BiasLevel {
    pub fn from_score(score: f64) -> Self {
        if score < 0.3 {
            BiasLevel::Low
        } else if score < 0.7 {
            BiasLevel::Moderate
        } else {
            BiasLevel::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BiasLevel::Low => "Low Bias",
            BiasLevel::Moderate => "Moderate Bias",
            BiasLevel::High => "High Bias",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactualLevel {
    Low,
    Partial,
    High,
}

impl FactualLevel {
    pub fn from_score(score: f64) -> Self {
        if score > 0.7 {
            FactualLevel::High
        } else if score > 0.3 {
            FactualLevel::Partial
        } else {
            FactualLevel::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FactualLevel::Low => "Low Factual",
            FactualLevel::Partial => "Partially Factual",
            FactualLevel::High => "Highly Factual",
        }
    }
}

pub fn percent(score: f64) -> String {
    format!("{}%", (score * 100.0).round() as i64)
}

/// Terminal report: header, both gauges, findings, fact checks, summary.
pub fn render(article: &Article, result: &AnalysisResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", article.title.trim());
    let byline: Vec<&str> = [&article.source, &article.author, &article.date]
        .into_iter()
        .filter_map(|f| f.as_deref())
        .filter(|f| !f.trim().is_empty())
        .collect();
    if !byline.is_empty() {
        let _ = writeln!(out, "{}", byline.join(" | "));
    }
    let _ = writeln!(out, "{}", "-".repeat(60));

    let bias = BiasLevel::from_score(result.overall_bias_score);
    let factual = FactualLevel::from_score(result.overall_factual_score);
    let _ = writeln!(
        out,
        "Bias Level:        {:<18} {:>4}",
        bias.label(),
        percent(result.overall_bias_score)
    );
    let _ = writeln!(
        out,
        "Factual Accuracy:  {:<18} {:>4}",
        factual.label(),
        percent(result.overall_factual_score)
    );

    let _ = writeln!(out, "\n--- Bias findings ---");
    if result.biases.is_empty() {
        let _ = writeln!(out, "  none above threshold");
    }
    for b in &result.biases {
        let _ = writeln!(out, "  {:<15} {:>4}  {}", b.category, percent(b.score), b.explanation);
    }

    let _ = writeln!(out, "\n--- Fact checks ---");
    for (name, c) in ["sources", "statements"].iter().zip(&result.fact_check) {
        let verdict = if c.is_factual { "pass" } else { "fail" };
        let _ = writeln!(
            out,
            "  {:<15} {:<4} {:>4}  {}",
            name,
            verdict,
            percent(c.confidence),
            c.explanation
        );
    }

    let _ = writeln!(out, "\n{}", result.summary);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;

    #[test]
    fn bias_bands() {
        assert_eq!(BiasLevel::from_score(0.0), BiasLevel::Low);
        assert_eq!(BiasLevel::from_score(0.3), BiasLevel::Moderate);
        assert_eq!(BiasLevel::from_score(0.7), BiasLevel::High);
    }

    #[test]
    fn factual_bands() {
        assert_eq!(FactualLevel::from_score(0.3), FactualLevel::Low);
        assert_eq!(FactualLevel::from_score(0.31), FactualLevel::Partial);
        assert_eq!(FactualLevel::from_score(0.71), FactualLevel::High);
        assert_eq!(FactualLevel::High.label(), "Highly Factual");
    }

    #[test]
    fn percent_rounds() {
        assert_eq!(percent(0.0), "0%");
        assert_eq!(percent(0.166), "17%");
        assert_eq!(percent(1.0), "100%");
    }

    #[test]
    fn render_empty_article() {
        let article = Article::new("", "");
        let text = render(&article, &analyze(&article));
        assert!(text.contains("Low Bias"));
        assert!(text.contains("Low Factual"));
        assert!(text.contains("none above threshold"));
        let sources = text.lines().find(|l| l.trim_start().starts_with("sources")).unwrap();
        assert!(sources.contains(" fail "));
        assert!(text.trim_end().ends_with("verification."));
    }

    #[test]
    fn render_byline() {
        let mut article = Article::new("Title", "Body text.");
        article.source = Some("Wire".into());
        article.date = Some("2024-01-02".into());
        let text = render(&article, &analyze(&article));
        assert!(text.starts_with("Title\nWire | 2024-01-02\n"));
    }
}
