use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ArticleError, UnknownCategory};

// ── Input ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// ISO `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Article {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Article {
            title: title.into(),
            content: content.into(),
            source: None,
            author: None,
            date: None,
        }
    }

    /// Required-field checks for callers. `analyze` accepts anything.
    pub fn validate(&self) -> Result<(), ArticleError> {
        if self.title.trim().is_empty() {
            return Err(ArticleError::EmptyTitle);
        }
        if self.content.trim().is_empty() {
            return Err(ArticleError::EmptyContent);
        }
        if let Some(date) = &self.date {
            NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
                .map_err(|_| ArticleError::InvalidDate(date.clone()))?;
        }
        Ok(())
    }

    /// Canned article for pre-filling inputs, dated today.
    pub fn example() -> Self {
        Article {
            title: "New Study Reveals Surprising Economic Trends".to_string(),
            content: EXAMPLE_CONTENT.to_string(),
            source: Some("Example News Network".to_string()),
            author: Some("Sample Author".to_string()),
            date: Some(Local::now().date_naive().format("%Y-%m-%d").to_string()),
        }
    }
}

const EXAMPLE_CONTENT: &str = "In a groundbreaking study released yesterday, economists have discovered that recent policy changes have had a dramatic impact on middle-class families. The controversial findings suggest that the current administration's approach has failed to address key concerns of everyday citizens.

Dr. Jane Smith, lead researcher on the study, stated that \"the data clearly shows a pattern that many political leaders are choosing to ignore.\" Critics, however, have questioned the methodology of the study, pointing out potential flaws in data collection.

Meanwhile, supporters of the current policies argue that the study fails to account for long-term benefits that will eventually reach all economic classes. \"This is just another example of biased research pushing a specific agenda,\" said government spokesperson John Davis.

The study comes at a critical time as lawmakers debate the next phase of economic legislation, with billions of dollars at stake and millions of lives potentially affected by the outcome.";

// ── Output ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiasCategory {
    Political,
    Emotional,
    Balance,
    Demographic,
    Sensationalism,
}

impl BiasCategory {
    pub const ALL: [BiasCategory; 5] = [
        BiasCategory::Political,
        BiasCategory::Emotional,
        BiasCategory::Balance,
        BiasCategory::Demographic,
        BiasCategory::Sensationalism,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BiasCategory::Political => "political",
            BiasCategory::Emotional => "emotional",
            BiasCategory::Balance => "balance",
            BiasCategory::Demographic => "demographic",
            BiasCategory::Sensationalism => "sensationalism",
        }
    }

    /// A category is reported only when its score is strictly above this.
    pub fn threshold(self) -> f64 {
        match self {
            BiasCategory::Political | BiasCategory::Emotional | BiasCategory::Demographic => 0.3,
            BiasCategory::Balance | BiasCategory::Sensationalism => 0.4,
        }
    }

    pub fn is_reported(self, score: f64) -> bool {
        score > self.threshold()
    }
}

impl fmt::Display for BiasCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BiasCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BiasCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasResult {
    pub category: BiasCategory,
    pub score: f64,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactCheckResult {
    pub is_factual: bool,
    pub confidence: f64,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub biases: Vec<BiasResult>,
    pub fact_check: Vec<FactCheckResult>,
    pub overall_bias_score: f64,
    pub overall_factual_score: f64,
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_requires_title_and_content() {
        assert_eq!(Article::new("  ", "body").validate(), Err(ArticleError::EmptyTitle));
        assert_eq!(Article::new("Title", "\n\t").validate(), Err(ArticleError::EmptyContent));
        assert!(Article::new("Title", "Body.").validate().is_ok());
    }

    #[test]
    fn validate_checks_date_format() {
        let mut a = Article::new("Title", "Body.");
        a.date = Some("2024-02-30".into());
        assert_eq!(a.validate(), Err(ArticleError::InvalidDate("2024-02-30".into())));
        a.date = Some("2024-02-29".into());
        assert!(a.validate().is_ok());
    }

    #[test]
    fn example_is_valid() {
        let a = Article::example();
        assert!(a.validate().is_ok());
        assert_eq!(a.source.as_deref(), Some("Example News Network"));
    }

    #[test]
    fn category_round_trips_through_str() {
        for c in BiasCategory::ALL {
            assert_eq!(c.as_str().parse::<BiasCategory>(), Ok(c));
        }
        assert_eq!(
            "racial".parse::<BiasCategory>(),
            Err(UnknownCategory("racial".into()))
        );
    }

    #[test]
    fn threshold_is_strict() {
        assert!(!BiasCategory::Emotional.is_reported(0.3));
        assert!(BiasCategory::Emotional.is_reported(0.31));
        assert!(!BiasCategory::Political.is_reported(0.3));
        assert!(BiasCategory::Political.is_reported(0.31));
        assert!(!BiasCategory::Balance.is_reported(0.4));
    }

    #[test]
    fn json_field_names() {
        let r = AnalysisResult {
            biases: vec![BiasResult {
                category: BiasCategory::Sensationalism,
                score: 0.5,
                explanation: "x".into(),
            }],
            fact_check: vec![FactCheckResult {
                is_factual: true,
                confidence: 1.0,
                explanation: "y".into(),
            }],
            overall_bias_score: 0.1,
            overall_factual_score: 0.2,
            summary: "s".into(),
        };
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["biases"][0]["category"], "sensationalism");
        assert_eq!(v["factCheck"][0]["isFactual"], true);
        assert_eq!(v["overallBiasScore"], 0.1);
    }

    #[test]
    fn article_optional_fields_default() {
        let a: Article = serde_json::from_str(r#"{"title":"T","content":"C"}"#).unwrap();
        assert_eq!(a, Article::new("T", "C"));
    }
}
