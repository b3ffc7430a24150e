pub mod bias;
pub mod facts;
pub mod features;
pub mod summary;

use tracing::debug;

use crate::model::{AnalysisResult, Article};
pub use features::{extract, TextFeatures};

/// Features for title and content, then bias findings, fact checks,
/// overall scores and the summary. Blank fields give zero scores.
pub fn analyze(article: &Article) -> AnalysisResult {
    let title = features::extract(&article.title);
    let content = features::extract(&article.content);
    debug!(
        title_words = title.word_count,
        content_words = content.word_count,
        content_sentences = content.sentence_count,
        citations = content.factual_support.citations.len(),
        "Extracted features"
    );

    let biases = bias::aggregate_bias(&title, &content);
    let fact_check = facts::aggregate_facts(&title, &content);
    let overall_bias_score = bias::overall_bias_score(&title, &content);
    let overall_factual_score = facts::overall_factual_score(&title, &content);
    let summary = summary::summarize(overall_bias_score, overall_factual_score, &biases, &fact_check);

    debug!(
        overall_bias_score,
        overall_factual_score,
        reported = biases.len(),
        "Analysis complete"
    );

    AnalysisResult {
        biases,
        fact_check,
        overall_bias_score,
        overall_factual_score,
        summary,
    }
}
