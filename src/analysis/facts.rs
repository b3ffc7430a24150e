use super::features::{clamp_unit, TextFeatures};
use crate::model::FactCheckResult;

const CONFIDENCE_PER_CITATION: f64 = 0.2;
const STATEMENT_THRESHOLD: f64 = 0.5;
const WELL_SOURCED: usize = 3;

const W_SUPPORT: f64 = 0.4;
const W_FACTUAL_PHRASES: f64 = 0.3;
const W_BALANCE: f64 = 0.3;
const FACTUAL_PHRASE_SATURATION: f64 = 10.0;

/// Always two checks, source verification then statement verification,
/// both read from the body. The title carries no attribution worth checking.
pub fn aggregate_facts(_title: &TextFeatures, content: &TextFeatures) -> Vec<FactCheckResult> {
    let support = &content.factual_support;
    let citations = support.citations.len();

    let source = FactCheckResult {
        is_factual: citations > 0,
        confidence: clamp_unit(citations as f64 * CONFIDENCE_PER_CITATION),
        explanation: match citations {
            0 => "No verifiable sources or citations found in the article.".to_string(),
            n if n < WELL_SOURCED => {
                format!("Limited source verification with only {} citation(s).", n)
            }
            n => format!("Well-supported with {} verifiable sources and citations.", n),
        },
    };

    let statement = FactCheckResult {
        is_factual: support.score > STATEMENT_THRESHOLD,
        confidence: clamp_unit(support.score),
        explanation: if support.factual_phrases.is_empty() {
            "Makes claims without supporting evidence or factual indicators.".to_string()
        } else if support.score < STATEMENT_THRESHOLD {
            "Some statements are supported by evidence, but many claims lack verification."
                .to_string()
        } else {
            "Most statements are supported by evidence or verifiable sources.".to_string()
        },
    };

    vec![source, statement]
}

/// Blend of the body's support score, its raw factual-phrase count (out of
/// ten) and its balance score. Deliberately not the same formula as the
/// per-span factual score.
pub fn overall_factual_score(_title: &TextFeatures, content: &TextFeatures) -> f64 {
    let phrases = content.factual_support.factual_phrases.len() as f64;
    clamp_unit(
        content.factual_support.score * W_SUPPORT
            + (phrases / FACTUAL_PHRASE_SATURATION).min(1.0) * W_FACTUAL_PHRASES
            + content.balanced_reporting.score * W_BALANCE,
    )
}
