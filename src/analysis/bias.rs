use super::features::{clamp_unit, TextFeatures};
use crate::model::{BiasCategory, BiasResult};

// Weights for the overall bias score. They sum to 1.
const W_TITLE_EMOTIONAL: f64 = 0.15;
const W_CONTENT_EMOTIONAL: f64 = 0.20;
const W_TITLE_OPINION: f64 = 0.10;
const W_CONTENT_OPINION: f64 = 0.15;
const W_IMBALANCE: f64 = 0.15;
const W_IDEOLOGICAL: f64 = 0.10;
const W_DEMOGRAPHIC: f64 = 0.10;
const W_SENSATIONALISM: f64 = 0.05;

const TITLE_EMOTIONAL_WEIGHT: f64 = 1.5;
const STRONG_SIGNAL: f64 = 0.5;
const SENSATIONAL_MENTION: f64 = 0.3;

/// Per-category bias findings, in fixed category order, keeping only those
/// above their category threshold.
pub fn aggregate_bias(title: &TextFeatures, content: &TextFeatures) -> Vec<BiasResult> {
    let candidates = [
        (BiasCategory::Political, political_score(title, content)),
        (BiasCategory::Emotional, emotional_score(title, content)),
        (BiasCategory::Balance, balance_score(title, content)),
        (BiasCategory::Demographic, content.demographic_bias.score),
        (BiasCategory::Sensationalism, content.sensationalism.score),
    ];

    candidates
        .into_iter()
        .filter(|(category, score)| category.is_reported(*score))
        .map(|(category, score)| BiasResult {
            category,
            score: clamp_unit(score),
            explanation: explain(category, title, content),
        })
        .collect()
}

/// Weighted sum over eight fixed factors; independent of which categories
/// were reported.
pub fn overall_bias_score(title: &TextFeatures, content: &TextFeatures) -> f64 {
    clamp_unit(
        title.emotional_language.score * W_TITLE_EMOTIONAL
            + content.emotional_language.score * W_CONTENT_EMOTIONAL
            + title.opinion_language.score * W_TITLE_OPINION
            + content.opinion_language.score * W_CONTENT_OPINION
            + content.imbalance() * W_IMBALANCE
            + content.ideological_bias.score * W_IDEOLOGICAL
            + content.demographic_bias.score * W_DEMOGRAPHIC
            + content.sensationalism.score * W_SENSATIONALISM,
    )
}

fn political_score(title: &TextFeatures, content: &TextFeatures) -> f64 {
    let emotional = (title.emotional_language.score + content.emotional_language.score) / 2.0;
    let opinion = (title.opinion_language.score + content.opinion_language.score) / 2.0;
    let imbalance = (title.imbalance() + content.imbalance()) / 2.0;
    let ideological = content.ideological_bias.score;
    (emotional + opinion + imbalance + ideological) / 4.0
}

fn emotional_score(title: &TextFeatures, content: &TextFeatures) -> f64 {
    (title.emotional_language.score * TITLE_EMOTIONAL_WEIGHT
        + content.emotional_language.score
        + content.sensationalism.score)
        / 3.0
}

/// Lack of contrasting viewpoints, content counted twice.
fn balance_score(title: &TextFeatures, content: &TextFeatures) -> f64 {
    (title.imbalance() + content.imbalance() * 2.0) / 3.0
}

// ── Explanations ──

fn explain(category: BiasCategory, title: &TextFeatures, content: &TextFeatures) -> String {
    match category {
        BiasCategory::Political => explain_political(content),
        BiasCategory::Emotional => explain_emotional(content),
        BiasCategory::Balance => explain_balance(content),
        BiasCategory::Demographic => explain_demographic(content),
        BiasCategory::Sensationalism => explain_sensationalism(title, content),
    }
}

fn explain_political(content: &TextFeatures) -> String {
    let has_emotional = content.emotional_language.score > STRONG_SIGNAL;
    let has_opinion = content.opinion_language.score > STRONG_SIGNAL;
    let has_balance = content.balanced_reporting.score > STRONG_SIGNAL;

    let mut explanation = String::new();
    if let Some((side, terms)) = content.ideological_bias.dominant_terms() {
        explanation.push_str(&format!(
            "Shows {} bias through terms like {}. ",
            side,
            quote_list(terms, 2)
        ));
    }
    if has_emotional && !has_balance {
        explanation.push_str(
            "Uses emotionally charged political language without balanced presentation of different viewpoints.",
        );
    } else if has_opinion && !has_balance {
        explanation.push_str(
            "Presents political opinions as facts without adequate supporting evidence or alternative views.",
        );
    }

    let explanation = explanation.trim_end();
    if explanation.is_empty() {
        "Shows potential political bias in language choice and presentation style.".to_string()
    } else {
        explanation.to_string()
    }
}

fn explain_emotional(content: &TextFeatures) -> String {
    let lang = &content.emotional_language;
    let words: Vec<String> = lang
        .positive
        .iter()
        .chain(&lang.negative)
        .chain(&lang.loaded)
        .take(3)
        .cloned()
        .collect();

    let mut explanation = if words.is_empty() {
        "Uses emotionally charged language".to_string()
    } else {
        format!("Uses emotionally charged language (e.g., {})", quote_list(&words, 3))
    };
    if content.sensationalism.score > SENSATIONAL_MENTION && !content.sensationalism.phrases.is_empty() {
        explanation.push_str(&format!(
            " and sensational terms (e.g., {}).",
            quote_list(&content.sensationalism.phrases, 2)
        ));
    } else {
        explanation.push_str(" that may influence reader perception.");
    }
    explanation
}

fn explain_balance(content: &TextFeatures) -> String {
    match content.balanced_reporting.phrases.len() {
        0 => "Presents a one-sided view without adequate representation of alternative perspectives."
            .to_string(),
        n => format!(
            "Shows some balance with {} contrasting viewpoints, but could be more comprehensive.",
            n
        ),
    }
}

fn explain_demographic(content: &TextFeatures) -> String {
    let groups = content.demographic_bias.groups();
    if groups.is_empty() {
        return "Shows subtle demographic bias in language choices.".to_string();
    }
    let kinds: Vec<&str> = groups.iter().map(|(kind, _)| *kind).collect();
    let examples: Vec<String> = groups.iter().map(|(_, found)| found[0].clone()).collect();
    format!(
        "Contains {} bias through phrases like {}",
        kinds.join(" and "),
        quote_list(&examples, examples.len())
    )
}

fn explain_sensationalism(title: &TextFeatures, content: &TextFeatures) -> String {
    let phrases: Vec<String> = title
        .sensationalism
        .phrases
        .iter()
        .chain(&content.sensationalism.phrases)
        .take(3)
        .cloned()
        .collect();
    if phrases.is_empty() {
        return "Uses sensational framing to dramatize the content.".to_string();
    }
    format!(
        "Uses sensational language (e.g., {}) to dramatize the content.",
        quote_list(&phrases, 3)
    )
}

/// `"a", "b"` from the first `n` items.
fn quote_list(items: &[String], n: usize) -> String {
    items
        .iter()
        .take(n)
        .map(|s| format!("\"{}\"", s))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::features::{extract, Leaning};

    fn categories(biases: &[BiasResult]) -> Vec<BiasCategory> {
        biases.iter().map(|b| b.category).collect()
    }

    #[test]
    fn nothing_reported_for_empty_spans() {
        let empty = extract("");
        assert!(aggregate_bias(&empty, &empty).is_empty());
        assert_eq!(overall_bias_score(&empty, &empty), 0.0);
    }

    #[test]
    fn neutral_single_sentence_is_one_sided() {
        // No balance phrases anywhere: imbalance 1 on both spans.
        let title = extract("Council meets");
        let content = extract("The council met on Tuesday to review the budget.");
        let biases = aggregate_bias(&title, &content);
        assert_eq!(categories(&biases), vec![BiasCategory::Balance]);
        assert_eq!(biases[0].score, 1.0);
        assert_eq!(
            biases[0].explanation,
            "Presents a one-sided view without adequate representation of alternative perspectives."
        );
        assert!((overall_bias_score(&title, &content) - 0.15).abs() < 1e-9);
    }

    #[test]
    fn balanced_content_suppresses_balance_bias() {
        let title = extract("Council meets");
        let content = extract("Taxes rose. However, critics argue otherwise.");
        let biases = aggregate_bias(&title, &content);
        // content balance saturates: (1 + 0) / 3 is below 0.4
        assert!(!categories(&biases).contains(&BiasCategory::Balance));
    }

    #[test]
    fn balance_explanation_counts_phrases() {
        let mut content = extract("Taxes rose. However, it was fine.");
        content.balanced_reporting.score = 0.0;
        let title = extract("Budget");
        let biases = aggregate_bias(&title, &content);
        let balance = biases.iter().find(|b| b.category == BiasCategory::Balance).unwrap();
        assert_eq!(
            balance.explanation,
            "Shows some balance with 1 contrasting viewpoints, but could be more comprehensive."
        );
    }

    #[test]
    fn sensational_article() {
        let title = extract("Shocking! Government FAILS Citizens Again");
        let content = extract("A shocking bombshell. The crisis is a terrible disaster.");
        let biases = aggregate_bias(&title, &content);
        let cats = categories(&biases);
        assert!(cats.contains(&BiasCategory::Emotional));
        assert!(cats.contains(&BiasCategory::Sensationalism));

        let sens = biases.iter().find(|b| b.category == BiasCategory::Sensationalism).unwrap();
        assert_eq!(
            sens.explanation,
            "Uses sensational language (e.g., \"Shocking\", \"shocking\", \"bombshell\") to dramatize the content."
        );

        let emo = biases.iter().find(|b| b.category == BiasCategory::Emotional).unwrap();
        assert_eq!(
            emo.explanation,
            "Uses emotionally charged language (e.g., \"terrible\", \"shocking\") and sensational terms (e.g., \"shocking\", \"bombshell\")."
        );
    }

    #[test]
    fn political_explanation_names_dominant_terms() {
        let title = extract("Woke mob");
        let content = extract("The woke radical left pushes a socialist agenda. Obviously this is terrible.");
        assert_eq!(content.ideological_bias.dominant, Some(Leaning::Conservative));
        let biases = aggregate_bias(&title, &content);
        let political = biases.iter().find(|b| b.category == BiasCategory::Political).unwrap();
        assert!(political
            .explanation
            .starts_with("Shows conservative bias through terms like \"radical left\", \"socialist agenda\"."));
        assert!(political.explanation.ends_with("balanced presentation of different viewpoints."));
    }

    #[test]
    fn demographic_explanation() {
        let content = extract("Those people never work. Kids these days are lazy.");
        let biases = aggregate_bias(&extract("Opinion"), &content);
        let demo = biases.iter().find(|b| b.category == BiasCategory::Demographic).unwrap();
        assert_eq!(demo.score, 0.5);
        assert_eq!(
            demo.explanation,
            "Contains age and cultural bias through phrases like \"Kids these days\", \"Those people\""
        );
    }

    #[test]
    fn overall_ignores_reporting_thresholds() {
        let title = extract("Budget");
        let content = extract("I think taxes rose. However, critics argue otherwise.");
        let biases = aggregate_bias(&title, &content);
        let overall = overall_bias_score(&title, &content);
        assert!(biases.iter().all(|b| b.category != BiasCategory::Balance));
        // content opinion saturates (1 / 0.6) and contributes its weight regardless
        assert!(overall >= W_CONTENT_OPINION);
    }

    #[test]
    fn quote_list_takes_prefix() {
        let items = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(quote_list(&items, 2), "\"a\", \"b\"");
        assert_eq!(quote_list(&items[..1], 3), "\"a\"");
    }
}
