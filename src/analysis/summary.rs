use crate::model::{BiasResult, FactCheckResult};

const SIGNIFICANT_BIAS: f64 = 0.7;
const MODERATE_BIAS: f64 = 0.4;
const LOW_FACTUAL: f64 = 0.3;
const WELL_SUPPORTED: f64 = 0.7;

/// Two sentences: the bias verdict, then the factual verdict.
pub fn summarize(
    overall_bias: f64,
    overall_factual: f64,
    biases: &[BiasResult],
    _fact_checks: &[FactCheckResult],
) -> String {
    let bias_sentence = if overall_bias > SIGNIFICANT_BIAS {
        if biases.is_empty() {
            "This article shows significant bias.".to_string()
        } else {
            let categories: Vec<&str> = biases.iter().map(|b| b.category.as_str()).collect();
            format!(
                "This article shows significant bias, particularly in {}.",
                categories.join(" and ")
            )
        }
    } else if overall_bias > MODERATE_BIAS {
        match biases.first() {
            Some(first) => format!(
                "This article shows moderate bias. Main concerns are in {} presentation.",
                first.category
            ),
            None => "This article shows moderate bias.".to_string(),
        }
    } else {
        "This article shows minimal bias.".to_string()
    };

    let factual_sentence = if overall_factual < LOW_FACTUAL {
        "The factual accuracy is very low, with insufficient source citations and verification."
    } else if overall_factual < WELL_SUPPORTED {
        "The factual accuracy is questionable in some areas. More source verification would improve credibility."
    } else {
        "The factual accuracy appears to be well-supported with proper citations and verifiable information."
    };

    format!("{} {}", bias_sentence, factual_sentence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BiasCategory;

    fn bias(category: BiasCategory) -> BiasResult {
        BiasResult {
            category,
            score: 0.9,
            explanation: String::new(),
        }
    }

    #[test]
    fn minimal_and_very_low() {
        let s = summarize(0.0, 0.0, &[], &[]);
        assert_eq!(
            s,
            "This article shows minimal bias. The factual accuracy is very low, with insufficient source citations and verification."
        );
    }

    #[test]
    fn significant_lists_every_category() {
        let biases = [bias(BiasCategory::Emotional), bias(BiasCategory::Sensationalism)];
        let s = summarize(0.8, 0.5, &biases, &[]);
        assert!(s.starts_with(
            "This article shows significant bias, particularly in emotional and sensationalism."
        ));
        assert!(s.ends_with("More source verification would improve credibility."));
    }

    #[test]
    fn moderate_names_first_category_only() {
        let biases = [bias(BiasCategory::Balance), bias(BiasCategory::Political)];
        let s = summarize(0.5, 0.9, &biases, &[]);
        assert!(s.starts_with(
            "This article shows moderate bias. Main concerns are in balance presentation."
        ));
        assert!(!s.contains("political"));
        assert!(s.ends_with("with proper citations and verifiable information."));
    }

    #[test]
    fn band_edges() {
        assert!(summarize(0.7, 0.0, &[], &[]).starts_with("This article shows moderate bias."));
        assert!(summarize(0.4, 0.0, &[], &[]).starts_with("This article shows minimal bias."));
        assert!(summarize(0.0, 0.3, &[], &[]).contains("questionable"));
        assert!(summarize(0.0, 0.7, &[], &[]).contains("well-supported"));
    }
}
