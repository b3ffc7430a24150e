use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::lexicon;

static SENTENCE_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

// Denominator scales: a span "saturates" once matches reach this share of
// its words or sentences.
const EMOTIONAL_PER_WORD: f64 = 0.1;
const OPINION_PER_SENTENCE: f64 = 0.3;
const BALANCE_PER_SENTENCE: f64 = 0.2;
const SENSATIONAL_PER_SENTENCE: f64 = 0.15;
const CITATION_WEIGHT: f64 = 1.5;
const FACTUAL_SCALE: f64 = 0.7;
const IDEOLOGY_PER_MARKER: f64 = 0.2;
const DEMOGRAPHIC_PER_MARKER: f64 = 0.25;
const DOMINANCE_RATIO: f64 = 1.5;

/// Lexical signals for one span of text (a title or a body).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFeatures {
    pub word_count: usize,
    pub sentence_count: usize,
    pub emotional_language: EmotionalLanguage,
    pub opinion_language: PhraseScore,
    pub balanced_reporting: PhraseScore,
    pub factual_support: FactualSupport,
    pub ideological_bias: IdeologicalBias,
    pub demographic_bias: DemographicBias,
    pub sensationalism: PhraseScore,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PhraseScore {
    pub phrases: Vec<String>,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmotionalLanguage {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub loaded: Vec<String>,
    pub sensational: Vec<String>,
    pub score: f64,
}

impl EmotionalLanguage {
    pub fn total(&self) -> usize {
        self.positive.len() + self.negative.len() + self.loaded.len() + self.sensational.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactualSupport {
    pub citations: Vec<String>,
    pub factual_phrases: Vec<String>,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Leaning {
    Conservative,
    Liberal,
}

impl fmt::Display for Leaning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Leaning::Conservative => "conservative",
            Leaning::Liberal => "liberal",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeologicalBias {
    pub conservative: Vec<String>,
    pub liberal: Vec<String>,
    pub score: f64,
    pub dominant: Option<Leaning>,
}

impl IdeologicalBias {
    /// Markers on the dominant side, if there is one.
    pub fn dominant_terms(&self) -> Option<(Leaning, &[String])> {
        self.dominant.map(|side| match side {
            Leaning::Conservative => (side, self.conservative.as_slice()),
            Leaning::Liberal => (side, self.liberal.as_slice()),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DemographicBias {
    pub gender: Vec<String>,
    pub age: Vec<String>,
    pub socioeconomic: Vec<String>,
    pub cultural: Vec<String>,
    pub score: f64,
}

impl DemographicBias {
    pub fn total(&self) -> usize {
        self.gender.len() + self.age.len() + self.socioeconomic.len() + self.cultural.len()
    }

    /// Non-empty groups in fixed order: gender, age, socioeconomic, cultural.
    pub fn groups(&self) -> Vec<(&'static str, &[String])> {
        [
            ("gender", self.gender.as_slice()),
            ("age", self.age.as_slice()),
            ("socioeconomic", self.socioeconomic.as_slice()),
            ("cultural", self.cultural.as_slice()),
        ]
        .into_iter()
        .filter(|(_, found)| !found.is_empty())
        .collect()
    }
}

impl TextFeatures {
    /// `1 - balance`, or 0 for a span with no sentences: empty text has no
    /// viewpoint to be one-sided about.
    pub fn imbalance(&self) -> f64 {
        if self.sentence_count == 0 {
            0.0
        } else {
            1.0 - self.balanced_reporting.score
        }
    }
}

/// Scan one span against every lexicon. Total over all inputs.
pub fn extract(text: &str) -> TextFeatures {
    let word_count = text.split_whitespace().count();
    let sentence_count = SENTENCE_SPLIT_RE
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .count();
    let words = word_count as f64;
    let sentences = sentence_count as f64;

    let mut emotional_language = EmotionalLanguage {
        positive: lexicon::POSITIVE.find_all(text),
        negative: lexicon::NEGATIVE.find_all(text),
        loaded: lexicon::LOADED.find_all(text),
        sensational: lexicon::SENSATIONAL.find_all(text),
        score: 0.0,
    };
    emotional_language.score = ratio(emotional_language.total() as f64, words * EMOTIONAL_PER_WORD);

    let opinion = lexicon::OPINION.find_all(text);
    let opinion_language = PhraseScore {
        score: ratio(opinion.len() as f64, sentences * OPINION_PER_SENTENCE),
        phrases: opinion,
    };

    let balanced = lexicon::BALANCED.find_all(text);
    let balanced_reporting = PhraseScore {
        score: ratio(balanced.len() as f64, sentences * BALANCE_PER_SENTENCE),
        phrases: balanced,
    };

    let citations = lexicon::find_citations(text);
    let factual_phrases = lexicon::FACTUAL.find_all(text);
    let weighted = citations.len() as f64 * CITATION_WEIGHT + factual_phrases.len() as f64;
    let factual_support = FactualSupport {
        score: clamp_unit(ratio_unclamped(weighted, sentences) * FACTUAL_SCALE),
        citations,
        factual_phrases,
    };

    let sensational = lexicon::SENSATIONAL.find_all(text);
    let sensationalism = PhraseScore {
        score: ratio(sensational.len() as f64, sentences * SENSATIONAL_PER_SENTENCE),
        phrases: sensational,
    };

    TextFeatures {
        word_count,
        sentence_count,
        emotional_language,
        opinion_language,
        balanced_reporting,
        factual_support,
        ideological_bias: ideological(text),
        demographic_bias: demographic(text),
        sensationalism,
    }
}

fn ideological(text: &str) -> IdeologicalBias {
    let conservative = lexicon::CONSERVATIVE.find_all(text);
    let liberal = lexicon::LIBERAL.find_all(text);
    let (c, l) = (conservative.len() as f64, liberal.len() as f64);

    let dominant = if c > l * DOMINANCE_RATIO {
        Some(Leaning::Conservative)
    } else if l > c * DOMINANCE_RATIO {
        Some(Leaning::Liberal)
    } else {
        None
    };

    IdeologicalBias {
        score: clamp_unit((c + l) * IDEOLOGY_PER_MARKER),
        conservative,
        liberal,
        dominant,
    }
}

fn demographic(text: &str) -> DemographicBias {
    let mut bias = DemographicBias {
        gender: lexicon::GENDER.find_all(text),
        age: lexicon::AGE.find_all(text),
        socioeconomic: lexicon::SOCIOECONOMIC.find_all(text),
        cultural: lexicon::CULTURAL.find_all(text),
        score: 0.0,
    };
    bias.score = clamp_unit(bias.total() as f64 * DEMOGRAPHIC_PER_MARKER);
    bias
}

fn ratio(count: f64, basis: f64) -> f64 {
    clamp_unit(ratio_unclamped(count, basis))
}

fn ratio_unclamped(count: f64, basis: f64) -> f64 {
    if basis > 0.0 {
        count / basis
    } else {
        0.0
    }
}

pub(crate) fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}
