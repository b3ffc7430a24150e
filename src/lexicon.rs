use std::sync::LazyLock;

use regex::Regex;

// ── Emotional language ──

pub const POSITIVE_WORDS: &[&str] = &[
    "amazing", "incredible", "excellent", "outstanding", "remarkable",
    "fantastic", "wonderful", "brilliant", "spectacular", "extraordinary",
    "triumph", "perfect", "best", "great", "revolutionary",
    "innovative", "exceptional", "superb", "magnificent", "marvelous",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "terrible", "horrible", "awful", "disastrous", "catastrophic",
    "failed", "worst", "incompetent", "unacceptable", "disappointing",
    "shocking", "poor", "bad", "wrong", "devastating",
    "pathetic", "disgraceful", "appalling", "dreadful", "inadequate",
];

pub const LOADED_WORDS: &[&str] = &[
    "obviously", "clearly", "undoubtedly", "certainly", "absolutely",
    "definitely", "everyone knows", "without question", "naturally",
    "of course", "surely", "always", "never", "must", "ought",
    "indisputably", "unquestionably", "beyond doubt", "plainly", "evidently",
];

pub const SENSATIONAL_WORDS: &[&str] = &[
    "shocking", "explosive", "stunning", "dramatic", "scandalous",
    "outrageous", "bombshell", "crisis", "chaos", "emergency",
    "unprecedented", "groundbreaking", "game-changing", "revolutionary", "historic",
];

// ── Reporting style ──

pub const OPINION_INDICATORS: &[&str] = &[
    "believe", "think", "feel", "suggest", "seem",
    "appear", "likely", "probably", "maybe", "perhaps",
    "possibly", "might", "could", "may", "speculate",
    "assume", "suspect", "guess", "estimate", "presume",
    "opinion", "perspective", "viewpoint", "stance", "position",
];

pub const BALANCED_PHRASES: &[&str] = &[
    "on the other hand", "however", "conversely", "in contrast",
    "alternatively", "despite this", "nevertheless", "nonetheless",
    "while", "although", "even though", "contrary to", "meanwhile",
    "critics argue", "supporters say", "some argue", "others maintain",
    "proponents suggest", "opponents claim", "debates continue", "evidence varies",
];

pub const FACTUAL_INDICATORS: &[&str] = &[
    "according to", "research shows", "data indicates", "study finds",
    "evidence suggests", "statistics show", "records indicate",
    "survey reveals", "analysis shows", "results demonstrate",
    "researchers found", "experts say", "data shows", "report states",
    "documented in", "measured by", "verified through", "confirmed by",
];

// ── Ideology ──

pub const CONSERVATIVE_MARKERS: &[&str] = &[
    "radical left", "socialist agenda", "liberal elite", "mainstream media",
    "big government", "job creators", "tax burden", "welfare state",
    "political correctness", "cancel culture", "woke", "traditional values",
];

pub const LIBERAL_MARKERS: &[&str] = &[
    "right-wing", "corporate greed", "conservative agenda", "alt-right",
    "big business", "income inequality", "systemic", "privilege",
    "progressive", "reform", "equity", "social justice",
];

// ── Demographics ──

pub const GENDER_MARKERS: &[&str] = &[
    "typical woman", "typical man", "like a girl", "like a man",
    "feminine", "masculine", "maternal", "paternal", "gender roles",
];

pub const AGE_MARKERS: &[&str] = &[
    "millennials are", "boomers are", "young people today",
    "older generation", "kids these days", "back in my day",
];

pub const SOCIOECONOMIC_MARKERS: &[&str] = &[
    "elite", "working class", "poor people", "rich people",
    "welfare recipients", "job creators", "inner city", "coastal elite",
];

pub const CULTURAL_MARKERS: &[&str] = &[
    "those people", "these people", "their kind", "urban", "rural",
    "traditional", "foreign", "exotic", "normal", "regular",
];

// ── Attribution ──

const CITATION_SOURCES: &[&str] = &[
    r"according to [^.]+",
    r"cited by [^.]+",
    r"quoted in [^.]+",
    r"reported by [^.]+",
    r"stated by [^.]+",
    r#""[^"]+" said [^.]+"#,
    r#""[^"]+" says [^.]+"#,
    r"study by [^.]+",
    r"research from [^.]+",
    r"data from [^.]+",
];

/// A lexicon category compiled to one case-insensitive whole-phrase
/// pattern per entry. Compiled `Regex` values carry no cursor, so a set is
/// shared freely between threads.
pub struct PhraseSet {
    patterns: Vec<Regex>,
}

impl PhraseSet {
    pub fn new(phrases: &[&str]) -> Self {
        let patterns = phrases
            .iter()
            .map(|p| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(p))).unwrap())
            .collect();
        PhraseSet { patterns }
    }

    /// Every occurrence, grouped by lexicon order, with the text's own casing.
    pub fn find_all(&self, text: &str) -> Vec<String> {
        self.patterns
            .iter()
            .flat_map(|re| re.find_iter(text).map(|m| m.as_str().to_string()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

pub static POSITIVE: LazyLock<PhraseSet> = LazyLock::new(|| PhraseSet::new(POSITIVE_WORDS));
pub static NEGATIVE: LazyLock<PhraseSet> = LazyLock::new(|| PhraseSet::new(NEGATIVE_WORDS));
pub static LOADED: LazyLock<PhraseSet> = LazyLock::new(|| PhraseSet::new(LOADED_WORDS));
pub static SENSATIONAL: LazyLock<PhraseSet> = LazyLock::new(|| PhraseSet::new(SENSATIONAL_WORDS));
pub static OPINION: LazyLock<PhraseSet> = LazyLock::new(|| PhraseSet::new(OPINION_INDICATORS));
pub static BALANCED: LazyLock<PhraseSet> = LazyLock::new(|| PhraseSet::new(BALANCED_PHRASES));
pub static FACTUAL: LazyLock<PhraseSet> = LazyLock::new(|| PhraseSet::new(FACTUAL_INDICATORS));
pub static CONSERVATIVE: LazyLock<PhraseSet> = LazyLock::new(|| PhraseSet::new(CONSERVATIVE_MARKERS));
pub static LIBERAL: LazyLock<PhraseSet> = LazyLock::new(|| PhraseSet::new(LIBERAL_MARKERS));
pub static GENDER: LazyLock<PhraseSet> = LazyLock::new(|| PhraseSet::new(GENDER_MARKERS));
pub static AGE: LazyLock<PhraseSet> = LazyLock::new(|| PhraseSet::new(AGE_MARKERS));
pub static SOCIOECONOMIC: LazyLock<PhraseSet> = LazyLock::new(|| PhraseSet::new(SOCIOECONOMIC_MARKERS));
pub static CULTURAL: LazyLock<PhraseSet> = LazyLock::new(|| PhraseSet::new(CULTURAL_MARKERS));

static CITATION_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    CITATION_SOURCES
        .iter()
        .map(|p| Regex::new(&format!("(?i){}", p)).unwrap())
        .collect()
});

/// Attribution phrases, pattern by pattern, as they appear in `text`.
pub fn find_citations(text: &str) -> Vec<String> {
    CITATION_RES
        .iter()
        .flat_map(|re| re.find_iter(text).map(|m| m.as_str().to_string()))
        .collect()
}
