pub mod analysis;
pub mod db;
pub mod error;
pub mod lexicon;
pub mod model;
pub mod report;
pub mod settings;

pub use analysis::analyze;
pub use error::ArticleError;
pub use model::{AnalysisResult, Article, BiasCategory, BiasResult, FactCheckResult};
