//! Name-in-text matching: normalization, word windows, and fuzzy scoring.

mod exact;
mod fuzzy;
mod normalize;
mod result;
mod score;
mod windows;

pub use exact::exact_match;
pub use fuzzy::{DEFAULT_THRESHOLD, MatchStrategy, Matcher, find_name_in_string};
pub use normalize::normalize;
pub use result::MatchResult;
pub use score::Scorer;
pub use windows::WordWindows;
