//! Sentiment labels and classifier output.

mod label;

pub use label::{Classification, SentimentLabel};
