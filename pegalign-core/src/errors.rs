use crate::types::MAX_SENT_LEN;

pub type Result<T, E = AlignError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum AlignError {
    #[error("source/target sentence count mismatch: {source_count} vs {target_count}")]
    SentenceCountMismatch {
        source_count: usize,
        target_count: usize,
    },

    #[error("sentence {index} too long: {len} > {}", MAX_SENT_LEN)]
    SentenceTooLong { index: usize, len: usize },
}
