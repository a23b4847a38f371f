//! Shared probability tables read by the seeding heuristic and by the
//! model-variant scoring functions.
//!
//! All three tables are sparse maps whose misses resolve to [`MIN_PROB`]
//! rather than zero or an error. Writing them belongs to the external EM
//! re-estimation step; sampling only ever reads. Reads take `&self` and
//! the write phase needs `&mut self`, so a sampler can never observe a
//! half-written entry.

use core::hash::Hash;

use hashbrown::{HashMap, HashSet};

use crate::corpus::ParallelCorpus;
use crate::types::{Prob, Token, MIN_PROB};

#[inline]
fn lookup_or_floor<K: Hash + Eq>(table: &HashMap<K, Prob>, key: &K) -> Prob {
    table.get(key).copied().unwrap_or(MIN_PROB)
}

/// p(target word | source word), keyed `(t, s)`.
#[derive(Clone, Debug, Default)]
pub struct TranslationTable {
    probs: HashMap<(Token, Token), Prob>,
}

impl TranslationTable {
    #[inline]
    pub fn prob(&self, trg_word: Token, src_word: Token) -> Prob {
        lookup_or_floor(&self.probs, &(trg_word, src_word))
    }

    pub fn set(&mut self, trg_word: Token, src_word: Token, prob: Prob) {
        self.probs.insert((trg_word, src_word), prob);
    }

    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }
}

/// p(source position i | target position j, source length l, target
/// length m). Used by model 2 and by the seeding heuristic of the
/// higher models.
#[derive(Clone, Debug, Default)]
pub struct AlignmentTable {
    probs: HashMap<(u16, u16, u16, u16), Prob>,
}

impl AlignmentTable {
    /// Positions and lengths are `usize` at the call sites; sentence
    /// lengths are capped at parse time so the narrowing is lossless.
    #[inline]
    pub fn prob(&self, i: usize, j: usize, l: usize, m: usize) -> Prob {
        lookup_or_floor(&self.probs, &(i as u16, j as u16, l as u16, m as u16))
    }

    pub fn set(&mut self, i: usize, j: usize, l: usize, m: usize, prob: Prob) {
        self.probs
            .insert((i as u16, j as u16, l as u16, m as u16), prob);
    }
}

/// p(fertility φ | source word), keyed `(φ, s)`.
#[derive(Clone, Debug, Default)]
pub struct FertilityTable {
    probs: HashMap<(u16, Token), Prob>,
}

impl FertilityTable {
    #[inline]
    pub fn prob(&self, fertility: usize, src_word: Token) -> Prob {
        lookup_or_floor(&self.probs, &(fertility as u16, src_word))
    }

    pub fn set(&mut self, fertility: usize, src_word: Token, prob: Prob) {
        self.probs.insert((fertility as u16, src_word), prob);
    }
}

/// The full table state shared by seeding, scoring, and re-estimation:
/// the three sparse tables, the NULL-insertion probability `p1`, and the
/// vocabularies derived once from the training corpus.
#[derive(Clone, Debug)]
pub struct ModelTables {
    pub translation: TranslationTable,
    pub alignment: AlignmentTable,
    pub fertility: FertilityTable,

    /// Probability that a generated target word requires another target
    /// word aligned to NULL. Read by models 3 and above, not by the
    /// sampler itself.
    pub p1: Prob,

    /// All source words seen in training, NULL included.
    pub src_vocab: HashSet<Token>,
    /// All target words seen in training.
    pub trg_vocab: HashSet<Token>,
}

impl ModelTables {
    pub fn new() -> Self {
        ModelTables {
            translation: TranslationTable::default(),
            alignment: AlignmentTable::default(),
            fertility: FertilityTable::default(),
            p1: 0.5,
            src_vocab: HashSet::new(),
            trg_vocab: HashSet::new(),
        }
    }

    /// Empty tables with vocabularies taken from `corpus`.
    pub fn from_corpus(corpus: &ParallelCorpus) -> Self {
        let mut tables = ModelTables::new();
        tables.src_vocab = corpus.src_vocab.clone();
        tables.trg_vocab = corpus.trg_vocab.clone();
        tables
    }
}

impl Default for ModelTables {
    fn default() -> Self {
        ModelTables::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NULL_TOKEN;

    #[test]
    fn unseen_keys_yield_the_floor_exactly() {
        let tables = ModelTables::new();
        assert_eq!(tables.translation.prob(42, 7), MIN_PROB);
        assert_eq!(tables.translation.prob(42, NULL_TOKEN), MIN_PROB);
        assert_eq!(tables.alignment.prob(1, 2, 3, 4), MIN_PROB);
        assert_eq!(tables.fertility.prob(0, 7), MIN_PROB);
    }

    #[test]
    fn set_then_lookup_and_overwrite() {
        let mut tables = ModelTables::new();
        tables.translation.set(3, 1, 0.25);
        assert_eq!(tables.translation.prob(3, 1), 0.25);
        tables.translation.set(3, 1, 0.5);
        assert_eq!(tables.translation.prob(3, 1), 0.5);
        // Neighboring keys are unaffected.
        assert_eq!(tables.translation.prob(1, 3), MIN_PROB);
    }

    #[test]
    fn p1_starts_at_half() {
        assert_eq!(ModelTables::new().p1, 0.5);
    }
}
