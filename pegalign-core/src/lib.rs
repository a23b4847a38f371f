//! Alignment-space sampling for IBM-style statistical translation
//! models (models 3 and above).
//!
//! A generative alignment model explains each target word as the product
//! of exactly one source word or of the NULL token. For a sentence pair
//! with l real source words and m target words the space of alignment
//! functions has (l+1)^m members, so parameter re-estimation cannot
//! enumerate it; this crate produces a small, high-probability sample of
//! hypotheses instead, by pegging alignment points, hill climbing, and
//! neighborhood expansion. The concrete generative formula is supplied
//! by the model variant through [`AlignmentModel`]; the EM loop that
//! consumes the sample lives outside this crate and alternates strictly
//! between a read-only sampling phase and a table write phase.
//!
//! Positions are one-indexed: the first word of a sentence is position
//! 1, and index 0 of the source side is reserved for NULL.
//!
//! References:
//! - Peter F. Brown et al. 1993. The Mathematics of Statistical Machine
//!   Translation: Parameter Estimation. Computational Linguistics 19(2).
//! - Philipp Koehn. 2010. Statistical Machine Translation. Cambridge
//!   University Press.

pub mod corpus;
pub mod errors;
pub mod hypothesis;
pub mod search;
pub mod tables;
pub mod types;

pub use corpus::{parse_parallel, write_moses, ParallelCorpus, SentencePair};
pub use errors::{AlignError, Result};
pub use hypothesis::AlignmentInfo;
pub use search::{best_sample, hillclimb, neighboring, sample, sample_corpus, AlignmentModel};
pub use tables::{AlignmentTable, FertilityTable, ModelTables, TranslationTable};
pub use types::{Link, Prob, Token, MAX_SENT_LEN, MIN_PROB, NULL_TOKEN};
