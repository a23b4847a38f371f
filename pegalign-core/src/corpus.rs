//! Sentence-pair representation and parallel-text parsing.
//!
//! Words are interned to dense `Token` ids per language side; id 0 is
//! reserved for NULL on the source side. Every source token sequence
//! carries `NULL_TOKEN` at index 0 so that source positions run 0..=l
//! with 0 meaning NULL, while target positions run 1..=m.

use hashbrown::{HashMap, HashSet};

use crate::errors::{AlignError, Result};
use crate::hypothesis::AlignmentInfo;
use crate::types::{Token, MAX_SENT_LEN, NULL_TOKEN};

#[derive(Clone, Debug)]
pub struct SentencePair {
    /// Source tokens, `NULL_TOKEN` at index 0.
    pub src_tokens: Vec<Token>,
    /// Target tokens, 0-based storage; conceptual positions are 1..=m.
    pub trg_tokens: Vec<Token>,
}

impl SentencePair {
    /// Number of real source words, excluding NULL.
    #[inline]
    pub fn source_len(&self) -> usize {
        self.src_tokens.len() - 1
    }

    #[inline]
    pub fn target_len(&self) -> usize {
        self.trg_tokens.len()
    }
}

/// A tokenized sentence-aligned corpus with its two vocabularies.
#[derive(Clone, Debug)]
pub struct ParallelCorpus {
    pub pairs: Vec<SentencePair>,
    /// All source tokens seen in training, NULL included.
    pub src_vocab: HashSet<Token>,
    pub trg_vocab: HashSet<Token>,
    src_ids: HashMap<String, Token>,
    trg_ids: HashMap<String, Token>,
}

impl ParallelCorpus {
    pub fn src_token(&self, word: &str) -> Option<Token> {
        self.src_ids.get(word).copied()
    }

    pub fn trg_token(&self, word: &str) -> Option<Token> {
        self.trg_ids.get(word).copied()
    }
}

fn intern(word: &str, ids: &mut HashMap<String, Token>, next_id: &mut Token) -> Token {
    match ids.get(word) {
        Some(&id) => id,
        None => {
            let id = *next_id;
            *next_id += 1;
            ids.insert(word.to_string(), id);
            id
        }
    }
}

/// Parse two whitespace-tokenized plaintext documents, one sentence per
/// line, into a sentence-aligned corpus.
///
/// Line counts must match. A pair where either line is empty is skipped;
/// it carries no alignment evidence. Sentences longer than
/// `MAX_SENT_LEN` are rejected.
pub fn parse_parallel(src_text: &str, trg_text: &str) -> Result<ParallelCorpus> {
    let src_lines: Vec<&str> = src_text.lines().collect();
    let trg_lines: Vec<&str> = trg_text.lines().collect();
    if src_lines.len() != trg_lines.len() {
        return Err(AlignError::SentenceCountMismatch {
            source_count: src_lines.len(),
            target_count: trg_lines.len(),
        });
    }

    let mut src_ids: HashMap<String, Token> = HashMap::new();
    let mut trg_ids: HashMap<String, Token> = HashMap::new();
    // 0 is reserved for NULL on the source side; kept off the target side
    // too so ids line up across tables.
    let mut next_src_id: Token = 1;
    let mut next_trg_id: Token = 1;
    let mut pairs = Vec::new();

    for (index, (src_line, trg_line)) in src_lines.iter().zip(trg_lines.iter()).enumerate() {
        let src_words: Vec<&str> = src_line.split_whitespace().collect();
        let trg_words: Vec<&str> = trg_line.split_whitespace().collect();
        if src_words.is_empty() || trg_words.is_empty() {
            continue;
        }
        if src_words.len() > MAX_SENT_LEN {
            return Err(AlignError::SentenceTooLong {
                index,
                len: src_words.len(),
            });
        }
        if trg_words.len() > MAX_SENT_LEN {
            return Err(AlignError::SentenceTooLong {
                index,
                len: trg_words.len(),
            });
        }

        let mut src_tokens = Vec::with_capacity(src_words.len() + 1);
        src_tokens.push(NULL_TOKEN);
        for w in src_words {
            src_tokens.push(intern(w, &mut src_ids, &mut next_src_id));
        }
        let mut trg_tokens = Vec::with_capacity(trg_words.len());
        for w in trg_words {
            trg_tokens.push(intern(w, &mut trg_ids, &mut next_trg_id));
        }
        pairs.push(SentencePair {
            src_tokens,
            trg_tokens,
        });
    }

    let mut src_vocab: HashSet<Token> = src_ids.values().copied().collect();
    src_vocab.insert(NULL_TOKEN);
    let trg_vocab: HashSet<Token> = trg_ids.values().copied().collect();

    Ok(ParallelCorpus {
        pairs,
        src_vocab,
        trg_vocab,
        src_ids,
        trg_ids,
    })
}

/// Render one hypothesis as a Moses alignment line: space-separated
/// `src-trg` pairs, both 0-based, NULL links omitted.
pub fn write_moses(alignment_info: &AlignmentInfo<'_>) -> String {
    let mut out = String::new();
    let alignment = alignment_info.alignment();
    for j in 1..=alignment_info.target_len() {
        let i = alignment[j];
        if i != 0 {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&format!("{}-{}", i - 1, j - 1));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_interns_and_prefixes_null() {
        let corpus = parse_parallel("a b a\nb", "x y\nz").unwrap();
        assert_eq!(corpus.pairs.len(), 2);

        let first = &corpus.pairs[0];
        assert_eq!(first.src_tokens[0], NULL_TOKEN);
        assert_eq!(first.source_len(), 3);
        assert_eq!(first.target_len(), 2);
        // Repeated words share one id.
        assert_eq!(first.src_tokens[1], first.src_tokens[3]);

        // NULL plus two source types; three target types.
        assert_eq!(corpus.src_vocab.len(), 3);
        assert_eq!(corpus.trg_vocab.len(), 3);
        assert!(corpus.src_vocab.contains(&NULL_TOKEN));
        assert!(!corpus.trg_vocab.contains(&NULL_TOKEN));

        let a = corpus.src_token("a").unwrap();
        let b = corpus.src_token("b").unwrap();
        assert_ne!(a, b);
        assert!(corpus.src_token("x").is_none());
        assert!(corpus.trg_token("x").is_some());
    }

    #[test]
    fn empty_lines_skip_the_pair() {
        let corpus = parse_parallel("a b\n\nc", "x\ny\nz").unwrap();
        assert_eq!(corpus.pairs.len(), 2);
    }

    #[test]
    fn line_count_mismatch_is_an_error() {
        let err = parse_parallel("a\nb", "x").unwrap_err();
        assert!(matches!(
            err,
            AlignError::SentenceCountMismatch {
                source_count: 2,
                target_count: 1,
            }
        ));
    }

    #[test]
    fn moses_output_drops_null_links() {
        let src: Vec<Token> = vec![NULL_TOKEN, 1, 2];
        let trg: Vec<Token> = vec![3, 4, 5];
        let a = AlignmentInfo::new(
            vec![0, 2, 0, 1].into_boxed_slice(),
            &src,
            &trg,
            vec![1, 1, 1].into_boxed_slice(),
        );
        assert_eq!(write_moses(&a), "1-0 0-2");
    }
}
