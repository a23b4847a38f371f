//! Local search over the alignment space of one sentence pair.
//!
//! The space of alignment functions for a pair with l real source words
//! and m target words has (l+1)^m members, far too many to enumerate.
//! Sampling proceeds by pegging one (source position, target position)
//! point at a time, seeding a full alignment around the peg with a
//! model-2 style greedy guess, hill climbing to a local optimum, and
//! collecting that optimum's whole neighborhood. The union over all
//! (l+1)*m pegs approximates the high-probability region of the
//! alignment posterior; the breadth of starting points is what offsets
//! hill climbing getting stuck in local maxima.

use hashbrown::HashSet;
use rayon::prelude::*;

use crate::corpus::SentencePair;
use crate::hypothesis::AlignmentInfo;
use crate::tables::ModelTables;
use crate::types::{Link, Prob, Token, MIN_PROB};

/// Capability contract for a concrete model variant: read access to the
/// shared tables plus the generative probability of a full hypothesis.
///
/// The search core is generic over this trait and assumes nothing about
/// the formula behind `probability`; models 3, 4, and 5 each supply
/// their own.
pub trait AlignmentModel {
    fn tables(&self) -> &ModelTables;

    /// Probability of the complete hypothesis under this model. Must be
    /// pure with respect to the hypothesis and the table snapshot.
    fn probability(&self, alignment_info: &AlignmentInfo<'_>) -> Prob;
}

/// All alignments reachable from `alignment_info` by one move or one
/// swap, keeping the pegged target position fixed.
///
/// A move reassigns a single non-pegged target position to any source
/// position in 0..=l, with the fertility pair updated in place. The
/// move onto the current source position reproduces the input, which is
/// harmless: it collapses under set semantics. A swap exchanges the
/// assignments of two distinct non-pegged target positions and leaves
/// the fertility vector untouched.
pub fn neighboring<'a>(
    alignment_info: &AlignmentInfo<'a>,
    j_pegged: usize,
) -> HashSet<AlignmentInfo<'a>> {
    let mut neighbors = HashSet::new();

    let l = alignment_info.source_len();
    let m = alignment_info.target_len();
    let original_alignment = alignment_info.alignment();
    let original_fertility = alignment_info.fertility_of_i();

    for j in 1..=m {
        if j == j_pegged {
            continue;
        }
        for i in 0..=l {
            let mut alignment: Box<[Link]> = Box::from(original_alignment);
            let mut fertility: Box<[u16]> = Box::from(original_fertility);

            let old_i = alignment[j] as usize;
            alignment[j] = i as Link;
            fertility[i] += 1;
            fertility[old_i] -= 1;

            neighbors.insert(AlignmentInfo::new(
                alignment,
                alignment_info.src_sentence(),
                alignment_info.trg_sentence(),
                fertility,
            ));
        }
    }

    for j in 1..=m {
        if j == j_pegged {
            continue;
        }
        // Unordered pairs; both orders of a swap yield the same member.
        for other_j in (j + 1)..=m {
            if other_j == j_pegged {
                continue;
            }
            let mut alignment: Box<[Link]> = Box::from(original_alignment);
            alignment.swap(j, other_j);

            neighbors.insert(AlignmentInfo::new(
                alignment,
                alignment_info.src_sentence(),
                alignment_info.trg_sentence(),
                Box::from(original_fertility),
            ));
        }
    }

    neighbors
}

/// Greedy local search from `seed`, keeping target position `j_pegged`
/// fixed throughout.
///
/// Each pass enumerates the neighbors of the pass-start alignment and
/// replaces the current alignment the moment a strictly better neighbor
/// is seen, continuing the scan against the replacement. This
/// first-improvement discipline is part of the observable behavior; it
/// converges differently from best-of-pass and must not be "fixed".
/// The search stops at the first pass that yields no replacement.
///
/// There is no iteration cap. A scoring function that is not pure could
/// in principle cycle forever; that is a documented limitation, not a
/// guarded condition. The result is a local optimum only.
pub fn hillclimb<'a, M: AlignmentModel + ?Sized>(
    model: &M,
    seed: AlignmentInfo<'a>,
    j_pegged: usize,
) -> AlignmentInfo<'a> {
    let mut current_prob = model.probability(&seed);
    let mut current = seed;
    loop {
        let mut improved = false;
        for neighbor in neighboring(&current, j_pegged) {
            let neighbor_prob = model.probability(&neighbor);
            if neighbor_prob > current_prob {
                current = neighbor;
                current_prob = neighbor_prob;
                improved = true;
            }
        }
        if !improved {
            return current;
        }
    }
}

/// Sample a set of high-probability alignments for one sentence pair.
///
/// For every source position i in 0..=l and target position j in 1..=m,
/// the pair (i, j) is pegged, the remaining target positions get a
/// greedy model-2 guess, and hill climbing refines the result. The
/// neighborhoods of all (l+1)*m local optima are unioned into one
/// deduplicated set; overlap across pegs is expected and collapses.
///
/// `src_sentence` must carry the NULL token at index 0.
pub fn sample<'a, M: AlignmentModel + ?Sized>(
    model: &M,
    trg_sentence: &'a [Token],
    src_sentence: &'a [Token],
) -> HashSet<AlignmentInfo<'a>> {
    assert!(
        !src_sentence.is_empty(),
        "source sentence must carry the NULL token at index 0"
    );

    let l = src_sentence.len() - 1;
    let m = trg_sentence.len();
    let mut sampled: HashSet<AlignmentInfo<'a>> = HashSet::new();

    for i in 0..=l {
        for j in 1..=m {
            let seed = model2_seed(model.tables(), trg_sentence, src_sentence, i, j);
            let best_alignment = hillclimb(model, seed, j);
            sampled.extend(neighboring(&best_alignment, j));
        }
    }

    log::debug!(
        "sampled {} hypotheses from {} pegs (l={}, m={})",
        sampled.len(),
        (l + 1) * m,
        l,
        m
    );
    sampled
}

/// The highest-scoring member of the sampled set, or `None` when the
/// set is empty (a single-word target sentence admits no neighbors).
pub fn best_sample<'a, M: AlignmentModel + ?Sized>(
    model: &M,
    trg_sentence: &'a [Token],
    src_sentence: &'a [Token],
) -> Option<AlignmentInfo<'a>> {
    let mut best: Option<(Prob, AlignmentInfo<'a>)> = None;
    for alignment_info in sample(model, trg_sentence, src_sentence) {
        let prob = model.probability(&alignment_info);
        let is_better = match &best {
            Some((best_prob, _)) => prob > *best_prob,
            None => true,
        };
        if is_better {
            best = Some((prob, alignment_info));
        }
    }
    best.map(|(_, alignment_info)| alignment_info)
}

/// Sample every pair of a corpus in parallel.
///
/// Each pair's search is independent given the read-only tables, so the
/// batch is embarrassingly parallel. The caller must not re-estimate
/// tables while this runs; the `&M` borrow enforces exactly that.
pub fn sample_corpus<'a, M: AlignmentModel + Sync>(
    model: &M,
    pairs: &'a [SentencePair],
) -> Vec<HashSet<AlignmentInfo<'a>>> {
    pairs
        .par_iter()
        .map(|pair| sample(model, &pair.trg_tokens, &pair.src_tokens))
        .collect()
}

/// Build the pegged seed alignment: target position `j` is forced to
/// source position `i`, and every other target position independently
/// takes the source position maximizing translation times positional
/// probability. A greedy per-position guess, not itself hill-climbed.
fn model2_seed<'a>(
    tables: &ModelTables,
    trg_sentence: &'a [Token],
    src_sentence: &'a [Token],
    i: usize,
    j: usize,
) -> AlignmentInfo<'a> {
    let l = src_sentence.len() - 1;
    let m = trg_sentence.len();

    let mut alignment = vec![0 as Link; m + 1];
    let mut fertility_of_i = vec![0u16; l + 1];
    alignment[j] = i as Link;
    fertility_of_i[i] = 1;

    for jj in 1..=m {
        if jj == j {
            continue;
        }
        let t = trg_sentence[jj - 1];
        let mut max_alignment_prob = MIN_PROB;
        // When every candidate sits at the floor, fall back to the first
        // real source word; with a NULL-only source only NULL is left.
        let mut best_i = if l > 0 { 1 } else { 0 };

        for ii in 0..=l {
            let s = src_sentence[ii];
            let alignment_prob = tables.translation.prob(t, s) * tables.alignment.prob(ii, jj, l, m);
            if alignment_prob > max_alignment_prob {
                max_alignment_prob = alignment_prob;
                best_i = ii;
            }
        }

        alignment[jj] = best_i as Link;
        fertility_of_i[best_i] += 1;
    }

    AlignmentInfo::new(
        alignment.into_boxed_slice(),
        src_sentence,
        trg_sentence,
        fertility_of_i.into_boxed_slice(),
    )
}
