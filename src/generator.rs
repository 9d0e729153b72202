//! Motif generation: base motif construction and iterative gap-tolerant
//! extension.
//!
//! Base motifs are built with a single scan over the unit sequence. Each
//! iteration then tries to extend every surviving motif by one unit: the end
//! offset of its `min_frequency`-th occurrence prunes the candidate pool
//! cheaply, and the merge step re-validates gap and span constraints exactly.
//! A motif survives an iteration when it still meets the frequency floor and
//! the length ceiling; the loop ends once nothing survives.

use std::collections::HashMap;

use log::debug;

use crate::motif::{Motif, MotifPosition, MotifUnit};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Errors raised by the motif generator.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MotifError {
    #[error("motif frequency {frequency} is below the required minimum {min_frequency}")]
    FrequencyBelowMinimum {
        frequency: usize,
        min_frequency: usize,
    },
}

/// Configuration options that govern a motif discovery run.
#[derive(Debug, Clone, Copy)]
pub struct MotifConfig {
    /// Minimum number of occurrences a motif needs to survive an iteration.
    pub min_frequency: usize,
    /// Maximum distance tolerated between the end of a motif span and the
    /// start of the span extending it.
    pub max_gap: usize,
    /// Minimum unit count for a motif to be reported.
    pub min_length: usize,
    /// Maximum unit count (and merged span length) a motif may reach.
    pub max_length: usize,
    /// Run each iteration's merges on a thread pool (requires the `parallel`
    /// feature).
    pub use_threads: bool,
    /// Desired worker count when threading is enabled.
    pub max_workers: usize,
}

impl Default for MotifConfig {
    fn default() -> Self {
        Self {
            min_frequency: 2,
            max_gap: 1,
            min_length: 1,
            max_length: 4,
            use_threads: false,
            max_workers: 1,
        }
    }
}

/// Build one length-1 motif per distinct unit, recording every position it
/// appears at, and drop the ones below the frequency floor.
///
/// Output order follows the first appearance of each distinct unit in the
/// sequence; an empty sequence yields an empty result.
pub fn basic_motifs(sequence: &[MotifUnit], min_frequency: usize) -> Vec<Motif> {
    let mut seen_order: Vec<&MotifUnit> = Vec::new();
    let mut positions_by_unit: HashMap<&MotifUnit, Vec<MotifPosition>> = HashMap::new();

    for (index, unit) in sequence.iter().enumerate() {
        positions_by_unit
            .entry(unit)
            .or_insert_with(|| {
                seen_order.push(unit);
                Vec::new()
            })
            .push(MotifPosition::new(index, 1));
    }

    let mut motifs = Vec::with_capacity(seen_order.len());
    for unit in seen_order {
        let positions = positions_by_unit.remove(unit).unwrap_or_default();
        if positions.len() >= min_frequency {
            motifs.push(Motif::new(positions, vec![unit.clone()]));
        }
    }
    motifs
}

/// End offset of the `min_frequency`-th occurrence of `motif` (1-indexed).
///
/// If the motif is to stay at least `min_frequency`-frequent after an
/// extension, the extension must be reachable at or after this offset for
/// enough of its occurrences, so the candidate search never has to look
/// earlier. Fails when the motif does not carry `min_frequency` occurrences
/// in the first place.
pub fn frequent_position(motif: &Motif, min_frequency: usize) -> Result<usize, MotifError> {
    let min_frequency = min_frequency.max(1);
    if motif.frequency() < min_frequency {
        return Err(MotifError::FrequencyBelowMinimum {
            frequency: motif.frequency(),
            min_frequency,
        });
    }
    Ok(motif.positions()[min_frequency - 1].end())
}

/// Base motifs with at least one position starting at or after
/// `cutoff - 1`.
///
/// A loose pre-filter, one position slacker than the merge constraints;
/// [`merge_motifs`] re-validates gap and span exactly.
pub fn candidate_extensions<'a>(base_motifs: &'a [Motif], cutoff: usize) -> Vec<&'a Motif> {
    base_motifs
        .iter()
        .filter(|base| {
            base.positions()
                .iter()
                .any(|position| position.start >= cutoff.saturating_sub(1))
        })
        .collect()
}

/// Extend every span of `motif` with the first qualifying span of
/// `candidate`.
///
/// A candidate span qualifies when it starts at or after the end of the
/// motif span, the gap between the two stays within `max_gap`, and the
/// merged span does not exceed `max_length`. Motif spans with no qualifying
/// candidate span are dropped, so the merged motif may carry fewer
/// occurrences than its parent, including none; the iteration filter removes
/// those.
pub fn merge_motifs(
    motif: &Motif,
    candidate: &Motif,
    max_gap: usize,
    max_length: usize,
) -> Motif {
    let mut units = Vec::with_capacity(motif.len() + candidate.len());
    units.extend_from_slice(motif.units());
    units.extend_from_slice(candidate.units());

    let positions = motif
        .positions()
        .iter()
        .filter_map(|position| {
            candidate
                .positions()
                .iter()
                .find(|next| {
                    next.start >= position.end()
                        && next.start - position.end() <= max_gap
                        && next.end() - position.start <= max_length
                })
                .map(|next| MotifPosition::new(position.start, position.length + next.length))
        })
        .collect();

    Motif::new(positions, units)
}

/// Discover every motif of `sequence` that occurs at least `min_frequency`
/// times, tolerates at most `max_gap` between merged spans, and has between
/// `min_length` and `max_length` units.
///
/// Results appear in production order: outer iteration over surviving motifs,
/// inner iteration over the base pool, flattened, one round after another.
/// Only motifs produced by at least one extension round are reported, so
/// length-1 base motifs never appear on their own.
pub fn generate_motifs(
    sequence: &[MotifUnit],
    min_frequency: usize,
    max_gap: usize,
    min_length: usize,
    max_length: usize,
) -> Result<Vec<Motif>, MotifError> {
    generate_motifs_with(
        sequence,
        MotifConfig {
            min_frequency,
            max_gap,
            min_length,
            max_length,
            ..MotifConfig::default()
        },
    )
}

/// [`generate_motifs`] with full control over threading.
///
/// With `use_threads` set and the `parallel` feature enabled, each
/// iteration's merges run on a dedicated thread pool; the flattened result
/// order is identical to the sequential run because the per-motif extension
/// lists are collected back in input order.
pub fn generate_motifs_with(
    sequence: &[MotifUnit],
    config: MotifConfig,
) -> Result<Vec<Motif>, MotifError> {
    let config = MotifConfig {
        min_frequency: config.min_frequency.max(1),
        ..config
    };

    #[cfg(feature = "parallel")]
    if config.use_threads {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.max_workers)
            .build()
            .expect("Failed to build rayon thread pool");
        return pool.install(|| run_iterations(sequence, &config));
    }

    #[cfg(not(feature = "parallel"))]
    if config.use_threads {
        log::warn!(
            "Threaded merging requested, but the 'parallel' feature is not enabled; falling back to sequential mode"
        );
    }

    run_iterations(sequence, &config)
}

fn run_iterations(sequence: &[MotifUnit], config: &MotifConfig) -> Result<Vec<Motif>, MotifError> {
    let base_motifs = basic_motifs(sequence, config.min_frequency);
    debug!(
        "{} base motifs above frequency {}",
        base_motifs.len(),
        config.min_frequency
    );

    let mut working = base_motifs.clone();
    let mut collected = Vec::new();
    let mut iteration = 0usize;

    while !working.is_empty() {
        iteration += 1;
        working = next_iteration(&working, &base_motifs, config)?;
        debug!("iteration {}: {} motifs survive", iteration, working.len());
        collected.extend(
            working
                .iter()
                .filter(|motif| motif.len() >= config.min_length)
                .cloned(),
        );
    }

    Ok(collected)
}

/// One extension round: every working motif against every candidate from the
/// fixed base pool, filtered by frequency and length.
///
/// The cutoff always uses the caller-supplied `min_frequency`, never a value
/// re-derived from the motif at hand; every working motif already passed the
/// previous round's frequency filter, so the precondition of
/// [`frequent_position`] holds by construction.
fn next_iteration(
    working: &[Motif],
    base_motifs: &[Motif],
    config: &MotifConfig,
) -> Result<Vec<Motif>, MotifError> {
    #[cfg(feature = "parallel")]
    let merged: Result<Vec<Vec<Motif>>, MotifError> = if config.use_threads {
        working
            .par_iter()
            .map(|motif| extend_motif(motif, base_motifs, config))
            .collect()
    } else {
        working
            .iter()
            .map(|motif| extend_motif(motif, base_motifs, config))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let merged: Result<Vec<Vec<Motif>>, MotifError> = working
        .iter()
        .map(|motif| extend_motif(motif, base_motifs, config))
        .collect();

    Ok(filter_motifs(
        merged?.into_iter().flatten(),
        config.min_frequency,
        config.max_length,
    ))
}

fn extend_motif(
    motif: &Motif,
    base_motifs: &[Motif],
    config: &MotifConfig,
) -> Result<Vec<Motif>, MotifError> {
    let cutoff = frequent_position(motif, config.min_frequency)?;
    let candidates = candidate_extensions(base_motifs, cutoff);

    Ok(candidates
        .into_iter()
        .map(|candidate| merge_motifs(motif, candidate, config.max_gap, config.max_length))
        .collect())
}

fn filter_motifs(
    motifs: impl Iterator<Item = Motif>,
    min_frequency: usize,
    max_length: usize,
) -> Vec<Motif> {
    motifs
        .filter(|motif| motif.frequency() >= min_frequency && motif.len() <= max_length)
        .collect()
}
