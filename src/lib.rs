//! Gap-tolerant motif discovery in symbolic sequences.
//!
//! Given an ordered sequence of opaque symbols, this crate finds every
//! sub-pattern that occurs at least a minimum number of times, allowing a
//! bounded gap between the spans merged into an occurrence. Base motifs are
//! built with one scan over the sequence; each iteration then extends every
//! surviving motif by a single unit, using the end of its
//! `min_frequency`-th occurrence to prune the candidate pool before the
//! exact merge test.

pub mod generator;
pub mod motif;
pub mod read_source;

pub use generator::{
    basic_motifs, candidate_extensions, frequent_position, generate_motifs,
    generate_motifs_with, merge_motifs, MotifConfig, MotifError,
};
pub use motif::{Motif, MotifPosition, MotifUnit};
pub use read_source::{read_sequence_text, tokenize, ReadSourceError};
