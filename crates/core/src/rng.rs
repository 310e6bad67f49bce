//! RNG module - seedable piece selection
//!
//! Next pieces are drawn uniformly over the eight catalog kinds from a small
//! LCG, so a seed fully determines a session. Scenario tests can swap in a
//! scripted sequence instead.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales from the high bits; the low bits of an LCG with a power-of-two
    /// modulus cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

#[derive(Debug, Clone)]
enum Source {
    Random(SimpleRng),
    Scripted { sequence: Vec<PieceKind>, cursor: usize },
}

/// Source of upcoming piece kinds
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    source: Source,
}

impl PieceGenerator {
    /// Uniform random kinds from `seed`
    pub fn random(seed: u32) -> Self {
        Self {
            source: Source::Random(SimpleRng::new(seed)),
        }
    }

    /// Repeat `sequence` forever; an empty sequence cycles the catalog
    pub fn scripted(sequence: Vec<PieceKind>) -> Self {
        let sequence = if sequence.is_empty() {
            PieceKind::ALL.to_vec()
        } else {
            sequence
        };
        Self {
            source: Source::Scripted {
                sequence,
                cursor: 0,
            },
        }
    }

    /// Draw the next kind
    pub fn next_kind(&mut self) -> PieceKind {
        match &mut self.source {
            Source::Random(rng) => {
                PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
            }
            Source::Scripted { sequence, cursor } => {
                let kind = sequence[*cursor % sequence.len()];
                *cursor = (*cursor + 1) % sequence.len();
                kind
            }
        }
    }

    pub fn is_scripted(&self) -> bool {
        matches!(self.source, Source::Scripted { .. })
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::random(1)
    }
}
