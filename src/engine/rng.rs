//! Piece selection.
//!
//! A small LCG (Numerical Recipes constants) so that a given seed always deals
//! the same sequence of pieces. Not suitable for anything security related.

use super::piece::PieceKind;

#[derive(Clone, Debug)]
pub struct PieceRng {
    state: u32,
}

impl PieceRng {
    pub fn new(seed: u64) -> Self {
        let folded = (seed ^ (seed >> 32)) as u32;
        // a zero state would still advance, but keep seeds distinct from the default
        Self {
            state: if folded == 0 { 1 } else { folded },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state
    }

    /// Uniform value in `0..max`. Uses the high bits; the low bits of an LCG
    /// have short periods.
    pub fn below(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Uniformly pick one of the seven kinds.
    pub fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.below(PieceKind::ALL.len() as u32) as usize]
    }
}

/// Seed from the platform entropy source when the `rng` feature is enabled.
/// Returns `None` otherwise (or if the source fails), leaving the caller to
/// pick a fallback such as the current time.
#[cfg(feature = "rng")]
pub fn entropy_seed() -> Option<u64> {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => Some(u64::from_le_bytes(buf)),
        Err(err) => {
            log::warn!("entropy source unavailable: {}", err);
            None
        }
    }
}

#[cfg(not(feature = "rng"))]
pub fn entropy_seed() -> Option<u64> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = PieceRng::new(42);
        let mut b = PieceRng::new(42);
        for _ in 0..50 {
            assert_eq!(a.next_kind(), b.next_kind());
        }
    }

    #[test]
    fn below_stays_in_range() {
        let mut rng = PieceRng::new(7);
        for _ in 0..1000 {
            assert!(rng.below(7) < 7);
        }
    }

    #[test]
    fn every_kind_shows_up() {
        let mut rng = PieceRng::new(12345);
        let mut counts = [0usize; 7];
        for _ in 0..7000 {
            counts[rng.next_kind() as usize] += 1;
        }
        // roughly uniform: each kind near 1000
        for (i, c) in counts.iter().enumerate() {
            assert!(*c > 700 && *c < 1300, "kind {} drawn {} times", i, c);
        }
    }

    #[test]
    fn zero_seed_is_usable() {
        let mut rng = PieceRng::new(0);
        let first = rng.next_u32();
        assert_ne!(first, rng.next_u32());
    }
}
