//! Symbol identifiers and reel strips

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Opaque symbol identifier; only equality matters to the manager
pub type SymbolId = u32;

/// A virtual reel strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelStrip {
    /// Symbol IDs in order
    pub symbols: Vec<SymbolId>,
    /// Reel index
    pub reel_index: usize,
}

impl ReelStrip {
    /// Create a new reel strip
    pub fn new(reel_index: usize, symbols: Vec<SymbolId>) -> Self {
        Self {
            symbols,
            reel_index,
        }
    }

    /// Random strip over symbol ids `1..=symbol_count`
    pub fn generate<R: Rng + ?Sized>(
        reel_index: usize,
        symbol_count: u32,
        length: usize,
        rng: &mut R,
    ) -> Self {
        let upper = symbol_count.max(1);
        let symbols = (0..length).map(|_| rng.random_range(1..=upper)).collect();
        Self::new(reel_index, symbols)
    }

    /// Get symbol at position (wraps around)
    pub fn symbol_at(&self, position: usize) -> Option<SymbolId> {
        if self.symbols.is_empty() {
            return None;
        }
        Some(self.symbols[position % self.symbols.len()])
    }

    /// Visible window of `rows` symbols starting at `position` (wraps around)
    pub fn window(&self, position: usize, rows: usize) -> Vec<SymbolId> {
        (0..rows)
            .filter_map(|row| self.symbol_at(position + row))
            .collect()
    }

    /// Get total strip length
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_reel_strip_wrap() {
        let strip = ReelStrip::new(0, vec![1, 2, 3, 4, 5]);
        assert_eq!(strip.symbol_at(0), Some(1));
        assert_eq!(strip.symbol_at(5), Some(1)); // Wraps
        assert_eq!(strip.symbol_at(7), Some(3)); // Wraps
    }

    #[test]
    fn test_window_wraps() {
        let strip = ReelStrip::new(1, vec![1, 2, 3, 4]);
        assert_eq!(strip.window(0, 3), vec![1, 2, 3]);
        assert_eq!(strip.window(3, 3), vec![4, 1, 2]);
    }

    #[test]
    fn test_empty_strip() {
        let strip = ReelStrip::new(0, Vec::new());
        assert!(strip.is_empty());
        assert_eq!(strip.symbol_at(3), None);
        assert!(strip.window(0, 3).is_empty());
    }

    #[test]
    fn test_generate_is_seeded() {
        let a = ReelStrip::generate(0, 6, 32, &mut StdRng::seed_from_u64(7));
        let b = ReelStrip::generate(0, 6, 32, &mut StdRng::seed_from_u64(7));

        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.symbols.iter().all(|&s| (1..=6).contains(&s)));
    }
}
