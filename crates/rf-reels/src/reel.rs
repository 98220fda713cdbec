//! Reel collaborator contract

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ReelError;
use crate::symbols::SymbolId;

/// One spinning column
///
/// The manager only ever talks to a reel through this trait; how the reel
/// animates and decides which symbols are visible is its own business.
#[async_trait]
pub trait Reel: Send + Sync {
    /// Start spinning. Fire-and-forget, must not block.
    fn start_spin(&self);

    /// Stop spinning. Resolves only once the reel has visually settled.
    async fn stop_spin(&self) -> Result<(), ReelError>;

    /// Symbol ids currently visible in the reel's viewport, top to bottom.
    async fn active_symbol_ids(&self) -> Result<Vec<SymbolId>, ReelError>;
}

/// Construction parameters for one reel, derived from the layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReelSpec {
    /// Position in the stop order (0 = leftmost)
    pub index: usize,
    /// Visible symbols
    pub symbols_per_reel: usize,
    /// Height of one symbol cell
    pub symbol_height: f32,
    /// Reel x position
    pub x: f32,
    /// Reel y position
    pub y: f32,
}
