//! Piece catalog - uniform random selection over the template library

use crate::pieces::{Piece, PieceTemplate, TEMPLATES};
use crate::rng::{RandomSource, SimpleRng};

/// Supplies freshly instantiated pieces from a fixed template set
#[derive(Debug)]
pub struct PieceCatalog {
    templates: &'static [PieceTemplate],
    source: Box<dyn RandomSource>,
}

impl PieceCatalog {
    /// Catalog over the seven canonical templates
    pub fn new(source: Box<dyn RandomSource>) -> Self {
        Self {
            templates: &TEMPLATES,
            source,
        }
    }

    /// Deterministic catalog backed by [`SimpleRng`]
    pub fn seeded(seed: u32) -> Self {
        Self::new(Box::new(SimpleRng::new(seed)))
    }

    /// Pick a template uniformly and instantiate it at the spawn anchor
    pub fn spawn(&mut self) -> Piece {
        let idx = self.source.next_index(self.templates.len());
        Piece::from_template(&self.templates[idx])
    }
}
