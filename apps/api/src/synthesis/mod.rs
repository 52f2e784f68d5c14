// Synthesis: marker-tagged generated text → block sequence → .docx.
// Total over well-formed input; a bad badge is skipped, never fatal.

pub mod badges;
pub mod markers;
pub mod render;

use serde::Serialize;
use tracing::warn;

pub use badges::{Badge, BadgeImage};
pub use markers::Block;
pub use render::render_docx;

/// A synthesized resume: blocks in output order, one paragraph each.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResumeDocument {
    pub blocks: Vec<Block>,
    /// Names of badges that were dropped because they failed to decode.
    pub skipped_badges: Vec<String>,
}

impl ResumeDocument {
    pub fn content_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.is_content())
    }
}

/// Builds the block sequence for `marked_text`, led by a badge row when any badge
/// decodes.
pub fn synthesize(marked_text: &str, badge_images: &[BadgeImage]) -> ResumeDocument {
    let mut badges = Vec::with_capacity(badge_images.len());
    let mut skipped_badges = Vec::new();

    for image in badge_images {
        match Badge::decode(image) {
            Ok(badge) => badges.push(badge),
            Err(e) => {
                warn!("Skipping badge: {e}");
                skipped_badges.push(image.name.clone());
            }
        }
    }

    let mut blocks = Vec::new();
    if !badges.is_empty() {
        blocks.push(Block::ImageBadgeRow(badges));
    }
    blocks.extend(markers::parse_blocks(marked_text));

    ResumeDocument {
        blocks,
        skipped_badges,
    }
}
