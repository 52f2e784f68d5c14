//! Marker grammar for generated resume text.
//!
//! One line is one block. A line starts with at most one marker; the marker is
//! stripped and the rest of the line is the block text:
//!
//! ```text
//! [H1]Jane Doe          → Heading1   (candidate name, once)
//! [H2]Experience        → Heading2   (major section, preceded by a spacer)
//! [H3]Acme Corp         → Heading3
//! [BULLET]Built X       → BulletItem
//! anything else         → PlainParagraph, verbatim
//! ```

use serde::Serialize;

use crate::synthesis::badges::Badge;

/// One rendered paragraph of the synthesized resume.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum Block {
    Heading1(String),
    Heading2(String),
    Heading3(String),
    BulletItem(String),
    PlainParagraph(String),
    /// Empty paragraph separating major sections.
    Spacer,
    /// Right-aligned row of badge images at the top of the document.
    ImageBadgeRow(Vec<Badge>),
}

impl Block {
    pub fn is_content(&self) -> bool {
        !matches!(self, Block::Spacer | Block::ImageBadgeRow(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    H1,
    H2,
    H3,
    Bullet,
}

/// Longest marker first, so a longer marker is never shadowed by a shorter prefix.
const MARKERS: &[(&str, Marker)] = &[
    ("[BULLET]", Marker::Bullet),
    ("[H1]", Marker::H1),
    ("[H2]", Marker::H2),
    ("[H3]", Marker::H3),
];

/// Classifies a single non-blank line.
pub fn classify(line: &str) -> Block {
    let trimmed = line.trim_start();
    for (prefix, marker) in MARKERS {
        if let Some(rest) = trimmed.strip_prefix(prefix) {
            let text = rest.trim().to_string();
            return match marker {
                Marker::H1 => Block::Heading1(text),
                Marker::H2 => Block::Heading2(text),
                Marker::H3 => Block::Heading3(text),
                Marker::Bullet => Block::BulletItem(text),
            };
        }
    }
    Block::PlainParagraph(line.to_string())
}

/// Converts marker-tagged text into content blocks. Blank lines are dropped; a
/// `Spacer` precedes every `Heading2` except when it would be the first block.
pub fn parse_blocks(marked_text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    for line in marked_text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let block = classify(line.trim_end_matches('\r'));
        if matches!(block, Block::Heading2(_)) && !blocks.is_empty() {
            blocks.push(Block::Spacer);
        }
        blocks.push(block);
    }
    blocks
}
