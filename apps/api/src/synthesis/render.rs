//! Renders a `ResumeDocument` to .docx bytes with `docx-rs`.
//!
//! Pure and order-preserving: block N becomes paragraph N. Body font and size are
//! fixed so two renders of the same document are identical apart from zip metadata.

use std::io::Cursor;

use docx_rs::{
    AbstractNumbering, AlignmentType, Docx, IndentLevel, Level, LevelJc, LevelText,
    NumberFormat, Numbering, NumberingId, Paragraph, Pic, Run, RunFonts, Start,
};
use thiserror::Error;

use crate::synthesis::{Badge, Block, ResumeDocument};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to pack .docx: {0}")]
    Pack(String),
}

pub const BODY_FONT: &str = "Calibri";

// Sizes are in half-points.
const BODY_SIZE: usize = 22;
const H1_SIZE: usize = 36;
const H2_SIZE: usize = 28;
const H3_SIZE: usize = 24;

const BULLET_NUMBERING_ID: usize = 1;

const EMU_PER_INCH: u32 = 914_400;
const BADGE_HEIGHT_EMU: u32 = EMU_PER_INCH / 2;

pub fn render_docx(document: &ResumeDocument) -> Result<Vec<u8>, RenderError> {
    let mut docx = Docx::new()
        .default_fonts(
            RunFonts::new()
                .ascii(BODY_FONT)
                .hi_ansi(BODY_FONT)
                .cs(BODY_FONT),
        )
        .default_size(BODY_SIZE)
        .add_abstract_numbering(AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(
            Level::new(
                0,
                Start::new(1),
                NumberFormat::new("bullet"),
                LevelText::new("•"),
                LevelJc::new("left"),
            ),
        ))
        .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID));

    for block in &document.blocks {
        docx = docx.add_paragraph(paragraph_for(block));
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| RenderError::Pack(e.to_string()))?;
    Ok(buf.into_inner())
}

fn paragraph_for(block: &Block) -> Paragraph {
    match block {
        Block::Heading1(text) => Paragraph::new()
            .add_run(Run::new().add_text(text.as_str()).bold().size(H1_SIZE))
            .align(AlignmentType::Center),
        Block::Heading2(text) => {
            Paragraph::new().add_run(Run::new().add_text(text.as_str()).bold().size(H2_SIZE))
        }
        Block::Heading3(text) => {
            Paragraph::new().add_run(Run::new().add_text(text.as_str()).bold().size(H3_SIZE))
        }
        Block::BulletItem(text) => Paragraph::new()
            .add_run(Run::new().add_text(text.as_str()))
            .numbering(NumberingId::new(BULLET_NUMBERING_ID), IndentLevel::new(0)),
        Block::PlainParagraph(text) => Paragraph::new().add_run(Run::new().add_text(text.as_str())),
        Block::Spacer => Paragraph::new(),
        Block::ImageBadgeRow(badges) => badge_row(badges),
    }
}

/// One right-aligned paragraph; badges 0.5in tall, aspect preserved, space-separated.
fn badge_row(badges: &[Badge]) -> Paragraph {
    let mut paragraph = Paragraph::new().align(AlignmentType::Right);
    for badge in badges {
        let (width_emu, height_emu) = badge_extent(badge);
        let pic = Pic::new_with_dimensions(badge.png.clone(), badge.width_px, badge.height_px)
            .size(width_emu, height_emu);
        paragraph = paragraph
            .add_run(Run::new().add_image(pic))
            .add_run(Run::new().add_text(" "));
    }
    paragraph
}

fn badge_extent(badge: &Badge) -> (u32, u32) {
    if badge.height_px == 0 {
        return (BADGE_HEIGHT_EMU, BADGE_HEIGHT_EMU);
    }
    let width =
        u64::from(BADGE_HEIGHT_EMU) * u64::from(badge.width_px) / u64::from(badge.height_px);
    (u32::try_from(width).unwrap_or(u32::MAX), BADGE_HEIGHT_EMU)
}
