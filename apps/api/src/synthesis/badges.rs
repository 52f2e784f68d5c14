//! Badge images (certification logos) embedded in the resume header.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BadgeError {
    #[error("badge '{name}' could not be decoded: {reason}")]
    Decode { name: String, reason: String },

    #[error("badge '{name}' could not be re-encoded: {reason}")]
    Encode { name: String, reason: String },
}

/// A badge as uploaded: original filename plus raw bytes.
#[derive(Debug, Clone)]
pub struct BadgeImage {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// A decoded badge, normalised to PNG so every container format embeds the same way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Badge {
    pub name: String,
    pub width_px: u32,
    pub height_px: u32,
    #[serde(skip)]
    pub png: Vec<u8>,
}

impl Badge {
    pub fn decode(image: &BadgeImage) -> Result<Self, BadgeError> {
        let decoded = ImageReader::new(Cursor::new(&image.bytes))
            .with_guessed_format()
            .map_err(|e| BadgeError::Decode {
                name: image.name.clone(),
                reason: e.to_string(),
            })?
            .decode()
            .map_err(|e| BadgeError::Decode {
                name: image.name.clone(),
                reason: e.to_string(),
            })?;

        let mut png = Cursor::new(Vec::new());
        decoded
            .write_to(&mut png, ImageFormat::Png)
            .map_err(|e| BadgeError::Encode {
                name: image.name.clone(),
                reason: e.to_string(),
            })?;

        Ok(Badge {
            name: image.name.clone(),
            width_px: decoded.width(),
            height_px: decoded.height(),
            png: png.into_inner(),
        })
    }
}
