use std::path::Path;

use anyhow::Context;

use crate::SpacebattleResult;
use crate::render::canvas::{Canvas, Sprite};
use crate::render::font::LabelFont;

/// Decode encoded image bytes into an opaque canvas (alpha, if any, is dropped).
pub fn decode_background(bytes: &[u8]) -> SpacebattleResult<Canvas> {
    let dyn_img = image::load_from_memory(bytes).context("decode background image from memory")?;
    Canvas::from_image(dyn_img.to_rgb8())
}

/// Decode encoded image bytes into a straight-alpha sprite.
///
/// Images without an alpha channel become fully opaque sprites.
pub fn decode_sprite(bytes: &[u8]) -> SpacebattleResult<Sprite> {
    let dyn_img = image::load_from_memory(bytes).context("decode sprite image from memory")?;
    Sprite::from_image(dyn_img.to_rgba8())
}

pub fn load_background(path: &Path) -> SpacebattleResult<Canvas> {
    let bytes = read_asset(path)?;
    decode_background(&bytes)
}

pub fn load_sprite(path: &Path) -> SpacebattleResult<Sprite> {
    let bytes = read_asset(path)?;
    decode_sprite(&bytes)
}

pub fn load_font(path: &Path) -> SpacebattleResult<LabelFont> {
    let bytes = read_asset(path)?;
    let font = LabelFont::from_bytes(bytes)
        .with_context(|| format!("parse font '{}'", path.display()))?;
    Ok(font)
}

fn read_asset(path: &Path) -> SpacebattleResult<Vec<u8>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read asset '{}'", path.display()))?;
    Ok(bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
