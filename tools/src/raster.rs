use crate::Error;
use fontdue::{Font, FontSettings};
use std::fs;
use std::path::Path;

/// One rendered glyph, in FreeType's conventions: 8-bit coverage rows of
/// `pitch` bytes, advance in 26.6 fixed point, bearings in whole pixels with
/// `top` measured upwards from the baseline to the first row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RasterGlyph {
    pub width: usize,
    pub height: usize,
    pub pitch: usize,
    pub buffer: Vec<u8>,
    pub advance_64: i32,
    pub left: i32,
    pub top: i32,
}

impl RasterGlyph {
    /// Whether `buffer` covers every sampled pixel.
    pub fn is_well_formed(&self) -> bool {
        if self.width == 0 || self.height == 0 {
            return true;
        }
        self.pitch >= self.width && self.buffer.len() >= (self.height - 1) * self.pitch + self.width
    }

    /// Row-major samples, skipping any row padding past `width`.
    pub fn pixels(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.height).flat_map(move |y| {
            let start = y * self.pitch;
            self.buffer[start..start + self.width].iter().copied()
        })
    }
}

/// Something that can rasterize character codes at a fixed size.
pub trait GlyphSource {
    /// Baseline-to-baseline distance in 26.6 fixed point.
    fn line_height_64(&self) -> i32;

    fn render(&self, code: u32) -> Result<RasterGlyph, Error>;
}

pub struct FontdueSource {
    font: Font,
    px: f32,
}

impl FontdueSource {
    pub fn load(path: &Path, size: u32) -> Result<Self, Error> {
        if size == 0 {
            return Err(Error::InvalidSize(size));
        }
        let font_load = |reason: String| Error::FontLoad {
            path: path.to_path_buf(),
            reason,
        };

        let bytes = fs::read(path).map_err(|e| font_load(e.to_string()))?;
        let px = size as f32;
        let settings = FontSettings {
            scale: px,
            ..FontSettings::default()
        };
        let font = Font::from_bytes(bytes, settings).map_err(|e| font_load(e.to_string()))?;
        tracing::debug!(path = %path.display(), glyphs = font.glyph_count(), "loaded font");

        Ok(Self { font, px })
    }
}

impl GlyphSource for FontdueSource {
    fn line_height_64(&self) -> i32 {
        match self.font.horizontal_line_metrics(self.px) {
            Some(metrics) => to_26_6(metrics.new_line_size),
            // no hhea table, fall back to the em size
            None => to_26_6(self.px),
        }
    }

    fn render(&self, code: u32) -> Result<RasterGlyph, Error> {
        let c = char::from_u32(code).ok_or(Error::MissingGlyph(code))?;
        if self.font.lookup_glyph_index(c) == 0 {
            return Err(Error::MissingGlyph(code));
        }

        let (metrics, buffer) = self.font.rasterize(c, self.px);
        Ok(RasterGlyph {
            width: metrics.width,
            height: metrics.height,
            pitch: metrics.width,
            buffer,
            advance_64: to_26_6(metrics.advance_width),
            left: metrics.xmin,
            // fontdue's ymin is the bottom edge, FreeType's top is the top edge
            top: metrics.ymin + metrics.height as i32,
        })
    }
}

fn to_26_6(px: f32) -> i32 {
    (px * 64.0).round() as i32
}
