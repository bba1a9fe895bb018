use font2c::{Error, GlyphSource, RasterGlyph};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Serves fixed grids instead of rasterizing a real font.
#[derive(Default)]
pub struct StubSource {
    pub line_height_64: i32,
    pub glyphs: BTreeMap<u32, RasterGlyph>,
    pub requested: RefCell<Vec<u32>>,
}

impl StubSource {
    pub fn with_glyph(mut self, code: u32, glyph: RasterGlyph) -> Self {
        self.glyphs.insert(code, glyph);
        self
    }
}

impl GlyphSource for StubSource {
    fn line_height_64(&self) -> i32 {
        self.line_height_64
    }

    fn render(&self, code: u32) -> Result<RasterGlyph, Error> {
        self.requested.borrow_mut().push(code);
        self.glyphs.get(&code).cloned().ok_or(Error::MissingGlyph(code))
    }
}

/// A `width` x `height` glyph sitting on the baseline with every pixel set
/// to `gray`.
pub fn solid(width: usize, height: usize, gray: u8) -> RasterGlyph {
    RasterGlyph {
        width,
        height,
        pitch: width,
        buffer: vec![gray; width * height],
        advance_64: (width as i32 + 1) * 64,
        left: 0,
        top: height as i32,
    }
}
