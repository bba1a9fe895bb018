use crate::pack::pack_pixels;
use crate::quantize::{gray_to_bpp, make_thresholds, Thresholds};
use crate::raster::{GlyphSource, RasterGlyph};
use crate::{Bpp, Error};
use tracing::{debug, info};

/// One entry of the generated glyph array. Field widths match the C struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRecord {
    pub offset: u16,
    pub width: u8,
    pub height: u8,
    pub x_advance: i8,
    pub x_offset: i8,
    pub y_offset: i8,
}

impl GlyphRecord {
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontTable {
    pub bitmap: Vec<u8>,
    pub glyphs: Vec<GlyphRecord>,
    pub first_char: u8,
    pub last_char: u8,
    pub line_height: u8,
    pub bpp: Bpp,
    pub fixed_width: bool,
}

impl FontTable {
    pub fn glyph(&self, code: u32) -> Option<&GlyphRecord> {
        let index = code.checked_sub(self.first_char as u32)?;
        self.glyphs.get(index as usize)
    }

    /// The packed bytes belonging to `glyph`, or `None` if the record points
    /// past the end of the blob.
    pub fn glyph_bitmap(&self, glyph: &GlyphRecord) -> Option<&[u8]> {
        let start = glyph.offset as usize;
        let len = crate::pack::packed_len(glyph.pixel_count(), self.bpp);
        self.bitmap.get(start..start + len)
    }
}

/// What to rasterize. Codes are stored as `uint8` on the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    pub first_char: u8,
    pub last_char: u8,
    pub bpp: Bpp,
}

impl TableConfig {
    pub fn new(first: u32, last: u32, bpp: Bpp) -> Result<Self, Error> {
        let invalid = || Error::InvalidRange { first, last };
        let first_char = u8::try_from(first).map_err(|_| invalid())?;
        let last_char = u8::try_from(last).map_err(|_| invalid())?;
        if first_char > last_char {
            return Err(invalid());
        }
        Ok(Self {
            first_char,
            last_char,
            bpp,
        })
    }
}

/// Accumulates the shared bitmap blob and glyph records. Glyphs must be
/// pushed in ascending code order; each one's offset is the blob length at
/// the moment it is pushed.
#[derive(Debug)]
pub struct FontTableBuilder {
    bpp: Bpp,
    thresholds: Thresholds,
    bitmap: Vec<u8>,
    glyphs: Vec<GlyphRecord>,
}

impl FontTableBuilder {
    pub fn new(bpp: Bpp) -> Self {
        Self {
            bpp,
            thresholds: make_thresholds(bpp),
            bitmap: Vec::new(),
            glyphs: Vec::new(),
        }
    }

    pub fn push_glyph(&mut self, code: u32, glyph: &RasterGlyph) -> Result<GlyphRecord, Error> {
        if !glyph.is_well_formed() {
            return Err(Error::MalformedBitmap(code));
        }
        let at = Some(code);
        let record = GlyphRecord {
            offset: narrow(at, "bitmap_offset", self.bitmap.len() as i64)?,
            width: narrow(at, "width", glyph.width as i64)?,
            height: narrow(at, "height", glyph.height as i64)?,
            x_advance: narrow(at, "xAdvance", (glyph.advance_64 >> 6) as i64)?,
            x_offset: narrow(at, "xOffset", glyph.left as i64)?,
            y_offset: narrow(at, "yOffset", -(glyph.top as i64 - glyph.height as i64))?,
        };

        let pixels: Vec<u8> = glyph
            .pixels()
            .map(|gray| gray_to_bpp(gray, &self.thresholds))
            .collect();
        let packed = pack_pixels(&pixels, self.bpp);
        debug!(
            code,
            width = record.width,
            height = record.height,
            offset = record.offset,
            bytes = packed.len(),
            "packed glyph"
        );

        self.bitmap.extend_from_slice(&packed);
        self.glyphs.push(record);
        Ok(record)
    }

    pub fn finish(self, config: &TableConfig, line_height: u8) -> FontTable {
        FontTable {
            bitmap: self.bitmap,
            glyphs: self.glyphs,
            first_char: config.first_char,
            last_char: config.last_char,
            line_height,
            bpp: self.bpp,
            fixed_width: false,
        }
    }
}

/// Rasterize, quantize and pack every code in the configured range.
///
/// Runs strictly in order and stops at the first glyph the source can't
/// produce.
pub fn build_table<S: GlyphSource + ?Sized>(
    source: &S,
    config: &TableConfig,
) -> Result<FontTable, Error> {
    let line_height = narrow(None, "line_height", (source.line_height_64() >> 6) as i64)?;
    info!(
        first = config.first_char,
        last = config.last_char,
        bpp = %config.bpp,
        line_height,
        "building font table"
    );

    let mut builder = FontTableBuilder::new(config.bpp);
    for code in config.first_char as u32..=config.last_char as u32 {
        let glyph = source.render(code)?;
        builder.push_glyph(code, &glyph)?;
    }

    let table = builder.finish(config, line_height);
    info!(
        glyphs = table.glyphs.len(),
        bitmap_bytes = table.bitmap.len(),
        "font table built"
    );
    Ok(table)
}

fn narrow<T: TryFrom<i64>>(code: Option<u32>, field: &'static str, value: i64) -> Result<T, Error> {
    T::try_from(value).map_err(|_| Error::FieldOverflow { code, field, value })
}

#[cfg(test)]
mod test {
    use super::*;

    fn glyph(width: usize, height: usize, fill: u8) -> RasterGlyph {
        RasterGlyph {
            width,
            height,
            pitch: width,
            buffer: vec![fill; width * height],
            advance_64: (width as i32 + 1) * 64,
            left: 0,
            top: height as i32,
        }
    }

    #[test]
    fn offsets_follow_packed_sizes() {
        let mut builder = FontTableBuilder::new(Bpp::Two);
        // 3x3 = 9 pixels = 3 bytes at 2bpp
        let a = builder.push_glyph(65, &glyph(3, 3, 255)).unwrap();
        let b = builder.push_glyph(66, &glyph(0, 0, 0)).unwrap();
        let c = builder.push_glyph(67, &glyph(2, 1, 128)).unwrap();
        assert_eq!(a.offset, 0);
        assert_eq!(b.offset, 3);
        assert_eq!(c.offset, 3);

        let config = TableConfig::new(65, 67, Bpp::Two).unwrap();
        let table = builder.finish(&config, 10);
        assert_eq!(table.bitmap, vec![0xFF, 0xFF, 0xC0, 0xA0]);
        assert_eq!(table.glyph_bitmap(&table.glyphs[2]), Some(&[0xA0][..]));
        assert_eq!(table.glyph_bitmap(&table.glyphs[1]), Some(&[][..]));
        assert!(!table.fixed_width);
    }

    #[test]
    fn metrics_are_converted() {
        let mut builder = FontTableBuilder::new(Bpp::One);
        let record = builder
            .push_glyph(
                103,
                &RasterGlyph {
                    advance_64: 7 * 64 + 40,
                    left: -1,
                    top: 5,
                    ..glyph(4, 8, 0)
                },
            )
            .unwrap();
        assert_eq!(record.x_advance, 7);
        assert_eq!(record.x_offset, -1);
        // descender: 3 rows hang below the baseline
        assert_eq!(record.y_offset, 3);
    }

    #[test]
    fn pitch_padding_is_not_sampled() {
        let mut builder = FontTableBuilder::new(Bpp::One);
        let padded = RasterGlyph {
            width: 2,
            height: 2,
            pitch: 8,
            buffer: vec![
                255, 0, 255, 255, 255, 255, 255, 255, //
                0, 255, 255, 255, 255, 255, 255, 255,
            ],
            ..glyph(2, 2, 0)
        };
        builder.push_glyph(1, &padded).unwrap();
        let config = TableConfig::new(1, 1, Bpp::One).unwrap();
        assert_eq!(builder.finish(&config, 0).bitmap, vec![0b1001_0000]);
    }

    #[test]
    fn oversized_glyph_is_rejected() {
        let mut builder = FontTableBuilder::new(Bpp::Four);
        let err = builder.push_glyph(77, &glyph(300, 1, 0)).unwrap_err();
        assert!(matches!(
            err,
            Error::FieldOverflow {
                code: Some(77),
                field: "width",
                value: 300
            }
        ));
    }

    #[test]
    fn malformed_bitmap_is_rejected() {
        let mut builder = FontTableBuilder::new(Bpp::Four);
        let bad = RasterGlyph {
            buffer: vec![0; 3],
            ..glyph(2, 2, 0)
        };
        assert!(matches!(
            builder.push_glyph(9, &bad),
            Err(Error::MalformedBitmap(9))
        ));
    }

    #[test]
    fn range_validation() {
        assert!(TableConfig::new(32, 126, Bpp::Two).is_ok());
        assert!(TableConfig::new(65, 65, Bpp::Two).is_ok());
        assert!(matches!(
            TableConfig::new(100, 50, Bpp::Two),
            Err(Error::InvalidRange { first: 100, last: 50 })
        ));
        assert!(TableConfig::new(32, 256, Bpp::Two).is_err());
    }

    #[test]
    fn glyph_bitmap_past_the_blob() {
        let mut builder = FontTableBuilder::new(Bpp::Two);
        builder.push_glyph(65, &glyph(2, 2, 255)).unwrap();
        let mut table = builder.finish(&TableConfig::new(65, 65, Bpp::Two).unwrap(), 0);
        table.glyphs[0].offset = 1;
        assert_eq!(table.glyph_bitmap(&table.glyphs[0]), None);
        table.glyphs[0].offset = 0;
        table.glyphs[0].width = 9;
        assert_eq!(table.glyph_bitmap(&table.glyphs[0]), None);
    }

    #[test]
    fn glyph_lookup_by_code() {
        let mut builder = FontTableBuilder::new(Bpp::Two);
        builder.push_glyph(48, &glyph(1, 1, 0)).unwrap();
        builder.push_glyph(49, &glyph(2, 1, 0)).unwrap();
        let table = builder.finish(&TableConfig::new(48, 49, Bpp::Two).unwrap(), 0);
        assert_eq!(table.glyph(49).map(|g| g.width), Some(2));
        assert!(table.glyph(47).is_none());
        assert!(table.glyph(50).is_none());
    }
}
