//! Contact sheet of the quantized glyphs, decoded back out of the packed
//! blob, so a table can be eyeballed without flashing a device.

use crate::pack::unpack_pixels;
use crate::{Error, FontTable};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const GLYPHS_PER_ROW: usize = 16;

/// 8-bit grayscale image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

pub fn render_preview(table: &FontTable) -> Preview {
    // one pixel gutter between cells
    let cell_w = table.glyphs.iter().map(|g| g.width as usize).max().unwrap_or(0) + 1;
    let cell_h = table.glyphs.iter().map(|g| g.height as usize).max().unwrap_or(0) + 1;
    let cols = table.glyphs.len().clamp(1, GLYPHS_PER_ROW);
    let rows = table.glyphs.len().div_ceil(GLYPHS_PER_ROW).max(1);

    let width = cols * cell_w;
    let height = rows * cell_h;
    let mut pixels = vec![0u8; width * height];
    let max_level = table.bpp.max_level() as usize;

    for (i, glyph) in table.glyphs.iter().enumerate() {
        let x0 = (i % GLYPHS_PER_ROW) * cell_w;
        let y0 = (i / GLYPHS_PER_ROW) * cell_h;
        // a record pointing outside the blob draws as blank
        let packed = table.glyph_bitmap(glyph).unwrap_or_default();
        let levels = unpack_pixels(packed, glyph.pixel_count(), table.bpp);
        let w = glyph.width as usize;

        for (j, level) in levels.into_iter().enumerate() {
            let (x, y) = (x0 + j % w, y0 + j / w);
            pixels[y * width + x] = (level as usize * 255 / max_level) as u8;
        }
    }

    Preview {
        width,
        height,
        pixels,
    }
}

pub fn write_preview(table: &FontTable, path: &Path) -> Result<(), Error> {
    let preview = render_preview(table);
    let png_err = |e: png::EncodingError| Error::Png {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut w = BufWriter::new(File::create(path).map_err(io_err)?);
    let mut encoder = png::Encoder::new(&mut w, preview.width as u32, preview.height as u32);
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().map_err(png_err)?;
    writer.write_image_data(&preview.pixels).map_err(png_err)?;
    // the png writer appends IEND on drop and swallows any error; it lands
    // in the buffer, so the flush below is what reports a failed write
    drop(writer);
    w.flush().map_err(io_err)?;

    tracing::info!(path = %path.display(), width = preview.width, height = preview.height, "wrote preview");
    Ok(())
}
