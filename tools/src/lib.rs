//
// font2c: Bake a range of characters from a TTF/OTF font into a bitmap
// glyph table, as C source for small displays that can't rasterize fonts.
//

pub mod emit;
mod error;
pub mod pack;
pub mod preview;
pub mod quantize;
pub mod raster;
pub mod table;

pub use error::Error;
pub use quantize::Bpp;
pub use raster::{FontdueSource, GlyphSource, RasterGlyph};
pub use table::{build_table, FontTable, GlyphRecord, TableConfig};
