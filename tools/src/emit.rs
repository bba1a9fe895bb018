use crate::{Error, FontTable};
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

const BYTES_PER_LINE: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub header: PathBuf,
    pub source: PathBuf,
    /// What the source `#include`s: the header's file name alone.
    pub include: String,
}

impl OutputPaths {
    /// `<base>.h` and `<base>.c`. The suffix is appended, so a dotted base
    /// name keeps its dots. The base must end in a file name; `..`, `.` or
    /// an empty path would leave nothing to name the pair after.
    pub fn from_base(base: &Path) -> Result<Self, Error> {
        let stem = base
            .file_name()
            .ok_or_else(|| Error::InvalidOutput(base.to_path_buf()))?;
        let dir = base.parent().unwrap_or(Path::new(""));
        let with_suffix = |suffix: &str| {
            let mut file = OsString::from(stem);
            file.push(suffix);
            file
        };
        let header = with_suffix(".h");
        Ok(Self {
            include: header.to_string_lossy().into_owned(),
            header: dir.join(header),
            source: dir.join(with_suffix(".c")),
        })
    }
}

/// The symbol name becomes a C identifier and the prefix of the static
/// arrays, so it has to be one.
pub fn check_symbol_name(name: &str) -> Result<(), Error> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidName(name.to_string()))
    }
}

pub fn write_header(w: &mut impl Write, name: &str) -> io::Result<()> {
    let guard = format!("_{}_H_", name.to_uppercase());
    write!(
        w,
        "#ifndef {guard}
#define {guard}

#include <stdint.h>

typedef struct {{
    uint16_t bitmap_offset;
    uint8_t  width;
    uint8_t  height;
    int8_t   xAdvance;
    int8_t   xOffset;
    int8_t   yOffset;
}} font_glyph_t;

typedef struct {{
    const uint8_t      *bitmap;
    const font_glyph_t *glyphs;
    uint8_t first_char;
    uint8_t last_char;
    uint8_t line_height;
    uint8_t bpp;
    uint8_t fixed_width;
}} font_t;

extern const font_t {name};

#endif
"
    )
}

pub fn write_source(
    w: &mut impl Write,
    table: &FontTable,
    name: &str,
    header_file: &str,
) -> io::Result<()> {
    writeln!(w, "#include \"{}\"", header_file)?;
    writeln!(w)?;

    writeln!(w, "static const uint8_t {}_Bitmap[] = {{", name)?;
    // C has no empty arrays; nothing indexes the pad byte
    let bitmap: &[u8] = if table.bitmap.is_empty() {
        &[0]
    } else {
        &table.bitmap
    };
    for (i, b) in bitmap.iter().enumerate() {
        write!(w, "0x{:02X}, ", b)?;
        if (i + 1) % BYTES_PER_LINE == 0 {
            writeln!(w)?;
        }
    }
    writeln!(w)?;
    writeln!(w, "}};")?;
    writeln!(w)?;

    writeln!(w, "static const font_glyph_t {}_Glyphs[] = {{", name)?;
    for g in &table.glyphs {
        writeln!(
            w,
            "  {{ {}, {}, {}, {}, {}, {} }},",
            g.offset, g.width, g.height, g.x_advance, g.x_offset, g.y_offset
        )?;
    }
    writeln!(w, "}};")?;
    writeln!(w)?;

    write!(
        w,
        "const font_t {name} = {{
    .bitmap       = {name}_Bitmap,
    .glyphs       = {name}_Glyphs,
    .first_char   = {first},
    .last_char    = {last},
    .line_height  = {line_height},
    .bpp          = {bpp},
    .fixed_width  = {fixed_width}
}};
",
        first = table.first_char,
        last = table.last_char,
        line_height = table.line_height,
        bpp = table.bpp,
        fixed_width = table.fixed_width as u8,
    )
}

/// Write the header/source pair next to each other.
pub fn write_files(table: &FontTable, name: &str, out_base: &Path) -> Result<OutputPaths, Error> {
    check_symbol_name(name)?;
    let paths = OutputPaths::from_base(out_base)?;

    write_with(&paths.header, |w| write_header(w, name))?;
    write_with(&paths.source, |w| write_source(w, table, name, &paths.include))?;
    Ok(paths)
}

fn write_with(
    path: &Path,
    f: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
) -> Result<(), Error> {
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut w = BufWriter::new(File::create(path).map_err(io_err)?);
    f(&mut w).map_err(io_err)?;
    w.flush().map_err(io_err)?;
    info!(path = %path.display(), "wrote");
    Ok(())
}
