use std::fmt;
use std::io;
use std::path::PathBuf;

/// Everything that can stop a font table from being produced.
///
/// None of these are recoverable: the tool either writes a complete `.c`/`.h`
/// pair or nothing it guarantees to be consistent.
#[derive(Debug)]
pub enum Error {
    InvalidBpp(u8),
    /// `--bpp` text that isn't a number at all.
    UnparsedBpp(String),
    InvalidSize(u32),
    InvalidRange {
        first: u32,
        last: u32,
    },
    InvalidName(String),
    /// Output base with no file name to derive `<name>.h`/`<name>.c` from.
    InvalidOutput(PathBuf),
    FontLoad {
        path: PathBuf,
        reason: String,
    },
    MissingGlyph(u32),
    MalformedBitmap(u32),
    /// A value that doesn't fit the C field it's emitted into. `code` is
    /// `None` for table-level fields.
    FieldOverflow {
        code: Option<u32>,
        field: &'static str,
        value: i64,
    },
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Png {
        path: PathBuf,
        reason: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidBpp(bpp) => {
                write!(f, "invalid bits per pixel {}, expected 1, 2 or 4", bpp)
            }
            Error::UnparsedBpp(text) => {
                write!(f, "invalid bits per pixel {:?}, expected 1, 2 or 4", text)
            }
            Error::InvalidSize(size) => write!(f, "invalid pixel size {}", size),
            Error::InvalidRange { first, last } => write!(
                f,
                "invalid character range {}..={}, codes must be ascending and at most 255",
                first, last
            ),
            Error::InvalidName(name) => {
                write!(f, "{:?} is not a valid C identifier", name)
            }
            Error::InvalidOutput(path) => write!(
                f,
                "output base {:?} does not name a file",
                path.display().to_string()
            ),
            Error::FontLoad { path, reason } => {
                write!(f, "failed to load font {}: {}", path.display(), reason)
            }
            Error::MissingGlyph(code) => {
                write!(f, "font has no glyph for character code {}", code)
            }
            Error::MalformedBitmap(code) => write!(
                f,
                "rasterizer returned a bitmap too small for its dimensions for character code {}",
                code
            ),
            Error::FieldOverflow {
                code: Some(code),
                field,
                value,
            } => write!(
                f,
                "glyph {} has {} = {} which does not fit the generated table",
                code, field, value
            ),
            Error::FieldOverflow {
                code: None,
                field,
                value,
            } => write!(
                f,
                "font {} = {} does not fit the generated table",
                field, value
            ),
            Error::Io { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
            Error::Png { path, reason } => {
                write!(f, "failed to encode preview {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
