use crate::Error;
use std::fmt;
use std::str::FromStr;

/// Output bit depth. Only depths that divide a byte evenly are allowed, so a
/// packed byte never straddles two pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bpp {
    One,
    Two,
    Four,
}

impl Bpp {
    pub const ALL: [Bpp; 3] = [Bpp::One, Bpp::Two, Bpp::Four];

    pub fn bits(self) -> u8 {
        match self {
            Bpp::One => 1,
            Bpp::Two => 2,
            Bpp::Four => 4,
        }
    }

    /// Number of gray levels, `2^bits`.
    pub fn levels(self) -> u16 {
        1 << self.bits()
    }

    /// Highest quantized value.
    pub fn max_level(self) -> u8 {
        (self.levels() - 1) as u8
    }

    pub fn mask(self) -> u8 {
        self.max_level()
    }

    pub fn pixels_per_byte(self) -> usize {
        8 / self.bits() as usize
    }
}

impl TryFrom<u8> for Bpp {
    type Error = Error;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            1 => Ok(Bpp::One),
            2 => Ok(Bpp::Two),
            4 => Ok(Bpp::Four),
            other => Err(Error::InvalidBpp(other)),
        }
    }
}

impl FromStr for Bpp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s
            .trim()
            .parse::<u8>()
            .map_err(|_| Error::UnparsedBpp(s.to_string()))?;
        Bpp::try_from(bits)
    }
}

impl fmt::Display for Bpp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// Ascending cut points splitting 0..=255 into `2^bpp` equal bands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thresholds(Vec<u8>);

impl Thresholds {
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn make_thresholds(bpp: Bpp) -> Thresholds {
    let levels = bpp.levels();
    let step = 256 / levels;
    Thresholds((1..levels).map(|i| (step * i) as u8).collect())
}

/// Quantize an 8-bit intensity to a level in `0..2^bpp`.
///
/// The level is the number of thresholds `value` meets or exceeds, so a
/// value sitting exactly on a threshold lands in the band above it.
pub fn gray_to_bpp(value: u8, thresholds: &Thresholds) -> u8 {
    // thresholds are strictly ascending
    thresholds.0.partition_point(|&t| t <= value) as u8
}
