use crate::Bpp;

/// Bytes needed to hold `pixel_count` pixels at `bpp`.
pub fn packed_len(pixel_count: usize, bpp: Bpp) -> usize {
    pixel_count.div_ceil(bpp.pixels_per_byte())
}

/// Pack quantized pixels, first pixel in the most significant bits of each
/// byte. A trailing partial byte is zero-padded in its low bits.
pub fn pack_pixels(pixels: &[u8], bpp: Bpp) -> Vec<u8> {
    let bits = bpp.bits();
    let mask = bpp.mask();
    let per_byte = bpp.pixels_per_byte();

    pixels
        .chunks(per_byte)
        .map(|chunk| {
            (0..per_byte)
                .map(|slot| chunk.get(slot).copied().unwrap_or(0) & mask)
                .fold(0u8, |byte, px| (byte << bits) | px)
        })
        .collect()
}

/// Inverse of [`pack_pixels`]: read back `pixel_count` levels.
pub fn unpack_pixels(bytes: &[u8], pixel_count: usize, bpp: Bpp) -> Vec<u8> {
    let bits = bpp.bits();
    let mask = bpp.mask();
    let per_byte = bpp.pixels_per_byte();

    bytes
        .iter()
        .flat_map(|&byte| {
            (0..per_byte).map(move |slot| (byte >> (8 - bits * (slot as u8 + 1))) & mask)
        })
        .take(pixel_count)
        .collect()
}
