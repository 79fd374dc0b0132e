//! PNG encoding for projected charts.
//!
//! Two encodings are produced:
//! - **Indexed (color type 3)** when the chart has at most 256 distinct colors,
//!   as flat political maps do. A tRNS chunk carries the transparent corners.
//! - **RGBA (color type 6)** for photographic maps and anything richer.
//!
//! Use `encode_chart` for a projected [`OutputRaster`], `create_png_auto` for
//! raw RGBA buffers, or `create_png` to force RGBA.

use std::collections::{HashMap, HashSet};
use std::io::Write;

use chart_common::{ChartError, ChartResult};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use projection::{OutputRaster, Rgba};
use rayon::prelude::*;
use tracing::debug;

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

/// Pixel count above which the palette is gathered in parallel
const PARALLEL_THRESHOLD: usize = 4096;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

const COLOR_TYPE_INDEXED: u8 = 3;
const COLOR_TYPE_RGBA: u8 = 6;

/// Encode a projected chart, picking indexed or RGBA automatically.
pub fn encode_chart(chart: &OutputRaster) -> ChartResult<Vec<u8>> {
    let side = chart.side();
    let png = create_png_auto(chart.as_bytes(), side, side)?;
    debug!(side, bytes = png.len(), "Encoded chart PNG");
    Ok(png)
}

/// Encode RGBA8 pixels, as indexed PNG when they fit a palette.
pub fn create_png_auto(pixels: &[u8], width: usize, height: usize) -> ChartResult<Vec<u8>> {
    check_buffer(pixels, width, height)?;
    match Palette::extract(pixels) {
        Some(palette) => create_png_indexed(width, height, &palette.colors, &palette.indices),
        None => create_png(pixels, width, height),
    }
}

/// Encode RGBA8 pixels as a color type 6 PNG.
pub fn create_png(pixels: &[u8], width: usize, height: usize) -> ChartResult<Vec<u8>> {
    check_buffer(pixels, width, height)?;
    let mut png = start_png(width, height, COLOR_TYPE_RGBA);
    push_chunk(&mut png, b"IDAT", &deflate_scanlines(pixels, width * 4)?);
    push_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

/// Encode palette indices as a color type 3 PNG.
///
/// Alpha goes into a tRNS chunk whenever any palette entry is not opaque.
pub fn create_png_indexed(
    width: usize,
    height: usize,
    colors: &[Rgba],
    indices: &[u8],
) -> ChartResult<Vec<u8>> {
    if colors.is_empty() || colors.len() > MAX_PALETTE_SIZE {
        return Err(ChartError::Encode(format!(
            "palette must hold 1 to {} colors, got {}",
            MAX_PALETTE_SIZE,
            colors.len()
        )));
    }
    if width == 0 || height == 0 || indices.len() != width * height {
        return Err(ChartError::Encode(format!(
            "expected {} palette indices for {}x{}, got {}",
            width * height,
            width,
            height,
            indices.len()
        )));
    }

    let mut png = start_png(width, height, COLOR_TYPE_INDEXED);

    let plte: Vec<u8> = colors.iter().flat_map(|c| [c[0], c[1], c[2]]).collect();
    push_chunk(&mut png, b"PLTE", &plte);

    if colors.iter().any(|c| c[3] != u8::MAX) {
        let trns: Vec<u8> = colors.iter().map(|c| c[3]).collect();
        push_chunk(&mut png, b"tRNS", &trns);
    }

    push_chunk(&mut png, b"IDAT", &deflate_scanlines(indices, width)?);
    push_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

fn check_buffer(pixels: &[u8], width: usize, height: usize) -> ChartResult<()> {
    if width == 0 || height == 0 {
        return Err(ChartError::Encode(format!(
            "cannot encode a {}x{} image",
            width, height
        )));
    }
    if pixels.len() != width * height * 4 {
        return Err(ChartError::Encode(format!(
            "expected {} RGBA bytes for {}x{}, got {}",
            width * height * 4,
            width,
            height,
            pixels.len()
        )));
    }
    Ok(())
}

#[inline]
fn rgba(px: &[u8]) -> Rgba {
    [px[0], px[1], px[2], px[3]]
}

/// Distinct colors of an image and each pixel's index into them.
#[derive(Debug)]
struct Palette {
    colors: Vec<Rgba>,
    indices: Vec<u8>,
}

impl Palette {
    /// `None` when the image has more than 256 colors.
    fn extract(pixels: &[u8]) -> Option<Self> {
        if pixels.len() / 4 >= PARALLEL_THRESHOLD {
            Self::extract_parallel(pixels)
        } else {
            Self::extract_sequential(pixels)
        }
    }

    /// Colors are numbered in order of first appearance.
    fn extract_sequential(pixels: &[u8]) -> Option<Self> {
        let mut lookup: HashMap<Rgba, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
        let mut colors = Vec::with_capacity(MAX_PALETTE_SIZE);
        let mut indices = Vec::with_capacity(pixels.len() / 4);

        for px in pixels.chunks_exact(4) {
            let color = rgba(px);
            let index = match lookup.get(&color) {
                Some(&index) => index,
                None => {
                    if colors.len() == MAX_PALETTE_SIZE {
                        return None;
                    }
                    let index = colors.len() as u8;
                    colors.push(color);
                    lookup.insert(color, index);
                    index
                }
            };
            indices.push(index);
        }

        Some(Self { colors, indices })
    }

    /// Colors are sorted so the output does not depend on thread scheduling.
    fn extract_parallel(pixels: &[u8]) -> Option<Self> {
        let within_limit =
            |set: HashSet<Rgba>| (set.len() <= MAX_PALETTE_SIZE).then_some(set);

        let unique = pixels
            .par_chunks_exact(4)
            .try_fold(HashSet::new, |mut seen, px| {
                seen.insert(rgba(px));
                within_limit(seen)
            })
            .try_reduce(HashSet::new, |mut a, b| {
                a.extend(b);
                within_limit(a)
            })?;

        let mut colors: Vec<Rgba> = unique.into_iter().collect();
        colors.sort_unstable();
        let lookup: HashMap<Rgba, u8> = colors
            .iter()
            .enumerate()
            .map(|(index, color)| (*color, index as u8))
            .collect();

        let indices = pixels
            .par_chunks_exact(4)
            .map(|px| lookup.get(&rgba(px)).copied().unwrap_or(0))
            .collect();

        Some(Self { colors, indices })
    }
}

/// Signature plus an IHDR for an 8-bit, non-interlaced image.
fn start_png(width: usize, height: usize, color_type: u8) -> Vec<u8> {
    let mut png = PNG_SIGNATURE.to_vec();
    let mut ihdr = [0u8; 13];
    ihdr[0..4].copy_from_slice(&(width as u32).to_be_bytes());
    ihdr[4..8].copy_from_slice(&(height as u32).to_be_bytes());
    ihdr[8] = 8; // bit depth
    ihdr[9] = color_type;
    // compression, filter and interlace methods stay 0
    push_chunk(&mut png, b"IHDR", &ihdr);
    png
}

/// Append a length-prefixed, CRC-terminated chunk.
fn push_chunk(png: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(kind);
    png.extend_from_slice(data);

    let mut crc = crc32fast::Hasher::new();
    crc.update(kind);
    crc.update(data);
    png.extend_from_slice(&crc.finalize().to_be_bytes());
}

/// Zlib-compress rows of `stride` bytes, each prefixed with filter type 0.
fn deflate_scanlines(data: &[u8], stride: usize) -> ChartResult<Vec<u8>> {
    let compression_failed =
        |e: std::io::Error| ChartError::Encode(format!("IDAT compression failed: {}", e));

    let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2), Compression::fast());
    for row in data.chunks_exact(stride) {
        encoder.write_all(&[0]).map_err(compression_failed)?;
        encoder.write_all(row).map_err(compression_failed)?;
    }
    encoder.finish().map_err(compression_failed)
}
