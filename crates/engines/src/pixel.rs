//! Pixel buffer conversion from a CPU [`Canvas`].
//!
//! This module is always available (no feature gate) so that both the `png`
//! snapshot path and any `ImageData` consumer can share the conversion.

use polymer_sketch_core::canvas::Canvas;

/// Packs a canvas into an RGBA8 buffer of length `width * height * 4`.
///
/// The raster is opaque once composited, so alpha is always 255.
pub fn canvas_to_rgba(canvas: &Canvas) -> Vec<u8> {
    canvas
        .pixels()
        .iter()
        .flat_map(|px| {
            let [r, g, b] = px.to_rgb8();
            [r, g, b, 255u8]
        })
        .collect()
}
