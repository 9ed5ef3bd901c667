//! Cosine similarity between two images.
//!
//! Both buffers are flattened in their storage order (row-major, channel
//! interleaved: `(y * width + x) * 3 + c`). When the flattened lengths
//! differ, the second sequence is fitted to the first: truncated when
//! longer, repeated cyclically when shorter (`b'[i] = b[i mod len(b)]`).
//!
//! Dot product and magnitudes are accumulated in `f64`. If either magnitude
//! is zero the similarity is defined as `0.0`.

use log::debug;

use crate::buffer::PixelBuffer;

/// Cosine similarity of two buffers, in `[0, 1]` for 8-bit samples.
pub fn cosine_similarity(a: &PixelBuffer, b: &PixelBuffer) -> f64 {
    debug!(
        "cosine similarity of {}x{} and {}x{} buffers",
        a.width(),
        a.height(),
        b.width(),
        b.height()
    );
    cosine_similarity_samples(a.as_slice(), b.as_slice())
}

/// Cosine similarity of two flat sample sequences, fitting `b` to the length
/// of `a` first.
pub fn cosine_similarity_samples(a: &[u8], b: &[u8]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    // `cycle` repeats b when shorter; `zip` stops at a's length when longer.
    for (&va, &vb) in a.iter().zip(b.iter().cycle()) {
        let (va, vb) = (va as f64, vb as f64);
        dot += va * vb;
        norm_a += va * va;
        norm_b += vb * vb;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}
