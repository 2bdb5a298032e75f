//! Dominant color extraction by k-means clustering in Lab space.
//!
//! Clustering is done by `kmeans_colors` with a fixed seed, so the same region
//! always yields the same color. Each cluster is then scored by its share of
//! the pixels weighted towards saturated colors, so a large grey area does not
//! automatically beat a slightly smaller but vivid one.

use super::color::Color;
use image::RgbaImage;
use kmeans_colors::{Sort, get_kmeans};
use palette::{IntoColor, Lab, LinSrgb, Srgb};

/// Upper bound on the number of clusters.
const CLUSTERS: usize = 4;
const MAX_ITERATIONS: usize = 20;
const CONVERGE: f32 = 1e-4;
const SEED: u64 = 0;
/// Regions larger than this are sampled on a regular stride.
const MAX_SAMPLES: usize = 16_384;
/// Pixels with alpha below this are ignored (unless every pixel is).
const MIN_ALPHA: u8 = 128;

/// Returns the representative color of the most prominent cluster, or
/// `None` for an empty region.
pub fn dominant_color(region: &RgbaImage) -> Option<Color> {
    let samples = collect_samples(region);
    if samples.is_empty() {
        return None;
    }

    // k-means++ seeding needs k distinct points to pick from.
    let k = distinct_colors(&samples, CLUSTERS);
    let lab: Vec<Lab> = samples
        .iter()
        .map(|&c| c.into_linear::<f32>().into_color())
        .collect();

    let result = get_kmeans(k, MAX_ITERATIONS, CONVERGE, false, &lab, SEED);
    let clusters = Lab::sort_indexed_colors(&result.centroids, &result.indices);

    clusters
        .iter()
        .filter(|c| c.percentage > 0.0)
        .map(|c| {
            let linear: LinSrgb = c.centroid.into_color();
            let rgb: Srgb<f32> = Srgb::from_linear(linear);
            let color = Color::new(
                f64::from(rgb.red).clamp(0.0, 1.0),
                f64::from(rgb.green).clamp(0.0, 1.0),
                f64::from(rgb.blue).clamp(0.0, 1.0),
            );
            let score = f64::from(c.percentage) * (0.1 + saturation(&color));
            (color, score)
        })
        .fold(None, |best: Option<(Color, f64)>, (color, score)| match best {
            Some((_, s)) if s >= score => best,
            _ => Some((color, score)),
        })
        .map(|(color, _)| color)
}

fn collect_samples(region: &RgbaImage) -> Vec<Srgb<u8>> {
    let total = region.width() as usize * region.height() as usize;
    if total == 0 {
        return Vec::new();
    }
    let stride = total.div_ceil(MAX_SAMPLES).max(1);
    let to_srgb = |p: &image::Rgba<u8>| Srgb::new(p.0[0], p.0[1], p.0[2]);

    let opaque: Vec<Srgb<u8>> = region
        .pixels()
        .step_by(stride)
        .filter(|p| p.0[3] >= MIN_ALPHA)
        .map(to_srgb)
        .collect();
    if !opaque.is_empty() {
        return opaque;
    }

    region.pixels().step_by(stride).map(to_srgb).collect()
}

/// Number of distinct colors in `samples`, capped at `limit`.
fn distinct_colors(samples: &[Srgb<u8>], limit: usize) -> usize {
    let mut seen: Vec<Srgb<u8>> = Vec::with_capacity(limit);
    for sample in samples {
        if !seen.contains(sample) {
            seen.push(*sample);
            if seen.len() == limit {
                break;
            }
        }
    }
    seen.len()
}

/// HSV saturation in `[0, 1]`.
fn saturation(c: &Color) -> f64 {
    let max = c.red.max(c.green).max(c.blue);
    let min = c.red.min(c.green).min(c.blue);
    if max <= 0.0 { 0.0 } else { (max - min) / max }
}
