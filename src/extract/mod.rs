//! Source-color extraction from wallpaper images.
//!
//! The image is downsampled, quantized into a coarse RGB histogram, then
//! refined with a population-weighted k-means in Lab space. Cluster centers
//! are scored the way Material's `Score` does: colors whose hue neighborhood
//! covers a large share of the image win, with a bonus for chroma near 48 and
//! a penalty for near-black or near-white tones. Everything is seeded from the
//! histogram so identical input always yields the same color.

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader, RgbaImage};
use palette::convert::FromColorUnclamped;
use palette::{FromColor, Lab, Srgb};
use tracing::debug;

use crate::color::{Color, Tonal};
use crate::error::ThemeError;
use crate::scheme::SchemeKind;

/// Default edge length of the square area the image is reduced to.
pub const DEFAULT_BITMAP_SIZE: u32 = 128;

/// Seed used when no cluster survives scoring.
pub const FALLBACK_SOURCE: Color = Color::new(0x42, 0x85, 0xF4);

const MAX_CLUSTERS: usize = 16;
const KMEANS_ITERATIONS: usize = 10;
const KMEANS_CONVERGED: f32 = 0.25;

const TARGET_CHROMA: f32 = 48.0;
const WEIGHT_PROPORTION: f32 = 0.7;
const WEIGHT_CHROMA_ABOVE: f32 = 0.3;
const WEIGHT_CHROMA_BELOW: f32 = 0.1;
const WEIGHT_EXTREME_TONE: f32 = 0.5;
const CUTOFF_CHROMA: f32 = 5.0;
const CUTOFF_EXCITED_PROPORTION: f32 = 0.01;
const HUE_NEIGHBORHOOD: i32 = 15;

/// Smart-mode thresholds on Hasler-Suesstrunk colorfulness.
const SMART_MUTED_COLORFULNESS: f32 = 15.0;
const SMART_VIVID_COLORFULNESS: f32 = 60.0;
const SMART_MUTED_CHROMA: f32 = 20.0;

/// Result of analyzing one wallpaper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extraction {
    pub source: Color,
    pub colorfulness: f32,
}

/// Extract the representative source color of an image file.
pub fn extract(path: &Path, bitmap_size: u32) -> Result<Color, ThemeError> {
    let image = open_image(path)?;
    Ok(extract_from_image(&image, bitmap_size))
}

/// Decode once and compute both the source color and colorfulness.
pub fn analyze(path: &Path, bitmap_size: u32) -> Result<Extraction, ThemeError> {
    let image = open_image(path)?;
    let pixels = downsample(&image, bitmap_size);
    let extraction = Extraction {
        source: source_from_pixels(&pixels),
        colorfulness: colorfulness_of(&pixels),
    };
    debug!(
        path = %path.display(),
        source = %extraction.source,
        colorfulness = extraction.colorfulness,
        "analyzed wallpaper"
    );
    Ok(extraction)
}

pub fn extract_from_image(image: &DynamicImage, bitmap_size: u32) -> Color {
    source_from_pixels(&downsample(image, bitmap_size))
}

/// Pick a scheme from image colorfulness and the extracted source color.
pub fn smart_scheme(colorfulness: f32, source: Color) -> SchemeKind {
    let chroma = Tonal::of(source).chroma;
    if colorfulness < SMART_MUTED_COLORFULNESS || chroma < SMART_MUTED_CHROMA {
        SchemeKind::Neutral
    } else if colorfulness >= SMART_VIVID_COLORFULNESS {
        SchemeKind::Vibrant
    } else {
        SchemeKind::TonalSpot
    }
}

fn open_image(path: &Path) -> Result<DynamicImage, ThemeError> {
    let invalid = |detail: String| {
        ThemeError::InvalidInput(format!("cannot decode image {}: {detail}", path.display()))
    };
    ImageReader::open(path)
        .map_err(|err| invalid(err.to_string()))?
        .with_guessed_format()
        .map_err(|err| invalid(err.to_string()))?
        .decode()
        .map_err(|err| invalid(err.to_string()))
}

/// Reduce the image so its area is at most `bitmap_size^2`, keeping aspect.
fn downsample(image: &DynamicImage, bitmap_size: u32) -> RgbaImage {
    let (width, height) = image.dimensions();
    let max_area = u64::from(bitmap_size.max(1)).pow(2);
    let area = u64::from(width) * u64::from(height);
    if area <= max_area {
        return image.to_rgba8();
    }
    let scale = (max_area as f64 / area as f64).sqrt();
    let new_width = ((f64::from(width) * scale).floor() as u32).max(1);
    let new_height = ((f64::from(height) * scale).floor() as u32).max(1);
    image
        .resize_exact(new_width, new_height, FilterType::Triangle)
        .to_rgba8()
}

// ---------------------------------------------------------------------------
// Quantization
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
struct Bin {
    count: u32,
    sum: [u64; 3],
}

#[derive(Debug, Clone, Copy)]
struct WeightedLab {
    lab: Lab,
    weight: f32,
}

#[derive(Debug, Clone, Copy)]
struct Cluster {
    color: Color,
    population: f32,
}

fn source_from_pixels(pixels: &RgbaImage) -> Color {
    let points = histogram(pixels);
    if points.is_empty() {
        debug!("no opaque pixels, using fallback source");
        return FALLBACK_SOURCE;
    }
    let clusters = kmeans(&points);
    score(&clusters).unwrap_or_else(|| {
        debug!(clusters = clusters.len(), "every cluster filtered, using fallback source");
        FALLBACK_SOURCE
    })
}

/// 4 bits per channel; each occupied bin becomes one weighted point at the
/// mean color of its pixels. Points are ordered by population.
fn histogram(pixels: &RgbaImage) -> Vec<WeightedLab> {
    let mut bins = vec![Bin::default(); 1 << 12];
    for pixel in pixels.pixels() {
        let [r, g, b, a] = pixel.0;
        if a < 255 {
            continue;
        }
        let index = (usize::from(r >> 4) << 8) | (usize::from(g >> 4) << 4) | usize::from(b >> 4);
        let bin = &mut bins[index];
        bin.count += 1;
        bin.sum[0] += u64::from(r);
        bin.sum[1] += u64::from(g);
        bin.sum[2] += u64::from(b);
    }

    let mut occupied: Vec<(usize, Bin)> = bins
        .into_iter()
        .enumerate()
        .filter(|(_, bin)| bin.count > 0)
        .collect();
    occupied.sort_by(|(ia, a), (ib, b)| b.count.cmp(&a.count).then(ia.cmp(ib)));

    occupied
        .into_iter()
        .map(|(_, bin)| {
            let count = u64::from(bin.count);
            let mean = |sum: u64| ((sum + count / 2) / count) as u8;
            let color = Color::new(mean(bin.sum[0]), mean(bin.sum[1]), mean(bin.sum[2]));
            WeightedLab {
                lab: to_lab(color),
                weight: bin.count as f32,
            }
        })
        .collect()
}

fn kmeans(points: &[WeightedLab]) -> Vec<Cluster> {
    let mut centroids: Vec<Lab> = points
        .iter()
        .take(MAX_CLUSTERS)
        .map(|point| point.lab)
        .collect();
    let mut populations = vec![0.0_f32; centroids.len()];

    for iteration in 0..KMEANS_ITERATIONS {
        let mut sums = vec![[0.0_f32; 3]; centroids.len()];
        populations.iter_mut().for_each(|p| *p = 0.0);

        for point in points {
            let nearest = nearest_centroid(&centroids, point.lab);
            sums[nearest][0] += point.lab.l * point.weight;
            sums[nearest][1] += point.lab.a * point.weight;
            sums[nearest][2] += point.lab.b * point.weight;
            populations[nearest] += point.weight;
        }

        let mut moved = 0.0_f32;
        for (idx, centroid) in centroids.iter_mut().enumerate() {
            let weight = populations[idx];
            if weight <= 0.0 {
                continue;
            }
            let next = Lab::new(
                sums[idx][0] / weight,
                sums[idx][1] / weight,
                sums[idx][2] / weight,
            );
            moved = moved.max(lab_distance_sq(*centroid, next));
            *centroid = next;
        }
        if moved < KMEANS_CONVERGED {
            debug!(iteration, "k-means converged");
            break;
        }
    }

    centroids
        .into_iter()
        .zip(populations)
        .filter(|(_, population)| *population > 0.0)
        .map(|(lab, population)| Cluster {
            color: Color::from_srgb(Srgb::from_color_unclamped(lab)),
            population,
        })
        .collect()
}

fn nearest_centroid(centroids: &[Lab], lab: Lab) -> usize {
    let mut best = 0;
    let mut best_distance = f32::INFINITY;
    for (idx, centroid) in centroids.iter().enumerate() {
        let distance = lab_distance_sq(*centroid, lab);
        if distance < best_distance {
            best = idx;
            best_distance = distance;
        }
    }
    best
}

fn lab_distance_sq(a: Lab, b: Lab) -> f32 {
    (a.l - b.l).powi(2) + (a.a - b.a).powi(2) + (a.b - b.b).powi(2)
}

fn to_lab(color: Color) -> Lab {
    Lab::from_color(color.to_srgb())
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

fn score(clusters: &[Cluster]) -> Option<Color> {
    let total: f32 = clusters.iter().map(|c| c.population).sum();
    if total <= 0.0 {
        return None;
    }

    let tonal: Vec<Tonal> = clusters.iter().map(|c| Tonal::of(c.color)).collect();
    let mut hue_proportions = [0.0_f32; 360];
    for (cluster, coords) in clusters.iter().zip(&tonal) {
        hue_proportions[hue_bucket(coords.hue)] += cluster.population / total;
    }

    let mut excited = [0.0_f32; 360];
    for (hue, slot) in excited.iter_mut().enumerate() {
        for offset in -HUE_NEIGHBORHOOD..=HUE_NEIGHBORHOOD {
            let neighbor = (hue as i32 + offset).rem_euclid(360) as usize;
            *slot += hue_proportions[neighbor];
        }
    }

    let mut best: Option<(f32, Color)> = None;
    for (cluster, coords) in clusters.iter().zip(&tonal) {
        let proportion = excited[hue_bucket(coords.hue)];
        if coords.chroma < CUTOFF_CHROMA || proportion <= CUTOFF_EXCITED_PROPORTION {
            continue;
        }
        let proportion_score = proportion * 100.0 * WEIGHT_PROPORTION;
        let chroma_weight = if coords.chroma < TARGET_CHROMA {
            WEIGHT_CHROMA_BELOW
        } else {
            WEIGHT_CHROMA_ABOVE
        };
        let chroma_score = (coords.chroma - TARGET_CHROMA) * chroma_weight;
        let tone_penalty = if coords.tone < 15.0 {
            (15.0 - coords.tone) * WEIGHT_EXTREME_TONE
        } else if coords.tone > 90.0 {
            (coords.tone - 90.0) * WEIGHT_EXTREME_TONE
        } else {
            0.0
        };
        let total_score = proportion_score + chroma_score - tone_penalty;
        if best.map_or(true, |(top, _)| total_score > top) {
            best = Some((total_score, cluster.color));
        }
    }
    best.map(|(_, color)| color)
}

fn hue_bucket(hue: f32) -> usize {
    (hue.round() as usize) % 360
}

/// Hasler-Suesstrunk colorfulness over opaque pixels.
fn colorfulness_of(pixels: &RgbaImage) -> f32 {
    let mut count = 0.0_f64;
    let (mut rg_sum, mut yb_sum, mut rg_sq, mut yb_sq) = (0.0_f64, 0.0_f64, 0.0_f64, 0.0_f64);
    for pixel in pixels.pixels() {
        let [r, g, b, a] = pixel.0;
        if a < 255 {
            continue;
        }
        let (r, g, b) = (f64::from(r), f64::from(g), f64::from(b));
        let rg = r - g;
        let yb = 0.5 * (r + g) - b;
        rg_sum += rg;
        yb_sum += yb;
        rg_sq += rg * rg;
        yb_sq += yb * yb;
        count += 1.0;
    }
    if count == 0.0 {
        return 0.0;
    }
    let (rg_mean, yb_mean) = (rg_sum / count, yb_sum / count);
    let rg_var = (rg_sq / count - rg_mean * rg_mean).max(0.0);
    let yb_var = (yb_sq / count - yb_mean * yb_mean).max(0.0);
    let std_root = (rg_var + yb_var).sqrt();
    let mean_root = (rg_mean * rg_mean + yb_mean * yb_mean).sqrt();
    (std_root + 0.3 * mean_root) as f32
}
