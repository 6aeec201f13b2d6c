use std::fmt;
use image::DynamicImage;
use image::imageops::{self, FilterType};
use indexmap::IndexMap;
use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    // DrawingML srgbClr form, e.g. 0A0A0A
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Most frequent exact color of the image after resampling it to a
/// `SAMPLE_SIZE` square. Alpha is dropped before counting.
///
/// Counting preserves first-seen order, so on a tie the color met first in
/// row-major order wins.
pub fn dominant_color(image: &DynamicImage) -> Rgb {
    let rgb = image.to_rgb8();
    let sample = imageops::resize(&rgb, SAMPLE_SIZE, SAMPLE_SIZE, FilterType::CatmullRom);

    let mut counts: IndexMap<Rgb, u32> = IndexMap::new();
    for pixel in sample.pixels() {
        let [r, g, b] = pixel.0;
        *counts.entry(Rgb::new(r, g, b)).or_insert(0) += 1;
    }

    let mut best = Rgb::BLACK;
    let mut best_count = 0;
    for (color, count) in counts {
        // strictly greater keeps the earliest color on ties
        if count > best_count {
            best = color;
            best_count = count;
        }
    }
    best
}

/// Rec. 709 weights applied directly to 0-255 channel values (no gamma decoding).
pub fn luminance(color: Rgb) -> f64 {
    0.2126 * color.r as f64 + 0.7152 * color.g as f64 + 0.0722 * color.b as f64
}

pub fn contrast_color(background: Rgb) -> Rgb {
    if luminance(background) < LUMINANCE_THRESHOLD {
        Rgb::WHITE
    } else {
        Rgb::BLACK
    }
}
