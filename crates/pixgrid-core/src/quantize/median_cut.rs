//! Median-cut reduction of a grayscale image.
//!
//! # Algorithm
//!
//! Gray levels are bucketed into a 256-bin histogram. Starting from a single
//! box spanning every occupied level, the most populated box that still holds
//! at least two distinct levels is split at its median pixel. Splitting stops
//! once `max_colors` boxes exist or nothing is splittable. Each pixel is then
//! replaced by the rounded mean level of its box.
//!
//! Boxes cover disjoint level ranges, so the output never has more distinct
//! levels than the input and never more than `max_colors`.

use image::{GrayImage, Luma};

/// A contiguous run of occupied gray levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LevelBox {
    lo: u8,
    hi: u8,
    count: u64,
}

impl LevelBox {
    fn new(lo: u8, hi: u8, histogram: &[u64; 256]) -> Self {
        let count = histogram[lo as usize..=hi as usize].iter().sum();
        Self { lo, hi, count }
    }

    fn occupied_levels(&self, histogram: &[u64; 256]) -> Vec<u8> {
        (self.lo..=self.hi)
            .filter(|&v| histogram[v as usize] > 0)
            .collect()
    }

    fn mean(&self, histogram: &[u64; 256]) -> u8 {
        let weighted: u64 = (self.lo..=self.hi)
            .map(|v| v as u64 * histogram[v as usize])
            .sum();
        ((weighted + self.count / 2) / self.count) as u8
    }

    /// Split at the median pixel, keeping both halves non-empty.
    fn split(&self, histogram: &[u64; 256]) -> Option<(LevelBox, LevelBox)> {
        let levels = self.occupied_levels(histogram);
        if levels.len() < 2 {
            return None;
        }

        let half = self.count.div_ceil(2);
        let mut cumulative = 0u64;
        let mut split_at = 0usize;
        for (i, &v) in levels.iter().enumerate() {
            cumulative += histogram[v as usize];
            split_at = i;
            if cumulative >= half {
                break;
            }
        }
        let split_at = split_at.min(levels.len() - 2);

        let left = LevelBox::new(levels[0], levels[split_at], histogram);
        let right = LevelBox::new(levels[split_at + 1], levels[levels.len() - 1], histogram);
        Some((left, right))
    }
}

fn histogram(image: &GrayImage) -> [u64; 256] {
    let mut bins = [0u64; 256];
    for Luma([v]) in image.pixels() {
        bins[*v as usize] += 1;
    }
    bins
}

/// Reduce a grayscale image to at most `max_colors` levels.
pub fn median_cut(image: &GrayImage, max_colors: usize) -> GrayImage {
    let bins = histogram(image);

    let first = bins.iter().position(|&c| c > 0);
    let last = bins.iter().rposition(|&c| c > 0);
    let (Some(first), Some(last)) = (first, last) else {
        return image.clone();
    };

    let mut boxes = vec![LevelBox::new(first as u8, last as u8, &bins)];
    while boxes.len() < max_colors.max(1) {
        // Most populated box first; a box with fewer than two levels cannot split.
        let mut candidates: Vec<usize> = (0..boxes.len()).collect();
        candidates.sort_by(|&a, &b| boxes[b].count.cmp(&boxes[a].count));

        let Some((index, (left, right))) = candidates
            .into_iter()
            .find_map(|i| boxes[i].split(&bins).map(|halves| (i, halves)))
        else {
            break;
        };

        boxes[index] = left;
        boxes.insert(index + 1, right);
    }

    let mut lut = [0u8; 256];
    for level_box in &boxes {
        let mean = level_box.mean(&bins);
        for v in level_box.lo..=level_box.hi {
            lut[v as usize] = mean;
        }
    }

    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        Luma([lut[image.get_pixel(x, y).0[0] as usize]])
    })
}
