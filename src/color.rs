use std::collections::{BTreeMap, BTreeSet};

use palette::{Hsl, IntoColor, Srgb};

/// An 8-bit sRGB triple.
pub type Rgb = [u8; 3];

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            [
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            ]
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: sample row index → colour
// ---------------------------------------------------------------------------

/// Maps selected sample row indices to distinct colours. Hues are assigned in
/// ascending index order, so the same selection always gets the same colours.
#[derive(Debug, Clone)]
pub struct SampleColors {
    mapping: BTreeMap<usize, Rgb>,
    default_color: Rgb,
}

impl SampleColors {
    pub fn new(samples: &BTreeSet<usize>) -> Self {
        let palette = generate_palette(samples.len());
        let mapping = samples.iter().copied().zip(palette).collect();

        SampleColors {
            mapping,
            default_color: [128, 128, 128],
        }
    }

    pub fn color_for(&self, sample: usize) -> Rgb {
        self.mapping
            .get(&sample)
            .copied()
            .unwrap_or(self.default_color)
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_entries() {
        let p = generate_palette(6);
        assert_eq!(p.len(), 6);
        let distinct: BTreeSet<Rgb> = p.into_iter().collect();
        assert_eq!(distinct.len(), 6);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn colours_keyed_by_sample_index() {
        let samples: BTreeSet<usize> = [7, 2].into_iter().collect();
        let colors = SampleColors::new(&samples);
        assert_eq!(colors.len(), 2);
        assert_ne!(colors.color_for(2), colors.color_for(7));
        // lowest index takes the first hue
        assert_eq!(colors.color_for(2), generate_palette(2)[0]);
        assert_eq!(colors.color_for(99), [128, 128, 128]);
    }
}
