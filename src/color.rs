use eframe::egui::Color32;

// ---------------------------------------------------------------------------
// Turbo colormap
// ---------------------------------------------------------------------------

/// Evaluate the turbo colormap at `t` in [0, 1] (polynomial approximation).
/// Values outside the range are clamped.
pub fn turbo(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0);

    let r = 34.61 + t * (1172.33 + t * (-10793.56 + t * (33300.12 + t * (-38394.49 + t * 14825.05))));
    let g = 23.31 + t * (557.33 + t * (1225.33 + t * (-3574.96 + t * (1073.77 + t * 707.56))));
    let b = 27.2 + t * (3211.1 + t * (-15327.97 + t * (27814.0 + t * (-22569.18 + t * 6838.66))));

    Color32::from_rgb(
        r.clamp(0.0, 255.0) as u8,
        g.clamp(0.0, 255.0) as u8,
        b.clamp(0.0, 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color scale: cluster label → Color32
// ---------------------------------------------------------------------------

/// Maps a dataset's cluster-label range onto the turbo colormap. The scale is
/// reversed (low labels warm, high labels cool), matching the upstream plots
/// these artifacts were first rendered with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    min: f64,
    max: f64,
}

impl ColorScale {
    /// Build a scale over an observed (min, max) label range.
    pub fn new(label_range: (i64, i64)) -> Self {
        ColorScale {
            min: label_range.0 as f64,
            max: label_range.1 as f64,
        }
    }

    /// Observed label range, for colorbar tick labels.
    pub fn range(&self) -> (i64, i64) {
        (self.min as i64, self.max as i64)
    }

    /// Color for a cluster label. A degenerate single-label range maps
    /// everything to the midpoint of the colormap.
    pub fn color_for(&self, label: i64) -> Color32 {
        let t = if self.max > self.min {
            (label as f64 - self.min) / (self.max - self.min)
        } else {
            0.5
        };
        turbo(1.0 - t)
    }

    /// Gradient stops for drawing the colorbar, from the top of the bar
    /// (highest label) down to the bottom (lowest).
    pub fn colorbar_stops(&self, n: usize) -> Vec<Color32> {
        if n == 0 {
            return Vec::new();
        }
        if n == 1 {
            return vec![turbo(0.5)];
        }
        (0..n)
            .map(|i| {
                let t = i as f64 / (n - 1) as f64;
                // top of the bar is the maximum label, which sits at 1 - t = 0
                turbo(t)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turbo_endpoints_are_distinct() {
        assert_ne!(turbo(0.0), turbo(1.0));
        assert_ne!(turbo(0.0), turbo(0.5));
    }

    #[test]
    fn turbo_clamps_out_of_range_input() {
        assert_eq!(turbo(-3.0), turbo(0.0));
        assert_eq!(turbo(42.0), turbo(1.0));
    }

    #[test]
    fn scale_maps_range_endpoints_to_colormap_ends() {
        let scale = ColorScale::new((0, 9));
        assert_eq!(scale.color_for(0), turbo(1.0));
        assert_eq!(scale.color_for(9), turbo(0.0));
    }

    #[test]
    fn degenerate_range_uses_midpoint() {
        let scale = ColorScale::new((3, 3));
        assert_eq!(scale.color_for(3), turbo(0.5));
        assert_eq!(scale.color_for(100), turbo(0.5));
    }

    #[test]
    fn colorbar_stop_counts() {
        let scale = ColorScale::new((0, 5));
        assert!(scale.colorbar_stops(0).is_empty());
        assert_eq!(scale.colorbar_stops(1).len(), 1);
        assert_eq!(scale.colorbar_stops(16).len(), 16);
    }
}
