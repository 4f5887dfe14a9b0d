// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Geometry shared by drawing and pointer resolution.

use ratatui::layout::Rect;
use std::f64::consts::TAU;

pub const BAR_GAP: u16 = 1;
pub const MIN_BAR_WIDTH: u16 = 3;
pub const MAX_BAR_WIDTH: u16 = 14;
pub const PIE_RADIUS: f64 = 0.95;

/// Placement of the visible bars inside the plot area of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BarLayout {
    pub plot: Rect,
    pub bar_width: u16,
    pub bar_gap: u16,
    pub first: usize,
    pub visible: usize,
}

impl BarLayout {
    /// Widest bars that fit `count` bars, scrolled so `cursor` is on screen.
    pub fn new(plot: Rect, count: usize, cursor: usize) -> Self {
        if count == 0 || plot.width == 0 || plot.height == 0 {
            return Self {
                plot,
                bar_width: MIN_BAR_WIDTH,
                bar_gap: BAR_GAP,
                first: 0,
                visible: 0,
            };
        }

        let gap = u32::from(BAR_GAP);
        let slot = (u32::from(plot.width) + gap) / count as u32;
        let bar_width = slot
            .saturating_sub(gap)
            .clamp(u32::from(MIN_BAR_WIDTH), u32::from(MAX_BAR_WIDTH));
        let capacity = ((u32::from(plot.width) + gap) / (bar_width + gap)) as usize;
        let visible = capacity.min(count);

        let cursor = cursor.min(count - 1);
        let first = if visible == 0 || cursor < visible {
            0
        } else {
            cursor + 1 - visible
        };

        Self {
            plot,
            bar_width: bar_width as u16,
            bar_gap: BAR_GAP,
            first,
            visible,
        }
    }

    pub fn visible_range(&self) -> std::ops::Range<usize> {
        self.first..self.first + self.visible
    }

    /// Index into the drawn snapshot of the bar under the pointer. Gaps and
    /// anything outside the plot resolve to nothing.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<usize> {
        if self.visible == 0
            || column < self.plot.left()
            || column >= self.plot.right()
            || row < self.plot.top()
            || row >= self.plot.bottom()
        {
            return None;
        }

        let stride = usize::from(self.bar_width) + usize::from(self.bar_gap);
        let offset = usize::from(column - self.plot.left());
        let slot = offset / stride;
        if offset % stride >= usize::from(self.bar_width) || slot >= self.visible {
            return None;
        }
        Some(self.first + slot)
    }
}

/// Canvas bounds that keep the pie round on cells twice as tall as wide.
pub fn pie_bounds(cols: u16, rows: u16) -> ([f64; 2], [f64; 2]) {
    if cols == 0 || rows == 0 {
        return ([-1.0, 1.0], [-1.0, 1.0]);
    }
    let half_width = f64::from(cols) / (2.0 * f64::from(rows));
    ([-half_width, half_width], [-1.0, 1.0])
}

/// Braille dot centres inside the pie, grouped by slice. Slices start at
/// twelve o'clock and run clockwise in `values` order.
pub fn pie_points(values: &[u32], cols: u16, rows: u16) -> Vec<Vec<(f64, f64)>> {
    let mut slices = vec![Vec::new(); values.len()];
    let total: u64 = values.iter().map(|value| u64::from(*value)).sum();
    if total == 0 || cols == 0 || rows == 0 {
        return slices;
    }

    let mut bounds = Vec::with_capacity(values.len());
    let mut running = 0_u64;
    for value in values {
        running += u64::from(*value);
        bounds.push(running as f64 / total as f64);
    }

    let (x_bounds, y_bounds) = pie_bounds(cols, rows);
    let dots_x = usize::from(cols) * 2;
    let dots_y = usize::from(rows) * 4;
    let step_x = (x_bounds[1] - x_bounds[0]) / dots_x as f64;
    let step_y = (y_bounds[1] - y_bounds[0]) / dots_y as f64;

    for i in 0..dots_x {
        let x = x_bounds[0] + (i as f64 + 0.5) * step_x;
        for j in 0..dots_y {
            let y = y_bounds[0] + (j as f64 + 0.5) * step_y;
            if x.hypot(y) > PIE_RADIUS {
                continue;
            }
            let fraction = x.atan2(y).rem_euclid(TAU) / TAU;
            let slice = bounds
                .iter()
                .position(|bound| fraction < *bound)
                .unwrap_or(values.len() - 1);
            slices[slice].push((x, y));
        }
    }
    slices
}

pub fn format_compact_count(value: u64) -> String {
    if value < 1000 {
        return value.to_string();
    }

    // Round to one decimal first so 999_950 becomes 1M rather than 1000k.
    let thousands = (value as f64 / 100.0).round() / 10.0;
    let (scaled, suffix) = if thousands < 1000.0 {
        (thousands, "k")
    } else {
        ((value as f64 / 100_000.0).round() / 10.0, "M")
    };

    if scaled.fract().abs() < f64::EPSILON {
        format!("{scaled:.0}{suffix}")
    } else {
        format!("{scaled:.1}{suffix}")
    }
}

/// Digits grouped by thousands with commas.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{
        BarLayout, MAX_BAR_WIDTH, PIE_RADIUS, format_compact_count, format_count, pie_bounds,
        pie_points,
    };
    use ratatui::layout::Rect;

    #[test]
    fn bar_layout_caps_width_when_few_bars() {
        let layout = BarLayout::new(Rect::new(10, 5, 100, 20), 3, 0);
        assert_eq!(layout.bar_width, MAX_BAR_WIDTH);
        assert_eq!(layout.visible, 3);
        assert_eq!(layout.first, 0);
    }

    #[test]
    fn bar_layout_shrinks_bars_to_fit() {
        let layout = BarLayout::new(Rect::new(0, 0, 60, 10), 10, 0);
        assert_eq!(layout.bar_width, 5);
        assert_eq!(layout.visible, 10);
    }

    #[test]
    fn bar_layout_scrolls_to_keep_cursor_visible() {
        let layout = BarLayout::new(Rect::new(0, 0, 20, 10), 30, 25);
        assert_eq!(layout.bar_width, 3);
        assert_eq!(layout.visible, 5);
        assert_eq!(layout.first, 21);
        assert_eq!(layout.visible_range(), 21..26);
    }

    #[test]
    fn bar_layout_without_bars_hits_nothing() {
        let layout = BarLayout::new(Rect::new(0, 0, 40, 10), 0, 0);
        assert_eq!(layout.visible, 0);
        assert_eq!(layout.hit_test(1, 1), None);
    }

    #[test]
    fn hit_test_maps_columns_to_bar_indices() {
        let layout = BarLayout::new(Rect::new(10, 5, 60, 10), 10, 0);
        // bar_width 5, gap 1: bar 0 spans 10..15, bar 1 spans 16..21.
        assert_eq!(layout.hit_test(10, 5), Some(0));
        assert_eq!(layout.hit_test(14, 14), Some(0));
        assert_eq!(layout.hit_test(15, 8), None);
        assert_eq!(layout.hit_test(16, 8), Some(1));
        assert_eq!(layout.hit_test(64, 8), Some(9));
    }

    #[test]
    fn hit_test_ignores_points_outside_the_plot() {
        let layout = BarLayout::new(Rect::new(10, 5, 60, 10), 10, 0);
        assert_eq!(layout.hit_test(9, 8), None);
        assert_eq!(layout.hit_test(12, 4), None);
        assert_eq!(layout.hit_test(12, 15), None);
        assert_eq!(layout.hit_test(70, 8), None);
    }

    #[test]
    fn hit_test_ignores_space_after_the_last_bar() {
        let layout = BarLayout::new(Rect::new(0, 0, 100, 10), 2, 0);
        // two 14-wide bars end at column 28.
        assert_eq!(layout.hit_test(20, 3), Some(1));
        assert_eq!(layout.hit_test(40, 3), None);
    }

    #[test]
    fn hit_test_offsets_by_first_visible_bar() {
        let layout = BarLayout::new(Rect::new(0, 0, 20, 10), 30, 25);
        assert_eq!(layout.hit_test(0, 0), Some(21));
        assert_eq!(layout.hit_test(16, 0), Some(25));
    }

    #[test]
    fn pie_bounds_correct_for_cell_aspect() {
        assert_eq!(pie_bounds(40, 10), ([-2.0, 2.0], [-1.0, 1.0]));
        assert_eq!(pie_bounds(0, 10), ([-1.0, 1.0], [-1.0, 1.0]));
    }

    #[test]
    fn pie_points_stay_inside_the_radius() {
        let slices = pie_points(&[1, 2, 3], 30, 12);
        assert_eq!(slices.len(), 3);
        for slice in &slices {
            assert!(!slice.is_empty());
            for (x, y) in slice {
                assert!(x.hypot(*y) <= PIE_RADIUS);
            }
        }
    }

    #[test]
    fn pie_points_are_roughly_proportional() {
        let slices = pie_points(&[50, 25, 25], 60, 30);
        let total = slices.iter().map(Vec::len).sum::<usize>() as f64;
        let first_share = slices[0].len() as f64 / total;
        assert!((first_share - 0.5).abs() < 0.05, "share {first_share}");
    }

    #[test]
    fn pie_points_skip_zero_slices_and_empty_totals() {
        let slices = pie_points(&[0, 10, 0], 20, 10);
        assert!(slices[0].is_empty());
        assert!(!slices[1].is_empty());
        assert!(slices[2].is_empty());

        let empty = pie_points(&[0, 0, 0], 20, 10);
        assert!(empty.iter().all(Vec::is_empty));
    }

    #[test]
    fn compact_count_formatter_shapes() {
        assert_eq!(format_compact_count(0), "0");
        assert_eq!(format_compact_count(999), "999");
        assert_eq!(format_compact_count(1_000), "1k");
        assert_eq!(format_compact_count(41_230), "41.2k");
        assert_eq!(format_compact_count(85_190), "85.2k");
        assert_eq!(format_compact_count(1_250_000), "1.3M");
        assert_eq!(format_compact_count(999_949), "999.9k");
        assert_eq!(format_compact_count(999_950), "1M");
        assert_eq!(format_compact_count(999_999), "1M");
        assert_eq!(format_compact_count(1_000_000), "1M");
    }

    #[test]
    fn count_formatter_groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(14_000), "14,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }
}
