use chrono::NaiveDate;
use tracing::trace;

use super::dates::{add_days, days_between, duration_days, format_day};
use super::project::ProjectRange;

/// Horizontal placement of a bar, in pixels from the range start.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BarPosition {
    pub left: f32,
    pub width: f32,
}

/// Maps calendar days onto a fixed-width-per-day pixel grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateGrid {
    range: ProjectRange,
    /// Pixels per day.
    day_width: f32,
}

impl DateGrid {
    pub fn new(range: ProjectRange, day_width: f32) -> Self {
        Self {
            range,
            day_width: day_width.max(1.0),
        }
    }

    pub fn range(&self) -> ProjectRange {
        self.range
    }

    pub fn day_width(&self) -> f32 {
        self.day_width
    }

    /// Number of day columns, both ends inclusive.
    pub fn total_days(&self) -> i64 {
        duration_days(self.range.start(), self.range.due())
    }

    /// Total width in pixels of the whole range.
    pub fn total_width(&self) -> f32 {
        self.total_days() as f32 * self.day_width
    }

    /// Date of the `index`-th column.
    pub fn day_at(&self, index: i64) -> NaiveDate {
        add_days(self.range.start(), index)
    }

    /// Left edge of `date`'s column. Dates before the range clamp to 0.
    pub fn date_to_offset(&self, date: NaiveDate) -> f32 {
        days_between(self.range.start(), date).max(0) as f32 * self.day_width
    }

    /// Left offset and inclusive width of a `[start, end]` bar.
    ///
    /// Inverted dates give a zero-width bar at the origin rather than an error,
    /// so one bad task never blanks the whole chart.
    pub fn position_of(&self, start: NaiveDate, end: NaiveDate) -> BarPosition {
        if start > end {
            trace!(
                start = %format_day(start),
                end = %format_day(end),
                "inverted task dates, bar has no width"
            );
            return BarPosition::default();
        }
        BarPosition {
            left: self.date_to_offset(start),
            width: duration_days(start, end) as f32 * self.day_width,
        }
    }

    /// Whole days represented by a horizontal pointer displacement.
    ///
    /// Halves round up, so a drag of less than half a column is no change in
    /// either direction.
    pub fn offset_to_day_delta(&self, pixel_delta: f32) -> i64 {
        (pixel_delta / self.day_width + 0.5).floor() as i64
    }

    /// X of the today marker: the centre of today's column, if it is in range.
    pub fn today_marker_offset(&self, today: NaiveDate) -> Option<f32> {
        let index = days_between(self.range.start(), today);
        if index < 0 || index >= self.total_days() {
            return None;
        }
        Some((index as f32 + 0.5) * self.day_width)
    }

    /// Zoom in (increase pixels per day).
    pub fn zoom_in(&mut self, max_day_width: f32) {
        self.day_width = (self.day_width * 1.2).min(max_day_width);
    }

    /// Zoom out (decrease pixels per day).
    pub fn zoom_out(&mut self, min_day_width: f32) {
        self.day_width = (self.day_width / 1.2).max(min_day_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::dates::parse_day;

    fn grid() -> DateGrid {
        DateGrid::new(ProjectRange::parse("2024-01-01", "2024-01-31").unwrap(), 35.0)
    }

    fn d(s: &str) -> NaiveDate {
        parse_day(s).unwrap()
    }

    #[test]
    fn dates_before_the_range_clamp_to_zero() {
        let g = grid();
        assert_eq!(g.date_to_offset(d("2023-12-25")), 0.0);
        assert_eq!(g.date_to_offset(d("2024-01-01")), 0.0);
        assert_eq!(g.date_to_offset(d("2024-01-05")), 140.0);
    }

    #[test]
    fn position_width_is_inclusive() {
        let g = grid();
        let pos = g.position_of(d("2024-01-05"), d("2024-01-10"));
        assert_eq!(pos, BarPosition { left: 140.0, width: 210.0 });

        let single = g.position_of(d("2024-01-07"), d("2024-01-07"));
        assert_eq!(single.width, 35.0);
    }

    #[test]
    fn inverted_dates_have_zero_width() {
        let pos = grid().position_of(d("2024-02-01"), d("2024-01-30"));
        assert_eq!(pos, BarPosition::default());
    }

    #[test]
    fn day_delta_rounds_to_nearest_day() {
        let g = grid();
        assert_eq!(g.offset_to_day_delta(0.0), 0);
        assert_eq!(g.offset_to_day_delta(17.0), 0);
        assert_eq!(g.offset_to_day_delta(-17.0), 0);
        assert_eq!(g.offset_to_day_delta(17.5), 1);
        assert_eq!(g.offset_to_day_delta(-17.5), 0);
        assert_eq!(g.offset_to_day_delta(-18.0), -1);
        assert_eq!(g.offset_to_day_delta(105.0), 3);
        assert_eq!(g.offset_to_day_delta(-350.0), -10);
    }

    #[test]
    fn today_marker_only_inside_range() {
        let g = grid();
        assert_eq!(g.today_marker_offset(d("2024-01-01")), Some(17.5));
        assert_eq!(g.today_marker_offset(d("2024-01-31")), Some(30.5 * 35.0));
        assert_eq!(g.today_marker_offset(d("2023-12-31")), None);
        assert_eq!(g.today_marker_offset(d("2024-02-01")), None);
    }

    #[test]
    fn zoom_respects_bounds() {
        let mut g = grid();
        for _ in 0..20 {
            g.zoom_in(80.0);
        }
        assert_eq!(g.day_width(), 80.0);
        for _ in 0..40 {
            g.zoom_out(10.0);
        }
        assert_eq!(g.day_width(), 10.0);
    }

    #[test]
    fn totals_cover_the_whole_range() {
        let g = grid();
        assert_eq!(g.total_days(), 31);
        assert_eq!(g.total_width(), 31.0 * 35.0);
        assert_eq!(g.day_at(4), d("2024-01-05"));
    }
}
