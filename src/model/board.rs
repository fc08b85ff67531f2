use chrono::NaiveDate;

/// The visible window of the board: a run of consecutive dates starting at
/// `start`, one column per date.
#[derive(Debug, Clone)]
pub struct BoardViewport {
    /// Leftmost visible date.
    pub start: NaiveDate,
    /// Number of visible date columns.
    pub days: usize,
    /// Pixels per date column (controls zoom).
    pub column_width: f32,
}

impl BoardViewport {
    pub fn new(start: NaiveDate, days: usize) -> Self {
        Self {
            start,
            days,
            column_width: 100.0,
        }
    }

    /// The visible dates, in column order.
    pub fn visible_dates(&self) -> Vec<NaiveDate> {
        (0..self.days as i64)
            .map(|i| self.start + chrono::Duration::days(i))
            .collect()
    }

    pub fn end(&self) -> NaiveDate {
        self.start + chrono::Duration::days(self.days as i64 - 1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end()
    }

    /// Convert a date to an x-pixel offset from the grid origin.
    pub fn date_to_x(&self, date: NaiveDate) -> f32 {
        let days = (date - self.start).num_days() as f32;
        days * self.column_width
    }

    /// Date whose column covers the given x-pixel offset, if visible.
    pub fn date_at_x(&self, x: f32) -> Option<NaiveDate> {
        if x < 0.0 {
            return None;
        }
        let col = (x / self.column_width).floor() as i64;
        if col >= self.days as i64 {
            return None;
        }
        Some(self.start + chrono::Duration::days(col))
    }

    pub fn total_width(&self) -> f32 {
        self.days as f32 * self.column_width
    }

    pub fn scroll_days(&mut self, days: i64) {
        self.start += chrono::Duration::days(days);
    }

    pub fn jump_to(&mut self, date: NaiveDate) {
        self.start = date;
    }

    pub fn zoom_in(&mut self) {
        self.column_width = (self.column_width * 1.2).min(220.0);
    }

    pub fn zoom_out(&mut self) {
        self.column_width = (self.column_width / 1.2).max(48.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn visible_dates_are_consecutive() {
        let vp = BoardViewport::new(d(2024, 3, 4), 7);
        let dates = vp.visible_dates();
        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0], d(2024, 3, 4));
        assert_eq!(dates[6], d(2024, 3, 10));
        assert_eq!(vp.end(), d(2024, 3, 10));
    }

    #[test]
    fn pixel_mapping_round_trips() {
        let vp = BoardViewport::new(d(2024, 3, 4), 7);
        assert_eq!(vp.date_to_x(d(2024, 3, 6)), 200.0);
        assert_eq!(vp.date_at_x(250.0), Some(d(2024, 3, 6)));
        assert_eq!(vp.date_at_x(-10.0), None);
        assert_eq!(vp.date_at_x(vp.total_width() + 1.0), None);
    }
}
