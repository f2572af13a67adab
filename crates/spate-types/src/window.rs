//! Request window planning.
//!
//! A requested date range usually holds more samples than the API will
//! return in a single response. [`WindowPlan`] splits the range into
//! consecutive windows sized so that each stays under a per-request row
//! cap. Adjacent windows share their boundary timestamp; the duplicated
//! boundary row is dropped again during assembly.

use chrono::{DateTime, TimeDelta, Utc};

use crate::{Cadence, DateRange, add_months_clamped, add_years_clamped, format_wire_timestamp};

/// Default number of rows a single request window may span.
///
/// The service does not document an exact response ceiling; this default
/// sits under the largest responses observed in practice and can be
/// overridden per plan with [`WindowPlan::with_row_cap`].
pub const DEFAULT_ROW_CAP: u32 = 250_000;

/// One request-sized sub-interval of a date range.
///
/// Both endpoints are inclusive. Consecutive windows of a plan share
/// their boundary: one window's `to` is the next window's `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Window start (inclusive).
    pub from: DateTime<Utc>,
    /// Window end (inclusive).
    pub to: DateTime<Utc>,
}

impl Window {
    /// Creates a new window.
    #[must_use]
    pub const fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to {}",
            format_wire_timestamp(self.from),
            format_wire_timestamp(self.to)
        )
    }
}

/// A partition of a date range into request windows for one cadence.
///
/// Fixed-interval cadences span `interval * row_cap` per window. The
/// month and year cadences use calendar arithmetic instead, so a window
/// boundary stays on the same day-of-month where the calendar allows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPlan {
    range: DateRange,
    cadence: Cadence,
    row_cap: u32,
}

impl WindowPlan {
    /// Creates a plan over the given range with the default row cap.
    #[must_use]
    pub const fn new(range: DateRange, cadence: Cadence) -> Self {
        Self {
            range,
            cadence,
            row_cap: DEFAULT_ROW_CAP,
        }
    }

    /// Overrides the per-window row cap.
    #[must_use]
    pub const fn with_row_cap(mut self, row_cap: u32) -> Self {
        self.row_cap = row_cap;
        self
    }

    /// The range being partitioned.
    #[must_use]
    pub const fn range(&self) -> DateRange {
        self.range
    }

    /// The cadence windows are sized for.
    #[must_use]
    pub const fn cadence(&self) -> Cadence {
        self.cadence
    }

    /// The per-window row cap.
    #[must_use]
    pub const fn row_cap(&self) -> u32 {
        self.row_cap
    }

    /// Returns an iterator over the windows of the plan.
    ///
    /// The same plan always yields the same windows; every call starts a
    /// fresh iteration.
    #[must_use]
    pub fn windows(&self) -> WindowIter {
        WindowIter {
            cursor: Some(self.range.start),
            end: self.range.end,
            cadence: self.cadence,
            row_cap: self.row_cap,
        }
    }

    /// Returns the number of windows the plan yields.
    #[must_use]
    pub fn window_count(&self) -> usize {
        self.windows().count()
    }
}

/// Iterator over the windows of a [`WindowPlan`].
///
/// Every plan yields at least one window; a degenerate range produces a
/// single window covering that instant.
#[derive(Debug, Clone)]
pub struct WindowIter {
    cursor: Option<DateTime<Utc>>,
    end: DateTime<Utc>,
    cadence: Cadence,
    row_cap: u32,
}

impl WindowIter {
    /// Where the window starting at `from` would end, ignoring the range
    /// end. `None` means the span is not representable.
    fn span_end(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.cadence.seconds() {
            Some(interval) => {
                let span = TimeDelta::seconds(interval as i64 * i64::from(self.row_cap));
                from.checked_add_signed(span)
            }
            None => Some(match self.cadence {
                Cadence::Monthly => add_months_clamped(from, self.row_cap),
                _ => add_years_clamped(from, self.row_cap),
            }),
        }
    }
}

impl Iterator for WindowIter {
    type Item = Window;

    fn next(&mut self) -> Option<Self::Item> {
        let from = self.cursor?;

        if let Some(span_end) = self.span_end(from) {
            if span_end < self.end && span_end > from {
                self.cursor = Some(span_end);
                return Some(Window::new(from, span_end));
            }
        }

        // Final window: the remaining span fits in one request, or the
        // calendar clamp left no room to advance the cursor.
        self.cursor = None;
        Some(Window::new(from, self.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
    }

    fn range(start: DateTime<Utc>, end: DateTime<Utc>) -> DateRange {
        DateRange::new(start, end).unwrap()
    }

    #[test]
    fn test_hourly_range_splits_into_capped_windows() {
        // Five hours of data with room for two rows per request.
        let plan = WindowPlan::new(
            range(at(2020, 1, 1, 0), at(2020, 1, 1, 5)),
            Cadence::Hourly,
        )
        .with_row_cap(2);

        let windows: Vec<Window> = plan.windows().collect();
        assert_eq!(
            windows,
            vec![
                Window::new(at(2020, 1, 1, 0), at(2020, 1, 1, 2)),
                Window::new(at(2020, 1, 1, 2), at(2020, 1, 1, 4)),
                Window::new(at(2020, 1, 1, 4), at(2020, 1, 1, 5)),
            ]
        );
    }

    #[test]
    fn test_windows_share_boundaries_and_cover_range() {
        let plan = WindowPlan::new(
            range(at(2020, 1, 1, 0), at(2020, 3, 15, 7)),
            Cadence::Minute15,
        )
        .with_row_cap(1000);

        let windows: Vec<Window> = plan.windows().collect();
        assert_eq!(windows.first().unwrap().from, at(2020, 1, 1, 0));
        assert_eq!(windows.last().unwrap().to, at(2020, 3, 15, 7));
        for pair in windows.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
    }

    #[test]
    fn test_non_final_spans_equal_interval_times_cap() {
        let plan = WindowPlan::new(
            range(at(2020, 1, 1, 0), at(2021, 1, 1, 0)),
            Cadence::Daily,
        )
        .with_row_cap(100);

        let windows: Vec<Window> = plan.windows().collect();
        assert!(windows.len() > 1);
        let span = TimeDelta::seconds(86_400 * 100);
        for window in &windows[..windows.len() - 1] {
            assert_eq!(window.to - window.from, span);
        }
        let last = windows.last().unwrap();
        assert!(last.to - last.from <= span);
    }

    #[test]
    fn test_single_window_when_span_exceeds_range() {
        let plan = WindowPlan::new(
            range(at(2020, 1, 1, 0), at(2020, 1, 2, 0)),
            Cadence::Hourly,
        );

        let windows: Vec<Window> = plan.windows().collect();
        assert_eq!(
            windows,
            vec![Window::new(at(2020, 1, 1, 0), at(2020, 1, 2, 0))]
        );
    }

    #[test]
    fn test_degenerate_range_yields_one_window() {
        let instant = at(2020, 1, 1, 0);
        let plan = WindowPlan::new(range(instant, instant), Cadence::Daily);

        let windows: Vec<Window> = plan.windows().collect();
        assert_eq!(windows, vec![Window::new(instant, instant)]);
    }

    #[test]
    fn test_plan_is_idempotent() {
        let plan = WindowPlan::new(
            range(at(2020, 1, 1, 0), at(2020, 6, 1, 0)),
            Cadence::Minute15,
        )
        .with_row_cap(500);

        let first: Vec<Window> = plan.windows().collect();
        let second: Vec<Window> = plan.windows().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_monthly_windows_use_calendar_arithmetic() {
        let plan = WindowPlan::new(
            range(at(2021, 1, 31, 0), at(2021, 4, 30, 0)),
            Cadence::Monthly,
        )
        .with_row_cap(1);

        let windows: Vec<Window> = plan.windows().collect();
        assert_eq!(
            windows,
            vec![
                Window::new(at(2021, 1, 31, 0), at(2021, 2, 28, 0)),
                Window::new(at(2021, 2, 28, 0), at(2021, 3, 28, 0)),
                Window::new(at(2021, 3, 28, 0), at(2021, 4, 28, 0)),
                Window::new(at(2021, 4, 28, 0), at(2021, 4, 30, 0)),
            ]
        );
    }

    #[test]
    fn test_yearly_plan_is_one_window_for_any_realistic_range() {
        // 250,000 years always clamps to year 9999, which is past any
        // real period of record.
        let plan = WindowPlan::new(
            range(at(1950, 1, 1, 0), at(2020, 1, 1, 0)),
            Cadence::Yearly,
        );

        assert_eq!(plan.window_count(), 1);
    }

    #[test]
    fn test_yearly_clamp_near_max_year() {
        let plan = WindowPlan::new(
            range(at(9000, 1, 1, 0), at(9999, 12, 31, 0)),
            Cadence::Yearly,
        );

        let windows: Vec<Window> = plan.windows().collect();
        assert_eq!(
            windows,
            vec![
                Window::new(at(9000, 1, 1, 0), at(9999, 1, 1, 0)),
                Window::new(at(9999, 1, 1, 0), at(9999, 12, 31, 0)),
            ]
        );
    }

    #[test]
    fn test_window_display_uses_wire_format() {
        let window = Window::new(at(2020, 1, 1, 0), at(2020, 1, 2, 0));
        assert_eq!(
            window.to_string(),
            "2020-01-01T00:00:00.000Z to 2020-01-02T00:00:00.000Z"
        );
    }
}
