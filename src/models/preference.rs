//! Personalized time-preference requests.

use serde::{Deserialize, Serialize};

use super::TermGrid;

/// Half of a teaching day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// First half of the day (slots 0–3 on the default grid).
    #[serde(alias = "am")]
    Morning,
    /// Second half of the day (slots 4–7 on the default grid).
    #[serde(alias = "pm")]
    Afternoon,
}

impl Period {
    /// Period containing an in-day offset.
    pub fn of_offset(offset: usize, grid: &TermGrid) -> Self {
        if grid.is_morning(offset) {
            Period::Morning
        } else {
            Period::Afternoon
        }
    }
}

/// A request that a task be taught on a given day and period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePreference {
    /// Target task id.
    pub task_id: String,
    /// Preferred day, 1-based (1 = first teaching day).
    pub day: usize,
    /// Preferred half of the day.
    pub period: Period,
}

impl TimePreference {
    /// Creates a preference.
    pub fn new(task_id: impl Into<String>, day: usize, period: Period) -> Self {
        Self {
            task_id: task_id.into(),
            day,
            period,
        }
    }

    /// Whether a block starting at `weekly_slot` satisfies this request.
    pub fn matches_start(&self, weekly_slot: usize, grid: &TermGrid) -> bool {
        grid.day_of(weekly_slot) + 1 == self.day
            && Period::of_offset(grid.offset_of(weekly_slot), grid) == self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_start() {
        let g = TermGrid::default();
        let p = TimePreference::new("T1", 2, Period::Morning);

        assert!(p.matches_start(g.weekly_slot(1, 0), &g));
        assert!(p.matches_start(g.weekly_slot(1, 3), &g));
        assert!(!p.matches_start(g.weekly_slot(1, 4), &g));
        assert!(!p.matches_start(g.weekly_slot(0, 0), &g));

        let pm = TimePreference::new("T1", 5, Period::Afternoon);
        assert!(pm.matches_start(g.weekly_slot(4, 7), &g));
    }

    #[test]
    fn test_period_serde() {
        let p: TimePreference =
            serde_json::from_str(r#"{"task_id": "T1", "day": 3, "period": "afternoon"}"#)
                .unwrap();
        assert_eq!(p.period, Period::Afternoon);

        let alias: Period = serde_json::from_str(r#""am""#).unwrap();
        assert_eq!(alias, Period::Morning);
    }
}
