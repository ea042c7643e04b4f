// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Button row model: styling and calendar labels derived from the state.

use chrono::{Datelike, Days, NaiveDate};

use crate::layers::{Day, LayerTable, Metric};
use crate::state::{UnavailablePolicy, ViewState};

/// Styling for one metric toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricButton {
    pub metric: Metric,
    pub active: bool,
}

/// Styling for one day selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayButton {
    pub day: Day,
    pub active: bool,
    pub disabled: bool,
}

/// Styling for the whole button row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonStates {
    pub metrics: [MetricButton; 2],
    pub days: Vec<DayButton>,
}

impl ButtonStates {
    /// Pure function of the inputs: same state in, same styling out.
    #[must_use]
    pub fn from_state(state: ViewState, table: &LayerTable, policy: UnavailablePolicy) -> Self {
        let metrics = Metric::ALL.map(|metric| MetricButton {
            metric,
            active: metric == state.metric,
        });

        let days = Day::all()
            .map(|day| {
                let rejected = policy == UnavailablePolicy::Reject && !table.has_data(state.metric, day);
                DayButton {
                    day,
                    active: day == state.day,
                    disabled: !day.is_selectable() || rejected,
                }
            })
            .collect();

        Self { metrics, days }
    }

    /// Ids of every button carrying the active class.
    #[must_use]
    pub fn active_ids(&self) -> Vec<String> {
        self.metrics
            .iter()
            .filter(|b| b.active)
            .map(|b| b.metric.button_id().to_string())
            .chain(self.days.iter().filter(|b| b.active).map(|b| format!("day-{}", b.day)))
            .collect()
    }
}

/// Calendar text shown on a day button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayLabel {
    /// e.g. "Oct 19".
    pub date: String,
    /// "Today", "Tomorrow" or the weekday abbreviation.
    pub sub: String,
}

/// Label for `day` counted from `today`.
#[must_use]
pub fn day_label(today: NaiveDate, day: Day) -> DayLabel {
    let date = today
        .checked_add_days(Days::new(u64::from(day.offset())))
        .unwrap_or(today);

    let sub = match day.offset() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a").to_string(),
    };

    DayLabel {
        date: format!("{} {}", date.format("%b"), date.day()),
        sub,
    }
}

/// Labels for all seven day buttons.
#[must_use]
pub fn day_labels(today: NaiveDate) -> Vec<(Day, DayLabel)> {
    Day::all().map(|day| (day, day_label(today, day))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(metric: Metric, day: u8) -> ViewState {
        ViewState::new(metric, Day::new(day).unwrap())
    }

    #[test]
    fn test_active_classes_follow_state() {
        let buttons = ButtonStates::from_state(
            state(Metric::High, 2),
            &LayerTable::ndfd_default(),
            UnavailablePolicy::ShowNotice,
        );
        assert_eq!(buttons.active_ids(), vec!["btn-high", "day-2"]);
    }

    #[test]
    fn test_styling_is_idempotent() {
        let table = LayerTable::ndfd_default();
        let s = state(Metric::Low, 1);
        assert_eq!(
            ButtonStates::from_state(s, &table, UnavailablePolicy::Reject),
            ButtonStates::from_state(s, &table, UnavailablePolicy::Reject)
        );
    }

    #[test]
    fn test_days_beyond_three_disabled() {
        let buttons = ButtonStates::from_state(
            state(Metric::High, 1),
            &LayerTable::ndfd_default(),
            UnavailablePolicy::ShowNotice,
        );
        let disabled: Vec<_> = buttons.days.iter().filter(|b| b.disabled).map(|b| b.day.number()).collect();
        assert_eq!(disabled, vec![4, 5, 6, 7]);
    }

    #[test]
    fn test_reject_policy_disables_missing_low_day() {
        let table = LayerTable::ndfd_default();
        let buttons = ButtonStates::from_state(state(Metric::Low, 1), &table, UnavailablePolicy::Reject);
        assert!(buttons.days[2].disabled);

        let buttons = ButtonStates::from_state(state(Metric::Low, 1), &table, UnavailablePolicy::ShowNotice);
        assert!(!buttons.days[2].disabled);
    }

    #[test]
    fn test_day_labels() {
        // Sunday
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let labels = day_labels(today);

        assert_eq!(labels[0].1, DayLabel { date: "Oct 18".into(), sub: "Today".into() });
        assert_eq!(labels[1].1.sub, "Tomorrow");
        assert_eq!(labels[2].1, DayLabel { date: "Oct 20".into(), sub: "Tue".into() });
        assert_eq!(labels[6].1.date, "Oct 24");
    }

    #[test]
    fn test_day_labels_cross_month() {
        let today = NaiveDate::from_ymd_opt(2026, 12, 30).unwrap();
        let label = day_label(today, Day::new(4).unwrap());
        assert_eq!(label.date, "Jan 2");
        assert_eq!(label.sub, "Sat");
    }
}
