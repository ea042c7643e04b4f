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

//! View state and the click policy that guards every mutation.

use serde::{Deserialize, Serialize};

use crate::layers::{Day, LayerTable, Metric};

/// What the user currently looks at. Resets to `{High, day 1}` on launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub metric: Metric,
    pub day: Day,
}

/// How a click on a (metric, day) pair without a layer is treated.
///
/// One policy is chosen at startup and applies to every click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnavailablePolicy {
    /// Accept the selection and show the "Map Unavailable" notice.
    #[default]
    ShowNotice,
    /// Ignore the click; the state never points at a missing layer.
    Reject,
}

/// A click coming from the button row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    SelectMetric(Metric),
    /// Raw day number as carried by the button.
    SelectDay(u8),
}

/// Why a click did not change the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Day outside the selectable range.
    InertDay,
    /// Combination has no layer and the policy rejects it.
    Unavailable,
}

/// Result of applying an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed(ViewState),
    Ignored(IgnoreReason),
}

impl ViewState {
    #[must_use]
    pub fn new(metric: Metric, day: Day) -> Self {
        Self { metric, day }
    }

    /// Compute the state that follows `action`, without mutating `self`.
    ///
    /// Switching metric onto a day that has no data for the new metric falls
    /// back to day 1 when day 1 has data, so `{High, 3}` + Low gives `{Low, 1}`.
    #[must_use]
    pub fn transition(self, action: UiAction, table: &LayerTable, policy: UnavailablePolicy) -> Transition {
        let next = match action {
            UiAction::SelectDay(number) => {
                let Some(day) = Day::new(number).filter(|d| d.is_selectable()) else {
                    return Transition::Ignored(IgnoreReason::InertDay);
                };
                ViewState { day, ..self }
            }
            UiAction::SelectMetric(metric) => {
                let mut next = ViewState { metric, ..self };
                if !table.has_data(metric, next.day) && table.has_data(metric, Day::FIRST) {
                    next.day = Day::FIRST;
                }
                next
            }
        };

        if policy == UnavailablePolicy::Reject && !table.has_data(next.metric, next.day) {
            return Transition::Ignored(IgnoreReason::Unavailable);
        }
        Transition::Changed(next)
    }

    /// Apply `action` in place. Returns true when the state changed.
    pub fn apply(&mut self, action: UiAction, table: &LayerTable, policy: UnavailablePolicy) -> bool {
        match self.transition(action, table, policy) {
            Transition::Changed(next) => {
                let changed = next != *self;
                *self = next;
                changed
            }
            Transition::Ignored(reason) => {
                log::debug!("Ignoring {:?}: {:?}", action, reason);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(metric: Metric, day: u8) -> ViewState {
        ViewState::new(metric, Day::new(day).unwrap())
    }

    #[test]
    fn test_default_state() {
        assert_eq!(ViewState::default(), state(Metric::High, 1));
    }

    #[test]
    fn test_switch_to_low_on_day_three_resets_day() {
        let table = LayerTable::ndfd_default();
        for policy in [UnavailablePolicy::ShowNotice, UnavailablePolicy::Reject] {
            let mut s = state(Metric::High, 3);
            assert!(s.apply(UiAction::SelectMetric(Metric::Low), &table, policy));
            assert_eq!(s, state(Metric::Low, 1));
        }
    }

    #[test]
    fn test_switch_metric_keeps_day_with_data() {
        let table = LayerTable::ndfd_default();
        let mut s = state(Metric::High, 2);
        s.apply(UiAction::SelectMetric(Metric::Low), &table, UnavailablePolicy::ShowNotice);
        assert_eq!(s, state(Metric::Low, 2));
    }

    #[test]
    fn test_days_beyond_three_are_inert() {
        let table = LayerTable::ndfd_default();
        let s = state(Metric::High, 2);
        for number in [0, 4, 5, 7, 8] {
            assert_eq!(
                s.transition(UiAction::SelectDay(number), &table, UnavailablePolicy::ShowNotice),
                Transition::Ignored(IgnoreReason::InertDay)
            );
        }
    }

    #[test]
    fn test_unavailable_pair_under_show_notice() {
        let table = LayerTable::ndfd_default();
        let mut s = state(Metric::Low, 1);
        assert!(s.apply(UiAction::SelectDay(3), &table, UnavailablePolicy::ShowNotice));
        assert_eq!(s, state(Metric::Low, 3));
    }

    #[test]
    fn test_unavailable_pair_under_reject() {
        let table = LayerTable::ndfd_default();
        let mut s = state(Metric::Low, 1);
        assert!(!s.apply(UiAction::SelectDay(3), &table, UnavailablePolicy::Reject));
        assert_eq!(s, state(Metric::Low, 1));
    }

    #[test]
    fn test_metric_switch_without_fallback_is_rejected() {
        // No low layers at all: nothing to fall back to.
        let table = LayerTable::from_entries([(Metric::High, 1, 124)]);
        let s = state(Metric::High, 1);
        assert_eq!(
            s.transition(UiAction::SelectMetric(Metric::Low), &table, UnavailablePolicy::Reject),
            Transition::Ignored(IgnoreReason::Unavailable)
        );
        assert_eq!(
            s.transition(UiAction::SelectMetric(Metric::Low), &table, UnavailablePolicy::ShowNotice),
            Transition::Changed(state(Metric::Low, 1))
        );
    }

    #[test]
    fn test_reselecting_same_day_is_not_a_change() {
        let table = LayerTable::ndfd_default();
        let mut s = state(Metric::High, 2);
        assert!(!s.apply(UiAction::SelectDay(2), &table, UnavailablePolicy::ShowNotice));
    }
}
