// ABOUTME: Weekly schedule grid mapping a plan week onto the fixed meal-time rows
// ABOUTME: Range-checked week lookup, day spans, and clamped week navigation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Contributors

//! # Schedule Grid
//!
//! Pages a [`NormalizedPlan`] into week views laid out on the five fixed
//! meal times. Requesting a week outside the plan's range is an error
//! ([`PlanError::WeekOutOfRange`]) because only the navigation controls
//! should produce week indices; [`WeekCursor`] keeps those controls clamped
//! so out-of-range requests never reach the grid.

use crate::errors::PlanError;
use crate::models::plan::{Day, Meal, MealSlot, NormalizedPlan, Week, DAYS_PER_WEEK};

/// First and last 1-based day numbers shown on a week page
#[must_use]
pub const fn week_span(week_index: usize, total_days: u32) -> (u32, u32) {
    let index = week_index as u32;
    let start = index.saturating_sub(1) * DAYS_PER_WEEK as u32 + 1;
    let end_candidate = index * DAYS_PER_WEEK as u32;
    let end = if end_candidate < total_days {
        end_candidate
    } else {
        total_days
    };
    (start, end)
}

/// One week of the plan laid out on the fixed time grid
#[derive(Debug, Clone, Copy)]
pub struct WeekGrid<'a> {
    week: &'a Week,
    total_days: u32,
}

impl<'a> WeekGrid<'a> {
    /// The five canonical grid times, in row order
    #[must_use]
    pub fn time_slots(&self) -> [&'static str; 5] {
        MealSlot::ALL.map(MealSlot::time)
    }

    /// 1-based index of this week
    #[must_use]
    pub const fn week_index(&self) -> u32 {
        self.week.index
    }

    /// Days shown as grid columns
    #[must_use]
    pub fn days(&self) -> &'a [Day] {
        &self.week.days
    }

    /// First and last day numbers covered by this page
    #[must_use]
    pub const fn span(&self) -> (u32, u32) {
        week_span(self.week.index as usize, self.total_days)
    }

    /// The meal a day schedules at a slot's time, if any.
    ///
    /// At most one match is expected; first match wins when a payload
    /// produced duplicates.
    #[must_use]
    pub fn cell(&self, day: &'a Day, slot: MealSlot) -> Option<&'a Meal> {
        day.meal_at(slot.time())
    }
}

impl NormalizedPlan {
    /// Grid view of one week page.
    ///
    /// # Errors
    ///
    /// `PlanError::WeekOutOfRange` when `week_index` is outside
    /// `[1, ceil(total_days / 7)]`.
    pub fn week_grid(&self, week_index: usize) -> Result<WeekGrid<'_>, PlanError> {
        let total_weeks = self.total_weeks();
        if week_index < 1 || week_index > total_weeks {
            return Err(PlanError::week_out_of_range(week_index, total_weeks));
        }
        self.weeks
            .get(week_index - 1)
            .map(|week| WeekGrid {
                week,
                total_days: self.total_days,
            })
            .ok_or(PlanError::week_out_of_range(week_index, total_weeks))
    }
}

/// Clamped week navigation state for the pagination controls.
///
/// Moving past either end is a no-op, not an error: the caller's prev/next
/// buttons simply stop advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekCursor {
    current: usize,
    total: usize,
}

impl WeekCursor {
    /// Cursor starting at week 1 of a plan with `total_weeks` pages
    #[must_use]
    pub fn new(total_weeks: usize) -> Self {
        Self {
            current: 1,
            total: total_weeks.max(1),
        }
    }

    /// Currently displayed week (1-based)
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Number of week pages
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Move by `delta` weeks; out-of-range moves leave the cursor unchanged.
    /// Returns the (possibly unchanged) current week.
    pub fn advance(&mut self, delta: i64) -> usize {
        let candidate = self.current as i64 + delta;
        if candidate >= 1 && candidate <= self.total as i64 {
            self.current = candidate as usize;
        }
        self.current
    }

    /// Whether the previous-week control should be disabled
    #[must_use]
    pub const fn at_first(&self) -> bool {
        self.current == 1
    }

    /// Whether the next-week control should be disabled
    #[must_use]
    pub const fn at_last(&self) -> bool {
        self.current == self.total
    }
}
