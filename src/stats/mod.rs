//! Pure statistics over intake events.
//!
//! Everything here is a plain function of its inputs: the reference instant
//! arrives as a parameter, there is no I/O and no failure path. Events that
//! fall outside the requested trailing window (including future timestamps)
//! are filtered out rather than rejected, and input order never matters.

pub mod badges;

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::{
    store::entities::IntakeEvent,
    utils::time::{day_of, day_start_ms, DAY_MS},
};

pub const WEEK_DAYS: usize = 7;
pub const MONTH_DAYS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeeklySummary {
    pub days_logged: u32,
    pub days_goal_met: u32,
    /// Consecutive goal-met days counting backward from today.
    pub current_goal_streak: u32,
    pub best_day_amount: u64,
    pub total_week_amount: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthlySummary {
    pub days_logged: u32,
    pub days_goal_met: u32,
    /// Longest run of consecutive goal-met days anywhere in the window, not
    /// just the run ending today.
    pub longest_goal_streak: u32,
    pub best_day_amount: u64,
    pub total_month_amount: u64,
}

/// Sums the trailing week into 7 day buckets and derives the weekly
/// achievement numbers. Bucket index 6 is always today.
pub fn compute_weekly_summary(
    events: &[IntakeEvent],
    daily_goal: u32,
    now_ms: i64,
) -> WeeklySummary {
    if events.is_empty() {
        return WeeklySummary::default();
    }

    let today_start = day_start_ms(now_ms);
    let mut totals = [0u64; WEEK_DAYS];

    for event in events {
        let day_start = day_start_ms(event.timestamp_ms());
        let days_ago = (today_start - day_start) / DAY_MS;
        if (0..WEEK_DAYS as i64).contains(&days_ago) {
            let index = WEEK_DAYS - 1 - days_ago as usize;
            totals[index] = totals[index].saturating_add(event.amount as u64);
        }
    }

    let goal = daily_goal as u64;
    let total_week_amount = totals.iter().sum();
    let days_logged = totals.iter().filter(|total| **total > 0).count() as u32;
    let days_goal_met = if daily_goal > 0 {
        totals.iter().filter(|total| **total >= goal).count() as u32
    } else {
        0
    };
    let best_day_amount = totals.iter().copied().max().unwrap_or(0);

    let mut current_goal_streak = 0;
    if daily_goal > 0 {
        for total in totals.iter().rev() {
            if *total >= goal {
                current_goal_streak += 1;
            } else {
                break;
            }
        }
    }

    WeeklySummary {
        days_logged,
        days_goal_met,
        current_goal_streak,
        best_day_amount,
        total_week_amount,
    }
}

/// Same bucket construction over 30 trailing days, but with the day-start
/// keys materialized oldest to newest. For identical input this agrees with
/// the index arithmetic in [compute_weekly_summary] on the shared days.
pub fn compute_monthly_summary(
    events: &[IntakeEvent],
    daily_goal: u32,
    now_ms: i64,
) -> MonthlySummary {
    if events.is_empty() {
        return MonthlySummary::default();
    }

    let today_start = day_start_ms(now_ms);
    let earliest_day_start = today_start - (MONTH_DAYS as i64 - 1) * DAY_MS;

    let mut totals_by_day = HashMap::<i64, u64>::new();
    for event in events {
        let timestamp = event.timestamp_ms();
        if timestamp < earliest_day_start {
            continue;
        }
        let entry = totals_by_day.entry(day_start_ms(timestamp)).or_insert(0);
        *entry = entry.saturating_add(event.amount as u64);
    }

    // Materializing the keys also drops future days, which never appear in
    // the trailing window.
    let totals = (0..MONTH_DAYS as i64)
        .map(|offset| {
            totals_by_day
                .get(&(earliest_day_start + offset * DAY_MS))
                .copied()
                .unwrap_or(0)
        })
        .collect::<Vec<_>>();

    let goal = daily_goal as u64;
    let total_month_amount = totals.iter().sum();
    let days_logged = totals.iter().filter(|total| **total > 0).count() as u32;
    let days_goal_met = if daily_goal > 0 {
        totals.iter().filter(|total| **total >= goal).count() as u32
    } else {
        0
    };
    let best_day_amount = totals.iter().copied().max().unwrap_or(0);

    let mut longest_goal_streak = 0;
    let mut running_streak = 0;
    if daily_goal > 0 {
        for total in &totals {
            if *total >= goal {
                running_streak += 1;
                longest_goal_streak = longest_goal_streak.max(running_streak);
            } else {
                running_streak = 0;
            }
        }
    }

    MonthlySummary {
        days_logged,
        days_goal_met,
        longest_goal_streak,
        best_day_amount,
        total_month_amount,
    }
}

/// Fraction of the daily goal reached today, clamped into [0, 1]. A zero goal
/// reads as no progress instead of dividing by zero.
pub fn progress_ratio(total_today: u64, daily_goal: u32) -> f64 {
    if daily_goal == 0 {
        return 0.0;
    }
    (total_today as f64 / daily_goal as f64).clamp(0.0, 1.0)
}

/// Today's bucket sum, the input of [progress_ratio].
pub fn total_today(events: &[IntakeEvent], now_ms: i64) -> u64 {
    let today_start = day_start_ms(now_ms);
    events
        .iter()
        .filter(|event| day_start_ms(event.timestamp_ms()) == today_start)
        .fold(0u64, |total, event| {
            total.saturating_add(event.amount as u64)
        })
}

/// Per-day intake over the trailing window, keyed by calendar day and ordered
/// oldest to newest. Days without events are absent from the map. The day
/// keys use the same floor as the summary buckets, so both views agree
/// numerically for the same data.
pub fn daily_intake(
    events: &[IntakeEvent],
    window_days: u32,
    now_ms: i64,
) -> BTreeMap<NaiveDate, u64> {
    let today_start = day_start_ms(now_ms);
    let earliest_day_start = today_start - (window_days as i64 - 1) * DAY_MS;

    let mut totals = BTreeMap::new();
    for event in events {
        let day_start = day_start_ms(event.timestamp_ms());
        if day_start < earliest_day_start || day_start > today_start {
            continue;
        }
        let entry = totals.entry(day_of(event.timestamp_ms())).or_insert(0u64);
        *entry = entry.saturating_add(event.amount as u64);
    }
    totals
}
