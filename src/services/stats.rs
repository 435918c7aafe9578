// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trailing-window statistics report.
//!
//! Read-only: building a report never writes to the store, so two calls
//! with no mutation in between render identical text.

use crate::config::MAX_STATS_WINDOW_DAYS;
use crate::db::RecordStore;
use crate::error::Result;
use crate::models::nutrition::is_logged_kcal;
use crate::models::{
    resolve_workout_day, short_weekday_label, DayPlan, DayStatus, UserId,
};
use crate::services::content::ContentCatalog;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::sync::Arc;

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayLine {
    pub date: NaiveDate,
    pub weekday: &'static str,
    pub plan: DayPlan,
    /// Workout title, or "Rest day"
    pub title: String,
    pub done: usize,
    pub total: usize,
    pub intake: f64,
    pub burned: f64,
    pub net: f64,
    pub side_activities: usize,
    pub status: DayStatus,
}

impl DayLine {
    /// Every item of the day's plan was marked.
    pub fn is_fully_completed(&self) -> bool {
        self.total > 0 && self.done == self.total
    }
}

/// Aggregates across the window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    pub workouts_completed: usize,
    pub workout_days: usize,
    /// Whole percent; 0 when the window has no workout days
    pub workout_rate: u32,
    pub rest_completed: usize,
    pub rest_days: usize,
    pub side_activities: usize,
    pub avg_intake: f64,
    pub avg_burned: f64,
    pub avg_net: f64,
}

/// Full report, oldest day first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days: Vec<DayLine>,
    pub summary: StatsSummary,
}

/// Compute the window summary from day lines.
///
/// Average net divides by the larger of the intake-day and burned-day
/// counts, not by a per-metric count.
pub fn summarize(days: &[DayLine]) -> StatsSummary {
    let workout_lines = days.iter().filter(|d| matches!(d.plan, DayPlan::Workout(_)));
    let workout_days = workout_lines.clone().count();
    let workouts_completed = workout_lines.filter(|d| d.is_fully_completed()).count();

    let rest_lines = days.iter().filter(|d| d.plan == DayPlan::Rest);
    let rest_days = rest_lines.clone().count();
    let rest_completed = rest_lines.filter(|d| d.is_fully_completed()).count();

    let workout_rate = if workout_days == 0 {
        0
    } else {
        ((workouts_completed as f64 / workout_days as f64) * 100.0).round() as u32
    };

    let intake_days = days.iter().filter(|d| is_logged_kcal(d.intake)).count();
    let burned_days = days.iter().filter(|d| is_logged_kcal(d.burned)).count();
    let total_intake: f64 = days.iter().map(|d| d.intake).sum();
    let total_burned: f64 = days.iter().map(|d| d.burned).sum();
    let total_net: f64 = days.iter().map(|d| d.net).sum();

    let average = |sum: f64, count: usize| if count == 0 { 0.0 } else { sum / count as f64 };

    StatsSummary {
        workouts_completed,
        workout_days,
        workout_rate,
        rest_completed,
        rest_days,
        side_activities: days.iter().map(|d| d.side_activities).sum(),
        avg_intake: average(total_intake, intake_days),
        avg_burned: average(total_burned, burned_days),
        avg_net: average(total_net, intake_days.max(burned_days)),
    }
}

/// Render a report as chat text.
pub fn render(report: &StatsReport) -> String {
    let mut out = format!("📊 Statistics {} … {}\n\n", report.from, report.to);

    for day in &report.days {
        let closed = match day.status {
            DayStatus::Ok => " ✅",
            DayStatus::Incomplete => " ❌",
            DayStatus::Unset => "",
        };
        out.push_str(&format!(
            "{} {} {}: {}/{} | in {:.0} / out {:.0} / net {:.0} kcal | cardio {}{}\n",
            day.date,
            day.weekday,
            day.title,
            day.done,
            day.total,
            day.intake,
            day.burned,
            day.net,
            day.side_activities,
            closed
        ));
    }

    let s = &report.summary;
    out.push_str(&format!(
        "\n🏋️ Workouts completed: {}/{} ({}%)\n\
         🧘 Rest days completed: {}/{}\n\
         🏃 Cardio entries: {}\n\
         🍽 Avg intake: {:.0} kcal\n\
         🔥 Avg burned: {:.0} kcal\n\
         ⚖️ Avg net: {:.0} kcal",
        s.workouts_completed,
        s.workout_days,
        s.workout_rate,
        s.rest_completed,
        s.rest_days,
        s.side_activities,
        s.avg_intake,
        s.avg_burned,
        s.avg_net
    ));
    out
}

/// Builds reports from stored records and current content.
#[derive(Clone)]
pub struct StatsReporter {
    records: RecordStore,
    content: Arc<ContentCatalog>,
}

impl StatsReporter {
    pub fn new(records: RecordStore, content: Arc<ContentCatalog>) -> Self {
        Self { records, content }
    }

    /// Report for the `window_days` days ending at `today`, inclusive.
    ///
    /// The window is clamped to `1..=MAX_STATS_WINDOW_DAYS`.
    pub async fn build_report(
        &self,
        user: UserId,
        today: NaiveDate,
        window_days: u32,
    ) -> Result<StatsReport> {
        let window = i64::from(window_days.clamp(1, MAX_STATS_WINDOW_DAYS));
        let from = today
            .checked_sub_signed(Duration::days(window - 1))
            .unwrap_or(NaiveDate::MIN);
        let span = (today - from).num_days() + 1;
        let rest_total = self.content.rest_checklist().await.len();

        let mut days = Vec::with_capacity(span as usize);
        for offset in 0..span {
            let date = from + Duration::days(offset);
            let record = self.records.read(user, date).await?;
            let plan = resolve_workout_day(date);

            let (title, done, total) = match plan {
                DayPlan::Workout(id) => {
                    let (title, total) = match self.content.workout_day(id).await {
                        Some(day) => (day.title, day.exercises.len()),
                        None => (id.to_string(), 0),
                    };
                    (title, record.progress.exercises_done(total), total)
                }
                DayPlan::Rest => (
                    "Rest day".to_string(),
                    record.progress.rest_items_done(rest_total),
                    rest_total,
                ),
            };

            days.push(DayLine {
                date,
                weekday: short_weekday_label(date),
                plan,
                title,
                done,
                total,
                intake: record.nutrition.intake(),
                burned: record.nutrition.burned(),
                net: record.nutrition.net(),
                side_activities: record.progress.side_activities.len(),
                status: record.nutrition.day_status,
            });
        }

        let summary = summarize(&days);
        Ok(StatsReport {
            from,
            to: today,
            days,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkoutDayId;

    fn line(plan: DayPlan, done: usize, total: usize, intake: f64, burned: f64) -> DayLine {
        DayLine {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            weekday: "Mo",
            plan,
            title: String::new(),
            done,
            total,
            intake,
            burned,
            net: intake - burned,
            side_activities: 0,
            status: DayStatus::Unset,
        }
    }

    #[test]
    fn test_no_workout_days_gives_zero_rate() {
        let days = vec![line(DayPlan::Rest, 5, 5, 0.0, 0.0)];
        let summary = summarize(&days);
        assert_eq!(summary.workout_days, 0);
        assert_eq!(summary.workout_rate, 0);
        assert_eq!(summary.rest_completed, 1);
    }

    #[test]
    fn test_empty_window() {
        let summary = summarize(&[]);
        assert_eq!(summary.workout_rate, 0);
        assert_eq!(summary.avg_intake, 0.0);
        assert_eq!(summary.avg_net, 0.0);
    }

    #[test]
    fn test_completion_rate_counts_full_sessions_only() {
        let monday = DayPlan::Workout(WorkoutDayId::Monday);
        let days = vec![
            line(monday, 7, 7, 0.0, 0.0),
            line(monday, 6, 7, 0.0, 0.0),
            line(monday, 0, 7, 0.0, 0.0),
        ];
        let summary = summarize(&days);
        assert_eq!(summary.workouts_completed, 1);
        assert_eq!(summary.workout_days, 3);
        assert_eq!(summary.workout_rate, 33);
    }

    #[test]
    fn test_averages_use_nonzero_days_and_shared_net_denominator() {
        let days = vec![
            line(DayPlan::Rest, 0, 5, 2000.0, 0.0),
            line(DayPlan::Rest, 0, 5, 1000.0, 500.0),
            line(DayPlan::Rest, 0, 5, 0.0, 300.0),
            line(DayPlan::Rest, 0, 5, 0.0, 0.0),
        ];
        let summary = summarize(&days);

        assert_eq!(summary.avg_intake, 1500.0);
        assert_eq!(summary.avg_burned, 400.0);
        // (2000 + 500 - 300) / max(2, 2)
        assert_eq!(summary.avg_net, 1100.0);
    }

    #[test]
    fn test_net_denominator_is_larger_count() {
        let days = vec![
            line(DayPlan::Rest, 0, 5, 1200.0, 200.0),
            line(DayPlan::Rest, 0, 5, 0.0, 100.0),
            line(DayPlan::Rest, 0, 5, 0.0, 300.0),
        ];
        let summary = summarize(&days);
        // Σnet = 1000 - 100 - 300 = 600, divided by max(1, 3).
        assert_eq!(summary.avg_net, 200.0);
    }

    #[tokio::test]
    async fn test_oversized_window_is_clamped() {
        let reporter = StatsReporter::new(RecordStore::in_memory(), Arc::new(ContentCatalog::new()));
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let report = reporter
            .build_report(UserId(1), today, u32::MAX)
            .await
            .unwrap();

        assert_eq!(report.days.len(), MAX_STATS_WINDOW_DAYS as usize);
        assert_eq!(report.to, today);
        assert_eq!(report.from, today - Duration::days(365));
    }

    #[tokio::test]
    async fn test_window_stops_at_earliest_date() {
        let reporter = StatsReporter::new(RecordStore::in_memory(), Arc::new(ContentCatalog::new()));
        let today = NaiveDate::MIN + Duration::days(2);

        let report = reporter.build_report(UserId(1), today, 30).await.unwrap();

        assert_eq!(report.from, NaiveDate::MIN);
        assert_eq!(report.days.len(), 3);
    }

    #[test]
    fn test_fractional_residue_is_not_an_intake_day() {
        let days = vec![
            line(DayPlan::Rest, 0, 5, 0.1 + 0.2 - 0.3, 0.0),
            line(DayPlan::Rest, 0, 5, 1500.0, 0.0),
        ];
        let summary = summarize(&days);
        assert_eq!(summary.avg_intake, 1500.0);
    }

    #[test]
    fn test_render_contains_summary_metrics() {
        let report = StatsReport {
            from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            to: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            days: vec![line(DayPlan::Workout(WorkoutDayId::Monday), 3, 7, 1800.0, 300.0)],
            summary: summarize(&[]),
        };
        let text = render(&report);
        assert!(text.contains("2024-01-01 Mo"));
        assert!(text.contains("3/7 | in 1800 / out 300 / net 1500 kcal | cardio 0"));
        for label in [
            "Workouts completed",
            "Rest days completed",
            "Cardio entries",
            "Avg intake",
            "Avg burned",
            "Avg net",
        ] {
            assert!(text.contains(label), "missing {}", label);
        }
    }
}
