use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{GitHubMetrics, RecentBuild, StatusDistribution, TrendPoint, WorkflowRun};

const RECENT_BUILDS_LIMIT: usize = 10;

/// Display rows for the 10 most recent runs. The API returns runs newest
/// first, so input order is preserved.
pub fn recent_builds(runs: &[WorkflowRun], now: DateTime<Utc>) -> Vec<RecentBuild> {
    runs.iter()
        .take(RECENT_BUILDS_LIMIT)
        .map(|run| RecentBuild {
            id: run.id,
            name: run.name.clone(),
            status: status_text(run),
            branch: run.head_branch.clone(),
            commit: run.head_sha.chars().take(7).collect(),
            age: relative_age(run.created_at, now),
            duration: display_duration(run),
        })
        .collect()
}

fn status_text(run: &WorkflowRun) -> String {
    if run.status == "in_progress" {
        return "In Progress".to_string();
    }

    match run.conclusion.as_deref() {
        Some("success") => "Success",
        Some("failure") => "Failed",
        Some("cancelled") => "Cancelled",
        _ => "Unknown",
    }
    .to_string()
}

/// Duration string for completed runs with a recorded start time.
fn display_duration(run: &WorkflowRun) -> Option<String> {
    if run.status != "completed" {
        return None;
    }

    run.run_started_at
        .map(|started| format_duration(started, run.updated_at))
}

pub fn format_duration(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let minutes = ((end - start).num_seconds() as f64 / 60.0).round() as i64;

    if minutes < 1 {
        return "< 1m".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m");
    }

    let hours = minutes / 60;
    let remainder = minutes % 60;
    format!("{hours}h {remainder}m")
}

pub fn relative_age(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - date;
    let days = elapsed.num_days();
    let hours = elapsed.num_hours();

    if days > 0 {
        return format!("{days}d ago");
    }
    if hours > 0 {
        return format!("{hours}h ago");
    }

    let minutes = elapsed.num_minutes();
    if minutes > 0 {
        format!("{minutes}m ago")
    } else {
        "Just now".to_string()
    }
}

/// Per-day successful/failed counts keyed by the UTC date of `created_at`.
/// Runs that have not concluded count toward the day's total only.
pub fn build_trends(runs: &[WorkflowRun]) -> Vec<TrendPoint> {
    let mut days: BTreeMap<NaiveDate, (usize, usize, usize)> = BTreeMap::new();

    for run in runs {
        let (successful, failed, total) = days.entry(run.created_at.date_naive()).or_default();
        *total += 1;

        if run.status == "completed" {
            match run.conclusion.as_deref() {
                Some("success") => *successful += 1,
                Some("failure") => *failed += 1,
                _ => {}
            }
        }
    }

    days.into_iter()
        .map(|(date, (successful, failed, total))| TrendPoint {
            date,
            successful,
            failed,
            total,
        })
        .collect()
}

/// Success/failed/cancelled breakdown derived from the metrics snapshot.
pub fn status_distribution(metrics: &GitHubMetrics) -> StatusDistribution {
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let success =
        (metrics.total_builds as f64 * (metrics.build_success_rate / 100.0)).round() as usize;

    StatusDistribution {
        success,
        failed: metrics.failed_builds,
        cancelled: metrics
            .total_builds
            .saturating_sub(success + metrics.failed_builds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(timestamp: &str) -> DateTime<Utc> {
        timestamp.parse().unwrap()
    }

    fn run(
        id: u64,
        status: &str,
        conclusion: Option<&str>,
        created_at: &str,
        started_at: Option<&str>,
        updated_at: &str,
    ) -> WorkflowRun {
        WorkflowRun {
            id,
            name: "CI/CD Pipeline".to_string(),
            status: status.to_string(),
            conclusion: conclusion.map(str::to_string),
            created_at: at(created_at),
            updated_at: at(updated_at),
            run_started_at: started_at.map(at),
            workflow_id: 123,
            head_branch: "main".to_string(),
            head_sha: "abc123def456789".to_string(),
        }
    }

    #[test]
    fn test_format_duration_under_one_minute() {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let end = start + Duration::seconds(20);

        assert_eq!(format_duration(start, end), "< 1m");
    }

    #[test]
    fn test_format_duration_minutes() {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let end = start + Duration::minutes(5);

        assert_eq!(format_duration(start, end), "5m");
    }

    #[test]
    fn test_format_duration_hours_and_minutes() {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let end = start + Duration::minutes(65);

        assert_eq!(format_duration(start, end), "1h 5m");
    }

    #[test]
    fn test_relative_age_just_now() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();

        assert_eq!(relative_age(now - Duration::seconds(30), now), "Just now");
    }

    #[test]
    fn test_relative_age_minutes_hours_days() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();

        assert_eq!(relative_age(now - Duration::minutes(12), now), "12m ago");
        assert_eq!(relative_age(now - Duration::hours(3), now), "3h ago");
        assert_eq!(relative_age(now - Duration::days(2), now), "2d ago");
    }

    #[test]
    fn test_recent_builds_caps_at_ten() {
        let runs: Vec<WorkflowRun> = (0..15)
            .map(|i| {
                run(
                    i,
                    "completed",
                    Some("success"),
                    "2024-01-15T10:00:00Z",
                    Some("2024-01-15T10:00:30Z"),
                    "2024-01-15T10:05:30Z",
                )
            })
            .collect();

        let recent = recent_builds(&runs, at("2024-01-15T12:00:00Z"));

        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].id, 0);
    }

    #[test]
    fn test_recent_build_display_fields() {
        let runs = vec![run(
            1,
            "completed",
            Some("success"),
            "2024-01-15T10:00:00Z",
            Some("2024-01-15T10:00:30Z"),
            "2024-01-15T10:05:30Z",
        )];

        let recent = recent_builds(&runs, at("2024-01-15T13:00:00Z"));

        assert_eq!(recent[0].status, "Success");
        assert_eq!(recent[0].commit, "abc123d");
        assert_eq!(recent[0].age, "3h ago");
        assert_eq!(recent[0].duration.as_deref(), Some("5m"));
    }

    #[test]
    fn test_recent_build_in_progress_has_no_duration() {
        let runs = vec![run(
            1,
            "in_progress",
            None,
            "2024-01-15T10:00:00Z",
            Some("2024-01-15T10:00:30Z"),
            "2024-01-15T10:05:30Z",
        )];

        let recent = recent_builds(&runs, at("2024-01-15T10:10:00Z"));

        assert_eq!(recent[0].status, "In Progress");
        assert_eq!(recent[0].duration, None);
    }

    #[test]
    fn test_recent_build_unknown_conclusion() {
        let runs = vec![run(
            1,
            "completed",
            Some("timed_out"),
            "2024-01-15T10:00:00Z",
            None,
            "2024-01-15T10:05:30Z",
        )];

        let recent = recent_builds(&runs, at("2024-01-15T10:10:00Z"));

        assert_eq!(recent[0].status, "Unknown");
        assert_eq!(recent[0].duration, None);
    }

    #[test]
    fn test_build_trends_groups_by_day_sorted() {
        let runs = vec![
            run(
                1,
                "completed",
                Some("success"),
                "2024-01-15T10:00:00Z",
                None,
                "2024-01-15T10:05:00Z",
            ),
            run(
                2,
                "completed",
                Some("failure"),
                "2024-01-14T10:00:00Z",
                None,
                "2024-01-14T10:05:00Z",
            ),
            run(
                3,
                "completed",
                Some("success"),
                "2024-01-14T12:00:00Z",
                None,
                "2024-01-14T12:05:00Z",
            ),
        ];

        let trends = build_trends(&runs);

        assert_eq!(trends.len(), 2);
        assert_eq!(trends[0].date, at("2024-01-14T00:00:00Z").date_naive());
        assert_eq!(trends[0].successful, 1);
        assert_eq!(trends[0].failed, 1);
        assert_eq!(trends[0].total, 2);
        assert_eq!(trends[1].successful, 1);
        assert_eq!(trends[1].failed, 0);
    }

    #[test]
    fn test_build_trends_unconcluded_runs_count_toward_total_only() {
        let runs = vec![run(
            1,
            "in_progress",
            None,
            "2024-01-15T10:00:00Z",
            None,
            "2024-01-15T10:05:00Z",
        )];

        let trends = build_trends(&runs);

        assert_eq!(trends[0].successful, 0);
        assert_eq!(trends[0].failed, 0);
        assert_eq!(trends[0].total, 1);
    }

    #[test]
    fn test_status_distribution_breakdown() {
        let metrics = GitHubMetrics {
            build_success_rate: 80.0,
            average_build_duration: 4.2,
            failed_builds: 1,
            test_pass_rate: 80.0,
            total_builds: 10,
        };

        let distribution = status_distribution(&metrics);

        assert_eq!(distribution.success, 8);
        assert_eq!(distribution.failed, 1);
        assert_eq!(distribution.cancelled, 1);
    }

    #[test]
    fn test_status_distribution_never_goes_negative() {
        let metrics = GitHubMetrics {
            build_success_rate: 100.0,
            average_build_duration: 0.0,
            failed_builds: 2,
            test_pass_rate: 100.0,
            total_builds: 3,
        };

        let distribution = status_distribution(&metrics);

        assert_eq!(distribution.success, 3);
        assert_eq!(distribution.cancelled, 0);
    }
}
