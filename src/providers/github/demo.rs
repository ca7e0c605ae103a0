use chrono::{DateTime, Duration, Utc};

use crate::models::{GitHubMetrics, WorkflowRun};

pub const DEMO_DATA_NOTICE: &str =
    "GitHub token not configured. Showing demo data. Configure a token for live metrics.";

/// Fixed metrics shown when the API is unavailable and no token is set.
pub fn demo_metrics() -> GitHubMetrics {
    GitHubMetrics {
        build_success_rate: 87.5,
        average_build_duration: 4.2,
        failed_builds: 3,
        test_pass_rate: 92.3,
        total_builds: 24,
    }
}

/// Canned workflow runs for the recent-builds list, timestamped relative
/// to `now` so the displayed ages stay plausible.
pub fn demo_workflow_runs(now: DateTime<Utc>) -> Vec<WorkflowRun> {
    let entries = [
        (1, "success", Duration::hours(2), Duration::minutes(5)),
        (
            2,
            "failure",
            Duration::hours(20),
            Duration::seconds(390),
        ),
        (3, "success", Duration::days(2), Duration::seconds(182)),
    ];
    let branches = ["main", "feature/auth", "main"];
    let shas = ["abc1234def", "def4567abc", "ghi7890jkl"];

    entries
        .iter()
        .zip(branches.iter().zip(shas.iter()))
        .map(|((id, conclusion, age, duration), (branch, sha))| {
            let created_at = now - *age;
            let run_started_at = created_at + Duration::seconds(30);

            WorkflowRun {
                id: *id,
                name: "CI/CD Pipeline".to_string(),
                status: "completed".to_string(),
                conclusion: Some((*conclusion).to_string()),
                created_at,
                updated_at: run_started_at + *duration,
                run_started_at: Some(run_started_at),
                workflow_id: 123,
                head_branch: (*branch).to_string(),
                head_sha: (*sha).to_string(),
            }
        })
        .collect()
}
