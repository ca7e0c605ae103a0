use crate::models::{GitHubMetrics, WorkflowRun};

// Durations outside (0, 1440) minutes are treated as clock skew or
// malformed timestamps and excluded from the average.
const MAX_DURATION_MINUTES: f64 = 1440.0;

/// Reduce a list of workflow runs into the build-health snapshot.
///
/// Total function: an empty input yields an all-zero snapshot. Runs that
/// have not completed count toward `total_builds` only.
pub fn calculate_metrics(runs: &[WorkflowRun]) -> GitHubMetrics {
    let completed: Vec<_> = runs.iter().filter(|r| r.status == "completed").collect();

    let successful = completed
        .iter()
        .filter(|r| r.conclusion.as_deref() == Some("success"))
        .count();
    let failed = completed
        .iter()
        .filter(|r| r.conclusion.as_deref() == Some("failure"))
        .count();

    let durations: Vec<f64> = completed
        .iter()
        .filter_map(|r| run_duration_minutes(r))
        .collect();

    let success_rate = calculate_success_rate(successful, completed.len());

    GitHubMetrics {
        build_success_rate: success_rate,
        average_build_duration: round_to_hundredths(calculate_avg_duration(&durations)),
        failed_builds: failed,
        // No independent test-result signal is consumed; the pass rate
        // mirrors the build success rate.
        test_pass_rate: success_rate,
        total_builds: runs.len(),
    }
}

/// Duration in minutes, defined only for runs with a recorded start time
/// and a plausible value. Bounds are exclusive on both ends.
fn run_duration_minutes(run: &WorkflowRun) -> Option<f64> {
    let started = run.run_started_at?;

    #[allow(clippy::cast_precision_loss)]
    let minutes = (run.updated_at - started).num_milliseconds() as f64 / 60_000.0;

    (minutes > 0.0 && minutes < MAX_DURATION_MINUTES).then_some(minutes)
}

fn calculate_success_rate(successful: usize, completed: usize) -> f64 {
    if completed == 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let rate = (successful as f64 / completed as f64) * 100.0;
    rate
}

fn calculate_avg_duration(durations: &[f64]) -> f64 {
    if durations.is_empty() {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let avg = durations.iter().sum::<f64>() / durations.len() as f64;
    avg
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
