//! Text summary builders for CLI output.
//!
//! Formats statistics reports and particle-cloud summaries as human-readable lines.

use crate::model::{FrameSummary, MedianConvention, RunResult, StatsReport};

const AXES: [&str; 3] = ["x", "y", "z"];

fn join_values(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn stats_lines(report: &StatsReport) -> Vec<String> {
    let convention = match report.median_convention {
        MedianConvention::Average => "average of middles",
        MedianConvention::Lower => "lower middle",
    };
    vec![
        format!("Sorted ({}): [{}]", report.count, join_values(&report.sorted)),
        format!(
            "Mean: {:.4}, Median: {} ({}), Standard Deviation: {:.4}",
            report.mean, report.median, convention, report.std_dev
        ),
    ]
}

/// One line describing where the cloud is centered and how wide it is on each axis.
pub(crate) fn frame_line(summary: &FrameSummary) -> String {
    let axes = summary
        .axis_mean
        .iter()
        .zip(&summary.axis_std_dev)
        .zip(AXES)
        .map(|((m, sd), name)| format!("{name}: mean {m:+.3} sd {sd:.3}"))
        .collect::<Vec<_>>()
        .join("  ");
    format!("tick {:>5}  n={}  {}", summary.tick, summary.count, axes)
}

pub(crate) fn run_lines(result: &RunResult) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Diffusion: {}D, {} particles, step size {}, seed {}",
            result.config.dims, result.summary.count, result.config.step_size, result.seed
        ),
        format!("Ticks: {}", result.ticks),
    ];
    lines.push(format!("Final {}", frame_line(&result.summary)));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{summarize, Sample};

    #[test]
    fn stats_lines_for_reference_sample() {
        let report = summarize(&Sample::load(), MedianConvention::Average).unwrap();
        let lines = stats_lines(&report);
        assert_eq!(
            lines[0],
            "Sorted (9): [12, 15, 17, 23, 29, 35, 42, 48, 62]"
        );
        assert_eq!(
            lines[1],
            "Mean: 31.4444, Median: 29 (average of middles), Standard Deviation: 15.8683"
        );
    }

    #[test]
    fn frame_line_lists_each_axis() {
        let s = FrameSummary {
            tick: 12,
            count: 3,
            axis_mean: vec![0.5, -1.0],
            axis_std_dev: vec![2.0, 3.25],
        };
        assert_eq!(
            frame_line(&s),
            "tick    12  n=3  x: mean +0.500 sd 2.000  y: mean -1.000 sd 3.250"
        );
    }
}
