use serde::Serialize;

/// Minimum average (inclusive) for a passing status.
pub const PASS_THRESHOLD: f64 = 75.0;

/// Two-decimal rounding used for every reported average.
pub fn round_2_decimals(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Arithmetic mean rounded to two decimals; `0.0` for an empty input.
pub fn mean_2_decimals<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut count: usize = 0;
    let mut sum: f64 = 0.0;
    for v in values {
        count += 1;
        sum += v;
    }
    if count == 0 {
        return 0.0;
    }
    round_2_decimals(sum / (count as f64))
}

pub fn is_passing(average: f64) -> bool {
    average >= PASS_THRESHOLD
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassStatistics {
    pub class: String,
    pub student_count: usize,
    pub average_score: f64,
    pub highest_average: f64,
    pub lowest_average: f64,
}

/// Statistics over the per-student averages of one class.
/// Returns `None` when the class has no members.
pub fn class_statistics(label: &str, averages: &[f64]) -> Option<ClassStatistics> {
    if averages.is_empty() {
        return None;
    }
    let highest = averages.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lowest = averages.iter().copied().fold(f64::INFINITY, f64::min);
    Some(ClassStatistics {
        class: label.to_string(),
        student_count: averages.len(),
        average_score: mean_2_decimals(averages.iter().copied()),
        highest_average: highest,
        lowest_average: lowest,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStatistics {
    pub student_count: usize,
    /// Mean over students that have at least one non-zero average.
    pub average_score: f64,
    pub pass_count: usize,
    pub fail_count: usize,
}

pub fn overall_statistics(averages: &[f64]) -> OverallStatistics {
    let pass_count = averages.iter().filter(|a| is_passing(**a)).count();
    OverallStatistics {
        student_count: averages.len(),
        average_score: mean_2_decimals(averages.iter().copied().filter(|a| *a != 0.0)),
        pass_count,
        fail_count: averages.len() - pass_count,
    }
}
