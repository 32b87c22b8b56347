use rand::Rng;

pub const DAYS_IN_WEEK: usize = 7;
pub const DAY_LABELS: [&str; DAYS_IN_WEEK] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Upper bound on a demo bar, in minutes
const DEMO_MAX_MINUTES: u64 = 120;
/// Smallest scale the chart is drawn with
const MIN_SCALE: u64 = 10;

/// Fabricated minutes-per-weekday for the history chart
pub fn demo_week<R: Rng + ?Sized>(rng: &mut R) -> [u64; DAYS_IN_WEEK] {
    std::array::from_fn(|_| rng.gen_range(0..=DEMO_MAX_MINUTES))
}

/// Y scale for the chart: the tallest bar, but never below `MIN_SCALE`
pub fn chart_max(values: &[u64]) -> u64 {
    values.iter().copied().max().unwrap_or(0).max(MIN_SCALE)
}

/// Label/value pairs in the shape ratatui's bar chart consumes
pub fn bar_data(values: &[u64; DAYS_IN_WEEK]) -> Vec<(&'static str, u64)> {
    DAY_LABELS.iter().copied().zip(values.iter().copied()).collect()
}
