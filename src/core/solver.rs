use super::engine::round_currency;

// Solves v / (others_post + v) = pre_i / pre_total for v, holding every other
// post-revaluation value fixed.
pub fn solve_break_even_value(
    pre_values: &[f64],
    post_values: &[f64],
    index: usize,
) -> Option<i64> {
    if pre_values.len() != post_values.len() || index >= pre_values.len() {
        return None;
    }
    if pre_values.len() < 2 {
        return None;
    }

    let pre_total: f64 = pre_values.iter().sum();
    let post_total: f64 = post_values.iter().sum();
    let pre_value = pre_values[index];
    let others_pre = pre_total - pre_value;
    let others_post = post_total - post_values[index];

    if others_pre <= 0.0 || others_post <= 0.0 {
        return None;
    }

    let value = others_post * pre_value / others_pre;
    value.is_finite().then(|| round_currency(value))
}
