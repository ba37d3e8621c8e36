use super::error::AllocationError;
use super::solver::solve_break_even_value;
use super::types::{
    Allocation, AllocationResult, Phase, Property, ShareComparison, ShareShift,
};

const MILLS_PER_UNIT: f64 = 1_000.0;
const SHARE_TOLERANCE: f64 = 1e-12;
// Largest levy whose whole-unit shares stay exact in f64 and fit in i64.
const MAX_LEVY: f64 = 9_007_199_254_740_992.0;

pub fn allocate<S: AsRef<str>>(
    labels: &[S],
    pre_values: &[f64],
    post_values: &[f64],
    levy: f64,
) -> Result<Allocation, AllocationError> {
    validate_shape(labels.len(), pre_values.len(), post_values.len())?;

    if !levy.is_finite() || levy <= 0.0 {
        return Err(AllocationError::InvalidInput(format!(
            "levy must be a positive finite amount, got {levy}"
        )));
    }
    if levy > MAX_LEVY {
        return Err(AllocationError::InvalidInput(format!(
            "levy must not exceed {MAX_LEVY}, got {levy}"
        )));
    }

    ensure_finite(labels, pre_values, Phase::Pre)?;
    ensure_finite(labels, post_values, Phase::Post)?;

    let pre_total = grand_list(pre_values, Phase::Pre)?;
    let post_total = grand_list(post_values, Phase::Post)?;

    ensure_positive(labels, pre_values, Phase::Pre)?;
    ensure_positive(labels, post_values, Phase::Post)?;

    let mut results = Vec::with_capacity(labels.len());
    for ((label, &pre_value), &post_value) in labels.iter().zip(pre_values).zip(post_values) {
        let label = label.as_ref();
        let pre_tax = tax_share(pre_value, pre_total, levy);
        let post_tax = tax_share(post_value, post_total, levy);
        let tax_change = post_tax - pre_tax;
        let percent_change = percent_change(tax_change, pre_tax).ok_or_else(|| {
            AllocationError::UndefinedPercentage {
                label: label.to_string(),
            }
        })?;

        results.push(AllocationResult {
            label: label.to_string(),
            pre_value,
            post_value,
            pre_tax,
            post_tax,
            tax_change,
            percent_change,
        });
    }

    Ok(Allocation {
        results,
        levy,
        pre_total,
        post_total,
        mill_rate_pre: mill_rate(levy, pre_total),
        mill_rate_post: mill_rate(levy, post_total),
    })
}

pub fn allocate_properties(
    properties: &[Property],
    levy: f64,
) -> Result<Allocation, AllocationError> {
    let labels: Vec<&str> = properties.iter().map(|p| p.label.as_str()).collect();
    let pre_values: Vec<f64> = properties.iter().map(|p| p.pre_value).collect();
    let post_values: Vec<f64> = properties.iter().map(|p| p.post_value).collect();
    allocate(&labels, &pre_values, &post_values, levy)
}

pub fn compare_shares(allocation: &Allocation) -> Vec<ShareComparison> {
    let pre_values: Vec<f64> = allocation.results.iter().map(|r| r.pre_value).collect();
    let post_values: Vec<f64> = allocation.results.iter().map(|r| r.post_value).collect();
    let grand_list_growth_percent =
        round_to_hundredths(growth_percent(allocation.pre_total, allocation.post_total));

    allocation
        .results
        .iter()
        .enumerate()
        .map(|(index, result)| ShareComparison {
            label: result.label.clone(),
            value_growth_percent: round_to_hundredths(growth_percent(
                result.pre_value,
                result.post_value,
            )),
            grand_list_growth_percent,
            shift: share_shift(result, allocation.pre_total, allocation.post_total),
            break_even_post_value: solve_break_even_value(&pre_values, &post_values, index),
        })
        .collect()
}

pub(super) fn round_currency(amount: f64) -> i64 {
    amount.round_ties_even() as i64
}

pub(super) fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

fn validate_shape(labels: usize, pre: usize, post: usize) -> Result<(), AllocationError> {
    if labels == 0 {
        return Err(AllocationError::InvalidInput(
            "at least one property is required".to_string(),
        ));
    }
    if pre != labels || post != labels {
        return Err(AllocationError::InvalidInput(format!(
            "expected {labels} pre and post values, got {pre} pre and {post} post"
        )));
    }
    Ok(())
}

fn ensure_finite<S: AsRef<str>>(
    labels: &[S],
    values: &[f64],
    phase: Phase,
) -> Result<(), AllocationError> {
    match labels.iter().zip(values).find(|(_, v)| !v.is_finite()) {
        Some((label, value)) => Err(AllocationError::InvalidInput(format!(
            "{phase} value for property '{}' must be finite, got {value}",
            label.as_ref()
        ))),
        None => Ok(()),
    }
}

fn ensure_positive<S: AsRef<str>>(
    labels: &[S],
    values: &[f64],
    phase: Phase,
) -> Result<(), AllocationError> {
    match labels.iter().zip(values).find(|(_, v)| **v <= 0.0) {
        Some((label, value)) => Err(AllocationError::InvalidInput(format!(
            "{phase} value for property '{}' must be > 0, got {value}",
            label.as_ref()
        ))),
        None => Ok(()),
    }
}

fn grand_list(values: &[f64], phase: Phase) -> Result<f64, AllocationError> {
    let total: f64 = values.iter().sum();
    if total == 0.0 {
        return Err(AllocationError::DivisionByZero(phase));
    }
    if !total.is_finite() {
        return Err(AllocationError::InvalidInput(format!(
            "{phase} grand list is not finite"
        )));
    }
    Ok(total)
}

fn tax_share(value: f64, total: f64, levy: f64) -> i64 {
    round_currency(value / total * levy)
}

fn percent_change(tax_change: i64, pre_tax: i64) -> Option<i64> {
    if pre_tax == 0 {
        return None;
    }
    Some((tax_change as f64 / pre_tax as f64 * 100.0).round_ties_even() as i64)
}

fn mill_rate(levy: f64, total: f64) -> f64 {
    round_to_hundredths(levy / total * MILLS_PER_UNIT)
}

fn growth_percent(pre: f64, post: f64) -> f64 {
    (post - pre) / pre * 100.0
}

// A property's share grows iff post_i / post_total > pre_i / pre_total.
fn share_shift(result: &AllocationResult, pre_total: f64, post_total: f64) -> ShareShift {
    let after = result.post_value * pre_total;
    let before = result.pre_value * post_total;
    let tolerance = SHARE_TOLERANCE * after.abs().max(before.abs());

    if (after - before).abs() <= tolerance {
        ShareShift::Unchanged
    } else if after > before {
        ShareShift::Increase
    } else {
        ShareShift::Decrease
    }
}
