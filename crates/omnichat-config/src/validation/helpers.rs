//! Shared range-validation helpers used by all section validators.

/// Push an error if `value` is outside `[min, max]` (integer).
pub(crate) fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error if `value` is outside `[min, max]` (float).
pub(crate) fn validate_range_f64(
    errors: &mut Vec<String>,
    name: &str,
    value: f64,
    min: f64,
    max: f64,
) {
    if !(min..=max).contains(&value) {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error if `value` is not an http(s) or `about:` URL.
pub(crate) fn validate_url(errors: &mut Vec<String>, name: &str, value: &str) {
    let ok = value.starts_with("https://")
        || value.starts_with("http://")
        || value.starts_with("about:");
    if !ok {
        errors.push(format!("{name} = {value:?} is not an http(s) URL"));
    }
}
