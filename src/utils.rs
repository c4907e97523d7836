use chrono::{DateTime, Utc};

/// Advances an exact-match filter through its pick-list:
/// all -> first value -> ... -> last value -> all.
pub fn cycle_filter_value(current: Option<&str>, values: &[String]) -> Option<String> {
    if values.is_empty() {
        return None;
    }
    match current {
        None => Some(values[0].clone()),
        Some(v) => {
            let pos = values.iter().position(|x| x == v)?;
            values.get(pos + 1).cloned()
        }
    }
}

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M").to_string()
}

/// Proportional bar for the type distribution, `width` cells at `max`.
pub fn distribution_bar(count: usize, max: usize, width: usize) -> String {
    let max = max.max(1);
    let filled = (count * width).div_ceil(max).min(width);
    "█".repeat(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_through_values_and_back_to_all() {
        let values = vec!["feat".to_string(), "fix".to_string()];
        assert_eq!(cycle_filter_value(None, &values).as_deref(), Some("feat"));
        assert_eq!(cycle_filter_value(Some("feat"), &values).as_deref(), Some("fix"));
        assert_eq!(cycle_filter_value(Some("fix"), &values), None);
    }

    #[test]
    fn unknown_current_value_resets_to_all() {
        let values = vec!["feat".to_string()];
        assert_eq!(cycle_filter_value(Some("gone"), &values), None);
    }

    #[test]
    fn empty_list_stays_at_all() {
        assert_eq!(cycle_filter_value(None, &[]), None);
    }

    #[test]
    fn bars_scale_with_max_and_never_overflow() {
        assert_eq!(distribution_bar(2, 4, 8), "████");
        assert_eq!(distribution_bar(4, 4, 8), "████████");
        assert_eq!(distribution_bar(0, 4, 8), "");
        // empty set: max floored at 1 upstream
        assert_eq!(distribution_bar(5, 1, 4), "████");
    }
}
