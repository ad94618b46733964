use chrono::{DateTime, Utc};

/// Human-relative age of `updated` as seen from `now`, bucketed to the
/// coarsest unit by successive floor division (60, 60, 24, 30, 12).
pub fn relative_time(updated: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - updated).num_seconds().max(0);
    if secs < 60 {
        return "just now".to_string();
    }
    let minutes = secs / 60;
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    let days = hours / 24;
    if days < 30 {
        return format!("{days}d ago");
    }
    let months = days / 30;
    if months < 12 {
        return format!("{months}mo ago");
    }
    format!("{}y ago", months / 12)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crate::test_utils::base_time;

    fn at(secs_ago: i64) -> String {
        let now = base_time();
        relative_time(now - Duration::seconds(secs_ago), now)
    }

    #[test]
    fn buckets_match_the_unit_ladder() {
        assert_eq!(at(0), "just now");
        assert_eq!(at(40), "just now");
        assert_eq!(at(59), "just now");
        assert_eq!(at(60), "1m ago");
        assert_eq!(at(90), "1m ago");
        assert_eq!(at(3_599), "59m ago");
        assert_eq!(at(3_600), "1h ago");
        assert_eq!(at(86_399), "23h ago");
        assert_eq!(at(86_400), "1d ago");
        assert_eq!(at(29 * 86_400), "29d ago");
        assert_eq!(at(30 * 86_400), "1mo ago");
        assert_eq!(at(359 * 86_400), "11mo ago");
        assert_eq!(at(360 * 86_400), "1y ago");
        assert_eq!(at(800 * 86_400), "2y ago");
    }

    #[test]
    fn future_instants_clamp_to_just_now() {
        let now = base_time();
        assert_eq!(relative_time(now + Duration::seconds(120), now), "just now");
    }
}
