//! Page URLs that respect the deployment base path.
///
/// When `PUBLIC_URL` is set at compile time (e.g., `/for-you` on a shared
/// host), day pages are prefixed accordingly. Local builds fall back to
/// root-anchored paths.
#[must_use]
pub fn page_path(relative: &str) -> String {
    page_path_with_base(relative, option_env!("PUBLIC_URL").unwrap_or(""))
}

/// URL of a day page by id, or `None` for an unknown day.
#[must_use]
pub fn day_url(id: &str) -> Option<String> {
    valentine_core::find_day(id).map(|day| page_path(day.path))
}

fn page_path_with_base(relative: &str, base: &str) -> String {
    let base = base.trim_end_matches('/');
    let rel = relative.trim_start_matches('/');

    if base.is_empty() {
        format!("/{rel}")
    } else {
        format!("{base}/{rel}")
    }
}

#[cfg(test)]
mod tests {
    use super::{day_url, page_path};

    #[test]
    fn builds_root_prefixed_path_when_base_missing() {
        assert_eq!(page_path("days/rose-day"), "/days/rose-day");
        assert_eq!(page_path("/days/rose-day"), "/days/rose-day");
    }

    #[test]
    fn builds_paths_with_public_base() {
        assert_eq!(
            super::page_path_with_base("days/kiss-day", "/for-you"),
            "/for-you/days/kiss-day"
        );
        assert_eq!(
            super::page_path_with_base("/days/kiss-day", "/for-you/"),
            "/for-you/days/kiss-day"
        );
    }

    #[test]
    fn day_urls_come_from_the_catalog() {
        assert_eq!(day_url("valentine").as_deref(), Some("/days/valentine-day"));
        assert_eq!(day_url("birthday"), None);
    }
}
