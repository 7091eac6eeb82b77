//! Post composer - metadata derived from raw title and content.
//!
//! Everything here is recomputed on every create and every edit; none of
//! it can be supplied by the caller.

use crate::domain::PostInput;
use crate::error::DomainError;

/// Average reading speed used for the reading-time estimate.
pub const WORDS_PER_MINUTE: usize = 200;

/// Derived metadata for a post body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composed {
    pub slug: String,
    pub reading_time: String,
}

/// Turn a title into a URL slug.
///
/// Lower-cases, keeps ASCII word characters, whitespace and hyphens, turns
/// whitespace runs into a single hyphen, collapses hyphen runs and trims
/// hyphens from both ends. The output is a fixed point: `slugify(slugify(t))
/// == slugify(t)`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        }
    }

    slug
}

/// Append a numeric suffix to a slug that is already taken.
///
/// Attempt 1 is the base slug itself; attempt `n > 1` yields `base-n`.
pub fn disambiguate(base: &str, attempt: u32) -> String {
    if attempt <= 1 {
        base.to_string()
    } else {
        format!("{base}-{attempt}")
    }
}

/// Whole minutes needed to read `content`, rounded up, never below one.
pub fn reading_minutes(content: &str) -> usize {
    let words = content.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}

/// Reading time label, e.g. `"2 min read"`.
pub fn reading_time(content: &str) -> String {
    format!("{} min read", reading_minutes(content))
}

/// Normalize a tag list.
///
/// Entries may themselves be comma-separated (the compose form sends a
/// single `"cmms, maintenance"` string). Order is kept, blanks and repeats
/// are dropped.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for entry in tags {
        for tag in entry.as_ref().split(',').map(str::trim) {
            if !tag.is_empty() && !out.iter().any(|t| t == tag) {
                out.push(tag.to_string());
            }
        }
    }
    out
}

/// Validate an input and derive its metadata.
pub fn compose(input: &PostInput) -> Result<Composed, DomainError> {
    let mut missing = Vec::new();
    if input.title.trim().is_empty() {
        missing.push("title");
    }
    if input.excerpt.trim().is_empty() {
        missing.push("excerpt");
    }
    if input.content.trim().is_empty() {
        missing.push("content");
    }
    if !missing.is_empty() {
        return Err(DomainError::Validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )));
    }

    if let Some(uri) = &input.cover_image {
        if !(uri.starts_with("https://") || uri.starts_with("http://")) {
            return Err(DomainError::Validation(
                "cover image must be an http(s) URI".to_string(),
            ));
        }
    }

    let slug = slugify(&input.title);
    if slug.is_empty() {
        return Err(DomainError::Validation(
            "title must contain at least one letter or digit".to_string(),
        ));
    }

    Ok(Composed {
        slug,
        reading_time: reading_time(&input.content),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    fn input(title: &str, content: &str) -> PostInput {
        PostInput {
            title: title.to_string(),
            category: Category::IndustryInsights,
            excerpt: "Short summary".to_string(),
            content: content.to_string(),
            cover_image: None,
            tags: vec![],
        }
    }

    #[test]
    fn test_slugify_basic_title() {
        assert_eq!(slugify("Hello World!"), "hello-world");
        assert_eq!(slugify("  Analytics & KPIs  "), "analytics-kpis");
        assert_eq!(slugify("Reduce  downtime -- fast"), "reduce-downtime-fast");
        assert_eq!(slugify("snake_case stays"), "snake_case-stays");
    }

    #[test]
    fn test_slugify_is_idempotent() {
        for title in [
            "Hello World!",
            "--Leading and trailing--",
            "Ünïcödé títle 2026",
            "a - b -- c",
            "???",
        ] {
            let once = slugify(title);
            assert_eq!(slugify(&once), once, "title: {title}");
        }
    }

    #[test]
    fn test_slugify_strips_to_empty() {
        assert_eq!(slugify("!!! ???"), "");
    }

    #[test]
    fn test_disambiguate() {
        assert_eq!(disambiguate("hello-world", 1), "hello-world");
        assert_eq!(disambiguate("hello-world", 3), "hello-world-3");
    }

    #[test]
    fn test_reading_time_rounds_up() {
        let words = |n: usize| vec!["word"; n].join(" ");
        assert_eq!(reading_time(&words(1)), "1 min read");
        assert_eq!(reading_time(&words(200)), "1 min read");
        assert_eq!(reading_time(&words(201)), "2 min read");
        assert_eq!(reading_time(&words(250)), "2 min read");
        assert_eq!(reading_time(&words(1000)), "5 min read");
    }

    #[test]
    fn test_reading_time_ignores_whitespace_runs() {
        assert_eq!(reading_minutes("  one\n\n two\tthree  "), 1);
    }

    #[test]
    fn test_normalize_tags() {
        let tags = normalize_tags(["cmms, maintenance", " ", "reliability", "cmms"]);
        assert_eq!(tags, vec!["cmms", "maintenance", "reliability"]);
    }

    #[test]
    fn test_compose_reports_missing_fields() {
        let err = compose(&input("  ", "")).unwrap_err();
        match err {
            DomainError::Validation(msg) => {
                assert!(msg.contains("title"));
                assert!(msg.contains("content"));
                assert!(!msg.contains("excerpt"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_compose_rejects_title_without_slug() {
        let err = compose(&input("!!!", "body")).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_compose_rejects_non_http_cover() {
        let mut bad = input("Title", "body");
        bad.cover_image = Some("javascript:alert(1)".to_string());
        assert!(matches!(compose(&bad), Err(DomainError::Validation(_))));
    }
}
