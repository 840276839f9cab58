//! Input validation utilities

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::{self, MAX_AI_TOOLS};

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"));

/// Validate username format
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 3 {
        return Err("Username must be at least 3 characters");
    }
    if username.len() > 32 {
        return Err("Username must be at most 32 characters");
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err("Username can only contain letters, numbers, underscores, and hyphens");
    }
    if !username.chars().next().map(|c| c.is_ascii_alphabetic()).unwrap_or(false) {
        return Err("Username must start with a letter");
    }
    Ok(())
}

/// Validate a contest slug (lowercase words joined by single hyphens)
pub fn validate_slug(slug: &str) -> Result<(), &'static str> {
    if slug.is_empty() || slug.len() as u64 > constants::MAX_CONTEST_SLUG_LENGTH {
        return Err("Slug must be between 1 and 80 characters");
    }
    if !SLUG_RE.is_match(slug) {
        return Err("Slug may only contain lowercase letters, digits and single hyphens");
    }
    Ok(())
}

/// Validate a link to externally hosted media
pub fn validate_media_url(url: &str) -> Result<(), &'static str> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or("URL must start with http:// or https://")?;

    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() || host.chars().any(char::is_whitespace) {
        return Err("URL must include a host");
    }
    if url.len() as u64 > constants::MAX_URL_LENGTH {
        return Err("URL is too long");
    }
    Ok(())
}

/// Normalise the declared AI tools: trimmed, non-empty, deduplicated
pub fn normalize_ai_tools(tools: &[String]) -> Result<Vec<String>, &'static str> {
    let mut out: Vec<String> = Vec::new();
    for tool in tools {
        let tool = sanitize_string(tool);
        if tool.is_empty() {
            continue;
        }
        if tool.len() > 64 {
            return Err("AI tool names must be at most 64 characters");
        }
        if !out.iter().any(|t| t.eq_ignore_ascii_case(&tool)) {
            out.push(tool);
        }
    }
    if out.len() > MAX_AI_TOOLS {
        return Err("Too many AI tools listed");
    }
    Ok(out)
}

/// Sanitize string input (remove control characters, trim whitespace)
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("Alice_123").is_ok());
        assert!(validate_username("ab").is_err()); // Too short
        assert!(validate_username("123abc").is_err()); // Starts with number
        assert!(validate_username("user@name").is_err()); // Invalid character
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("neon-dreams-2026").is_ok());
        assert!(validate_slug("a").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Neon").is_err());
        assert!(validate_slug("double--hyphen").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("trailing-").is_err());
        assert!(validate_slug(&"a".repeat(81)).is_err());
    }

    #[test]
    fn test_validate_media_url() {
        assert!(validate_media_url("https://videos.example.com/v/abc123").is_ok());
        assert!(validate_media_url("http://cdn.example.org").is_ok());
        assert!(validate_media_url("ftp://example.com/clip.mp4").is_err());
        assert!(validate_media_url("https://").is_err());
        assert!(validate_media_url("https:///path").is_err());
        assert!(validate_media_url("javascript:alert(1)").is_err());
    }

    #[test]
    fn test_normalize_ai_tools() {
        let tools = vec![
            " Sora ".to_string(),
            "sora".to_string(),
            "".to_string(),
            "Runway Gen-3".to_string(),
        ];
        assert_eq!(
            normalize_ai_tools(&tools).unwrap(),
            vec!["Sora".to_string(), "Runway Gen-3".to_string()]
        );

        let too_many: Vec<String> = (0..11).map(|i| format!("tool-{}", i)).collect();
        assert!(normalize_ai_tools(&too_many).is_err());
    }

    #[test]
    fn test_sanitize_string() {
        assert_eq!(sanitize_string("  hello\u{0007} world \n"), "hello world");
    }
}
