use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::ParsedMessage;

// Conventional commit header: type(scope)!: subject
static CONVENTIONAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w*)(?:\(([\w\s\.\-\*/]*)\))?(!?):\s(.*)$").unwrap());

pub const NO_MESSAGE_PLACEHOLDER: &str = "No commit message";

const BREAKING_FOOTER: &str = "BREAKING CHANGE:";

/// Parses a raw commit message into its conventional-commit parts.
///
/// Total: every input, including the empty string, yields a valid
/// `ParsedMessage` with a non-empty subject.
pub fn parse(message: &str) -> ParsedMessage {
    let mut lines = message.split('\n');
    let header = lines.next().unwrap_or("");
    let body = lines.collect::<Vec<_>>().join("\n").trim().to_string();

    let breaking_footer = body.to_uppercase().contains(BREAKING_FOOTER);

    if let Some(caps) = CONVENTIONAL_RE.captures(header) {
        let commit_type = caps
            .get(1)
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let scope = caps
            .get(2)
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let is_breaking = caps.get(3).map(|m| m.as_str()) == Some("!") || breaking_footer;

        return ParsedMessage {
            commit_type,
            scope,
            is_breaking,
            subject: non_empty_subject(caps.get(4).map(|m| m.as_str()).unwrap_or("")),
            body: if body.is_empty() { None } else { Some(body) },
        };
    }

    // Fallback for non-conventional messages
    ParsedMessage {
        commit_type: None,
        scope: None,
        is_breaking: breaking_footer,
        subject: non_empty_subject(header),
        body: if body.is_empty() { None } else { Some(body) },
    }
}

fn non_empty_subject(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        NO_MESSAGE_PLACEHOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_type_and_scope() {
        let parsed = parse("fix(api): handle timeout");
        assert_eq!(parsed.commit_type.as_deref(), Some("fix"));
        assert_eq!(parsed.scope.as_deref(), Some("api"));
        assert_eq!(parsed.subject, "handle timeout");
        assert_eq!(parsed.body, None);
        assert!(!parsed.is_breaking);
    }

    #[test]
    fn parses_type_without_scope() {
        let parsed = parse("feat: add repo picker");
        assert_eq!(parsed.commit_type.as_deref(), Some("feat"));
        assert_eq!(parsed.scope, None);
        assert_eq!(parsed.subject, "add repo picker");
    }

    #[test]
    fn bang_marks_breaking() {
        let parsed = parse("feat!: drop legacy mode\n\nBREAKING CHANGE: removed v1 endpoint");
        assert_eq!(parsed.commit_type.as_deref(), Some("feat"));
        assert_eq!(parsed.scope, None);
        assert!(parsed.is_breaking);
        assert_eq!(parsed.body.as_deref(), Some("BREAKING CHANGE: removed v1 endpoint"));
    }

    #[test]
    fn footer_marks_breaking_case_insensitively() {
        let parsed = parse("refactor: rework config\n\nbreaking change: new file layout");
        assert!(parsed.is_breaking);
        assert_eq!(parsed.commit_type.as_deref(), Some("refactor"));
    }

    #[test]
    fn footer_marks_breaking_on_plain_messages() {
        let parsed = parse("rework everything\n\nBREAKING CHANGE: yes really");
        assert_eq!(parsed.commit_type, None);
        assert!(parsed.is_breaking);
        assert_eq!(parsed.subject, "rework everything");
    }

    #[test]
    fn empty_message_gets_placeholder() {
        let parsed = parse("");
        assert_eq!(parsed.subject, NO_MESSAGE_PLACEHOLDER);
        assert_eq!(parsed.commit_type, None);
        assert_eq!(parsed.scope, None);
        assert_eq!(parsed.body, None);
        assert!(!parsed.is_breaking);
    }

    #[test]
    fn empty_scope_parens_become_none() {
        let parsed = parse("fix(): something");
        assert_eq!(parsed.commit_type.as_deref(), Some("fix"));
        assert_eq!(parsed.scope, None);
        assert_eq!(parsed.subject, "something");
    }

    #[test]
    fn scope_with_slash_and_dots() {
        let parsed = parse("chore(deps/dev.tools): bump everything");
        assert_eq!(parsed.scope.as_deref(), Some("deps/dev.tools"));
    }

    #[test]
    fn non_conventional_message_keeps_header_as_subject() {
        let parsed = parse("Merge branch 'main' into develop");
        assert_eq!(parsed.commit_type, None);
        assert_eq!(parsed.scope, None);
        assert_eq!(parsed.subject, "Merge branch 'main' into develop");
    }

    #[test]
    fn missing_space_after_colon_is_not_conventional() {
        let parsed = parse("fix:broken");
        assert_eq!(parsed.commit_type, None);
        assert_eq!(parsed.subject, "fix:broken");
    }

    #[test]
    fn multi_line_body_is_trimmed_once() {
        let parsed = parse("feat(ui): new panel\n\nfirst line\nsecond line\n\n");
        assert_eq!(parsed.body.as_deref(), Some("first line\nsecond line"));
    }

    #[test]
    fn empty_subject_after_match_gets_placeholder() {
        let parsed = parse("fix: ");
        assert_eq!(parsed.commit_type.as_deref(), Some("fix"));
        assert_eq!(parsed.subject, NO_MESSAGE_PLACEHOLDER);
    }
}
