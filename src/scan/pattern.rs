// Thu Feb 5 2026 - Alex

use crate::scan::record::AccountRecord;
use once_cell::sync::Lazy;
use regex::Regex;

// Ordered pattern families: the email shape is tried first, the generic
// username shape only as a fallback. Separator is `|` or `:`.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})[|:](\S+)").unwrap()
});

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z0-9_]{6,})[|:](\S+)").unwrap());

pub fn parse_account_line(line: &str) -> Option<AccountRecord> {
    for pattern in [&*EMAIL_RE, &*USERNAME_RE] {
        if let Some(caps) = pattern.captures(line) {
            return Some(AccountRecord::new(&caps[1], &caps[2]));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_email_pair() {
        let record = parse_account_line("https://x.com user@mail.com:secret123").unwrap();
        assert_eq!(record.identifier(), "user@mail.com");
        assert_eq!(record.secret(), "secret123");
    }

    #[test]
    fn test_parses_pipe_separator() {
        let record = parse_account_line("user@mail.com|secret123").unwrap();
        assert_eq!(record.normalized(), "user@mail.com:secret123");
    }

    #[test]
    fn test_parses_username_fallback() {
        let record = parse_account_line("gamer_tag99:letmein").unwrap();
        assert_eq!(record.identifier(), "gamer_tag99");
        assert_eq!(record.secret(), "letmein");
    }

    #[test]
    fn test_email_family_takes_precedence() {
        // Both families match this line; the email family must win even
        // though the username hit appears earlier in the text.
        let record = parse_account_line("someuser123:oldpw user@mail.com:newpw").unwrap();
        assert_eq!(record.identifier(), "user@mail.com");
        assert_eq!(record.secret(), "newpw");
    }

    #[test]
    fn test_short_username_does_not_match() {
        assert!(parse_account_line("abc:pw").is_none());
        assert!(parse_account_line("no separators here").is_none());
    }
}
