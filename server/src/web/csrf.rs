use std::sync::Arc;

/// Stateless CSRF tokens: a token is bound to an intention (`artist`,
/// `delete42`, ...) and to the server secret.
#[derive(Clone)]
pub struct CsrfTokens {
    secret: Arc<str>,
}

impl CsrfTokens {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: Arc::from(secret),
        }
    }

    pub fn token(&self, intention: &str) -> String {
        sha256::digest(format!("{}:{}", self.secret, intention).as_str())
    }

    pub fn is_valid(&self, intention: &str, token: &str) -> bool {
        !token.is_empty()
            && constant_time_eq(self.token(intention).as_bytes(), token.as_bytes())
    }
}

/// Compares without short-circuiting on the first mismatching byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_checks_every_byte() {
        assert!(constant_time_eq(b"abcd", b"abcd"));
        assert!(!constant_time_eq(b"abcd", b"abce"));
        assert!(!constant_time_eq(b"xbcd", b"abcd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn truncated_or_altered_tokens_are_rejected() {
        let csrf = CsrfTokens::new("secret");
        let token = csrf.token("artist");
        assert!(!csrf.is_valid("artist", &token[..token.len() - 1]));
        let mut altered = token.clone();
        altered.replace_range(..1, if token.starts_with('0') { "1" } else { "0" });
        assert!(!csrf.is_valid("artist", &altered));
    }

    #[test]
    fn tokens_are_bound_to_the_intention() {
        let csrf = CsrfTokens::new("secret");
        let token = csrf.token("delete1");
        assert!(csrf.is_valid("delete1", &token));
        assert!(!csrf.is_valid("delete2", &token));
    }

    #[test]
    fn tokens_are_bound_to_the_secret() {
        let token = CsrfTokens::new("one").token("artist");
        assert!(!CsrfTokens::new("two").is_valid("artist", &token));
    }

    #[test]
    fn empty_tokens_are_rejected() {
        assert!(!CsrfTokens::new("secret").is_valid("artist", ""));
    }
}
