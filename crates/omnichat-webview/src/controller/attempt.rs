/// Monotonic per-slot counter identifying the current creation attempt.
///
/// Advanced on activate, retry, deactivate and drop. An asynchronous
/// continuation carrying an older value must not touch slot state.
#[derive(Debug, Default)]
pub(crate) struct AttemptToken {
    current: u64,
}

impl AttemptToken {
    pub fn advance(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.current == token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advancing_invalidates_previous_tokens() {
        let mut attempt = AttemptToken::default();
        let first = attempt.advance();
        assert!(attempt.is_current(first));

        let second = attempt.advance();
        assert!(second > first);
        assert!(!attempt.is_current(first));
        assert!(attempt.is_current(second));
        assert_eq!(attempt.current(), second);
    }
}
