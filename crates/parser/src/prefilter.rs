use crate::outcome::RejectReason;
use crate::rules::SIGNAL_KEYWORDS;

/// Cheap first gate: a signal always mentions at least one trading keyword.
/// Keeps the per-line structural scan off obviously irrelevant chatter.
pub fn require_keyword(text: &str) -> Result<(), RejectReason> {
    let lower = text.to_lowercase();
    if SIGNAL_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        Ok(())
    } else {
        Err(RejectReason::NoKeyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_text_with_any_keyword() {
        assert!(require_keyword("GOLD BUY 3373.33").is_ok());
        assert!(require_keyword("tp soon").is_ok());
        assert!(require_keyword("going SHORT here").is_ok());
    }

    #[test]
    fn rejects_text_without_keywords() {
        assert_eq!(
            require_keyword("Subscribe to our channel for more signals"),
            Err(RejectReason::NoKeyword)
        );
        assert_eq!(
            require_keyword("good morning everyone"),
            Err(RejectReason::NoKeyword)
        );
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        assert!(require_keyword("ENTRY incoming").is_ok());
    }
}
