/// Replace `_` separators with spaces (`billing_issue` → `billing issue`).
#[must_use]
pub fn humanize(label: &str) -> String {
    label.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("billing_issue"), "billing issue");
        assert_eq!(humanize("service__delay"), "service  delay");
        assert_eq!(humanize("cleanliness"), "cleanliness");
        assert_eq!(humanize(""), "");
    }
}
