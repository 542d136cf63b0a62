//! Display names for partner codes

const FULL_NAMES: [(&str, &str); 5] = [
    ("TAH", "Tribally Approved Home (TAH)"),
    ("RFA", "Resource Family Approval (RFA)"),
    ("CWS", "Child Welfare Services (CWS)"),
    ("MHP", "Mental Health Plan (MHP)"),
    ("ASAM", "American Society of Addiction Medicine (ASAM)"),
];

/// Full name for a known partner code, otherwise the raw value
pub fn partner_full_name(partner: &str) -> &str {
    FULL_NAMES
        .iter()
        .find(|(code, _)| *code == partner)
        .map(|(_, name)| *name)
        .unwrap_or(partner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_expand() {
        assert_eq!(partner_full_name("MHP"), "Mental Health Plan (MHP)");
        assert_eq!(partner_full_name("CWS"), "Child Welfare Services (CWS)");
    }

    #[test]
    fn test_unknown_partner_is_unchanged() {
        assert_eq!(partner_full_name("Probation"), "Probation");
        assert_eq!(partner_full_name("mhp"), "mhp");
    }
}
