//! Chip label to partner-name variants

/// Fixed lookup from a filter chip label to the raw partner names it covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartnerMapping {
    entries: Vec<(String, Vec<String>)>,
}

impl PartnerMapping {
    pub fn new(entries: Vec<(String, Vec<String>)>) -> Self {
        Self { entries }
    }

    /// Partner variants for `label`; empty when the chip is unmapped
    pub fn targets(&self, label: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(chip, _)| chip == label)
            .map(|(_, targets)| targets.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_mapped(&self, label: &str) -> bool {
        !self.targets(label).is_empty()
    }

    pub fn builtin() -> Self {
        let entry = |chip: &str, targets: &[&str]| {
            (
                chip.to_string(),
                targets.iter().map(|t| t.to_string()).collect(),
            )
        };
        Self::new(vec![
            entry("Child Welfare (CW)", &["CWS", "Child Welfare", "CW"]),
            entry("Probation", &["Probation"]),
            entry(
                "Behavioral Health (BH)",
                &[
                    "Mental Health Plan (MHP)",
                    "BH",
                    "Behavioral Health",
                    "County SUD",
                ],
            ),
            entry(
                "Developmental Services",
                &["Regional Center", "Developmental Services"],
            ),
            entry("Education", &["Education", "Educational"]),
        ])
    }
}

impl Default for PartnerMapping {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::state::{ALL_CHIP, FILTER_CHIPS};

    #[test]
    fn test_every_chip_but_all_is_mapped() {
        let mapping = PartnerMapping::builtin();
        for chip in FILTER_CHIPS.iter().filter(|c| **c != ALL_CHIP) {
            assert!(mapping.is_mapped(chip), "{chip} should be mapped");
        }
        assert!(!mapping.is_mapped(ALL_CHIP));
    }

    #[test]
    fn test_unmapped_label_has_no_targets() {
        assert!(PartnerMapping::builtin().targets("Housing").is_empty());
    }
}
