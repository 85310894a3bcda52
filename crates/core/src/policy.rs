use crate::numbering::to_roman;

/// Pagination and numbering rules of one report type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationPolicy {
    /// Force a page break after every N items of a container, if more remain.
    pub break_every: Option<usize>,
    /// Fixed headings that precede the first dynamic section.
    pub numbering_start_offset: usize,
    /// Break before a section when the previous one had findings.
    pub break_between_sections: bool,
}

impl PaginationPolicy {
    pub const PENDENCY_REPORT: PaginationPolicy = PaginationPolicy {
        break_every: Some(2),
        numbering_start_offset: 0,
        break_between_sections: true,
    };

    pub const TECHNICAL_OPINION: PaginationPolicy = PaginationPolicy {
        break_every: None,
        numbering_start_offset: 2,
        break_between_sections: false,
    };

    /// Numeral of the dynamic section at zero-based `index`.
    pub fn section_numeral(&self, index: usize) -> String {
        to_roman((self.numbering_start_offset + 1 + index) as u32)
    }

    /// Whether a break follows the `processed`-th item of a container with
    /// `remaining` items still to go.
    pub fn break_after(&self, processed: usize, remaining: usize) -> bool {
        match self.break_every {
            Some(n) if n > 0 => processed > 0 && processed % n == 0 && remaining > 0,
            _ => false,
        }
    }

    /// Whether section `index` is preceded by a break.
    pub fn break_before_section(&self, index: usize, previous_had_findings: bool) -> bool {
        self.break_between_sections && index > 0 && previous_had_findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pendency_breaks_every_two_only_when_more_remain() {
        let policy = PaginationPolicy::PENDENCY_REPORT;
        let breaks: Vec<bool> = (1..=3).map(|i| policy.break_after(i, 3 - i)).collect();
        assert_eq!(breaks, vec![false, true, false]);

        let breaks: Vec<bool> = (1..=4).map(|i| policy.break_after(i, 4 - i)).collect();
        assert_eq!(breaks, vec![false, true, false, false]);
    }

    #[test]
    fn opinion_never_forces_item_breaks() {
        let policy = PaginationPolicy::TECHNICAL_OPINION;
        assert!(!(1..10).any(|i| policy.break_after(i, 5)));
        assert!(!policy.break_before_section(3, true));
    }

    #[test]
    fn numerals_honour_the_offset() {
        assert_eq!(PaginationPolicy::PENDENCY_REPORT.section_numeral(0), "I");
        assert_eq!(PaginationPolicy::TECHNICAL_OPINION.section_numeral(0), "III");
        assert_eq!(PaginationPolicy::TECHNICAL_OPINION.section_numeral(2), "V");
    }

    #[test]
    fn section_breaks_follow_previous_findings() {
        let policy = PaginationPolicy::PENDENCY_REPORT;
        assert!(!policy.break_before_section(0, true));
        assert!(policy.break_before_section(1, true));
        assert!(!policy.break_before_section(1, false));
    }
}
