//! The pendency-report record handed over by the portal.
//!
//! Every type here is read-only input. Finding numbers are never stored:
//! they are derived during assembly from traversal order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Metadata shared by every report type: who it is for, when and by whom.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportMeta {
    /// Name of the condominium the inspection was carried out at.
    pub condominium: String,
    /// Overrides the configured revision label when present.
    pub revision: Option<String>,
    /// Issue date. When absent the generation date is used.
    pub issued_on: Option<NaiveDate>,
    /// Engineer or company responsible for the inspection.
    pub responsible: Option<String>,
}

/// A hierarchical pendency report: sections, subsections and findings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub title: String,
    #[serde(default)]
    pub meta: ReportMeta,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub narrative: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Report {
    /// Recursive count of every finding, direct and nested.
    pub fn finding_count(&self) -> usize {
        self.sections.iter().map(Section::finding_count).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub title: String,
    /// Findings attached directly to the section; traversed before subsections.
    #[serde(default)]
    pub findings: Vec<Finding>,
    #[serde(default)]
    pub subsections: Vec<Subsection>,
}

impl Section {
    pub fn finding_count(&self) -> usize {
        self.findings.len()
            + self
                .subsections
                .iter()
                .map(|s| s.findings.len())
                .sum::<usize>()
    }

    pub fn has_findings(&self) -> bool {
        self.finding_count() > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subsection {
    pub title: String,
    #[serde(default)]
    pub findings: Vec<Finding>,
}

/// A single recorded non-conformance ("pendency").
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub before_image: Option<String>,
    #[serde(default)]
    pub after_image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding() -> Finding {
        Finding {
            location: "Roof".into(),
            description: "Loose tile".into(),
            ..Default::default()
        }
    }

    #[test]
    fn counts_direct_and_nested_findings() {
        let report = Report {
            title: "Inspection".into(),
            sections: vec![
                Section {
                    title: "Structure".into(),
                    findings: vec![finding(), finding()],
                    subsections: vec![Subsection {
                        title: "Roof".into(),
                        findings: vec![finding()],
                    }],
                },
                Section {
                    title: "Empty".into(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        assert_eq!(report.finding_count(), 3);
        assert!(report.sections[0].has_findings());
        assert!(!report.sections[1].has_findings());
    }

    #[test]
    fn deserializes_camel_case_with_missing_collections() {
        let json = r#"{
            "title": "Pendencies",
            "meta": { "condominium": "Ed. Aurora", "issuedOn": "2024-03-01" },
            "sections": [
                { "title": "Facade", "findings": [
                    {
                        "location": "North wall",
                        "description": "Crack",
                        "beforeImage": "https://cdn/1.jpg"
                    }
                ] },
                { "title": "Garage" }
            ]
        }"#;

        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.meta.condominium, "Ed. Aurora");
        assert_eq!(report.meta.issued_on, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(
            report.sections[0].findings[0].before_image.as_deref(),
            Some("https://cdn/1.jpg")
        );
        assert!(report.sections[0].findings[0].after_image.is_none());
        assert!(report.sections[1].subsections.is_empty());
        assert_eq!(report.finding_count(), 1);
    }
}
