use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Healthcare compliance standard selectable by the user.
///
/// The standard only affects prompt phrasing; the pipeline itself does not
/// branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ComplianceStandard {
    Hipaa,
    Fda21CfrPart11,
    Iec62304,
    Iso13485,
}

impl ComplianceStandard {
    pub fn all() -> [ComplianceStandard; 4] {
        [
            ComplianceStandard::Hipaa,
            ComplianceStandard::Fda21CfrPart11,
            ComplianceStandard::Iec62304,
            ComplianceStandard::Iso13485,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ComplianceStandard::Hipaa => "HIPAA",
            ComplianceStandard::Fda21CfrPart11 => "FDA 21 CFR Part 11",
            ComplianceStandard::Iec62304 => "IEC 62304",
            ComplianceStandard::Iso13485 => "ISO 13485",
        }
    }

    /// Standard-specific emphasis injected into the generation prompt.
    pub fn focus_clause(&self) -> &'static str {
        match self {
            ComplianceStandard::Hipaa => {
                "protection of PHI, minimum-necessary access controls, audit trails, \
                 and breach notification handling"
            }
            ComplianceStandard::Fda21CfrPart11 => {
                "electronic records integrity, electronic signatures, system validation, \
                 and tamper-evident audit trails"
            }
            ComplianceStandard::Iec62304 => {
                "software safety classification, risk control measures, and software \
                 lifecycle verification activities for medical device software"
            }
            ComplianceStandard::Iso13485 => {
                "quality management system controls, design verification, and \
                 documented traceability for medical devices"
            }
        }
    }
}

impl fmt::Display for ComplianceStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ComplianceStandard {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        match normalized.as_str() {
            "hipaa" => Ok(ComplianceStandard::Hipaa),
            "fda21cfrpart11" | "fda" | "21cfrpart11" => Ok(ComplianceStandard::Fda21CfrPart11),
            "iec62304" | "iec" => Ok(ComplianceStandard::Iec62304),
            "iso13485" | "iso" => Ok(ComplianceStandard::Iso13485),
            _ => Err(format!("Unknown compliance standard: {}", value)),
        }
    }
}

impl TryFrom<String> for ComplianceStandard {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ComplianceStandard> for String {
    fn from(value: ComplianceStandard) -> Self {
        value.display_name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trip() {
        for standard in ComplianceStandard::all() {
            let parsed: ComplianceStandard = standard.display_name().parse().unwrap();
            assert_eq!(parsed, standard);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(
            "fda-21-cfr-part-11".parse::<ComplianceStandard>().unwrap(),
            ComplianceStandard::Fda21CfrPart11
        );
        assert_eq!(
            "iec 62304".parse::<ComplianceStandard>().unwrap(),
            ComplianceStandard::Iec62304
        );
        assert!("gdpr".parse::<ComplianceStandard>().is_err());
    }

    #[test]
    fn test_serde_uses_display_name() {
        let json = serde_json::to_string(&ComplianceStandard::Hipaa).unwrap();
        assert_eq!(json, "\"HIPAA\"");

        let parsed: ComplianceStandard =
            serde_json::from_str("\"FDA 21 CFR Part 11\"").unwrap();
        assert_eq!(parsed, ComplianceStandard::Fda21CfrPart11);
    }
}
