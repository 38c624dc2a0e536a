use serde::{Deserialize, Serialize};

use super::domain::RuleType;

/// Headline program suggestion for one country, as surfaced by the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgramRule {
    pub program: &'static str,
    pub rule_type: RuleType,
    pub next_date: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramCountry {
    Canada,
    Australia,
    NewZealand,
    Brazil,
    Chile,
    UnitedStates,
}

impl ProgramCountry {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Canada,
            Self::Australia,
            Self::NewZealand,
            Self::Brazil,
            Self::Chile,
            Self::UnitedStates,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Canada => "Canada",
            Self::Australia => "Australia",
            Self::NewZealand => "New Zealand",
            Self::Brazil => "Brazil",
            Self::Chile => "Chile",
            Self::UnitedStates => "United States",
        }
    }

    const fn territory_prefix(self) -> Option<&'static str> {
        match self {
            Self::Canada => Some("canada"),
            Self::Australia => Some("australia"),
            Self::NewZealand => Some("newzealand"),
            Self::Brazil => Some("brazil"),
            Self::Chile => Some("chile"),
            Self::UnitedStates => None,
        }
    }

    /// Matches territory codes such as `canada-alberta` or `us-iowa` as well as
    /// display names such as `New Zealand`. Anything unrecognized resolves to
    /// the United States table entry.
    pub fn from_territory(code: &str) -> Self {
        let normalized: String = code
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        Self::ordered()
            .into_iter()
            .find(|country| {
                country
                    .territory_prefix()
                    .map_or(false, |prefix| normalized.starts_with(prefix))
            })
            .unwrap_or(Self::UnitedStates)
    }

    pub const fn rule(self) -> ProgramRule {
        match self {
            Self::Canada => ProgramRule {
                program: "Canadian Agricultural Partnership (CAP) - AgriInvest",
                rule_type: RuleType::RankingCutoff,
                next_date: "December 31, 2024",
            },
            Self::Australia => ProgramRule {
                program: "National Landcare Program - Smart Farms Small Grants",
                rule_type: RuleType::RankingCutoff,
                next_date: "February 28, 2025",
            },
            Self::NewZealand => ProgramRule {
                program: "Sustainable Food and Fibre Futures (SFF Futures)",
                rule_type: RuleType::ContinuousSignup,
                next_date: "January 31, 2025",
            },
            Self::Brazil => ProgramRule {
                program: "Plano ABC+ (Agricultura de Baixo Carbono)",
                rule_type: RuleType::ContinuousSignup,
                next_date: "March 1, 2025",
            },
            Self::Chile => ProgramRule {
                program: "SIRSD-S Soil Sustainability Incentive Program",
                rule_type: RuleType::RankingCutoff,
                next_date: "April 15, 2025",
            },
            Self::UnitedStates => ProgramRule {
                program: "Environmental Quality Incentives Program (EQIP)",
                rule_type: RuleType::RankingCutoff,
                next_date: "November 15, 2024",
            },
        }
    }
}

/// Resolve the headline program rule for a raw territory code.
pub fn lookup_program(territory_code: &str) -> ProgramRule {
    ProgramCountry::from_territory(territory_code).rule()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn territory_codes_resolve_by_country_prefix() {
        assert_eq!(
            ProgramCountry::from_territory("canada-alberta"),
            ProgramCountry::Canada
        );
        assert_eq!(
            ProgramCountry::from_territory("australia-nsw"),
            ProgramCountry::Australia
        );
        assert_eq!(
            ProgramCountry::from_territory("newzealand-canterbury"),
            ProgramCountry::NewZealand
        );
        assert_eq!(
            ProgramCountry::from_territory("brazil-mato-grosso"),
            ProgramCountry::Brazil
        );
        assert_eq!(
            ProgramCountry::from_territory("chile-araucania"),
            ProgramCountry::Chile
        );
    }

    #[test]
    fn display_names_resolve_like_codes() {
        assert_eq!(
            ProgramCountry::from_territory("New Zealand"),
            ProgramCountry::NewZealand
        );
        assert_eq!(
            ProgramCountry::from_territory("Canada"),
            ProgramCountry::Canada
        );
    }

    #[test]
    fn unknown_territories_fall_back_to_united_states() {
        for code in ["us-iowa", "us-california", "france-normandy", "", "  "] {
            assert_eq!(
                ProgramCountry::from_territory(code),
                ProgramCountry::UnitedStates,
                "expected fallback for {code:?}"
            );
        }
    }

    #[test]
    fn every_country_has_a_complete_rule() {
        for country in ProgramCountry::ordered() {
            let rule = country.rule();
            assert!(!rule.program.is_empty());
            assert!(!rule.next_date.is_empty());
        }
    }

    #[test]
    fn lookup_returns_the_pinned_us_entry() {
        let rule = lookup_program("us-iowa");
        assert_eq!(
            rule.program,
            "Environmental Quality Incentives Program (EQIP)"
        );
        assert_eq!(rule.rule_type, RuleType::RankingCutoff);
        assert_eq!(rule.next_date, "November 15, 2024");
    }
}
