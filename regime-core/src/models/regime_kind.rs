use std::fmt;

use serde::{Deserialize, Serialize};

/// The statutory tax regimes the engine knows how to evaluate.
///
/// Declaration order is significant: it is the tie-break order used when
/// ranking regimes with an equal tax burden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegimeKind {
    /// Flat-rate simplified regime for self-employed individuals.
    SimplifiedIndividual,
    /// Flat-rate simplified (retail) regime for proprietors, companies and farms.
    SimplifiedEntity,
    /// Profit tax for sole proprietors.
    GeneralProprietor,
    /// Corporate income tax for companies.
    GeneralCompany,
}

impl RegimeKind {
    /// Every regime, in enumeration order.
    pub const ALL: [RegimeKind; 4] = [
        RegimeKind::SimplifiedIndividual,
        RegimeKind::SimplifiedEntity,
        RegimeKind::GeneralProprietor,
        RegimeKind::GeneralCompany,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SimplifiedIndividual => "snr_individual",
            Self::SimplifiedEntity => "snr_entity",
            Self::GeneralProprietor => "general_ip",
            Self::GeneralCompany => "general_too",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "snr_individual" => Some(Self::SimplifiedIndividual),
            "snr_entity" => Some(Self::SimplifiedEntity),
            "general_ip" => Some(Self::GeneralProprietor),
            "general_too" => Some(Self::GeneralCompany),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SimplifiedIndividual => "Simplified regime (self-employed)",
            Self::SimplifiedEntity => "Simplified regime (retail)",
            Self::GeneralProprietor => "General regime (sole proprietor)",
            Self::GeneralCompany => "General regime (company)",
        }
    }

    /// Flat-rate regimes subject to the simplified income ceilings.
    pub fn is_simplified(&self) -> bool {
        matches!(self, Self::SimplifiedIndividual | Self::SimplifiedEntity)
    }

    /// Position in [`RegimeKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for RegimeKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn all_is_in_declaration_order() {
        for (position, kind) in RegimeKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), position);
        }
        let mut sorted = RegimeKind::ALL;
        sorted.sort();
        assert_eq!(sorted, RegimeKind::ALL);
    }

    #[test]
    fn parse_round_trips_codes() {
        for kind in RegimeKind::ALL {
            assert_eq!(RegimeKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(RegimeKind::parse("patent"), None);
    }

    #[test]
    fn only_flat_rate_regimes_are_simplified() {
        assert!(RegimeKind::SimplifiedIndividual.is_simplified());
        assert!(RegimeKind::SimplifiedEntity.is_simplified());
        assert!(!RegimeKind::GeneralProprietor.is_simplified());
        assert!(!RegimeKind::GeneralCompany.is_simplified());
    }
}
