use std::fmt;

use serde::{Deserialize, Serialize};

/// Legal form of the business entity being assessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Individual,
    SoleProprietor,
    Company,
    Farm,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::SoleProprietor => "ip",
            Self::Company => "too",
            Self::Farm => "kh",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "individual" => Some(Self::Individual),
            "ip" => Some(Self::SoleProprietor),
            "too" => Some(Self::Company),
            "kh" => Some(Self::Farm),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::SoleProprietor => "Sole proprietor",
            Self::Company => "Company",
            Self::Farm => "Farm",
        }
    }

    /// Whether payroll, expenses and amortization are collected for this entity.
    ///
    /// An individual only reports them when it has employees.
    pub fn reports_costs(
        &self,
        has_employees: bool,
    ) -> bool {
        !matches!(self, Self::Individual) || has_employees
    }
}

impl fmt::Display for EntityType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}
