//! Structural eligibility of an entity for each regime.
//!
//! Rules, in precedence order:
//!
//! 1. An individual may only use the self-employed simplified regime, and
//!    only without employees.
//! 2. Sole proprietors, companies and farms may use the retail simplified
//!    regime; sole proprietors and companies also have their general regime.
//! 3. Annual income above the simplified ceiling removes both simplified
//!    regimes.
//!
//! Exceeding the *monthly* ceiling is not an exclusion here; the tax rules
//! report it as a warning only.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{EntityType, RegimeConfig, RegimeKind, UnavailableReason};

/// Evaluator for regime eligibility.
#[derive(Debug, Clone)]
pub struct EligibilityEvaluator<'a> {
    config: &'a RegimeConfig,
}

impl<'a> EligibilityEvaluator<'a> {
    pub fn new(config: &'a RegimeConfig) -> Self {
        Self { config }
    }

    /// Checks whether `entity` may elect `kind`.
    ///
    /// # Errors
    ///
    /// Returns the [`UnavailableReason`] of the first rule that excludes it.
    pub fn assess(
        &self,
        kind: RegimeKind,
        entity: EntityType,
        has_employees: bool,
        income_annual: Decimal,
    ) -> Result<(), UnavailableReason> {
        self.structural(kind, entity, has_employees)?;

        if kind.is_simplified() && income_annual > self.config.simplified_annual_ceiling {
            return Err(UnavailableReason::AnnualCeilingExceeded {
                income: income_annual,
                ceiling: self.config.simplified_annual_ceiling,
            });
        }

        Ok(())
    }

    /// Regimes `entity` may elect, in enumeration order.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use regime_core::{EntityType, RegimeConfig, RegimeKind};
    /// use regime_core::calculations::EligibilityEvaluator;
    ///
    /// let config = RegimeConfig::default();
    /// let evaluator = EligibilityEvaluator::new(&config);
    ///
    /// let kinds = evaluator.eligible_regimes(EntityType::Company, true, dec!(50000000));
    /// assert_eq!(kinds, vec![RegimeKind::SimplifiedEntity, RegimeKind::GeneralCompany]);
    /// ```
    pub fn eligible_regimes(
        &self,
        entity: EntityType,
        has_employees: bool,
        income_annual: Decimal,
    ) -> Vec<RegimeKind> {
        RegimeKind::ALL
            .into_iter()
            .filter(|&kind| match self.assess(kind, entity, has_employees, income_annual) {
                Ok(()) => true,
                Err(reason) => {
                    debug!(
                        regime = kind.as_str(),
                        entity = entity.as_str(),
                        %reason,
                        "regime excluded"
                    );
                    false
                }
            })
            .collect()
    }

    fn structural(
        &self,
        kind: RegimeKind,
        entity: EntityType,
        has_employees: bool,
    ) -> Result<(), UnavailableReason> {
        let allowed = match kind {
            RegimeKind::SimplifiedIndividual => {
                if entity == EntityType::Individual && has_employees {
                    return Err(UnavailableReason::EmployeesNotPermitted);
                }
                entity == EntityType::Individual
            }
            RegimeKind::SimplifiedEntity => matches!(
                entity,
                EntityType::SoleProprietor | EntityType::Company | EntityType::Farm
            ),
            RegimeKind::GeneralProprietor => entity == EntityType::SoleProprietor,
            RegimeKind::GeneralCompany => entity == EntityType::Company,
        };

        if allowed {
            Ok(())
        } else {
            Err(UnavailableReason::EntityTypeNotEligible { entity })
        }
    }
}
