use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The levies a paycheck is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Federal,
    State,
    Medicare,
    SocialSecurity,
}

impl ComponentKind {
    pub fn all() -> &'static [ComponentKind] {
        &[
            ComponentKind::Federal,
            ComponentKind::State,
            ComponentKind::Medicare,
            ComponentKind::SocialSecurity,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::Federal => "Federal",
            ComponentKind::State => "State",
            ComponentKind::Medicare => "Medicare",
            ComponentKind::SocialSecurity => "Social Security",
        }
    }
}

/// One named tax amount fed to the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComponent {
    pub kind: ComponentKind,
    pub amount: Decimal,
}

impl TaxComponent {
    pub fn new(
        kind: ComponentKind,
        amount: Decimal,
    ) -> Self {
        Self { kind, amount }
    }
}

/// Aggregated liability and net pay for one gross income.
///
/// Every amount is rounded to cents. Values are derived by
/// [`aggregate`](crate::calculations::aggregate) and cannot be set
/// independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxResult {
    pub(crate) federal: Decimal,
    pub(crate) state: Decimal,
    pub(crate) medicare: Decimal,
    pub(crate) social_security: Decimal,
    pub(crate) total: Decimal,
    pub(crate) net: Decimal,
}

impl TaxResult {
    pub fn federal(&self) -> Decimal {
        self.federal
    }

    pub fn state(&self) -> Decimal {
        self.state
    }

    pub fn medicare(&self) -> Decimal {
        self.medicare
    }

    pub fn social_security(&self) -> Decimal {
        self.social_security
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn net(&self) -> Decimal {
        self.net
    }

    /// Gross income the result was computed from.
    pub fn gross(&self) -> Decimal {
        self.total + self.net
    }

    pub fn amount(
        &self,
        kind: ComponentKind,
    ) -> Decimal {
        match kind {
            ComponentKind::Federal => self.federal,
            ComponentKind::State => self.state,
            ComponentKind::Medicare => self.medicare,
            ComponentKind::SocialSecurity => self.social_security,
        }
    }

    /// Total liability as a fraction of gross income, zero for zero gross.
    pub fn effective_rate(&self) -> Decimal {
        let gross = self.gross();
        if gross.is_zero() {
            Decimal::ZERO
        } else {
            self.total / gross
        }
    }
}
