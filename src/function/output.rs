//! Function Output
//!
//! The output document read by the discount application consumer. The two
//! protocol versions differ only in the envelope: the legacy run result also
//! names a discount application strategy.

use serde::Serialize;

use crate::evaluator::{DiscountApplication, DiscountDecision};

/// Consumer protocol version the output is formatted for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Protocol {
    /// Cart lines discounts generate run result (no strategy field).
    #[default]
    CartLinesDiscountsGenerate,

    /// Legacy product discount run result, with `discountApplicationStrategy`.
    LegacyRun,
}

impl Protocol {
    /// Return the strategy the envelope carries, if any.
    pub fn strategy(self) -> Option<DiscountApplicationStrategy> {
        match self {
            Self::CartLinesDiscountsGenerate => None,
            Self::LegacyRun => Some(DiscountApplicationStrategy::First),
        }
    }

    /// Format a decision for this protocol.
    pub fn format(self, decision: &DiscountDecision) -> FunctionResult {
        FunctionResult {
            discount_application_strategy: self.strategy(),
            discounts: decision
                .application()
                .map(DiscountOutput::from)
                .into_iter()
                .collect(),
        }
    }
}

/// How the consumer picks between competing discounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountApplicationStrategy {
    /// Apply the first discount.
    First,
}

/// Root of the output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResult {
    /// Strategy, only present for [`Protocol::LegacyRun`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_application_strategy: Option<DiscountApplicationStrategy>,

    /// Zero or one discounts
    pub discounts: Vec<DiscountOutput>,
}

impl FunctionResult {
    /// The "no discount" result for a protocol.
    pub fn empty(protocol: Protocol) -> Self {
        protocol.format(&DiscountDecision::NoDiscount)
    }
}

/// A single discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscountOutput {
    /// Lines the discount applies to
    pub targets: Vec<Target>,

    /// Discount value
    pub value: Value,

    /// Message shown to the customer
    pub message: String,
}

impl From<&DiscountApplication> for DiscountOutput {
    fn from(application: &DiscountApplication) -> Self {
        Self {
            targets: application
                .targets()
                .iter()
                .map(|id| Target {
                    cart_line: CartLineTarget {
                        id: id.to_string(),
                    },
                })
                .collect(),
            value: Value {
                percentage: PercentageValue {
                    value: application.percent_off().to_string(),
                },
            },
            message: application.message().to_string(),
        }
    }
}

/// Discount target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    /// Targeted cart line
    pub cart_line: CartLineTarget,
}

/// Cart line target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineTarget {
    /// Cart line identifier
    pub id: String,
}

/// Discount value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Value {
    /// Percentage off
    pub percentage: PercentageValue,
}

/// Percentage value, serialized as a decimal string (`"10"`, `"12.5"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PercentageValue {
    /// Percentage as a string
    pub value: String,
}
