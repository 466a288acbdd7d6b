//! Evaluator
//!
//! Decides which cart lines qualify for the volume discount. A line qualifies when
//! its product is eligible and its quantity meets the configured minimum; the
//! qualifying lines, in cart order, become the targets of a single discount.
//!
//! Evaluation is total: an unavailable configuration or a cart with no qualifying
//! lines yields [`DiscountDecision::NoDiscount`], never an error.

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use smallvec::SmallVec;
use tracing::{Span, debug};

use crate::{
    cart::{CartLine, CartSnapshot, LineId},
    configuration::Configuration,
};

/// Qualification outcome for a single cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineVerdict {
    /// The line receives the discount.
    Qualified,

    /// The line has no product, so it is never discounted.
    MissingProduct,

    /// The line's product is not one of the eligible products.
    IneligibleProduct,

    /// The product is eligible but the quantity is below the minimum.
    BelowMinimum {
        /// Quantity on the line
        quantity: u32,

        /// Minimum quantity required
        required: u32,
    },
}

impl LineVerdict {
    /// Return whether the line qualifies.
    pub fn is_qualified(self) -> bool {
        self == Self::Qualified
    }
}

impl fmt::Display for LineVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Qualified => f.write_str("qualified"),
            Self::MissingProduct => f.write_str("no product"),
            Self::IneligibleProduct => f.write_str("product not eligible"),
            Self::BelowMinimum { quantity, required } => {
                write!(f, "quantity {quantity} below minimum {required}")
            }
        }
    }
}

/// A discount applied to the qualifying lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountApplication {
    targets: SmallVec<[LineId; 4]>,
    percent_off: Decimal,
    message: String,
}

impl DiscountApplication {
    /// Lines that receive the discount, in cart order.
    pub fn targets(&self) -> &[LineId] {
        &self.targets
    }

    /// Discount percentage, copied from the configuration.
    pub fn percent_off(&self) -> Decimal {
        self.percent_off
    }

    /// The discount as a fraction of the line price, e.g. `0.1` for 10% off.
    pub fn rate(&self) -> Percentage {
        Percentage::from(self.percent_off / Decimal::ONE_HUNDRED)
    }

    /// Message shown to the customer.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result of evaluating a cart against the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscountDecision {
    /// Nothing qualifies, or there is no usable configuration.
    NoDiscount,

    /// One discount covering every qualifying line.
    Discount(DiscountApplication),
}

impl DiscountDecision {
    /// Return the discount application, if there is one.
    pub fn application(&self) -> Option<&DiscountApplication> {
        match self {
            Self::NoDiscount => None,
            Self::Discount(application) => Some(application),
        }
    }

    /// Return whether a discount applies.
    pub fn is_discount(&self) -> bool {
        matches!(self, Self::Discount(_))
    }
}

/// Classify a single line against the configuration.
pub fn classify(config: &Configuration, line: &CartLine) -> LineVerdict {
    let Some(product) = line.product() else {
        return LineVerdict::MissingProduct;
    };

    if !config.is_eligible(product) {
        return LineVerdict::IneligibleProduct;
    }

    if line.quantity() < config.min_quantity() {
        return LineVerdict::BelowMinimum {
            quantity: line.quantity(),
            required: config.min_quantity(),
        };
    }

    LineVerdict::Qualified
}

/// Classify every line of the cart, in cart order.
///
/// Returns `None` when there is no configuration, since no line can be judged
/// without one.
pub fn explain<'a>(
    config: Option<&Configuration>,
    cart: &'a CartSnapshot,
) -> Option<Vec<(&'a CartLine, LineVerdict)>> {
    let config = config?;

    Some(cart.iter().map(|line| (line, classify(config, line))).collect())
}

/// Evaluate the cart against the configuration.
#[tracing::instrument(
    name = "volume_discount.evaluate",
    skip_all,
    fields(
        lines = cart.len(),
        configured = config.is_some(),
        targets = tracing::field::Empty
    )
)]
pub fn evaluate(config: Option<&Configuration>, cart: &CartSnapshot) -> DiscountDecision {
    let Some(config) = config else {
        debug!("no configuration, no discount");

        return DiscountDecision::NoDiscount;
    };

    let targets: SmallVec<[LineId; 4]> = cart
        .iter()
        .filter(|line| classify(config, line).is_qualified())
        .map(|line| line.id().clone())
        .collect();

    Span::current().record("targets", targets.len());

    if targets.is_empty() {
        debug!("no qualifying lines, no discount");

        return DiscountDecision::NoDiscount;
    }

    debug!(
        percent_off = %config.percent_off(),
        min_quantity = config.min_quantity(),
        "discount applies"
    );

    DiscountDecision::Discount(DiscountApplication {
        targets,
        percent_off: config.percent_off(),
        message: config.message(),
    })
}

/// Parse a stored configuration blob and evaluate the cart against it.
///
/// An unusable blob is logged and results in [`DiscountDecision::NoDiscount`].
pub fn evaluate_blob(blob: Option<&str>, cart: &CartSnapshot) -> DiscountDecision {
    let config = Configuration::load(blob);

    evaluate(config.as_ref(), cart)
}
