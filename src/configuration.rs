//! Configuration
//!
//! The merchant's volume discount rule. It is stored as an opaque JSON blob under
//! [`METAFIELD_NAMESPACE`]/[`METAFIELD_KEY`] and only becomes meaningful here,
//! where it is either validated into a [`Configuration`] or rejected as a whole.

use std::{num::NonZeroU32, str::FromStr};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use thiserror::Error;
use tracing::warn;

use crate::cart::ProductId;

/// Namespace of the store entry holding the configuration.
pub const METAFIELD_NAMESPACE: &str = "volume_discount";

/// Key of the store entry holding the configuration.
pub const METAFIELD_KEY: &str = "rules";

/// Minimum quantity written by the editor.
pub const DEFAULT_MIN_QUANTITY: u32 = 2;

/// Percent off shown by the editor when nothing has been saved yet.
pub const DEFAULT_PERCENT_OFF: u32 = 10;

/// Smallest percentage the editor accepts.
pub const MIN_PERCENT_OFF: Decimal = Decimal::ONE;

/// Largest percentage the editor accepts.
pub const MAX_PERCENT_OFF: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

/// Reasons a configuration is unavailable, or rejected by the editor.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Nothing is stored, or the stored value is empty.
    #[error("no configuration found")]
    Missing,

    /// The blob is not JSON of the expected shape.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The product list is missing or empty.
    #[error("configuration has no eligible products")]
    NoProducts,

    /// `minQty` is missing, or not a positive integer.
    #[error("minimum quantity is missing or not a positive integer")]
    InvalidMinQuantity,

    /// `percentOff` is missing, or not a positive number.
    #[error("percent off is missing or not a positive number")]
    InvalidPercentOff,

    /// `percentOff` is outside the range the editor allows.
    #[error("percent off {0} is outside the allowed range of 1 to 80")]
    PercentOffOutOfRange(Decimal),
}

/// Wire form of the configuration: `{ "products": [..], "minQty": 2, "percentOff": 10 }`.
///
/// This is what the editor reads and writes. Numbers are kept as written so the
/// stored blob round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationDocument {
    /// Eligible product identifiers
    #[serde(default)]
    pub products: Vec<String>,

    /// Minimum line quantity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_qty: Option<Number>,

    /// Discount percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_off: Option<Number>,
}

impl Default for ConfigurationDocument {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            min_qty: Some(Number::from(DEFAULT_MIN_QUANTITY)),
            percent_off: Some(Number::from(DEFAULT_PERCENT_OFF)),
        }
    }
}

impl ConfigurationDocument {
    /// Build the document the editor saves: the selected products and percentage,
    /// with the minimum quantity fixed at [`DEFAULT_MIN_QUANTITY`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::PercentOffOutOfRange`] if `percent_off` is
    /// outside [`MIN_PERCENT_OFF`]..=[`MAX_PERCENT_OFF`].
    pub fn new(
        products: impl IntoIterator<Item = impl Into<String>>,
        percent_off: u32,
    ) -> Result<Self, ConfigurationError> {
        let document = Self {
            products: products.into_iter().map(Into::into).collect(),
            min_qty: Some(Number::from(DEFAULT_MIN_QUANTITY)),
            percent_off: Some(Number::from(percent_off)),
        };

        document.validate()?;

        Ok(document)
    }

    /// Read a stored blob for editing, falling back to the default document when
    /// nothing usable is stored.
    pub fn from_blob_or_default(blob: Option<&str>) -> Self {
        let Some(blob) = blob.filter(|blob| !blob.is_empty()) else {
            return Self::default();
        };

        serde_json::from_str(blob).unwrap_or_else(|error| {
            warn!(%error, "failed to parse stored configuration, using defaults");

            Self::default()
        })
    }

    /// Check the document against the editor's rules: a positive integer minimum
    /// quantity and a percentage within the allowed range. An empty product list
    /// is allowed here; it simply never produces a discount.
    ///
    /// # Errors
    ///
    /// Returns the first rule the document breaks.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        min_quantity(self.min_qty.as_ref())?;

        let percent_off = percent_off(self.percent_off.as_ref())?;

        if !(MIN_PERCENT_OFF..=MAX_PERCENT_OFF).contains(&percent_off) {
            return Err(ConfigurationError::PercentOffOutOfRange(percent_off));
        }

        Ok(())
    }

    /// Serialize to the JSON blob stored under [`METAFIELD_NAMESPACE`]/[`METAFIELD_KEY`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Json`] if serialization fails.
    pub fn to_blob(&self) -> Result<String, ConfigurationError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A validated volume discount rule.
///
/// There is no partially valid configuration: a value of this type always has at
/// least one eligible product, a positive minimum quantity and a positive
/// percentage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    eligible_products: FxHashSet<ProductId>,
    min_quantity: NonZeroU32,
    percent_off: Decimal,
}

impl Configuration {
    /// Create a configuration from its parts.
    ///
    /// # Errors
    ///
    /// Returns an error if `products` is empty, `min_quantity` is zero or
    /// `percent_off` is not positive.
    pub fn new(
        products: impl IntoIterator<Item = impl Into<ProductId>>,
        min_quantity: u32,
        percent_off: Decimal,
    ) -> Result<Self, ConfigurationError> {
        let eligible_products: FxHashSet<ProductId> =
            products.into_iter().map(Into::into).collect();

        if eligible_products.is_empty() {
            return Err(ConfigurationError::NoProducts);
        }

        let min_quantity =
            NonZeroU32::new(min_quantity).ok_or(ConfigurationError::InvalidMinQuantity)?;

        if percent_off <= Decimal::ZERO {
            return Err(ConfigurationError::InvalidPercentOff);
        }

        Ok(Self {
            eligible_products,
            min_quantity,
            percent_off: percent_off.normalize(),
        })
    }

    /// Parse and validate a stored configuration blob.
    ///
    /// # Errors
    ///
    /// Returns the reason the blob cannot be used. Every variant means the same
    /// thing to the evaluator: no configuration, so no discount.
    pub fn parse(blob: Option<&str>) -> Result<Self, ConfigurationError> {
        let blob = blob
            .filter(|blob| !blob.is_empty())
            .ok_or(ConfigurationError::Missing)?;

        let document: ConfigurationDocument = serde_json::from_str(blob)?;

        Self::try_from(document)
    }

    /// Parse a stored configuration blob, logging and discarding the reason if it
    /// cannot be used.
    pub fn load(blob: Option<&str>) -> Option<Self> {
        Self::parse(blob)
            .inspect_err(|error| warn!(%error, "volume discount configuration unavailable"))
            .ok()
    }

    /// Return whether a product is eligible for the discount.
    pub fn is_eligible(&self, product: &ProductId) -> bool {
        self.eligible_products.contains(product)
    }

    /// Iterate over the eligible products, in no particular order.
    pub fn eligible_products(&self) -> impl Iterator<Item = &ProductId> {
        self.eligible_products.iter()
    }

    /// Return the minimum quantity a line needs to qualify.
    pub fn min_quantity(&self) -> u32 {
        self.min_quantity.get()
    }

    /// Return the discount percentage, e.g. `10` for 10% off.
    pub fn percent_off(&self) -> Decimal {
        self.percent_off
    }

    /// Return the message shown to the customer, e.g. `Buy 2, get 10% off`.
    pub fn message(&self) -> String {
        format!("Buy {}, get {}% off", self.min_quantity, self.percent_off)
    }
}

impl TryFrom<ConfigurationDocument> for Configuration {
    type Error = ConfigurationError;

    fn try_from(document: ConfigurationDocument) -> Result<Self, Self::Error> {
        if document.products.is_empty() {
            return Err(ConfigurationError::NoProducts);
        }

        let min_quantity = min_quantity(document.min_qty.as_ref())?;
        let percent_off = percent_off(document.percent_off.as_ref())?;

        Self::new(document.products, min_quantity, percent_off)
    }
}

fn min_quantity(number: Option<&Number>) -> Result<u32, ConfigurationError> {
    number
        .and_then(to_decimal)
        .filter(|quantity| quantity.is_integer() && *quantity >= Decimal::ONE)
        .and_then(|quantity| quantity.to_u32())
        .ok_or(ConfigurationError::InvalidMinQuantity)
}

fn percent_off(number: Option<&Number>) -> Result<Decimal, ConfigurationError> {
    number
        .and_then(to_decimal)
        .filter(|percent| *percent > Decimal::ZERO)
        .map(|percent| percent.normalize())
        .ok_or(ConfigurationError::InvalidPercentOff)
}

/// Convert a JSON number to a decimal, accepting exponent notation.
fn to_decimal(number: &Number) -> Option<Decimal> {
    let text = number.to_string();

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
