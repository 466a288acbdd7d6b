//! Function Input
//!
//! The input document supplied by the cart source. Every level of nesting that
//! the cart source may omit is optional here.

use serde::Deserialize;

use crate::cart::{CartLine, CartSnapshot};

/// Root of the input document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunInput {
    /// The discount definition the configuration is attached to
    #[serde(default)]
    pub discount_node: Option<DiscountNode>,

    /// The cart being priced
    #[serde(default)]
    pub cart: CartInput,
}

impl RunInput {
    /// Return the stored configuration blob, if there is one.
    pub fn configuration_blob(&self) -> Option<&str> {
        self.discount_node
            .as_ref()
            .and_then(|node| node.metafield.as_ref())
            .and_then(|metafield| metafield.value.as_deref())
    }

    /// Build the cart snapshot handed to the evaluator.
    pub fn cart_snapshot(&self) -> CartSnapshot {
        CartSnapshot::from(&self.cart)
    }
}

/// Discount definition node.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscountNode {
    /// Metafield holding the configuration
    #[serde(default)]
    pub metafield: Option<Metafield>,
}

/// Metafield value as stored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metafield {
    /// Serialized configuration
    #[serde(default)]
    pub value: Option<String>,
}

/// Cart section of the input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartInput {
    /// Cart lines in cart order
    #[serde(default)]
    pub lines: Vec<CartLineInput>,
}

/// A single cart line.
#[derive(Debug, Clone, Deserialize)]
pub struct CartLineInput {
    /// Line identifier
    pub id: String,

    /// Quantity on the line
    pub quantity: u32,

    /// What the line sells
    #[serde(default)]
    pub merchandise: Option<Merchandise>,
}

/// Merchandise on a cart line. Only product variants carry a product.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Merchandise {
    /// Product the merchandise belongs to
    #[serde(default)]
    pub product: Option<ProductRef>,
}

/// Reference to a product. The identifier may be absent or null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductRef {
    /// Product identifier
    #[serde(default)]
    pub id: Option<String>,
}

impl From<&CartLineInput> for CartLine {
    fn from(line: &CartLineInput) -> Self {
        let product = line
            .merchandise
            .as_ref()
            .and_then(|merchandise| merchandise.product.as_ref())
            .and_then(|product| product.id.as_deref())
            .filter(|id| !id.is_empty());

        match product {
            Some(product) => CartLine::new(line.id.as_str(), product, line.quantity),
            None => CartLine::without_product(line.id.as_str(), line.quantity),
        }
    }
}

impl From<&CartInput> for CartSnapshot {
    fn from(cart: &CartInput) -> Self {
        cart.lines.iter().map(CartLine::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::cart::ProductId;

    use super::*;

    #[test]
    fn deserializes_full_input() -> TestResult {
        let input: RunInput = serde_json::from_str(
            r#"{
                "discountNode": {
                    "metafield": {
                        "value": "{\"products\":[\"gid://shopify/Product/1\"],\"minQty\":2,\"percentOff\":10}"
                    }
                },
                "cart": {
                    "lines": [
                        {
                            "id": "gid://shopify/CartLine/1",
                            "quantity": 2,
                            "merchandise": {
                                "__typename": "ProductVariant",
                                "product": { "id": "gid://shopify/Product/1" }
                            }
                        },
                        {
                            "id": "gid://shopify/CartLine/2",
                            "quantity": 1,
                            "merchandise": { "__typename": "CustomProduct" }
                        }
                    ]
                }
            }"#,
        )?;

        assert_eq!(
            input.configuration_blob(),
            Some(r#"{"products":["gid://shopify/Product/1"],"minQty":2,"percentOff":10}"#)
        );

        let cart = input.cart_snapshot();
        let products: Vec<Option<&str>> = cart
            .iter()
            .map(|line| line.product().map(ProductId::as_str))
            .collect();

        assert_eq!(products, [Some("gid://shopify/Product/1"), None]);

        Ok(())
    }

    #[test]
    fn missing_sections_are_tolerated() -> TestResult {
        let input: RunInput = serde_json::from_str(r#"{"discountNode":null}"#)?;

        assert_eq!(input.configuration_blob(), None);
        assert!(input.cart_snapshot().is_empty());

        let input: RunInput =
            serde_json::from_str(r#"{"discountNode":{"metafield":null},"cart":{"lines":[]}}"#)?;

        assert_eq!(input.configuration_blob(), None);

        Ok(())
    }

    #[test]
    fn null_merchandise_has_no_product() -> TestResult {
        let input: RunInput = serde_json::from_str(
            r#"{"cart":{"lines":[{"id":"L1","quantity":3,"merchandise":null}]}}"#,
        )?;

        let cart = input.cart_snapshot();
        let line = cart.lines().first().ok_or("expected a line")?;

        assert_eq!(line.product(), None);
        assert_eq!(line.quantity(), 3);

        Ok(())
    }

    #[test]
    fn product_without_id_only_skips_its_line() -> TestResult {
        let input: RunInput = serde_json::from_str(
            r#"{"cart":{"lines":[
                {"id":"L1","quantity":2,"merchandise":{"product":{"id":"P1"}}},
                {"id":"L2","quantity":3,"merchandise":{"product":{}}},
                {"id":"L3","quantity":4,"merchandise":{"product":{"id":null}}}
            ]}}"#,
        )?;

        let cart = input.cart_snapshot();
        let products: Vec<Option<&str>> = cart
            .iter()
            .map(|line| line.product().map(ProductId::as_str))
            .collect();

        assert_eq!(products, [Some("P1"), None, None]);

        Ok(())
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let input = serde_json::from_str::<RunInput>(
            r#"{"cart":{"lines":[{"id":"L1","quantity":-1}]}}"#,
        );

        assert!(input.is_err());
    }
}
