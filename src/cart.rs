//! Cart
//!
//! A read-only snapshot of the cart lines handed to the evaluator.

use std::fmt;

use smallvec::SmallVec;

/// Cart line identifier, opaque and unique within a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineId(String);

impl LineId {
    /// Create a line identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LineId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LineId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Product identifier, for example `gid://shopify/Product/1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    id: LineId,
    product: Option<ProductId>,
    quantity: u32,
}

impl CartLine {
    /// Create a line for a product.
    pub fn new(id: impl Into<LineId>, product: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            product: Some(product.into()),
            quantity,
        }
    }

    /// Create a line for merchandise that is not backed by a product
    /// (custom line items, gift cards and the like).
    pub fn without_product(id: impl Into<LineId>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            product: None,
            quantity,
        }
    }

    /// Return the line identifier
    pub fn id(&self) -> &LineId {
        &self.id
    }

    /// Return the product identifier, if the line has one
    pub fn product(&self) -> Option<&ProductId> {
        self.product.as_ref()
    }

    /// Return the quantity
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Ordered, read-only view of the cart at evaluation time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartSnapshot {
    lines: SmallVec<[CartLine; 8]>,
}

impl CartSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a snapshot from lines, keeping their order.
    pub fn with_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        Self {
            lines: lines.into_iter().collect(),
        }
    }

    /// Iterate over the lines in cart order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Return the lines as a slice.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the number of lines in the snapshot.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the snapshot has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl FromIterator<CartLine> for CartSnapshot {
    fn from_iter<I: IntoIterator<Item = CartLine>>(iter: I) -> Self {
        Self::with_lines(iter)
    }
}

impl<'a> IntoIterator for &'a CartSnapshot {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_lines_preserves_order() {
        let cart = CartSnapshot::with_lines([
            CartLine::new("L2", "P1", 1),
            CartLine::new("L1", "P2", 3),
            CartLine::without_product("L3", 1),
        ]);

        let ids: Vec<&str> = cart.iter().map(|line| line.id().as_str()).collect();

        assert_eq!(ids, ["L2", "L1", "L3"]);
        assert_eq!(cart.len(), 3);
    }

    #[test]
    fn without_product_has_no_product() {
        let line = CartLine::without_product("L1", 4);

        assert_eq!(line.product(), None);
        assert_eq!(line.quantity(), 4);
    }

    #[test]
    fn empty_snapshot() {
        let cart = CartSnapshot::new();

        assert!(cart.is_empty());
        assert_eq!(cart.lines(), &[] as &[CartLine]);
    }

    #[test]
    fn ids_display_verbatim() {
        assert_eq!(
            LineId::from("gid://shopify/CartLine/1").to_string(),
            "gid://shopify/CartLine/1"
        );
        assert_eq!(ProductId::from("gid://P1").to_string(), "gid://P1");
    }
}
