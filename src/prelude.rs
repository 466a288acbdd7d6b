//! Volume Discount prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartLine, CartSnapshot, LineId, ProductId},
    configuration::{Configuration, ConfigurationDocument, ConfigurationError},
    evaluator::{
        DiscountApplication, DiscountDecision, LineVerdict, classify, evaluate, evaluate_blob,
        explain,
    },
    function::{FunctionResult, Protocol, RunInput, run},
    report::{ReportError, write_report},
};
