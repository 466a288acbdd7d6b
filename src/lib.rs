//! Volume Discount
//!
//! A "buy N, get X% off" discount evaluator for cart line discount functions.
//!
//! The merchant's rule is stored as an opaque JSON blob. [`configuration`] turns
//! it into a validated [`configuration::Configuration`] (or nothing at all),
//! [`evaluator`] decides which cart lines qualify, and [`function`] speaks the
//! input and output documents of the discount function protocol.

pub mod cart;
pub mod configuration;
pub mod evaluator;
pub mod function;
pub mod prelude;
pub mod report;
