//! Discount Function
//!
//! Wire-level entry point: read the input document, evaluate, and format the
//! decision for the consumer's protocol version.

use tracing::info;

use crate::{cart::CartSnapshot, configuration::Configuration, evaluator::evaluate};

pub mod input;
pub mod output;

pub use input::RunInput;
pub use output::{FunctionResult, Protocol};

/// Run the volume discount function against an input document.
///
/// Never fails: an unusable configuration or an unqualified cart produce the
/// protocol's empty result.
#[tracing::instrument(name = "volume_discount.run", skip(input))]
pub fn run(input: &RunInput, protocol: Protocol) -> FunctionResult {
    let config = Configuration::load(input.configuration_blob());

    run_with(config.as_ref(), &input.cart_snapshot(), protocol)
}

/// Evaluate an already loaded configuration against a cart and format the
/// decision for `protocol`.
///
/// Hosts that also need the configuration elsewhere (the evaluation report)
/// load it once and call this instead of [`run`].
pub fn run_with(
    config: Option<&Configuration>,
    cart: &CartSnapshot,
    protocol: Protocol,
) -> FunctionResult {
    let decision = evaluate(config, cart);

    if let Some(application) = decision.application() {
        info!(
            targets = application.targets().len(),
            discount_message = application.message(),
            "volume discount applied"
        );
    }

    protocol.format(&decision)
}
