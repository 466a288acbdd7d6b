//! Table-driven volume discount scenarios loaded from `fixtures/scenarios.yml`.

use serde::Deserialize;
use testresult::TestResult;

use volume_discount::{
    cart::{CartLine, CartSnapshot, LineId},
    evaluator::{DiscountDecision, evaluate_blob},
};

#[derive(Debug, Deserialize)]
struct ScenariosFixture {
    scenarios: Vec<Scenario>,
}

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    configuration: Option<String>,
    lines: Vec<LineFixture>,
    expected: Option<ExpectedDiscount>,
}

#[derive(Debug, Deserialize)]
struct LineFixture {
    id: String,
    #[serde(default)]
    product: Option<String>,
    quantity: u32,
}

#[derive(Debug, Deserialize)]
struct ExpectedDiscount {
    targets: Vec<String>,
    percent_off: String,
    message: String,
}

impl LineFixture {
    fn to_line(&self) -> CartLine {
        match &self.product {
            Some(product) => CartLine::new(self.id.as_str(), product.as_str(), self.quantity),
            None => CartLine::without_product(self.id.as_str(), self.quantity),
        }
    }
}

fn load_scenarios() -> TestResult<Vec<Scenario>> {
    let fixture: ScenariosFixture =
        serde_norway::from_str(include_str!("fixtures/scenarios.yml"))?;

    Ok(fixture.scenarios)
}

#[test]
fn scenarios_produce_expected_decisions() -> TestResult {
    let scenarios = load_scenarios()?;

    assert!(!scenarios.is_empty(), "fixture has no scenarios");

    for scenario in scenarios {
        let cart: CartSnapshot = scenario.lines.iter().map(LineFixture::to_line).collect();
        let decision = evaluate_blob(scenario.configuration.as_deref(), &cart);

        match (&scenario.expected, &decision) {
            (None, DiscountDecision::NoDiscount) => {}
            (Some(expected), DiscountDecision::Discount(application)) => {
                let targets: Vec<&str> =
                    application.targets().iter().map(LineId::as_str).collect();

                assert_eq!(targets, expected.targets, "targets for {}", scenario.name);
                assert_eq!(
                    application.percent_off().to_string(),
                    expected.percent_off,
                    "percent off for {}",
                    scenario.name
                );
                assert_eq!(
                    application.message(),
                    expected.message,
                    "message for {}",
                    scenario.name
                );
            }
            (expected, actual) => {
                return Err(format!(
                    "scenario `{}`: expected {expected:?}, got {actual:?}",
                    scenario.name
                )
                .into());
            }
        }
    }

    Ok(())
}
