//! Behaviour-driven tests for loading and applying suppression configuration.

use std::cell::RefCell;

use lintel::testing::{ScriptedChecker, TestNode};
use lintel::{CheckerType, Linter, PredicateSet, SuppressionConfig};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

static BASE: CheckerType = CheckerType::new("base");
static NAMES: CheckerType = CheckerType::extending("names", &BASE);

struct ConfigWorld {
    source: RefCell<Option<String>>,
    linter: RefCell<Linter<TestNode>>,
    outcome: RefCell<Option<Result<usize, String>>>,
}

impl ConfigWorld {
    fn new() -> Self {
        let mut linter = Linter::new();
        linter.register(ScriptedChecker::new(&NAMES).on("visit_name", &["W0612", "C0103"]));
        Self {
            source: RefCell::new(None),
            linter: RefCell::new(linter),
            outcome: RefCell::new(None),
        }
    }

    fn installed(&self) -> usize {
        match self.outcome.borrow().as_ref() {
            Some(Ok(count)) => *count,
            Some(Err(error)) => panic!("expected the configuration to apply: {error}"),
            None => panic!("the configuration should have been applied"),
        }
    }
}

#[fixture]
fn config_world() -> ConfigWorld {
    ConfigWorld::new()
}

fn predicates() -> PredicateSet<TestNode> {
    PredicateSet::new().with("negative", |node: &TestNode| node.value() < 0)
}

#[given("no suppression configuration is provided")]
fn no_configuration(config_world: &ConfigWorld) {
    config_world.source.borrow_mut().take();
}

#[given("the configuration suppresses {message} from {method} on {checker} when {predicate}")]
fn configured_rule(
    config_world: &ConfigWorld,
    message: String,
    method: String,
    checker: String,
    predicate: String,
) {
    config_world.source.borrow_mut().replace(format!(
        "[[suppress]]\nchecker = \"{checker}\"\nmethod = \"{method}\"\nmessage = \"{message}\"\nwhen = \"{predicate}\"\n",
    ));
}

#[given("the configuration includes unknown fields")]
fn unknown_fields(config_world: &ConfigWorld) {
    config_world.source.borrow_mut().replace(
        concat!(
            "unexpected = true\n",
            "[[suppress]]\n",
            "checker = \"names\"\n",
            "method = \"visit_name\"\n",
            "message = \"W0612\"\n",
        )
        .to_owned(),
    );
}

#[when("the configuration is applied")]
fn apply_configuration(config_world: &ConfigWorld) {
    let source = config_world.source.borrow().clone();
    let parsed = source.map_or_else(
        || Ok(SuppressionConfig::default()),
        |input| SuppressionConfig::from_toml_str(&input),
    );
    let config = match parsed {
        Ok(config) => config,
        Err(error) => {
            config_world.outcome.borrow_mut().replace(Err(error.to_string()));
            return;
        }
    };

    let outcome = config
        .apply(&mut *config_world.linter.borrow_mut(), &predicates())
        .map_err(|error| error.to_string());
    config_world.outcome.borrow_mut().replace(outcome);
}

#[then("{count} rules are installed")]
fn assert_installed(config_world: &ConfigWorld, count: usize) {
    assert_eq!(config_world.installed(), count);
}

#[then("visiting a name with value {value} forwards {expected}")]
fn assert_forwarded(config_world: &ConfigWorld, value: i64, expected: String) {
    let mut linter = config_world.linter.borrow_mut();
    linter.walk(&TestNode::new("name", value));
    let forwarded: Vec<String> = linter
        .take_diagnostics()
        .iter()
        .map(|diagnostic| diagnostic.message_id().to_string())
        .collect();
    let expected: Vec<&str> = expected.split(',').map(str::trim).collect();

    assert_eq!(forwarded, expected);
}

#[then("a configuration error mentioning {snippet} is reported")]
fn assert_error(config_world: &ConfigWorld, snippet: String) {
    match config_world.outcome.borrow().as_ref() {
        Some(Err(error)) => assert!(
            error.contains(snippet.as_str()),
            "expected error '{error}' to mention '{snippet}'",
        ),
        Some(Ok(count)) => panic!("expected configuration to fail but {count} rules applied"),
        None => panic!("the configuration should have been applied"),
    }
}

#[scenario("tests/features/config_loading.feature", index = 0)]
fn scenario_defaults(config_world: ConfigWorld) {
    let _ = config_world;
}

#[scenario("tests/features/config_loading.feature", index = 1)]
fn scenario_named_predicate(config_world: ConfigWorld) {
    let _ = config_world;
}

#[scenario("tests/features/config_loading.feature", index = 2)]
fn scenario_base_type(config_world: ConfigWorld) {
    let _ = config_world;
}

#[scenario("tests/features/config_loading.feature", index = 3)]
fn scenario_unknown_fields(config_world: ConfigWorld) {
    let _ = config_world;
}

#[scenario("tests/features/config_loading.feature", index = 4)]
fn scenario_unknown_predicate(config_world: ConfigWorld) {
    let _ = config_world;
}
