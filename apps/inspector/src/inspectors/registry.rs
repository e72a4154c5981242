//! How to register an inspector
//!
//! 1) Implement `Inspector` for your type in its module.
//! 2) Add an `InspectorFactory` entry to the static list with a stable `name` and `version`.
//! 3) Keep ordering stable; the simulator iterates it for `--inspector all`.
//! 4) Same seed means same behaviour.

use super::{HastyInspector, Inspector, RandomInspector, RulebookInspector};

pub struct InspectorFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub make: fn(seed: Option<u64>) -> Box<dyn Inspector>,
}

static INSPECTOR_FACTORIES: &[InspectorFactory] = &[
    InspectorFactory {
        name: RandomInspector::NAME,
        version: RandomInspector::VERSION,
        make: make_random,
    },
    InspectorFactory {
        name: RulebookInspector::NAME,
        version: RulebookInspector::VERSION,
        make: make_rulebook,
    },
    InspectorFactory {
        name: HastyInspector::NAME,
        version: HastyInspector::VERSION,
        make: make_hasty,
    },
];

pub fn registered_inspectors() -> &'static [InspectorFactory] {
    INSPECTOR_FACTORIES
}

/// Finds a registered inspector by name, ignoring ASCII case.
pub fn by_name(name: &str) -> Option<&'static InspectorFactory> {
    registered_inspectors()
        .iter()
        .find(|factory| factory.name.eq_ignore_ascii_case(name))
}

fn make_random(seed: Option<u64>) -> Box<dyn Inspector> {
    Box::new(RandomInspector::new(seed))
}

fn make_rulebook(seed: Option<u64>) -> Box<dyn Inspector> {
    Box::new(RulebookInspector::new(seed))
}

fn make_hasty(seed: Option<u64>) -> Box<dyn Inspector> {
    Box::new(HastyInspector::new(seed))
}
