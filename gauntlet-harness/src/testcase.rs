//! Test case and registry definitions.

use anyhow::Result;

/// Action body of a conformance check.
///
/// Zero-argument by design: check-specific inputs are captured when the
/// registry is built. `Ok(true)` is a pass, `Ok(false)` an expectation
/// failure, and `Err` a fault the suite runner isolates.
pub type CheckFn = Box<dyn Fn() -> Result<bool>>;

/// A single named conformance check.
pub struct TestCase {
    name: String,
    action: CheckFn,
}

impl TestCase {
    /// Creates a named check from an action closure.
    pub fn new(name: impl Into<String>, action: impl Fn() -> Result<bool> + 'static) -> Self {
        Self {
            name: name.into(),
            action: Box::new(action),
        }
    }

    /// Name of the check, unique within a registry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the check's action.
    pub fn run(&self) -> Result<bool> {
        (self.action)()
    }
}

impl std::fmt::Debug for TestCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCase").field("name", &self.name).finish()
    }
}

/// Insertion-ordered collection of registered checks.
///
/// Registration order is execution order is reporting order.
#[derive(Debug, Default)]
pub struct TestCaseRegistry {
    cases: Vec<TestCase>,
}

impl TestCaseRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a check, preserving insertion order.
    pub fn register(&mut self, case: TestCase) {
        self.cases.push(case);
    }

    /// Number of registered checks.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Returns whether no checks are registered.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Iterates checks in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TestCase> {
        self.cases.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_preserves_insertion_order() {
        let mut registry = TestCaseRegistry::new();
        registry.register(TestCase::new("first", || Ok(true)));
        registry.register(TestCase::new("second", || Ok(false)));
        registry.register(TestCase::new("third", || Ok(true)));

        let names: Vec<_> = registry.iter().map(TestCase::name).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
    }
}
