//! Shared harness for the behavioral corpus.
//!
//! [`ConformanceSuite`] runs many small sources through the parser, records
//! whether each one was accepted or rejected as expected, and summarizes the
//! results by category. [`init_tracing`] routes parser logs to the test
//! output when `RUST_LOG` is set.

use garnet_ast::node::Program;
use garnet_parser::{parse, ParseError};
use std::collections::BTreeMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a test-writer subscriber filtered by `RUST_LOG`, e.g.
/// `RUST_LOG=garnet_parser=trace`. Safe to call from every test.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            // Another harness may already own the global subscriber.
            let _ = fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_test_writer()
                .with_target(true)
                .try_init();
        }
    });
}

/// Whether a case should parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    Accept,
    Reject,
}

#[derive(Debug)]
pub enum Outcome {
    Parsed(Program),
    Failed(ParseError),
    /// The parser panicked; always a failure.
    Panicked(String),
}

impl Outcome {
    fn describe(&self) -> String {
        match self {
            Outcome::Parsed(program) => format!("parsed {} statement(s)", program.len()),
            Outcome::Failed(error) => error.to_string(),
            Outcome::Panicked(message) => format!("panic: {}", message),
        }
    }
}

#[derive(Debug)]
pub struct CaseResult {
    pub name: String,
    pub category: String,
    pub expectation: Expectation,
    pub outcome: Outcome,
}

impl CaseResult {
    pub fn passed(&self) -> bool {
        matches!(
            (self.expectation, &self.outcome),
            (Expectation::Accept, Outcome::Parsed(_)) | (Expectation::Reject, Outcome::Failed(_))
        )
    }
}

fn run_case(source: &str) -> Outcome {
    match catch_unwind(AssertUnwindSafe(|| parse(source))) {
        Ok(Ok(program)) => Outcome::Parsed(program),
        Ok(Err(error)) => Outcome::Failed(error),
        Err(payload) => {
            let message = if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else if let Some(s) = payload.downcast_ref::<&str>() {
                s.to_string()
            } else {
                "unknown panic".to_string()
            };
            Outcome::Panicked(message)
        }
    }
}

#[derive(Debug, Default)]
pub struct ConformanceSuite {
    cases: Vec<CaseResult>,
}

impl ConformanceSuite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accept(&mut self, name: &str, category: &str, source: &str) -> &CaseResult {
        self.add(name, category, source, Expectation::Accept)
    }

    pub fn reject(&mut self, name: &str, category: &str, source: &str) -> &CaseResult {
        self.add(name, category, source, Expectation::Reject)
    }

    fn add(&mut self, name: &str, category: &str, source: &str, expectation: Expectation) -> &CaseResult {
        let outcome = run_case(source);
        tracing::debug!(case = name, category, expected = ?expectation, "ran conformance case");
        let index = self.cases.len();
        self.cases.push(CaseResult {
            name: name.to_string(),
            category: category.to_string(),
            expectation,
            outcome,
        });
        &self.cases[index]
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseResult> {
        self.cases.iter().filter(|case| !case.passed())
    }

    pub fn summary(&self) -> Summary {
        let mut categories: BTreeMap<String, (usize, usize)> = BTreeMap::new();
        for case in &self.cases {
            let entry = categories.entry(case.category.clone()).or_insert((0, 0));
            if case.passed() {
                entry.0 += 1;
            }
            entry.1 += 1;
        }
        Summary {
            total: self.cases.len(),
            passed: self.cases.iter().filter(|case| case.passed()).count(),
            categories,
            failures: self
                .failures()
                .map(|case| format!("[{}] {}: {}", case.category, case.name, case.outcome.describe()))
                .collect(),
        }
    }
}

/// Pass counts overall and per category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    /// Category name to `(passed, total)`.
    pub categories: BTreeMap<String, (usize, usize)>,
    pub failures: Vec<String>,
}

impl Summary {
    pub fn failed(&self) -> usize {
        self.total - self.passed
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.passed as f64 / self.total as f64 * 100.0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Conformance Summary ===")?;
        writeln!(f, "Total: {}  Passed: {}  Failed: {}", self.total, self.passed, self.failed())?;
        writeln!(f, "Pass rate: {:.2}%", self.pass_rate())?;
        for (category, (passed, total)) in &self.categories {
            writeln!(f, "  {}: {}/{}", category, passed, total)?;
        }
        for failure in self.failures.iter().take(10) {
            writeln!(f, "  FAILED {}", failure)?;
        }
        Ok(())
    }
}
