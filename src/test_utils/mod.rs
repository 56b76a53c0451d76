//! Shared test utilities for editora.

pub mod fixtures;

pub use fixtures::{EditorSeed, MarketFixture};

/// One row of a table-driven test.
#[derive(Debug, Clone)]
pub struct TestCase<I, E> {
    pub name: &'static str,
    pub input: I,
    pub expected: E,
}

impl<I, E> TestCase<I, E> {
    pub const fn new(name: &'static str, input: I, expected: E) -> Self {
        Self {
            name,
            input,
            expected,
        }
    }
}

/// Run every case and report all mismatches at once.
pub fn run_table_tests<I, E, F>(cases: Vec<TestCase<I, E>>, test_fn: F) -> Result<(), String>
where
    I: std::fmt::Debug,
    E: std::fmt::Debug + PartialEq,
    F: Fn(I) -> E,
{
    let mut failures = Vec::new();
    for case in cases {
        let rendered = format!("{:?}", case.input);
        let actual = test_fn(case.input);
        if actual == case.expected {
            println!("[TEST] ok   {}", case.name);
        } else {
            println!("[TEST] FAIL {}", case.name);
            failures.push(format!(
                "{}: input {rendered}, expected {:?}, got {actual:?}",
                case.name, case.expected
            ));
        }
    }
    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures.join("\n"))
    }
}
