use std::{collections::BTreeMap, str::Lines};

use interpreter::{Grammar, InterpretError, Interpreter};
use itertools::Itertools;
use lazy_regex::regex;
use test_suite_proc_macro::generate_tests;

use pretty_assertions::assert_eq;

/// Runs every non-comment line as its own program, so that several runtime
/// errors can be checked in one file.
pub fn test_runtime_errors_line_by_line(
    interpreter: &Interpreter,
    lines: Lines<'_>,
    expected_runtime_errors: &BTreeMap<usize, String>,
    expected_output: &[String],
) {
    let mut output = Vec::new();

    let mut actual_runtime_errors = BTreeMap::new();
    for (i, line) in lines.enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }
        match interpreter.run_source(line, &mut output) {
            Ok(()) => (),
            Err(InterpretError::RuntimeError(e)) => {
                actual_runtime_errors.insert(i + 1, e.to_string());
            }
            Err(e) => panic!("Unexpected error: {:?}", e),
        }
    }

    assert_eq!(
        actual_runtime_errors, *expected_runtime_errors,
        "Actual runtime errors (left) do not match expected runtime errors (right)"
    );
    assert_eq!(
        String::from_utf8(output).unwrap().lines().collect_vec(),
        expected_output,
        "Actual output (left) does not match expected output (right)"
    );
}

pub fn gox_expect(code: &str) {
    let mut expected_compile_errors = vec![];
    let mut expected_runtime_errors = BTreeMap::new();
    let mut expected_output = vec![];
    let mut grammar = Grammar::default();

    let compile_error_regex = regex!(r"// compile error: (.*)");
    let runtime_error_regex = regex!(r"// runtime error: (.*)");
    let output_regex = regex!(r"// expect: (.*)");
    let grammar_regex = regex!(r"// grammar: (.*)");

    for (i, line) in code.lines().enumerate() {
        if let Some(cap) = runtime_error_regex.captures(line) {
            expected_runtime_errors.insert(i + 1, cap[1].to_string());
        } else if let Some(cap) = compile_error_regex.captures(line) {
            expected_compile_errors.push(cap[1].to_string());
        } else if let Some(cap) = output_regex.captures(line) {
            expected_output.push(cap[1].to_string());
        } else if let Some(cap) = grammar_regex.captures(line) {
            for switch in cap[1].split_whitespace() {
                match switch {
                    "chain_operators" => grammar.chain_operators = true,
                    "group_expressions" => grammar.group_expressions = true,
                    other => panic!("Unknown grammar switch: {other}"),
                }
            }
        }
    }

    if !expected_runtime_errors.is_empty() {
        assert!(
            expected_compile_errors.is_empty(),
            "Can't have a runtime error when there are compile errors."
        );
    }

    let interpreter = Interpreter::new().with_grammar(grammar).with_tree_output(true);

    if expected_runtime_errors.len() > 1 {
        test_runtime_errors_line_by_line(
            &interpreter,
            code.lines(),
            &expected_runtime_errors,
            &expected_output,
        );
        return;
    }

    let mut output = Vec::new();
    match interpreter.run_source(code, &mut output) {
        Ok(()) => {
            assert_eq!(expected_output, String::from_utf8(output).unwrap().lines().collect_vec());

            assert!(expected_runtime_errors.is_empty(), "Expected runtime error but none occurred");
            assert!(expected_compile_errors.is_empty(), "Expected compile errors but none occurred");
        }
        Err(InterpretError::CompileError(e)) => {
            assert!(expected_output.is_empty());
            assert!(expected_runtime_errors.is_empty());

            assert_eq!(e.to_string(), expected_compile_errors.join("\n"));
        }
        Err(InterpretError::RuntimeError(runtime_error)) => {
            assert_eq!(expected_output, String::from_utf8(output).unwrap().lines().collect_vec());
            assert_eq!(
                expected_runtime_errors.values().next(),
                Some(&runtime_error.to_string()),
                "Unexpected runtime error"
            );

            assert!(expected_compile_errors.is_empty(), "Expected compile errors but none occurred");
        }
        Err(e) => panic!("Unexpected error: {:?}", e),
    }
}

generate_tests!();
