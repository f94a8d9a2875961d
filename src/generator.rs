// ABOUTME: Constraint-guided example generation for a synthesized/target program

use crate::ast::Program;
use crate::config::{EXAMPLE_NUM, INTEGER_MAX, INTEGER_MIN};
use crate::constraints::analyze;
use crate::interp::eval;
use crate::sampler::{generate_integer, generate_list};
use crate::types::{generate_type_environment, Type};
use crate::value::Value;
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub input: Vec<Value>,
    pub output: Value,
}

fn is_in_range(value: &Value) -> bool {
    match value {
        Value::Integer(n) => *n >= INTEGER_MIN && *n <= INTEGER_MAX,
        Value::List(xs) => xs.iter().all(|n| *n >= INTEGER_MIN && *n <= INTEGER_MAX),
        Value::Null => false,
    }
}

/// Draws up to `100 * n` random inputs satisfying `program`'s inferred
/// input constraints, keeping the first `n` whose output is neither `Null`
/// nor out of the sampling range. Fewer than `n` examples come back if the
/// budget is exhausted first.
pub fn generate_examples(program: &Program, n: usize, rng: &mut impl Rng) -> Vec<Example> {
    let tenv = match generate_type_environment(program) {
        Some(t) => t,
        None => return vec![],
    };
    let constraint = match analyze(program) {
        Some(c) => c,
        None => return vec![],
    };

    let mut examples = Vec::with_capacity(n);
    let budget = 100 * n.max(1);

    for _ in 0..budget {
        if examples.len() >= n {
            break;
        }

        let mut input = Vec::with_capacity(constraint.inputs.len());
        let mut ok = true;
        for &var in &constraint.inputs {
            let value = match tenv.get(&var) {
                Some(Type::Integer) => {
                    let ic = constraint.integer_variables.get(&var).cloned().unwrap_or_default();
                    generate_integer(&ic, rng).map(Value::Integer)
                }
                Some(Type::List) => {
                    let lc = constraint.list_variables.get(&var).cloned().unwrap_or_default();
                    generate_list(&lc, rng).map(Value::List)
                }
                _ => None,
            };
            match value {
                Some(v) => input.push(v),
                None => {
                    ok = false;
                    break;
                }
            }
        }
        if !ok {
            continue;
        }

        let output = match eval(program, &input) {
            Some(v) => v,
            None => continue,
        };
        if output.is_null() || !is_in_range(&output) {
            continue;
        }

        examples.push(Example { input, output });
    }

    examples
}

/// Generates exactly one bundle (`EXAMPLE_NUM` examples), or `None`
/// if the budget is exhausted before that many are found.
pub fn generate_example_bundle(program: &Program, rng: &mut impl Rng) -> Option<Vec<Example>> {
    let examples = generate_examples(program, EXAMPLE_NUM, rng);
    if examples.len() == EXAMPLE_NUM {
        Some(examples)
    } else {
        None
    }
}
