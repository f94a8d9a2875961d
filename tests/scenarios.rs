// ABOUTME: End-to-end scenarios spanning interpretation, constraints, sampling and search

use listsynth_core::ast::{Argument, Function, OneArgumentLambda, Statement};
use listsynth_core::attribute::Attribute;
use listsynth_core::constraints::analyze;
use listsynth_core::dedup::DatasetForOneInputType;
use listsynth_core::generator::{generate_examples, Example};
use listsynth_core::interp::eval;
use listsynth_core::synth::dfs;
use listsynth_core::text::{parse_program, stringify_program};
use listsynth_core::value::Value;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_interpreter_scenario_sort_take_sum() {
    // ReadInt; ReadList; Sort 1; Take 0 2; Sum 3 on (2, [3,5,4,7,5]) -> 7
    let program = vec![
        Statement::new(0, Function::ReadInt, vec![]),
        Statement::new(1, Function::ReadList, vec![]),
        Statement::new(2, Function::Sort, vec![Argument::Variable(1)]),
        Statement::new(3, Function::Take, vec![Argument::Variable(0), Argument::Variable(2)]),
        Statement::new(4, Function::Sum, vec![Argument::Variable(3)]),
    ];
    let input = vec![Value::Integer(2), Value::List(vec![3, 5, 4, 7, 5])];
    assert_eq!(eval(&program, &input), Some(Value::Integer(7)));
}

#[test]
fn test_constraint_analysis_scenario_map_plus1_then_take() {
    let program = vec![
        Statement::new(0, Function::ReadList, vec![]),
        Statement::new(1, Function::ReadInt, vec![]),
        Statement::new(
            2,
            Function::Map,
            vec![Argument::OneArg(OneArgumentLambda::Plus1), Argument::Variable(0)],
        ),
        Statement::new(3, Function::Take, vec![Argument::Variable(1), Argument::Variable(2)]),
    ];
    let constraint = analyze(&program).unwrap();
    assert_eq!(constraint.integer_variables[&1].min, Some(0));
    assert_eq!(constraint.inputs, vec![0, 1]);
}

#[test]
fn test_dedup_scenario_prefers_shortest_equivalent_program() {
    // Scenario S5: [ReadList; Minimum] and [ReadList; Sort; Head] are
    // semantically identical; only the shorter survives, however the two
    // are offered (i.e. even under each program's own, distinct examples).
    let short = vec![
        Statement::new(0, Function::ReadList, vec![]),
        Statement::new(1, Function::Minimum, vec![Argument::Variable(0)]),
    ];
    let long = vec![
        Statement::new(0, Function::ReadList, vec![]),
        Statement::new(1, Function::Sort, vec![Argument::Variable(0)]),
        Statement::new(2, Function::Head, vec![Argument::Variable(1)]),
    ];

    let examples_long: Vec<Example> = vec![
        Example { input: vec![Value::List(vec![5, 1, 9])], output: Value::Integer(1) },
        Example { input: vec![Value::List(vec![3, 3])], output: Value::Integer(3) },
        Example { input: vec![Value::List(vec![7])], output: Value::Integer(7) },
        Example { input: vec![Value::List(vec![0, -1, 2])], output: Value::Integer(-1) },
        Example { input: vec![Value::List(vec![8, 8, 1])], output: Value::Integer(1) },
    ];
    let examples_short: Vec<Example> = vec![
        Example { input: vec![Value::List(vec![4, 2])], output: Value::Integer(2) },
        Example { input: vec![Value::List(vec![10, -5, 3])], output: Value::Integer(-5) },
        Example { input: vec![Value::List(vec![6])], output: Value::Integer(6) },
        Example { input: vec![Value::List(vec![1, 1, 1])], output: Value::Integer(1) },
        Example { input: vec![Value::List(vec![9, 0])], output: Value::Integer(0) },
    ];

    let mut dataset = DatasetForOneInputType::new();
    assert!(dataset.insert(long, &examples_long));
    assert!(dataset.insert(short.clone(), &examples_short));
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.programs().next().unwrap(), &short);
}

#[test]
fn test_stringify_scenario_pins_variable_off_by_one() {
    let statement = Statement::new(0, Function::Head, vec![Argument::Variable(27)]);
    assert_eq!(statement.to_string(), "a <- head ab");

    let program = vec![statement];
    let text = stringify_program(&program);
    assert_eq!(text, "---\na <- head ab\n---\n");
    assert!(parse_program(&text).is_ok());
}

#[test]
fn test_attribute_round_trip_invariant() {
    let program = vec![
        Statement::new(0, Function::ReadList, vec![]),
        Statement::new(
            1,
            Function::Map,
            vec![Argument::OneArg(OneArgumentLambda::Multiply2), Argument::Variable(0)],
        ),
        Statement::new(2, Function::Sum, vec![Argument::Variable(1)]),
    ];
    let attribute = Attribute::from_program(&program);
    let recovered = Attribute::from_vec(&attribute.to_vec()).unwrap();
    assert_eq!(attribute, recovered);
}

#[test]
fn test_generate_examples_invariants_range_and_determinism() {
    let program = vec![
        Statement::new(0, Function::ReadList, vec![]),
        Statement::new(1, Function::Sum, vec![Argument::Variable(0)]),
    ];

    let mut rng_a = StdRng::seed_from_u64(99);
    let examples_a = generate_examples(&program, 5, &mut rng_a);

    let mut rng_b = StdRng::seed_from_u64(99);
    let examples_b = generate_examples(&program, 5, &mut rng_b);

    assert_eq!(examples_a, examples_b);
    for e in &examples_a {
        assert!(!e.output.is_null());
        assert!(e.output.all_integers_in_range(-256, 255));
    }
}

#[test]
fn test_synthesis_scenario_finds_minimum_of_list() {
    let examples = vec![
        Example {
            input: vec![Value::List(vec![3, 1, 4])],
            output: Value::Integer(1),
        },
        Example {
            input: vec![Value::List(vec![9, 2, 7])],
            output: Value::Integer(2),
        },
        Example {
            input: vec![Value::List(vec![5])],
            output: Value::Integer(5),
        },
    ];

    let mut attribute = Attribute::default();
    let index = listsynth_core::ast::NON_READER_FUNCTIONS
        .iter()
        .position(|f| *f == Function::Minimum)
        .unwrap();
    attribute.functions[index] = 1.0;

    let program = dfs(2, &attribute, &examples).expect("should synthesize a minimum-of-list program");
    assert_eq!(program.last().unwrap().function, Function::Minimum);
}
