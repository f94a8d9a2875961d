// ABOUTME: Generic depth-first enumeration of well-typed programs

use crate::ast::{Argument, Function, OneArgumentLambda, PredicateLambda, Program, Statement,
                  TwoArgumentsLambda};
use crate::types::{check, generate_type_environment, get_signature, Type, TypeEnvironment};

/// Names the function, predicate, one-arg-lambda, and two-arg-lambda pools
/// the enumerator draws from, plus the total statement-count window.
#[derive(Debug, Clone)]
pub struct Restriction {
    pub min_length: usize,
    pub max_length: usize,
    pub functions: Vec<Function>,
    pub predicates: Vec<PredicateLambda>,
    pub one_argument_lambda: Vec<OneArgumentLambda>,
    pub two_arguments_lambda: Vec<TwoArgumentsLambda>,
}

impl Restriction {
    pub fn empty(min_length: usize, max_length: usize) -> Self {
        Restriction {
            min_length,
            max_length,
            functions: vec![],
            predicates: vec![],
            one_argument_lambda: vec![],
            two_arguments_lambda: vec![],
        }
    }
}

/// Per-slot legal arguments for one candidate function, drawn either from
/// the restriction's matching lambda pool or from every type-environment
/// variable of the slot's type.
fn legal_arguments(slot: Type, restriction: &Restriction, tenv: &TypeEnvironment) -> Vec<Argument> {
    match slot {
        Type::PredicateLambda => restriction.predicates.iter().copied().map(Argument::from).collect(),
        Type::OneArgumentLambda => {
            restriction.one_argument_lambda.iter().copied().map(Argument::from).collect()
        }
        Type::TwoArgumentsLambda => {
            restriction.two_arguments_lambda.iter().copied().map(Argument::from).collect()
        }
        Type::Integer => tenv
            .iter()
            .filter(|(_, t)| **t == Type::Integer)
            .map(|(v, _)| Argument::from(*v))
            .collect(),
        Type::List => tenv
            .iter()
            .filter(|(_, t)| **t == Type::List)
            .map(|(v, _)| Argument::from(*v))
            .collect(),
        Type::Null => vec![],
    }
}

/// Depth-first, left-to-right walk of every well-typed program in
/// `[restriction.min_length, restriction.max_length]` extending `program`.
/// `calc_info` threads a user-supplied accumulator from parent to child;
/// `process` is invoked on every in-window candidate and can abort the
/// entire walk by returning `false`.
pub fn enumerate<Info, CalcInfo, Process>(
    restriction: &Restriction,
    calc_info: &CalcInfo,
    process: &mut Process,
    program: &Program,
    tenv: &TypeEnvironment,
    info: &Info,
) -> bool
where
    Info: Clone,
    CalcInfo: Fn(&Program, &Info) -> Info,
    Process: FnMut(&Program, &Info) -> bool,
{
    for &function in &restriction.functions {
        let arg_types = get_signature(function).argument_types;
        let slots: Vec<Vec<Argument>> = arg_types
            .iter()
            .map(|t| legal_arguments(*t, restriction, tenv))
            .collect();

        if slots.is_empty() {
            if !try_candidate(restriction, calc_info, process, program, tenv, info, function, vec![]) {
                return false;
            }
            continue;
        }

        // Explicit stack of partial argument lists, pushed in reverse order
        // per slot so popping yields them left-to-right.
        let mut stack: Vec<Vec<Argument>> = Vec::new();
        for arg in slots[0].iter().rev() {
            stack.push(vec![*arg]);
        }

        while let Some(args) = stack.pop() {
            if args.len() == arg_types.len() {
                if !try_candidate(restriction, calc_info, process, program, tenv, info, function, args) {
                    return false;
                }
            } else {
                let next_slot = &slots[args.len()];
                for arg in next_slot.iter().rev() {
                    let mut extended = args.clone();
                    extended.push(*arg);
                    stack.push(extended);
                }
            }
        }
    }
    true
}

#[allow(clippy::too_many_arguments)]
fn try_candidate<Info, CalcInfo, Process>(
    restriction: &Restriction,
    calc_info: &CalcInfo,
    process: &mut Process,
    program: &Program,
    tenv: &TypeEnvironment,
    info: &Info,
    function: Function,
    arguments: Vec<Argument>,
) -> bool
where
    Info: Clone,
    CalcInfo: Fn(&Program, &Info) -> Info,
    Process: FnMut(&Program, &Info) -> bool,
{
    let mut candidate_program = program.clone();
    let statement = Statement::new(candidate_program.len() as u16, function, arguments);
    candidate_program.push(statement.clone());

    let new_tenv = match check(&statement, tenv) {
        Some(t) => t,
        None => return true,
    };
    let new_info = calc_info(&candidate_program, info);

    let length = candidate_program.len();
    if length >= restriction.min_length && length <= restriction.max_length {
        if !process(&candidate_program, &new_info) {
            return false;
        }
    }

    if length < restriction.max_length {
        if !enumerate(restriction, calc_info, process, &candidate_program, &new_tenv, &new_info) {
            return false;
        }
    }

    true
}

/// Enumerates from an empty program and type environment.
pub fn enumerate_all<Info, CalcInfo, Process>(
    restriction: &Restriction,
    calc_info: &CalcInfo,
    process: &mut Process,
    initial_info: Info,
) where
    Info: Clone,
    CalcInfo: Fn(&Program, &Info) -> Info,
    Process: FnMut(&Program, &Info) -> bool,
{
    enumerate(restriction, calc_info, process, &vec![], &TypeEnvironment::new(), &initial_info);
}

/// Enumerates extending `initial_program`, re-deriving its type environment
/// first. Silently does nothing if `initial_program` is itself ill-typed.
pub fn enumerate_from<Info, CalcInfo, Process>(
    restriction: &Restriction,
    calc_info: &CalcInfo,
    process: &mut Process,
    initial_program: &Program,
    initial_info: Info,
) where
    Info: Clone,
    CalcInfo: Fn(&Program, &Info) -> Info,
    Process: FnMut(&Program, &Info) -> bool,
{
    if let Some(tenv) = generate_type_environment(initial_program) {
        enumerate(restriction, calc_info, process, initial_program, &tenv, &initial_info);
    }
}
