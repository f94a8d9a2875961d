// ABOUTME: Static type checker for statements and programs

use crate::ast::{Argument, Function, Program, Statement, Variable};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Integer,
    List,
    PredicateLambda,
    OneArgumentLambda,
    TwoArgumentsLambda,
    Null,
}

/// Maps bound variables to their type. A `BTreeMap` keeps iteration in
/// ascending variable order, which is what makes the enumerator's traversal
/// reproducible without an extra sort at every recursion step.
pub type TypeEnvironment = BTreeMap<Variable, Type>;

#[derive(Debug, Clone)]
pub struct Signature {
    pub return_type: Type,
    pub argument_types: Vec<Type>,
}

pub fn get_signature(function: Function) -> Signature {
    use Function::*;
    use Type::*;
    match function {
        Head | Last | Minimum | Maximum | Sum => Signature {
            return_type: Integer,
            argument_types: vec![List],
        },
        Access => Signature {
            return_type: Integer,
            argument_types: vec![Integer, List],
        },
        Take | Drop => Signature {
            return_type: List,
            argument_types: vec![Integer, List],
        },
        Reverse | Sort => Signature {
            return_type: List,
            argument_types: vec![List],
        },
        Map => Signature {
            return_type: List,
            argument_types: vec![OneArgumentLambda, List],
        },
        Filter => Signature {
            return_type: List,
            argument_types: vec![PredicateLambda, List],
        },
        Count => Signature {
            return_type: Integer,
            argument_types: vec![PredicateLambda, List],
        },
        ZipWith => Signature {
            return_type: List,
            argument_types: vec![TwoArgumentsLambda, List, List],
        },
        Scanl1 => Signature {
            return_type: List,
            argument_types: vec![TwoArgumentsLambda, List],
        },
        ReadInt => Signature {
            return_type: Integer,
            argument_types: vec![],
        },
        ReadList => Signature {
            return_type: List,
            argument_types: vec![],
        },
    }
}

/// The type an argument slot would contribute, given the current type
/// environment. `None` if a variable argument is unbound.
pub fn get_type(argument: &Argument, env: &TypeEnvironment) -> Option<Type> {
    match argument {
        Argument::OneArg(_) => Some(Type::OneArgumentLambda),
        Argument::TwoArg(_) => Some(Type::TwoArgumentsLambda),
        Argument::Predicate(_) => Some(Type::PredicateLambda),
        Argument::Variable(v) => env.get(v).copied(),
    }
}

/// Type-checks a single statement against an environment, returning the
/// environment extended with the statement's binding, or `None` if the
/// arity is wrong, an argument's type doesn't match the signature slot, or
/// the statement's variable already exists in `env`.
pub fn check(statement: &Statement, env: &TypeEnvironment) -> Option<TypeEnvironment> {
    let signature = get_signature(statement.function);

    if signature.argument_types.len() != statement.arguments.len() {
        return None;
    }

    for (expected, argument) in signature.argument_types.iter().zip(&statement.arguments) {
        let actual = get_type(argument, env)?;
        if actual != *expected {
            return None;
        }
    }

    if env.contains_key(&statement.variable) {
        return None;
    }

    let mut next = env.clone();
    next.insert(statement.variable, signature.return_type);
    Some(next)
}

/// Folds [`check`] across every statement from an empty environment.
pub fn generate_type_environment(program: &Program) -> Option<TypeEnvironment> {
    let mut env = TypeEnvironment::new();
    for statement in program {
        env = check(statement, &env)?;
    }
    Some(env)
}

pub fn is_valid(program: &Program) -> bool {
    generate_type_environment(program).is_some()
}
