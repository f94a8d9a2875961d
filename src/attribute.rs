// ABOUTME: The flat feature vector summarizing which primitives a program uses

use crate::ast::{
    Function, OneArgumentLambda, PredicateLambda, Program, TwoArgumentsLambda, Argument,
    ALL_ONE_ARGUMENT_LAMBDAS, ALL_PREDICATE_LAMBDAS, ALL_TWO_ARGUMENTS_LAMBDAS,
    NON_READER_FUNCTIONS,
};

const NUM_FUNCTIONS: usize = NON_READER_FUNCTIONS.len(); // 15
const NUM_PREDICATES: usize = ALL_PREDICATE_LAMBDAS.len(); // 4
const NUM_ONE_ARG: usize = ALL_ONE_ARGUMENT_LAMBDAS.len(); // 10
const NUM_TWO_ARG: usize = ALL_TWO_ARGUMENTS_LAMBDAS.len(); // 5
pub const ATTRIBUTE_LENGTH: usize = NUM_FUNCTIONS + NUM_PREDICATES + NUM_ONE_ARG + NUM_TWO_ARG; // 34

/// Which primitives (excluding the two input readers) a program uses, as a
/// flat real-valued presence/score vector. Section layout is
/// `[functions(15), predicates(4), one-arg lambdas(10), two-arg lambdas(5)]`,
/// each section in the declaration order given in [`crate::ast`]. Built from
/// a program, every entry is `0.0` or `1.0`; supplied by an external
/// predictor it is a confidence score in `[0.0, 1.0]`, which is what lets the
/// synthesiser rank primitives instead of merely filtering by presence.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub functions: [f64; NUM_FUNCTIONS],
    pub predicates: [f64; NUM_PREDICATES],
    pub one_argument_lambda: [f64; NUM_ONE_ARG],
    pub two_arguments_lambda: [f64; NUM_TWO_ARG],
}

impl Default for Attribute {
    fn default() -> Self {
        Attribute {
            functions: [0.0; NUM_FUNCTIONS],
            predicates: [0.0; NUM_PREDICATES],
            one_argument_lambda: [0.0; NUM_ONE_ARG],
            two_arguments_lambda: [0.0; NUM_TWO_ARG],
        }
    }
}

fn function_index(function: Function) -> Option<usize> {
    NON_READER_FUNCTIONS.iter().position(|f| *f == function)
}

fn predicate_index(predicate: PredicateLambda) -> usize {
    ALL_PREDICATE_LAMBDAS.iter().position(|p| *p == predicate).unwrap()
}

fn one_argument_index(lambda: OneArgumentLambda) -> usize {
    ALL_ONE_ARGUMENT_LAMBDAS.iter().position(|l| *l == lambda).unwrap()
}

fn two_arguments_index(lambda: TwoArgumentsLambda) -> usize {
    ALL_TWO_ARGUMENTS_LAMBDAS.iter().position(|l| *l == lambda).unwrap()
}

impl Attribute {
    /// Scans every statement's function and lambda/predicate arguments,
    /// marking each primitive it uses. `ReadInt`/`ReadList` never set a
    /// function bit since they're excluded from the attribute entirely.
    pub fn from_program(program: &Program) -> Attribute {
        let mut attribute = Attribute::default();
        for statement in program {
            if let Some(i) = function_index(statement.function) {
                attribute.functions[i] = 1.0;
            }
            for argument in &statement.arguments {
                match argument {
                    Argument::Predicate(p) => attribute.predicates[predicate_index(*p)] = 1.0,
                    Argument::OneArg(l) => {
                        attribute.one_argument_lambda[one_argument_index(*l)] = 1.0
                    }
                    Argument::TwoArg(l) => {
                        attribute.two_arguments_lambda[two_arguments_index(*l)] = 1.0
                    }
                    Argument::Variable(_) => {}
                }
            }
        }
        attribute
    }

    pub fn to_vec(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(ATTRIBUTE_LENGTH);
        out.extend(self.functions.iter().copied());
        out.extend(self.predicates.iter().copied());
        out.extend(self.one_argument_lambda.iter().copied());
        out.extend(self.two_arguments_lambda.iter().copied());
        out
    }

    /// Inverse of [`Attribute::to_vec`]. `None` if `v` isn't exactly
    /// [`ATTRIBUTE_LENGTH`] long.
    pub fn from_vec(v: &[f64]) -> Option<Attribute> {
        if v.len() != ATTRIBUTE_LENGTH {
            return None;
        }
        let mut attribute = Attribute::default();
        let mut i = 0;
        for b in attribute.functions.iter_mut() {
            *b = v[i];
            i += 1;
        }
        for b in attribute.predicates.iter_mut() {
            *b = v[i];
            i += 1;
        }
        for b in attribute.one_argument_lambda.iter_mut() {
            *b = v[i];
            i += 1;
        }
        for b in attribute.two_arguments_lambda.iter_mut() {
            *b = v[i];
            i += 1;
        }
        Some(attribute)
    }
}
