// ABOUTME: Big-step interpreter evaluating a program over a read-once input stream

use crate::ast::{Argument, Function, OneArgumentLambda, PredicateLambda, Program, Statement,
                  TwoArgumentsLambda, Variable};
use crate::value::Value;
use std::collections::BTreeMap;

/// The interpreter's state while processing a program: the bindings
/// produced so far, the input tuple, and how many `ReadInt`/`ReadList`
/// statements have consumed from it.
#[derive(Debug, Clone)]
pub struct Environment {
    pub variables: BTreeMap<Variable, Value>,
    pub input: Vec<Value>,
    pub offset: usize,
}

impl Environment {
    pub fn new(input: Vec<Value>) -> Self {
        Environment {
            variables: BTreeMap::new(),
            input,
            offset: 0,
        }
    }

    fn lookup(&self, argument: &Argument) -> Value {
        match argument.variable() {
            Some(v) => self.variables.get(&v).cloned().unwrap_or(Value::Null),
            None => Value::Null,
        }
    }
}

fn one_argument_lambda(lambda: OneArgumentLambda, x: i64) -> i64 {
    match lambda {
        OneArgumentLambda::Plus1 => x + 1,
        OneArgumentLambda::Minus1 => x - 1,
        OneArgumentLambda::MultiplyMinus1 => x * -1,
        OneArgumentLambda::Multiply2 => x * 2,
        OneArgumentLambda::Multiply3 => x * 3,
        OneArgumentLambda::Multiply4 => x * 4,
        OneArgumentLambda::Divide2 => x / 2,
        OneArgumentLambda::Divide3 => x / 3,
        OneArgumentLambda::Divide4 => x / 4,
        OneArgumentLambda::Pow2 => x * x,
    }
}

fn two_arguments_lambda(lambda: TwoArgumentsLambda, x: i64, y: i64) -> i64 {
    match lambda {
        TwoArgumentsLambda::Plus => x + y,
        TwoArgumentsLambda::Minus => x - y,
        TwoArgumentsLambda::Multiply => x * y,
        TwoArgumentsLambda::Min => x.min(y),
        TwoArgumentsLambda::Max => x.max(y),
    }
}

fn predicate_lambda(predicate: PredicateLambda, x: i64) -> bool {
    match predicate {
        PredicateLambda::IsPositive => x > 0,
        PredicateLambda::IsNegative => x < 0,
        PredicateLambda::IsEven => x % 2 == 0,
        PredicateLambda::IsOdd => (x % 2).abs() == 1,
    }
}

/// Evaluates one statement's function over its (already-bound) arguments.
/// Returns `Value::Null` for every undefined case: an empty-list reduction,
/// an out-of-range index, or a type mismatch between an argument and the
/// slot it fills.
fn eval_function(function: Function, arguments: &[Argument], env: &mut Environment) -> Value {
    match function {
        Function::Head => match env.lookup(&arguments[0]).list() {
            Some(l) => l.first().copied().map(Value::Integer).unwrap_or(Value::Null),
            None => Value::Null,
        },
        Function::Last => match env.lookup(&arguments[0]).list() {
            Some(l) => l.last().copied().map(Value::Integer).unwrap_or(Value::Null),
            None => Value::Null,
        },
        Function::Take => {
            let n = env.lookup(&arguments[0]).integer();
            let list = env.lookup(&arguments[1]).list().map(|l| l.to_vec());
            match (n, list) {
                (Some(n), Some(l)) => {
                    if n < 0 {
                        Value::List(vec![])
                    } else {
                        let n = (n as usize).min(l.len());
                        Value::List(l[..n].to_vec())
                    }
                }
                _ => Value::Null,
            }
        }
        Function::Drop => {
            let n = env.lookup(&arguments[0]).integer();
            let list = env.lookup(&arguments[1]).list().map(|l| l.to_vec());
            match (n, list) {
                (Some(n), Some(l)) => {
                    if n < 0 {
                        Value::List(vec![])
                    } else {
                        let n = (n as usize).min(l.len());
                        Value::List(l[n..].to_vec())
                    }
                }
                _ => Value::Null,
            }
        }
        Function::Access => {
            let n = env.lookup(&arguments[0]).integer();
            let list = env.lookup(&arguments[1]).list().map(|l| l.to_vec());
            match (n, list) {
                (Some(n), Some(l)) if n >= 0 && (n as usize) < l.len() => {
                    Value::Integer(l[n as usize])
                }
                _ => Value::Null,
            }
        }
        Function::Minimum => match env.lookup(&arguments[0]).list() {
            Some(l) => l.iter().min().copied().map(Value::Integer).unwrap_or(Value::Null),
            None => Value::Null,
        },
        Function::Maximum => match env.lookup(&arguments[0]).list() {
            Some(l) => l.iter().max().copied().map(Value::Integer).unwrap_or(Value::Null),
            None => Value::Null,
        },
        Function::Reverse => match env.lookup(&arguments[0]).list() {
            Some(l) => {
                let mut l = l.to_vec();
                l.reverse();
                Value::List(l)
            }
            None => Value::Null,
        },
        Function::Sort => match env.lookup(&arguments[0]).list() {
            Some(l) => {
                let mut l = l.to_vec();
                l.sort();
                Value::List(l)
            }
            None => Value::Null,
        },
        Function::Sum => match env.lookup(&arguments[0]).list() {
            Some(l) => Value::Integer(l.iter().sum()),
            None => Value::Null,
        },
        Function::Map => {
            let lambda = arguments[0].one_argument_lambda();
            let list = env.lookup(&arguments[1]).list().map(|l| l.to_vec());
            match (lambda, list) {
                (Some(lambda), Some(l)) => {
                    Value::List(l.into_iter().map(|x| one_argument_lambda(lambda, x)).collect())
                }
                _ => Value::Null,
            }
        }
        Function::Filter => {
            let predicate = arguments[0].predicate();
            let list = env.lookup(&arguments[1]).list().map(|l| l.to_vec());
            match (predicate, list) {
                (Some(predicate), Some(l)) => Value::List(
                    l.into_iter()
                        .filter(|x| predicate_lambda(predicate, *x))
                        .collect(),
                ),
                _ => Value::Null,
            }
        }
        Function::Count => {
            let predicate = arguments[0].predicate();
            let list = env.lookup(&arguments[1]).list().map(|l| l.to_vec());
            match (predicate, list) {
                (Some(predicate), Some(l)) => Value::Integer(
                    l.into_iter().filter(|x| predicate_lambda(predicate, *x)).count() as i64,
                ),
                _ => Value::Null,
            }
        }
        Function::ZipWith => {
            let lambda = arguments[0].two_arguments_lambda();
            let l1 = env.lookup(&arguments[1]).list().map(|l| l.to_vec());
            let l2 = env.lookup(&arguments[2]).list().map(|l| l.to_vec());
            match (lambda, l1, l2) {
                (Some(lambda), Some(l1), Some(l2)) => Value::List(
                    l1.iter()
                        .zip(l2.iter())
                        .map(|(&x, &y)| two_arguments_lambda(lambda, x, y))
                        .collect(),
                ),
                _ => Value::Null,
            }
        }
        Function::Scanl1 => {
            let lambda = arguments[0].two_arguments_lambda();
            let list = env.lookup(&arguments[1]).list().map(|l| l.to_vec());
            match (lambda, list) {
                (Some(lambda), Some(l)) => {
                    let mut out = Vec::with_capacity(l.len());
                    for (i, x) in l.into_iter().enumerate() {
                        if i == 0 {
                            out.push(x);
                        } else {
                            let prev = out[i - 1];
                            out.push(two_arguments_lambda(lambda, prev, x));
                        }
                    }
                    Value::List(out)
                }
                _ => Value::Null,
            }
        }
        Function::ReadInt => {
            let value = env.input.get(env.offset).cloned().unwrap_or(Value::Null);
            env.offset += 1;
            if value.integer().is_some() {
                value
            } else {
                Value::Null
            }
        }
        Function::ReadList => {
            let value = env.input.get(env.offset).cloned().unwrap_or(Value::Null);
            env.offset += 1;
            if value.list().is_some() {
                value
            } else {
                Value::Null
            }
        }
    }
}

/// Advances `env` by one statement, returning the new environment with that
/// statement's binding added. Never fails: a malformed argument just
/// produces `Value::Null` for that statement.
pub fn step(statement: &Statement, env: &Environment) -> Environment {
    let mut next = env.clone();
    let value = eval_function(statement.function, &statement.arguments, &mut next);
    next.variables.insert(statement.variable, value);
    next
}

/// Evaluates an entire program on one input tuple. `None` only for an empty
/// program; every other program yields the last statement's binding (which
/// may itself be `Value::Null`).
pub fn eval(program: &Program, input: &[Value]) -> Option<Value> {
    if program.is_empty() {
        return None;
    }
    let mut env = Environment::new(input.to_vec());
    for statement in program {
        env = step(statement, &env);
    }
    Some(env.variables.get(&program.last().unwrap().variable).cloned().unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;

    #[test]
    fn test_empty_program_fails() {
        assert_eq!(eval(&vec![], &[]), None);
    }

    #[test]
    fn test_head_of_empty_list_is_null() {
        let program = vec![
            Statement::new(0, Function::ReadList, vec![]),
            Statement::new(1, Function::Head, vec![Argument::Variable(0)]),
        ];
        assert_eq!(eval(&program, &[Value::List(vec![])]), Some(Value::Null));
    }

    #[test]
    fn test_sum_of_empty_list_is_zero() {
        let program = vec![
            Statement::new(0, Function::ReadList, vec![]),
            Statement::new(1, Function::Sum, vec![Argument::Variable(0)]),
        ];
        assert_eq!(eval(&program, &[Value::List(vec![])]), Some(Value::Integer(0)));
    }

    #[test]
    fn test_take_negative_is_empty() {
        let program = vec![
            Statement::new(0, Function::ReadInt, vec![]),
            Statement::new(1, Function::ReadList, vec![]),
            Statement::new(2, Function::Take, vec![Argument::Variable(0), Argument::Variable(1)]),
        ];
        let out = eval(&program, &[Value::Integer(-3), Value::List(vec![1, 2, 3])]);
        assert_eq!(out, Some(Value::List(vec![])));
    }

    #[test]
    fn test_access_out_of_range_is_null() {
        let program = vec![
            Statement::new(0, Function::ReadInt, vec![]),
            Statement::new(1, Function::ReadList, vec![]),
            Statement::new(2, Function::Access, vec![Argument::Variable(0), Argument::Variable(1)]),
        ];
        let out = eval(&program, &[Value::Integer(5), Value::List(vec![1, 2, 3])]);
        assert_eq!(out, Some(Value::Null));
    }

    #[test]
    fn test_scanl1_empty_is_empty() {
        let program = vec![
            Statement::new(0, Function::ReadList, vec![]),
            Statement::new(
                1,
                Function::Scanl1,
                vec![Argument::TwoArg(TwoArgumentsLambda::Plus), Argument::Variable(0)],
            ),
        ];
        assert_eq!(eval(&program, &[Value::List(vec![])]), Some(Value::List(vec![])));
    }

    #[test]
    fn test_scanl1_singleton_is_unchanged() {
        let program = vec![
            Statement::new(0, Function::ReadList, vec![]),
            Statement::new(
                1,
                Function::Scanl1,
                vec![Argument::TwoArg(TwoArgumentsLambda::Plus), Argument::Variable(0)],
            ),
        ];
        assert_eq!(eval(&program, &[Value::List(vec![7])]), Some(Value::List(vec![7])));
    }

    #[test]
    fn test_is_odd_of_negative_one_is_true() {
        let program = vec![
            Statement::new(0, Function::ReadList, vec![]),
            Statement::new(
                1,
                Function::Filter,
                vec![Argument::Predicate(PredicateLambda::IsOdd), Argument::Variable(0)],
            ),
        ];
        let out = eval(&program, &[Value::List(vec![-1])]);
        assert_eq!(out, Some(Value::List(vec![-1])));
    }

    #[test]
    fn test_determinism() {
        let program = vec![
            Statement::new(0, Function::ReadList, vec![]),
            Statement::new(1, Function::Sort, vec![Argument::Variable(0)]),
        ];
        let input = vec![Value::List(vec![3, 1, 2])];
        assert_eq!(eval(&program, &input), eval(&program, &input));
    }

    #[test]
    fn test_sort_take_sum_pipeline() {
        // [ReadInt; ReadList; Sort 1; Take 0 2; Sum 3] on (2, [3,5,4,7,5]) -> 7
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
    fn test_map_zipwith_maximum_pipeline() {
        // [ReadList; ReadList; Map *3 0; ZipWith + 1 2; Maximum 3]
        let program = vec![
            Statement::new(0, Function::ReadList, vec![]),
            Statement::new(1, Function::ReadList, vec![]),
            Statement::new(
                2,
                Function::Map,
                vec![Argument::OneArg(OneArgumentLambda::Multiply3), Argument::Variable(0)],
            ),
            Statement::new(
                3,
                Function::ZipWith,
                vec![
                    Argument::TwoArg(TwoArgumentsLambda::Plus),
                    Argument::Variable(1),
                    Argument::Variable(2),
                ],
            ),
            Statement::new(4, Function::Maximum, vec![Argument::Variable(3)]),
        ];
        let input = vec![
            Value::List(vec![6, 2, 4, 7, 9]),
            Value::List(vec![5, 3, 6, 1, 0]),
        ];
        assert_eq!(eval(&program, &input), Some(Value::Integer(27)));
    }
}
