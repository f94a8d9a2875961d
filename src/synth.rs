// ABOUTME: Search strategies that find a program matching a set of input/output examples

use crate::ast::{Function, OneArgumentLambda, PredicateLambda, Program, Statement, TwoArgumentsLambda,
                  ALL_ONE_ARGUMENT_LAMBDAS, ALL_PREDICATE_LAMBDAS, ALL_TWO_ARGUMENTS_LAMBDAS,
                  NON_READER_FUNCTIONS};
use crate::attribute::Attribute;
use crate::enumerate::{enumerate_from, Restriction};
use crate::generator::Example;
use crate::interp::{step, Environment};
use crate::value::Value;

/// Per-example search state threaded through the enumerator's `calc_info`:
/// one [`Environment`] per example, each already advanced through every
/// statement of the program the info is paired with. Rebuilding this by
/// stepping only the newest statement (rather than re-interpreting the whole
/// candidate from scratch on every node) is the reason the enumerator takes
/// an arbitrary `Info` accumulator at all.
#[derive(Clone)]
struct SearchInfo {
    envs: Vec<Environment>,
}

/// Statements reading each example's input values, in order, so every
/// search starts from a program already bound to the example inputs.
fn reader_prefix(examples: &[Example]) -> Option<Program> {
    let first = examples.first()?;
    let mut prefix = Vec::with_capacity(first.input.len());
    for (i, value) in first.input.iter().enumerate() {
        let function = match value {
            Value::Integer(_) => Function::ReadInt,
            Value::List(_) => Function::ReadList,
            Value::Null => return None,
        };
        prefix.push(Statement::new(i as u16, function, vec![]));
    }
    Some(prefix)
}

/// Evaluates `prefix` over each example's input, producing the initial
/// per-example environments the search extends from.
fn initial_envs(prefix: &Program, examples: &[Example]) -> SearchInfo {
    let envs = examples
        .iter()
        .map(|example| {
            let mut env = Environment::new(example.input.clone());
            for statement in prefix {
                env = step(statement, &env);
            }
            env
        })
        .collect();
    SearchInfo { envs }
}

/// Stable-sorts `items` descending by their paired `scores`, preserving
/// declaration order among ties (matching the DFS ordering rule).
fn sorted_by_score<T: Copy>(items: &[T], scores: &[f64]) -> Vec<T> {
    let mut paired: Vec<(T, f64)> = items.iter().copied().zip(scores.iter().copied()).collect();
    paired.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    paired.into_iter().map(|(t, _)| t).collect()
}

fn run_search(restriction: &Restriction, prefix: &Program, examples: &[Example]) -> Option<Program> {
    let calc_info = |program: &Program, info: &SearchInfo| -> SearchInfo {
        let statement = program.last().expect("candidate program is never empty");
        SearchInfo {
            envs: info.envs.iter().map(|env| step(statement, env)).collect(),
        }
    };

    let mut found: Option<Program> = None;
    let mut process = |candidate: &Program, info: &SearchInfo| {
        let last_var = candidate.last().expect("candidate program is never empty").variable;
        let matches_all = info
            .envs
            .iter()
            .zip(examples)
            .all(|(env, example)| env.variables.get(&last_var).cloned().unwrap_or(Value::Null) == example.output);
        if matches_all {
            found = Some(candidate.clone());
            false
        } else {
            true
        }
    };

    enumerate_from(restriction, &calc_info, &mut process, prefix, initial_envs(prefix, examples));
    found
}

/// Depth-first search over every well-typed program extending the example's
/// input readers, up to `max_length` statements beyond the reader prefix.
/// Every primitive is
/// eligible — `attribute` only orders the search (descending by score) so
/// that the most plausible primitives are tried first; it never excludes a
/// primitive the attribute scored at zero.
pub fn dfs(max_length: usize, attribute: &Attribute, examples: &[Example]) -> Option<Program> {
    let prefix = reader_prefix(examples)?;

    let restriction = Restriction {
        min_length: prefix.len() + 1,
        max_length: prefix.len() + max_length,
        functions: sorted_by_score(&NON_READER_FUNCTIONS, &attribute.functions),
        predicates: sorted_by_score(&ALL_PREDICATE_LAMBDAS, &attribute.predicates),
        one_argument_lambda: sorted_by_score(&ALL_ONE_ARGUMENT_LAMBDAS, &attribute.one_argument_lambda),
        two_arguments_lambda: sorted_by_score(&ALL_TWO_ARGUMENTS_LAMBDAS, &attribute.two_arguments_lambda),
    };

    run_search(&restriction, &prefix, examples)
}

/// One primitive pool, in descending-score order, with a cursor marking how
/// much of it has been unlocked so far.
struct Queue<T> {
    items: Vec<(T, f64)>,
    unlocked: usize,
}

impl<T: Copy> Queue<T> {
    fn new(items: &[T], scores: &[f64]) -> Self {
        let mut paired: Vec<(T, f64)> = items.iter().copied().zip(scores.iter().copied()).collect();
        paired.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        Queue { items: paired, unlocked: 0 }
    }

    fn next_score(&self) -> Option<f64> {
        self.items.get(self.unlocked).map(|(_, s)| *s)
    }

    fn unlock_one(&mut self) {
        self.unlocked += 1;
    }

    fn unlocked_items(&self) -> Vec<T> {
        self.items[..self.unlocked].iter().map(|(t, _)| *t).collect()
    }
}

/// Incrementally unlocks primitives in descending attribute-score order
/// across all four pools at once (not one pool at a time): each step adds
/// whichever still-locked primitive — of any kind — has the single highest
/// remaining score, ties broken function > predicate > one-arg > two-arg.
/// Runs a full search after every unlock; stops at the first success or
/// once every primitive has been unlocked.
pub fn sort_and_add(max_length: usize, attribute: &Attribute, examples: &[Example]) -> Option<Program> {
    let prefix = reader_prefix(examples)?;

    let mut functions = Queue::new(&NON_READER_FUNCTIONS, &attribute.functions);
    let mut predicates = Queue::new(&ALL_PREDICATE_LAMBDAS, &attribute.predicates);
    let mut one_argument_lambda = Queue::new(&ALL_ONE_ARGUMENT_LAMBDAS, &attribute.one_argument_lambda);
    let mut two_arguments_lambda = Queue::new(&ALL_TWO_ARGUMENTS_LAMBDAS, &attribute.two_arguments_lambda);

    loop {
        let restriction = Restriction {
            min_length: prefix.len() + 1,
            max_length: prefix.len() + max_length,
            functions: functions.unlocked_items(),
            predicates: predicates.unlocked_items(),
            one_argument_lambda: one_argument_lambda.unlocked_items(),
            two_arguments_lambda: two_arguments_lambda.unlocked_items(),
        };

        if !restriction.functions.is_empty() {
            if let Some(found) = run_search(&restriction, &prefix, examples) {
                return Some(found);
            }
        }

        let candidates = [
            functions.next_score(),
            predicates.next_score(),
            one_argument_lambda.next_score(),
            two_arguments_lambda.next_score(),
        ];

        let best = candidates
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.map(|s| (i, s)))
            .max_by(|(ai, a), (bi, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal).then(bi.cmp(ai)));

        match best {
            Some((0, _)) => functions.unlock_one(),
            Some((1, _)) => predicates.unlock_one(),
            Some((2, _)) => one_argument_lambda.unlock_one(),
            Some((3, _)) => two_arguments_lambda.unlock_one(),
            _ => return None,
        }
    }
}
