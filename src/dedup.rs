// ABOUTME: Dataset deduplication by input/output equivalence within one input-type bucket

use crate::ast::Program;
use crate::config::EXAMPLE_NUM;
use crate::generator::Example;
use crate::interp::eval;

/// Whether `program` reproduces every one of `examples`' outputs on their
/// own inputs. Used both to re-check a candidate's own bundle and, in
/// [`DatasetForOneInputType::insert`], to cross-check it against another
/// program's bundle.
fn matches(program: &Program, examples: &[Example]) -> bool {
    examples
        .iter()
        .all(|e| eval(program, &e.input) == Some(e.output.clone()))
}

/// Two `(program, examples)` pairs are input/output-equivalent when each
/// program reproduces the *other's* example bundle: `new` must
/// explain `existing`'s inputs, and `existing` must explain `new`'s.
fn equivalent(new: &Program, new_examples: &[Example], existing: &Program, existing_examples: &[Example]) -> bool {
    matches(new, existing_examples) && matches(existing, new_examples)
}

/// One bucket of a dataset — all programs sharing the same output shape
/// (Integer vs. List) and input-type shape, as decided by the external
/// driver. Holds, for each distinct I/O behavior observed, the shortest
/// program found so far together with the example bundle that witnesses it
/// (needed later to cross-check newly-offered candidates).
#[derive(Debug, Default)]
pub struct DatasetForOneInputType {
    entries: Vec<(Program, Vec<Example>)>,
}

impl DatasetForOneInputType {
    pub fn new() -> Self {
        DatasetForOneInputType { entries: Vec::new() }
    }

    /// Offers `(program, examples)` to the bucket. `examples.len()` must
    /// equal [`EXAMPLE_NUM`] — bundles of any other size are rejected
    /// outright since they can't be meaningfully compared against the rest
    /// of the dataset.
    ///
    /// If an existing entry is I/O-equivalent to `program` (checked
    /// both ways): the shorter of the two survives, ties keeping the
    /// existing entry. Equivalent-but-longer existing entries are removed.
    /// If nothing is equivalent, `program` is inserted as a new entry.
    /// Returns `true` if `program` ended up a kept representative.
    pub fn insert(&mut self, program: Program, examples: &[Example]) -> bool {
        if examples.len() != EXAMPLE_NUM {
            return false;
        }

        let mut displaced = Vec::new();
        for (i, (existing, existing_examples)) in self.entries.iter().enumerate() {
            if equivalent(&program, examples, existing, existing_examples) {
                if existing.len() > program.len() {
                    displaced.push(i);
                } else {
                    return false;
                }
            }
        }

        for i in displaced.into_iter().rev() {
            self.entries.remove(i);
        }
        self.entries.push((program, examples.to_vec()));
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn programs(&self) -> impl Iterator<Item = &Program> {
        self.entries.iter().map(|(p, _)| p)
    }
}
