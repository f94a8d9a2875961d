// ABOUTME: Primitive enumerations and the statement/program representation

/// A DSL function. Declaration order matches the attribute vector's layout
/// (minus the two readers) and is relied on by [`crate::attribute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Function {
    Head,
    Last,
    Take,
    Drop,
    Access,
    Minimum,
    Maximum,
    Reverse,
    Sort,
    Sum,
    Map,
    Filter,
    Count,
    ZipWith,
    Scanl1,
    ReadInt,
    ReadList,
}

pub const ALL_FUNCTIONS: [Function; 17] = [
    Function::Head,
    Function::Last,
    Function::Take,
    Function::Drop,
    Function::Access,
    Function::Minimum,
    Function::Maximum,
    Function::Reverse,
    Function::Sort,
    Function::Sum,
    Function::Map,
    Function::Filter,
    Function::Count,
    Function::ZipWith,
    Function::Scanl1,
    Function::ReadInt,
    Function::ReadList,
];

/// Every [`Function`] except the two input readers, in declaration order.
pub const NON_READER_FUNCTIONS: [Function; 15] = [
    Function::Head,
    Function::Last,
    Function::Take,
    Function::Drop,
    Function::Access,
    Function::Minimum,
    Function::Maximum,
    Function::Reverse,
    Function::Sort,
    Function::Sum,
    Function::Map,
    Function::Filter,
    Function::Count,
    Function::ZipWith,
    Function::Scanl1,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PredicateLambda {
    IsPositive,
    IsNegative,
    IsEven,
    IsOdd,
}

pub const ALL_PREDICATE_LAMBDAS: [PredicateLambda; 4] = [
    PredicateLambda::IsPositive,
    PredicateLambda::IsNegative,
    PredicateLambda::IsEven,
    PredicateLambda::IsOdd,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OneArgumentLambda {
    Plus1,
    Minus1,
    MultiplyMinus1,
    Multiply2,
    Multiply3,
    Multiply4,
    Divide2,
    Divide3,
    Divide4,
    Pow2,
}

pub const ALL_ONE_ARGUMENT_LAMBDAS: [OneArgumentLambda; 10] = [
    OneArgumentLambda::Plus1,
    OneArgumentLambda::Minus1,
    OneArgumentLambda::MultiplyMinus1,
    OneArgumentLambda::Multiply2,
    OneArgumentLambda::Multiply3,
    OneArgumentLambda::Multiply4,
    OneArgumentLambda::Divide2,
    OneArgumentLambda::Divide3,
    OneArgumentLambda::Divide4,
    OneArgumentLambda::Pow2,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TwoArgumentsLambda {
    Plus,
    Minus,
    Multiply,
    Min,
    Max,
}

pub const ALL_TWO_ARGUMENTS_LAMBDAS: [TwoArgumentsLambda; 5] = [
    TwoArgumentsLambda::Plus,
    TwoArgumentsLambda::Minus,
    TwoArgumentsLambda::Multiply,
    TwoArgumentsLambda::Min,
    TwoArgumentsLambda::Max,
];

/// A 16-bit variable binding, matching the source's `Variable` width.
pub type Variable = u16;

/// A single argument slot. Each variant corresponds to exactly one of the
/// four disjoint argument kinds; `variable()` returns `None` for the other
/// three, satisfying the mutual-exclusion requirement without any bit
/// packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Argument {
    Variable(Variable),
    Predicate(PredicateLambda),
    OneArg(OneArgumentLambda),
    TwoArg(TwoArgumentsLambda),
}

impl Argument {
    pub fn variable(&self) -> Option<Variable> {
        match self {
            Argument::Variable(v) => Some(*v),
            _ => None,
        }
    }

    pub fn predicate(&self) -> Option<PredicateLambda> {
        match self {
            Argument::Predicate(p) => Some(*p),
            _ => None,
        }
    }

    pub fn one_argument_lambda(&self) -> Option<OneArgumentLambda> {
        match self {
            Argument::OneArg(l) => Some(*l),
            _ => None,
        }
    }

    pub fn two_arguments_lambda(&self) -> Option<TwoArgumentsLambda> {
        match self {
            Argument::TwoArg(l) => Some(*l),
            _ => None,
        }
    }
}

impl From<Variable> for Argument {
    fn from(v: Variable) -> Self {
        Argument::Variable(v)
    }
}

impl From<PredicateLambda> for Argument {
    fn from(l: PredicateLambda) -> Self {
        Argument::Predicate(l)
    }
}

impl From<OneArgumentLambda> for Argument {
    fn from(l: OneArgumentLambda) -> Self {
        Argument::OneArg(l)
    }
}

impl From<TwoArgumentsLambda> for Argument {
    fn from(l: TwoArgumentsLambda) -> Self {
        Argument::TwoArg(l)
    }
}

/// A single `variable <- function arguments...` binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub variable: Variable,
    pub function: Function,
    pub arguments: Vec<Argument>,
}

impl Statement {
    pub fn new(variable: Variable, function: Function, arguments: Vec<Argument>) -> Self {
        Statement {
            variable,
            function,
            arguments,
        }
    }
}

pub type Program = Vec<Statement>;
