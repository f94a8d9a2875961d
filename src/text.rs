// ABOUTME: Textual program notation (`a <- head ab` style) used for golden-test fixtures
//
// This is a left-inverse of a program's textual rendering, not a general
// front-end: every function, lambda, and predicate keyword below must stay
// in sync with [`crate::ast`]'s enums, and malformed input is reported via
// [`crate::error::ParseError`] rather than silently recovered from.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{multispace0, multispace1},
    combinator::{map, map_res},
    multi::many0,
    sequence::preceded,
    IResult, Parser,
};
use std::fmt;

use crate::ast::{
    Argument, Function, OneArgumentLambda, PredicateLambda, Program, Statement, TwoArgumentsLambda,
    Variable,
};
use crate::error::ParseError;

/// Renders a variable index in the source's base-26 letter notation.
/// Variables below 26 are a single letter (`a`..`z`); at and above 26 this
/// is ordinary bijective base-26, except the *leading* digit is one short
/// of its usual place value (`ab` names variable 27, not 28, `aba` names
/// 702) — preserved exactly since golden fixtures pin it. Generalizes past
/// two letters the same way the source's loop does.
pub fn stringify_variable(v: Variable) -> String {
    let mut digits = Vec::new();
    let mut x = v as u32;
    while x >= 26 {
        digits.push((x % 26) as u8);
        x /= 26;
    }
    if v >= 26 {
        x -= 1;
    }
    digits.push(x as u8);
    digits.iter().rev().map(|&d| (b'a' + d) as char).collect()
}

fn function_keyword(function: Function) -> &'static str {
    match function {
        Function::Head => "head",
        Function::Last => "last",
        Function::Take => "take",
        Function::Drop => "drop",
        Function::Access => "access",
        Function::Minimum => "minimum",
        Function::Maximum => "maximum",
        Function::Reverse => "reverse",
        Function::Sort => "sort",
        Function::Sum => "sum",
        Function::Map => "map",
        Function::Filter => "filter",
        Function::Count => "count",
        Function::ZipWith => "zip_with",
        Function::Scanl1 => "scanl1",
        Function::ReadInt => "read_int",
        Function::ReadList => "read_list",
    }
}

fn function_from_keyword(s: &str) -> Option<Function> {
    Some(match s {
        "head" => Function::Head,
        "last" => Function::Last,
        "take" => Function::Take,
        "drop" => Function::Drop,
        "access" => Function::Access,
        "minimum" => Function::Minimum,
        "maximum" => Function::Maximum,
        "reverse" => Function::Reverse,
        "sort" => Function::Sort,
        "sum" => Function::Sum,
        "map" => Function::Map,
        "filter" => Function::Filter,
        "count" => Function::Count,
        "zip_with" => Function::ZipWith,
        "scanl1" => Function::Scanl1,
        "read_int" => Function::ReadInt,
        "read_list" => Function::ReadList,
        _ => return None,
    })
}

fn one_argument_lambda_keyword(lambda: OneArgumentLambda) -> &'static str {
    match lambda {
        OneArgumentLambda::Plus1 => "+1",
        OneArgumentLambda::Minus1 => "-1",
        OneArgumentLambda::MultiplyMinus1 => "*(-1)",
        OneArgumentLambda::Multiply2 => "*2",
        OneArgumentLambda::Multiply3 => "*3",
        OneArgumentLambda::Multiply4 => "*4",
        OneArgumentLambda::Divide2 => "/2",
        OneArgumentLambda::Divide3 => "/3",
        OneArgumentLambda::Divide4 => "/4",
        OneArgumentLambda::Pow2 => "**2",
    }
}

fn one_argument_lambda_from_keyword(s: &str) -> Option<OneArgumentLambda> {
    Some(match s {
        "+1" => OneArgumentLambda::Plus1,
        "-1" => OneArgumentLambda::Minus1,
        "*(-1)" => OneArgumentLambda::MultiplyMinus1,
        "*2" => OneArgumentLambda::Multiply2,
        "*3" => OneArgumentLambda::Multiply3,
        "*4" => OneArgumentLambda::Multiply4,
        "/2" => OneArgumentLambda::Divide2,
        "/3" => OneArgumentLambda::Divide3,
        "/4" => OneArgumentLambda::Divide4,
        "**2" => OneArgumentLambda::Pow2,
        _ => return None,
    })
}

fn two_arguments_lambda_keyword(lambda: TwoArgumentsLambda) -> &'static str {
    match lambda {
        TwoArgumentsLambda::Plus => "+",
        TwoArgumentsLambda::Minus => "-",
        TwoArgumentsLambda::Multiply => "*",
        TwoArgumentsLambda::Min => "MIN",
        TwoArgumentsLambda::Max => "MAX",
    }
}

fn two_arguments_lambda_from_keyword(s: &str) -> Option<TwoArgumentsLambda> {
    Some(match s {
        "+" => TwoArgumentsLambda::Plus,
        "-" => TwoArgumentsLambda::Minus,
        "*" => TwoArgumentsLambda::Multiply,
        "MIN" => TwoArgumentsLambda::Min,
        "MAX" => TwoArgumentsLambda::Max,
        _ => return None,
    })
}

fn predicate_lambda_keyword(predicate: PredicateLambda) -> &'static str {
    match predicate {
        PredicateLambda::IsPositive => ">0",
        PredicateLambda::IsNegative => "<0",
        PredicateLambda::IsEven => "%2 == 0",
        PredicateLambda::IsOdd => "%2 == 1",
    }
}

fn predicate_lambda_from_keyword(s: &str) -> Option<PredicateLambda> {
    Some(match s {
        ">0" => PredicateLambda::IsPositive,
        "<0" => PredicateLambda::IsNegative,
        "%2 == 0" => PredicateLambda::IsEven,
        "%2 == 1" => PredicateLambda::IsOdd,
        _ => return None,
    })
}

fn stringify_argument(argument: &Argument) -> String {
    match argument {
        Argument::Variable(v) => stringify_variable(*v),
        Argument::Predicate(p) => predicate_lambda_keyword(*p).to_string(),
        Argument::OneArg(l) => one_argument_lambda_keyword(*l).to_string(),
        Argument::TwoArg(l) => two_arguments_lambda_keyword(*l).to_string(),
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <- {}", stringify_variable(self.variable), function_keyword(self.function))?;
        for argument in &self.arguments {
            write!(f, " {}", stringify_argument(argument))?;
        }
        Ok(())
    }
}

/// Renders a program the way the source's `operator<<(Program)` does: one
/// statement per line, fenced top and bottom by a bare `---` line.
pub fn stringify_program(program: &Program) -> String {
    let mut out = String::from("---\n");
    for statement in program {
        out.push_str(&statement.to_string());
        out.push('\n');
    }
    out.push_str("---\n");
    out
}

// ============================================================================
// Parsing
// ============================================================================

/// Left inverse of [`stringify_variable`], generalized to any number of
/// letters: the leading digit is read back one *more* than its face value
/// (undoing the stringifier's leading-digit decrement), then every
/// remaining letter folds in as an ordinary base-26 digit.
fn parse_variable(input: &str) -> IResult<&str, Variable> {
    map_res(nom::character::complete::alpha1, |s: &str| -> Result<Variable, ()> {
        let bytes = s.as_bytes();
        if bytes.is_empty() {
            return Err(());
        }
        let mut digits = bytes.iter().map(|&b| (b - b'a') as u32);
        let mut v = digits.next().unwrap();
        if bytes.len() > 1 {
            v += 1;
        }
        for d in digits {
            v = v * 26 + d;
        }
        u16::try_from(v).map_err(|_| ())
    })
    .parse(input)
}

/// A keyword token: ASCII letters or underscores (covers `zip_with`,
/// `read_int`, `read_list` as well as the single-word function names).
fn parse_keyword(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphabetic() || c == '_')(input)
}

fn parse_one_argument_lambda(input: &str) -> IResult<&str, OneArgumentLambda> {
    map_res(
        alt((
            tag("**2"),
            tag("*(-1)"),
            tag("*2"),
            tag("*3"),
            tag("*4"),
            tag("/2"),
            tag("/3"),
            tag("/4"),
            tag("+1"),
            tag("-1"),
        )),
        |s: &str| one_argument_lambda_from_keyword(s).ok_or(()),
    )
    .parse(input)
}

fn parse_two_arguments_lambda(input: &str) -> IResult<&str, TwoArgumentsLambda> {
    alt((
        map_res(tag("MIN"), |s: &str| two_arguments_lambda_from_keyword(s).ok_or(())),
        map_res(tag("MAX"), |s: &str| two_arguments_lambda_from_keyword(s).ok_or(())),
        map_res(tag("+"), |s: &str| two_arguments_lambda_from_keyword(s).ok_or(())),
        map_res(tag("-"), |s: &str| two_arguments_lambda_from_keyword(s).ok_or(())),
        map_res(tag("*"), |s: &str| two_arguments_lambda_from_keyword(s).ok_or(())),
    ))
    .parse(input)
}

fn parse_predicate_lambda(input: &str) -> IResult<&str, PredicateLambda> {
    alt((
        map_res(tag("%2 == 0"), |s: &str| predicate_lambda_from_keyword(s).ok_or(())),
        map_res(tag("%2 == 1"), |s: &str| predicate_lambda_from_keyword(s).ok_or(())),
        map_res(tag(">0"), |s: &str| predicate_lambda_from_keyword(s).ok_or(())),
        map_res(tag("<0"), |s: &str| predicate_lambda_from_keyword(s).ok_or(())),
    ))
    .parse(input)
}

fn parse_argument(input: &str) -> IResult<&str, Argument> {
    alt((
        map(parse_predicate_lambda, Argument::Predicate),
        map(parse_one_argument_lambda, Argument::OneArg),
        map(parse_two_arguments_lambda, Argument::TwoArg),
        map(parse_variable, Argument::Variable),
    ))
    .parse(input)
}

fn parse_statement(input: &str) -> IResult<&str, (Variable, &str, Vec<Argument>)> {
    let (input, variable) = parse_variable(input)?;
    let (input, _) = preceded(multispace0, tag("<-")).parse(input)?;
    let (input, _) = multispace1(input)?;
    let (input, keyword) = parse_keyword(input)?;
    let (input, arguments) = many0(preceded(multispace1, parse_argument)).parse(input)?;
    Ok((input, (variable, keyword, arguments)))
}

/// Parses a program in the textual form written by [`stringify_program`]:
/// an optional fencing `---` line, a newline-separated sequence of
/// `variable <- function arguments` statements, and an optional closing
/// `---` line. The fences may be omitted — only the statement lines matter.
pub fn parse_program(text: &str) -> Result<Program, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::UnexpectedEof);
    }

    let mut program = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line == "---" {
            continue;
        }

        let (rest, (variable, keyword, arguments)) = parse_statement(line)
            .map_err(|e| ParseError::Malformed(format!("{line}: {e:?}")))?;
        if !rest.trim().is_empty() {
            return Err(ParseError::Malformed(format!("trailing input: {rest}")));
        }

        let function = function_from_keyword(keyword).ok_or_else(|| ParseError::UnknownFunction(keyword.to_string()))?;

        let expected = crate::types::get_signature(function).argument_types.len();
        if arguments.len() != expected {
            return Err(ParseError::ArityMismatch {
                function: keyword.to_string(),
                expected,
                actual: arguments.len(),
            });
        }

        program.push(Statement::new(variable, function, arguments));
    }

    if program.is_empty() {
        return Err(ParseError::UnexpectedEof);
    }
    Ok(program)
}
