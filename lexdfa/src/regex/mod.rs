//! Shunting-yard parser that turns one pattern into an NFA fragment.
//!
//! An imperative two-stack evaluation loop rather than a recursive-descent or
//! combinator grammar: an operator stack (with an `LPAREN` marker at the
//! lowest precedence) and a fragment stack, with each operator constructing
//! its fragment from the fragment stack via Thompson's rules the moment it is
//! popped.

use crate::codeunit::{CodeUnit, SENTINEL};
use crate::error::{CompileError, PatternSyntaxError};
use crate::nfa::{Fragment, Label, Nfa};

const ALTERNATION: CodeUnit = b'|' as CodeUnit;
const CONCAT: CodeUnit = b'.' as CodeUnit;
const STAR: CodeUnit = b'*' as CodeUnit;
const OPTION: CodeUnit = b'?' as CodeUnit;
const PLUS: CodeUnit = b'+' as CodeUnit;
const LPAREN: CodeUnit = b'(' as CodeUnit;
const RPAREN: CodeUnit = b')' as CodeUnit;
const ESCAPE: CodeUnit = b'\\' as CodeUnit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    LParen,
    Concat,
    Alternation,
    Star,
    Option,
    Repetition,
}

impl Op {
    /// Alternation < concatenation < {star, option, repetition}; `LParen` sits
    /// below everything so it is never popped by an ordinary operator.
    fn precedence(self) -> i8 {
        match self {
            Op::LParen => -1,
            Op::Alternation => 0,
            Op::Concat => 1,
            Op::Star | Op::Option | Op::Repetition => 2,
        }
    }

    fn symbol(self) -> char {
        match self {
            Op::LParen => '(',
            Op::Concat => '.',
            Op::Alternation => '|',
            Op::Star => '*',
            Op::Option => '?',
            Op::Repetition => '+',
        }
    }
}

/// Parses `pattern`, allocating its NFA fragment into `nfa`, tags the
/// fragment's end state with `accepts`, and epsilon-links the fragment from
/// the super-start. `pattern_index` is carried only for error reporting.
pub fn compile_pattern(
    nfa: &mut Nfa,
    pattern: &[CodeUnit],
    accepts: Label,
    pattern_index: usize,
) -> Result<(), CompileError> {
    if pattern.is_empty() {
        return Err(syntax(pattern_index, PatternSyntaxError::EmptyPattern));
    }

    let mut operators: Vec<(Op, usize)> = Vec::new();
    let mut fragments: Vec<Fragment> = Vec::new();
    // `cat` tracks whether the previous token closed an operand; when true
    // and the next token opens a new operand, an implicit concatenation is
    // inserted first.
    let mut cat = false;

    let mut i = 0;
    while i < pattern.len() {
        let c = pattern[i];
        if c == SENTINEL {
            return Err(CompileError::PatternAlphabet {
                pattern_index,
                position: i,
            });
        }
        match c {
            LPAREN => {
                if cat {
                    push_op(&mut operators, &mut fragments, nfa, Op::Concat, i, pattern_index)?;
                }
                operators.push((Op::LParen, i));
                cat = false;
            }
            RPAREN => {
                loop {
                    match operators.pop() {
                        Some((Op::LParen, _)) => break,
                        Some((op, pos)) => apply(&mut fragments, nfa, op, pos, pattern_index)?,
                        None => {
                            return Err(syntax(
                                pattern_index,
                                PatternSyntaxError::UnbalancedParens { position: i },
                            ))
                        }
                    }
                }
                cat = true;
            }
            CONCAT => {
                push_op(&mut operators, &mut fragments, nfa, Op::Concat, i, pattern_index)?;
                cat = false;
            }
            ALTERNATION => {
                push_op(&mut operators, &mut fragments, nfa, Op::Alternation, i, pattern_index)?;
                cat = false;
            }
            STAR => {
                push_op(&mut operators, &mut fragments, nfa, Op::Star, i, pattern_index)?;
                cat = true;
            }
            OPTION => {
                push_op(&mut operators, &mut fragments, nfa, Op::Option, i, pattern_index)?;
                cat = true;
            }
            PLUS => {
                push_op(&mut operators, &mut fragments, nfa, Op::Repetition, i, pattern_index)?;
                cat = true;
            }
            ESCAPE => {
                let escape_pos = i;
                i += 1;
                let literal = *pattern.get(i).ok_or_else(|| {
                    syntax(
                        pattern_index,
                        PatternSyntaxError::UnterminatedEscape { position: escape_pos },
                    )
                })?;
                if literal == SENTINEL {
                    return Err(CompileError::PatternAlphabet {
                        pattern_index,
                        position: i,
                    });
                }
                if cat {
                    push_op(&mut operators, &mut fragments, nfa, Op::Concat, escape_pos, pattern_index)?;
                }
                fragments.push(nfa.literal(literal));
                cat = true;
            }
            _ => {
                if cat {
                    push_op(&mut operators, &mut fragments, nfa, Op::Concat, i, pattern_index)?;
                }
                fragments.push(nfa.literal(c));
                cat = true;
            }
        }
        i += 1;
    }

    while let Some((op, pos)) = operators.pop() {
        if op == Op::LParen {
            return Err(syntax(
                pattern_index,
                PatternSyntaxError::UnbalancedParens { position: pos },
            ));
        }
        apply(&mut fragments, nfa, op, pos, pattern_index)?;
    }

    let fragment = fragments
        .pop()
        .ok_or_else(|| syntax(pattern_index, PatternSyntaxError::EmptyPattern))?;
    debug_assert!(
        fragments.is_empty(),
        "shunting-yard left extra operands on the fragment stack"
    );

    nfa.set_accepts(fragment.end, accepts);
    nfa.join(fragment.start);
    Ok(())
}

/// `PopThenPush`: while the operator on top of the stack has precedence `>=`
/// that of `op`, pop and apply it; then push `op`.
fn push_op(
    operators: &mut Vec<(Op, usize)>,
    fragments: &mut Vec<Fragment>,
    nfa: &mut Nfa,
    op: Op,
    pos: usize,
    pattern_index: usize,
) -> Result<(), CompileError> {
    while let Some(&(top, _)) = operators.last() {
        if top.precedence() >= op.precedence() {
            let (top_op, top_pos) = operators.pop().expect("just peeked");
            apply(fragments, nfa, top_op, top_pos, pattern_index)?;
        } else {
            break;
        }
    }
    operators.push((op, pos));
    Ok(())
}

/// Constructs the fragment for `op` from the top of `fragments`, per
/// Thompson's construction rules.
fn apply(
    fragments: &mut Vec<Fragment>,
    nfa: &mut Nfa,
    op: Op,
    pos: usize,
    pattern_index: usize,
) -> Result<(), CompileError> {
    let missing = |op: Op| syntax(pattern_index, PatternSyntaxError::MissingOperand { op: op.symbol(), position: pos });
    match op {
        Op::LParen => unreachable!("an LParen marker is discarded, never applied"),
        Op::Concat => {
            let r = fragments.pop().ok_or_else(|| missing(op))?;
            let l = fragments.pop().ok_or_else(|| missing(op))?;
            fragments.push(nfa.concat(l, r));
        }
        Op::Alternation => {
            let r = fragments.pop().ok_or_else(|| missing(op))?;
            let l = fragments.pop().ok_or_else(|| missing(op))?;
            fragments.push(nfa.alternate(l, r));
        }
        Op::Star => {
            let l = fragments.pop().ok_or_else(|| missing(op))?;
            fragments.push(nfa.star(l));
        }
        Op::Option => {
            let l = fragments.pop().ok_or_else(|| missing(op))?;
            fragments.push(nfa.option(l));
        }
        Op::Repetition => {
            let l = fragments.pop().ok_or_else(|| missing(op))?;
            fragments.push(nfa.plus(l));
        }
    }
    Ok(())
}

fn syntax(pattern_index: usize, source: PatternSyntaxError) -> CompileError {
    CompileError::PatternSyntax { pattern_index, source }
}
