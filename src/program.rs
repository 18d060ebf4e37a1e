//! The program being optimised.
//!
//! Parsing Yul and running the real optimiser steps is the job of the
//! compiler; phaser only needs to load a program, run a step sequence on it
//! and measure the result. [`Program`] provides exactly that interface over a
//! lightweight block model: a program is a top-level `{ ... }` block whose
//! body holds whitespace-separated statements and nested blocks.
//!
//! Only steps with a purely structural effect on that model change it:
//! [`BlockFlattener`](OptimisationStep::BlockFlattener) splices nested blocks
//! into their parent and [`UnusedPruner`](OptimisationStep::UnusedPruner)
//! drops empty nested blocks. Every other step leaves the model unchanged.

use std::fmt;

use crate::chromosome::OptimisationStep;

/// A parse error reported while loading a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramError {
    /// Byte offset into the source where the problem was detected.
    pub offset: usize,
    pub message: String,
}

impl ProgramError {
    pub fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error at byte {}: {}", self.offset, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Statement {
    Token(String),
    Block(Vec<Statement>),
}

/// A loaded, immutable program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    body: Vec<Statement>,
}

impl Program {
    /// Parses `source`, returning every error found on failure.
    pub fn load(source: &str) -> Result<Program, Vec<ProgramError>> {
        let mut errors = Vec::new();
        let mut open: Vec<(usize, Vec<Statement>)> = Vec::new();
        let mut root: Option<Vec<Statement>> = None;

        for (offset, token) in tokenize(source) {
            match token {
                "{" => open.push((offset, Vec::new())),
                "}" => match open.pop() {
                    None => errors.push(ProgramError::new(offset, "unexpected '}'")),
                    Some((opened_at, body)) => match open.last_mut() {
                        Some((_, parent)) => parent.push(Statement::Block(body)),
                        None if root.is_none() => root = Some(body),
                        None => errors.push(ProgramError::new(
                            opened_at,
                            "unexpected block after the top-level block",
                        )),
                    },
                },
                word => match open.last_mut() {
                    Some((_, body)) => body.push(Statement::Token(word.to_string())),
                    None => errors.push(ProgramError::new(
                        offset,
                        format!("unexpected {word:?} outside of a block"),
                    )),
                },
            }
        }

        for (opened_at, _) in open {
            errors.push(ProgramError::new(opened_at, "unclosed block"));
        }

        match root {
            Some(body) if errors.is_empty() => Ok(Program { body }),
            None if errors.is_empty() => Err(vec![ProgramError::new(0, "expected a block")]),
            _ => Err(errors),
        }
    }

    /// Runs `steps` in order and returns the transformed program.
    pub fn optimise(&self, steps: &[OptimisationStep]) -> Program {
        let mut body = self.body.clone();
        for &step in steps {
            body = match step {
                OptimisationStep::BlockFlattener => flatten(body),
                OptimisationStep::UnusedPruner => prune_empty_blocks(body),
                _ => body,
            };
        }
        Program { body }
    }

    /// Size measure: statements plus nested blocks, at every depth.
    pub fn code_size(&self) -> usize {
        size_of(&self.body)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_block(f, &self.body)
    }
}

fn write_block(f: &mut fmt::Formatter<'_>, body: &[Statement]) -> fmt::Result {
    write!(f, "{{")?;
    for statement in body {
        match statement {
            Statement::Token(word) => write!(f, " {word}")?,
            Statement::Block(inner) => {
                write!(f, " ")?;
                write_block(f, inner)?;
            }
        }
    }
    write!(f, " }}")
}

/// Splits source into `{`, `}` and whitespace-delimited words, with offsets.
fn tokenize(source: &str) -> Vec<(usize, &str)> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    for (offset, c) in source.char_indices() {
        let is_brace = c == '{' || c == '}';
        if c.is_whitespace() || is_brace {
            if let Some(start) = word_start.take() {
                tokens.push((start, &source[start..offset]));
            }
            if is_brace {
                tokens.push((offset, &source[offset..offset + 1]));
            }
        } else if word_start.is_none() {
            word_start = Some(offset);
        }
    }
    if let Some(start) = word_start {
        tokens.push((start, &source[start..]));
    }
    tokens
}

fn flatten(body: Vec<Statement>) -> Vec<Statement> {
    let mut flat = Vec::with_capacity(body.len());
    for statement in body {
        match statement {
            Statement::Block(inner) => flat.extend(flatten(inner)),
            token => flat.push(token),
        }
    }
    flat
}

fn prune_empty_blocks(body: Vec<Statement>) -> Vec<Statement> {
    body.into_iter()
        .filter_map(|statement| match statement {
            Statement::Block(inner) => {
                let inner = prune_empty_blocks(inner);
                (!inner.is_empty()).then_some(Statement::Block(inner))
            }
            token => Some(token),
        })
        .collect()
}

fn size_of(body: &[Statement]) -> usize {
    body.iter()
        .map(|statement| match statement {
            Statement::Token(_) => 1,
            Statement::Block(inner) => 1 + size_of(inner),
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use OptimisationStep::*;

    #[test]
    fn test_load_empty_block() {
        let program = Program::load("{}").unwrap();
        assert_eq!(program.code_size(), 0);
        assert_eq!(program.to_string(), "{ }");
    }

    #[test]
    fn test_display_is_canonical() {
        let a = Program::load("{ a  {b c}\n{} }").unwrap();
        let b = Program::load(&a.to_string()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "{ a { b c } { } }");
    }

    #[test]
    fn test_code_size_counts_nested_blocks() {
        let program = Program::load("{ a { b c } { } }").unwrap();
        assert_eq!(program.code_size(), 5);
    }

    #[test]
    fn test_load_reports_errors() {
        assert!(Program::load("").is_err());
        assert!(Program::load("   ").is_err());

        let errors = Program::load("{ a").unwrap_err();
        assert_eq!(errors, vec![ProgramError::new(0, "unclosed block")]);

        let errors = Program::load("} { }").unwrap_err();
        assert_eq!(errors[0].offset, 0);

        let errors = Program::load("x { }").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("outside of a block"));

        let errors = Program::load("{ } { }").unwrap_err();
        assert_eq!(errors[0].offset, 4);
    }

    #[test]
    fn test_block_flattener() {
        let program = Program::load("{ a { b { c } } }").unwrap();
        let optimised = program.optimise(&[BlockFlattener]);
        assert_eq!(optimised.to_string(), "{ a b c }");
        assert_eq!(optimised.code_size(), 3);
        assert_eq!(program.code_size(), 5);
    }

    #[test]
    fn test_unused_pruner() {
        let program = Program::load("{ a { { } } { b } }").unwrap();
        assert_eq!(program.optimise(&[UnusedPruner]).to_string(), "{ a { b } }");
    }

    #[test]
    fn test_other_steps_leave_program_unchanged() {
        let program = Program::load("{ a { } }").unwrap();
        assert_eq!(
            program.optimise(&[ExpressionSplitter, SsaTransform, FullInliner]),
            program
        );
    }
}
