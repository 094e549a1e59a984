//! Reading the DIMACS representation of a formula into a context.

use std::io::BufRead;

use crate::{
    context::GenericContext,
    structures::atom::Atom,
    types::err::{self, ParseError},
};

/// Details of a parse: what the problem line promised, and what was read.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParserInfo {
    pub expected_atoms: Option<usize>,
    pub expected_clauses: Option<usize>,
    pub added_atoms: usize,
    pub added_clauses: usize,
}

impl<R: rand::Rng> GenericContext<R> {
    /// Reads a DIMACS file into the context.
    ///
    /// Lines beginning `c` are comments, a header `p cnf N M` declares N atoms and M
    /// clauses, and each clause is a whitespace-separated sequence of non-zero
    /// signed integers terminated by `0`, possibly spanning lines.
    /// A line beginning `%` ends the formula.
    ///
    /// ```rust
    /// # use magpie_sat::config::Config;
    /// # use magpie_sat::context::Context;
    /// # use std::io::Write;
    /// let mut ctx = Context::from_config(Config::default());
    ///
    /// let mut dimacs = vec![];
    /// let _ = dimacs.write(b"
    /// p cnf 4 4
    ///  1  2       0
    /// -1  2       0
    /// -1 -2  3    0
    ///        3 -4 0
    /// ");
    ///
    /// assert!(ctx.read_dimacs(dimacs.as_slice()).is_ok());
    /// assert!(ctx.solve().is_ok());
    /// ```
    pub fn read_dimacs(&mut self, mut reader: impl BufRead) -> Result<ParserInfo, err::ErrorKind> {
        let mut buffer = String::default();
        let mut clause_buffer: Vec<i32> = Vec::default();
        let mut info = ParserInfo::default();

        let mut lines = 0;

        // First phase, read until the formula begins.
        'preamble_loop: loop {
            match reader.read_line(&mut buffer) {
                Ok(1) if buffer.starts_with('\n') => {
                    buffer.clear();
                    continue 'preamble_loop;
                }
                Ok(_) => lines += 1,
                Err(_) => return Err(ParseError::Line(lines).into()),
            }

            match buffer.chars().next() {
                Some('c') => {
                    buffer.clear();
                    continue 'preamble_loop;
                }

                Some('p') => {
                    let mut problem_details = buffer.split_whitespace();

                    let atoms: usize = match problem_details.nth(2).map(str::parse) {
                        Some(Ok(count)) => count,
                        _ => return Err(ParseError::ProblemSpecification.into()),
                    };

                    let clauses: usize = match problem_details.next().map(str::parse) {
                        Some(Ok(count)) => count,
                        _ => return Err(ParseError::ProblemSpecification.into()),
                    };

                    buffer.clear();

                    self.ensure_atom(atoms as Atom)?;

                    info.expected_atoms = Some(atoms);
                    info.expected_clauses = Some(clauses);
                }

                _ => break 'preamble_loop,
            }
        }

        // Second phase, read until the formula ends.
        // The line is advanced at the end of the loop, as the preamble has already
        // set up a relevant line.
        'formula_loop: loop {
            match buffer.chars().next() {
                Some('%') => break 'formula_loop,

                Some('c') => {}

                _ => {
                    for item in buffer.split_whitespace() {
                        match item {
                            "0" => {
                                let clause_ints = std::mem::take(&mut clause_buffer);
                                self.add_clause_ints(&clause_ints)?;
                                info.added_clauses += 1;
                            }

                            _ => match item.parse::<i32>() {
                                Ok(int) if int != 0 => clause_buffer.push(int),
                                _ => return Err(ParseError::Token(lines).into()),
                            },
                        }
                    }
                }
            }

            buffer.clear();

            match reader.read_line(&mut buffer) {
                Ok(0) => break 'formula_loop,
                Ok(_) => lines += 1,
                Err(_) => return Err(ParseError::Line(lines).into()),
            }
        }

        if !clause_buffer.is_empty() {
            return Err(ParseError::MissingDelimiter.into());
        }

        info.added_atoms = self.atom_db.count().saturating_sub(1);

        Ok(info)
    }
}

#[cfg(test)]
mod dimacs_parser_tests {
    use std::io::Write;

    use crate::{config::Config, context::Context, types::err::ErrorKind};

    use super::*;

    #[test]
    fn bad_delimiter() {
        let mut ctx = Context::from_config(Config::default());

        let mut dimacs = vec![];
        let _ = dimacs.write(b"1  2");

        assert_eq!(
            ctx.read_dimacs(dimacs.as_slice()),
            Err(ErrorKind::Parse(ParseError::MissingDelimiter))
        );
    }

    #[test]
    fn bad_problem_spec() {
        let mut ctx = Context::from_config(Config::default());

        let mut dimacs = vec![];
        let _ = dimacs.write(
            b"
p cnf
  1  2 0",
        );

        assert_eq!(
            ctx.read_dimacs(dimacs.as_slice()),
            Err(ErrorKind::Parse(ParseError::ProblemSpecification))
        );
    }

    #[test]
    fn bad_token() {
        let mut ctx = Context::from_config(Config::default());

        let mut dimacs = vec![];
        let _ = dimacs.write(b"1 two 0");

        assert!(matches!(
            ctx.read_dimacs(dimacs.as_slice()),
            Err(ErrorKind::Parse(ParseError::Token(_)))
        ));
    }

    #[test]
    fn empty_ok() {
        let mut ctx = Context::from_config(Config::default());

        let mut dimacs = vec![];
        let _ = dimacs.write(
            b"

",
        );

        assert!(ctx.read_dimacs(dimacs.as_slice()).is_ok());
    }

    #[test]
    fn atoms_ensured() {
        let mut ctx = Context::from_config(Config::default());

        let required_atoms = 10;

        let mut dimacs = vec![];
        let _ = dimacs.write(format!("p cnf {required_atoms} 0").as_bytes());
        let _ = ctx.read_dimacs(dimacs.as_slice());

        // One extra, as the atom database always contains top.
        assert_eq!(ctx.atom_db.count(), required_atoms + 1);
    }

    #[test]
    fn clauses_span_lines() {
        let mut ctx = Context::from_config(Config::default());

        let mut dimacs = vec![];
        let _ = dimacs.write(
            b"p cnf 3 2
c a comment interrupts
1 -2
3 0
-3 0
",
        );

        let info = ctx.read_dimacs(dimacs.as_slice()).expect("a parse");
        assert_eq!(info.expected_clauses, Some(2));
        assert_eq!(info.added_clauses, 2);
    }
}
