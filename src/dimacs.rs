//! DIMACS CNF text ⇄ clause-list conversion (SPEC_FULL.md §2, "DIMACS edge
//! tooling"). Explicitly *not* part of the solver core (§1, §7): the core
//! never parses text, it only ever sees `Vec<i64>` signed-literal clauses.
//! This module exists so the CLI binary and the integration tests have
//! somewhere to get those clauses from, the way the teacher's own
//! `dimacs.rs` feeds its CLI — kept close to the teacher's line-oriented
//! parsing and `flate2` gzip handling, retargeted to emit signed literals
//! instead of the teacher's `Literal`/`Clause` types and to report
//! `SolverError::Dimacs` instead of a raw `String`.

use flate2::read::GzDecoder;
use itertools::Itertools;
use std::io::Read;
use std::path::Path;

use crate::error::SolverError;
use crate::lit::VarId;
use crate::solver::{SolveResult, Solver};

/// A parsed DIMACS CNF instance: a variable count and the list of clauses,
/// each a list of signed literals ready for `Solver::add_clause`.
pub struct DimacsFile {
    pub num_vars: usize,
    pub clauses: Vec<Vec<i64>>,
}

/// Reads a DIMACS CNF file, transparently decompressing it if its name ends
/// in `.gz` (mirrors the teacher's CLI, which links `flate2` straight into
/// the binary rather than shelling out to `zcat`).
pub fn clauses_from_dimacs_file(path: &str) -> Result<DimacsFile, SolverError> {
    if !Path::new(path).exists() {
        return Err(SolverError::Dimacs(format!("file {} not found", path)));
    }

    let text = if path.ends_with(".gz") {
        let file = std::fs::File::open(path)
            .map_err(|e| SolverError::Dimacs(e.to_string()))?;
        let mut decoder = GzDecoder::new(file);
        let mut text = String::new();
        decoder
            .read_to_string(&mut text)
            .map_err(|e| SolverError::Dimacs(e.to_string()))?;
        text
    } else {
        std::fs::read_to_string(path).map_err(|e| SolverError::Dimacs(e.to_string()))?
    };

    clauses_from_dimacs(&text)
}

/// Parses DIMACS CNF text into a [`DimacsFile`]. Comment lines (`c`, `%`) and
/// blank lines are skipped; the `p cnf <vars> <clauses>` header is checked
/// against what was actually found.
pub fn clauses_from_dimacs(input: &str) -> Result<DimacsFile, SolverError> {
    let mut lines: Vec<&str> = input
        .lines()
        .filter(|line| !line.starts_with('c'))
        .filter(|line| !line.starts_with('%'))
        .filter(|line| !line.trim().is_empty())
        .collect();

    if lines.last() == Some(&"0") {
        lines.pop();
    }

    let header = lines
        .first()
        .ok_or_else(|| SolverError::Dimacs("file was empty".to_string()))?
        .split_whitespace()
        .collect::<Vec<&str>>();

    if header.len() != 4 || header[0] != "p" || header[1] != "cnf" {
        return Err(SolverError::Dimacs("invalid DIMACS header".to_string()));
    }
    let num_vars: usize = header[2]
        .parse()
        .map_err(|_| SolverError::Dimacs("invalid variable count in header".to_string()))?;
    let num_clauses: usize = header[3]
        .parse()
        .map_err(|_| SolverError::Dimacs("invalid clause count in header".to_string()))?;

    let tokens: Vec<i64> = lines
        .iter()
        .filter(|line| !line.starts_with('p'))
        .join(" ")
        .split_whitespace()
        .map(|tok| {
            tok.parse::<i64>()
                .map_err(|_| SolverError::Dimacs(format!("not an integer literal: {}", tok)))
        })
        .collect::<Result<_, _>>()?;

    let mut clauses: Vec<Vec<i64>> = Vec::new();
    let mut current: Vec<i64> = Vec::new();
    for tok in tokens {
        if tok == 0 {
            clauses.push(std::mem::take(&mut current));
        } else {
            current.push(tok);
        }
    }
    if !current.is_empty() {
        return Err(SolverError::Dimacs("last clause must end with 0".to_string()));
    }

    if clauses.len() != num_clauses {
        return Err(SolverError::Dimacs(format!(
            "expected {} clauses, got {}",
            num_clauses,
            clauses.len()
        )));
    }

    let max_var = clauses
        .iter()
        .flat_map(|c| c.iter().map(|lit| lit.unsigned_abs() as usize))
        .max()
        .unwrap_or(0);
    if max_var > num_vars {
        return Err(SolverError::Dimacs(format!(
            "clause references variable {} but header declares only {}",
            max_var, num_vars
        )));
    }

    Ok(DimacsFile { num_vars, clauses })
}

/// Renders a solved `Solver` as a DIMACS-style result: `s SATISFIABLE`/`s
/// UNSATISFIABLE` followed by a `v ...` line listing every variable's signed
/// value when SAT (mirrors the teacher's `solution_to_dimacs`, rebuilt
/// against `Solver::value` instead of a pre-collected `HashMap`).
pub fn result_to_dimacs(solver: &Solver, result: SolveResult) -> String {
    if result == SolveResult::Unsat {
        return "s UNSATISFIABLE".to_string();
    }
    let mut out = String::from("s SATISFIABLE\nv ");
    for v in 1..=solver.num_vars() {
        let signed = signed_value(solver, v);
        out.push_str(&signed.to_string());
        out.push(' ');
    }
    out.push('0');
    out
}

fn signed_value(solver: &Solver, v: VarId) -> i64 {
    use crate::lit::Value;
    match solver.value(v) {
        Value::True => v as i64,
        Value::False | Value::Unassigned => -(v as i64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_instance() {
        let text = "c comment\np cnf 3 2\n1 2 0\n-1 3 0\n";
        let file = clauses_from_dimacs(text).unwrap();
        assert_eq!(file.num_vars, 3);
        assert_eq!(file.clauses, vec![vec![1, 2], vec![-1, 3]]);
    }

    #[test]
    fn rejects_mismatched_clause_count() {
        let text = "p cnf 2 2\n1 2 0\n";
        assert!(clauses_from_dimacs(text).is_err());
    }

    #[test]
    fn rejects_missing_header() {
        assert!(clauses_from_dimacs("1 2 0\n").is_err());
    }

    #[test]
    fn result_to_dimacs_renders_satisfiable() {
        let mut solver = Solver::new(1);
        solver.add_clause(&[1]);
        let result = solver.solve();
        assert_eq!(result_to_dimacs(&solver, result), "s SATISFIABLE\nv 1 0");
    }

    #[test]
    fn result_to_dimacs_renders_unsatisfiable() {
        let mut solver = Solver::new(1);
        solver.add_clause(&[1]);
        solver.add_clause(&[-1]);
        let result = solver.solve();
        assert_eq!(result_to_dimacs(&solver, result), "s UNSATISFIABLE");
    }
}
