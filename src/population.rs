//! Loading and validating a population of genotypes.
//!
//! A population of scale `N` is exactly `N` genotypes of `N` bits each, read
//! one per line. Loading stops at the first line that is missing, has the
//! wrong length, or contains anything but `'0'`/`'1'`; the failure names
//! that line and no partial population is returned.

use crate::error::{GenealogyError, Result};
use crate::genotype::Genotype;
use log::debug;
use std::io::BufRead;

/// An immutable, fully validated population.
#[derive(Clone, Debug)]
pub struct Population {
    genotypes: Vec<Genotype>,
}

impl Population {
    /// Read a population from `source`.
    ///
    /// With `scale = Some(n)` exactly `n` lines of `n` bits are required.
    /// With `None` the scale is taken from the length of the first line.
    /// Lines after the `N`-th are not read.
    ///
    /// # Errors
    /// - `Configuration` if `scale` is `Some(0)`.
    /// - `InvalidPopulation { line, content }` for the first bad or missing
    ///   line, `line` being the number of lines accepted before it.
    /// - `Io` if reading fails.
    pub fn load<R: BufRead>(source: R, scale: Option<usize>) -> Result<Self> {
        if scale == Some(0) {
            return Err(GenealogyError::Configuration(
                "population scale must be at least 1".to_string(),
            ));
        }

        let mut scale = scale;
        let mut genotypes = Vec::new();
        let mut lines = source.split(b'\n');

        loop {
            if scale.is_some_and(|n| genotypes.len() == n) {
                break;
            }
            let line_no = genotypes.len();
            let mut raw = match lines.next() {
                Some(raw) => raw?,
                None => return Err(invalid(line_no, String::new())),
            };
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
            let line = match String::from_utf8(raw) {
                Ok(line) => line,
                Err(e) => {
                    let content = String::from_utf8_lossy(e.as_bytes()).into_owned();
                    return Err(invalid(line_no, content));
                }
            };
            let n = *scale.get_or_insert(line.len());

            if n == 0 || line.len() != n {
                return Err(invalid(line_no, line));
            }
            match Genotype::parse(line_no, &line) {
                Some(genotype) => genotypes.push(genotype),
                None => return Err(invalid(line_no, line)),
            }
        }

        debug!("Loaded population of scale {}", genotypes.len());
        Ok(Population { genotypes })
    }

    /// Wrap already-built genotypes.
    ///
    /// # Errors
    /// `InvalidPopulation` if the genotypes are not `N` distinct-position
    /// vectors of `N` bits, indexed `0..N` in order.
    pub fn from_genotypes(genotypes: Vec<Genotype>) -> Result<Self> {
        let n = genotypes.len();
        if n == 0 {
            return Err(invalid(0, String::new()));
        }
        for (k, g) in genotypes.iter().enumerate() {
            if g.index() != k || g.bits().len() != n {
                return Err(invalid(k, g.bits().to_string()));
            }
        }
        Ok(Population { genotypes })
    }

    /// `N`: both the number of genotypes and their width in bits.
    pub fn scale(&self) -> usize {
        self.genotypes.len()
    }

    pub fn genotypes(&self) -> &[Genotype] {
        &self.genotypes
    }

    pub fn get(&self, index: usize) -> Option<&Genotype> {
        self.genotypes.get(index)
    }
}

fn invalid(line: usize, content: String) -> GenealogyError {
    GenealogyError::InvalidPopulation { line, content }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn load(text: &str, scale: Option<usize>) -> Result<Population> {
        Population::load(Cursor::new(text.as_bytes()), scale)
    }

    fn expect_invalid(result: Result<Population>) -> (usize, String) {
        match result {
            Err(GenealogyError::InvalidPopulation { line, content }) => (line, content),
            other => panic!("expected population failure, got {other:?}"),
        }
    }

    #[test]
    fn test_load_valid_population() {
        let pop = load("0000\n0001\n0011\n0111\n", Some(4)).unwrap();
        assert_eq!(pop.scale(), 4);
        for (k, g) in pop.genotypes().iter().enumerate() {
            assert_eq!(g.index(), k);
        }
        assert_eq!(pop.get(3).unwrap().bits().to_string(), "0111");
    }

    #[test]
    fn test_scale_inferred_from_first_line() {
        let pop = load("001\n010\n100\n", None).unwrap();
        assert_eq!(pop.scale(), 3);
    }

    #[test]
    fn test_missing_final_newline_is_fine() {
        let pop = load("01\n10", Some(2)).unwrap();
        assert_eq!(pop.scale(), 2);
    }

    #[test]
    fn test_extra_lines_are_ignored() {
        let pop = load("01\n10\nnot even bits\n", Some(2)).unwrap();
        assert_eq!(pop.scale(), 2);
    }

    #[test]
    fn test_short_input_reports_missing_line() {
        let (line, content) = expect_invalid(load("0000\n0001\n0011\n", Some(4)));
        assert_eq!(line, 3);
        assert_eq!(content, "");
    }

    #[test]
    fn test_wrong_length_line_is_reported() {
        let (line, content) = expect_invalid(load("0000\n0001\n0011\n011\n", Some(4)));
        assert_eq!(line, 3);
        assert_eq!(content, "011");
    }

    #[test]
    fn test_foreign_characters_fail_closed() {
        let (line, content) = expect_invalid(load("0000\n00a1\n0011\n0111\n", Some(4)));
        assert_eq!(line, 1);
        assert_eq!(content, "00a1");
    }

    #[test]
    fn test_non_utf8_line_is_reported_with_its_number() {
        let result = Population::load(Cursor::new(&b"01\n\xff1\n"[..]), Some(2));
        let (line, content) = expect_invalid(result);
        assert_eq!(line, 1);
        assert_eq!(content, "\u{fffd}1");
    }

    #[test]
    fn test_crlf_line_endings_are_accepted() {
        let pop = load("01\r\n10\r\n", None).unwrap();
        assert_eq!(pop.scale(), 2);
    }

    #[test]
    fn test_huge_scale_reports_missing_line() {
        let (line, content) = expect_invalid(load("01\n10\n", Some(usize::MAX)));
        assert_eq!(line, 0);
        assert_eq!(content, "01");
    }

    #[test]
    fn test_empty_input_fails_at_line_zero() {
        let (line, content) = expect_invalid(load("", None));
        assert_eq!(line, 0);
        assert_eq!(content, "");

        let (line, _) = expect_invalid(load("\n", None));
        assert_eq!(line, 0);
    }

    #[test]
    fn test_zero_scale_is_a_configuration_error() {
        assert!(matches!(
            load("0\n", Some(0)),
            Err(GenealogyError::Configuration(_))
        ));
    }

    #[test]
    fn test_from_genotypes_checks_shape() {
        let good = vec![
            Genotype::parse(0, "01").unwrap(),
            Genotype::parse(1, "11").unwrap(),
        ];
        assert_eq!(Population::from_genotypes(good).unwrap().scale(), 2);

        let bad = vec![
            Genotype::parse(0, "01").unwrap(),
            Genotype::parse(1, "110").unwrap(),
        ];
        let (line, content) = expect_invalid(Population::from_genotypes(bad));
        assert_eq!(line, 1);
        assert_eq!(content, "110");
    }
}
