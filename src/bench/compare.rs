//! Result diffing against a reference engine.

use std::fmt;

use serde::Serialize;

use crate::engine::SizeMap;

/// One disagreement between a reference and a candidate result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mismatch {
    /// Both maps have the node, with different totals.
    Value {
        /// Node name.
        name: String,
        /// Reference total.
        expected: u64,
        /// Candidate total.
        actual: u64,
    },
    /// The candidate lacks a node present in the reference.
    Missing {
        /// Node name.
        name: String,
        /// Reference total.
        expected: u64,
    },
    /// The candidate has a node the reference does not.
    Unexpected {
        /// Node name.
        name: String,
        /// Candidate total.
        actual: u64,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Value {
                name,
                expected,
                actual,
            } => write!(f, "`{name}`: expected {expected}, got {actual}"),
            Mismatch::Missing { name, expected } => {
                write!(f, "`{name}`: missing (expected {expected})")
            }
            Mismatch::Unexpected { name, actual } => {
                write!(f, "`{name}`: unexpected (got {actual})")
            }
        }
    }
}

/// Every difference between two result maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Comparison {
    /// Number of entries in the reference.
    pub expected_len: usize,
    /// Number of entries in the candidate.
    pub actual_len: usize,
    /// All mismatches, in name order (missing and value mismatches first,
    /// then unexpected names).
    pub mismatches: Vec<Mismatch>,
}

impl Comparison {
    /// `true` if the maps are identical.
    pub fn is_match(&self) -> bool {
        self.mismatches.is_empty() && !self.cardinality_differs()
    }

    /// `true` if the two maps hold a different number of entries.
    pub fn cardinality_differs(&self) -> bool {
        self.expected_len != self.actual_len
    }

    /// Turns any difference into an error.
    pub fn ensure_equal(self) -> Result<(), MismatchError> {
        if self.is_match() {
            Ok(())
        } else {
            Err(MismatchError(self))
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_match() {
            return write!(f, "{} results match", self.expected_len);
        }
        if self.cardinality_differs() {
            writeln!(
                f,
                "different number of results: expected {}, got {}",
                self.expected_len, self.actual_len
            )?;
        }
        for m in &self.mismatches {
            writeln!(f, "{m}")?;
        }
        Ok(())
    }
}

/// A candidate result that does not equal the reference exactly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("results differ from reference ({count} mismatches):\n{0}", count = .0.mismatches.len())]
pub struct MismatchError(pub Comparison);

/// Diffs `candidate` against `reference`, collecting every difference.
pub fn compare(reference: &SizeMap, candidate: &SizeMap) -> Comparison {
    let mut mismatches = Vec::new();

    for (name, &expected) in reference {
        match candidate.get(name) {
            None => mismatches.push(Mismatch::Missing {
                name: name.clone(),
                expected,
            }),
            Some(&actual) if actual != expected => mismatches.push(Mismatch::Value {
                name: name.clone(),
                expected,
                actual,
            }),
            Some(_) => {}
        }
    }
    for (name, &actual) in candidate {
        if !reference.contains_key(name) {
            mismatches.push(Mismatch::Unexpected {
                name: name.clone(),
                actual,
            });
        }
    }

    Comparison {
        expected_len: reference.len(),
        actual_len: candidate.len(),
        mismatches,
    }
}

/// Strict equality check for tests: exact integer equality per key.
pub fn assert_same(reference: &SizeMap, candidate: &SizeMap) -> Result<(), MismatchError> {
    compare(reference, candidate).ensure_equal()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, u64)]) -> SizeMap {
        entries.iter().map(|&(k, v)| (k.to_owned(), v)).collect()
    }

    #[test]
    fn identical_maps_match() {
        let a = map(&[("x", 1), ("y", 0)]);
        let c = compare(&a, &a.clone());
        assert!(c.is_match());
        assert_eq!(c.to_string(), "2 results match");
        assert!(assert_same(&a, &a).is_ok());
        assert!(assert_same(&SizeMap::new(), &SizeMap::new()).is_ok());
    }

    #[test]
    fn collects_every_difference() {
        let reference = map(&[("a", 10), ("b", 5), ("c", 3)]);
        let candidate = map(&[("a", 11), ("c", 3), ("d", 1), ("e", 2)]);
        let c = compare(&reference, &candidate);

        assert!(!c.is_match());
        assert!(c.cardinality_differs());
        assert_eq!(
            c.mismatches,
            vec![
                Mismatch::Value {
                    name: "a".into(),
                    expected: 10,
                    actual: 11
                },
                Mismatch::Missing {
                    name: "b".into(),
                    expected: 5
                },
                Mismatch::Unexpected {
                    name: "d".into(),
                    actual: 1
                },
                Mismatch::Unexpected {
                    name: "e".into(),
                    actual: 2
                },
            ]
        );

        let text = c.to_string();
        assert!(text.contains("expected 3, got 4"));
        assert!(text.contains("`b`: missing"));
    }

    #[test]
    fn same_size_different_keys_is_a_mismatch() {
        let reference = map(&[("a", 1)]);
        let candidate = map(&[("b", 1)]);
        let err = assert_same(&reference, &candidate).unwrap_err();

        assert!(!err.0.cardinality_differs());
        assert_eq!(err.0.mismatches.len(), 2);
        assert!(err.to_string().starts_with("results differ from reference (2 mismatches)"));
    }

    #[test]
    fn zero_is_not_missing() {
        let reference = map(&[("a", 0)]);
        assert!(compare(&reference, &map(&[("a", 0)])).is_match());
        assert!(!compare(&reference, &SizeMap::new()).is_match());
    }
}
