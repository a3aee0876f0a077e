//! Problem instance loading.
//!
//! An instance is a node count `n` followed by an `n × n` cost matrix,
//! whitespace separated, row-major. Off-diagonal entries that parse as a
//! non-negative finite number are edges; `-`, `x`, `inf` or any negative
//! number mark a missing edge. Diagonal entries are read and ignored.
//! Everything after a `#` on a line is a comment.
//!
//! ```text
//! # three cities, 1 and 2 not directly linked
//! 3
//! 0 4 7
//! 4 0 -
//! 7 - 0
//! ```

use std::path::Path;

use crate::error::{LdstError, LdstResult};
use crate::graph::Graph;

/// Node count and cost matrix, as read from an instance file.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    pub n: usize,
    /// `costs[i][j]`, `None` where there is no edge.
    pub costs: Vec<Vec<Option<f64>>>,
}

impl Instance {
    /// Parses instance text.
    pub fn parse(text: &str) -> LdstResult<Self> {
        let mut tokens = text
            .lines()
            .map(|line| line.split('#').next().unwrap_or(""))
            .flat_map(str::split_whitespace);

        let n_token = tokens
            .next()
            .ok_or_else(|| LdstError::Parse("empty instance".into()))?;
        let n: usize = n_token
            .parse()
            .map_err(|_| LdstError::Parse(format!("bad node count '{n_token}'")))?;

        let cells: Vec<&str> = tokens.collect();
        let expected = n
            .checked_mul(n)
            .ok_or_else(|| LdstError::Parse(format!("node count {n} is too large")))?;
        if cells.len() < expected {
            return Err(LdstError::Parse(format!(
                "matrix ends early at row {}, column {}",
                cells.len() / n,
                cells.len() % n
            )));
        }
        if let Some(extra) = cells.get(expected) {
            return Err(LdstError::Parse(format!(
                "unexpected trailing token '{extra}'"
            )));
        }

        let mut costs = vec![vec![None; n]; n];
        for (k, token) in cells.iter().enumerate() {
            let (i, j) = (k / n, k % n);
            let cost = parse_cost(token)?;
            if i != j {
                costs[i][j] = cost;
            }
        }

        for i in 0..n {
            for j in (i + 1)..n {
                if costs[i][j] != costs[j][i] {
                    return Err(LdstError::Parse(format!(
                        "cost matrix is not symmetric at ({i}, {j})"
                    )));
                }
            }
        }

        Ok(Self { n, costs })
    }

    /// Reads and parses an instance file.
    pub fn read<P: AsRef<Path>>(path: P) -> LdstResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Builds the graph model.
    pub fn to_graph(&self) -> LdstResult<Graph> {
        Graph::from_matrix(&self.costs)
    }
}

fn parse_cost(token: &str) -> LdstResult<Option<f64>> {
    match token {
        "-" | "x" | "X" => return Ok(None),
        _ => {}
    }
    let value: f64 = token
        .parse()
        .map_err(|_| LdstError::Parse(format!("bad cost '{token}'")))?;
    if value.is_nan() {
        return Err(LdstError::Parse(format!("bad cost '{token}'")));
    }
    Ok((value.is_finite() && value >= 0.0).then_some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# three cities
3
0 4 7
4 0 -   # 1-2 missing
7 - 0
";

    #[test]
    fn test_parse_sample() {
        let inst = Instance::parse(SAMPLE).unwrap();
        assert_eq!(inst.n, 3);
        assert_eq!(inst.costs[0][1], Some(4.0));
        assert_eq!(inst.costs[1][2], None);
        assert_eq!(inst.costs[0][0], None);

        let g = inst.to_graph().unwrap();
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.weight(2, 0).unwrap(), 7.0);
        assert!(!g.has_edge(1, 2));
    }

    #[test]
    fn test_missing_markers() {
        let inst = Instance::parse("2\n0 inf\ninf 0").unwrap();
        assert_eq!(inst.costs[0][1], None);
        let inst = Instance::parse("2\n0 -1\n-1 0").unwrap();
        assert_eq!(inst.costs[0][1], None);
    }

    #[test]
    fn test_zero_weight_is_an_edge() {
        let inst = Instance::parse("2\n0 0\n0 0").unwrap();
        assert_eq!(inst.to_graph().unwrap().edge_count(), 1);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Instance::parse(""), Err(LdstError::Parse(_))));
        assert!(matches!(Instance::parse("two"), Err(LdstError::Parse(_))));
        assert!(matches!(Instance::parse("2\n0 1\n1"), Err(LdstError::Parse(_))));
        assert!(matches!(Instance::parse("2\n0 1\n1 0 5"), Err(LdstError::Parse(_))));
        assert!(matches!(Instance::parse("2\n0 1\n2 0"), Err(LdstError::Parse(_))));
        assert!(matches!(Instance::parse("2\n0 abc\nabc 0"), Err(LdstError::Parse(_))));
    }

    #[test]
    fn test_huge_node_count_is_a_parse_error() {
        assert!(matches!(
            Instance::parse("18446744073709551615\n0"),
            Err(LdstError::Parse(_))
        ));
        assert!(matches!(
            Instance::parse("1000000000\n0 1 1"),
            Err(LdstError::Parse(_))
        ));
        assert_eq!(Instance::parse("0").unwrap().n, 0);
    }

    #[test]
    fn test_read_missing_file() {
        assert!(matches!(
            Instance::read("/no/such/instance.txt"),
            Err(LdstError::Io(_))
        ));
    }
}
