//! The common output of every strategy: the final path plus an ordered log
//! of exploration steps that a renderer can replay.

use waypath_core::{Grid, Pos};

/// One expansion level: a finalized node and the positions it admitted to
/// the frontier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub node: Pos,
    pub admitted: Vec<Pos>,
}

/// Final path and exploration log of a single search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathTrace {
    /// Start to end inclusive, or empty when the end is unreachable.
    pub shortest_path: Vec<Pos>,
    /// Levels in the order their nodes were finalized.
    pub steps: Vec<Step>,
}

impl PathTrace {
    /// Append a level. Nodes that admitted nothing do not form a level.
    pub(crate) fn record(&mut self, node: Pos, admitted: Vec<Pos>) {
        if admitted.is_empty() {
            return;
        }
        self.steps.push(Step { node, admitted });
    }

    /// Whether a path was found.
    #[inline]
    pub fn is_found(&self) -> bool {
        !self.shortest_path.is_empty()
    }

    /// Number of replay levels.
    #[inline]
    pub fn levels(&self) -> usize {
        self.steps.len()
    }

    /// Finalized positions, in finalization order.
    pub fn explored(&self) -> impl Iterator<Item = Pos> + '_ {
        self.steps.iter().map(|s| s.node)
    }
}

/// Total cost of walking `path` on `grid`, paying for every cell entered
/// after the first.
///
/// Diagonal steps are charged `√2` times the entered cell's cost.
pub fn path_cost(grid: &Grid, path: &[Pos]) -> f64 {
    path.windows(2)
        .map(|w| {
            let c = grid.cost_of(w[1]);
            if (w[1] - w[0]).is_diagonal() {
                c * std::f64::consts::SQRT_2
            } else {
                c
            }
        })
        .sum()
}

// ---------------------------------------------------------------------------
// Wire format: each step is a one-entry map {"row,col": [[r, c], ...]}.
// ---------------------------------------------------------------------------

#[cfg(feature = "serde")]
impl serde::Serialize for Step {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.node.to_string(), &self.admitted)?;
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Step {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;
        let map = std::collections::BTreeMap::<String, Vec<Pos>>::deserialize(deserializer)?;
        if map.len() != 1 {
            return Err(D::Error::custom(format!(
                "step must have exactly one node key, found {}",
                map.len()
            )));
        }
        let Some((key, admitted)) = map.into_iter().next() else {
            return Err(D::Error::custom("empty step"));
        };
        let node = parse_key(&key).ok_or_else(|| D::Error::custom(format!("bad node key {key:?}")))?;
        Ok(Step { node, admitted })
    }
}

#[cfg(feature = "serde")]
fn parse_key(key: &str) -> Option<Pos> {
    let (r, c) = key.split_once(',')?;
    Some(Pos::new(r.trim().parse().ok()?, c.trim().parse().ok()?))
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    fn sample() -> PathTrace {
        PathTrace {
            shortest_path: vec![Pos::new(0, 0), Pos::new(0, 1)],
            steps: vec![Step {
                node: Pos::new(0, 0),
                admitted: vec![Pos::new(1, 0), Pos::new(0, 1)],
            }],
        }
    }

    #[test]
    fn wire_shape() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"shortest_path":[[0,0],[0,1]],"steps":[{"0,0":[[1,0],[0,1]]}]}"#
        );
    }

    #[test]
    fn round_trip() {
        let t = sample();
        let back: PathTrace = serde_json::from_str(&serde_json::to_string(&t).unwrap()).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn multi_key_step_is_rejected() {
        let res: Result<Step, _> = serde_json::from_str(r#"{"0,0":[],"0,1":[]}"#);
        assert!(res.is_err());
        let res: Result<Step, _> = serde_json::from_str(r#"{"zero":[]}"#);
        assert!(res.is_err());
    }
}
