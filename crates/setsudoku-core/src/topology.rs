//! Cell/set topology: which cells belong to which named sets.
//!
//! The topology description is a whitespace-separated list of cell
//! specs, one per cell in board order; each spec is a comma-separated
//! list of set names. Line breaks count as spaces, so generators may
//! emit one grid row per line.

use std::collections::HashMap;

use crate::error::ConfigError;

pub(crate) type SetId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CellTopo {
    /// Sets this cell belongs to, ordered by name.
    pub membership: Vec<SetId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SetTopo {
    pub name: String,
    /// Member cells in order of appearance.
    pub membership: Vec<usize>,
}

/// The cells shared by a pair of distinct sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Intersection {
    pub sets: (SetId, SetId),
    pub cells: Vec<usize>,
}

/// Parsed topology: cells, named sets, and pairwise intersections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    cells: Vec<CellTopo>,
    sets: Vec<SetTopo>,
    set_lookup: HashMap<String, SetId>,
    intersections: Vec<Intersection>,
    largest_set: usize,
}

impl Topology {
    /// Parse a topology description.
    ///
    /// Cells appear in spec order; sets are created at first mention;
    /// every pair of sets sharing a cell gets an intersection entry
    /// keyed by the sorted name pair, populated in cell order.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut topo = Topology {
            cells: Vec::new(),
            sets: Vec::new(),
            set_lookup: HashMap::new(),
            intersections: Vec::new(),
            largest_set: 0,
        };
        let mut inter_lookup: HashMap<(SetId, SetId), usize> = HashMap::new();

        for spec in text.split_whitespace() {
            let cell = topo.cells.len();
            let mut names: Vec<&str> = spec.split(',').filter(|n| !n.is_empty()).collect();
            names.sort_unstable();
            names.dedup();

            let mut membership = Vec::with_capacity(names.len());
            for name in &names {
                let sid = match topo.set_lookup.get(*name) {
                    Some(&sid) => sid,
                    None => {
                        let sid = topo.sets.len();
                        topo.set_lookup.insert(name.to_string(), sid);
                        topo.sets.push(SetTopo {
                            name: name.to_string(),
                            membership: Vec::new(),
                        });
                        sid
                    }
                };
                topo.sets[sid].membership.push(cell);
                topo.largest_set = topo.largest_set.max(topo.sets[sid].membership.len());
                membership.push(sid);
            }

            // Names are sorted, so (membership[i], membership[j]) with
            // i < j is already the canonical pair key.
            for i in 0..membership.len() {
                for j in (i + 1)..membership.len() {
                    let key = (membership[i], membership[j]);
                    let ii = *inter_lookup.entry(key).or_insert_with(|| {
                        topo.intersections.push(Intersection {
                            sets: key,
                            cells: Vec::new(),
                        });
                        topo.intersections.len() - 1
                    });
                    topo.intersections[ii].cells.push(cell);
                }
            }

            topo.cells.push(CellTopo { membership });
        }

        if topo.cells.is_empty() {
            return Err(ConfigError::EmptyTopology);
        }
        Ok(topo)
    }

    /// Number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of named sets.
    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    /// Size of the largest set.
    pub fn largest_set(&self) -> usize {
        self.largest_set
    }

    /// The set names a cell belongs to, in sorted order.
    pub fn cell_set_names(&self, cell: usize) -> Vec<&str> {
        self.cells[cell]
            .membership
            .iter()
            .map(|&sid| self.sets[sid].name.as_str())
            .collect()
    }

    pub(crate) fn cell(&self, index: usize) -> &CellTopo {
        &self.cells[index]
    }

    pub(crate) fn set(&self, id: SetId) -> &SetTopo {
        &self.sets[id]
    }

    pub(crate) fn sets(&self) -> &[SetTopo] {
        &self.sets
    }

    pub(crate) fn intersections(&self) -> &[Intersection] {
        &self.intersections
    }

    #[allow(dead_code)]
    pub(crate) fn set_id(&self, name: &str) -> Option<SetId> {
        self.set_lookup.get(name).copied()
    }

    /// Serialise back to a topology description. Re-parsing the result
    /// yields equivalent cells and sets.
    pub fn to_topology_string(&self) -> String {
        self.cells
            .iter()
            .map(|c| {
                c.membership
                    .iter()
                    .map(|&sid| self.sets[sid].name.as_str())
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2x2 Latin square: rows r0,r1 and columns c0,c1.
    const LATIN2: &str = "c0,r0 c1,r0 c0,r1 c1,r1";

    #[test]
    fn parse_latin2() {
        let t = Topology::parse(LATIN2).unwrap();
        assert_eq!(t.cell_count(), 4);
        assert_eq!(t.set_count(), 4);
        assert_eq!(t.largest_set(), 2);
        assert_eq!(t.cell_set_names(0), vec!["c0", "r0"]);
        let r1 = t.set(t.set_id("r1").unwrap());
        assert_eq!(r1.membership, vec![2, 3]);
    }

    #[test]
    fn intersections_collect_shared_cells() {
        // Two sets sharing two cells.
        let t = Topology::parse("a a,b a,b b").unwrap();
        let inters = t.intersections();
        assert_eq!(inters.len(), 1);
        assert_eq!(inters[0].cells, vec![1, 2]);
        let (x, y) = inters[0].sets;
        assert_eq!(t.set(x).name, "a");
        assert_eq!(t.set(y).name, "b");
    }

    #[test]
    fn membership_sorted_and_deduped() {
        let t = Topology::parse("r0,c0,r0 c1,r0").unwrap();
        assert_eq!(t.cell_set_names(0), vec!["c0", "r0"]);
        assert_eq!(t.set(t.set_id("r0").unwrap()).membership, vec![0, 1]);
    }

    #[test]
    fn line_breaks_equal_spaces() {
        let t = Topology::parse("c0,r0 c1,r0\nc0,r1 c1,r1").unwrap();
        assert_eq!(t.cell_count(), 4);
    }

    #[test]
    fn empty_topology_rejected() {
        assert_eq!(Topology::parse("  \n "), Err(ConfigError::EmptyTopology));
    }

    #[test]
    fn topology_round_trips() {
        let t = Topology::parse(LATIN2).unwrap();
        let text = t.to_topology_string();
        let u = Topology::parse(&text).unwrap();
        assert_eq!(u.cell_count(), t.cell_count());
        assert_eq!(u.set_count(), t.set_count());
        for c in 0..t.cell_count() {
            assert_eq!(u.cell_set_names(c), t.cell_set_names(c));
        }
        for s in 0..t.set_count() {
            assert_eq!(u.set(s).name, t.set(s).name);
            assert_eq!(u.set(s).membership, t.set(s).membership);
        }
    }
}
