//! Name interning: the `name <-> id` bijection shared by every encoding.

use std::collections::HashMap;

use super::EncodeError;
use crate::engine::SizeMap;
use crate::graph::Graph;

/// Bijective mapping between node names and dense ids `0..len`.
///
/// Ids follow the insertion order of the source graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    ids: HashMap<String, usize>,
    names: Vec<String>,
}

impl NameTable {
    /// Interns every node name of `graph`.
    pub fn from_graph(graph: &Graph) -> Self {
        let names = graph.names().to_vec();
        let ids = names
            .iter()
            .enumerate()
            .map(|(id, name)| (name.clone(), id))
            .collect();
        Self { ids, names }
    }

    /// Interns an explicit list of names.
    ///
    /// Fails if a name repeats, since the mapping would stop being a bijection.
    pub fn from_names(names: Vec<String>) -> Result<Self, EncodeError> {
        let mut ids = HashMap::with_capacity(names.len());
        for (id, name) in names.iter().enumerate() {
            if ids.insert(name.clone(), id).is_some() {
                return Err(EncodeError::InvalidLayout(format!(
                    "duplicate node name `{name}`"
                )));
            }
        }
        Ok(Self { ids, names })
    }

    /// Number of interned names.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if nothing is interned.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Id of `name`, if interned.
    #[inline]
    pub fn id(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }

    /// Name of `id`, if in range.
    #[inline]
    pub fn name(&self, id: usize) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// All names, indexed by id.
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Resolves a child reference of `parent`.
    pub(crate) fn resolve_child(&self, parent: &str, child: &str) -> Result<usize, EncodeError> {
        self.id(child).ok_or_else(|| EncodeError::UnknownChild {
            parent: parent.to_owned(),
            child: child.to_owned(),
        })
    }

    /// Translates an id-indexed result vector back into name-keyed form.
    ///
    /// `totals` is expected to hold one entry per interned name; extra entries
    /// are ignored and missing ones are simply absent from the map.
    pub fn to_size_map(&self, totals: &[u64]) -> SizeMap {
        self.names
            .iter()
            .zip(totals)
            .map(|(name, &total)| (name.clone(), total))
            .collect()
    }
}
