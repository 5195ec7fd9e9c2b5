//! Graph accumulation and edge compilation.
//!
//! `JobGraph` collects invocation and declaration records across source
//! directories; compilation runs once over the full batch, because
//! candidate resolution needs the complete declaration set to already be
//! known.

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::records::{DeclarationRecord, InvocationRecord};

/// A directed `invoker → job` relationship in the rendered diagram.
///
/// Equality, ordering and hashing are the `(from, to)` pair — the
/// deduplication key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

/// Accumulates records and compiles them into a deduplicated edge set.
#[derive(Debug, Default)]
pub struct JobGraph {
    invocations: Vec<InvocationRecord>,
    declarations: Vec<DeclarationRecord>,
}

impl JobGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_invocation(&mut self, record: InvocationRecord) {
        self.invocations.push(record);
    }

    pub fn add_declaration(&mut self, record: DeclarationRecord) {
        self.declarations.push(record);
    }

    pub fn invocation_count(&self) -> usize {
        self.invocations.len()
    }

    pub fn declaration_count(&self) -> usize {
        self.declarations.len()
    }

    /// The accumulated declaration records, in discovery order.
    pub fn declarations(&self) -> &[DeclarationRecord] {
        &self.declarations
    }

    /// Resolve every invocation against the declared-name set and emit
    /// the deduplicated edge set.
    ///
    /// Each invocation's candidates are tried in order and the first one
    /// present among the declared names wins; candidates are compared by
    /// exact string equality, qualification having already been expanded
    /// at record-build time. The filter sees the chosen target (`None`
    /// when nothing resolved) and can reject the edge. An unresolved
    /// invocation never produces an edge.
    ///
    /// The returned `BTreeSet` iterates in lexicographic `(from, to)`
    /// order, keeping repeated runs over identical input reproducible.
    pub fn compile(
        &self,
        filter: &dyn Fn(Option<&str>) -> bool,
        path_formatter: &dyn Fn(&str) -> String,
    ) -> BTreeSet<Edge> {
        let declared: HashSet<&str> = self
            .declarations
            .iter()
            .map(|d| d.declared_name.as_str())
            .collect();

        let mut edges = BTreeSet::new();
        for invocation in &self.invocations {
            let target = invocation
                .candidates
                .iter()
                .map(String::as_str)
                .find(|candidate| declared.contains(candidate));

            if !filter(target) {
                continue;
            }
            let Some(target) = target else {
                debug!(
                    "No declared job matches candidates {:?} (invoked from {})",
                    invocation.candidates, invocation.invoking_name
                );
                continue;
            };

            edges.insert(Edge {
                from: path_formatter(&invocation.invoking_name),
                to: target.to_string(),
            });
        }
        edges
    }
}
