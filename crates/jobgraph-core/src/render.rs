//! PlantUML diagram emission.

use std::collections::BTreeSet;
use std::io::{self, Write};

use crate::graph::Edge;

/// Serialize the edge set as a PlantUML component diagram.
///
/// Node labels are written raw: names containing PlantUML-reserved
/// characters will corrupt the output. Edges appear in set order, so the
/// diagram is byte-identical across runs over identical input.
pub fn render_plantuml(edges: &BTreeSet<Edge>, sink: &mut impl Write) -> io::Result<()> {
    writeln!(sink, "@startuml")?;
    for edge in edges {
        writeln!(sink, "({}) --> ({})", edge.from, edge.to)?;
    }
    writeln!(sink, "@enduml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn edge(from: &str, to: &str) -> Edge {
        Edge {
            from: from.into(),
            to: to.into(),
        }
    }

    #[test]
    fn test_empty_graph_renders_prologue_and_epilogue() {
        let mut out = Vec::new();
        render_plantuml(&BTreeSet::new(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "@startuml\n@enduml\n");
    }

    #[test]
    fn test_edges_render_in_set_order() {
        let edges: BTreeSet<Edge> = [
            edge("Zeta::Caller", "AJob"),
            edge("Alpha::Caller", "Notify::BJob"),
        ]
        .into_iter()
        .collect();

        let mut out = Vec::new();
        render_plantuml(&edges, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "@startuml\n\
             (Alpha::Caller) --> (Notify::BJob)\n\
             (Zeta::Caller) --> (AJob)\n\
             @enduml\n"
        );
    }
}
