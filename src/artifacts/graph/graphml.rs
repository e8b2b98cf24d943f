use crate::artifacts::graph::{BranchGraph, BranchNode};
use petgraph::visit::EdgeRef;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::collections::BTreeMap;
use std::io::Write;

const GRAPHML_XMLNS: &str = "http://graphml.graphdrawing.org/xmlns";
const LABEL_KEY: &str = "d0";
const COLOR_KEY: &str = "d1";

/// Fill colors handed out to branches and the trunk by their rank in sorted
/// root-name order, so repeated runs color the graph identically.
const ROOT_PALETTE: [&str; 10] = [
    "#1F77B4", "#FF7F0E", "#2CA02C", "#D62728", "#9467BD", "#8C564B", "#E377C2", "#7F7F7F",
    "#BCBD22", "#17BECF",
];

const TAG_FILL: &str = "#FFFFFF";

/// Serializes a built graph as GraphML: one `<node>` per (root, revision)
/// pair carrying its label and fill color, one `<edge>` per graph edge in
/// insertion order, duplicates included.
pub fn write_graphml<W: Write>(graph: &BranchGraph, out: W) -> anyhow::Result<()> {
    let mut writer = Writer::new_with_indent(out, b' ', 2);
    let colors = root_colors(graph);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut graphml = BytesStart::new("graphml");
    graphml.push_attribute(("xmlns", GRAPHML_XMLNS));
    writer.write_event(Event::Start(graphml))?;

    write_key(&mut writer, LABEL_KEY, "label")?;
    write_key(&mut writer, COLOR_KEY, "color")?;

    let mut graph_element = BytesStart::new("graph");
    graph_element.push_attribute(("id", "branches"));
    graph_element.push_attribute(("edgedefault", "directed"));
    writer.write_event(Event::Start(graph_element))?;

    for index in graph.graph().node_indices() {
        let node = &graph.graph()[index];
        let id = format!("n{}", index.index());

        let mut element = BytesStart::new("node");
        element.push_attribute(("id", id.as_str()));
        writer.write_event(Event::Start(element))?;

        write_data(&mut writer, LABEL_KEY, &node.label())?;
        write_data(&mut writer, COLOR_KEY, fill_color(node, &colors))?;

        writer.write_event(Event::End(BytesEnd::new("node")))?;
    }

    for (count, edge) in graph.graph().edge_references().enumerate() {
        let id = format!("e{count}");
        let source = format!("n{}", edge.source().index());
        let target = format!("n{}", edge.target().index());

        let mut element = BytesStart::new("edge");
        element.push_attribute(("id", id.as_str()));
        element.push_attribute(("source", source.as_str()));
        element.push_attribute(("target", target.as_str()));
        writer.write_event(Event::Empty(element))?;
    }

    writer.write_event(Event::End(BytesEnd::new("graph")))?;
    writer.write_event(Event::End(BytesEnd::new("graphml")))?;

    Ok(())
}

fn write_key<W: Write>(writer: &mut Writer<W>, id: &str, name: &str) -> anyhow::Result<()> {
    let mut element = BytesStart::new("key");
    element.push_attribute(("id", id));
    element.push_attribute(("for", "node"));
    element.push_attribute(("attr.name", name));
    element.push_attribute(("attr.type", "string"));
    writer.write_event(Event::Empty(element))?;

    Ok(())
}

fn write_data<W: Write>(writer: &mut Writer<W>, key: &str, value: &str) -> anyhow::Result<()> {
    let mut element = BytesStart::new("data");
    element.push_attribute(("key", key));
    writer.write_event(Event::Start(element))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new("data")))?;

    Ok(())
}

/// One palette color per non-tag root, assigned in sorted root-name order.
fn root_colors(graph: &BranchGraph) -> BTreeMap<&str, &'static str> {
    let mut names: Vec<&str> = graph
        .graph()
        .node_indices()
        .map(|index| &graph.graph()[index])
        .filter(|node| !node.root().is_tag())
        .map(|node| node.root().name())
        .collect();
    names.sort_unstable();
    names.dedup();

    names
        .into_iter()
        .enumerate()
        .map(|(rank, name)| (name, ROOT_PALETTE[rank % ROOT_PALETTE.len()]))
        .collect()
}

fn fill_color<'c>(node: &BranchNode, colors: &BTreeMap<&str, &'c str>) -> &'c str {
    if node.root().is_tag() {
        return TAG_FILL;
    }

    colors.get(node.root().name()).copied().unwrap_or(TAG_FILL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::history::History;
    use crate::artifacts::history::revision::{Action, Kind, Revision, Update};
    use crate::artifacts::history::revision_path::RevisionPath;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn sample_graph() -> BranchGraph {
        let date = Utc.with_ymd_and_hms(2011, 11, 2, 13, 5, 32).unwrap();
        let copy = |path: &str, from: &str, from_revision: u64| {
            Update::new(
                Kind::Directory,
                Action::Add,
                path.to_string(),
                Some(RevisionPath::new(from.to_string(), from_revision)),
                false,
            )
        };
        let history = History::new(vec![
            Revision::new(
                10,
                Some("alice".to_string()),
                date,
                Some("branch".to_string()),
                vec![copy("/project/branches/feature", "/project/trunk", 5)],
            ),
            Revision::new(
                12,
                Some("bob".to_string()),
                date,
                Some("tag".to_string()),
                vec![copy("/project/tags/1.0", "/project/branches/feature", 10)],
            ),
        ])
        .unwrap();

        BranchGraph::build(&history)
    }

    fn render(graph: &BranchGraph) -> String {
        let mut out = Vec::new();
        write_graphml(graph, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn renders_every_node_with_its_label() {
        let output = render(&sample_graph());

        assert!(output.contains("<data key=\"d0\">trunk@5</data>"));
        assert!(output.contains("<data key=\"d0\">feature@10</data>"));
        assert!(output.contains("<data key=\"d0\">1.0@12</data>"));
    }

    #[test]
    fn renders_edges_with_node_references() {
        let output = render(&sample_graph());

        assert!(output.contains("<edge id=\"e0\" source=\"n0\" target=\"n1\"/>"));
        assert!(output.contains("<edge id=\"e1\" source=\"n1\" target=\"n2\"/>"));
    }

    #[test]
    fn tags_render_white_and_roots_get_palette_colors() {
        let output = render(&sample_graph());

        assert!(output.contains(TAG_FILL));
        // "feature" sorts before "trunk", so it takes the first color
        assert!(output.contains(ROOT_PALETTE[0]));
        assert!(output.contains(ROOT_PALETTE[1]));
    }

    #[test]
    fn rendering_is_deterministic() {
        let graph = sample_graph();

        assert_eq!(render(&graph), render(&graph));
    }
}
