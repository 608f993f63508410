//! GraphML serialization of the drawn subgraph, in the yEd dialect.
//!
//! The document shape is fixed: header and key declarations, an optional
//! stats banner, one shape node per drawn record, then one polyline edge
//! per retained edge with the line colored like its target node.

use crate::config::DetectorConfig;
use crate::core::Registry;
use crate::output::{node_label, style};
use crate::stats::Stats;

const HEADER: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
    "<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns/graphml\" ",
    "xmlns:y=\"http://www.yworks.com/xml/graphml\" ",
    "xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" ",
    "xsi:schemaLocation=\"http://graphml.graphdrawing.org/xmlns/graphml ",
    "http://www.yworks.com/xml/schema/graphml/1.0/ygraphml.xsd\">\n",
    "<key id=\"d0\" for=\"node\" yfiles.type=\"nodegraphics\"/>\n",
    "<key id=\"d1\" for=\"edge\" yfiles.type=\"edgegraphics\"/>\n",
    "  <graph id=\"singlemap\" edgedefault=\"directed\">\n",
);

const FOOTER: &str = "  </graph>\n</graphml>";

/// Render the final document. The banner carries the unpadded stats text
/// when enabled.
pub fn render(registry: &Registry, config: &DetectorConfig, stats: &Stats) -> String {
    let mut nodes = String::new();
    let mut edges = String::new();

    for rec in registry.iter().filter(|r| r.is_drawn()) {
        nodes.push_str(&node_element(rec));
        for target in &rec.uses {
            let Some(target_rec) = registry.get(target) else {
                continue;
            };
            if target_rec.is_drawn() {
                edges.push_str(&edge_element(rec, target_rec));
            }
        }
    }

    let mut out = String::from(HEADER);
    if config.show_banner {
        out.push_str(&banner_element(&stats.render(config, false)));
    }
    out.push_str(&nodes);
    out.push_str(&edges);
    out.push_str(FOOTER);
    out
}

fn node_element(rec: &crate::core::ClassRecord) -> String {
    let style = style(rec.kind());
    format!(
        "    <node id=\"{id}\">\n\
         \x20     <data key=\"d0\">\n\
         \x20       <y:ShapeNode>\n\
         \x20         <y:Fill color = \"#{fill}\"/>\n\
         \x20         <y:NodeLabel textColor=\"#{text}\">{label}</y:NodeLabel>\n\
         \x20         <y:Shape type=\"{shape}\"/>\n\
         \x20       </y:ShapeNode>\n\
         \x20     </data>\n\
         \x20   </node>\n",
        id = rec.name,
        fill = style.fill_color,
        text = style.text_color,
        label = label_text(rec),
        shape = style.shape,
    )
}

fn edge_element(source: &crate::core::ClassRecord, target: &crate::core::ClassRecord) -> String {
    format!(
        "    <edge source=\"{src}\" target=\"{dst}\">\n\
         \x20     <data key=\"d1\">\n\
         \x20       <y:PolyLineEdge>\n\
         \x20         <y:LineStyle color = \"#{color}\"/>\n\
         \x20         <y:Arrows source=\"none\" target=\"standard\"/>\n\
         \x20       </y:PolyLineEdge>\n\
         \x20     </data>\n\
         \x20   </edge>\n",
        src = source.name,
        dst = target.name,
        color = style(target.kind()).fill_color,
    )
}

fn banner_element(stats_text: &str) -> String {
    format!(
        "    <node id=\"banner\">\n\
         \x20     <data key=\"d0\">\n\
         \x20       <y:ShapeNode>\n\
         \x20         <y:Fill color = \"#0000FF\"/>\n\
         \x20         <y:NodeLabel textColor=\"#FFFFFF\" fontSize=\"24\">{}</y:NodeLabel>\n\
         \x20         <y:Shape type=\"rectangle\"/>\n\
         \x20       </y:ShapeNode>\n\
         \x20     </data>\n\
         \x20   </node>\n",
        stats_text.replace('\n', "&#xA;"),
    )
}

/// Label text inside the XML: newlines become entities and slashes become
/// dots for readability in the rendered graph.
fn label_text(rec: &crate::core::ClassRecord) -> String {
    node_label(rec).replace('\n', "&#xA;").replace('/', ".")
}
