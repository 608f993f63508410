//! Output modeling: per-kind presentation constants and node labels.

pub mod graphml;

use crate::core::{ClassRecord, NodeKind};

/// Fixed presentation triple for one rendering kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeStyle {
    pub fill_color: &'static str,
    pub text_color: &'static str,
    pub shape: &'static str,
}

/// Presentation lookup; the only place colors and shapes are defined.
pub const fn style(kind: NodeKind) -> NodeStyle {
    match kind {
        NodeKind::Singleton => NodeStyle {
            fill_color: "FF0000",
            text_color: "FFFFFF",
            shape: "rectangle",
        },
        NodeKind::Hingleton => NodeStyle {
            fill_color: "FF9900",
            text_color: "000000",
            shape: "rectangle",
        },
        NodeKind::Mingleton => NodeStyle {
            fill_color: "FFFF00",
            text_color: "000000",
            shape: "rectangle",
        },
        NodeKind::Fingleton => NodeStyle {
            fill_color: "00FF00",
            text_color: "000000",
            shape: "rectangle",
        },
        NodeKind::Other => NodeStyle {
            fill_color: "CCFFFF",
            text_color: "000000",
            shape: "ellipse",
        },
    }
}

/// Label for one record. Hingletons append the hingled class's label with
/// every line parenthesized.
pub fn node_label(rec: &ClassRecord) -> String {
    let base = split_name(&rec.name);
    match (&rec.hingled_target, rec.kind()) {
        (Some(target), NodeKind::Hingleton) => {
            format!("{}\n({})", base, split_name(target).replace('\n', ")\n("))
        }
        _ => base,
    }
}

/// Put the class's short name on the first line and its path on the
/// second, keeping node widths down. Names without a separator stay as-is.
fn split_name(name: &str) -> String {
    match name.rfind('/') {
        Some(idx) => format!("{}\n{}", &name[idx + 1..], &name[..idx]),
        None => name.to_string(),
    }
}
