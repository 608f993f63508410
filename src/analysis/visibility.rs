//! Passes 3-4: visibility assignment.
//!
//! Pass 3 marks records meeting the in-degree threshold as directly drawn.
//! Pass 4 grants one extra hop: an undrawn record pointing at a directly
//! drawn target becomes drawn too. The hop is deliberately non-transitive;
//! propagated records never pull in further neighbours.

use crate::core::{Registry, Visibility};

/// Run both visibility passes. A threshold of zero or below disables
/// filtering: every eligible record is drawn directly and no propagation
/// happens (there is nothing left undrawn to propagate to).
pub fn apply_visibility(registry: &mut Registry, threshold: i64) {
    assign_direct(registry, threshold);
    if threshold > 0 {
        propagate_one_hop(registry);
    }
}

/// Pass 3: a record is eligible if it is special or uses anything; eligible
/// records with at least `threshold` users are drawn directly.
fn assign_direct(registry: &mut Registry, threshold: i64) {
    for rec in registry.iter_mut() {
        let eligible = rec.is_special() || !rec.uses.is_empty();
        if eligible && rec.used_by.len() as i64 >= threshold {
            rec.visibility = Visibility::DrawnDirect;
        }
    }
}

/// Pass 4: single hop from undrawn users into directly drawn targets.
/// Evaluated against the settled pass-3 state only, so ordering within the
/// pass cannot matter.
fn propagate_one_hop(registry: &mut Registry) {
    let promoted: Vec<String> = registry
        .iter()
        .filter(|rec| rec.visibility == Visibility::Undrawn)
        .filter(|rec| {
            rec.uses.iter().any(|target| {
                registry
                    .get(target)
                    .is_some_and(|t| t.visibility == Visibility::DrawnDirect)
            })
        })
        .map(|rec| rec.name.clone())
        .collect();

    for name in promoted {
        if let Some(rec) = registry.get_mut(&name) {
            rec.visibility = Visibility::DrawnPropagated;
        }
    }
}
