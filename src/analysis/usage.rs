//! Pass 2: usage resolution.
//!
//! Replays each class's instruction events against the fully classified
//! registry and admits directed `uses` edges. Edges only point at classes
//! that exist in the registry, never at the enclosing class itself, and
//! repeated matches collapse into one edge.

use crate::classfile::{descriptor, ClassDecl, UsageEvent};
use crate::config::DetectorConfig;
use crate::core::{Category, Registry};

use super::strip_package_prefix;

pub fn resolve_usage(
    registry: &mut Registry,
    decl: &ClassDecl,
    config: &DetectorConfig,
    prefix: &str,
) {
    let user = strip_package_prefix(&decl.name, prefix).to_string();
    let user_special = registry.ensure(&user).is_special();
    // Unclassified classes contribute edges only when others are included.
    if !user_special && !config.include_others {
        return;
    }

    for event in &decl.events {
        match event {
            UsageEvent::StaticCall {
                owner, descriptor, ..
            } => {
                let Ok((params, ret)) = descriptor::split_method(descriptor) else {
                    continue;
                };
                let Some(ret_class) = descriptor::reference_class(ret) else {
                    continue;
                };
                let ret_name = strip_package_prefix(ret_class, prefix);
                let target = strip_package_prefix(owner, prefix);
                if target == user {
                    continue;
                }
                let Some(target_rec) = registry.get(target) else {
                    continue;
                };
                let admit = match target_rec.category {
                    // A singleton accessor must return the singleton itself.
                    Category::Singleton => ret_name == target,
                    Category::Hingleton => {
                        target_rec.hingled_target.as_deref() == Some(ret_name)
                    }
                    Category::Mingleton => params.is_empty(),
                    Category::Other => false,
                };
                if admit {
                    let target = target.to_string();
                    registry.add_use(&user, &target);
                }
            }
            UsageEvent::FieldAccess {
                owner, descriptor, ..
            } => {
                if !descriptor.starts_with('L') {
                    continue;
                }
                let target = strip_package_prefix(owner, prefix);
                if target == user {
                    continue;
                }
                let admit = registry.get(target).is_some_and(|r| r.fingleton);
                if admit {
                    let target = target.to_string();
                    registry.add_use(&user, &target);
                }
            }
        }
    }
}
