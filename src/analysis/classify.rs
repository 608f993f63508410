//! Pass 1: per-class classification.
//!
//! Consumes the declared shape of one class and assigns its category. The
//! Singleton/Hingleton/Mingleton chain is ordered and mutually exclusive
//! per method: the first matching rule wins, and a rule whose toggle is
//! disabled neither fires nor falls through to a weaker category. The
//! Fingleton probe is independent and may combine with any category.

use crate::classfile::{descriptor, ClassDecl};
use crate::config::DetectorConfig;
use crate::core::{Category, Registry};

use super::strip_package_prefix;

pub fn classify_class(
    registry: &mut Registry,
    decl: &ClassDecl,
    config: &DetectorConfig,
    prefix: &str,
) {
    let name = strip_package_prefix(&decl.name, prefix);
    let rec = registry.ensure(name);

    // Class file order puts all fields before all methods, so shared fields
    // are complete before the method chain reads them.
    for field in decl.fields.iter().filter(|f| f.is_static()) {
        if field.is_private() && !field.is_final() {
            if let Some(ty) = descriptor::reference_class(&field.descriptor) {
                rec.shared_fields.insert(
                    field.name.clone(),
                    strip_package_prefix(ty, prefix).to_string(),
                );
            }
        }
        if field.is_public() && config.detect_fingletons {
            let element = descriptor::unwrap_arrays(&field.descriptor);
            if element.starts_with('L') && !descriptor::is_platform_reference(element) {
                rec.fingleton = true;
            }
        }
    }

    for method in decl.methods.iter().filter(|m| m.is_static() && m.is_public()) {
        let Ok((params, ret)) = descriptor::split_method(&method.descriptor) else {
            continue;
        };
        let Some(ret_class) = descriptor::reference_class(ret) else {
            continue;
        };
        // Only returns inside the analyzed package participate.
        if ret_class.starts_with("java/") || !ret_class.starts_with(prefix) {
            continue;
        }
        let ret_name = strip_package_prefix(ret_class, prefix);

        let returns_self = ret_name == rec.name;
        if returns_self && rec.shared_fields.values().any(|t| *t == rec.name) {
            if config.detect_singletons {
                rec.promote(Category::Singleton);
            }
        } else if rec.shared_fields.values().any(|t| t == ret_name) {
            if config.detect_hingletons {
                rec.hingled_target = Some(ret_name.to_string());
                rec.promote(Category::Hingleton);
            }
        } else if params.is_empty() && config.detect_mingletons {
            rec.promote(Category::Mingleton);
        }
    }
}
