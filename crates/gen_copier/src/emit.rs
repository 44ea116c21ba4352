//! Rendering of the copy method.

use crate::mapping::MappingTable;

/// Renders an `impl` block for `receiver` with a single method that copies every field in
/// `table` from `self` into a `&mut target_type`.
///
/// Entries are rendered in the table's order, so the same table always produces the same text.
/// The target parameter is called `_target` if there's nothing to copy.
pub fn render_copier(
    receiver: &str,
    target_type: &str,
    method_name: &str,
    table: &MappingTable,
) -> String {
    let mut out = String::new();

    out.push_str(&format!("impl {} {{\n", receiver));
    out.push_str("    #[allow(clippy::clone_on_copy)]\n");
    let target_param = if table.is_empty() { "_target" } else { "target" };
    out.push_str(&format!(
        "    pub fn {}(&self, {}: &mut {}) {{\n",
        method_name, target_param, target_type
    ));

    if !table.is_empty() {
        out.push_str("        let source = self;\n");
    }

    for (source, entry) in table.iter() {
        out.push_str(&format!(
            "        target.{} = source.{}.clone();\n",
            entry.target, source
        ));
    }

    out.push_str("    }\n");
    out.push_str("}\n");
    out
}
