//! Text snapshots of an object tree.

use std::fmt::Write;

use crate::object::Handle;
use crate::toolkit::Toolkit;

/// Render the subtree under `root` as indented text.
///
/// One line per object: two spaces per depth level, the class name, a
/// `[mapped]` marker when mapped, then the stored string attributes in
/// insertion order. Internal attributes are left out. Lines are separated by
/// `'\n'` with no trailing newline.
///
/// ```text
/// dialog [mapped] TITLE="Main"
///   vbox
///     button TITLE="OK"
/// ```
pub fn tree_to_string(tk: &Toolkit, root: Handle) -> String {
    let mut lines = Vec::new();
    write_node(tk, root, 0, &mut lines);
    lines.join("\n")
}

fn write_node(tk: &Toolkit, ih: Handle, depth: usize, lines: &mut Vec<String>) {
    let Some(obj) = tk.object(ih) else {
        return;
    };
    let mut line = format!("{:indent$}{}", "", obj.class, indent = depth * 2);
    if obj.is_mapped() {
        line.push_str(" [mapped]");
    }
    for name in obj.attrs.names() {
        if let Some(value) = obj.attrs.get(&name) {
            let _ = write!(line, " {name}={value:?}");
        }
    }
    lines.push(line);
    for &child in tk.children(ih) {
        write_node(tk, child, depth + 1, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::register_mock_classes;

    #[test]
    fn renders_nested_tree() {
        let mut tk = Toolkit::new();
        register_mock_classes(&mut tk).unwrap();
        let button = tk.create("button", &["OK".into()]).unwrap();
        let vbox = tk.create("vbox", &[button.into()]).unwrap();
        let dlg = tk.create("dialog", &[vbox.into()]).unwrap();
        tk.set_attribute(dlg, "TITLE", Some("Main"));
        tk.set_attribute(dlg, "_secret", Some("x"));
        tk.map(dlg).unwrap();

        assert_eq!(
            tree_to_string(&tk, dlg),
            "dialog [mapped] TITLE=\"Main\"\n  vbox [mapped]\n    button [mapped] TITLE=\"OK\""
        );
    }

    #[test]
    fn stale_handle_renders_nothing() {
        let mut tk = Toolkit::new();
        let ih = tk.create("fill", &[]).unwrap();
        tk.destroy(ih).unwrap();
        assert_eq!(tree_to_string(&tk, ih), "");
    }
}
