//! Class tables declared with the `attributes!` macro.
#![cfg(feature = "macros")]

use pretty_assertions::assert_eq;

use handlekit::class::ChildPolicy;
use handlekit::{attributes, Class, Handle, NativeCategory, SetOutcome, Toolkit};

fn level_get(tk: &Toolkit, ih: Handle) -> Option<String> {
    tk.object(ih)?.attrs.get("_level").map(str::to_owned)
}

fn level_set(tk: &mut Toolkit, ih: Handle, value: Option<&str>) -> SetOutcome {
    match value.map(str::parse::<u8>) {
        Some(Ok(v)) if v <= 100 => {
            tk.set_attribute(ih, "_level", Some(&v.to_string()));
            SetOutcome::Applied
        }
        _ => SetOutcome::Rejected,
    }
}

fn gauge_class() -> Class {
    Class::new("gauge", NativeCategory::Void, ChildPolicy::None)
        .with_parent("base")
        .with_attributes(attributes! {
            LEVEL: get = level_get, set = level_set, flags = [NOT_MAPPED, NO_INHERIT];
            UNIT: default = "%";
            LABELFONT: global = "DEFAULTFONT", flags = [NOT_MAPPED];
            SERIAL: flags = [READONLY];
            NOTE;
        })
}

#[test]
fn generated_handlers_behave_like_hand_written_ones() {
    let mut tk = Toolkit::new();
    tk.register_class(gauge_class()).unwrap();
    let g = tk.create("gauge", &[]).unwrap();

    assert_eq!(tk.set_attribute(g, "LEVEL", Some("42")), SetOutcome::Applied);
    assert_eq!(tk.get_attribute(g, "LEVEL").as_deref(), Some("42"));
    assert_eq!(tk.set_attribute(g, "LEVEL", Some("400")), SetOutcome::Rejected);
    assert_eq!(tk.get_attribute(g, "LEVEL").as_deref(), Some("42"));

    assert_eq!(tk.get_attribute(g, "UNIT").as_deref(), Some("%"));
    assert_eq!(tk.get_attribute(g, "LABELFONT").as_deref(), Some("Sans, 10"));
    assert_eq!(tk.set_attribute(g, "SERIAL", Some("1")), SetOutcome::Rejected);
    assert_eq!(tk.set_attribute(g, "NOTE", Some("hi")), SetOutcome::Cached);
}
