//! Built-in classes.
//!
//! `base` is the root of every class hierarchy and carries the attributes
//! common to all objects. `user`, `vbox`, `hbox` and `fill` need no driver:
//! they map to [`NativeHandle::Void`].

use tracing::warn;

use crate::attr::convert::str_to_rgb;
use crate::attr::AttrFlags;
use crate::class::{
    AttrHandler, ChildPolicy, Class, ClassRegistry, NativeCategory, NativeHandle, SetOutcome,
};
use crate::error::Result;
use crate::geometry::{Position, Size};
use crate::object::Handle;
use crate::toolkit::Toolkit;

pub const BASE_CLASS: &str = "base";

/// Register `base` and the driver-less classes.
pub fn register_base_classes(registry: &mut ClassRegistry) {
    if let Err(e) = try_register(registry) {
        warn!(error = %e, "Base classes not registered");
    }
}

fn try_register(registry: &mut ClassRegistry) -> Result<()> {
    registry.register(base_class())?;
    registry.register(
        Class::new("user", NativeCategory::Void, ChildPolicy::Many).with_parent(BASE_CLASS),
    )?;
    registry.register(box_class("vbox"))?;
    registry.register(box_class("hbox"))?;
    registry.register(
        Class::new("fill", NativeCategory::Void, ChildPolicy::None).with_parent(BASE_CLASS),
    )?;
    Ok(())
}

fn base_class() -> Class {
    let local = AttrFlags::NOT_MAPPED | AttrFlags::NO_INHERIT;
    let readonly = local | AttrFlags::READONLY | AttrFlags::NO_DEFAULT_VALUE;
    // Geometry survives unmap, so there is nothing to save.
    let geometry = local | AttrFlags::NO_DEFAULT_VALUE | AttrFlags::NO_SAVE;

    Class::new(BASE_CLASS, NativeCategory::Void, ChildPolicy::None)
        .with_attribute(
            "NAME",
            AttrHandler::new()
                .setter(set_name)
                .flags(local | AttrFlags::NO_DEFAULT_VALUE | AttrFlags::NO_SAVE),
        )
        .with_attribute(
            "WID",
            AttrHandler::new()
                .getter(get_wid)
                .flags(AttrFlags::NO_INHERIT | AttrFlags::READONLY | AttrFlags::NO_DEFAULT_VALUE),
        )
        .with_attribute(
            "RASTERSIZE",
            AttrHandler::new()
                .getter(get_raster_size)
                .setter(set_raster_size)
                .flags(geometry),
        )
        .with_attribute("USERSIZE", AttrHandler::new().getter(get_raster_size).flags(readonly))
        .with_attribute("NATURALSIZE", AttrHandler::new().getter(get_natural_size).flags(readonly))
        .with_attribute("CURRENTSIZE", AttrHandler::new().getter(get_current_size).flags(readonly))
        .with_attribute(
            "POSITION",
            AttrHandler::new()
                .getter(get_position)
                .setter(set_position)
                .flags(geometry),
        )
        .with_attribute("ACTIVE", AttrHandler::new().default_value("YES"))
        .with_attribute(
            "VISIBLE",
            AttrHandler::new().default_value("YES").flags(AttrFlags::NO_INHERIT),
        )
        .with_attribute(
            "FGCOLOR",
            AttrHandler::new()
                .setter(set_color)
                .default_global("DLGFGCOLOR")
                .flags(AttrFlags::NOT_MAPPED),
        )
        .with_attribute(
            "BGCOLOR",
            AttrHandler::new()
                .setter(set_color)
                .default_global("DLGBGCOLOR")
                .flags(AttrFlags::NOT_MAPPED),
        )
        .with_attribute(
            "FONT",
            AttrHandler::new()
                .default_global("DEFAULTFONT")
                .flags(AttrFlags::NOT_MAPPED),
        )
        .with_attribute("EXPAND", AttrHandler::new().default_value("NO").flags(local))
}

fn box_class(name: &str) -> Class {
    let local = AttrFlags::NOT_MAPPED | AttrFlags::NO_INHERIT;
    Class::new(name, NativeCategory::Void, ChildPolicy::Many)
        .with_parent(BASE_CLASS)
        .with_attribute("GAP", AttrHandler::new().default_value("0").flags(local))
        .with_attribute("MARGIN", AttrHandler::new().default_value("0x0").flags(local))
        .with_attribute(
            "CHILDCOUNT",
            AttrHandler::new()
                .getter(get_child_count)
                .flags(local | AttrFlags::READONLY | AttrFlags::NO_DEFAULT_VALUE),
        )
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn set_name(tk: &mut Toolkit, ih: Handle, value: Option<&str>) -> SetOutcome {
    let old = tk
        .object(ih)
        .and_then(|o| o.attrs.get("NAME"))
        .map(str::to_owned);
    if let Some(old) = old {
        if tk.names.get(&old) == Some(ih) {
            tk.names.remove(&old);
        }
    }
    if let Some(name) = value {
        tk.names.set(name, ih);
    }
    SetOutcome::Cached
}

fn get_wid(tk: &Toolkit, ih: Handle) -> Option<String> {
    match tk.native_handle(ih)? {
        NativeHandle::Raw(id) => Some(format!("{id:#x}")),
        NativeHandle::Void => None,
    }
}

fn non_zero(size: Size) -> Option<String> {
    (!size.is_zero()).then(|| size.to_attr_string())
}

fn get_raster_size(tk: &Toolkit, ih: Handle) -> Option<String> {
    non_zero(tk.geometry(ih)?.user)
}

fn set_raster_size(tk: &mut Toolkit, ih: Handle, value: Option<&str>) -> SetOutcome {
    let size = match value {
        None => Size::ZERO,
        Some(v) => match Size::parse(v) {
            Some(size) => size,
            None => return SetOutcome::Rejected,
        },
    };
    match tk.geometry_mut(ih) {
        Some(g) => {
            g.user = size;
            SetOutcome::Applied
        }
        None => SetOutcome::Rejected,
    }
}

fn get_natural_size(tk: &Toolkit, ih: Handle) -> Option<String> {
    let from_driver = tk
        .class_name(ih)
        .and_then(|c| tk.classes.find_methods(c))
        .and_then(|m| m.natural_size(tk, ih));
    let mut geometry = *tk.geometry(ih)?;
    if let Some(size) = from_driver {
        geometry.natural = size;
    }
    non_zero(geometry.effective_natural())
}

fn get_current_size(tk: &Toolkit, ih: Handle) -> Option<String> {
    non_zero(tk.geometry(ih)?.current)
}

fn get_position(tk: &Toolkit, ih: Handle) -> Option<String> {
    Some(tk.geometry(ih)?.position.to_attr_string())
}

fn set_position(tk: &mut Toolkit, ih: Handle, value: Option<&str>) -> SetOutcome {
    let position = match value {
        None => Position::default(),
        Some(v) => match Position::parse(v) {
            Some(p) => p,
            None => return SetOutcome::Rejected,
        },
    };
    match tk.geometry_mut(ih) {
        Some(g) => {
            g.position = position;
            SetOutcome::Applied
        }
        None => SetOutcome::Rejected,
    }
}

/// Accepts any value [`str_to_rgb`] understands; the string itself is kept.
fn set_color(_tk: &mut Toolkit, _ih: Handle, value: Option<&str>) -> SetOutcome {
    match value {
        Some(v) if str_to_rgb(v).is_none() => SetOutcome::Rejected,
        _ => SetOutcome::Cached,
    }
}

fn get_child_count(tk: &Toolkit, ih: Handle) -> Option<String> {
    Some(tk.child_count(ih).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_classes_registered() {
        let mut registry = ClassRegistry::new();
        register_base_classes(&mut registry);
        for name in ["base", "user", "vbox", "hbox", "fill"] {
            assert!(registry.contains(name), "{name} missing");
        }
        assert!(registry.is_a("vbox", BASE_CLASS));
        assert!(registry.find_attribute("fill", "FONT").is_some());
        assert!(registry.find_attribute("hbox", "GAP").is_some());
        assert!(registry.find_attribute("fill", "GAP").is_none());
    }

    #[test]
    fn registering_twice_is_reported_not_fatal() {
        let mut registry = ClassRegistry::new();
        register_base_classes(&mut registry);
        register_base_classes(&mut registry);
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn color_setter_validates() {
        let mut tk = Toolkit::new();
        let ih = tk.create("user", &[]).unwrap();
        assert_eq!(tk.set_attribute(ih, "FGCOLOR", Some("10 20 30")), SetOutcome::Cached);
        assert_eq!(tk.set_attribute(ih, "FGCOLOR", Some("purple")), SetOutcome::Rejected);
        assert_eq!(tk.get_attribute(ih, "FGCOLOR").as_deref(), Some("10 20 30"));
    }

    #[test]
    fn color_defaults_follow_globals() {
        let mut tk = Toolkit::new();
        let ih = tk.create("user", &[]).unwrap();
        assert_eq!(tk.get_attribute(ih, "BGCOLOR").as_deref(), Some("240 240 240"));
        tk.set_global("DLGBGCOLOR", Some("1 2 3"));
        assert_eq!(tk.get_attribute(ih, "BGCOLOR").as_deref(), Some("1 2 3"));
    }

    #[test]
    fn raster_size_lives_in_geometry() {
        let mut tk = Toolkit::new();
        let ih = tk.create("vbox", &[]).unwrap();
        assert_eq!(tk.set_attribute(ih, "RASTERSIZE", Some("100x50")), SetOutcome::Applied);
        assert_eq!(tk.geometry(ih).unwrap().user, Size { width: 100, height: 50 });
        assert_eq!(tk.get_attribute(ih, "RASTERSIZE").as_deref(), Some("100x50"));
        assert_eq!(tk.get_attribute(ih, "USERSIZE").as_deref(), Some("100x50"));
        assert!(tk.attribute_names(ih).is_empty());

        assert_eq!(tk.set_attribute(ih, "RASTERSIZE", Some("wide")), SetOutcome::Rejected);
        tk.set_attribute(ih, "RASTERSIZE", None);
        assert_eq!(tk.get_attribute(ih, "RASTERSIZE"), None);
    }

    #[test]
    fn readonly_sizes_ignore_writes() {
        let mut tk = Toolkit::new();
        let ih = tk.create("fill", &[]).unwrap();
        assert_eq!(tk.set_attribute(ih, "CURRENTSIZE", Some("5x5")), SetOutcome::Rejected);
        assert_eq!(tk.get_attribute(ih, "CURRENTSIZE"), None);
        tk.geometry_mut(ih).unwrap().current = Size { width: 5, height: 6 };
        assert_eq!(tk.get_attribute(ih, "CURRENTSIZE").as_deref(), Some("5x6"));
    }

    #[test]
    fn name_attribute_maintains_name_table() {
        let mut tk = Toolkit::new();
        let ih = tk.create("user", &[]).unwrap();
        tk.set_attribute(ih, "NAME", Some("first"));
        assert_eq!(tk.get_handle("first"), Some(ih));
        tk.set_attribute(ih, "NAME", Some("second"));
        assert_eq!(tk.get_handle("first"), None);
        assert_eq!(tk.get_handle("second"), Some(ih));
        // Not inherited by children.
        let child = tk.create("fill", &[]).unwrap();
        tk.append(ih, child).unwrap();
        assert_eq!(tk.get_attribute(child, "NAME"), None);
    }

    #[test]
    fn child_count_and_void_wid() {
        let mut tk = Toolkit::new();
        let vbox = tk.create("vbox", &[]).unwrap();
        let fill = tk.create("fill", &[]).unwrap();
        tk.append(vbox, fill).unwrap();
        assert_eq!(tk.get_int(vbox, "CHILDCOUNT"), Some(1));
        tk.map(vbox).unwrap();
        assert_eq!(tk.native_handle(vbox), Some(NativeHandle::Void));
        assert_eq!(tk.get_attribute(vbox, "WID"), None);
    }

    #[test]
    fn position_round_trip() {
        let mut tk = Toolkit::new();
        let ih = tk.create("user", &[]).unwrap();
        assert_eq!(tk.get_attribute(ih, "POSITION").as_deref(), Some("0,0"));
        tk.set_attribute(ih, "POSITION", Some("10,20"));
        assert_eq!(tk.geometry(ih).unwrap().position, Position { x: 10, y: 20 });
        assert_eq!(tk.get_attribute(ih, "POSITION").as_deref(), Some("10,20"));
    }
}
