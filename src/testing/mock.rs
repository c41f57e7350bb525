//! A driver that creates nothing and records every hook call.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use crate::class::{
    ChildPolicy, Class, ClassMethods, CreateParam, DriverError, NativeCategory, NativeHandle,
};
use crate::error::Result;
use crate::geometry::Size;
use crate::object::Handle;
use crate::toolkit::Toolkit;

/// One hook invocation, in the order the toolkit made it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverCall {
    Create(Handle),
    Map(Handle),
    Unmap(Handle, NativeHandle),
    Destroy(Handle),
    ChildAdded { parent: Handle, child: Handle },
    ChildRemoved { parent: Handle, child: Handle, pos: usize },
}

/// Records hook calls and hands out increasing raw native handles.
///
/// Share it between classes with `Rc`; interior mutability lets the toolkit
/// call it through `&self`.
#[derive(Debug, Default)]
pub struct MockDriver {
    calls: RefCell<Vec<DriverCall>>,
    next_native: Cell<u64>,
    failing_maps: RefCell<HashSet<Handle>>,
    fail_every_map: Cell<bool>,
    fail_create: Cell<bool>,
    natural: Cell<Option<Size>>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make mapping `ih` fail.
    pub fn fail_map_of(&self, ih: Handle) {
        self.failing_maps.borrow_mut().insert(ih);
    }

    pub fn fail_every_map(&self, fail: bool) {
        self.fail_every_map.set(fail);
    }

    pub fn fail_create(&self, fail: bool) {
        self.fail_create.set(fail);
    }

    /// The size reported by `natural_size` for every object.
    pub fn set_natural_size(&self, size: Option<Size>) {
        self.natural.set(size);
    }

    pub fn calls(&self) -> Vec<DriverCall> {
        self.calls.borrow().clone()
    }

    pub fn take_calls(&self) -> Vec<DriverCall> {
        self.calls.take()
    }

    /// Handles passed to `map`, in call order.
    pub fn mapped(&self) -> Vec<Handle> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                DriverCall::Map(h) => Some(*h),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: DriverCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl ClassMethods for MockDriver {
    fn create(&self, _tk: &mut Toolkit, ih: Handle, _params: &[CreateParam]) -> std::result::Result<(), DriverError> {
        self.record(DriverCall::Create(ih));
        if self.fail_create.get() {
            return Err(DriverError::new("mock create failure"));
        }
        Ok(())
    }

    fn map(&self, _tk: &mut Toolkit, ih: Handle) -> std::result::Result<NativeHandle, DriverError> {
        self.record(DriverCall::Map(ih));
        if self.fail_every_map.get() || self.failing_maps.borrow().contains(&ih) {
            return Err(DriverError::new("mock map failure"));
        }
        let id = self.next_native.get() + 1;
        self.next_native.set(id);
        Ok(NativeHandle::Raw(id))
    }

    fn unmap(&self, _tk: &mut Toolkit, ih: Handle, native: NativeHandle) {
        self.record(DriverCall::Unmap(ih, native));
    }

    fn destroy(&self, _tk: &mut Toolkit, ih: Handle) {
        self.record(DriverCall::Destroy(ih));
    }

    fn child_added(&self, _tk: &mut Toolkit, parent: Handle, child: Handle) {
        self.record(DriverCall::ChildAdded { parent, child });
    }

    fn child_removed(&self, _tk: &mut Toolkit, parent: Handle, child: Handle, pos: usize) {
        self.record(DriverCall::ChildRemoved { parent, child, pos });
    }

    fn natural_size(&self, _tk: &Toolkit, _ih: Handle) -> Option<Size> {
        self.natural.get()
    }
}

/// Register `dialog`, `frame`, `button` and `label` backed by one shared
/// mock driver.
///
/// `dialog` and `frame` hold a single child; `button` and `label` take their
/// `TITLE` as the first creation parameter.
pub fn register_mock_classes(tk: &mut Toolkit) -> Result<Rc<MockDriver>> {
    let driver = Rc::new(MockDriver::new());
    let classes = [
        Class::new("dialog", NativeCategory::Dialog, ChildPolicy::One),
        Class::new("frame", NativeCategory::Control, ChildPolicy::One).interactive(false),
        Class::new("button", NativeCategory::Control, ChildPolicy::None).with_params(["TITLE"]),
        Class::new("label", NativeCategory::Control, ChildPolicy::None)
            .interactive(false)
            .with_params(["TITLE"]),
    ];
    for class in classes {
        tk.register_class(class.with_parent("base").with_methods(driver.clone()))?;
    }
    Ok(driver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_map_and_hands_out_ids() {
        let mut tk = Toolkit::new();
        let driver = register_mock_classes(&mut tk).unwrap();
        let dlg = tk.create("dialog", &[]).unwrap();
        tk.map(dlg).unwrap();
        assert_eq!(tk.native_handle(dlg), Some(NativeHandle::Raw(1)));
        assert_eq!(driver.take_calls(), vec![DriverCall::Create(dlg), DriverCall::Map(dlg)]);
        assert!(driver.calls().is_empty());
    }

    #[test]
    fn failing_map() {
        let mut tk = Toolkit::new();
        let driver = register_mock_classes(&mut tk).unwrap();
        let dlg = tk.create("dialog", &[]).unwrap();
        driver.fail_map_of(dlg);
        assert!(tk.map(dlg).is_err());
        assert!(!tk.is_mapped(dlg));
        assert_eq!(driver.mapped(), vec![dlg]);
    }

    #[test]
    fn failing_create_discards_object() {
        let mut tk = Toolkit::new();
        let driver = register_mock_classes(&mut tk).unwrap();
        driver.fail_create(true);
        assert!(tk.create("button", &["OK".into()]).is_err());
        assert_eq!(tk.object_count(), 0);
    }

    #[test]
    fn registering_twice_fails() {
        let mut tk = Toolkit::new();
        register_mock_classes(&mut tk).unwrap();
        assert!(register_mock_classes(&mut tk).is_err());
    }
}
