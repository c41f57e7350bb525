//! Class system: descriptors, attribute handlers, driver methods, registry.

pub mod descriptor;
pub mod handler;
pub mod methods;
pub mod registry;

pub use descriptor::{ChildPolicy, Class, NativeCategory};
pub use handler::{
    AttrHandler, DefaultValue, GetFn, GetId2Fn, GetIdFn, Id2Handler, IdHandler, SetFn, SetId2Fn,
    SetIdFn, SetOutcome,
};
pub use methods::{ClassMethods, CreateParam, DriverError, NativeHandle, VoidMethods};
pub use registry::{ClassChain, ClassRegistry};
