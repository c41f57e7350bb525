//! Object arena: handles, tree links, names, callbacks and lifecycle tracking.

pub mod callback;
pub mod handle;
pub mod lifecycle;
pub mod names;
pub mod tree;

pub use callback::{Callback, CallbackAction, CallbackTable, DESTROY_CB, MAP_CB, UNMAP_CB};
pub use handle::{Handle, Object};
pub use lifecycle::{LifecycleEvent, LifecycleTracker};
pub use names::NameTable;
pub use tree::ObjectTree;
