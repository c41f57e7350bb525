//! # handlekit
//!
//! A string-attribute object model for native widget toolkits.
//!
//! Every interface element is an object reached through an opaque
//! [`Handle`]. Objects belong to a registered [`Class`](class::Class), form a
//! parent/child tree, and carry named string attributes. Reading an attribute
//! asks the class handler first, then the object's own table, then its
//! ancestors (for inheritable attributes), then the registered default.
//! Writing one goes through the class setter, which decides whether the
//! value is applied natively, cached, or rejected.
//!
//! Objects are created unmapped. [`Toolkit::map`] binds a subtree to native
//! resources through the per-class [`ClassMethods`](class::ClassMethods)
//! driver and replays the cached attribute values.
//!
//! ## Core Systems
//!
//! - **[`attr`]**: attribute tables, flags, value conversions and the `NAME=value` parser
//! - **[`class`]**: class descriptors, attribute handlers, driver hooks and the registry
//! - **[`object`]**: slotmap-backed object arena, names, callbacks and lifecycle events
//! - **[`toolkit`]**: the [`Toolkit`] context tying classes, objects and globals together
//! - **[`builtin`]**: the `base` class and the layout containers every toolkit starts with
//! - **[`geometry`]**: position and size records kept per object
//! - **[`testing`]**: a recording mock driver and text snapshots of object trees
//!
//! ## Example
//!
//! ```
//! use handlekit::Toolkit;
//!
//! let mut tk = Toolkit::new();
//! let vbox = tk.create("vbox", &[]).unwrap();
//! let fill = tk.create("fill", &[]).unwrap();
//! tk.append(vbox, fill).unwrap();
//!
//! tk.set_attribute(vbox, "GAP", Some("4"));
//! assert_eq!(tk.get_attribute(vbox, "GAP").as_deref(), Some("4"));
//! assert_eq!(tk.get_attribute(vbox, "CHILDCOUNT").as_deref(), Some("1"));
//! ```

// Foundation
pub mod error;
pub mod geometry;

// Object model
pub mod attr;
pub mod class;
pub mod object;

// Context
pub mod builtin;
pub mod toolkit;

// Test support
pub mod testing;

pub use class::{AttrHandler, Class, ClassMethods, NativeCategory, NativeHandle, SetOutcome};
pub use error::{Error, Result};
pub use object::Handle;
pub use toolkit::{Toolkit, ToolkitConfig};

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use handlekit_macros::attributes;
