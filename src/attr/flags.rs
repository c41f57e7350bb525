//! Attribute handler flags.

bitflags::bitflags! {
    /// Flags attached to a registered attribute handler.
    ///
    /// Flags govern resolution, never storage layout. The empty set means an
    /// inheritable, string-valued attribute whose setter only runs once the
    /// object is mapped.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AttrFlags: u16 {
        /// The setter and getter may run before the object is mapped.
        const NOT_MAPPED = 0x0001;
        /// Children do not inherit the value from their parent.
        const NO_INHERIT = 0x0002;
        /// Writes are ignored and nothing is stored.
        const READONLY = 0x0004;
        /// Reads never call the getter.
        const WRITEONLY = 0x0008;
        /// A `None` write is not replaced by the default, and reads never
        /// fall back to it.
        const NO_DEFAULT_VALUE = 0x0010;
        /// The value is the name of another object in the name table.
        const HANDLE_NAME = 0x0020;
        /// The value is a pointer payload, never a printable string.
        const NO_STRING = 0x0040;
        /// Skipped by save and copy passes.
        const NO_SAVE = 0x0080;
        /// The driver does not implement this attribute.
        const NOT_SUPPORTED = 0x0100;
    }
}

impl AttrFlags {
    /// Whether a value set on a parent is visible from its children.
    pub fn is_inheritable(self) -> bool {
        !self.intersects(Self::NO_INHERIT | Self::NO_STRING)
    }

    /// Whether the setter may run on an object that has no native handle.
    pub fn allowed_unmapped(self) -> bool {
        self.contains(Self::NOT_MAPPED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_inheritable() {
        assert!(AttrFlags::empty().is_inheritable());
        assert!(AttrFlags::NOT_MAPPED.is_inheritable());
    }

    #[test]
    fn no_inherit_and_no_string_block_inheritance() {
        assert!(!AttrFlags::NO_INHERIT.is_inheritable());
        assert!(!AttrFlags::NO_STRING.is_inheritable());
        assert!(!(AttrFlags::NOT_MAPPED | AttrFlags::NO_INHERIT).is_inheritable());
    }

    #[test]
    fn not_mapped_allows_unmapped() {
        assert!(AttrFlags::NOT_MAPPED.allowed_unmapped());
        assert!(!AttrFlags::READONLY.allowed_unmapped());
    }
}
