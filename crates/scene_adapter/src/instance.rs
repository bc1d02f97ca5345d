//! Objects created on behalf of the declarative tree

use crate::catalog::FamilyTag;
use crate::foundation::collections::ObjectHandle;

/// Handle to a constructed object, tagged with its family
///
/// The family is stored alongside the handle rather than on the object, so
/// structural rules can branch on it without consulting the catalog again.
/// It never changes after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CreatedObject {
    handle: ObjectHandle,
    family: FamilyTag,
}

impl CreatedObject {
    /// Tag a freshly constructed object
    pub(crate) fn new(handle: ObjectHandle, family: FamilyTag) -> Self {
        Self { handle, family }
    }

    /// Handle into the object model
    pub fn handle(&self) -> ObjectHandle {
        self.handle
    }

    /// Family the object was built as
    pub fn family(&self) -> FamilyTag {
        self.family
    }

    /// Whether the object was built as `family`
    pub fn is(&self, family: FamilyTag) -> bool {
        self.family == family
    }
}
