use crate::editing::FocusRequest;
use crate::models::BlockId;

/// Result of applying a store mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub changed: Vec<BlockId>,
    pub focus: Option<FocusRequest>,
    pub version: u64,
}

impl Patch {
    /// A patch that records no change at the given version
    pub fn unchanged(version: u64) -> Self {
        Self {
            changed: Vec::new(),
            focus: None,
            version,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.changed.is_empty()
    }
}
