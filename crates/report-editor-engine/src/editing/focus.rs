use std::collections::HashMap;

use crate::editing::BlockStore;
use crate::models::BlockId;

/// Where the caret should land when a block receives focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caret {
    Start,
    End,
}

/// Signal to the presentation layer that a block should take focus.
///
/// The core never touches presentation objects; it only names the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRequest {
    pub block: BlockId,
    pub caret: Caret,
}

impl FocusRequest {
    pub fn start(block: BlockId) -> Self {
        Self {
            block,
            caret: Caret::Start,
        }
    }

    pub fn end(block: BlockId) -> Self {
        Self {
            block,
            caret: Caret::End,
        }
    }
}

/// Maps block ids to opaque focus handles owned by the presentation layer.
#[derive(Debug)]
pub struct FocusRegistry<H> {
    handles: HashMap<BlockId, H>,
}

impl<H> Default for FocusRegistry<H> {
    fn default() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }
}

impl<H> FocusRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handle, returning the one it replaced.
    pub fn register(&mut self, block: BlockId, handle: H) -> Option<H> {
        self.handles.insert(block, handle)
    }

    pub fn unregister(&mut self, block: BlockId) -> Option<H> {
        self.handles.remove(&block)
    }

    pub fn get(&self, block: BlockId) -> Option<&H> {
        self.handles.get(&block)
    }

    /// Look up the handle a focus request refers to.
    pub fn resolve(&self, request: &FocusRequest) -> Option<(&H, Caret)> {
        self.handles
            .get(&request.block)
            .map(|handle| (handle, request.caret))
    }

    /// Drop handles for blocks that no longer exist in the store.
    pub fn prune(&mut self, store: &BlockStore) {
        self.handles.retain(|id, _| store.get(*id).is_some());
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
