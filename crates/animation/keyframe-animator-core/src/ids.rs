//! Identifiers for animators and their attached consumers.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

static NEXT_ANIMATOR: AtomicU32 = AtomicU32::new(0);

/// Process-unique animator identifier; clones receive a fresh one.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnimatorId(pub u32);

impl AnimatorId {
    #[inline]
    pub(crate) fn next() -> Self {
        AnimatorId(NEXT_ANIMATOR.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for AnimatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position of a consumer in its animator's dispatch order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ConsumerId(pub usize);
