//! Streaming engine types and data structures
//!
//! Frames, diversions and statistics used by [`PathMatchingWriter`].

use crate::config::StreamingConfig;
use crate::path::{MatchResult, Path, PathSegment};
use crate::predicate::BasketPredicate;
use crate::writer::{BasketWeaver, ShapeTracker};

use super::policy::MatchPolicy;

/// Lifecycle of a match engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No event received yet
    Outer,
    /// Inside the top-level value
    Open,
    /// The top-level value has been closed; further events are misuse
    Complete,
    /// An earlier call failed; every further call fails
    Poisoned,
}

/// Position inside the container a seeking frame is matching
#[derive(Debug)]
pub(super) enum Cursor {
    Array {
        /// Index the next item will have
        next: usize,
    },
    Object {
        /// Key most recently given, reused across keys
        key: String,
    },
}

/// One open container on the path-relevant spine
#[derive(Debug)]
pub(super) enum Frame {
    /// Children are tested against the head of `path`
    Seeking {
        path: Path,
        cursor: Cursor,
        /// Matches are grouped by declared alternative
        grouped: bool,
    },
    /// Children are woven and tested against `predicate`
    Filtering {
        predicate: BasketPredicate,
        tail: Path,
    },
}

/// How a child value is handled once it starts
#[derive(Debug)]
pub(super) enum Route {
    /// Nothing below can match; copy it through
    Skip,
    /// Continue matching `path` inside the child
    Descend {
        path: Path,
        /// Declared alternative the child matched, for grouped frames
        slot: Option<usize>,
    },
    /// Weave the child and test it before applying `tail`
    Filter {
        predicate: BasketPredicate,
        tail: Path,
    },
}

/// Subtree currently being handled outside the frame stack
#[derive(Debug)]
pub(super) enum Diversion {
    /// Copy events verbatim until the subtree closes
    PassThrough {
        /// Open containers inside the subtree
        depth: usize,
    },
    /// Build the subtree, then resolve `remaining` against it
    Weaving {
        weaver: BasketWeaver,
        remaining: Path,
        /// Test applied to the finished subtree before resolving
        predicate: Option<BasketPredicate>,
    },
}

/// Engine statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Events received
    pub events: u64,
    /// Subtrees built by weaving, including predicate candidates
    pub subtrees_woven: u64,
    /// Woven subtrees handed to the policy for resolution
    pub subtrees_resolved: u64,
    /// Predicate candidates that were rejected
    pub subtrees_rejected: u64,
    /// Container subtrees copied through without matching
    pub subtrees_skipped: u64,
    /// Maximum number of simultaneously open frames
    pub max_frames: usize,
}

/// Streaming path matcher
///
/// Implements [`BasketWriter`](crate::writer::BasketWriter): feed it the
/// events of one document and it routes every subtree either straight to the
/// policy's sink or, when the subtree is matched, through a weaver to the
/// policy's resolution. Only matched subtrees and predicate candidates are
/// ever materialized.
pub struct PathMatchingWriter<P: MatchPolicy> {
    pub(super) path: Path,
    pub(super) policy: P,
    pub(super) config: StreamingConfig,
    pub(super) shape: ShapeTracker,
    pub(super) frames: Vec<Frame>,
    pub(super) diversion: Option<Diversion>,
    pub(super) state: EngineState,
    pub(super) stats: EngineStats,
}

impl Frame {
    /// Open a seeking frame for a container whose children `path` applies to
    pub(super) fn seeking(path: Path, is_object: bool, config: &StreamingConfig) -> Self {
        let grouped = config.declared_order
            && path.head().and_then(PathSegment::declared_slots).is_some();
        let cursor = if is_object {
            Cursor::Object { key: String::new() }
        } else {
            Cursor::Array { next: 0 }
        };
        Frame::Seeking {
            path,
            cursor,
            grouped,
        }
    }

    /// Record the key naming the next child
    pub(super) fn note_key(&mut self, key: &str) {
        if let Frame::Seeking {
            cursor: Cursor::Object { key: current },
            ..
        } = self
        {
            current.clear();
            current.push_str(key);
        }
    }

    /// Decide the route of the next child and advance the cursor
    pub(super) fn route_child(&mut self) -> Route {
        match self {
            Frame::Filtering { predicate, tail } => Route::Filter {
                predicate: predicate.clone(),
                tail: tail.clone(),
            },
            Frame::Seeking {
                path,
                cursor,
                grouped,
            } => {
                let Some(segment) = path.head() else {
                    return Route::Skip;
                };
                let (result, slot) = match cursor {
                    Cursor::Array { next } => {
                        let index = *next;
                        *next += 1;
                        let slot = if *grouped { segment.slot_for_index(index) } else { None };
                        (segment.match_index(index), slot)
                    }
                    Cursor::Object { key } => {
                        let slot = if *grouped { segment.slot_for_key(key) } else { None };
                        (segment.match_key(key), slot)
                    }
                };
                match result {
                    MatchResult::Unmatched => Route::Skip,
                    MatchResult::MatchedBound => Route::Descend {
                        path: path.tail(),
                        slot,
                    },
                    MatchResult::MatchedUnbound => Route::Descend {
                        path: path.clone(),
                        slot: None,
                    },
                }
            }
        }
    }

    /// Whether closing this frame closes a declared-order group
    pub(super) fn is_grouped(&self) -> bool {
        matches!(self, Frame::Seeking { grouped: true, .. })
    }
}
