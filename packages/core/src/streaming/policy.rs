//! Match policies
//!
//! The engine decides *which* subtrees match; a [`MatchPolicy`] decides what
//! happens to them. [`Rewriting`] re-emits the document with matched subtrees
//! transformed. [`Projecting`] collects matched subtrees and drops everything
//! else.

use crate::basket::Basket;
use crate::error::WriterResult;
use crate::path::Path;
use crate::tree::{self, Projector};
use crate::writer::{BasketWriter, Discard};

/// What the engine does with unmatched events and matched subtrees
pub trait MatchPolicy {
    /// Destination of events that are not part of any match
    type Sink: BasketWriter;

    fn sink(&mut self) -> &mut Self::Sink;

    /// A woven subtree the rest of `remaining` applies to
    ///
    /// An empty `remaining` means the subtree itself is a match.
    fn resolve(&mut self, remaining: &Path, value: Basket) -> WriterResult<()>;

    /// A woven predicate candidate that was rejected
    fn reject(&mut self, value: Basket) -> WriterResult<()>;

    /// A container whose matches are grouped into `slots` declared alternatives
    fn open_group(&mut self, _slots: usize) {}

    /// Subsequent matches belong to alternative `slot` of the innermost group
    fn select_slot(&mut self, _slot: usize) {}

    /// The innermost group's container closed
    fn close_group(&mut self) {}
}

/// Re-emit the document with matched subtrees transformed
pub struct Rewriting<W, F> {
    sink: W,
    transform: F,
}

impl<W, F> Rewriting<W, F>
where
    W: BasketWriter,
    F: FnMut(Basket) -> Basket,
{
    pub fn new(sink: W, transform: F) -> Self {
        Self { sink, transform }
    }

    pub fn into_sink(self) -> W {
        self.sink
    }
}

impl<W, F> MatchPolicy for Rewriting<W, F>
where
    W: BasketWriter,
    F: FnMut(Basket) -> Basket,
{
    type Sink = W;

    #[inline]
    fn sink(&mut self) -> &mut W {
        &mut self.sink
    }

    fn resolve(&mut self, remaining: &Path, value: Basket) -> WriterResult<()> {
        let replacement = tree::rewrite(remaining, &value, &mut self.transform);
        replacement.write_to(&mut self.sink)
    }

    fn reject(&mut self, value: Basket) -> WriterResult<()> {
        value.write_to(&mut self.sink)
    }
}

#[derive(Debug, Default)]
struct Group {
    slots: Vec<Vec<Basket>>,
    current: usize,
}

/// Collect matched subtrees
#[derive(Default)]
pub struct Projecting {
    matches: Vec<Basket>,
    groups: Vec<Group>,
    projector: Option<Box<dyn Projector + Send + Sync>>,
    discard: Discard,
}

impl Projecting {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pass every match through `projector` and collect its results instead
    #[must_use]
    pub fn with_projector(projector: impl Projector + Send + Sync + 'static) -> Self {
        Self {
            projector: Some(Box::new(projector)),
            ..Self::default()
        }
    }

    /// Matches collected so far, outside any open group
    #[must_use]
    pub fn matches(&self) -> &[Basket] {
        &self.matches
    }

    pub fn into_matches(self) -> Vec<Basket> {
        self.matches
    }

    fn push(&mut self, value: Basket) {
        match self.groups.last_mut() {
            Some(group) => {
                if let Some(slot) = group.slots.get_mut(group.current) {
                    slot.push(value);
                }
            }
            None => self.matches.push(value),
        }
    }
}

impl MatchPolicy for Projecting {
    type Sink = Discard;

    #[inline]
    fn sink(&mut self) -> &mut Discard {
        &mut self.discard
    }

    fn resolve(&mut self, remaining: &Path, value: Basket) -> WriterResult<()> {
        let found = if remaining.is_empty() {
            vec![value]
        } else {
            tree::project(remaining, &value)
        };
        for matched in found {
            match &self.projector {
                Some(projector) => {
                    for projected in projector.project(&matched) {
                        self.push(projected);
                    }
                }
                None => self.push(matched),
            }
        }
        Ok(())
    }

    fn reject(&mut self, _value: Basket) -> WriterResult<()> {
        Ok(())
    }

    fn open_group(&mut self, slots: usize) {
        self.groups.push(Group {
            slots: vec![Vec::new(); slots],
            current: 0,
        });
    }

    fn select_slot(&mut self, slot: usize) {
        if let Some(group) = self.groups.last_mut() {
            group.current = slot;
        }
    }

    fn close_group(&mut self) {
        if let Some(group) = self.groups.pop() {
            for value in group.slots.into_iter().flatten() {
                self.push(value);
            }
        }
    }
}
