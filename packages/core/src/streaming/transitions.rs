//! Event routing and state transitions
//!
//! Every event is validated first, then either continues the active
//! diversion or is handled by the innermost frame: keys are recorded and
//! copied, `end` closes the frame, and a value start is routed by the frame's
//! head segment.

use crate::basket::Basket;
use crate::config::NegativeIndexPolicy;
use crate::error::{WriterError, WriterResult};
use crate::path::{Path, PathSegment};
use crate::predicate::BasketPredicate;
use crate::writer::{BasketWeaver, BasketWriter, Token};

use super::policy::MatchPolicy;
use super::types::{Diversion, EngineState, Frame, PathMatchingWriter, Route};

impl<P: MatchPolicy> PathMatchingWriter<P> {
    /// Entry point for every writer call
    pub(super) fn handle(&mut self, token: Token<'_>) -> WriterResult<()> {
        match self.state {
            EngineState::Poisoned => return Err(WriterError::Poisoned),
            EngineState::Complete => {
                return Err(WriterError::CompleteWriterMisuse {
                    operation: token.operation(),
                });
            }
            EngineState::Outer | EngineState::Open => {}
        }

        match self.dispatch(token) {
            Ok(()) => {
                if self.shape.is_complete() {
                    log::debug!(
                        "document complete after {} events, {} subtree(s) resolved",
                        self.stats.events,
                        self.stats.subtrees_resolved
                    );
                    self.state = EngineState::Complete;
                } else {
                    self.state = EngineState::Open;
                }
                Ok(())
            }
            Err(err) => {
                log::debug!(
                    "match engine poisoned by {} at depth {}: {err}",
                    token.operation(),
                    self.shape.depth()
                );
                self.state = EngineState::Poisoned;
                Err(err)
            }
        }
    }

    fn dispatch(&mut self, token: Token<'_>) -> WriterResult<()> {
        self.shape.accept(&token, self.config.max_depth)?;
        self.stats.events += 1;

        if self.diversion.is_some() {
            return self.continue_diversion(token);
        }

        match token {
            Token::Key(key) => {
                if let Some(frame) = self.frames.last_mut() {
                    frame.note_key(key);
                }
                self.policy.sink().key(key)
            }
            Token::End => self.close_frame(),
            _ => {
                let route = match self.frames.last_mut() {
                    Some(frame) => frame.route_child(),
                    None => Route::Descend {
                        path: self.path.clone(),
                        slot: None,
                    },
                };
                self.enter(route, token)
            }
        }
    }

    fn enter(&mut self, route: Route, token: Token<'_>) -> WriterResult<()> {
        match route {
            Route::Skip => self.skip(token),
            Route::Filter { predicate, tail } => self.weave(token, tail, Some(predicate)),
            Route::Descend { path, slot } => {
                if let Some(slot) = slot {
                    self.policy.select_slot(slot);
                }
                self.descend(path, token)
            }
        }
    }

    /// Continue matching `path` inside the value `token` starts
    fn descend(&mut self, path: Path, token: Token<'_>) -> WriterResult<()> {
        let Some(segment) = path.head() else {
            return self.weave(token, path, None);
        };

        let is_object = matches!(token, Token::BeginObject);
        let applies = match token {
            Token::BeginObject => segment.applies_to_objects(),
            Token::BeginArray => segment.applies_to_arrays(),
            _ => false,
        };
        if !applies {
            return self.skip(token);
        }

        if let PathSegment::Conditional(predicate) = segment {
            let frame = Frame::Filtering {
                predicate: predicate.clone(),
                tail: path.tail(),
            };
            return self.push_frame(frame, token);
        }

        if segment.requires_length() {
            return match self.config.negative_indices {
                NegativeIndexPolicy::Buffer => {
                    log::trace!("buffering container for length-dependent segment {segment}");
                    self.weave(token, path, None)
                }
                NegativeIndexPolicy::Reject => Err(WriterError::UnsupportedSegment {
                    segment: segment.to_string(),
                }),
            };
        }

        if let Some(slots) = segment.declared_slots().filter(|_| self.config.declared_order) {
            self.policy.open_group(slots);
        }
        let frame = Frame::seeking(path, is_object, &self.config);
        self.push_frame(frame, token)
    }

    fn push_frame(&mut self, frame: Frame, token: Token<'_>) -> WriterResult<()> {
        self.frames.push(frame);
        self.stats.max_frames = self.stats.max_frames.max(self.frames.len());
        token.write_to(self.policy.sink())
    }

    fn close_frame(&mut self) -> WriterResult<()> {
        if let Some(frame) = self.frames.pop() {
            if frame.is_grouped() {
                self.policy.close_group();
            }
        }
        self.policy.sink().end()
    }

    /// Copy the value `token` starts through to the sink
    fn skip(&mut self, token: Token<'_>) -> WriterResult<()> {
        if token.opens_container() {
            self.stats.subtrees_skipped += 1;
            self.diversion = Some(Diversion::PassThrough { depth: 1 });
        }
        token.write_to(self.policy.sink())
    }

    /// Weave the value `token` starts, resolving `remaining` once it is built
    fn weave(
        &mut self,
        token: Token<'_>,
        remaining: Path,
        predicate: Option<BasketPredicate>,
    ) -> WriterResult<()> {
        self.stats.subtrees_woven += 1;
        let mut weaver = BasketWeaver::new();
        token.write_to(&mut weaver)?;
        if weaver.is_complete() {
            let value = weaver.weave()?;
            return self.settle(value, &remaining, predicate.as_ref());
        }
        self.diversion = Some(Diversion::Weaving {
            weaver,
            remaining,
            predicate,
        });
        Ok(())
    }

    fn continue_diversion(&mut self, token: Token<'_>) -> WriterResult<()> {
        let finished = match self.diversion.as_mut() {
            Some(Diversion::PassThrough { depth }) => {
                if token.opens_container() {
                    *depth += 1;
                } else if matches!(token, Token::End) {
                    *depth -= 1;
                }
                let closed = *depth == 0;
                token.write_to(self.policy.sink())?;
                closed
            }
            Some(Diversion::Weaving { weaver, .. }) => {
                token.write_to(weaver)?;
                weaver.is_complete()
            }
            None => false,
        };

        if !finished {
            return Ok(());
        }
        match self.diversion.take() {
            Some(Diversion::Weaving {
                weaver,
                remaining,
                predicate,
            }) => {
                let value = weaver.weave()?;
                self.settle(value, &remaining, predicate.as_ref())
            }
            _ => Ok(()),
        }
    }

    /// Hand a finished woven value to the policy
    fn settle(
        &mut self,
        value: Basket,
        remaining: &Path,
        predicate: Option<&BasketPredicate>,
    ) -> WriterResult<()> {
        if let Some(predicate) = predicate {
            if !predicate.test(&value) {
                self.stats.subtrees_rejected += 1;
                return self.policy.reject(value);
            }
        }
        self.stats.subtrees_resolved += 1;
        self.policy.resolve(remaining, value)
    }
}
