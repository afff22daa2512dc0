//! Highlight session state: request tagging, stale-response rejection, trigger debounce.
//!
//! Requests can fire in quick succession (save, focus, qualifying edits) and the
//! analysis service answers asynchronously, so responses may arrive out of order
//! relative to newer requests. The session tags every outgoing request with a
//! monotonically increasing number and discards any response tagged older than the
//! newest request issued: last request wins, not last response. A superseded in-flight
//! request is never aborted on the transport; its eventual response simply fails the
//! tag check.

use crate::buckets::{BucketOutcome, bucket_tokens};
use crate::legend::CategoryResolver;
use crate::tokens::data_from_response;
use semtok_core::OffsetLookup;
use serde_json::Value;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Monotonic tag identifying one outgoing highlight request.
pub type RequestTag = u64;

/// A response that must not be applied to the highlight state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The response belongs to a request older than the newest one issued. The whole
    /// response is discarded; no partial application.
    #[error("stale semantic tokens response: tag {received} superseded by {latest}")]
    StaleResponse {
        /// Tag the response was issued under.
        received: RequestTag,
        /// Newest tag issued for the document.
        latest: RequestTag,
    },
}

/// Events that may schedule a highlight refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The document was saved.
    Save,
    /// The view regained focus.
    Focus,
    /// A single-character edit.
    Edit(char),
}

impl Trigger {
    /// Whether this trigger schedules a refresh at all.
    ///
    /// Edits qualify only for a small fixed character set; anything else is noise
    /// between settle points.
    pub fn qualifies(self) -> bool {
        match self {
            Trigger::Save | Trigger::Focus => true,
            Trigger::Edit(ch) => matches!(ch, ' ' | ';' | '.'),
        }
    }

    fn delay(self, settle: Duration) -> Duration {
        match self {
            // Explicit user actions refresh immediately.
            Trigger::Save | Trigger::Focus => Duration::ZERO,
            Trigger::Edit(_) => settle,
        }
    }
}

/// Per-document highlight session.
///
/// Owns the session-scoped [`CategoryResolver`] (rebuilt whenever a new legend is
/// announced), the request tag counter, and the refresh schedule. The decode pipeline
/// itself stays a pure function of the latest raw response; the session only decides
/// whether a response may be applied and when the next request is due.
#[derive(Debug)]
pub struct HighlightSession {
    resolver: CategoryResolver,
    latest_tag: RequestTag,
    applied_tag: Option<RequestTag>,
    refresh_due: Option<Instant>,
    settle_delay: Duration,
}

impl HighlightSession {
    /// Default settle delay between a qualifying edit and the refresh becoming due.
    pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(150);

    /// Create a session with no advertised legend (fixed-code fallback scheme).
    pub fn new() -> Self {
        Self {
            resolver: CategoryResolver::fallback(),
            latest_tag: 0,
            applied_tag: None,
            refresh_due: None,
            settle_delay: Self::DEFAULT_SETTLE_DELAY,
        }
    }

    /// Override the settle delay for qualifying edits.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Announce (or withdraw) the legend for this analysis session.
    ///
    /// Rebuilds the resolver; with `None` subsequent decodes use the fixed fallback
    /// table. Not an error either way.
    pub fn announce_legend<S: AsRef<str>>(&mut self, legend: Option<&[S]>) {
        self.resolver = match legend {
            Some(names) => CategoryResolver::from_legend(names),
            None => CategoryResolver::fallback(),
        };
    }

    /// Announce the legend from a server `initialize` capabilities payload.
    pub fn announce_capabilities(&mut self, capabilities: &Value) {
        self.resolver = CategoryResolver::from_capabilities(capabilities);
    }

    /// The resolver currently in force.
    pub fn resolver(&self) -> &CategoryResolver {
        &self.resolver
    }

    /// Reserve the tag for the next outgoing request.
    ///
    /// Issuing a tag supersedes every earlier in-flight request for the document.
    pub fn next_request(&mut self) -> RequestTag {
        self.latest_tag += 1;
        self.latest_tag
    }

    /// Newest tag issued, if any request has been made.
    pub fn latest_request(&self) -> Option<RequestTag> {
        (self.latest_tag > 0).then_some(self.latest_tag)
    }

    /// Tag of the last response that was actually applied.
    pub fn applied_request(&self) -> Option<RequestTag> {
        self.applied_tag
    }

    /// Decode, classify, and bucket a `semanticTokens/full` response payload.
    ///
    /// `tag` is the value [`HighlightSession::next_request`] returned when the request
    /// went out; `offsets` converts positions against the document snapshot the caller
    /// holds now. A stale tag discards the response whole and leaves the previously
    /// applied state untouched.
    pub fn handle_response<L: OffsetLookup>(
        &mut self,
        tag: RequestTag,
        result: &Value,
        offsets: &L,
    ) -> Result<BucketOutcome, SessionError> {
        if tag < self.latest_tag {
            return Err(SessionError::StaleResponse {
                received: tag,
                latest: self.latest_tag,
            });
        }

        let data = data_from_response(result);
        let outcome = bucket_tokens(&data, &self.resolver, offsets);
        self.applied_tag = Some(tag);
        Ok(outcome)
    }

    /// Record a trigger event at `now`. Returns `true` when a refresh was scheduled.
    ///
    /// An earlier pending refresh is never pushed back by a later trigger; the soonest
    /// deadline wins.
    pub fn record_trigger(&mut self, trigger: Trigger, now: Instant) -> bool {
        if !trigger.qualifies() {
            return false;
        }

        let due = now + trigger.delay(self.settle_delay);
        self.refresh_due = Some(match self.refresh_due {
            Some(existing) => existing.min(due),
            None => due,
        });
        true
    }

    /// Whether a scheduled refresh has become due at `now`. Consumes the schedule.
    pub fn refresh_ready(&mut self, now: Instant) -> bool {
        match self.refresh_due {
            Some(due) if now >= due => {
                self.refresh_due = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for HighlightSession {
    fn default() -> Self {
        Self::new()
    }
}
