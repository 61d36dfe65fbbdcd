//! Request tickets — "latest intent wins" for overlapping fetches.
//!
//! Every keystroke in the search box and every page change starts a new
//! request, and nothing cancels the previous one.  Responses can therefore
//! arrive out of order.  Each request carries a [`Ticket`] stamped from a
//! monotonically increasing counter; when a response lands, the
//! [`TicketCounter`] says whether its ticket is still the newest one issued.
//!
//! ```text
//!  issue() → #1 (page 1)      issue() → #2 (search "jaz")
//!  #2 completes  → current   → rendered
//!  #1 completes  → superseded → dropped
//! ```

use chanview_proto::protocol::ChannelQuery;

/// A single in-flight request and what it asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
    pub query: ChannelQuery,
}

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Issues tickets and remembers the newest one.
#[derive(Debug, Default)]
pub struct TicketCounter {
    latest: u64,
}

impl TicketCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp a new request.  Every earlier ticket becomes superseded.
    pub fn issue(&mut self, query: ChannelQuery) -> Ticket {
        self.latest += 1;
        Ticket {
            seq: self.latest,
            query,
        }
    }

    /// True when no newer ticket has been issued since `ticket`.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.seq == self.latest
    }

    /// Sequence number of the newest ticket (0 before the first request).
    pub fn latest(&self) -> u64 {
        self.latest
    }
}
