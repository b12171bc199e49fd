use std::fmt;

/// Stages a single forwarded query moves through.
///
/// `Idle → ReceivedQuery → Decoded → AwaitingUpstream → UpstreamDecoded →
/// Recomposed → Sent → Idle`. A failure at any stage drops the query and the
/// handler returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryPhase {
    Idle,
    ReceivedQuery,
    Decoded,
    AwaitingUpstream,
    UpstreamDecoded,
    Recomposed,
    Sent,
    Failed,
}

impl QueryPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryPhase::Idle => "idle",
            QueryPhase::ReceivedQuery => "received_query",
            QueryPhase::Decoded => "decoded",
            QueryPhase::AwaitingUpstream => "awaiting_upstream",
            QueryPhase::UpstreamDecoded => "upstream_decoded",
            QueryPhase::Recomposed => "recomposed",
            QueryPhase::Sent => "sent",
            QueryPhase::Failed => "failed",
        }
    }

    /// The stage that follows a successful step. `Sent` and `Failed` both
    /// return to `Idle`.
    pub fn next(&self) -> QueryPhase {
        match self {
            QueryPhase::Idle => QueryPhase::ReceivedQuery,
            QueryPhase::ReceivedQuery => QueryPhase::Decoded,
            QueryPhase::Decoded => QueryPhase::AwaitingUpstream,
            QueryPhase::AwaitingUpstream => QueryPhase::UpstreamDecoded,
            QueryPhase::UpstreamDecoded => QueryPhase::Recomposed,
            QueryPhase::Recomposed => QueryPhase::Sent,
            QueryPhase::Sent | QueryPhase::Failed => QueryPhase::Idle,
        }
    }
}

impl fmt::Display for QueryPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
