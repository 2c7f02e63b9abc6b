use crate::fetch::FetchTicket;
use crate::{QueryDescriptor, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch one listing page. The completion must come back as
    /// `Msg::FetchCompleted` carrying the same `request_id`.
    FetchCharacters {
        request_id: RequestId,
        descriptor: QueryDescriptor,
    },
}

impl From<FetchTicket> for Effect {
    fn from(ticket: FetchTicket) -> Self {
        Effect::FetchCharacters {
            request_id: ticket.request_id,
            descriptor: ticket.descriptor,
        }
    }
}
