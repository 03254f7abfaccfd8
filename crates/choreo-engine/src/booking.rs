//! Typed entry points for the hotel-booking collaboration.
//!
//! One method per element a party can fire, so callers never spell out
//! raw element ids or assemble payloads by hand. Everything funnels into
//! the generic [`ProcessEngine::advance`].

use choreo_core::{CorrelationId, ElementId};
use choreo_ledger::{EventSink, IdentityResolver, KeyValueLedger};
use choreo_state::Message;
use choreo_topology::booking::ids;
use choreo_topology::booking_collaboration;

use crate::engine::{AdvancePayload, ProcessEngine};
use crate::error::EngineError;

/// The booking collaboration, ready to drive.
#[derive(Debug)]
pub struct BookingProcess<L, I, E> {
    engine: ProcessEngine<L, I, E>,
}

impl<L, I, E> BookingProcess<L, I, E>
where
    L: KeyValueLedger,
    I: IdentityResolver,
    E: EventSink,
{
    /// Build the process over the fixed booking topology.
    pub fn new(ledger: L, identity: I, events: E) -> Self {
        Self {
            engine: ProcessEngine::new(ledger, identity, events, booking_collaboration()),
        }
    }

    /// Borrow the underlying engine.
    pub fn engine(&self) -> &ProcessEngine<L, I, E> {
        &self.engine
    }

    /// Mutably borrow the underlying engine, for admin operations.
    pub fn engine_mut(&mut self) -> &mut ProcessEngine<L, I, E> {
        &mut self.engine
    }

    /// Seed the process instance.
    pub fn initialize(&mut self) -> Result<(), EngineError> {
        self.engine.initialize()
    }

    /// Fire the start event, opening the enquiry.
    pub fn open(&mut self) -> Result<(), EngineError> {
        self.fire(ids::START, AdvancePayload::new())
    }

    /// Client asks whether a room is available.
    pub fn check_room(&mut self, correlation_id: CorrelationId) -> Result<(), EngineError> {
        self.fire(
            ids::CHECK_ROOM,
            AdvancePayload::new().with_correlation_id(correlation_id),
        )
    }

    /// Hotel answers the enquiry; `available` decides whether the flow
    /// proceeds to a quotation or loops back for another enquiry.
    pub fn give_availability(
        &mut self,
        correlation_id: CorrelationId,
        available: bool,
    ) -> Result<(), EngineError> {
        self.fire(
            ids::GIVE_AVAILABILITY,
            AdvancePayload::new()
                .with_correlation_id(correlation_id)
                .with_confirm(available),
        )
    }

    /// Hotel quotes the price.
    pub fn price_quotation(&mut self, correlation_id: CorrelationId) -> Result<(), EngineError> {
        self.fire(
            ids::PRICE_QUOTATION,
            AdvancePayload::new().with_correlation_id(correlation_id),
        )
    }

    /// Client books the room, arming the pay-or-cancel race.
    pub fn book_room(&mut self, correlation_id: CorrelationId) -> Result<(), EngineError> {
        self.fire(
            ids::BOOK_ROOM,
            AdvancePayload::new().with_correlation_id(correlation_id),
        )
    }

    /// Client pays; `cancel` decides whether a refund follows.
    pub fn pay(
        &mut self,
        correlation_id: CorrelationId,
        cancel: bool,
    ) -> Result<(), EngineError> {
        self.fire(
            ids::PAYMENT,
            AdvancePayload::new()
                .with_correlation_id(correlation_id)
                .with_cancel(cancel),
        )
    }

    /// Client demands the refund flagged at payment time.
    pub fn ask_refund(&mut self, correlation_id: CorrelationId) -> Result<(), EngineError> {
        self.fire(
            ids::ASK_REFUND,
            AdvancePayload::new().with_correlation_id(correlation_id),
        )
    }

    /// Hotel pays the refund, concluding the refund path.
    pub fn refund_payment(&mut self, correlation_id: CorrelationId) -> Result<(), EngineError> {
        self.fire(
            ids::REFUND_PAYMENT,
            AdvancePayload::new().with_correlation_id(correlation_id),
        )
    }

    /// Client cancels the order instead of paying.
    pub fn cancel_order(&mut self, correlation_id: CorrelationId) -> Result<(), EngineError> {
        self.fire(
            ids::CANCEL_ORDER,
            AdvancePayload::new().with_correlation_id(correlation_id),
        )
    }

    /// Read one of the collaboration's message records.
    pub fn message(&mut self, id: &str) -> Result<Message, EngineError> {
        self.engine.read_message(&ElementId::new(id))
    }

    fn fire(&mut self, id: &str, payload: AdvancePayload) -> Result<(), EngineError> {
        self.engine.advance(&ElementId::new(id), &payload)
    }
}
