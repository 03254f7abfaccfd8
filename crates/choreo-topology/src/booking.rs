//! The fixed hotel-booking collaboration.
//!
//! Two parties: the client opens the enquiry, the hotel answers. The
//! happy path runs enquiry → availability → quotation → booking →
//! payment → completion; a negative availability loops back to the
//! enquiry gateway, and after booking the client may either pay (and
//! then optionally demand a refund) or cancel the order outright.

use choreo_core::PartyId;
use choreo_state::Flag;

use crate::definition::ProcessDefinition;
use crate::edge::Edge;
use crate::node::Node;

/// Element identifiers of the booking collaboration, as the diagram
/// names them.
pub mod ids {
    /// Start event the client fires to open the collaboration.
    pub const START: &str = "StartEvent_1jtgn3j";
    /// Enquiry gateway, also the retry re-entry point.
    pub const ENQUIRY_GATEWAY: &str = "ExclusiveGateway_0hs3ztq";
    /// Client asks whether a room is available.
    pub const CHECK_ROOM: &str = "Message_045i10y";
    /// Hotel answers the availability enquiry.
    pub const GIVE_AVAILABILITY: &str = "Message_0r9lypd";
    /// Branch on the availability answer.
    pub const AVAILABILITY_GATEWAY: &str = "ExclusiveGateway_106je4z";
    /// Hotel quotes the room price.
    pub const PRICE_QUOTATION: &str = "Message_1em0ee4";
    /// Client books the room.
    pub const BOOK_ROOM: &str = "Message_1nlagx2";
    /// Race between payment and order cancellation.
    pub const PAY_OR_CANCEL_GATEWAY: &str = "EventBasedGateway_1fxpmyn";
    /// Client pays, possibly flagging a cancellation.
    pub const PAYMENT: &str = "Message_0o8eyir";
    /// Branch on the cancel flag after payment.
    pub const REFUND_GATEWAY: &str = "ExclusiveGateway_0nzwv7v";
    /// Client demands a refund.
    pub const ASK_REFUND: &str = "Message_1joj7ca";
    /// Hotel pays the refund.
    pub const REFUND_PAYMENT: &str = "Message_1etcmvl";
    /// Client cancels the order before paying.
    pub const CANCEL_ORDER: &str = "Message_1xm9dxy";
    /// Diagram message with no path through it (client side).
    pub const UNUSED_CLIENT_MESSAGE: &str = "Message_0m9p3da";
    /// Diagram message with no path through it (hotel side).
    pub const UNUSED_HOTEL_MESSAGE: &str = "Message_1ljlm4g";
    /// Terminal marker of the paid path.
    pub const END_COMPLETED: &str = "EndEvent_08edp7f";
    /// Terminal marker of the refund path.
    pub const END_REFUNDED: &str = "EndEvent_146eii4";
    /// Terminal marker of the cancellation path.
    pub const END_CANCELLED: &str = "EndEvent_0366pfz";
}

/// The two fixed participants of the booking collaboration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingParties {
    /// The party booking a room.
    pub client: PartyId,
    /// The party offering the room.
    pub hotel: PartyId,
}

/// Participant identifiers as they appear in the collaboration diagram.
pub fn parties() -> BookingParties {
    BookingParties {
        client: PartyId::new("Participant_1080bkg"),
        hotel: PartyId::new("Participant_0sktaei"),
    }
}

/// The complete booking topology.
///
/// Element identifiers are the diagram's own. Two declared messages
/// (`Message_0m9p3da`, `Message_1ljlm4g`) appear in the diagram but on
/// no path; they are seeded disabled and carry no edges, so no
/// transition can ever reach them.
pub fn booking_collaboration() -> ProcessDefinition {
    let BookingParties { client, hotel } = parties();

    ProcessDefinition::new(vec![
        // Client opens the collaboration.
        Node::start_event(ids::START).with_edges([Edge::enables(ids::ENQUIRY_GATEWAY)]),
        // Enquiry gateway; also the re-entry point when availability
        // comes back negative.
        Node::exclusive_gateway(ids::ENQUIRY_GATEWAY)
            .with_edges([Edge::enables(ids::CHECK_ROOM)]),
        // Check room availability.
        Node::message(ids::CHECK_ROOM, &client, &hotel)
            .with_edges([Edge::enables(ids::GIVE_AVAILABILITY)]),
        // Availability answer; records the confirm flag.
        Node::message(ids::GIVE_AVAILABILITY, &hotel, &client)
            .setting_flag(Flag::Confirm)
            .with_edges([Edge::enables(ids::AVAILABILITY_GATEWAY)]),
        // Branch on availability: quotation, or back to the enquiry.
        Node::exclusive_gateway(ids::AVAILABILITY_GATEWAY).with_edges([
            Edge::enables_when(ids::PRICE_QUOTATION, Flag::Confirm, true),
            Edge::enables_when(ids::ENQUIRY_GATEWAY, Flag::Confirm, false),
        ]),
        // Price quotation.
        Node::message(ids::PRICE_QUOTATION, &hotel, &client)
            .with_edges([Edge::enables(ids::BOOK_ROOM)]),
        // Room booking.
        Node::message(ids::BOOK_ROOM, &client, &hotel)
            .with_edges([Edge::enables(ids::PAY_OR_CANCEL_GATEWAY)]),
        // Pay-or-cancel race: both continuations armed at once.
        Node::event_based_gateway(ids::PAY_OR_CANCEL_GATEWAY).with_edges([
            Edge::enables(ids::PAYMENT),
            Edge::enables(ids::CANCEL_ORDER),
        ]),
        // Payment; records the cancel flag and retires the competing
        // order cancellation.
        Node::message(ids::PAYMENT, &client, &hotel)
            .setting_flag(Flag::Cancel)
            .with_edges([
                Edge::disables(ids::CANCEL_ORDER),
                Edge::enables(ids::REFUND_GATEWAY),
            ]),
        // Branch on the cancel flag: refund path or completion.
        Node::exclusive_gateway(ids::REFUND_GATEWAY).with_edges([
            Edge::enables_when(ids::ASK_REFUND, Flag::Cancel, true),
            Edge::enables_when(ids::END_COMPLETED, Flag::Cancel, false),
        ]),
        // Refund request.
        Node::message(ids::ASK_REFUND, &client, &hotel)
            .with_edges([Edge::enables(ids::REFUND_PAYMENT)]),
        // Refund payment.
        Node::message(ids::REFUND_PAYMENT, &hotel, &client)
            .with_edges([Edge::enables(ids::END_REFUNDED)]),
        // Order cancellation, the payment's competitor.
        Node::message(ids::CANCEL_ORDER, &client, &hotel)
            .with_edges([Edge::enables(ids::END_CANCELLED)]),
        // Diagram elements on no path.
        Node::message(ids::UNUSED_CLIENT_MESSAGE, &client, &hotel),
        Node::message(ids::UNUSED_HOTEL_MESSAGE, &hotel, &client),
        // Terminal markers.
        Node::end_event(ids::END_COMPLETED),
        Node::end_event(ids::END_REFUNDED),
        Node::end_event(ids::END_CANCELLED),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use choreo_core::ElementId;
    use choreo_state::{ElementState, ElementKind};
    use crate::node::NodeKind;

    #[test]
    fn test_booking_definition_validates() {
        assert_eq!(booking_collaboration().validate(), Ok(()));
    }

    #[test]
    fn test_element_census() {
        let def = booking_collaboration();
        assert_eq!(def.len(), 18);
        let messages = def
            .iter()
            .filter(|n| n.kind.is_message())
            .count();
        assert_eq!(messages, 10);
        let gateways = def.iter().filter(|n| n.kind.is_gateway()).count();
        assert_eq!(gateways, 4);
    }

    #[test]
    fn test_start_event_is_the_only_enabled_seed() {
        let def = booking_collaboration();
        let enabled: Vec<_> = def
            .iter()
            .filter(|n| n.initial_state == ElementState::Enabled)
            .collect();
        assert_eq!(enabled.len(), 1);
        assert_eq!(enabled[0].id.as_str(), "StartEvent_1jtgn3j");
    }

    #[test]
    fn test_message_senders_match_the_diagram() {
        let def = booking_collaboration();
        let BookingParties { client, hotel } = parties();
        let sender_of = |id: &str| -> PartyId {
            match &def.node(&ElementId::new(id)).unwrap().kind {
                NodeKind::Message { sender, .. } => sender.clone(),
                other => panic!("{id} is not a message: {other:?}"),
            }
        };
        for id in [
            "Message_045i10y",
            "Message_1nlagx2",
            "Message_0o8eyir",
            "Message_1joj7ca",
            "Message_1xm9dxy",
            "Message_0m9p3da",
        ] {
            assert_eq!(sender_of(id), client, "{id}");
        }
        for id in [
            "Message_0r9lypd",
            "Message_1em0ee4",
            "Message_1etcmvl",
            "Message_1ljlm4g",
        ] {
            assert_eq!(sender_of(id), hotel, "{id}");
        }
    }

    #[test]
    fn test_flag_writers() {
        let def = booking_collaboration();
        let flag_of = |id: &str| def.node(&ElementId::new(id)).unwrap().sets_flag;
        assert_eq!(flag_of("Message_0r9lypd"), Some(Flag::Confirm));
        assert_eq!(flag_of("Message_0o8eyir"), Some(Flag::Cancel));
        assert_eq!(flag_of("Message_045i10y"), None);
    }

    #[test]
    fn test_payment_retires_the_cancellation() {
        let def = booking_collaboration();
        let payment = def.node(&ElementId::new("Message_0o8eyir")).unwrap();
        let retiring = payment
            .edges
            .iter()
            .find(|e| e.target.as_str() == "Message_1xm9dxy")
            .unwrap();
        assert_eq!(retiring.target_state, ElementState::Disabled);
    }

    #[test]
    fn test_negative_availability_loops_back() {
        let def = booking_collaboration();
        let branch = def
            .node(&ElementId::new("ExclusiveGateway_106je4z"))
            .unwrap();
        let loop_back = branch
            .edges
            .iter()
            .find(|e| e.target.as_str() == "ExclusiveGateway_0hs3ztq")
            .unwrap();
        assert_eq!(loop_back.target_state, ElementState::Enabled);
    }

    #[test]
    fn test_unreachable_messages_have_no_edges() {
        let def = booking_collaboration();
        for id in ["Message_0m9p3da", "Message_1ljlm4g"] {
            let node = def.node(&ElementId::new(id)).unwrap();
            assert!(node.edges.is_empty(), "{id}");
            assert_eq!(node.initial_state, ElementState::Disabled, "{id}");
        }
    }

    #[test]
    fn test_seeding_materializes_every_node() {
        let def = booking_collaboration();
        let kinds: Vec<ElementKind> = def.iter().map(|n| n.seed().kind()).collect();
        assert_eq!(kinds.len(), def.len());
        assert!(kinds.contains(&ElementKind::Message));
        assert!(kinds.contains(&ElementKind::Gateway));
        assert!(kinds.contains(&ElementKind::Event));
    }
}
