//! # Caller Identity
//!
//! The membership layer of the host platform authenticates callers; the
//! engine only ever sees the resolved party identifier and compares it
//! against a message's declared sender.

use std::sync::{Arc, Mutex};

use choreo_core::PartyId;

/// Resolves the identity of the party invoking the current command.
pub trait IdentityResolver {
    /// The party on whose behalf the current invocation runs.
    fn caller(&self) -> PartyId;
}

/// A fixed caller identity, for tests and single-party tooling.
#[derive(Debug, Clone)]
pub struct StaticIdentity(PartyId);

impl StaticIdentity {
    /// Resolve every call to the given party.
    pub fn new(party: PartyId) -> Self {
        Self(party)
    }
}

impl IdentityResolver for StaticIdentity {
    fn caller(&self) -> PartyId {
        self.0.clone()
    }
}

/// A caller identity that can be switched between invocations, for
/// driving multi-party exchanges from a single process.
#[derive(Debug, Clone)]
pub struct SharedIdentity(Arc<Mutex<PartyId>>);

impl SharedIdentity {
    /// Start with the given caller.
    pub fn new(party: PartyId) -> Self {
        Self(Arc::new(Mutex::new(party)))
    }

    /// Change the caller for subsequent invocations. Clones observe the
    /// switch.
    pub fn switch(&self, party: PartyId) {
        *self.0.lock().expect("identity lock poisoned") = party;
    }
}

impl IdentityResolver for SharedIdentity {
    fn caller(&self) -> PartyId {
        self.0.lock().expect("identity lock poisoned").clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_identity_is_constant() {
        let id = StaticIdentity::new(PartyId::new("Participant_1080bkg"));
        assert_eq!(id.caller(), PartyId::new("Participant_1080bkg"));
        assert_eq!(id.caller(), id.caller());
    }

    #[test]
    fn test_shared_identity_switch_is_seen_by_clones() {
        let id = SharedIdentity::new(PartyId::new("Participant_1080bkg"));
        let observer = id.clone();
        id.switch(PartyId::new("Participant_0sktaei"));
        assert_eq!(observer.caller(), PartyId::new("Participant_0sktaei"));
    }
}
