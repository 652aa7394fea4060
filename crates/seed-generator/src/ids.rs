//! Identifier provider.

use rand::Rng;
use seed_core::Id;
use std::collections::HashSet;
use uuid::Uuid;

/// Issues UUID v4 identifiers drawn from the caller's RNG.
///
/// Every issued identifier is remembered for the lifetime of the provider,
/// so a collision is redrawn instead of handed out twice.
#[derive(Debug, Default)]
pub struct IdProvider {
    issued: HashSet<Uuid>,
}

impl IdProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next identifier.
    pub fn next_id<R: Rng>(&mut self, rng: &mut R) -> Id {
        loop {
            let uuid = random_uuid_v4(rng);
            if self.issued.insert(uuid) {
                return Id::from_uuid(uuid);
            }
        }
    }

    /// Number of identifiers issued so far.
    pub fn issued(&self) -> usize {
        self.issued.len()
    }
}

/// Generate a random UUID v4 using the provided RNG.
fn random_uuid_v4<R: Rng>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);

    bytes[6] = (bytes[6] & 0x0f) | 0x40; // Version 4
    bytes[8] = (bytes[8] & 0x3f) | 0x80; // Variant RFC 4122

    Uuid::from_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_hundred_thousand_ids_are_unique() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut ids = IdProvider::new();

        let seen: HashSet<Id> = (0..100_000).map(|_| ids.next_id(&mut rng)).collect();

        assert_eq!(seen.len(), 100_000);
        assert_eq!(ids.issued(), 100_000);
    }

    #[test]
    fn test_ids_are_deterministic() {
        let mut rng1 = StdRng::seed_from_u64(7);
        let mut rng2 = StdRng::seed_from_u64(7);

        let a = IdProvider::new().next_id(&mut rng1);
        let b = IdProvider::new().next_id(&mut rng2);

        assert_eq!(a, b);
    }

    #[test]
    fn test_uuid_version() {
        let mut rng = StdRng::seed_from_u64(42);
        let id = IdProvider::new().next_id(&mut rng);
        assert_eq!(id.as_uuid().get_version_num(), 4);
    }
}
