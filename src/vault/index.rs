//! In-memory collection of decrypted credentials, keyed by id.
//!
//! Each slot remembers when it was inserted.  The store uses that sequence
//! number to break `created_at` ties when listing and to write entries back
//! in a stable order.

use std::collections::HashMap;

use super::credential::Credential;

struct Slot {
    seq: u64,
    credential: Credential,
}

#[derive(Default)]
pub struct CredentialIndex {
    slots: HashMap<String, Slot>,
    next_seq: u64,
}

impl CredentialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a credential, replacing any existing one with the same id.
    ///
    /// A replaced credential keeps its original insertion position.
    pub fn insert(&mut self, credential: Credential) -> Option<Credential> {
        if let Some(slot) = self.slots.get_mut(&credential.id) {
            return Some(std::mem::replace(&mut slot.credential, credential));
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.slots
            .insert(credential.id.clone(), Slot { seq, credential });
        None
    }

    pub fn get(&self, id: &str) -> Option<&Credential> {
        self.slots.get(id).map(|slot| &slot.credential)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Credential> {
        self.slots.get_mut(id).map(|slot| &mut slot.credential)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    /// Remove a credential, returning it with its insertion sequence so a
    /// failed write can put it back with `restore`.
    pub fn remove(&mut self, id: &str) -> Option<(u64, Credential)> {
        self.slots
            .remove(id)
            .map(|slot| (slot.seq, slot.credential))
    }

    /// Re-insert a credential at a previously recorded position.
    pub fn restore(&mut self, seq: u64, credential: Credential) {
        self.slots
            .insert(credential.id.clone(), Slot { seq, credential });
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All credentials in insertion order.
    pub fn in_insertion_order(&self) -> Vec<&Credential> {
        let mut slots: Vec<&Slot> = self.slots.values().collect();
        slots.sort_by_key(|slot| slot.seq);
        slots.into_iter().map(|slot| &slot.credential).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use zeroize::Zeroizing;

    fn cred(id: &str) -> Credential {
        Credential {
            id: id.into(),
            service: format!("{id}.example"),
            username: "user".into(),
            secret: Zeroizing::new("pw".into()),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn insertion_order_is_tracked() {
        let mut index = CredentialIndex::new();
        for id in ["c", "a", "b"] {
            index.insert(cred(id));
        }

        let ids: Vec<&str> = index
            .in_insertion_order()
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn replace_keeps_position() {
        let mut index = CredentialIndex::new();
        index.insert(cred("a"));
        index.insert(cred("b"));

        let mut changed = cred("a");
        changed.username = "other".into();
        assert!(index.insert(changed).is_some());

        let order = index.in_insertion_order();
        assert_eq!(order[0].id, "a");
        assert_eq!(order[0].username, "other");
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn remove_and_restore() {
        let mut index = CredentialIndex::new();
        index.insert(cred("a"));
        index.insert(cred("b"));

        let (seq, removed) = index.remove("a").unwrap();
        assert!(!index.contains("a"));
        assert!(index.remove("a").is_none());

        index.restore(seq, removed);
        assert_eq!(index.in_insertion_order()[0].id, "a");
    }
}
