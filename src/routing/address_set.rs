//! Round-robin address set
//!
//! Ordered, duplicate-free members of one server role with a rotating cursor.

use std::collections::HashSet;
use std::fmt;

use crate::address::ServerAddress;

/// Compute the members after applying `desired` to `current`.
///
/// Returns the new member list (surviving members keep their order, newcomers are
/// appended in `desired` order) and the members that were dropped. Duplicates in
/// `desired` collapse to their first occurrence.
pub fn diff_and_apply(
    current: &[ServerAddress],
    desired: &[ServerAddress],
) -> (Vec<ServerAddress>, Vec<ServerAddress>) {
    let wanted: HashSet<&ServerAddress> = desired.iter().collect();

    let (mut kept, removed): (Vec<ServerAddress>, Vec<ServerAddress>) = current
        .iter()
        .cloned()
        .partition(|addr| wanted.contains(addr));

    let mut seen: HashSet<ServerAddress> = kept.iter().cloned().collect();
    for addr in desired {
        if seen.insert(addr.clone()) {
            kept.push(addr.clone());
        }
    }

    (kept, removed)
}

/// Round-robin address set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundRobinAddressSet {
    /// Members in rotation order
    items: Vec<ServerAddress>,
    /// Position handed out by the next call to `next`
    cursor: usize,
}

impl RoundRobinAddressSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of members
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Whether the set has no members
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `address` is a member
    pub fn contains(&self, address: &ServerAddress) -> bool {
        self.items.contains(address)
    }

    /// Members in rotation order
    pub fn as_slice(&self) -> &[ServerAddress] {
        &self.items
    }

    /// Hand out the member under the cursor and advance it.
    ///
    /// Returns `None` when the set is empty.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<ServerAddress> {
        if self.items.is_empty() {
            return None;
        }

        let index = self.cursor % self.items.len();
        self.cursor = (index + 1) % self.items.len();
        Some(self.items[index].clone())
    }

    /// Remove `address` if present. Returns whether it was a member.
    pub fn remove(&mut self, address: &ServerAddress) -> bool {
        let Some(position) = self.items.iter().position(|a| a == address) else {
            return false;
        };

        self.items.remove(position);
        if position < self.cursor {
            self.cursor -= 1;
        }
        if self.cursor >= self.items.len() {
            self.cursor = 0;
        }
        true
    }

    /// Replace the members with `addresses`, collecting dropped members into `removed`.
    ///
    /// Members present in both keep their rotation position; newcomers go to the end.
    pub fn update(&mut self, addresses: &[ServerAddress], removed: &mut HashSet<ServerAddress>) {
        let (items, dropped) = diff_and_apply(&self.items, addresses);

        // members dropped ahead of the cursor shift it back
        let dropped_before_cursor = self.items[..self.cursor.min(self.items.len())]
            .iter()
            .filter(|a| dropped.contains(*a))
            .count();
        self.cursor -= dropped_before_cursor;

        self.items = items;
        if self.cursor >= self.items.len() {
            self.cursor = 0;
        }

        removed.extend(dropped);
    }
}

impl fmt::Display for RoundRobinAddressSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, addr) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", addr)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(host: &str) -> ServerAddress {
        ServerAddress::new(host, 7687)
    }

    fn set_of(hosts: &[&str]) -> RoundRobinAddressSet {
        let mut set = RoundRobinAddressSet::new();
        let addresses: Vec<_> = hosts.iter().map(|h| addr(h)).collect();
        set.update(&addresses, &mut HashSet::new());
        set
    }

    #[test]
    fn test_empty_set() {
        let mut set = RoundRobinAddressSet::new();
        assert_eq!(set.size(), 0);
        assert!(set.next().is_none());
        assert!(!set.remove(&addr("server1")));
    }

    #[test]
    fn test_round_robin_rotation() {
        let mut set = set_of(&["server1", "server2", "server3"]);

        assert_eq!(set.next(), Some(addr("server1")));
        assert_eq!(set.next(), Some(addr("server2")));
        assert_eq!(set.next(), Some(addr("server3")));
        assert_eq!(set.next(), Some(addr("server1")));
    }

    #[test]
    fn test_update_appends_new_members() {
        let mut set = set_of(&["server1", "server2"]);
        let mut removed = HashSet::new();

        set.update(&[addr("server3"), addr("server2"), addr("server1")], &mut removed);

        assert!(removed.is_empty());
        assert_eq!(set.as_slice(), &[addr("server1"), addr("server2"), addr("server3")]);
    }

    #[test]
    fn test_update_collects_removed() {
        let mut set = set_of(&["server1", "server2", "server3"]);
        let mut removed = HashSet::new();
        removed.insert(addr("elsewhere"));

        set.update(&[addr("server2"), addr("server4")], &mut removed);

        assert_eq!(set.as_slice(), &[addr("server2"), addr("server4")]);
        assert_eq!(removed.len(), 3);
        assert!(removed.contains(&addr("server1")));
        assert!(removed.contains(&addr("server3")));
        assert!(removed.contains(&addr("elsewhere")));
    }

    #[test]
    fn test_update_is_idempotent() {
        let desired = vec![addr("server1"), addr("server2")];
        let mut set = set_of(&["server3"]);

        let mut first = HashSet::new();
        set.update(&desired, &mut first);
        assert_eq!(first.len(), 1);

        let snapshot = set.as_slice().to_vec();
        let mut second = HashSet::new();
        set.update(&desired, &mut second);
        assert!(second.is_empty());
        assert_eq!(set.as_slice(), snapshot.as_slice());
    }

    #[test]
    fn test_update_ignores_duplicates() {
        let set = set_of(&["server1", "server1", "server2", "server1"]);
        assert_eq!(set.size(), 2);
    }

    #[test]
    fn test_update_keeps_cursor_on_surviving_member() {
        let mut set = set_of(&["server1", "server2", "server3"]);
        assert_eq!(set.next(), Some(addr("server1")));
        assert_eq!(set.next(), Some(addr("server2")));

        // server3 is next; dropping server1 must not skip it
        set.update(&[addr("server2"), addr("server3")], &mut HashSet::new());
        assert_eq!(set.next(), Some(addr("server3")));
        assert_eq!(set.next(), Some(addr("server2")));
    }

    #[test]
    fn test_remove_before_cursor() {
        let mut set = set_of(&["server1", "server2", "server3"]);
        set.next();

        assert!(set.remove(&addr("server1")));
        assert_eq!(set.next(), Some(addr("server2")));
        assert_eq!(set.next(), Some(addr("server3")));
    }

    #[test]
    fn test_remove_at_cursor() {
        let mut set = set_of(&["server1", "server2", "server3"]);
        set.next();

        assert!(set.remove(&addr("server2")));
        assert_eq!(set.next(), Some(addr("server3")));
        assert_eq!(set.next(), Some(addr("server1")));
    }

    #[test]
    fn test_remove_last_wraps_cursor() {
        let mut set = set_of(&["server1", "server2", "server3"]);
        set.next();
        set.next();

        assert!(set.remove(&addr("server3")));
        assert_eq!(set.next(), Some(addr("server1")));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut set = set_of(&["server1"]);
        assert!(!set.remove(&addr("server2")));
        assert_eq!(set.size(), 1);
    }

    #[test]
    fn test_diff_and_apply() {
        let current = vec![addr("a"), addr("b"), addr("c")];
        let desired = vec![addr("d"), addr("c"), addr("a")];

        let (items, removed) = diff_and_apply(&current, &desired);

        assert_eq!(items, vec![addr("a"), addr("c"), addr("d")]);
        assert_eq!(removed, vec![addr("b")]);
    }

    #[test]
    fn test_display() {
        let set = set_of(&["server1", "server2"]);
        assert_eq!(set.to_string(), "[server1:7687, server2:7687]");
        assert_eq!(RoundRobinAddressSet::new().to_string(), "[]");
    }
}
