//! In-memory signature registry.
//!
//! Two views over the registered items:
//! - `by_key`: selector/topic → item, unique keys, last write wins
//! - `items`: every item ever added, in insertion order, duplicates kept
//!
//! The two may differ in length. Add and remove derive keys through the
//! same `InterfaceItem::signature_key`, so tuple-bearing items are removed
//! under exactly the key they were added with.

use abidecoder_core::{error::RegistryError, item::InterfaceItem, signature::SignatureKey};
use alloy_primitives::B256;
use indexmap::IndexMap;
use std::collections::HashSet;

use crate::abi_json;

/// Owned, clonable registry. Mutation takes `&mut self`; decoding only
/// borrows it shared.
#[derive(Debug, Clone, Default)]
pub struct SignatureRegistry {
    by_key: IndexMap<SignatureKey, InterfaceItem>,
    items: Vec<InterfaceItem>,
}

impl SignatureRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `items`.
    ///
    /// Every item is validated before anything is inserted; one invalid item
    /// leaves the registry untouched.
    pub fn add(&mut self, items: &[InterfaceItem]) -> Result<(), RegistryError> {
        let keys = keys_of(items)?;
        for (item, key) in items.iter().zip(keys) {
            if let Some(key) = key {
                if let Some(prev) = self.by_key.insert(key, item.clone()) {
                    if prev != *item {
                        tracing::debug!(%key, "signature key overwritten by a later item");
                    }
                }
            }
        }
        self.items.extend_from_slice(items);
        tracing::debug!(
            added = items.len(),
            keys = self.by_key.len(),
            "registered interface items"
        );
        Ok(())
    }

    /// Unregister `items`, matching stored items by recomputed key.
    pub fn remove(&mut self, items: &[InterfaceItem]) -> Result<(), RegistryError> {
        let keys = keys_of(items)?;
        // Constructors, fallbacks and receives have no key; match them by value.
        let unkeyed: Vec<&InterfaceItem> = items
            .iter()
            .zip(&keys)
            .filter(|(_, key)| key.is_none())
            .map(|(item, _)| item)
            .collect();
        let to_remove: HashSet<SignatureKey> = keys.into_iter().flatten().collect();

        for key in &to_remove {
            self.by_key.shift_remove(key);
        }

        // Stored items were validated on the way in, so their keys resolve.
        self.items.retain(|item| match item.signature_key() {
            Ok(Some(key)) => !to_remove.contains(&key),
            Ok(None) => !unkeyed.contains(&item),
            Err(_) => true,
        });

        tracing::debug!(
            removed_keys = to_remove.len(),
            remaining = self.items.len(),
            "removed interface items"
        );
        Ok(())
    }

    /// Register every item of an ABI JSON document.
    /// Returns the number of items added.
    ///
    /// # Errors
    /// `InvalidArgument` when the document is not a JSON array of interface
    /// items, or when any item fails validation.
    pub fn add_json(&mut self, json: &str) -> Result<usize, RegistryError> {
        let items = abi_json::parse_items(json)?;
        self.add(&items)?;
        Ok(items.len())
    }

    /// Unregister every item of an ABI JSON document.
    ///
    /// # Errors
    /// Same as [`add_json`](Self::add_json).
    pub fn remove_json(&mut self, json: &str) -> Result<(), RegistryError> {
        let items = abi_json::parse_items(json)?;
        self.remove(&items)
    }

    /// Item registered under `key`.
    pub fn lookup(&self, key: &SignatureKey) -> Option<&InterfaceItem> {
        self.by_key.get(key)
    }

    /// Function or error registered under a 4-byte selector.
    pub fn lookup_selector(&self, selector: [u8; 4]) -> Option<&InterfaceItem> {
        self.lookup(&SignatureKey::Selector(selector))
    }

    /// Event registered under a `topics[0]` hash.
    pub fn lookup_topic(&self, topic: &B256) -> Option<&InterfaceItem> {
        self.lookup(&SignatureKey::Topic(*topic))
    }

    /// First registered constructor, if any.
    pub fn constructor(&self) -> Option<&InterfaceItem> {
        self.items
            .iter()
            .find(|i| matches!(i, InterfaceItem::Constructor { .. }))
    }

    /// Every item ever added, in insertion order (duplicates included).
    pub fn items(&self) -> &[InterfaceItem] {
        &self.items
    }

    /// Key → item view (one entry per live key).
    pub fn keys(&self) -> &IndexMap<SignatureKey, InterfaceItem> {
        &self.by_key
    }

    /// Number of live keys.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// `true` when no key is registered.
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Validate and key every item up front.
fn keys_of(items: &[InterfaceItem]) -> Result<Vec<Option<SignatureKey>>, RegistryError> {
    items
        .iter()
        .map(|item| {
            item.validate()?;
            item.signature_key()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use abidecoder_core::item::{EventParam, Param};

    fn sample_abi() -> Vec<InterfaceItem> {
        vec![
            InterfaceItem::function(
                "transfer",
                vec![Param::new("to", "address"), Param::new("value", "uint256")],
            ),
            InterfaceItem::event(
                "Approval",
                vec![
                    EventParam::indexed("owner", "address"),
                    EventParam::indexed("spender", "address"),
                    EventParam::data("value", "uint256"),
                ],
            ),
        ]
    }

    fn tuple_item() -> InterfaceItem {
        InterfaceItem::function(
            "fill",
            vec![Param::tuple(
                "order",
                "tuple",
                vec![Param::new("maker", "address"), Param::new("amount", "uint256")],
            )],
        )
    }

    #[test]
    fn add_and_lookup() {
        let mut reg = SignatureRegistry::new();
        reg.add(&sample_abi()).unwrap();

        let transfer = reg.lookup_selector([0xa9, 0x05, 0x9c, 0xbb]).unwrap();
        assert_eq!(transfer.name(), Some("transfer"));

        let approval_topic = SignatureKey::from_hex(
            "0x8c5be1e5ebec7d5bd14f71427d1e84f3dd0314c0f7b2291e5b200ac8c7c3b925",
        )
        .unwrap();
        assert_eq!(reg.lookup(&approval_topic).unwrap().name(), Some("Approval"));
        assert_eq!(reg.items(), sample_abi().as_slice());
    }

    #[test]
    fn add_then_remove_empties_the_list() {
        let mut reg = SignatureRegistry::new();
        reg.add(&sample_abi()).unwrap();
        reg.remove(&sample_abi()).unwrap();
        assert!(reg.items().is_empty());
        assert!(reg.is_empty());
    }

    #[test]
    fn duplicates_kept_in_list_but_not_map() {
        let mut reg = SignatureRegistry::new();
        reg.add(&sample_abi()).unwrap();
        reg.add(&sample_abi()).unwrap();
        assert_eq!(reg.items().len(), 4);
        assert_eq!(reg.keys().len(), 2);

        reg.remove(&sample_abi()[..1]).unwrap();
        assert_eq!(reg.items().len(), 2);
        assert_eq!(reg.keys().len(), 1);
    }

    #[test]
    fn later_add_overwrites_key() {
        let mut reg = SignatureRegistry::new();
        let first = InterfaceItem::function("transfer", vec![
            Param::new("to", "address"),
            Param::new("value", "uint256"),
        ]);
        let renamed = InterfaceItem::function("transfer", vec![
            Param::new("dst", "address"),
            Param::new("wad", "uint256"),
        ]);
        reg.add(&[first]).unwrap();
        reg.add(&[renamed.clone()]).unwrap();
        assert_eq!(reg.keys().len(), 1);
        assert_eq!(reg.lookup_selector([0xa9, 0x05, 0x9c, 0xbb]), Some(&renamed));
    }

    #[test]
    fn tuple_items_remove_symmetrically() {
        let mut reg = SignatureRegistry::new();
        reg.add(&[tuple_item()]).unwrap();
        assert_eq!(reg.len(), 1);
        reg.remove(&[tuple_item()]).unwrap();
        assert!(reg.is_empty());
        assert!(reg.items().is_empty());
    }

    #[test]
    fn unnamed_items_listed_but_not_keyed() {
        let mut reg = SignatureRegistry::new();
        let ctor = InterfaceItem::constructor(vec![Param::new("owner", "address")]);
        reg.add(&[ctor.clone()]).unwrap();
        assert_eq!(reg.items().len(), 1);
        assert!(reg.is_empty());
        assert_eq!(reg.constructor(), Some(&ctor));

        // Unkeyed items are removed only by an identical item.
        reg.remove(&[InterfaceItem::constructor(vec![])]).unwrap();
        assert_eq!(reg.items().len(), 1);
        reg.remove(&[ctor]).unwrap();
        assert!(reg.items().is_empty());
        assert_eq!(reg.constructor(), None);
    }

    #[test]
    fn invalid_item_leaves_registry_untouched() {
        let mut reg = SignatureRegistry::new();
        let mut items = sample_abi();
        items.push(InterfaceItem::function("bad", vec![Param::new("x", "uint9")]));
        let err = reg.add(&items).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidArgument { .. }));
        assert!(reg.items().is_empty());
        assert!(reg.is_empty());
    }

    #[test]
    fn add_json_rejects_non_arrays() {
        let mut reg = SignatureRegistry::new();
        let err = reg.add_json(r#"{"type": "function", "name": "f"}"#).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidArgument { .. }));
        assert_eq!(reg.add_json("[]").unwrap(), 0);
    }
}
