//! REST resource description and the optimistic list operations the
//! frontend data context applies to its cached collections.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A CRUD collection exposed by the backend under `ENDPOINT`.
///
/// `Draft` is the create/update payload; it serialises with the backend's
/// field names, same as `Self`.
pub trait Resource: Clone + PartialEq + DeserializeOwned + Serialize + 'static {
    type Draft: Clone + Serialize + 'static;

    /// Path relative to the API base, e.g. `/sucursales`.
    const ENDPOINT: &'static str;

    /// Singular label used in UI messages ("sucursal", "cliente", ...).
    const LABEL: &'static str;

    fn id(&self) -> i64;

    /// Build the row shown while a create/update is in flight.
    fn from_draft(id: i64, draft: &Self::Draft) -> Self;

    /// Validation run before any request is sent.
    fn validate(draft: &Self::Draft) -> Result<(), String>;
}

/// Local ids handed to optimistic rows until the server assigns a real one.
#[derive(Debug, Default)]
pub struct TempIds {
    next: i64,
}

impl TempIds {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    pub fn next_id(&mut self) -> i64 {
        self.next -= 1;
        self.next
    }
}

pub fn is_temp_id(id: i64) -> bool {
    id < 0
}

/// Append an optimistic row for `draft` and return its temporary id.
pub fn optimistic_insert<R: Resource>(items: &mut Vec<R>, ids: &mut TempIds, draft: &R::Draft) -> i64 {
    let temp_id = ids.next_id();
    items.push(R::from_draft(temp_id, draft));
    temp_id
}

/// Replace row `id` with the draft's values. Returns `false` if not found.
pub fn optimistic_update<R: Resource>(items: &mut [R], id: i64, draft: &R::Draft) -> bool {
    match items.iter_mut().find(|item| item.id() == id) {
        Some(slot) => {
            *slot = R::from_draft(id, draft);
            true
        }
        None => false,
    }
}

/// Remove row `id`. Returns `false` if not found.
pub fn optimistic_remove<R: Resource>(items: &mut Vec<R>, id: i64) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

/// Swap the row with id `local_id` for the server's copy.
///
/// If the row vanished meanwhile (e.g. a refetch replaced the list and
/// already contains the server row) the server row is only added when
/// missing.
pub fn confirm<R: Resource>(items: &mut Vec<R>, local_id: i64, server: R) {
    if let Some(slot) = items.iter_mut().find(|item| item.id() == local_id) {
        *slot = server;
        return;
    }
    if !items.iter().any(|item| item.id() == server.id()) {
        items.push(server);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: i64,
        name: String,
    }

    #[derive(Debug, Clone, Serialize)]
    struct ItemDraft {
        name: String,
    }

    impl Resource for Item {
        type Draft = ItemDraft;
        const ENDPOINT: &'static str = "/items";
        const LABEL: &'static str = "item";

        fn id(&self) -> i64 {
            self.id
        }

        fn from_draft(id: i64, draft: &ItemDraft) -> Self {
            Item { id, name: draft.name.clone() }
        }

        fn validate(draft: &ItemDraft) -> Result<(), String> {
            if draft.name.is_empty() {
                Err("vacío".into())
            } else {
                Ok(())
            }
        }
    }

    fn draft(name: &str) -> ItemDraft {
        ItemDraft { name: name.to_string() }
    }

    #[test]
    fn test_temp_ids_are_negative_and_unique() {
        let mut ids = TempIds::new();
        let a = ids.next_id();
        let b = ids.next_id();
        assert!(is_temp_id(a) && is_temp_id(b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_insert_then_confirm() {
        let mut items = vec![Item { id: 1, name: "a".into() }];
        let mut ids = TempIds::new();
        let temp = optimistic_insert(&mut items, &mut ids, &draft("b"));
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].id, temp);

        confirm(&mut items, temp, Item { id: 42, name: "b".into() });
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 42]);
    }

    #[test]
    fn test_confirm_after_refetch_does_not_duplicate() {
        let mut items = vec![Item { id: 42, name: "b".into() }];
        confirm(&mut items, -1, Item { id: 42, name: "b".into() });
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_update_and_remove() {
        let mut items = vec![
            Item { id: 1, name: "a".into() },
            Item { id: 2, name: "b".into() },
        ];
        assert!(optimistic_update(&mut items, 2, &draft("bb")));
        assert_eq!(items[1].name, "bb");
        assert!(!optimistic_update(&mut items, 9, &draft("x")));

        assert!(optimistic_remove(&mut items, 1));
        assert!(!optimistic_remove(&mut items, 1));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_validate_hook() {
        assert!(Item::validate(&draft("")).is_err());
        assert!(Item::validate(&draft("ok")).is_ok());
    }
}
