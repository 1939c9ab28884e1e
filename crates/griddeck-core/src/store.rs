// ABOUTME: Defines CardLayoutStore, the state container for dashboard cards and their grid layout.
// ABOUTME: Keeps the two collections consistent and persists both after every mutation.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::board::BoardData;
use crate::card::{Card, next_id_for};
use crate::layout::LayoutItem;
use crate::patch::CardPatch;
use crate::storage::{CARDS_KEY, KeyValueStore, LAYOUT_KEY, StorageError};

/// Title used by `add_default_card`.
pub const DEFAULT_TITLE: &str = "New Card";

/// Content used by `add_default_card`.
pub const DEFAULT_CONTENT: &str = "Click to edit";

/// Starter cards inserted when there is no usable persisted state.
pub const SEED_CARDS: [(&str, &str); 3] = [
    (
        "Welcome!",
        "Welcome to your drag & drop dashboard. You can edit this card by clicking on it.",
    ),
    (
        "Getting Started",
        "Drag cards around to reorganize your layout. Resize cards by dragging the corners.",
    ),
    (
        "Add New Cards",
        "Use the + button to add new cards. You can customize the title and content of each card.",
    ),
];

/// Errors surfaced by store mutations. Loading never returns these; a failed
/// load is logged and recovered from.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("card id space exhausted: card-{} already issued", u64::MAX)]
    IdSpaceExhausted,
}

/// Cards plus their grid placements, held as two parallel sequences.
///
/// Every card id appears exactly once as a layout item key and vice versa
/// after any mutation other than `import_data`, which trusts its input.
/// Ids are `"card-<n>"` with `n` drawn from a counter that only moves
/// forward until `clear_all` or `import_data` resets it. Once `card-<u64::MAX>`
/// exists the counter is exhausted and `add_card` fails.
#[derive(Debug)]
pub struct CardLayoutStore<S: KeyValueStore> {
    cards: Vec<Card>,
    layout: Vec<LayoutItem>,
    next_id: Option<u64>,
    storage: S,
}

impl<S: KeyValueStore> CardLayoutStore<S> {
    /// Construct a store over `storage` and hydrate it once.
    ///
    /// Persisted state is loaded when present. A missing or unusable cards
    /// entry results in the three seed cards instead; an unusable layout
    /// entry is rebuilt from the loaded cards. Only write failures while
    /// seeding are returned as errors.
    pub fn open(storage: S) -> Result<Self, StoreError> {
        let mut store = Self {
            cards: Vec::new(),
            layout: Vec::new(),
            next_id: Some(1),
            storage,
        };
        store.hydrate()?;
        Ok(store)
    }

    /// Tear the store down and hand back its backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// The layout as the drag grid renders it.
    pub fn layout_data(&self) -> &[LayoutItem] {
        &self.layout
    }

    /// Number the next added card will get, or None when exhausted.
    pub fn next_id(&self) -> Option<u64> {
        self.next_id
    }

    /// Create a card with the default geometry and a matching layout item.
    pub fn add_card(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Card, StoreError> {
        let number = self.next_id.ok_or(StoreError::IdSpaceExhausted)?;
        let card = Card::new(number, title.into(), content.into());
        self.next_id = number.checked_add(1);

        self.layout.push(LayoutItem::for_card(&card));
        self.cards.push(card.clone());
        tracing::debug!(card_id = %card.id, "added card");

        self.save()?;
        Ok(card)
    }

    /// `add_card` with the "New Card" / "Click to edit" defaults.
    pub fn add_default_card(&mut self) -> Result<Card, StoreError> {
        self.add_card(DEFAULT_TITLE, DEFAULT_CONTENT)
    }

    /// Merge `patch` into the card with `id`. Geometry fields are applied to
    /// the card and its layout item together. Unknown ids are ignored and
    /// nothing is written.
    pub fn update_card(&mut self, id: &str, patch: CardPatch) -> Result<(), StoreError> {
        let Some(card) = self.cards.iter_mut().find(|card| card.id == id) else {
            tracing::warn!(card_id = id, "update for unknown card ignored");
            return Ok(());
        };

        if let Some(title) = patch.title.clone() {
            card.title = title;
        }
        if let Some(content) = patch.content.clone() {
            card.content = content;
        }

        if patch.has_geometry() {
            let geometry = patch.merge_geometry(card.geometry());
            card.set_geometry(geometry);
            match self.layout.iter_mut().find(|item| item.i == id) {
                Some(item) => item.set_geometry(geometry),
                None => tracing::warn!(card_id = id, "card has no layout item to move"),
            }
        }

        tracing::debug!(card_id = id, "updated card");
        self.save()
    }

    /// Remove the card and layout item with `id`. Persists even when
    /// nothing matched.
    pub fn delete_card(&mut self, id: &str) -> Result<(), StoreError> {
        let before = (self.cards.len(), self.layout.len());
        self.cards.retain(|card| card.id != id);
        self.layout.retain(|item| item.i != id);

        if before == (self.cards.len(), self.layout.len()) {
            tracing::debug!(card_id = id, "delete matched no card");
        } else {
            tracing::debug!(card_id = id, "deleted card");
        }

        self.save()
    }

    /// Replace the layout with the arrangement reported by the drag grid and
    /// copy each item's geometry onto its card. Cards absent from
    /// `new_layout` keep their previous geometry.
    pub fn update_layout(&mut self, new_layout: Vec<LayoutItem>) -> Result<(), StoreError> {
        for item in &new_layout {
            if let Some(card) = self.cards.iter_mut().find(|card| card.id == item.i) {
                card.set_geometry(item.geometry());
            }
        }
        self.layout = new_layout;
        tracing::debug!(items = self.layout.len(), "layout updated");

        self.save()
    }

    /// Drop every card and restart numbering at `card-1`.
    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        self.cards.clear();
        self.layout.clear();
        self.next_id = Some(1);
        tracing::debug!("cleared all cards");

        self.save()
    }

    /// Snapshot both collections for saving elsewhere.
    pub fn export_data(&self) -> BoardData {
        BoardData {
            cards: self.cards.clone(),
            layout: self.layout.clone(),
        }
    }

    /// Replace both collections with `data` as given and renumber from one
    /// past its highest card id. No consistency check is made between the
    /// imported cards and layout.
    pub fn import_data(&mut self, data: BoardData) -> Result<(), StoreError> {
        self.cards = data.cards;
        self.layout = data.layout;
        self.next_id = next_id_for(&self.cards);
        tracing::debug!(
            cards = self.cards.len(),
            layout = self.layout.len(),
            next_id = ?self.next_id,
            "imported board"
        );

        self.save()
    }

    /// Serialize both collections and write them under their storage keys.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let cards = serde_json::to_string(&self.cards)?;
        let layout = serde_json::to_string(&self.layout)?;
        self.storage.set(CARDS_KEY, &cards)?;
        self.storage.set(LAYOUT_KEY, &layout)?;
        Ok(())
    }

    fn hydrate(&mut self) -> Result<(), StoreError> {
        if !self.storage.is_persistent() {
            tracing::info!("storage is not persistent, starting from seed cards");
            return self.seed_default_cards();
        }

        let cards = match self.read_entry::<Card>(CARDS_KEY) {
            Ok(Some(cards)) => cards,
            Ok(None) => {
                if matches!(self.storage.get(LAYOUT_KEY), Ok(Some(_))) {
                    tracing::warn!("layout entry found without cards entry, ignoring it");
                }
                tracing::info!("no persisted cards, starting from seed cards");
                return self.seed_default_cards();
            }
            Err(err) => {
                tracing::error!("error loading persisted cards: {}", err);
                return self.seed_default_cards();
            }
        };

        self.next_id = next_id_for(&cards);
        self.cards = cards;
        self.layout = match self.read_entry::<LayoutItem>(LAYOUT_KEY) {
            Ok(layout) => layout.unwrap_or_default(),
            Err(err) => {
                tracing::error!("error loading persisted layout, rebuilding from cards: {}", err);
                self.cards.iter().map(LayoutItem::for_card).collect()
            }
        };

        if self.next_id.is_none() {
            tracing::warn!("card id space exhausted, new cards cannot be added");
        }
        tracing::info!(
            cards = self.cards.len(),
            layout = self.layout.len(),
            next_id = ?self.next_id,
            "loaded persisted board"
        );
        Ok(())
    }

    /// Read and parse one JSON array entry without touching in-memory state.
    fn read_entry<T: DeserializeOwned>(&self, key: &str) -> Result<Option<Vec<T>>, StoreError> {
        match self.storage.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn seed_default_cards(&mut self) -> Result<(), StoreError> {
        if !self.cards.is_empty() {
            return Ok(());
        }
        for (title, content) in SEED_CARDS {
            self.add_card(title, content)?;
        }
        Ok(())
    }
}
