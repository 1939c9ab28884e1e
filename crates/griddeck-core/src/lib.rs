// ABOUTME: Core library for griddeck, containing the card and grid-layout data model.
// ABOUTME: Defines the storage backend trait and the CardLayoutStore that keeps cards and layout in lockstep.

pub mod board;
pub mod card;
pub mod layout;
pub mod patch;
pub mod storage;
pub mod store;

pub use board::BoardData;
pub use card::{Card, Geometry, card_number, next_id_for};
pub use layout::LayoutItem;
pub use patch::CardPatch;
pub use storage::{CARDS_KEY, KeyValueStore, LAYOUT_KEY, MemoryStorage, NoopStorage, StorageError};
pub use store::{CardLayoutStore, StoreError};
