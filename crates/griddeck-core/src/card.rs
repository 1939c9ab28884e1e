// ABOUTME: Defines the Card struct representing one resizable dashboard tile.
// ABOUTME: Also holds the shared Geometry record and the "card-<n>" id numbering helpers.

use serde::{Deserialize, Serialize};

/// Prefix of every generated card id.
pub const CARD_ID_PREFIX: &str = "card-";

/// Grid placement shared by cards and layout items, in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Geometry {
    /// Placement given to freshly created cards: top-left corner, 2x2.
    pub const DEFAULT: Geometry = Geometry {
        x: 0,
        y: 0,
        w: 2,
        h: 2,
    };
}

impl Default for Geometry {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A dashboard tile with editable text and a grid bounding box. The `i`
/// field duplicates `id` because the drag grid keys its items by `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub title: String,
    pub content: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub i: String,
}

impl Card {
    /// Create card number `number` with the default geometry.
    pub fn new(number: u64, title: String, content: String) -> Self {
        let id = format!("{CARD_ID_PREFIX}{number}");
        let Geometry { x, y, w, h } = Geometry::DEFAULT;
        Self {
            i: id.clone(),
            id,
            title,
            content,
            x,
            y,
            w,
            h,
        }
    }

    pub fn geometry(&self) -> Geometry {
        Geometry {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
        }
    }

    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.x = geometry.x;
        self.y = geometry.y;
        self.w = geometry.w;
        self.h = geometry.h;
    }
}

/// Extract the numeric suffix of a card id.
///
/// The first `"card-"` occurrence is removed, then the leading digits are
/// parsed (leading whitespace and a `+` sign are skipped). Returns None when
/// no digits follow, so ids like `"card-abc"` or `"note"` never take part in
/// id numbering.
pub fn card_number(id: &str) -> Option<u64> {
    let rest = id.replacen(CARD_ID_PREFIX, "", 1);
    let rest = rest.trim_start();
    let rest = rest.strip_prefix('+').unwrap_or(rest);
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

/// The next free card number: one past the highest parseable id, or 1.
/// None when the highest id is `u64::MAX` and no number is left.
pub fn next_id_for(cards: &[Card]) -> Option<u64> {
    match cards.iter().filter_map(|card| card_number(&card.id)).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}
