// ABOUTME: Defines LayoutItem, the grid-placement record consumed and produced by the drag grid.
// ABOUTME: Each item is keyed by `i`, which matches exactly one Card id.

use serde::{Deserialize, Serialize};

use crate::card::{Card, Geometry};

/// Where one card sits on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutItem {
    pub i: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl LayoutItem {
    pub fn new(i: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            i: i.into(),
            x: geometry.x,
            y: geometry.y,
            w: geometry.w,
            h: geometry.h,
        }
    }

    /// Project a card's current placement into a layout item.
    pub fn for_card(card: &Card) -> Self {
        Self::new(card.id.clone(), card.geometry())
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
