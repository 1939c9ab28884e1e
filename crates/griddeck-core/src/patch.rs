// ABOUTME: Defines CardPatch, a partial update to a card's text and geometry.
// ABOUTME: Absent fields leave the corresponding card field unchanged.

use serde::{Deserialize, Serialize};

use crate::card::Geometry;

/// Field-level overwrite for a card. The id is not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<i32>,
}

impl CardPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// A patch that sets all four geometry fields.
    pub fn geometry(geometry: Geometry) -> Self {
        Self {
            x: Some(geometry.x),
            y: Some(geometry.y),
            w: Some(geometry.w),
            h: Some(geometry.h),
            ..Self::default()
        }
    }

    pub fn has_geometry(&self) -> bool {
        self.x.is_some() || self.y.is_some() || self.w.is_some() || self.h.is_some()
    }

    /// Overlay the patch's geometry fields onto `current`.
    pub fn merge_geometry(&self, current: Geometry) -> Geometry {
        Geometry {
            x: self.x.unwrap_or(current.x),
            y: self.y.unwrap_or(current.y),
            w: self.w.unwrap_or(current.w),
            h: self.h.unwrap_or(current.h),
        }
    }
}
