// ABOUTME: Defines BoardData, the import/export payload holding both cards and layout.
// ABOUTME: Missing or null collections deserialize as empty sequences.

use serde::{Deserialize, Deserializer, Serialize};

use crate::card::Card;
use crate::layout::LayoutItem;

/// Both collections of a board, as handed to and received from file save/load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardData {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cards: Vec<Card>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub layout: Vec<LayoutItem>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_empty() {
        let data: BoardData = serde_json::from_str("{}").expect("parse");
        assert!(data.cards.is_empty());
        assert!(data.layout.is_empty());
    }

    #[test]
    fn null_fields_default_to_empty() {
        let data: BoardData =
            serde_json::from_str(r#"{"cards":null,"layout":null}"#).expect("parse");
        assert_eq!(data, BoardData::default());
    }

    #[test]
    fn cards_without_layout_parse() {
        let data: BoardData = serde_json::from_str(
            r#"{"cards":[{"id":"card-9","title":"T","content":"C","x":1,"y":2,"w":3,"h":4,"i":"card-9"}]}"#,
        )
        .expect("parse");

        assert_eq!(data.cards.len(), 1);
        assert_eq!(data.cards[0].id, "card-9");
        assert!(data.layout.is_empty());
    }
}
