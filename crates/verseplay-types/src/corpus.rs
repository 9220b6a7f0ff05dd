//! Corpus entities: poems and nine-grid questions.
//!
//! These are read-only rows from the pre-populated corpus store. The
//! corpus provider in verseplay-infra maps database rows into these
//! shapes; the engines never see raw rows.

use serde::{Deserialize, Serialize};

/// A full poem with its lines in recitation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poem {
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Lines in order, punctuation included.
    pub lines: Vec<String>,
    /// All lines concatenated, used as the recitation reference text.
    pub full_text: String,
}

impl Poem {
    /// Build a poem from its lines, deriving `full_text`.
    pub fn new(id: i64, title: String, author: String, lines: Vec<String>) -> Self {
        let full_text = lines.concat();
        Self {
            id,
            title,
            author,
            lines,
            full_text,
        }
    }
}

/// A nine-grid question: a 3x3 grid of cell strings and one answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridQuestion {
    pub grid: [[String; 3]; 3],
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poem_full_text_is_concatenation() {
        let poem = Poem::new(
            1,
            "静夜思".to_string(),
            "李白".to_string(),
            vec!["床前明月光，".to_string(), "疑是地上霜。".to_string()],
        );
        assert_eq!(poem.full_text, "床前明月光，疑是地上霜。");
    }

    #[test]
    fn test_grid_question_serde_shape() {
        let q = GridQuestion {
            grid: [
                ["白".into(), "日".into(), "依".into()],
                ["山".into(), "尽".into(), "黄".into()],
                ["河".into(), "入".into(), "海".into()],
            ],
            answer: "登鹳雀楼".to_string(),
        };
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["grid"][0][0], "白");
        assert_eq!(json["answer"], "登鹳雀楼");
    }
}
