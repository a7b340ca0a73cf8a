//! Splitting source text into independently animated units.

/// Size of the smallest animated piece of text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Every non-whitespace character, ordered across the whole text.
    Letter,
    /// Every word, ordered across the whole text.
    Word,
    /// Every letter, ordered within its word; later words start later.
    LetterInWord,
    /// The whole text as one unit.
    Block,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextUnit {
    pub text: String,
    /// Whitespace runs are kept in place but never move.
    pub animated: bool,
    /// Index of the word this unit belongs to.
    pub word: Option<usize>,
    /// Ordering group: the whole text, or the word for [`Granularity::LetterInWord`].
    pub group: usize,
    /// Position inside the ordering group.
    pub slot: usize,
}

impl TextUnit {
    fn space(text: String) -> Self {
        Self {
            text,
            animated: false,
            word: None,
            group: 0,
            slot: 0,
        }
    }
}

/// Split `text` into words and whitespace runs, preserving every character.
fn words(text: &str) -> Vec<(bool, &str)> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;
    for (i, ch) in text.char_indices() {
        let ws = ch.is_whitespace();
        match current {
            Some(prev) if prev != ws => {
                out.push((!prev, &text[start..i]));
                start = i;
                current = Some(ws);
            }
            None => current = Some(ws),
            _ => {}
        }
    }
    if let Some(ws) = current {
        out.push((!ws, &text[start..]));
    }
    out
}

pub fn split_units(text: &str, granularity: Granularity) -> Vec<TextUnit> {
    if text.is_empty() {
        return Vec::new();
    }
    if granularity == Granularity::Block {
        return vec![TextUnit {
            text: text.to_owned(),
            animated: true,
            word: Some(0),
            group: 0,
            slot: 0,
        }];
    }

    let mut out = Vec::new();
    let mut word_index = 0usize;
    let mut slot = 0usize;
    for (is_word, piece) in words(text) {
        if !is_word {
            out.push(TextUnit::space(piece.to_owned()));
            continue;
        }
        match granularity {
            Granularity::Word => {
                out.push(TextUnit {
                    text: piece.to_owned(),
                    animated: true,
                    word: Some(word_index),
                    group: 0,
                    slot,
                });
                slot += 1;
            }
            Granularity::Letter | Granularity::LetterInWord | Granularity::Block => {
                let per_word = granularity == Granularity::LetterInWord;
                for (i, ch) in piece.chars().enumerate() {
                    out.push(TextUnit {
                        text: ch.to_string(),
                        animated: true,
                        word: Some(word_index),
                        group: if per_word { word_index } else { 0 },
                        slot: if per_word { i } else { slot },
                    });
                    slot += 1;
                }
            }
        }
        word_index += 1;
    }
    out
}

/// Number of slots in each ordering group, indexed by group.
pub fn group_sizes(units: &[TextUnit]) -> Vec<usize> {
    let mut sizes: Vec<usize> = Vec::new();
    for u in units.iter().filter(|u| u.animated) {
        if sizes.len() <= u.group {
            sizes.resize(u.group + 1, 0);
        }
        sizes[u.group] = sizes[u.group].max(u.slot + 1);
    }
    sizes
}

#[cfg(test)]
#[path = "../../tests/unit/text/split.rs"]
mod tests;
