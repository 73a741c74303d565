use crate::word::Word;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Bucket {
    words: Vec<Word>,
}

impl Bucket {
    pub fn new() -> Self {
        Self { words: Vec::new() }
    }

    pub fn with_len(len: usize) -> Self {
        Self {
            words: vec![0; len],
        }
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn grow_to(&mut self, len: usize) -> usize {
        let added = len.saturating_sub(self.words.len());
        if added > 0 {
            self.words.reserve_exact(added);
            self.words.resize(len, 0);
        }
        added
    }

    pub fn get(&self, index: usize) -> Option<Word> {
        self.words.get(index).copied()
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn words_mut(&mut self) -> &mut [Word] {
        &mut self.words
    }
}
