use crate::content::Flashcard;

/// A cyclic deck of flashcards showing one face of one card at a time
#[derive(Debug, Clone, Default)]
pub struct FlashcardDeck {
    cards: Vec<Flashcard>,
    index: usize,
    flipped: bool,
}

impl FlashcardDeck {
    pub fn new(cards: Vec<Flashcard>) -> Self {
        Self {
            cards,
            index: 0,
            flipped: false,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn current(&self) -> Option<&Flashcard> {
        self.cards.get(self.index)
    }

    /// The face currently facing the student
    pub fn visible_face(&self) -> Option<&str> {
        self.current().map(|card| {
            if self.flipped {
                card.back.as_str()
            } else {
                card.front.as_str()
            }
        })
    }

    pub fn flip(&mut self) {
        if !self.is_empty() {
            self.flipped = !self.flipped;
        }
    }

    /// Move to the next card, wrapping to the first; always shows the front
    pub fn next(&mut self) {
        self.flipped = false;
        if !self.is_empty() {
            self.index = (self.index + 1) % self.cards.len();
        }
    }

    /// Move to the previous card, wrapping to the last; always shows the front
    pub fn previous(&mut self) {
        self.flipped = false;
        if !self.is_empty() {
            self.index = (self.index + self.cards.len() - 1) % self.cards.len();
        }
    }

    /// "Card i of n", or `None` for an empty deck
    pub fn position_label(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(format!("Card {} of {}", self.index + 1, self.cards.len()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(n: usize) -> FlashcardDeck {
        FlashcardDeck::new(
            (0..n)
                .map(|i| Flashcard {
                    front: format!("term {}", i),
                    back: format!("definition {}", i),
                })
                .collect(),
        )
    }

    #[test]
    fn test_navigation_wraps_both_ways() {
        let mut deck = deck(3);
        deck.previous();
        assert_eq!(deck.index(), 2);
        deck.next();
        assert_eq!(deck.index(), 0);

        for _ in 0..3 {
            deck.next();
        }
        assert_eq!(deck.index(), 0);
    }

    #[test]
    fn test_navigation_resets_flip() {
        let mut deck = deck(2);
        deck.flip();
        assert!(deck.is_flipped());
        assert_eq!(deck.visible_face(), Some("definition 0"));

        deck.next();
        assert!(!deck.is_flipped());
        assert_eq!(deck.visible_face(), Some("term 1"));

        deck.flip();
        deck.previous();
        assert!(!deck.is_flipped());
    }

    #[test]
    fn test_position_label() {
        let mut deck = deck(5);
        assert_eq!(deck.position_label().as_deref(), Some("Card 1 of 5"));
        deck.previous();
        assert_eq!(deck.position_label().as_deref(), Some("Card 5 of 5"));
    }

    #[test]
    fn test_empty_deck() {
        let mut deck = deck(0);
        deck.next();
        deck.previous();
        deck.flip();
        assert!(deck.current().is_none());
        assert!(deck.position_label().is_none());
        assert!(!deck.is_flipped());
    }
}
