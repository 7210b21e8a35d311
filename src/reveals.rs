// Which hidden answer has been turned over for each game question.

use strum::{EnumCount, EnumIter};

/// Number of answer cards under every question.
pub const OPTIONS_PER_QUESTION: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum Question {
    Date,
    Wear,
    Food,
    Photos,
    Music,
    Time,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealMap {
    revealed: [Option<usize>; Question::COUNT],
}

impl RevealMap {
    pub fn get(&self, question: Question) -> Option<usize> {
        self.revealed[question as usize]
    }

    /// First reveal wins. Returns true only when the entry was newly set.
    pub fn reveal(&mut self, question: Question, option: usize) -> bool {
        if option >= OPTIONS_PER_QUESTION {
            return false;
        }
        let slot = &mut self.revealed[question as usize];
        if slot.is_some() {
            return false;
        }
        *slot = Some(option);
        true
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|r| r.is_some()).count()
    }

    pub fn all_revealed(&self) -> bool {
        self.revealed.iter().all(Option::is_some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn first_reveal_wins() {
        let mut map = RevealMap::default();
        assert!(map.reveal(Question::Food, 2));
        assert!(!map.reveal(Question::Food, 0));
        assert!(!map.reveal(Question::Food, 2));
        assert_eq!(map.get(Question::Food), Some(2));
        assert_eq!(map.get(Question::Date), None);
    }

    #[test]
    fn out_of_range_option_is_ignored() {
        let mut map = RevealMap::default();
        assert!(!map.reveal(Question::Time, OPTIONS_PER_QUESTION));
        assert_eq!(map.get(Question::Time), None);
    }

    #[test]
    fn all_revealed_needs_every_question() {
        let mut map = RevealMap::default();
        let questions: Vec<_> = Question::iter().collect();
        let (last, rest) = questions.split_last().unwrap();

        for (i, question) in rest.iter().enumerate() {
            map.reveal(*question, i % OPTIONS_PER_QUESTION);
            assert!(!map.all_revealed());
        }
        assert_eq!(map.revealed_count(), Question::COUNT - 1);

        map.reveal(*last, 1);
        assert!(map.all_revealed());
    }
}
