//! Sunscreen quiz content and progress

/// One multiple-choice question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub prompt: &'static str,
    pub choices: &'static [&'static str],
    pub answer: usize,
    pub explanation: &'static str,
}

pub const QUESTIONS: &[Question] = &[
    Question {
        prompt: "At what UV index should you start protecting your skin?",
        choices: &["1", "3", "6", "8"],
        answer: 1,
        explanation: "From UV 3 (moderate) up, sun protection is recommended.",
    },
    Question {
        prompt: "How often should sunscreen be reapplied outdoors?",
        choices: &[
            "Once a day",
            "Every 2 hours",
            "Every 5 hours",
            "Only after swimming",
        ],
        answer: 1,
        explanation: "Reapply at least every two hours, and after swimming or sweating.",
    },
    Question {
        prompt: "What does SPF measure?",
        choices: &[
            "Protection against UVA",
            "Water resistance",
            "Protection against UVB",
            "Skin hydration",
        ],
        answer: 2,
        explanation: "SPF rates UVB protection; look for 'broad spectrum' for UVA.",
    },
    Question {
        prompt: "Can you get sunburnt on a cloudy day?",
        choices: &[
            "No, clouds block UV",
            "Yes, most UV passes through clouds",
            "Only in summer",
            "Only above 30°C",
        ],
        answer: 1,
        explanation: "Up to 80% of UV radiation passes through light cloud cover.",
    },
    Question {
        prompt: "How much sunscreen covers an adult's body?",
        choices: &[
            "A pea-sized drop",
            "One teaspoon",
            "About a shot glass (30 ml)",
            "Half a bottle",
        ],
        answer: 2,
        explanation: "Around 30 ml, roughly a shot glass, for full-body coverage.",
    },
];

/// Result of answering the current question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect { correct: usize },
}

/// Where the player is in the quiz
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizState {
    questions: &'static [Question],
    index: usize,
    selected: usize,
    answered: Option<AnswerOutcome>,
    score: usize,
}

impl QuizState {
    pub fn new() -> Self {
        Self::with_questions(QUESTIONS)
    }

    pub fn with_questions(questions: &'static [Question]) -> Self {
        Self {
            questions,
            index: 0,
            selected: 0,
            answered: None,
            score: 0,
        }
    }

    /// The question being shown, or `None` once the quiz is over
    pub fn current(&self) -> Option<&'static Question> {
        self.questions.get(self.index)
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.questions.len()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn answered(&self) -> Option<AnswerOutcome> {
        self.answered
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// 1-based position and total, for "Question 2/5"
    pub fn progress(&self) -> (usize, usize) {
        ((self.index + 1).min(self.questions.len()), self.questions.len())
    }

    pub fn select_next(&mut self) {
        if let Some(q) = self.current() {
            if self.answered.is_none() {
                self.selected = (self.selected + 1) % q.choices.len();
            }
        }
    }

    pub fn select_previous(&mut self) {
        if let Some(q) = self.current() {
            if self.answered.is_none() {
                let len = q.choices.len();
                self.selected = (self.selected + len - 1) % len;
            }
        }
    }

    /// Pick a choice directly; out-of-range choices are ignored
    pub fn choose(&mut self, choice: usize) -> Option<AnswerOutcome> {
        let len = self.current()?.choices.len();
        if choice >= len || self.answered.is_some() {
            return None;
        }
        self.selected = choice;
        self.submit()
    }

    /// Lock in the selected choice
    pub fn submit(&mut self) -> Option<AnswerOutcome> {
        if self.answered.is_some() {
            return None;
        }
        let question = self.current()?;
        let outcome = if self.selected == question.answer {
            self.score += 1;
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Incorrect {
                correct: question.answer,
            }
        };
        self.answered = Some(outcome);
        Some(outcome)
    }

    /// Move on after an answer has been given
    pub fn advance(&mut self) {
        if self.answered.is_some() {
            self.index += 1;
            self.selected = 0;
            self.answered = None;
        }
    }

    pub fn restart(&mut self) {
        *self = Self::with_questions(self.questions);
    }
}

impl Default for QuizState {
    fn default() -> Self {
        Self::new()
    }
}
