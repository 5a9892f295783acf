//! Verb quiz that powers up the hero
//!
//! The quiz is a collaborator of the simulation, not part of it: a correct
//! answer is reported to [`GameSession::on_correct_answer`] and nothing else
//! crosses the boundary.
//!
//! [`GameSession::on_correct_answer`]: crate::sim::GameSession::on_correct_answer

use std::str::FromStr;

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, ParseIdError, SelectionError};

/// One conjugation prompt as stored in the verb list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbRecord {
    /// Infinitive shown to the player
    pub verb: String,
    pub tense: String,
    pub pronoun: String,
    /// Expected conjugated form
    pub answer: String,
    pub regular: bool,
}

/// Parse the verb list (a JSON array of records)
pub fn parse_verbs(json: &str) -> Result<Vec<VerbRecord>, GameError> {
    let verbs: Vec<VerbRecord> = serde_json::from_str(json).map_err(GameError::VerbData)?;
    log::info!("Loaded {} verb records", verbs.len());
    Ok(verbs)
}

/// Which verbs a deck draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerbType {
    #[serde(rename = "regular")]
    Regular,
    #[default]
    #[serde(rename = "regular-irregular")]
    RegularAndIrregular,
}

impl VerbType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerbType::Regular => "regular",
            VerbType::RegularAndIrregular => "regular-irregular",
        }
    }

    fn accepts(&self, record: &VerbRecord) -> bool {
        match self {
            VerbType::Regular => record.regular,
            VerbType::RegularAndIrregular => true,
        }
    }
}

impl FromStr for VerbType {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regular" => Ok(VerbType::Regular),
            "regular-irregular" | "all" => Ok(VerbType::RegularAndIrregular),
            _ => Err(ParseIdError {
                kind: "verb type",
                value: s.to_string(),
            }),
        }
    }
}

/// Player's choice on the selection screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbSelection {
    pub tense: String,
    pub verb_type: VerbType,
}

impl VerbSelection {
    pub fn new(tense: impl Into<String>, verb_type: VerbType) -> Self {
        Self {
            tense: tense.into(),
            verb_type,
        }
    }

    pub fn matches(&self, record: &VerbRecord) -> bool {
        record.tense == self.tense && self.verb_type.accepts(record)
    }
}

/// A question on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub verb: String,
    pub tense: String,
    pub pronoun: String,
    answer: String,
}

/// Result of checking a typed answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerResult {
    Correct,
    Incorrect,
}

impl AnswerResult {
    pub fn is_correct(&self) -> bool {
        matches!(self, AnswerResult::Correct)
    }

    /// Feedback line shown under the answer box
    pub fn message(&self) -> &'static str {
        match self {
            AnswerResult::Correct => "¡CORRECTO! +1 Poder de Ataque",
            AnswerResult::Incorrect => "Incorrecto. Inténtalo de nuevo.",
        }
    }
}

impl Question {
    /// Expected answer (used by the scripted native player)
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Compare the typed input, ignoring surrounding whitespace and case
    pub fn check(&self, input: &str) -> AnswerResult {
        if input.trim().to_lowercase() == self.answer.trim().to_lowercase() {
            AnswerResult::Correct
        } else {
            AnswerResult::Incorrect
        }
    }
}

impl From<&VerbRecord> for Question {
    fn from(record: &VerbRecord) -> Self {
        Self {
            verb: record.verb.clone(),
            tense: record.tense.clone(),
            pronoun: record.pronoun.clone(),
            answer: record.answer.clone(),
        }
    }
}

/// Records matching one selection; never empty
#[derive(Debug, Clone)]
pub struct QuizDeck {
    records: Vec<VerbRecord>,
}

impl QuizDeck {
    pub fn from_selection(
        verbs: &[VerbRecord],
        selection: &VerbSelection,
    ) -> Result<Self, SelectionError> {
        let records: Vec<VerbRecord> = verbs
            .iter()
            .filter(|v| selection.matches(v))
            .cloned()
            .collect();
        if records.is_empty() {
            return Err(SelectionError::NoMatchingVerbs {
                tense: selection.tense.clone(),
            });
        }
        log::debug!(
            "Deck for {} ({}): {} records",
            selection.tense,
            selection.verb_type.as_str(),
            records.len()
        );
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Uniformly random question (repeats allowed)
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Question {
        // Deck is non-empty by construction
        let record = self.records.choose(rng).unwrap_or(&self.records[0]);
        Question::from(record)
    }
}

/// Deck plus the question currently shown
#[derive(Debug, Clone)]
pub struct QuizGate {
    deck: QuizDeck,
    rng: Pcg32,
    current: Question,
}

impl QuizGate {
    pub fn new(deck: QuizDeck, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let current = deck.draw(&mut rng);
        Self { deck, rng, current }
    }

    pub fn current(&self) -> &Question {
        &self.current
    }

    /// Check an answer; a correct one moves on to the next question
    pub fn submit(&mut self, input: &str) -> AnswerResult {
        let result = self.current.check(input);
        if result.is_correct() {
            self.current = self.deck.draw(&mut self.rng);
        }
        result
    }
}
