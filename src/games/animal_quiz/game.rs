use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::{Delay, GameRng, Phase, Player, PlayerMap, Rejection};
use crate::rules::{Cue, GameResult, Minigame, Step, Transition};

use super::questions::{Question, QUESTIONS};

/// Answer the current question: `true` for O, `false` for X.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Answer(pub bool);

impl FromStr for Answer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "o" | "true" | "yes" | "y" => Ok(Answer(true)),
            "x" | "false" | "no" | "n" => Ok(Answer(false)),
            other => Err(format!("expected O or X, got {other:?}")),
        }
    }
}

/// What happened on the last answer, kept while the game is resolving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFeedback")]
pub struct Feedback {
    question: usize,
    given: bool,
}

#[derive(Deserialize)]
struct RawFeedback {
    question: usize,
    given: bool,
}

impl TryFrom<RawFeedback> for Feedback {
    type Error = String;

    fn try_from(raw: RawFeedback) -> Result<Self, Self::Error> {
        if raw.question >= QUESTIONS.len() {
            return Err(format!("question {} is not in the pool", raw.question));
        }
        Ok(Feedback { question: raw.question, given: raw.given })
    }
}

impl Feedback {
    #[must_use]
    pub fn correct(&self) -> bool {
        self.given == self.question().answer
    }

    /// The answer that was expected.
    #[must_use]
    pub fn expected(&self) -> bool {
        self.question().answer
    }

    #[must_use]
    pub fn explanation(&self) -> &'static str {
        self.question().explanation
    }

    #[must_use]
    pub fn question(&self) -> &'static Question {
        &QUESTIONS[self.question]
    }
}

/// Players alternate answering true/false questions. A tie after the
/// regular round earns one sudden-death question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalQuiz {
    /// Indices into `QUESTIONS`, in asking order.
    questions: Vec<usize>,
    /// Unused questions, drawn from the back for sudden death.
    reserve: Vec<usize>,
    index: usize,
    scores: PlayerMap<u32>,
    current: Player,
    phase: Phase,
    sudden_death: bool,
    feedback: Option<Feedback>,
    result: Option<GameResult>,
}

/// Builder for creating an `AnimalQuiz` game.
pub struct AnimalQuizBuilder {
    rounds: usize,
}

impl Default for AnimalQuizBuilder {
    fn default() -> Self {
        Self { rounds: 10 }
    }
}

impl AnimalQuizBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Questions in the regular round.
    pub fn rounds(mut self, rounds: usize) -> Self {
        assert!(
            (1..=QUESTIONS.len()).contains(&rounds),
            "Rounds must be between 1 and the pool size"
        );
        self.rounds = rounds;
        self
    }

    /// Draw the round's questions without replacement.
    pub fn build(self, seed: u64) -> AnimalQuiz {
        let mut rng = GameRng::new(seed);
        let mut order: Vec<usize> = (0..QUESTIONS.len()).collect();
        rng.shuffle(&mut order);
        let reserve = order.split_off(self.rounds);
        AnimalQuiz::with_questions(order, reserve)
    }
}

impl AnimalQuiz {
    /// Quiz with a fixed question order and sudden-death reserve.
    ///
    /// Indices outside the pool and repeats are dropped, so the reserve
    /// never holds a question from the round.
    ///
    /// # Panics
    ///
    /// Panics if no question from the pool is left for the round.
    pub fn with_questions(questions: Vec<usize>, reserve: Vec<usize>) -> Self {
        let mut seen = FxHashSet::default();
        let mut fresh = |i: &usize| *i < QUESTIONS.len() && seen.insert(*i);
        let questions: Vec<usize> = questions.into_iter().filter(&mut fresh).collect();
        let reserve: Vec<usize> = reserve.into_iter().filter(&mut fresh).collect();
        assert!(!questions.is_empty(), "Quiz needs at least one question");
        Self {
            questions,
            reserve,
            index: 0,
            scores: PlayerMap::with_value(0),
            current: Player::Celeste,
            phase: Phase::AwaitingInput,
            sudden_death: false,
            feedback: None,
            result: None,
        }
    }

    /// The question being asked, if any.
    #[must_use]
    pub fn question(&self) -> Option<&'static Question> {
        self.questions.get(self.index).and_then(|&i| QUESTIONS.get(i))
    }

    /// One-based round number and total rounds.
    #[must_use]
    pub fn round(&self) -> (usize, usize) {
        ((self.index + 1).min(self.questions.len()), self.questions.len())
    }

    #[must_use]
    pub fn is_sudden_death(&self) -> bool {
        self.sudden_death
    }

    /// Feedback for the answer being shown.
    #[must_use]
    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    fn finish(&mut self) -> Transition {
        let result = GameResult::by_score(self.scores[Player::Celeste], self.scores[Player::Sally]);
        self.phase = Phase::GameOver;
        self.result = Some(result);
        Transition::finished(result)
    }
}

impl Minigame for AnimalQuiz {
    type Action = Answer;

    fn title(&self) -> &'static str {
        "animal quiz"
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn current_player(&self) -> Player {
        self.current
    }

    fn scores(&self) -> PlayerMap<i64> {
        self.scores.map(|_, &s| i64::from(s))
    }

    fn apply(&mut self, &Answer(given): &Answer) -> Result<Transition, Rejection> {
        self.phase.check_input()?;
        let question = self
            .questions
            .get(self.index)
            .copied()
            .filter(|&i| i < QUESTIONS.len())
            .ok_or(Rejection::NothingPending)?;

        let feedback = Feedback { question, given };
        let cue = if feedback.correct() {
            self.scores[self.current] += 1;
            Cue::Reward
        } else {
            Cue::Penalty
        };
        self.feedback = Some(feedback);
        self.phase = Phase::Resolving;
        Ok(Transition::new(Step::Deferred(Delay::AnswerFeedback)).with_cue(cue))
    }

    fn resolve(&mut self) -> Result<Transition, Rejection> {
        self.phase.check_resolve()?;

        // Without feedback the pause was the sudden-death intro.
        if self.feedback.take().is_none() {
            self.phase = Phase::AwaitingInput;
            return Ok(Transition::new(Step::Continue));
        }

        self.index += 1;
        if !self.sudden_death {
            self.current = self.current.other();
        }

        if self.index < self.questions.len() {
            self.phase = Phase::AwaitingInput;
            return Ok(Transition::new(Step::Continue));
        }

        let tied = self.scores[Player::Celeste] == self.scores[Player::Sally];
        if tied && !self.sudden_death {
            if let Some(extra) = self.reserve.pop() {
                log::info!("animal quiz: tied at {}, sudden death", self.scores[Player::Celeste]);
                self.sudden_death = true;
                self.questions.push(extra);
                return Ok(Transition::new(Step::Deferred(Delay::SuddenDeathIntro)));
            }
        }

        Ok(self.finish())
    }

    fn result(&self) -> Option<GameResult> {
        self.result
    }
}

impl fmt::Display for AnimalQuiz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sudden_death {
            writeln!(f, "SUDDEN DEATH")?;
        } else {
            let (round, total) = self.round();
            writeln!(f, "Question {round}/{total}")?;
        }
        if let Some(question) = self.question() {
            writeln!(f, "{} {} (O/X)", question.emoji, question.text)?;
        }
        if let Some(feedback) = self.feedback {
            if feedback.correct() {
                writeln!(f, "Correct!")?;
            } else {
                let expected = if feedback.expected() { "O" } else { "X" };
                writeln!(f, "Not quite, the answer is {expected}. {}", feedback.explanation())?;
            }
        }
        writeln!(
            f,
            "Celeste {} / Sally {}",
            self.scores[Player::Celeste],
            self.scores[Player::Sally]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_index(i: usize) -> bool {
        QUESTIONS[i].answer
    }

    /// Answer the current question correctly or not, then resolve.
    fn play(game: &mut AnimalQuiz, correct: bool) -> Transition {
        let expected = game.question().unwrap().answer;
        game.apply(&Answer(if correct { expected } else { !expected })).unwrap();
        game.resolve().unwrap()
    }

    #[test]
    fn test_build_draws_distinct_questions() {
        let game = AnimalQuizBuilder::new().build(11);
        let mut all = game.questions.clone();
        all.extend(&game.reserve);
        all.sort_unstable();

        assert_eq!(game.questions.len(), 10);
        assert_eq!(all, (0..QUESTIONS.len()).collect::<Vec<_>>());
        assert_eq!(game.round(), (1, 10));
        assert_eq!(game.scores(), PlayerMap::with_value(0));
    }

    #[test]
    fn test_correct_answer_scores() {
        let mut game = AnimalQuiz::with_questions(vec![0, 1], vec![]);

        let transition = game.apply(&Answer(answer_index(0))).unwrap();
        assert_eq!(transition.step, Step::Deferred(Delay::AnswerFeedback));
        assert_eq!(transition.cues.as_slice(), &[Cue::Reward]);
        assert_eq!(game.scores()[Player::Celeste], 1);
        assert!(game.feedback().unwrap().correct());

        assert_eq!(game.apply(&Answer(true)), Err(Rejection::Locked));

        game.resolve().unwrap();
        assert_eq!(game.current_player(), Player::Sally);
        assert_eq!(game.feedback(), None);
    }

    #[test]
    fn test_wrong_answer_feedback() {
        // Question 0 is false with an explanation.
        let mut game = AnimalQuiz::with_questions(vec![0], vec![]);
        let transition = game.apply(&Answer(true)).unwrap();

        assert_eq!(transition.cues.as_slice(), &[Cue::Penalty]);
        let feedback = game.feedback().unwrap();
        assert!(!feedback.correct());
        assert!(!feedback.expected());
        assert_eq!(feedback.explanation(), "It is a mammal.");
        assert_eq!(game.scores()[Player::Celeste], 0);
    }

    #[test]
    fn test_higher_score_wins() {
        let mut game = AnimalQuiz::with_questions(vec![0, 1], vec![2]);
        play(&mut game, true);
        let end = play(&mut game, false);

        assert_eq!(end.step, Step::Finished(GameResult::Winner(Player::Celeste)));
        assert!(!game.is_sudden_death());
    }

    #[test]
    fn test_tie_goes_to_sudden_death() {
        let mut game = AnimalQuiz::with_questions(vec![0, 1], vec![5]);
        play(&mut game, true);
        let intro = play(&mut game, true);

        assert_eq!(intro.step, Step::Deferred(Delay::SuddenDeathIntro));
        assert!(game.is_sudden_death());
        assert_eq!(game.apply(&Answer(true)), Err(Rejection::Locked));

        assert_eq!(game.resolve().unwrap().step, Step::Continue);
        assert_eq!(game.question(), Some(&QUESTIONS[5]));
        assert_eq!(game.current_player(), Player::Celeste);

        let end = play(&mut game, true);
        assert_eq!(end.step, Step::Finished(GameResult::Winner(Player::Celeste)));
    }

    #[test]
    fn test_sudden_death_only_once() {
        let mut game = AnimalQuiz::with_questions(vec![0, 1], vec![5, 6]);
        play(&mut game, false);
        play(&mut game, false);
        game.resolve().unwrap();

        let end = play(&mut game, false);
        assert_eq!(end.step, Step::Finished(GameResult::Draw));
        assert_eq!(game.questions.len(), 3);
    }

    #[test]
    fn test_tie_without_reserve_is_draw() {
        let mut game = AnimalQuiz::with_questions(vec![0, 1], vec![]);
        play(&mut game, true);
        let end = play(&mut game, true);

        assert_eq!(end.step, Step::Finished(GameResult::Draw));
        assert_eq!(game.apply(&Answer(true)), Err(Rejection::GameOver));
    }

    #[test]
    fn test_reserve_skips_questions_in_the_round() {
        let game = AnimalQuiz::with_questions(vec![1, 2, 2, 99], vec![1, 3, 3, 2]);
        assert_eq!(game.questions, vec![1, 2]);
        assert_eq!(game.reserve, vec![3]);
    }

    #[test]
    fn test_sudden_death_asks_a_new_question() {
        let mut game = AnimalQuiz::with_questions(vec![1, 2], vec![4, 1]);
        play(&mut game, true);
        play(&mut game, true);
        game.resolve().unwrap();

        assert!(game.is_sudden_death());
        assert_eq!(game.question(), Some(&QUESTIONS[4]));
    }

    #[test]
    fn test_tie_with_only_used_reserve_is_draw() {
        let mut game = AnimalQuiz::with_questions(vec![1, 2], vec![1]);
        play(&mut game, true);
        let end = play(&mut game, true);

        assert_eq!(end.step, Step::Finished(GameResult::Draw));
        assert!(!game.is_sudden_death());
    }

    #[test]
    #[should_panic(expected = "Quiz needs at least one question")]
    fn test_empty_quiz_is_refused() {
        AnimalQuiz::with_questions(vec![], vec![0]);
    }

    #[test]
    #[should_panic(expected = "Quiz needs at least one question")]
    fn test_quiz_outside_pool_is_refused() {
        AnimalQuiz::with_questions(vec![QUESTIONS.len()], vec![]);
    }

    #[test]
    fn test_feedback_outside_pool_fails_to_load() {
        let json = format!(r#"{{"question":{},"given":true}}"#, QUESTIONS.len());
        assert!(serde_json::from_str::<Feedback>(&json).is_err());

        let feedback: Feedback = serde_json::from_str(r#"{"question":0,"given":true}"#).unwrap();
        assert!(!feedback.correct());
    }

    #[test]
    fn test_parse_answer() {
        assert_eq!("O".parse::<Answer>(), Ok(Answer(true)));
        assert_eq!(" x ".parse::<Answer>(), Ok(Answer(false)));
        assert!("maybe".parse::<Answer>().is_err());
    }
}
