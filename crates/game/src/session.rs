//! The hangman game-session state machine.
//!
//! A session is bound to one chat context (channel or thread) and moves
//! from `InProgress` to one of the terminal states `Won` or `Lost` purely
//! through [`GameSession::guess`]. Everything here is synchronous and
//! side-effect free; delivery of the results is the adapter's business.

use crate::{Error, Result};

/// The channel or thread a game is bound to; the unit of session
/// uniqueness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChatContext(pub u64);

/// Gateway-agnostic user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerId(pub u64);

/// Who may submit guesses for a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GuesserPolicy {
    /// Only the player who started the game.
    #[default]
    Private,
    /// Anyone in the channel.
    Public,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Won,
    Lost,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::InProgress)
    }
}

/// A validated guess: a single letter or a full-word attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guess {
    Letter(char),
    Word(String),
}

impl Guess {
    /// Trim, lowercase and validate raw input.
    ///
    /// Empty input and anything containing a non-letter is rejected here,
    /// before it can touch game state.
    pub fn parse(input: &str) -> Result<Self> {
        let cleaned = input.trim().to_lowercase();
        if cleaned.is_empty() || !cleaned.chars().all(char::is_alphabetic) {
            return Err(Error::InvalidGuess(input.trim().to_string()));
        }
        let mut chars = cleaned.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Ok(Guess::Letter(letter)),
            _ => Ok(Guess::Word(cleaned)),
        }
    }
}

/// What a single accepted guess did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The letter was guessed before. Accepted, but changes nothing and
    /// never costs a life.
    AlreadyGuessed(char),
    /// The letter is in the word.
    Hit(char),
    /// The letter is not in the word; one life lost.
    Miss(char),
    /// A full-word attempt that was not the word; one life lost.
    WrongWord(String),
    /// The guess completed the word (or matched it outright).
    Won,
    /// The guess spent the last life.
    Lost,
}

/// One active hangman game.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) secret_word: String,
    /// Guessed letters in guess order; grows monotonically.
    pub(crate) guessed: Vec<char>,
    /// Accepted guesses so far. Repeats are not counted; they never
    /// changed anything.
    pub(crate) guess_count: u32,
    pub(crate) lives_remaining: u32,
    pub(crate) lives_total: u32,
    pub(crate) status: Status,
    owner: PlayerId,
    policy: GuesserPolicy,
    context: ChatContext,
}

impl GameSession {
    /// Create a fresh session around a secret word. The word is
    /// case-normalized so all comparisons happen in lowercase.
    pub fn new(
        secret_word: &str,
        lives: u32,
        owner: PlayerId,
        policy: GuesserPolicy,
        context: ChatContext,
    ) -> Self {
        Self {
            secret_word: secret_word.to_lowercase(),
            guessed: Vec::new(),
            guess_count: 0,
            lives_remaining: lives,
            lives_total: lives,
            status: Status::InProgress,
            owner,
            policy,
            context,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn context(&self) -> ChatContext {
        self.context
    }

    pub fn lives_remaining(&self) -> u32 {
        self.lives_remaining
    }

    pub fn guessed(&self) -> &[char] {
        &self.guessed
    }

    pub fn guess_count(&self) -> u32 {
        self.guess_count
    }

    /// Apply one guess.
    ///
    /// Fails without any state change when the session is already over,
    /// when a `Private` session receives a guess from someone other than
    /// its owner, or (upstream, in [`Guess::parse`]) when the input is not
    /// alphabetic.
    pub fn guess(&mut self, guesser: PlayerId, guess: &Guess) -> Result<GuessOutcome> {
        if self.status.is_terminal() {
            return Err(Error::NoActiveGame);
        }
        if self.policy == GuesserPolicy::Private && guesser != self.owner {
            return Err(Error::NotAuthorized);
        }
        match guess {
            Guess::Letter(letter) => Ok(self.guess_letter(*letter)),
            Guess::Word(word) => Ok(self.guess_word(word)),
        }
    }

    fn guess_letter(&mut self, letter: char) -> GuessOutcome {
        if self.guessed.contains(&letter) {
            return GuessOutcome::AlreadyGuessed(letter);
        }
        self.guess_count += 1;
        self.guessed.push(letter);
        if self.secret_word.contains(letter) {
            if self.is_fully_guessed() {
                self.status = Status::Won;
                GuessOutcome::Won
            } else {
                GuessOutcome::Hit(letter)
            }
        } else {
            self.lose_life(GuessOutcome::Miss(letter))
        }
    }

    fn guess_word(&mut self, word: &str) -> GuessOutcome {
        self.guess_count += 1;
        // Both sides are lowercase, so this is a case-insensitive match.
        if word == self.secret_word {
            self.status = Status::Won;
            GuessOutcome::Won
        } else {
            // A full-word miss costs exactly one life, the same as a wrong
            // letter. It is not an instant loss.
            self.lose_life(GuessOutcome::WrongWord(word.to_string()))
        }
    }

    fn lose_life(&mut self, otherwise: GuessOutcome) -> GuessOutcome {
        self.lives_remaining = self.lives_remaining.saturating_sub(1);
        if self.lives_remaining == 0 {
            self.status = Status::Lost;
            GuessOutcome::Lost
        } else {
            otherwise
        }
    }

    fn is_fully_guessed(&self) -> bool {
        self.secret_word
            .chars()
            .all(|letter| self.guessed.contains(&letter))
    }
}
