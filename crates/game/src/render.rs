//! Pure rendering of session state into a display snapshot.

use crate::session::{GameSession, Status};

/// Everything a chat message needs to show about a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Render {
    /// The secret word with unguessed letters masked, space-separated,
    /// e.g. `c _ t`. Fully revealed once the game is over.
    pub masked_word: String,
    /// Guessed letters in guess order.
    pub guessed: Vec<char>,
    /// Accepted guesses so far, repeats excluded.
    pub guess_count: u32,
    pub lives_remaining: u32,
    pub lives_total: u32,
    pub status: Status,
    /// The full secret word, present only in a terminal state.
    pub revealed: Option<String>,
}

impl GameSession {
    /// Produce a display snapshot. Never mutates the session.
    pub fn render(&self) -> Render {
        let over = self.status.is_terminal();
        let masked_word = self
            .secret_word
            .chars()
            .map(|letter| {
                if over || self.guessed.contains(&letter) {
                    letter
                } else {
                    '_'
                }
            })
            .map(String::from)
            .collect::<Vec<_>>()
            .join(" ");

        Render {
            masked_word,
            guessed: self.guessed.clone(),
            guess_count: self.guess_count,
            lives_remaining: self.lives_remaining,
            lives_total: self.lives_total,
            status: self.status,
            revealed: over.then(|| self.secret_word.clone()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::session::{ChatContext, Guess, GuesserPolicy, PlayerId};

    const OWNER: PlayerId = PlayerId(1);

    fn session(word: &str) -> GameSession {
        GameSession::new(word, 5, OWNER, GuesserPolicy::Private, ChatContext(1))
    }

    #[test]
    fn fresh_session_is_fully_masked() {
        let render = session("cat").render();
        assert_eq!(render.masked_word, "_ _ _");
        assert!(render.guessed.is_empty());
        assert_eq!(render.lives_remaining, 5);
        assert_eq!(render.lives_total, 5);
        assert!(render.revealed.is_none());
    }

    #[test]
    fn guessed_letters_are_revealed_everywhere() {
        let mut s = session("banana");
        s.guess(OWNER, &Guess::Letter('a')).unwrap();
        assert_eq!(s.render().masked_word, "_ a _ a _ a");
    }

    #[test]
    fn guessed_list_preserves_guess_order() {
        let mut s = session("cat");
        for letter in ['t', 'a', 'x'] {
            s.guess(OWNER, &Guess::Letter(letter)).unwrap();
        }
        assert_eq!(s.render().guessed, vec!['t', 'a', 'x']);
    }

    #[test]
    fn terminal_render_reveals_the_word() {
        let mut s = session("cat");
        s.guess(OWNER, &Guess::Word("cat".into())).unwrap();
        let render = s.render();
        assert_eq!(render.masked_word, "c a t");
        assert_eq!(render.revealed.as_deref(), Some("cat"));
        assert_eq!(render.status, Status::Won);
    }

    #[test]
    fn render_does_not_mutate() {
        let s = session("cat");
        let first = s.render();
        let second = s.render();
        assert_eq!(first, second);
    }
}
