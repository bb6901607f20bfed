//! Game state and outcome messages as Discord-flavoured text.

use gallows_game::{GuessOutcome, Render, registry::GuessReport, session::Status};

/// Characters Discord treats as markdown; a masked word full of
/// underscores would otherwise render as italics.
const MARKDOWN_SPECIALS: &[char] = &['\\', '*', '_', '~', '`', '|', '>', '#'];

/// Backslash-escape markdown control characters.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if MARKDOWN_SPECIALS.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// The immediate `/play` response the game thread hangs off.
pub fn start_message(display_name: &str) -> String {
    format!("Starting game of {display_name} hangman")
}

pub fn thread_name(display_name: &str) -> String {
    format!("Hangman ({display_name} mode)")
}

/// The first board shown after a game starts.
pub fn opening(render: &Render) -> String {
    format!(
        "{}\nYou have {} lives.",
        escape_markdown(&render.masked_word),
        render.lives_remaining
    )
}

/// One entry of the `/gamemodes` listing.
pub fn gamemode_line(name: &str, display_name: &str, description: &str) -> String {
    format!("`{name}` {display_name}: {description}")
}

/// The reply to a processed guess: what the guess did, the board, and
/// the end-of-game banner when the guess finished the game.
pub fn guess_reply(report: &GuessReport) -> String {
    let mut lines = Vec::new();
    match &report.outcome {
        GuessOutcome::AlreadyGuessed(letter) => {
            lines.push(format!(
                "You have already guessed '{}', try another letter.",
                letter.to_uppercase()
            ));
        },
        GuessOutcome::Hit(letter) => {
            lines.push(format!(
                "The letter '{}' is in the word!",
                letter.to_uppercase()
            ));
        },
        GuessOutcome::Miss(letter) => {
            lines.push(format!(
                "The letter '{}' is not in the word",
                letter.to_uppercase()
            ));
        },
        GuessOutcome::WrongWord(word) => {
            lines.push(format!("The word is not '{}'!", word.to_uppercase()));
        },
        GuessOutcome::Won | GuessOutcome::Lost => {},
    }

    lines.push(format!(
        "{}\nYou have {} lives remaining.",
        escape_markdown(&report.render.masked_word),
        report.render.lives_remaining
    ));

    let revealed = report.render.revealed.as_deref().unwrap_or_default();
    match report.render.status {
        Status::Won => {
            lines.push(format!(
                "You WON in {} guesses! The word was: {}",
                report.render.guess_count,
                revealed.to_uppercase()
            ));
        },
        Status::Lost => {
            lines.push(format!("You LOST! The word was: {}", revealed.to_uppercase()));
        },
        Status::InProgress => {},
    }
    lines.join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use {
        super::*,
        gallows_game::{ChatContext, GameSession, Guess, GuesserPolicy, PlayerId},
    };

    const OWNER: PlayerId = PlayerId(1);

    fn report(session: &mut GameSession, input: &str) -> GuessReport {
        let guess = Guess::parse(input).unwrap();
        let outcome = session.guess(OWNER, &guess).unwrap();
        GuessReport {
            outcome,
            render: session.render(),
        }
    }

    fn session(word: &str, lives: u32) -> GameSession {
        GameSession::new(word, lives, OWNER, GuesserPolicy::Private, ChatContext(1))
    }

    #[test]
    fn escapes_markdown_specials() {
        assert_eq!(escape_markdown("_ a _"), "\\_ a \\_");
        assert_eq!(escape_markdown("a*b|c"), "a\\*b\\|c");
        assert_eq!(escape_markdown("plain"), "plain");
    }

    #[test]
    fn opening_masks_and_escapes() {
        let text = opening(&session("cat", 8).render());
        assert_eq!(text, "\\_ \\_ \\_\nYou have 8 lives.");
    }

    #[test]
    fn hit_reply_shows_letter_and_board() {
        let mut s = session("cat", 8);
        let text = guess_reply(&report(&mut s, "a"));
        assert!(text.starts_with("The letter 'A' is in the word!"));
        assert!(text.contains("\\_ a \\_"));
        assert!(text.contains("You have 8 lives remaining."));
    }

    #[test]
    fn miss_reply_counts_down_lives() {
        let mut s = session("cat", 8);
        let text = guess_reply(&report(&mut s, "z"));
        assert!(text.starts_with("The letter 'Z' is not in the word"));
        assert!(text.contains("You have 7 lives remaining."));
    }

    #[test]
    fn repeat_reply_asks_for_another_letter() {
        let mut s = session("cat", 8);
        report(&mut s, "a");
        let text = guess_reply(&report(&mut s, "a"));
        assert!(text.starts_with("You have already guessed 'A', try another letter."));
    }

    #[test]
    fn wrong_word_reply_names_the_guess() {
        let mut s = session("cat", 8);
        let text = guess_reply(&report(&mut s, "dog"));
        assert!(text.starts_with("The word is not 'DOG'!"));
    }

    #[test]
    fn win_banner_counts_guesses_and_reveals() {
        let mut s = session("cat", 8);
        report(&mut s, "c");
        report(&mut s, "a");
        let text = guess_reply(&report(&mut s, "t"));
        assert!(text.contains("You WON in 3 guesses! The word was: CAT"));
        assert!(text.contains("c a t"));
    }

    #[test]
    fn loss_banner_reveals_the_word() {
        let mut s = session("cat", 1);
        let text = guess_reply(&report(&mut s, "z"));
        assert!(text.contains("You LOST! The word was: CAT"));
        assert!(text.contains("You have 0 lives remaining."));
    }
}
