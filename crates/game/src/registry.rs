//! The process-wide session registry.
//!
//! Maps each chat context to at most one active session. The registry is
//! an explicit, injectable object rather than a global so tests can run
//! isolated instances. Cross-context operations never contend with each
//! other; operations on one context are serialized by that session's
//! mutex.

use std::sync::Arc;

use {
    dashmap::{DashMap, mapref::entry::Entry},
    tokio::sync::Mutex,
    tracing::{debug, info},
};

use crate::{
    Error, Result,
    render::Render,
    session::{ChatContext, GameSession, Guess, GuessOutcome, GuesserPolicy, PlayerId},
    words::WordSource,
};

/// Per-session settings copied out of a gamemode config at start time.
/// Later config reloads never touch a running session.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub lives: u32,
    pub policy: GuesserPolicy,
}

/// The result of one processed guess: what happened, plus the state to
/// show afterwards.
#[derive(Debug, Clone)]
pub struct GuessReport {
    pub outcome: GuessOutcome,
    pub render: Render,
}

#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<ChatContext, Arc<Mutex<GameSession>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new game bound to `context`.
    ///
    /// The occupancy check and the insert are one atomic step, so two
    /// racing starts in the same context cannot both succeed. Fails with
    /// no side effects when the context already has a session
    /// (`SessionConflict`, existing session untouched) or when the
    /// vocabulary is empty (`EmptyVocabulary`, nothing inserted).
    pub fn start(
        &self,
        context: ChatContext,
        owner: PlayerId,
        settings: SessionSettings,
        words: &WordSource,
    ) -> Result<Render> {
        match self.sessions.entry(context) {
            Entry::Occupied(_) => Err(Error::SessionConflict),
            Entry::Vacant(slot) => {
                let secret = words.pick()?;
                let session =
                    GameSession::new(secret, settings.lives, owner, settings.policy, context);
                let render = session.render();
                info!(context = context.0, owner = owner.0, "game started");
                slot.insert(Arc::new(Mutex::new(session)));
                Ok(render)
            },
        }
    }

    /// Apply a raw guess to the session bound to `context`.
    ///
    /// A terminal outcome removes the session before this returns, so a
    /// finished context is immediately free for a new game.
    pub async fn guess(
        &self,
        context: ChatContext,
        guesser: PlayerId,
        input: &str,
    ) -> Result<GuessReport> {
        let guess = Guess::parse(input)?;
        // Clone the Arc out so no map shard lock is held across an await.
        let session = self
            .sessions
            .get(&context)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(Error::NoActiveGame)?;

        let mut session = session.lock().await;
        let outcome = session.guess(guesser, &guess)?;
        let render = session.render();
        let finished = session.status().is_terminal();
        drop(session);

        if finished {
            self.remove(context);
        }
        Ok(GuessReport { outcome, render })
    }

    /// Remove any session bound to `context`. Removing an absent context
    /// is a no-op, so external thread deletion can always call this.
    pub fn remove(&self, context: ChatContext) {
        if self.sessions.remove(&context).is_some() {
            debug!(context = context.0, "session removed");
        }
    }

    pub fn contains(&self, context: ChatContext) -> bool {
        self.sessions.contains_key(&context)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::session::{GuessOutcome, Status};

    const OWNER: PlayerId = PlayerId(1);
    const OTHER: PlayerId = PlayerId(2);
    const HERE: ChatContext = ChatContext(10);
    const ELSEWHERE: ChatContext = ChatContext(20);

    fn settings(lives: u32) -> SessionSettings {
        SessionSettings {
            lives,
            policy: GuesserPolicy::Private,
        }
    }

    fn one_word(word: &str) -> WordSource {
        WordSource::from_words([word])
    }

    // ── Starting games ───────────────────────────────────────────────

    #[test]
    fn start_creates_a_session() {
        let registry = SessionRegistry::new();
        let render = registry
            .start(HERE, OWNER, settings(3), &one_word("cat"))
            .unwrap();
        assert_eq!(render.masked_word, "_ _ _");
        assert!(registry.contains(HERE));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn second_start_in_same_context_conflicts_and_preserves_first() {
        let registry = SessionRegistry::new();
        registry
            .start(HERE, OWNER, settings(3), &one_word("cat"))
            .unwrap();
        registry.guess(HERE, OWNER, "c").await.unwrap();

        let err = registry
            .start(HERE, OTHER, settings(5), &one_word("dog"))
            .unwrap_err();
        assert!(matches!(err, Error::SessionConflict));

        // The first session is unchanged: its guess history survives.
        let report = registry.guess(HERE, OWNER, "a").await.unwrap();
        assert_eq!(report.render.guessed, vec!['c', 'a']);
        assert_eq!(report.render.lives_remaining, 3);
    }

    #[test]
    fn start_in_distinct_contexts_is_independent() {
        let registry = SessionRegistry::new();
        registry
            .start(HERE, OWNER, settings(3), &one_word("cat"))
            .unwrap();
        registry
            .start(ELSEWHERE, OTHER, settings(3), &one_word("dog"))
            .unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn empty_vocabulary_fails_start_and_inserts_nothing() {
        let registry = SessionRegistry::new();
        let empty = WordSource::from_words(Vec::<String>::new());
        let err = registry.start(HERE, OWNER, settings(3), &empty).unwrap_err();
        assert!(matches!(err, Error::EmptyVocabulary));
        assert!(!registry.contains(HERE));
    }

    // ── Guessing ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn guess_without_session_fails() {
        let registry = SessionRegistry::new();
        let err = registry.guess(HERE, OWNER, "a").await.unwrap_err();
        assert!(matches!(err, Error::NoActiveGame));
    }

    #[tokio::test]
    async fn invalid_guess_is_rejected_before_touching_state() {
        let registry = SessionRegistry::new();
        registry
            .start(HERE, OWNER, settings(3), &one_word("cat"))
            .unwrap();
        let err = registry.guess(HERE, OWNER, "c4t").await.unwrap_err();
        assert!(matches!(err, Error::InvalidGuess(_)));

        let report = registry.guess(HERE, OWNER, "c").await.unwrap();
        assert_eq!(report.render.lives_remaining, 3);
        assert_eq!(report.render.guessed, vec!['c']);
    }

    #[tokio::test]
    async fn winning_removes_the_session_from_the_registry() {
        let registry = SessionRegistry::new();
        registry
            .start(HERE, OWNER, settings(3), &one_word("cat"))
            .unwrap();
        let report = registry.guess(HERE, OWNER, "cat").await.unwrap();
        assert_eq!(report.outcome, GuessOutcome::Won);
        assert_eq!(report.render.status, Status::Won);
        assert!(!registry.contains(HERE), "terminal session must be removed");
    }

    #[tokio::test]
    async fn losing_removes_the_session_and_reveals_the_word() {
        let registry = SessionRegistry::new();
        registry
            .start(HERE, OWNER, settings(3), &one_word("cat"))
            .unwrap();
        for wrong in ["x", "y"] {
            registry.guess(HERE, OWNER, wrong).await.unwrap();
        }
        let report = registry.guess(HERE, OWNER, "z").await.unwrap();
        assert_eq!(report.outcome, GuessOutcome::Lost);
        assert_eq!(report.render.revealed.as_deref(), Some("cat"));
        assert!(!registry.contains(HERE));
    }

    #[tokio::test]
    async fn finished_context_is_free_for_a_new_game() {
        let registry = SessionRegistry::new();
        registry
            .start(HERE, OWNER, settings(3), &one_word("cat"))
            .unwrap();
        registry.guess(HERE, OWNER, "cat").await.unwrap();

        // Same context, fresh game.
        registry
            .start(HERE, OTHER, settings(5), &one_word("dog"))
            .unwrap();
        assert!(registry.contains(HERE));
    }

    #[tokio::test]
    async fn unauthorized_guess_changes_nothing() {
        let registry = SessionRegistry::new();
        registry
            .start(HERE, OWNER, settings(3), &one_word("cat"))
            .unwrap();
        let err = registry.guess(HERE, OTHER, "c").await.unwrap_err();
        assert!(matches!(err, Error::NotAuthorized));

        let report = registry.guess(HERE, OWNER, "c").await.unwrap();
        assert_eq!(report.render.guessed, vec!['c']);
        assert_eq!(report.render.lives_remaining, 3);
    }

    // ── Removal ──────────────────────────────────────────────────────

    #[test]
    fn remove_is_idempotent() {
        let registry = SessionRegistry::new();
        registry
            .start(HERE, OWNER, settings(3), &one_word("cat"))
            .unwrap();
        registry.remove(HERE);
        assert!(!registry.contains(HERE));
        // Removing again (or removing an absent context) is a no-op.
        registry.remove(HERE);
        registry.remove(ELSEWHERE);
        assert!(registry.is_empty());
    }
}
