//! Flashcard auto-play.
//!
//! For each card from the current one: wait the lead time, speak the front,
//! flip, hold, advance. Playback stops after the last card, on `stop`, or
//! when the player is dropped.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use wordcard_core::flashcard::FlashcardDeck;

use crate::cancel::CancelToken;
use crate::Timings;

/// Text-to-speech seam.
#[async_trait]
pub trait Speaker: Send + Sync {
    /// Speak `text` in `locale` and resolve when done.
    async fn speak(&self, text: &str, locale: &str) -> Result<()>;

    /// Interrupt any speech in progress.
    fn cancel(&self) {}
}

/// A speaker that says nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSpeaker;

#[async_trait]
impl Speaker for SilentSpeaker {
    async fn speak(&self, _text: &str, _locale: &str) -> Result<()> {
        Ok(())
    }
}

/// Progress reported by a running auto-play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoPlayEvent {
    /// The front of card `index` was spoken.
    Spoke { index: usize },
    /// Card `index` was flipped to its back.
    Flipped { index: usize },
    /// Playback reached the end of the deck.
    Finished,
    /// Playback was stopped early.
    Stopped,
}

/// Plays a shared flashcard deck.
pub struct AutoPlayer {
    deck: Arc<Mutex<FlashcardDeck>>,
    speaker: Arc<dyn Speaker>,
    timings: Timings,
    events: mpsc::UnboundedSender<AutoPlayEvent>,
    running: Option<(CancelToken, JoinHandle<()>)>,
}

impl AutoPlayer {
    pub fn new(
        deck: Arc<Mutex<FlashcardDeck>>,
        speaker: Arc<dyn Speaker>,
        timings: Timings,
    ) -> (Self, mpsc::UnboundedReceiver<AutoPlayEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let player = Self {
            deck,
            speaker,
            timings,
            events,
            running: None,
        };
        (player, rx)
    }

    pub fn is_playing(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|(_, handle)| !handle.is_finished())
    }

    /// Start playing from the current card. Ignored while already playing.
    pub fn start(&mut self) -> bool {
        if self.is_playing() {
            tracing::debug!("auto-play already running");
            return false;
        }

        let token = CancelToken::new();
        let handle = tokio::spawn(play(
            Arc::clone(&self.deck),
            Arc::clone(&self.speaker),
            self.timings,
            token.clone(),
            self.events.clone(),
        ));
        self.running = Some((token, handle));
        true
    }

    /// Stop playback and interrupt the speaker.
    pub fn stop(&mut self) {
        if let Some((token, _handle)) = self.running.take() {
            token.cancel();
            self.speaker.cancel();
        }
    }
}

impl Drop for AutoPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn lock(deck: &Mutex<FlashcardDeck>) -> MutexGuard<'_, FlashcardDeck> {
    deck.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn play(
    deck: Arc<Mutex<FlashcardDeck>>,
    speaker: Arc<dyn Speaker>,
    timings: Timings,
    token: CancelToken,
    events: mpsc::UnboundedSender<AutoPlayEvent>,
) {
    loop {
        if !token.sleep(timings.autoplay_lead).await {
            let _ = events.send(AutoPlayEvent::Stopped);
            return;
        }

        let front = {
            let deck = lock(&deck);
            deck.current()
                .map(|w| (deck.index(), w.vocabulary.clone(), w.vocabulary_sound.clone()))
        };
        let Some((index, text, locale)) = front else {
            let _ = events.send(AutoPlayEvent::Finished);
            return;
        };

        tokio::select! {
            result = speaker.speak(&text, &locale) => {
                if let Err(e) = result {
                    tracing::warn!("speech failed for card {index}: {e:#}");
                }
                let _ = events.send(AutoPlayEvent::Spoke { index });
            }
            _ = token.cancelled() => {
                let _ = events.send(AutoPlayEvent::Stopped);
                return;
            }
        }

        {
            let mut deck = lock(&deck);
            if !deck.is_flipped() {
                deck.flip();
            }
        }
        let _ = events.send(AutoPlayEvent::Flipped { index });

        if !token.sleep(timings.autoplay_hold).await {
            let _ = events.send(AutoPlayEvent::Stopped);
            return;
        }

        if !lock(&deck).next() {
            tracing::debug!("auto-play reached the last card");
            let _ = events.send(AutoPlayEvent::Finished);
            return;
        }
    }
}
