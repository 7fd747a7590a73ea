use std::{
    sync::{
        Arc, RwLock,
        mpsc::{self, RecvTimeoutError, Sender},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use tracing::{error, info, warn};

use crate::State;

/// Advances the shared game on its own thread, one round per interval, until
/// the configured number of rounds is played or it is stopped.
pub struct TickerHost {
    stop_sender: Sender<()>,
    thread: JoinHandle<usize>,
}

impl TickerHost {
    pub fn start(state_arc: Arc<RwLock<State>>, interval: Duration, rounds: usize) -> Self {
        let (stop_sender, stop_receiver) = mpsc::channel();

        let thread = thread::spawn(move || {
            let mut played = 0;

            while played < rounds {
                // A stop request or a dropped host both end the animation.
                if stop_receiver.recv_timeout(interval) != Err(RecvTimeoutError::Timeout) {
                    break;
                }

                let Ok(mut state) = state_arc.write() else {
                    warn!("game state lock poisoned, stopping the animation");
                    break;
                };
                let live_count = state.game.tick();
                drop(state);

                played += 1;
                if played == rounds {
                    info!(rounds, live_count, "animation finished");
                }
            }

            played
        });

        Self {
            stop_sender,
            thread,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Stops between rounds and returns how many rounds were played.
    pub fn stop(self) -> usize {
        // The thread may already be gone once every round is played.
        let _ = self.stop_sender.send(());
        rounds_played(self.thread.join())
    }
}

fn rounds_played(joined: thread::Result<usize>) -> usize {
    joined.unwrap_or_else(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("unknown panic");
        error!(reason, "animation thread panicked");
        0
    })
}

#[cfg(test)]
mod tests {
    use libgame::Game;

    use super::*;

    fn shared_blinker() -> Arc<RwLock<State>> {
        let game = Game::from_seeds(5, 5, [[2, 1], [2, 2], [2, 3]]).unwrap();
        Arc::new(RwLock::new(State { game, rounds: 6 }))
    }

    #[test]
    fn plays_exactly_the_configured_rounds() {
        let state_arc = shared_blinker();
        let ticker = TickerHost::start(state_arc.clone(), Duration::ZERO, 6);

        while !ticker.is_finished() {
            thread::yield_now();
        }

        assert_eq!(ticker.stop(), 6);
        let state = state_arc.read().unwrap();
        assert_eq!(state.game.generation(), 6);
        assert_eq!(state.game.live_count(), 3);
    }

    #[test]
    fn panicked_thread_counts_as_no_rounds() {
        let joined = thread::spawn(|| -> usize { panic!("tick failed") }).join();

        assert!(joined.is_err());
        assert_eq!(rounds_played(joined), 0);
        assert_eq!(rounds_played(Ok(4)), 4);
    }

    #[test]
    fn stop_interrupts_between_rounds() {
        let state_arc = shared_blinker();
        let ticker = TickerHost::start(state_arc.clone(), Duration::from_secs(60), 6);

        assert_eq!(ticker.stop(), 0);
        assert_eq!(state_arc.read().unwrap().game.generation(), 0);
    }
}
