use std::time::{Duration, Instant};

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::time::{self, MissedTickBehavior};

use crate::command::ActionId;
use crate::error::AppResult;
use crate::event::DomainEvent;
use crate::feeds::WallpaperRotation;
use crate::suggest::SuggestWorker;

use super::core::App;
use super::event_bus::EventBusRuntime;
use super::terminal_session::{TerminalSession, TerminalSurface};

struct LoopRuntime {
    session: TerminalSession,
    redraw_tick: time::Interval,
    needs_redraw: bool,
    // Keeps the channel open even when every producer task has exited.
    _loop_event_tx: UnboundedSender<DomainEvent>,
    loop_event_rx: UnboundedReceiver<DomainEvent>,
    loop_event_runtime: EventBusRuntime,
}

enum WaitEvent {
    Event(DomainEvent),
    Closed,
}

enum LoopControl {
    Continue,
    Break,
}

impl App {
    pub async fn run(&mut self) -> AppResult<()> {
        let mut runtime = self.initialize_loop_runtime()?;
        let result = self.run_loop(&mut runtime).await;

        runtime.loop_event_runtime.shutdown();
        self.search.worker.cancel_all();
        runtime.session.restore()?;
        result
    }

    async fn run_loop(&mut self, runtime: &mut LoopRuntime) -> AppResult<()> {
        loop {
            let now = Instant::now();
            if self.drain_suggestions() {
                runtime.needs_redraw = true;
            }
            if self.poll_timers(now) {
                runtime.needs_redraw = true;
            }
            if runtime.needs_redraw {
                self.render_frame(&mut runtime.session)?;
                runtime.needs_redraw = false;
            }

            let deadline = self.next_deadline();
            let waited = wait_next_event(
                &mut runtime.loop_event_rx,
                &mut self.search.worker,
                &mut runtime.redraw_tick,
                deadline,
            )
            .await;
            if matches!(
                self.handle_waited_event(waited, runtime)?,
                LoopControl::Break
            ) {
                return Ok(());
            }
        }
    }

    fn initialize_loop_runtime(&mut self) -> AppResult<LoopRuntime> {
        let session = TerminalSession::enter()?;
        if let Ok(size) = session.size() {
            tracing::debug!(width = size.width, height = size.height, "terminal session started");
        }

        let redraw_interval = Duration::from_millis(self.config.ui.redraw_interval_ms);
        let mut redraw_tick = time::interval(redraw_interval);
        redraw_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let (loop_event_tx, loop_event_rx, loop_event_runtime) =
            EventBusRuntime::spawn(&self.config.feeds);

        Ok(LoopRuntime {
            session,
            redraw_tick,
            needs_redraw: true,
            _loop_event_tx: loop_event_tx,
            loop_event_rx,
            loop_event_runtime,
        })
    }

    fn handle_waited_event(
        &mut self,
        waited: WaitEvent,
        runtime: &mut LoopRuntime,
    ) -> AppResult<LoopControl> {
        let now = Instant::now();
        match waited {
            WaitEvent::Event(DomainEvent::Input(event)) => {
                let resized = matches!(event, crossterm::event::Event::Resize(_, _));
                let outcome = self.handle_input_event(event, now)?;
                if outcome.quit_requested {
                    return Ok(LoopControl::Break);
                }
                if resized {
                    runtime.session.clear()?;
                }
                if outcome.redraw {
                    runtime.needs_redraw = true;
                }
            }
            WaitEvent::Event(DomainEvent::InputError(message)) => {
                tracing::warn!(%message, "terminal input error");
                self.state
                    .set_status(ActionId::Input, format!("input error: {message}"));
                runtime.needs_redraw = true;
            }
            WaitEvent::Event(DomainEvent::QuoteLoaded(quote)) => {
                tracing::debug!(from = %quote.from, "quote loaded");
                self.state.quote = quote;
                runtime.needs_redraw = true;
            }
            WaitEvent::Event(DomainEvent::WallpapersLoaded(images)) => {
                tracing::debug!(count = images.len(), "wallpaper list loaded");
                self.state.wallpapers =
                    WallpaperRotation::new(self.config.feeds.wallpaper_host.clone(), images);
                if self.state.wallpapers.is_empty() {
                    self.state.set_status(ActionId::Feed, "no wallpapers available");
                }
                runtime.needs_redraw = true;
            }
            WaitEvent::Event(DomainEvent::Suggestions(event)) => {
                if self.apply_suggest_event(event) {
                    runtime.needs_redraw = true;
                }
            }
            WaitEvent::Event(DomainEvent::RedrawTick) => {
                runtime.needs_redraw = true;
            }
            WaitEvent::Event(DomainEvent::Wake) => {}
            WaitEvent::Closed => return Ok(LoopControl::Break),
        }
        Ok(LoopControl::Continue)
    }
}

async fn wait_next_event(
    loop_event_rx: &mut UnboundedReceiver<DomainEvent>,
    suggest_worker: &mut SuggestWorker,
    redraw_tick: &mut time::Interval,
    deadline: Option<Instant>,
) -> WaitEvent {
    tokio::select! {
        biased;
        maybe_loop = loop_event_rx.recv() => {
            match maybe_loop {
                Some(event) => WaitEvent::Event(event),
                None => WaitEvent::Closed,
            }
        },
        maybe_suggest = suggest_worker.recv_result() => {
            match maybe_suggest {
                Some(event) => WaitEvent::Event(DomainEvent::Suggestions(event)),
                None => WaitEvent::Closed,
            }
        },
        _ = sleep_until_deadline(deadline) => {
            WaitEvent::Event(DomainEvent::Wake)
        },
        _ = redraw_tick.tick() => {
            WaitEvent::Event(DomainEvent::RedrawTick)
        }
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}
