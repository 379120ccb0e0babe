use crossterm::event::EventStream;
use futures_util::StreamExt;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;

use crate::config::FeedsConfig;
use crate::event::DomainEvent;
use crate::feeds::{fallback_images, feed_client, load_images, load_quote};

pub(crate) struct EventBusRuntime {
    tasks: Vec<JoinHandle<()>>,
}

impl EventBusRuntime {
    pub(crate) fn spawn(
        feeds: &FeedsConfig,
    ) -> (
        UnboundedSender<DomainEvent>,
        UnboundedReceiver<DomainEvent>,
        Self,
    ) {
        let (tx, rx) = unbounded_channel();
        let mut tasks = vec![spawn_input_task(tx.clone())];
        tasks.extend(spawn_feed_tasks(tx.clone(), feeds.clone()));
        (tx, rx, Self { tasks })
    }

    pub(crate) fn shutdown(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

fn spawn_input_task(tx: UnboundedSender<DomainEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut input_stream = EventStream::new();
        while let Some(event) = input_stream.next().await {
            let loop_event = match event {
                Ok(event) => DomainEvent::Input(event),
                Err(err) => DomainEvent::InputError(err.to_string()),
            };
            if tx.send(loop_event).is_err() {
                return;
            }
        }
    })
}

/// One-shot fetches of the page's decorative feeds.
fn spawn_feed_tasks(tx: UnboundedSender<DomainEvent>, feeds: FeedsConfig) -> Vec<JoinHandle<()>> {
    let client = match feed_client() {
        Ok(client) => client,
        Err(err) => {
            tracing::warn!(error = %err, "feeds disabled");
            let images = fallback_images();
            let _ = tx.send(DomainEvent::WallpapersLoaded(images));
            return Vec::new();
        }
    };

    let mut tasks = Vec::new();
    let wallpaper_client = client.clone();
    let wallpaper_tx = tx.clone();
    let wallpaper_url = feeds.wallpaper_url.clone();
    tasks.push(tokio::spawn(async move {
        let images = load_images(&wallpaper_client, wallpaper_url.as_deref()).await;
        let _ = wallpaper_tx.send(DomainEvent::WallpapersLoaded(images));
    }));

    if let Some(quote_url) = feeds.quote_url {
        tasks.push(tokio::spawn(async move {
            if let Some(quote) = load_quote(&client, &quote_url).await {
                let _ = tx.send(DomainEvent::QuoteLoaded(quote));
            }
        }));
    }
    tasks
}
