//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum.  One blocking task forwards
//! terminal input; a second task emits a `Tick` per display frame so
//! animations keep advancing even while the mouse is flooding the channel.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}

/// Spawns the input reader and the frame ticker.  Both stop once the
/// returned receiver is dropped.
pub fn spawn_event_reader(frame_interval: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    let input_tx = tx.clone();
    tokio::task::spawn_blocking(move || loop {
        // Poll with a short timeout so a dropped receiver is noticed.
        let has_event = event::poll(Duration::from_millis(50)).unwrap_or(false);
        if !has_event {
            if input_tx.is_closed() {
                break;
            }
            continue;
        }
        let Ok(ev) = event::read() else {
            continue;
        };
        let app_event = match ev {
            // Ignore key releases on terminals that report them.
            CtEvent::Key(k) if k.kind == KeyEventKind::Release => continue,
            CtEvent::Key(k) => AppEvent::Key(k),
            CtEvent::Mouse(m) => AppEvent::Mouse(m),
            CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
            _ => continue,
        };
        if input_tx.send(app_event).is_err() {
            break; // receiver dropped
        }
    });

    tokio::spawn(async move {
        let mut frames = tokio::time::interval(frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            frames.tick().await;
            if tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    rx
}
