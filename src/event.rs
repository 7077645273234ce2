use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The visible area was invalidated and must be shown again.
    Exposed,
    /// The screen went idle (terminal lost focus).
    IdleStarted,
    IdleEnded,
    Quit,
}

/// Map a terminal event to what the dock cares about.
pub fn translate(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Resize(_, _) => Some(AppEvent::Exposed),
        Event::FocusLost => Some(AppEvent::IdleStarted),
        Event::FocusGained => Some(AppEvent::IdleEnded),
        _ => None,
    }
}

fn translate_key(key: KeyEvent) -> Option<AppEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(AppEvent::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(AppEvent::Quit)
        }
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(AppEvent::Exposed)
        }
        _ => None,
    }
}

pub fn start_event_loop(event_tx: mpsc::UnboundedSender<AppEvent>) {
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            match reader.next().await {
                Some(Ok(event)) => {
                    let Some(app_event) = translate(event) else {
                        continue;
                    };
                    if tx.send(app_event).is_err() {
                        break;
                    }
                }
                Some(Err(e)) => {
                    log::error!("terminal input failed: {}", e);
                    let _ = tx.send(AppEvent::Quit);
                    break;
                }
                None => break,
            }
        }
    });

    #[cfg(unix)]
    tokio::spawn(async move {
        use tokio::signal::unix::{signal, SignalKind};
        let Ok(mut term) = signal(SignalKind::terminate()) else {
            return;
        };
        if term.recv().await.is_some() {
            let _ = event_tx.send(AppEvent::Quit);
        }
    });
}
