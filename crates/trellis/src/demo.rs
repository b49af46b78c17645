//! Scripted walkthrough of the event dispatcher.
//!
//! Each stage dispatches a few events through one [`EventBus`] and records
//! what the handlers did. The `trellis events` command prints the result.

use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;
use trellis_events::{
    ChainedHandler, CustomEvent, DebouncedHandler, Event, EventBus, EventFilter, KeyAction,
    KeyboardEvent, Modifiers, MouseAction, MouseButton, MouseEvent, OnceHandler, TypedHandler,
    WindowAction, WindowEvent,
};

/// Key code the demo treats as the "save" shortcut when pressed with Ctrl.
const KEY_S: i32 = 83;

/// Demo parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoOptions {
    /// Threads feeding the deferred queue.
    pub workers: usize,
    /// Events queued by each thread.
    pub events_per_worker: usize,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            workers: 2,
            events_per_worker: 3,
        }
    }
}

/// Log of one demo stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoStage {
    /// What the stage shows.
    pub title: String,
    /// Handler invocations, in order.
    pub log: Vec<String>,
}

/// Everything the demo did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoReport {
    /// Stages in execution order.
    pub stages: Vec<DemoStage>,
    /// Events processed from the deferred queue.
    pub queued_processed: usize,
}

type Log = Rc<RefCell<Vec<String>>>;

fn logger(log: &Log) -> impl Fn(String) + 'static {
    let log = Rc::clone(log);
    move |line| log.borrow_mut().push(line)
}

/// Run every stage and return the log.
///
/// # Panics
///
/// Panics if a queue-feeding worker thread panics.
pub fn run(options: DemoOptions) -> DemoReport {
    let bus = EventBus::new();
    let log = Log::default();
    let mut stages = Vec::new();
    let mut finish_stage = |title: &str| {
        stages.push(DemoStage {
            title: title.to_string(),
            log: std::mem::take(&mut *log.borrow_mut()),
        });
    };

    // Priority order and the handled short-circuit.
    let record = logger(&log);
    bus.subscribe(
        "keyboard",
        TypedHandler::new(move |event: &mut Event, key: &KeyboardEvent| {
            if key.is_ctrl() && key.key_code == KEY_S {
                record("shortcut handler (priority 10): save, event handled".into());
                event.set_handled(true);
            } else {
                record(format!("shortcut handler (priority 10): ignored key {}", key.key_code));
            }
        })
        .into_handler(),
        10,
    );
    let record = logger(&log);
    bus.subscribe(
        "keyboard",
        TypedHandler::new(move |_event: &mut Event, key: &KeyboardEvent| {
            record(format!("text handler (priority 0): typed key {}", key.key_code));
        })
        .into_handler(),
        0,
    );
    bus.dispatch(&mut Event::from(KeyboardEvent::new(
        KeyAction::Press,
        65,
        Modifiers::empty(),
    )));
    bus.dispatch(&mut Event::from(KeyboardEvent::new(
        KeyAction::Press,
        KEY_S,
        Modifiers::CTRL,
    )));
    finish_stage("priority dispatch and handled short-circuit");

    // Adapters: once, chain, filter.
    let record = logger(&log);
    let first_resize = OnceHandler::new(move |_event: &mut Event| {
        record("once handler: first resize seen".into());
    });
    let record = logger(&log);
    let large_only = EventFilter::<WindowEvent>::new(|window| window.width >= 1024);
    let chain = ChainedHandler::new()
        .then(first_resize.into_handler())
        .then(large_only.wrap(move |event: &mut Event| {
            if let Some(window) = event.payload_as::<WindowEvent>() {
                record(format!(
                    "filtered handler: large window {}x{}",
                    window.width, window.height
                ));
            }
        }));
    bus.subscribe("window", chain.into_handler(), 0);
    for (width, height) in [(800, 600), (1280, 720)] {
        bus.dispatch(&mut Event::from(WindowEvent::with_size(
            WindowAction::Resize,
            width,
            height,
        )));
    }
    finish_stage("once, chained and filtered handlers");

    // Deferred queue fed from worker threads.
    let record = logger(&log);
    bus.subscribe(
        "custom",
        move |event: &mut Event| {
            if let Some(custom) = event.payload_as::<CustomEvent>() {
                record(format!("queue handler: {}", custom.name));
            }
        },
        0,
    );
    let workers: Vec<_> = (0..options.workers)
        .map(|worker| {
            let handle = bus.queue_handle();
            let count = options.events_per_worker;
            thread::spawn(move || {
                for i in 0..count {
                    handle.queue_event(Event::from(CustomEvent::new(format!(
                        "worker {worker} job {i}"
                    ))));
                }
            })
        })
        .collect();
    for worker in workers {
        if let Err(panic) = worker.join() {
            std::panic::resume_unwind(panic);
        }
    }
    let queued_processed = bus.process_queue();
    finish_stage("deferred queue fed from worker threads");

    // Scoped subscription and debouncing.
    let click = || {
        Event::from(MouseEvent::new(
            MouseAction::Press,
            10.0,
            20.0,
            MouseButton::Left,
        ))
    };
    {
        let record = logger(&log);
        let debounced = DebouncedHandler::new(
            move |event: &mut Event| {
                if let Some(mouse) = event.payload_as::<MouseEvent>() {
                    record(format!("guarded handler: click at ({}, {})", mouse.x, mouse.y));
                }
            },
            Duration::from_secs(1),
        );
        let guard = bus
            .dispatcher()
            .subscribe_guarded("mouse", debounced.into_handler(), 0);
        tracing::debug!(id = %guard.id(), "Scoped mouse handler subscribed");
        bus.dispatch(&mut click());
        bus.dispatch(&mut click());
    }
    bus.dispatch(&mut click());
    let record = logger(&log);
    record(format!(
        "mouse handlers after guard dropped: {}",
        bus.dispatcher().handler_count("mouse")
    ));
    finish_stage("guarded and debounced subscription");

    DemoReport {
        stages,
        queued_processed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcut_stops_lower_priority_handler() {
        let report = run(DemoOptions::default());
        assert_eq!(
            report.stages[0].log,
            vec![
                "shortcut handler (priority 10): ignored key 65",
                "text handler (priority 0): typed key 65",
                "shortcut handler (priority 10): save, event handled",
            ]
        );
    }

    #[test]
    fn once_and_filter_stages() {
        let report = run(DemoOptions::default());
        assert_eq!(
            report.stages[1].log,
            vec![
                "once handler: first resize seen",
                "filtered handler: large window 1280x720",
            ]
        );
    }

    #[test]
    fn every_queued_event_is_processed() {
        let options = DemoOptions {
            workers: 3,
            events_per_worker: 4,
        };
        let report = run(options);
        assert_eq!(report.queued_processed, 12);
        assert_eq!(report.stages[2].log.len(), 12);
    }

    #[test]
    fn guard_and_debounce_limit_clicks() {
        let report = run(DemoOptions::default());
        assert_eq!(
            report.stages[3].log,
            vec![
                "guarded handler: click at (10, 20)",
                "mouse handlers after guard dropped: 0",
            ]
        );
    }
}
