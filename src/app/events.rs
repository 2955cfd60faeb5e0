use crossterm::event::{Event, EventStream};
use futures::StreamExt;

use crate::{cli::RangeOption, domain::calendar::Day};

/// Everything the event loop reacts to. Fetch completions carry the
/// generation they were started with so the state machine can drop results
/// from superseded requests.
#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    Input(Event),
    FetchStarted {
        generation: u64,
    },
    FetchSucceeded {
        generation: u64,
        range: RangeOption,
        days: Vec<Day>,
    },
    FetchFailed {
        generation: u64,
        error: String,
    },
    Quit,
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}
