use std::time::Duration;

use futures::stream::{self, Stream};
use tokio::time::Interval;

use crate::app::Message;

/// Spinner clock: one `Message::Tick` per period, for as long as it is subscribed.
pub(crate) fn tick_stream(ms: &u64) -> impl Stream<Item = Message> + use<> {
    let period = Duration::from_millis(*ms);
    // The interval is created on first poll, inside the executor's runtime.
    stream::unfold(None, move |interval: Option<Interval>| async move {
        let mut interval = interval.unwrap_or_else(|| tokio::time::interval(period));
        interval.tick().await;
        Some((Message::Tick, Some(interval)))
    })
}
