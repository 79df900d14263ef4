//! Delays propagation of a changing value until it has been stable for a
//! fixed interval.
//!
//! [`Debouncer`] is the pure part: it only tracks the pending value and its
//! deadline, so it can be driven by any clock. [`use_debounced`] wires it to
//! a reactive signal using browser timeouts.

use leptos::*;

/// Delay applied to free-text search boxes before they hit the API.
pub const TEACHER_SEARCH_DEBOUNCE_MS: u32 = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct Debouncer<T> {
    delay_ms: u64,
    pending: Option<(T, u64)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Replaces any pending value and re-arms the deadline.
    pub fn push(&mut self, value: T, now_ms: u64) {
        self.pending = Some((value, now_ms.saturating_add(self.delay_ms)));
    }

    /// Emits the pending value once its deadline has passed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        match &self.pending {
            Some((_, due)) if now_ms >= *due => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Mirrors `source` into the returned signal once it has stopped changing for
/// `delay_ms`. Every change drops the previous timeout, which cancels it.
pub fn use_debounced<T>(source: Signal<T>, delay_ms: u32) -> ReadSignal<T>
where
    T: Clone + PartialEq + 'static,
{
    let (debounced, set_debounced) = create_signal(source.get_untracked());
    let state = store_value(Debouncer::<T>::new(u64::from(delay_ms)));
    let timer = store_value(None::<gloo_timers::callback::Timeout>);

    create_effect(move |previous: Option<()>| {
        let value = source.get();
        if previous.is_none() {
            return;
        }
        state.update_value(|debouncer| debouncer.push(value, now_ms()));
        schedule(timer, delay_ms, move |fired_at| {
            // The timer is the authority on elapsed time; never poll before the deadline.
            let flushed = state
                .try_update_value(|debouncer| {
                    let at = debouncer.deadline().map_or(fired_at, |due| due.max(fired_at));
                    debouncer.poll(at)
                })
                .flatten();
            if let Some(value) = flushed {
                if debounced.get_untracked() != value {
                    set_debounced.set(value);
                }
            }
        });
    });

    on_cleanup(move || {
        timer.update_value(|slot| *slot = None);
        state.update_value(|debouncer| debouncer.cancel());
    });

    debounced
}

fn now_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn schedule(
    timer: StoredValue<Option<gloo_timers::callback::Timeout>>,
    delay_ms: u32,
    fire: impl FnOnce(u64) + 'static,
) {
    let timeout = gloo_timers::callback::Timeout::new(delay_ms, move || fire(now_ms()));
    timer.update_value(|slot| *slot = Some(timeout));
}

// No browser timers on the host; flush straight away.
#[cfg(not(target_arch = "wasm32"))]
fn schedule(
    timer: StoredValue<Option<gloo_timers::callback::Timeout>>,
    _delay_ms: u32,
    fire: impl FnOnce(u64) + 'static,
) {
    timer.update_value(|slot| *slot = None);
    fire(u64::MAX);
}
