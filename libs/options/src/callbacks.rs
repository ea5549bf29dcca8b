use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use metrics::counter;

use crate::options::{CloseCallback, HandoffCallback, HandoffPayload, Options};

/// Panic-isolating adapters around the host-supplied lifecycle callbacks.
///
/// Host code runs outside the widget's control. A panic inside a callback is
/// reported once through the diagnostic channel and never unwinds into the
/// widget runtime.
#[derive(Clone, Default)]
pub struct CallbackHandles {
    on_close: Option<CloseCallback>,
    on_handoff: Option<HandoffCallback>,
}

/// Captures the host callbacks from a configuration.
///
/// The handles hold their own references; the host's [`Options`] value is not
/// retained beyond this call.
pub fn bind_callbacks(options: &Options) -> CallbackHandles {
    CallbackHandles {
        on_close: options.on_close.clone(),
        on_handoff: options.on_handoff.clone(),
    }
}

impl CallbackHandles {
    /// True when the host registered an `onClose` callback.
    pub fn has_close(&self) -> bool {
        self.on_close.is_some()
    }

    /// True when the host registered an `onHandoff` callback.
    pub fn has_handoff(&self) -> bool {
        self.on_handoff.is_some()
    }

    /// Invokes the host `onClose` callback, if any.
    pub fn close(&self) {
        if let Some(callback) = &self.on_close {
            isolate("onClose", || callback());
        }
    }

    /// Forwards a handoff notification to the host, if it subscribed.
    pub fn handoff(&self, payload: HandoffPayload) {
        if let Some(callback) = &self.on_handoff {
            isolate("onHandoff", || callback(payload));
        }
    }
}

impl fmt::Debug for CallbackHandles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackHandles")
            .field("on_close", &self.on_close.is_some())
            .field("on_handoff", &self.on_handoff.is_some())
            .finish()
    }
}

/// Runs one host callback, converting a panic into a single diagnostic.
fn isolate(name: &'static str, call: impl FnOnce()) {
    if let Err(panic) = catch_unwind(AssertUnwindSafe(call)) {
        let reason = panic_message(panic.as_ref());
        counter!("widget_callback_panics_total", "callback" => name).increment(1);
        tracing::error!(callback = name, %reason, "host callback panicked, suppressed");
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_test::traced_test;

    #[test]
    fn close_invokes_the_host_callback() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let opts = Options::default().on_close(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        let handles = bind_callbacks(&opts);
        handles.close();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn handoff_receives_the_payload() {
        let summary = Arc::new(std::sync::Mutex::new(None::<String>));
        let seen = Arc::clone(&summary);
        let opts = Options::default().on_handoff(move |payload| {
            *seen.lock().unwrap() = payload.summary;
        });
        let handles = bind_callbacks(&opts);
        handles.handoff(HandoffPayload {
            summary: Some("escalated".into()),
            ..HandoffPayload::default()
        });
        assert_eq!(summary.lock().unwrap().as_deref(), Some("escalated"));
    }

    #[test]
    fn unregistered_callbacks_are_noops() {
        let handles = bind_callbacks(&Options::default());
        assert!(!handles.has_close());
        assert!(!handles.has_handoff());
        handles.close();
        handles.handoff(HandoffPayload::default());
    }

    #[traced_test]
    #[test]
    fn panicking_close_callback_is_isolated_and_recorded_once() {
        let opts = Options::default().on_close(|| panic!("host bug"));
        let handles = bind_callbacks(&opts);
        handles.close();
        logs_assert(|lines: &[&str]| {
            match lines
                .iter()
                .filter(|line| line.contains("host callback panicked"))
                .count()
            {
                1 => Ok(()),
                n => Err(format!("expected exactly one diagnostic, saw {n}")),
            }
        });
    }

    #[test]
    fn panicking_callback_does_not_poison_later_invocations() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let opts = Options::default().on_close(move || {
            if seen.fetch_add(1, Ordering::SeqCst) == 0 {
                panic!("first call fails");
            }
        });
        let handles = bind_callbacks(&opts);
        handles.close();
        handles.close();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
