//! Reports panics as fatal log records, located at the panic site, before
//! running the previous hook
use std::panic::{PanicHookInfo, take_hook};
use std::sync::{Mutex, PoisonError};

use crate::caller::CallSite;
use crate::context::LogContext;
use crate::dispatch::{flush_log_buffer, log_at};
use crate::levels::Level;
use crate::value::Value;

fn panic_payload(panic_info: &PanicHookInfo<'_>) -> String {
    let payload = panic_info.payload();
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_owned()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        String::from("<non-string panic payload>")
    }
}

/// Installs the hook once. Later calls are no-ops.
pub fn init_panic_hook() {
    type BoxedHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;
    static PREVIOUS_HOOK: Mutex<Option<BoxedHook>> = Mutex::new(None);

    {
        let mut previous_hook_lock = PREVIOUS_HOOK.lock().unwrap_or_else(PoisonError::into_inner);
        if previous_hook_lock.is_some() {
            return;
        }
        *previous_hook_lock = Some(take_hook());
    }

    std::panic::set_hook(Box::new(|panic_info| {
        // the record's caller is the panic site
        let call_site = panic_info
            .location()
            .map_or(CallSite::new("<unknown>", 0), CallSite::from);
        log_at(
            Level::Fatal,
            &LogContext::background(),
            "panic",
            &[Value::from("panic"), Value::from(panic_payload(panic_info))],
            call_site,
        );
        flush_log_buffer();
        if let Ok(guard) = PREVIOUS_HOOK.lock()
            && let Some(hook) = guard.as_ref()
        {
            hook(panic_info);
        }
    }));
}
