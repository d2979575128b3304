//! Drains queued preference writes into the async preference store.

use leptos::*;

use crate::{runtime::persist_preference_writes, runtime_context::DesktopRuntimeContext};

/// Installs the executor that hands each batch of queued writes to the store, in order.
pub fn install(runtime: DesktopRuntimeContext) {
    // Take the batch before spawning so writes queued while a batch is in flight start a new one.
    create_effect(move |_| {
        let queued = runtime.pending_writes.get();
        if queued.is_empty() {
            return;
        }

        runtime.pending_writes.set(Vec::new());

        let store = runtime
            .runtime
            .with_value(|shell| shell.host().prefs.clone());
        spawn_local(persist_preference_writes(store, queued));
    });
}
