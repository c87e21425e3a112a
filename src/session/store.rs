use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tracing::warn;

use crate::request::request_model::FillableRequest;
use crate::session::resume::ResumeTarget;

/// Single-slot state bridging the offer and completion phases.
///
/// Last write wins: a new request silently replaces whatever was pending.
/// There is no correlation id tying a completion to the offer it answers.
pub trait SessionStore: Send + Sync {
    /// Replace the pending request and raise the unread caller marker.
    fn set(&self, request: FillableRequest);
    fn get(&self) -> Option<FillableRequest>;
    fn clear(&self);

    /// Remove and return the pending request in one step.
    fn take(&self) -> Option<FillableRequest>;

    /// Caller URI of the pending request, returned once per `set`.
    fn take_caller_uri(&self) -> Option<String>;

    fn set_resume_target(&self, target: &Arc<dyn ResumeTarget>);
    fn clear_resume_target(&self);
    /// `None` once the target was cleared or dropped by its owner.
    fn resume_target(&self) -> Option<Arc<dyn ResumeTarget>>;
}

#[derive(Default)]
struct SessionSlot {
    pending: Option<FillableRequest>,
    caller_unread: bool,
    resume_target: Option<Weak<dyn ResumeTarget>>,
}

/// Mutex-guarded in-process session store.
#[derive(Default)]
pub struct FillSession {
    slot: Mutex<SessionSlot>,
}

impl FillSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<dyn SessionStore> {
        Arc::new(Self::new())
    }

    fn lock(&self) -> MutexGuard<'_, SessionSlot> {
        match self.slot.lock() {
            Ok(slot) => slot,
            Err(poisoned) => {
                warn!("fill session lock poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}

impl SessionStore for FillSession {
    fn set(&self, request: FillableRequest) {
        let mut slot = self.lock();
        slot.pending = Some(request);
        slot.caller_unread = true;
    }

    fn get(&self) -> Option<FillableRequest> {
        self.lock().pending.clone()
    }

    fn clear(&self) {
        let mut slot = self.lock();
        slot.pending = None;
        slot.caller_unread = false;
    }

    fn take(&self) -> Option<FillableRequest> {
        let mut slot = self.lock();
        slot.caller_unread = false;
        slot.pending.take()
    }

    fn take_caller_uri(&self) -> Option<String> {
        let mut slot = self.lock();
        if !slot.caller_unread {
            return None;
        }
        slot.caller_unread = false;
        slot.pending.as_ref().and_then(|p| p.uri.clone())
    }

    fn set_resume_target(&self, target: &Arc<dyn ResumeTarget>) {
        self.lock().resume_target = Some(Arc::downgrade(target));
    }

    fn clear_resume_target(&self) {
        self.lock().resume_target = None;
    }

    fn resume_target(&self) -> Option<Arc<dyn ResumeTarget>> {
        self.lock().resume_target.as_ref().and_then(Weak::upgrade)
    }
}
