//! Thread-local context tracking for crash reports.
//!
//! Records which phase of a "view results" request is running and for which
//! identifier. Context guards use RAII to restore the previous context on
//! drop.

use std::cell::RefCell;

thread_local! {
    static CURRENT_CONTEXT: RefCell<RequestContextInfo> = const { RefCell::new(RequestContextInfo::new()) };
}

/// Snapshot of what the session was doing.
#[derive(Debug, Clone, Default)]
pub struct RequestContextInfo {
    pub phase: Option<RequestPhase>,
    pub user_id: Option<String>,
}

impl RequestContextInfo {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            user_id: None,
        }
    }
}

/// Stages of one request, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Fetching,
    Normalizing,
    Predicting,
    Scoring,
    Rendering,
}

impl std::fmt::Display for RequestPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetching => write!(f, "fetching"),
            Self::Normalizing => write!(f, "normalizing"),
            Self::Predicting => write!(f, "predicting"),
            Self::Scoring => write!(f, "scoring"),
            Self::Rendering => write!(f, "rendering"),
        }
    }
}

/// Restores the previous context when dropped.
pub struct ContextGuard {
    previous: RequestContextInfo,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

/// Set the current request phase until the guard drops.
#[must_use]
pub fn set_phase(phase: RequestPhase) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().phase = Some(phase);
        ContextGuard { previous }
    })
}

/// Set the identifier being looked up until the guard drops.
#[must_use]
pub fn set_user_id(user_id: &str) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().user_id = Some(user_id.to_string());
        ContextGuard { previous }
    })
}

pub fn get_current_context() -> RequestContextInfo {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guards_nest_and_restore() {
        assert!(get_current_context().phase.is_none());
        {
            let _id = set_user_id("42");
            let _phase = set_phase(RequestPhase::Fetching);
            {
                let _inner = set_phase(RequestPhase::Predicting);
                assert_eq!(get_current_context().phase, Some(RequestPhase::Predicting));
            }
            let ctx = get_current_context();
            assert_eq!(ctx.phase, Some(RequestPhase::Fetching));
            assert_eq!(ctx.user_id.as_deref(), Some("42"));
        }
        assert!(get_current_context().user_id.is_none());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(RequestPhase::Normalizing.to_string(), "normalizing");
    }
}
