use crate::types::{ResolutionResult, TrackReference};

/// Single-slot memo owned by one session. The slot remembers which track
/// it was filled for, so a different reference is a miss rather than a
/// stale hit.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    slot: Option<(TrackReference, ResolutionResult)>
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, track: &TrackReference) -> Option<&ResolutionResult> {
        match &self.slot {
            Some((cached, result)) if cached == track => Some(result),
            _ => None
        }
    }

    /// Replaces whatever the slot held
    pub fn put(&mut self, track: TrackReference, result: ResolutionResult) {
        self.slot = Some((track, result));
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}
