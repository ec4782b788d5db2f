use crate::core::RewindCtx;

/// Capability implemented by anything that follows the authoritative clock.
///
/// Time-advance deltas are signed: negative while rewinding. During a rewind
/// that crosses recorded undo points the delta is split so that each
/// notification ends exactly on an undo timestamp, before that undo runs.
pub trait TimeObserver {
    /// Moves the observer's notion of "now" by `delta`.
    ///
    /// `ctx.now()` is the clock position after this delta. Effects recorded
    /// through `ctx` are committed once the current clock change completes.
    fn on_time_advance(&mut self, delta: f64, ctx: &mut RewindCtx<'_>);

    /// Called when the frame counter is set while scrub mode is active.
    fn on_frame_set(&mut self, frame: i64) {
        let _ = frame;
    }

    /// Called when scrub mode is switched off; commit any transient scrub state.
    fn on_end_frame_set(&mut self, frame: i64) {
        let _ = frame;
    }
}
