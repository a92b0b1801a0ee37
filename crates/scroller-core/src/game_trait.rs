use crate::canvas::Canvas;

/// A game driven by a host frame pump.
///
/// The host owns the window and calls `update` then `paint` once per
/// displayed frame; the game owns all simulation state.
pub trait FrameGame {
    /// Events a single update can report to the host.
    type Event;

    /// Read input, advance the simulation one tick, report what happened.
    fn update(&mut self, canvas: &mut dyn Canvas) -> Vec<Self::Event>;

    /// Draw the current state. Must not change simulation state.
    fn paint(&self, canvas: &mut dyn Canvas);

    /// The host should stop pumping frames and close the window.
    fn is_finished(&self) -> bool;

    fn is_paused(&self) -> bool;
}
