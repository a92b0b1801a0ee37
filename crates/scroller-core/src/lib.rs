pub mod canvas;
pub mod draw;
pub mod finder;
pub mod game_trait;
pub mod geometry;
pub mod lives;
pub mod powerup;
pub mod store;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::canvas::{Key, MemoryCanvas};
    use crate::game_trait::FrameGame;

    /// Viewport used by most game tests.
    pub const TEST_WIDTH: i32 = 480;
    pub const TEST_HEIGHT: i32 = 320;

    pub fn test_canvas() -> MemoryCanvas {
        MemoryCanvas::new(TEST_WIDTH, TEST_HEIGHT)
    }

    /// Run `n` full frames (update, paint, advance), returning all events.
    pub fn run_frames<G: FrameGame>(
        game: &mut G,
        canvas: &mut MemoryCanvas,
        n: usize,
    ) -> Vec<G::Event> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(game.update(canvas));
            game.paint(canvas);
            canvas.next_frame();
        }
        all_events
    }

    /// Run frames until `stop` matches an event or `max` frames elapse.
    /// Returns the events and the number of frames run.
    pub fn run_until<G: FrameGame>(
        game: &mut G,
        canvas: &mut MemoryCanvas,
        max: usize,
        mut stop: impl FnMut(&G::Event) -> bool,
    ) -> (Vec<G::Event>, usize) {
        let mut all_events = Vec::new();
        for frame in 1..=max {
            let events = game.update(canvas);
            game.paint(canvas);
            canvas.next_frame();
            let hit = events.iter().any(&mut stop);
            all_events.extend(events);
            if hit {
                return (all_events, frame);
            }
        }
        (all_events, max)
    }

    /// Tap `key` and run a single frame.
    pub fn tap_and_step<G: FrameGame>(
        game: &mut G,
        canvas: &mut MemoryCanvas,
        key: Key,
    ) -> Vec<G::Event> {
        canvas.tap(key);
        run_frames(game, canvas, 1)
    }
}
