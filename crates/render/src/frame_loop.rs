use crate::renderer::Renderer;
use seascape_common::FrameState;
use seascape_kernel::ParamReader;
use std::time::Instant;

/// Source of elapsed time for the frame loop.
pub trait Clock {
    /// Seconds since the clock started.
    fn elapsed(&mut self) -> f32;
}

/// Wall clock backed by a monotonic `Instant`.
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&mut self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Deterministic clock: returns `start`, then advances by `step` on every sample.
#[derive(Debug, Clone)]
pub struct FixedClock {
    next: f64,
    step: f64,
}

impl FixedClock {
    pub fn new(start: f32, step: f32) -> Self {
        Self {
            next: f64::from(start),
            step: f64::from(step),
        }
    }

    /// 60 frames per second starting at zero.
    pub fn sixty_fps() -> Self {
        Self::new(0.0, 1.0 / 60.0)
    }
}

impl Clock for FixedClock {
    fn elapsed(&mut self) -> f32 {
        let now = self.next;
        self.next += self.step;
        now as f32
    }
}

/// Explicit per-frame driver.
///
/// Every [`tick`](Self::tick) samples the clock, takes one parameter
/// snapshot and hands both to the renderer. The renderer is the only side
/// effect; the loop itself holds no parameter state.
#[derive(Debug)]
pub struct FrameLoop<C> {
    clock: C,
    frame: u64,
    last_elapsed: Option<f32>,
    last_revision: Option<u64>,
}

impl<C: Clock> FrameLoop<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            frame: 0,
            last_elapsed: None,
            last_revision: None,
        }
    }

    /// Frames presented so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Run one frame.
    pub fn tick<R: Renderer>(
        &mut self,
        params: &ParamReader,
        renderer: &mut R,
    ) -> (FrameState, R::Output) {
        let sampled = self.clock.elapsed();
        // Samples that go backwards or are not finite repeat the previous time.
        let elapsed = match self.last_elapsed {
            _ if !sampled.is_finite() => self.last_elapsed.unwrap_or(0.0),
            Some(last) if sampled < last => last,
            _ => sampled,
        };
        let delta = self.last_elapsed.map_or(0.0, |last| elapsed - last);
        self.last_elapsed = Some(elapsed);

        let snapshot = params.snapshot();
        if self.last_revision != Some(snapshot.revision) {
            tracing::debug!(
                frame = self.frame,
                revision = snapshot.revision,
                "new parameter revision visible"
            );
            self.last_revision = Some(snapshot.revision);
        }

        let frame = FrameState {
            frame: self.frame,
            elapsed,
            delta,
        };
        let output = renderer.render(&frame, &snapshot.params);
        self.frame += 1;
        (frame, output)
    }

    /// Run `frames` frames back to back and collect the renderer output.
    pub fn run<R: Renderer>(
        &mut self,
        frames: u64,
        params: &ParamReader,
        renderer: &mut R,
    ) -> Vec<(FrameState, R::Output)> {
        (0..frames).map(|_| self.tick(params, renderer)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seascape_kernel::{ParamEdit, ParamHandle, ScalarParam, WaveParameters};

    /// Records what each frame saw.
    #[derive(Default)]
    struct Recorder {
        seen: Vec<(f32, f32)>,
    }

    impl Renderer for Recorder {
        type Output = f32;

        fn render(&mut self, frame: &FrameState, params: &WaveParameters) -> f32 {
            self.seen.push((frame.elapsed, params.big_wave_speed));
            params.big_wave_speed
        }
    }

    struct Scripted(Vec<f32>);

    impl Clock for Scripted {
        fn elapsed(&mut self) -> f32 {
            self.0.remove(0)
        }
    }

    #[test]
    fn fixed_clock_steps() {
        let mut clock = FixedClock::new(1.0, 0.5);
        assert_eq!(clock.elapsed(), 1.0);
        assert_eq!(clock.elapsed(), 1.5);
        assert_eq!(clock.elapsed(), 2.0);
    }

    #[test]
    fn tick_renders_once_per_frame() {
        let handle = ParamHandle::new(WaveParameters::default()).unwrap();
        let mut frames = FrameLoop::new(FixedClock::new(0.0, 0.25));
        let mut recorder = Recorder::default();

        let out = frames.run(4, &handle.reader(), &mut recorder);
        assert_eq!(out.len(), 4);
        assert_eq!(recorder.seen.len(), 4);
        assert_eq!(frames.frame_count(), 4);
        assert_eq!(out[0].0.delta, 0.0);
        assert_eq!(out[3].0.frame, 3);
        assert_eq!(out[3].0.elapsed, 0.75);
        assert_eq!(out[3].0.delta, 0.25);
    }

    #[test]
    fn edits_are_visible_next_frame() {
        let mut handle = ParamHandle::new(WaveParameters::default()).unwrap();
        let reader = handle.reader();
        let mut frames = FrameLoop::new(FixedClock::sixty_fps());
        let mut recorder = Recorder::default();

        let (_, before) = frames.tick(&reader, &mut recorder);
        handle
            .apply(&ParamEdit::Scalar(ScalarParam::BigWaveSpeed, 0.3))
            .unwrap();
        let (_, after) = frames.tick(&reader, &mut recorder);

        assert_eq!(before, 0.75);
        assert_eq!(after, 0.3);
    }

    #[test]
    fn elapsed_never_goes_backwards() {
        let handle = ParamHandle::new(WaveParameters::default()).unwrap();
        let mut frames = FrameLoop::new(Scripted(vec![1.0, 0.5, f32::NAN, 2.0]));
        let mut recorder = Recorder::default();

        let out = frames.run(4, &handle.reader(), &mut recorder);
        let times: Vec<f32> = out.iter().map(|(f, _)| f.elapsed).collect();
        assert_eq!(times, vec![1.0, 1.0, 1.0, 2.0]);
        assert!(out.iter().all(|(f, _)| f.delta >= 0.0));
    }

    #[test]
    fn system_clock_is_monotonic() {
        let mut clock = SystemClock::new();
        let a = clock.elapsed();
        let b = clock.elapsed();
        assert!(b >= a);
    }
}
