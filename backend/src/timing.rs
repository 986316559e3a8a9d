/// Millisecond time source and blocking delay.
pub trait Clock {
    fn ticks_ms(&self) -> u32;
    fn delay_ms(&mut self, ms: u32);
}

pub struct SdlClock {
    timer: sdl2::TimerSubsystem,
}

impl SdlClock {
    pub fn new(timer: sdl2::TimerSubsystem) -> Self {
        SdlClock { timer }
    }
}

impl Clock for SdlClock {
    fn ticks_ms(&self) -> u32 {
        self.timer.ticks()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.timer.delay(ms);
    }
}

/// Caps the frame rate and keeps a smoothed FPS figure.
pub struct FrameLimiter<C: Clock> {
    clock: C,
    frame_start: u32,
    fps_previous: f32,
    fps_average: f32,
}

impl<C: Clock> FrameLimiter<C> {
    pub fn new(clock: C) -> Self {
        FrameLimiter {
            clock,
            frame_start: 0,
            fps_previous: 0.0,
            fps_average: 0.0,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn set_frame_start(&mut self) {
        self.frame_start = self.clock.ticks_ms();
    }

    /// Sleeps out whatever is left of a `delay_ms` frame, then folds the
    /// frame's rate into the average (the last two frames weigh 1/10 each).
    pub fn adjust_fps_delay(&mut self, delay_ms: u32) {
        let elapsed = self.clock.ticks_ms().wrapping_sub(self.frame_start);
        if elapsed < delay_ms {
            self.clock.delay_ms(delay_ms - elapsed);
        }

        let frame_ms = self.clock.ticks_ms().wrapping_sub(self.frame_start).max(1);
        let fps_current = 1000.0 / frame_ms as f32;
        self.fps_average = (fps_current + self.fps_previous + self.fps_average * 8.0) / 10.0;
        self.fps_previous = fps_current;
    }

    pub fn average_fps(&self) -> f32 {
        self.fps_average
    }
}
