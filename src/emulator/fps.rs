use std::time::{Duration, Instant};

/// Estimates the frame rate from the number of frames and the time spent running.
/// Time spent paused is not counted.
#[derive(Debug)]
pub struct FpsCounter {
    frame_count: u64,
    last_time: Instant,
    saved_elapsed: Duration,
    paused: bool,
}

impl FpsCounter {
    pub fn new() -> FpsCounter {
        FpsCounter {
            frame_count: 0,
            last_time: Instant::now(),
            saved_elapsed: Duration::default(),
            paused: false,
        }
    }

    pub fn tick(&mut self) {
        if !self.paused {
            self.frame_count += 1;
        }
    }

    pub fn reset(&mut self) {
        self.frame_count = 0;
        self.last_time = Instant::now();
        self.saved_elapsed = Duration::default();
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.saved_elapsed += self.last_time.elapsed();
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.last_time = Instant::now();
            self.paused = false;
        }
    }

    fn running_time(&self) -> Duration {
        if self.paused {
            self.saved_elapsed
        } else {
            self.saved_elapsed + self.last_time.elapsed()
        }
    }

    pub fn fps(&self) -> f64 {
        let elapsed = self.running_time().as_secs_f64();
        if elapsed > 0.0 {
            self.frame_count as f64 / elapsed
        } else {
            0.0
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn no_frames_is_zero_fps() {
        let counter = FpsCounter::new();
        assert_eq!(0.0, counter.fps());
    }

    #[test]
    fn estimates_frame_rate() {
        let mut counter = FpsCounter::new();
        for _ in 0..10 {
            counter.tick();
        }
        thread::sleep(Duration::from_millis(100));
        let fps = counter.fps();
        // 10 frames in a little over 0.1s
        assert!(fps > 10.0 && fps <= 100.0, "fps was {}", fps);
    }

    #[test]
    fn paused_frames_and_time_are_not_counted() {
        let mut counter = FpsCounter::new();
        counter.tick();
        counter.pause();
        counter.tick();
        assert_eq!(1, counter.frame_count());

        let paused_fps = counter.fps();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(paused_fps, counter.fps());
    }
}
