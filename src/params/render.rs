//! Frame rendering and recording configuration.

/// Frame rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Frame width (pixels)
    pub width: u32,

    /// Frame height (pixels)
    pub height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// Frame sequence recording configuration
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Duration to record (seconds)
    pub duration_secs: f32,

    /// Animation time of the first frame (seconds)
    pub start_secs: f32,

    /// Output directory for frames
    pub output_dir: String,

    /// Frame rate (FPS)
    pub fps: u32,
}

impl RecordingConfig {
    pub fn new(duration_secs: f32, output_dir: impl Into<String>) -> Self {
        Self {
            duration_secs,
            start_secs: 0.0,
            output_dir: output_dir.into(),
            fps: 30,
        }
    }

    /// Total number of frames to capture (at least one)
    pub fn total_frames(&self) -> usize {
        ((self.duration_secs * self.fps as f32).ceil() as usize).max(1)
    }

    /// Timestamp of a frame (seconds)
    pub fn frame_time(&self, frame_num: usize) -> f32 {
        self.start_secs + frame_num as f32 / self.fps as f32
    }

    /// Frame image path
    pub fn frame_path(&self, frame_num: usize) -> String {
        format!("{}/frame_{:05}.png", self.output_dir, frame_num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_frames_rounds_up() {
        let mut config = RecordingConfig::new(1.01, "out");
        config.fps = 10;
        assert_eq!(config.total_frames(), 11);
    }

    #[test]
    fn test_zero_duration_still_renders_one_frame() {
        let config = RecordingConfig::new(0.0, "out");
        assert_eq!(config.total_frames(), 1);
        assert_eq!(config.frame_time(0), 0.0);
    }

    #[test]
    fn test_frame_time_offsets_from_start() {
        let mut config = RecordingConfig::new(1.0, "out");
        config.start_secs = 2.0;
        config.fps = 4;
        assert_eq!(config.frame_time(0), 2.0);
        assert_eq!(config.frame_time(2), 2.5);
    }

    #[test]
    fn test_frame_path_is_zero_padded() {
        let config = RecordingConfig::new(2.0, "frames");
        assert_eq!(config.frame_path(7), "frames/frame_00007.png");
    }
}
