use std::collections::BTreeMap;
use std::fs;
use std::io;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackedObject {
    pub id: String,
    pub pos: (f64, f64, f64),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FramePosition {
    pub id: String,
    pub pos: (f64, f64, f64),
    pub vel: (f64, f64, f64),
}

/// Trajectory records the simulated frames of a set of springs for playback.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Trajectory {
    objects: Vec<TrackedObject>,
    frames: BTreeMap<usize, Vec<FramePosition>>,
}

impl Trajectory {
    pub fn new(objects: Vec<TrackedObject>) -> Self {
        Trajectory {
            objects,
            frames: BTreeMap::new(),
        }
    }

    /// Frame orders must be strictly increasing.
    pub fn add_frame(&mut self, frame_order: usize, frame: Vec<FramePosition>) -> Result<(), String> {
        if let Some(last) = self.frames.keys().next_back() {
            if frame_order <= *last {
                return Err(format!(
                    "frame order {} incompatible, last recorded frame is {}",
                    frame_order, last
                ));
            }
        }
        self.frames.insert(frame_order, frame);
        Ok(())
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self, frame_order: usize) -> Option<&Vec<FramePosition>> {
        self.frames.get(&frame_order)
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("failed to serialize trajectory: {}", e))
    }

    pub fn save(&self, file_path: &str) -> Result<(), String> {
        let f = fs::File::create(file_path)
            .map_err(|e| format!("failed to create {}: {}", file_path, e))?;
        let buf_writer = io::BufWriter::new(f);
        serde_json::to_writer(buf_writer, self)
            .map_err(|e| format!("failed to write trajectory to {}: {}", file_path, e))
    }
}
