//! Host-side parameter and output slots for the clock node

/// Knob and button values read at the start of each step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Controls {
    /// Resync button, `1.0` while pressed.
    pub sync_trigger: f32,
    /// Phase offset, nominally [-1, 1].
    pub offset: f32,
    /// Swing amount, nominally [0, 1].
    pub swing: f32,
}

impl Controls {
    pub fn new(offset: f32, swing: f32) -> Self {
        Controls {
            sync_trigger: 0.0,
            offset,
            swing,
        }
    }

    pub fn with_sync_trigger(mut self, pressed: bool) -> Self {
        self.sync_trigger = if pressed { 1.0 } else { 0.0 };
        self
    }

    /// Only an exact `1.0` counts as a resync request.
    pub fn sync_requested(&self) -> bool {
        self.sync_trigger == 1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Clock = 0,
    Reset,
}

impl Output {
    pub const COUNT: usize = 2;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Light {
    Clock = 0,
    Reset,
    /// Lit while the node is searching for lock.
    Sync,
}

impl Light {
    pub const COUNT: usize = 3;
}

/// Where the node writes its gates and light brightnesses.
pub trait OutputSink {
    fn output(&self, output: Output) -> f32;
    fn set_output(&mut self, output: Output, value: f32);
    fn set_light(&mut self, light: Light, brightness: f32);
}

/// Plain slot storage standing in for the host's output and light buffers.
///
/// Slots keep their last written value between steps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortBuffer {
    outputs: [f32; Output::COUNT],
    lights: [f32; Light::COUNT],
    writes: u64,
}

impl PortBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn light(&self, light: Light) -> f32 {
        self.lights[light as usize]
    }

    /// Number of output writes since creation.
    pub fn output_writes(&self) -> u64 {
        self.writes
    }
}

impl OutputSink for PortBuffer {
    fn output(&self, output: Output) -> f32 {
        self.outputs[output as usize]
    }

    fn set_output(&mut self, output: Output, value: f32) {
        self.outputs[output as usize] = value;
        self.writes += 1;
    }

    fn set_light(&mut self, light: Light, brightness: f32) {
        self.lights[light as usize] = brightness.clamp(0.0, 1.0);
    }
}
