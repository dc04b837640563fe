// ui.rs

use crate::config::TICKS_PER_BAR;
use crate::error::{LinkPulseError, Result};
use crate::host::{Light, Output, OutputSink, PortBuffer};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

const REFRESH_HZ: u8 = 20;

fn style(template: &str) -> Result<ProgressStyle> {
    ProgressStyle::default_bar()
        .template(template)
        .map_err(|e| LinkPulseError::Display(e.to_string()))
}

fn create_tick_progress(multi_progress: &MultiProgress) -> Result<ProgressBar> {
    let pb = multi_progress.add(ProgressBar::new(u64::from(TICKS_PER_BAR)));
    pb.set_style(style("{prefix:.bold} [{bar:64.cyan}] {pos:>3}/{len}")?.progress_chars("⣀⣤⣦⣶⣷⣿ "));
    pb.set_prefix("Tick");
    Ok(pb)
}

fn create_status_line(multi_progress: &MultiProgress) -> Result<ProgressBar> {
    let pb = multi_progress.add(ProgressBar::new_spinner());
    pb.set_style(style("{prefix:.bold.dim} {wide_msg}")?);
    pb.set_prefix("Gates");
    Ok(pb)
}

fn lamp(brightness: f32) -> char {
    if brightness > 0.5 {
        '●'
    } else {
        '○'
    }
}

/// Renders the node's lights and gate levels as a line a human can follow.
pub fn status_message(ports: &PortBuffer) -> String {
    format!(
        "clock {} {:>4.1}V  reset {} {:>4.1}V  searching {}",
        lamp(ports.light(Light::Clock)),
        ports.output(Output::Clock),
        lamp(ports.light(Light::Reset)),
        ports.output(Output::Reset),
        lamp(ports.light(Light::Sync)),
    )
}

/// Terminal view of one clock node.
pub struct PulseDisplay {
    #[allow(dead_code)]
    multi_progress: MultiProgress,
    tick_pb: ProgressBar,
    status_pb: ProgressBar,
}

impl PulseDisplay {
    pub fn new() -> Result<Self> {
        let multi_progress =
            MultiProgress::with_draw_target(ProgressDrawTarget::stderr_with_hz(REFRESH_HZ));
        let tick_pb = create_tick_progress(&multi_progress)?;
        let status_pb = create_status_line(&multi_progress)?;

        Ok(PulseDisplay {
            multi_progress,
            tick_pb,
            status_pb,
        })
    }

    pub fn update(&self, tick: u32, ports: &PortBuffer) {
        self.tick_pb.set_position(u64::from(tick));
        self.status_pb.set_message(status_message(ports));
    }

    pub fn finish(&self) {
        self.tick_pb.finish_and_clear();
        self.status_pb.finish_and_clear();
    }
}
