use std::error::Error;

use gnuplot::*;
use motion_profile_editor::console::{execute, Command};
use motion_profile_editor::{
    Channel, EditorConfig, Emphasis, Frame, MotionProfileEditor, PresentationSink,
    RenderedProfile, ScurvePlanner, Theme,
};

/// Keeps the last rendered profile for plotting.
struct PlotSink {
    latest: Option<RenderedProfile>,
    warning: Option<String>,
}

impl PresentationSink for PlotSink {
    fn present(&mut self, frame: &Frame<'_>) {
        self.latest = frame.profile.cloned();
        self.warning = frame.warning.map(str::to_string);
    }
}

/// `#rrggbb` plus opacity as gnuplot's `#aarrggbb`, where `aa` is transparency.
fn with_opacity(hex: &str, opacity: f64) -> String {
    let alpha = ((1.0 - opacity.clamp(0.0, 1.0)) * 255.0).round() as u8;
    format!("#{alpha:02x}{}", hex.trim_start_matches('#'))
}

fn gridline_color(theme: Theme, emphasis: Emphasis) -> String {
    let base = match emphasis {
        Emphasis::Extreme => theme.foreground(),
        Emphasis::Interior => theme.grid(),
    };
    with_opacity(base, emphasis.opacity())
}

fn plot(profile: &RenderedProfile, theme: Theme) -> Result<(), Box<dyn Error>> {
    let times_ms: Vec<f64> = profile.samples.times().iter().map(|t| t * 1e3).collect();
    let time_axis = &profile.time_axis;
    let (t0, t1) = time_axis.range;

    let mut fg = Figure::new();
    fg.set_multiplot_layout(4, 1);

    for (channel, axis) in Channel::ALL.iter().zip(&profile.axes) {
        let values = profile.samples.channel(*channel);
        let title = format!("{} ({})", channel.label(), channel.unit());

        let axes = fg.axes2d();
        axes.set_title(&title, &[]);
        axes.set_x_label("Time (ms)", &[]);
        axes.set_x_range(Fix(t0), Fix(t1));
        axes.set_y_range(Fix(axis.range.0), Fix(axis.range.1));
        axes.set_x_ticks_custom(
            time_axis
                .ticks
                .iter()
                .zip(&time_axis.labels)
                .map(|(tick, label)| Tick::Major(*tick, Fix(label.clone()))),
            &[],
            &[],
        );
        axes.set_y_ticks_custom(
            axis.ticks
                .iter()
                .map(|tick| Tick::Major(*tick, Fix(tick.to_string()))),
            &[],
            &[],
        );

        for line in &axis.gridlines {
            let color = gridline_color(theme, line.emphasis);
            axes.lines(
                &[t0, t1],
                &[line.position, line.position],
                &[Color(color.as_str()), LineWidth(line.emphasis.line_width())],
            );
        }
        for line in &time_axis.gridlines {
            let color = gridline_color(theme, line.emphasis);
            axes.lines(
                &[line.position, line.position],
                &[axis.range.0, axis.range.1],
                &[Color(color.as_str()), LineWidth(line.emphasis.line_width())],
            );
        }
        axes.lines(&times_ms, &values, &[Color(channel.color()), Caption(channel.label())]);
    }

    fg.show().map_err(|e| format!("Failed to display plot: {e}"))?;
    Ok(())
}

/// Plots the default profile after applying any editor commands given as
/// arguments, e.g. `profile_plot "set q1 150" toggle`.
fn main() -> Result<(), Box<dyn Error>> {
    let config = EditorConfig::default();
    let sink = PlotSink {
        latest: None,
        warning: None,
    };
    let mut editor = MotionProfileEditor::new(&config, ScurvePlanner, sink)?;

    for arg in std::env::args().skip(1) {
        let command: Command = arg.parse()?;
        execute(&mut editor, &command);
    }

    let sink = editor.sink();
    if let Some(warning) = &sink.warning {
        eprintln!("{warning}");
    }
    let profile = sink.latest.as_ref().ok_or("no feasible profile to plot")?;
    plot(profile, config.theme)?;

    let stats = &profile.statistics;
    println!(
        "Plot generated. Total motion time: {:.3} ms, {:.1} % at the velocity limit.",
        stats.total_duration * 1e3,
        stats.max_velocity_percent()
    );
    Ok(())
}
