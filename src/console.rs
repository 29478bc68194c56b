//! Line-oriented operator surface: command parsing and a text sink.

use std::io::Write;
use std::str::FromStr;

use log::warn;

use crate::config::Theme;
use crate::editor::{Frame, MotionProfileEditor, PresentationSink, Update};
use crate::error::CommandError;
use crate::evaluator::ProfileEvaluator;
use crate::parameters::ParameterId;
use crate::sampler::Channel;
use crate::statistics::LimitCategory;

pub const HELP: &str = "\
commands:
  set <param> <value>    set the precise value
  coarse <param> <step>  set the coarse (integer step) value
  reset [param]          restore one parameter, or all of them
  toggle                 switch between S-curve and trapezoidal mode
  show                   print the current state again
  help                   this text
  quit                   leave the editor
parameters: vmax amax jmax q0 q1 v0 v1 (or their full names, e.g. jerk_limit)";

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Set(ParameterId, f64),
    Coarse(ParameterId, i64),
    Reset(Option<ParameterId>),
    Toggle,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(Command::Show);
        };
        let command = match verb.to_ascii_lowercase().as_str() {
            "set" => {
                let id = parameter(words.next())?;
                let raw = words.next().ok_or(CommandError::MissingArgument("value"))?;
                let value = raw
                    .parse::<f64>()
                    .map_err(|_| CommandError::InvalidNumber(raw.to_string()))?;
                Command::Set(id, value)
            }
            "coarse" => {
                let id = parameter(words.next())?;
                let raw = words.next().ok_or(CommandError::MissingArgument("step"))?;
                let step = raw
                    .parse::<i64>()
                    .map_err(|_| CommandError::InvalidNumber(raw.to_string()))?;
                Command::Coarse(id, step)
            }
            "reset" => Command::Reset(
                words
                    .next()
                    .map(|word| word.parse::<ParameterId>())
                    .transpose()?,
            ),
            "toggle" | "mode" => Command::Toggle,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn parameter(word: Option<&str>) -> Result<ParameterId, CommandError> {
    let word = word.ok_or(CommandError::MissingArgument("parameter"))?;
    Ok(word.parse()?)
}

/// Runs an editing command. `Help` and `Quit` belong to the caller and
/// return `None`, as does `Show`, which only re-presents.
pub fn execute<E, S>(editor: &mut MotionProfileEditor<E, S>, command: &Command) -> Option<Update>
where
    E: ProfileEvaluator,
    S: PresentationSink,
{
    match *command {
        Command::Set(id, value) => Some(editor.set_precise(id, value)),
        Command::Coarse(id, step) => Some(editor.set_coarse(id, step)),
        Command::Reset(Some(id)) => Some(editor.reset(id)),
        Command::Reset(None) => Some(editor.reset_all()),
        Command::Toggle => Some(editor.toggle_mode()),
        Command::Show => {
            editor.present();
            None
        }
        Command::Help | Command::Quit => None,
    }
}

/// Prints every frame as text.
pub struct TextSink<W> {
    out: W,
    theme: Theme,
    plain: bool,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W, theme: Theme) -> Self {
        Self {
            out,
            theme,
            plain: false,
        }
    }

    /// Disables ANSI colours.
    pub fn plain(mut self) -> Self {
        self.plain = true;
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn paint(&self, hex: &str, text: &str) -> String {
        match (self.plain, rgb(hex)) {
            (false, Some((r, g, b))) => format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    }

    fn write_frame(&mut self, frame: &Frame<'_>) -> std::io::Result<()> {
        let heading = self.paint(self.theme.foreground(), &format!("[{}]", frame.mode.label()));
        writeln!(self.out, "{heading}")?;

        for param in frame.parameters.iter() {
            let id = param.id();
            let lock = if param.is_enabled() { "" } else { " (locked)" };
            writeln!(
                self.out,
                "  {:<5} {:<20} {:>16} {:<13} coarse {}{}",
                id.alias(),
                id.label(),
                format_value(param.value()),
                id.unit(),
                param.coarse(),
                lock
            )?;
        }

        if let Some(profile) = frame.profile {
            let stats = &profile.statistics;
            writeln!(self.out, "  duration {:.3} ms", stats.total_duration * 1e3)?;
            for category in LimitCategory::ALL {
                let dwell = stats.dwell(category);
                writeln!(
                    self.out,
                    "  at {:<17} {:>9.3} ms {:>6.1} %",
                    category.label(),
                    dwell.time * 1e3,
                    dwell.percent
                )?;
            }
            for (channel, axis) in Channel::ALL.iter().zip(&profile.axes) {
                let ticks: Vec<String> = axis.ticks.iter().map(|t| format_value(*t)).collect();
                let label = self.paint(channel.color(), &format!("{:<12}", channel.label()));
                writeln!(
                    self.out,
                    "  {label} [{}, {}] ticks {}",
                    format_value(axis.range.0),
                    format_value(axis.range.1),
                    ticks.join(" ")
                )?;
            }
            let time: Vec<&str> = profile
                .time_axis
                .labels
                .iter()
                .filter(|l| !l.is_empty())
                .map(String::as_str)
                .collect();
            writeln!(self.out, "  {:<12} ms {}", "Time", time.join(" "))?;
        }

        if let Some(warning) = frame.warning {
            let warning = self.paint("#ff453a", warning);
            writeln!(self.out, "{warning}")?;
        }
        self.out.flush()
    }
}

impl<W: Write> PresentationSink for TextSink<W> {
    fn present(&mut self, frame: &Frame<'_>) {
        if let Err(err) = self.write_frame(frame) {
            warn!("failed to write frame: {err}");
        }
    }
}

/// Up to three decimals, trailing zeros dropped.
fn format_value(value: f64) -> String {
    if value.abs() >= 1e6 {
        return format!("{value:.3e}");
    }
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
