use std::io::IsTerminal;

use clap::ValueEnum;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Dark,
  Light,
}

/// Roles text can play in console output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
  Timestamp,
  Primary,
  Accent,
  Label,
  Value,
  Success,
  Muted,
}

impl Tone {
  /// `(dark background, light background)` as RGB.
  const fn palette(self) -> ((u8, u8, u8), (u8, u8, u8)) {
    match self {
      Tone::Timestamp => ((118, 166, 166), (92, 62, 38)),
      Tone::Primary => ((125, 196, 228), (20, 82, 120)),
      Tone::Accent => ((230, 120, 90), (190, 70, 45)),
      Tone::Label => ((217, 164, 4), (150, 96, 20)),
      Tone::Value => ((242, 211, 56), (160, 120, 40)),
      Tone::Success => ((120, 200, 140), (34, 142, 90)),
      Tone::Muted => ((128, 128, 128), (110, 110, 110)),
    }
  }
}

#[derive(Debug, Clone, Copy)]
pub struct Colors {
  enabled: bool,
  theme: Theme,
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self { enabled, theme }
  }

  pub const fn tone(&self, tone: Tone) -> Color {
    if !self.enabled {
      return Color::Reset;
    }
    let (dark, light) = tone.palette();
    let (r, g, b) = match self.theme {
      Theme::Dark => dark,
      Theme::Light => light,
    };
    Color::Rgb { r, g, b }
  }

  /// Same color for `comfy-table` cells.
  pub const fn cell(&self, tone: Tone) -> comfy_table::Color {
    match self.tone(tone) {
      Color::Rgb { r, g, b } => comfy_table::Color::Rgb { r, g, b },
      _ => comfy_table::Color::Reset,
    }
  }

  pub const fn clap_styles() -> clap::builder::Styles {
    use clap::builder::styling::{Color as ClapColor, RgbColor, Style, Styles};

    const fn fg(tone: Tone) -> Option<ClapColor> {
      let ((r, g, b), _) = tone.palette();
      Some(ClapColor::Rgb(RgbColor(r, g, b)))
    }

    Styles::styled()
      .header(Style::new().bold().underline().fg_color(fg(Tone::Label)))
      .usage(Style::new().bold().fg_color(fg(Tone::Label)))
      .literal(Style::new().fg_color(fg(Tone::Success)))
      .placeholder(Style::new().fg_color(fg(Tone::Primary)))
      .error(Style::new().bold().fg_color(fg(Tone::Accent)))
      .valid(Style::new().fg_color(fg(Tone::Success)))
      .invalid(Style::new().bold().fg_color(fg(Tone::Accent)))
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => std::env::var("COLORFGBG")
      .ok()
      .as_deref()
      .and_then(theme_from_colorfgbg)
      .unwrap_or(Theme::Dark),
  }
}

/// `COLORFGBG` is `fg;bg`; background colors 8 and above are the bright ones.
fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
  let background = value.split(';').next_back()?.parse::<u8>().ok()?;
  Some(if background >= 8 { Theme::Light } else { Theme::Dark })
}
