//! Oscillator kinds and the menu of per-voice waveform pools.

use core::fmt;

/// A single oscillator shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToneKind {
    Sine,
    Square,
    Triangle,
    Saw,
    WhiteNoise,
}

impl ToneKind {
    pub const fn name(self) -> &'static str {
        match self {
            ToneKind::Sine => "sine",
            ToneKind::Square => "square",
            ToneKind::Triangle => "triangle",
            ToneKind::Saw => "saw",
            ToneKind::WhiteNoise => "white noise",
        }
    }
}

/// Waveform menu entry. Each entry selects a pool; every voice draws its own
/// kind from the pool independently.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WaveformChoice {
    #[default]
    RandomAll,
    Sine,
    Square,
    Triangle,
    Saw,
    SineTriangle,
    SquareSaw,
    WhiteNoise,
}

const POOL_ALL: &[ToneKind] = &[
    ToneKind::Sine,
    ToneKind::Square,
    ToneKind::Triangle,
    ToneKind::Saw,
];

impl WaveformChoice {
    /// All menu entries, in menu order.
    pub const MENU: [WaveformChoice; 8] = [
        WaveformChoice::RandomAll,
        WaveformChoice::Sine,
        WaveformChoice::Square,
        WaveformChoice::Triangle,
        WaveformChoice::Saw,
        WaveformChoice::SineTriangle,
        WaveformChoice::SquareSaw,
        WaveformChoice::WhiteNoise,
    ];

    /// Kinds a voice may be rendered with. Never empty.
    pub const fn pool(self) -> &'static [ToneKind] {
        match self {
            WaveformChoice::RandomAll => POOL_ALL,
            WaveformChoice::Sine => &[ToneKind::Sine],
            WaveformChoice::Square => &[ToneKind::Square],
            WaveformChoice::Triangle => &[ToneKind::Triangle],
            WaveformChoice::Saw => &[ToneKind::Saw],
            WaveformChoice::SineTriangle => &[ToneKind::Sine, ToneKind::Triangle],
            WaveformChoice::SquareSaw => &[ToneKind::Square, ToneKind::Saw],
            WaveformChoice::WhiteNoise => &[ToneKind::WhiteNoise],
        }
    }

    /// Menu label.
    pub const fn label(self) -> &'static str {
        match self {
            WaveformChoice::RandomAll => "Random (All)",
            WaveformChoice::Sine => "Sine",
            WaveformChoice::Square => "Square",
            WaveformChoice::Triangle => "Triangle",
            WaveformChoice::Saw => "Saw",
            WaveformChoice::SineTriangle => "Sine + Triangle",
            WaveformChoice::SquareSaw => "Square + Saw",
            WaveformChoice::WhiteNoise => "White Noise",
        }
    }

    /// Look up a menu label. Unrecognized labels fall back to [`WaveformChoice::RandomAll`].
    pub fn from_menu(label: &str) -> Self {
        let label = label.trim();
        Self::MENU
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label))
            .unwrap_or(WaveformChoice::RandomAll)
    }
}

impl fmt::Display for WaveformChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
