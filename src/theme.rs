use iced::{Background, Color};

/// Which palette the page uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// All colors and font sizes used by the page, derived from the active theme.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Text
    pub text: Color,
    pub muted: Color,
    pub hover_text: Color,
    // Surfaces
    pub background: Color,
    pub placeholder: Color,
    pub dot: Color,
    // Font sizes (logical pixels)
    /// Both masthead lines
    pub headline: f32,
    pub link_text: f32,
    pub caption_text: f32,
    /// The "Works with touchpad" hint
    pub hint_text: f32,
}

impl ThemeColors {
    /// Light theme: near-black type on off-white paper.
    pub fn light() -> Self {
        Self {
            text: Color {
                r: 0.08,
                g: 0.08,
                b: 0.08,
                a: 1.0,
            },
            muted: Color {
                r: 0.35,
                g: 0.35,
                b: 0.35,
                a: 0.8,
            },
            hover_text: Color {
                r: 0.6,
                g: 0.35,
                b: 0.0,
                a: 1.0,
            },
            background: Color {
                r: 0.97,
                g: 0.96,
                b: 0.94,
                a: 1.0,
            },
            placeholder: Color {
                r: 0.88,
                g: 0.87,
                b: 0.85,
                a: 1.0,
            },
            dot: Color {
                r: 0.08,
                g: 0.08,
                b: 0.08,
                a: 0.6,
            },
            headline: 32.0,
            link_text: 14.0,
            caption_text: 13.0,
            hint_text: 11.0,
        }
    }

    /// Dark theme: the same layout in white on charcoal.
    pub fn dark() -> Self {
        Self {
            text: Color {
                r: 1.0,
                g: 1.0,
                b: 1.0,
                a: 0.9,
            },
            muted: Color {
                r: 1.0,
                g: 1.0,
                b: 1.0,
                a: 0.45,
            },
            hover_text: Color {
                r: 1.0,
                g: 0.78,
                b: 0.0,
                a: 1.0,
            },
            background: Color {
                r: 0.07,
                g: 0.07,
                b: 0.08,
                a: 1.0,
            },
            placeholder: Color {
                r: 0.15,
                g: 0.15,
                b: 0.18,
                a: 1.0,
            },
            dot: Color {
                r: 1.0,
                g: 1.0,
                b: 1.0,
                a: 0.6,
            },
            headline: 32.0,
            link_text: 14.0,
            caption_text: 13.0,
            hint_text: 11.0,
        }
    }

    pub fn placeholder_style(&self) -> impl Fn(&iced::Theme) -> iced::widget::container::Style {
        let color = self.placeholder;
        move |_theme: &iced::Theme| iced::widget::container::Style {
            background: Some(Background::Color(color)),
            ..Default::default()
        }
    }

    pub fn dot_style(&self) -> impl Fn(&iced::Theme) -> iced::widget::container::Style {
        let color = self.dot;
        move |_theme: &iced::Theme| iced::widget::container::Style {
            background: Some(Background::Color(color)),
            border: iced::Border {
                radius: 3.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

pub fn resolve(mode: ThemeMode) -> ThemeColors {
    match mode {
        ThemeMode::Light => ThemeColors::light(),
        ThemeMode::Dark => ThemeColors::dark(),
    }
}
