use eframe::egui::{
    self,
    style::{
        Selection,
        WidgetVisuals,
        Widgets,
    },
    Color32,
    RichText,
    Stroke,
    Visuals,
};

use crate::persistence::ThemeKey;

#[derive(Clone, Debug)]
pub struct Palette {
    dark: bool,
    background: Color32,
    surface: Color32,
    raised: Color32,
    border: Color32,
    foreground: Color32,
    muted: Color32,
    accent: Color32,
    answer: Color32,
    error: Color32,
}

impl Palette {
    pub fn for_key(key: ThemeKey) -> Self {
        match key {
            ThemeKey::Slate => Self::slate(),
            ThemeKey::Paper => Self::paper(),
            ThemeKey::Forest => Self::forest(),
        }
    }

    fn slate() -> Self {
        Self {
            dark: true,
            background: Color32::from_rgb(30, 34, 42),
            surface: Color32::from_rgb(38, 43, 53),
            raised: Color32::from_rgb(52, 58, 71),
            border: Color32::from_rgb(70, 78, 94),
            foreground: Color32::from_rgb(226, 230, 238),
            muted: Color32::from_rgb(140, 150, 168),
            accent: Color32::from_rgb(122, 176, 255),
            answer: Color32::from_rgb(245, 196, 120),
            error: Color32::from_rgb(240, 110, 110),
        }
    }

    fn paper() -> Self {
        Self {
            dark: false,
            background: Color32::from_rgb(250, 247, 240),
            surface: Color32::from_rgb(242, 237, 226),
            raised: Color32::from_rgb(255, 253, 248),
            border: Color32::from_rgb(214, 204, 184),
            foreground: Color32::from_rgb(48, 42, 36),
            muted: Color32::from_rgb(120, 110, 96),
            accent: Color32::from_rgb(176, 86, 48),
            answer: Color32::from_rgb(36, 104, 140),
            error: Color32::from_rgb(190, 60, 50),
        }
    }

    fn forest() -> Self {
        Self {
            dark: true,
            background: Color32::from_rgb(24, 36, 30),
            surface: Color32::from_rgb(31, 46, 38),
            raised: Color32::from_rgb(44, 64, 53),
            border: Color32::from_rgb(62, 88, 72),
            foreground: Color32::from_rgb(222, 236, 226),
            muted: Color32::from_rgb(136, 166, 148),
            accent: Color32::from_rgb(134, 214, 150),
            answer: Color32::from_rgb(232, 214, 140),
            error: Color32::from_rgb(236, 120, 104),
        }
    }

    pub fn front_text(&self, content: &str) -> RichText {
        RichText::new(content).color(self.foreground).size(32.0).strong()
    }

    pub fn back_text(&self, content: &str) -> RichText {
        RichText::new(content).color(self.answer).size(22.0)
    }

    pub fn muted(&self, content: &str) -> RichText {
        RichText::new(content).color(self.muted)
    }

    pub fn accent(&self) -> Color32 {
        self.accent
    }

    pub fn raised(&self) -> Color32 {
        self.raised
    }

    pub fn border(&self) -> Color32 {
        self.border
    }
}

pub fn set_theme(ctx: &egui::Context, key: ThemeKey) -> Palette {
    let palette = Palette::for_key(key);
    ctx.set_visuals(visuals_for(&palette));
    palette
}

fn widget(base: WidgetVisuals, fill: Color32, stroke: Color32, text: Color32) -> WidgetVisuals {
    WidgetVisuals {
        bg_fill: fill,
        weak_bg_fill: fill,
        bg_stroke: Stroke { color: stroke, ..base.bg_stroke },
        fg_stroke: Stroke { color: text, ..base.fg_stroke },
        ..base
    }
}

fn visuals_for(palette: &Palette) -> Visuals {
    let default = if palette.dark { Visuals::dark() } else { Visuals::light() };

    Visuals {
        dark_mode: palette.dark,
        widgets: Widgets {
            noninteractive: widget(
                default.widgets.noninteractive,
                palette.background,
                palette.border,
                palette.foreground,
            ),
            inactive: widget(
                default.widgets.inactive,
                palette.raised,
                palette.border,
                palette.foreground,
            ),
            hovered: widget(
                default.widgets.hovered,
                palette.raised,
                palette.accent,
                palette.foreground,
            ),
            active: widget(
                default.widgets.active,
                palette.surface,
                palette.accent,
                palette.foreground,
            ),
            open: widget(default.widgets.open, palette.surface, palette.accent, palette.foreground),
        },
        selection: Selection {
            bg_fill: palette.accent.linear_multiply(0.4),
            stroke: Stroke { color: palette.foreground, ..default.selection.stroke },
        },
        hyperlink_color: palette.accent,
        faint_bg_color: palette.surface,
        extreme_bg_color: palette.surface,
        error_fg_color: palette.error,
        window_fill: palette.background,
        window_stroke: Stroke { color: palette.border, ..default.window_stroke },
        panel_fill: palette.background,
        ..default
    }
}
