use eframe::egui::{
    self,
    epaint::Shadow,
    style::{
        Selection,
        WidgetVisuals,
        Widgets,
    },
    Color32,
    Stroke,
    Visuals,
};

use crate::core::models::Flavor;

#[derive(Clone)]
pub struct Theme {
    dark: Palette,
    light: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::tokyo()
    }
}

impl Theme {
    pub fn tokyo() -> Self {
        Theme { dark: Palette::tokyo_night_storm(), light: Palette::tokyo_night_light() }
    }

    pub fn palette(&self, ctx: &egui::Context) -> &Palette {
        if ctx.style().visuals.dark_mode {
            &self.dark
        } else {
            &self.light
        }
    }

    pub fn like(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).green
    }

    pub fn dislike(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).red
    }

    pub fn accent(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).purple
    }

    pub fn card_fill(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).background_light
    }

    pub fn flavor(&self, ctx: &egui::Context, flavor: Flavor) -> Color32 {
        let palette = self.palette(ctx);
        match flavor {
            Flavor::Spicy => palette.red,
            Flavor::Sweet => palette.pink,
            Flavor::Creamy => palette.yellow,
        }
    }
}

#[derive(Clone)]
pub struct Palette {
    background: Color32,
    foreground: Color32,
    selection: Color32,
    red: Color32,
    orange: Color32,
    yellow: Color32,
    green: Color32,
    purple: Color32,
    cyan: Color32,
    pink: Color32,
    background_darker: Color32,
    background_dark: Color32,
    background_light: Color32,
}

impl Palette {
    fn tokyo_night_storm() -> Self {
        Self {
            background: Color32::from_rgb(23, 24, 38),
            foreground: Color32::from_rgb(204, 204, 204),
            selection: Color32::from_rgb(68, 71, 90),
            red: Color32::from_rgb(255, 121, 121),
            orange: Color32::from_rgb(255, 161, 90),
            yellow: Color32::from_rgb(241, 250, 140),
            green: Color32::from_rgb(86, 209, 123),
            purple: Color32::from_rgb(189, 147, 249),
            cyan: Color32::from_rgb(97, 175, 239),
            pink: Color32::from_rgb(255, 85, 255),
            background_darker: Color32::from_rgb(19, 20, 32),
            background_dark: Color32::from_rgb(27, 29, 45),
            background_light: Color32::from_rgb(42, 44, 66),
        }
    }

    fn tokyo_night_light() -> Self {
        Self {
            background: Color32::from_rgb(240, 240, 250),
            foreground: Color32::from_rgb(40, 40, 40),
            selection: Color32::from_rgb(200, 200, 230),
            red: Color32::from_rgb(200, 80, 80),
            orange: Color32::from_rgb(220, 140, 60),
            yellow: Color32::from_rgb(200, 170, 60),
            green: Color32::from_rgb(80, 180, 100),
            purple: Color32::from_rgb(150, 120, 200),
            cyan: Color32::from_rgb(80, 160, 200),
            pink: Color32::from_rgb(200, 100, 200),
            background_darker: Color32::from_rgb(220, 220, 240),
            background_dark: Color32::from_rgb(230, 230, 245),
            background_light: Color32::from_rgb(255, 255, 255),
        }
    }
}

/// Registers both palettes and switches to the requested one.
pub fn set_theme(ctx: &egui::Context, theme: &Theme, dark_mode: bool) {
    set_theme_variant(ctx, &theme.dark, true);
    set_theme_variant(ctx, &theme.light, false);

    ctx.options_mut(|o| {
        o.theme_preference =
            if dark_mode { egui::ThemePreference::Dark } else { egui::ThemePreference::Light };
    });
}

fn widget(default: WidgetVisuals, fill: Color32, stroke: Color32, text: Color32) -> WidgetVisuals {
    WidgetVisuals {
        bg_fill: fill,
        weak_bg_fill: fill,
        bg_stroke: Stroke { color: stroke, ..default.bg_stroke },
        fg_stroke: Stroke { color: text, ..default.fg_stroke },
        ..default
    }
}

fn set_theme_variant(ctx: &egui::Context, palette: &Palette, is_dark: bool) {
    let (default, variant) = match is_dark {
        true => (Visuals::dark(), egui::Theme::Dark),
        false => (Visuals::light(), egui::Theme::Light),
    };
    let p = palette;

    ctx.set_visuals_of(
        variant,
        Visuals {
            dark_mode: is_dark,
            widgets: Widgets {
                noninteractive: widget(
                    default.widgets.noninteractive,
                    p.background,
                    p.background_dark,
                    p.foreground,
                ),
                inactive: widget(default.widgets.inactive, p.background_light, p.background_dark, p.foreground),
                hovered: widget(default.widgets.hovered, p.selection, p.cyan, p.foreground),
                active: widget(default.widgets.active, p.selection, p.cyan, p.foreground),
                open: widget(default.widgets.open, p.background_dark, p.purple, p.foreground),
            },
            selection: Selection {
                bg_fill: p.selection,
                stroke: Stroke { color: p.foreground, ..default.selection.stroke },
            },
            hyperlink_color: p.cyan,
            faint_bg_color: p.background_darker,
            extreme_bg_color: p.background_darker,
            error_fg_color: p.red,
            warn_fg_color: p.orange,
            window_shadow: Shadow { color: p.background_darker, ..default.window_shadow },
            window_fill: p.background,
            window_stroke: Stroke { color: p.background_light, ..default.window_stroke },
            panel_fill: p.background_dark,
            ..default
        },
    );
}
