use eframe::egui::Color32;

#[derive(Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color32,
    pub panel_background: Color32,
    pub text_color: Color32,
    pub accent_color: Color32,
    pub board_light: Color32,
    pub board_dark: Color32,
    pub queen_color: Color32,
    /// Tint over the row the current step acts on.
    pub active_row: Color32,
    /// Outline around queens flagged by "Check Answer".
    pub conflict: Color32,
}

impl Theme {
    pub fn presets() -> Vec<Self> {
        vec![
            Self {
                name: "Sleek Dark",
                background: Color32::from_rgb(15, 23, 42),
                panel_background: Color32::from_rgb(30, 41, 59),
                text_color: Color32::from_rgb(226, 232, 240),
                accent_color: Color32::from_rgb(99, 102, 241),
                board_light: Color32::from_rgb(241, 245, 249),
                board_dark: Color32::from_rgb(100, 116, 139),
                queen_color: Color32::from_rgb(15, 23, 42),
                active_row: Color32::from_rgba_unmultiplied(99, 102, 241, 90),
                conflict: Color32::from_rgb(239, 68, 68),
            },
            Self {
                name: "Rose Board",
                background: Color32::from_rgb(40, 30, 36),
                panel_background: Color32::from_rgb(60, 44, 54),
                text_color: Color32::from_rgb(245, 230, 236),
                accent_color: Color32::from_rgb(249, 130, 207),
                board_light: Color32::from_rgb(249, 220, 220),
                board_dark: Color32::from_rgb(136, 134, 134),
                queen_color: Color32::from_rgb(17, 17, 17),
                active_row: Color32::from_rgba_unmultiplied(249, 130, 207, 128),
                conflict: Color32::from_rgb(201, 20, 92),
            },
            Self {
                name: "Classic Wood",
                background: Color32::from_rgb(45, 25, 10),
                panel_background: Color32::from_rgb(70, 40, 20),
                text_color: Color32::from_rgb(245, 230, 200),
                accent_color: Color32::from_rgb(180, 100, 40),
                board_light: Color32::from_rgb(210, 180, 140),
                board_dark: Color32::from_rgb(139, 69, 19),
                queen_color: Color32::from_rgb(45, 25, 10),
                active_row: Color32::from_rgba_unmultiplied(255, 200, 120, 90),
                conflict: Color32::from_rgb(220, 30, 30),
            },
            Self {
                name: "Paper",
                background: Color32::from_rgb(240, 240, 230),
                panel_background: Color32::from_rgb(220, 220, 210),
                text_color: Color32::from_rgb(50, 50, 50),
                accent_color: Color32::from_rgb(200, 50, 50),
                board_light: Color32::from_rgb(255, 255, 250),
                board_dark: Color32::from_rgb(200, 200, 190),
                queen_color: Color32::from_rgb(20, 20, 20),
                active_row: Color32::from_rgba_unmultiplied(255, 141, 161, 110),
                conflict: Color32::from_rgb(255, 59, 48),
            },
        ]
    }

    /// Preset called `name`, falling back to the first one.
    pub fn by_name(name: &str) -> Self {
        Self::presets()
            .into_iter()
            .find(|t| t.name == name)
            .unwrap_or_default()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::presets()[0].clone()
    }
}
