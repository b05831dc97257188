use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub fg: Color,
    pub bg: Color,
    pub dim: Color,
    pub border: Color,
    pub accent: Color,
    pub input_accent: Color,
    pub title: Color,
    pub error: Color,
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        dark()
    }
}

pub fn by_name(name: &str) -> Theme {
    match name {
        "dark" => dark(),
        "light" => light(),
        "solarized-dark" => solarized_dark(),
        "no-color" => no_color(),
        _ => dark(),
    }
}

pub const THEME_NAMES: &[&str] = &["dark", "light", "solarized-dark", "no-color"];

// -- Themes --

pub fn dark() -> Theme {
    Theme {
        fg: Color::Indexed(253),
        bg: Color::Reset,
        dim: Color::Indexed(243),
        border: Color::Indexed(240),
        accent: Color::Indexed(81),
        input_accent: Color::Indexed(220),
        title: Color::Indexed(255),
        error: Color::Indexed(196),
        success: Color::Indexed(46),
    }
}

pub fn light() -> Theme {
    Theme {
        fg: Color::Indexed(235),
        bg: Color::Indexed(255),
        dim: Color::Indexed(245),
        border: Color::Indexed(250),
        accent: Color::Indexed(26),
        input_accent: Color::Indexed(130),
        title: Color::Indexed(232),
        error: Color::Indexed(124),
        success: Color::Indexed(28),
    }
}

pub fn solarized_dark() -> Theme {
    Theme {
        fg: Color::Indexed(244),
        bg: Color::Indexed(234),
        dim: Color::Indexed(240),
        border: Color::Indexed(239),
        accent: Color::Indexed(37),
        input_accent: Color::Indexed(136),
        title: Color::Indexed(230),
        error: Color::Indexed(160),
        success: Color::Indexed(106),
    }
}

pub fn no_color() -> Theme {
    Theme {
        fg: Color::Reset,
        bg: Color::Reset,
        dim: Color::Reset,
        border: Color::Reset,
        accent: Color::Reset,
        input_accent: Color::Reset,
        title: Color::Reset,
        error: Color::Reset,
        success: Color::Reset,
    }
}
