use serde::Deserialize;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Spool directory the backend syncs message records into
    pub feed_dir: String,
    pub layout: LayoutConfig,
    pub reveal: RevealConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Rows each feed entry occupies in the list
    pub item_height: usize,
    /// Extra rows of items rendered beyond each viewport edge
    pub buffer_count: usize,
    /// Width percentage for list pane when focused (preview gets the rest)
    pub list_focused_width: u16,
    /// Width percentage for preview pane when focused (list gets the rest)
    pub preview_focused_width: u16,
    /// Date column width in characters
    pub date_width: usize,
    /// Sender column width in characters
    pub sender_width: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Items unlocked for windowing when the list mounts
    pub initial_count: usize,
    /// Items added per reveal cycle
    pub increment: usize,
    /// Distance from the bottom of the revealed block, in list rows,
    /// under which the next cycle arms
    pub near_bottom_threshold: usize,
    /// Cosmetic smoothing before an armed cycle lands; zero is fine
    pub delay_ms: u64,
}

/// Semantic theme configuration, hex or named colors
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    // Base colors
    pub bg: String,
    pub bg_panel: String,
    pub fg: String,
    pub fg_muted: String,
    pub fg_subtle: String,

    // Border colors
    pub border: String,
    pub border_subtle: String,
    pub border_active: String,

    // Accent colors
    pub primary: String,
    pub secondary: String,
    pub success: String,
    pub warning: String,

    // Feed-specific mappings
    pub selected_bg: String,
    pub priority: String,
    pub promotional: String,
    pub done: String,
    pub snoozed: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_dir: shellexpand::tilde("~/.local/share/feedtui/feed").into_owned(),
            layout: LayoutConfig::default(),
            reveal: RevealConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            item_height: 2,
            buffer_count: 4,
            list_focused_width: 62,
            preview_focused_width: 62,
            date_width: 12,
            sender_width: 18,
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            initial_count: 20,
            increment: 20,
            near_bottom_threshold: 8,
            delay_ms: 120,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            bg: "#17191c".to_string(),
            bg_panel: "#21242a".to_string(),
            fg: "#e8eaed".to_string(),
            fg_muted: "#80858c".to_string(),
            fg_subtle: "#aeb3ba".to_string(),

            border: "#4a4f57".to_string(),
            border_subtle: "#31353c".to_string(),
            border_active: "#7aa2f7".to_string(),

            primary: "#7aa2f7".to_string(),
            secondary: "#89b4a3".to_string(),
            success: "#52c41a".to_string(),
            warning: "#faad14".to_string(),

            selected_bg: "#31353c".to_string(),
            priority: "#f7768e".to_string(),
            promotional: "#9a7ecc".to_string(),
            done: "#5c636b".to_string(),
            snoozed: "#b8a35f".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let config_path = dirs::config_dir()
            .map(|p| p.join("feedtui/config.toml"))
            .unwrap_or_else(|| PathBuf::from("~/.config/feedtui/config.toml"));

        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str::<Config>(&content) {
                    Ok(mut config) => {
                        config.feed_dir = shellexpand::tilde(&config.feed_dir).into_owned();
                        return config;
                    }
                    Err(e) => warn!(path = %config_path.display(), "config parse error: {e}"),
                },
                Err(e) => warn!(path = %config_path.display(), "config read error: {e}"),
            }
        }

        Self::default()
    }
}

impl ThemeConfig {
    pub fn bg(&self) -> ratatui::style::Color {
        parse_color(&self.bg)
    }
    pub fn bg_panel(&self) -> ratatui::style::Color {
        parse_color(&self.bg_panel)
    }
    pub fn fg(&self) -> ratatui::style::Color {
        parse_color(&self.fg)
    }
    pub fn fg_muted(&self) -> ratatui::style::Color {
        parse_color(&self.fg_muted)
    }
    pub fn fg_subtle(&self) -> ratatui::style::Color {
        parse_color(&self.fg_subtle)
    }
    pub fn border(&self) -> ratatui::style::Color {
        parse_color(&self.border)
    }
    pub fn border_subtle(&self) -> ratatui::style::Color {
        parse_color(&self.border_subtle)
    }
    pub fn border_active(&self) -> ratatui::style::Color {
        parse_color(&self.border_active)
    }
    pub fn primary(&self) -> ratatui::style::Color {
        parse_color(&self.primary)
    }
    pub fn secondary(&self) -> ratatui::style::Color {
        parse_color(&self.secondary)
    }
    pub fn success(&self) -> ratatui::style::Color {
        parse_color(&self.success)
    }
    pub fn warning(&self) -> ratatui::style::Color {
        parse_color(&self.warning)
    }
    pub fn selected_bg(&self) -> ratatui::style::Color {
        parse_color(&self.selected_bg)
    }
    pub fn priority(&self) -> ratatui::style::Color {
        parse_color(&self.priority)
    }
    pub fn promotional(&self) -> ratatui::style::Color {
        parse_color(&self.promotional)
    }
    pub fn done(&self) -> ratatui::style::Color {
        parse_color(&self.done)
    }
    pub fn snoozed(&self) -> ratatui::style::Color {
        parse_color(&self.snoozed)
    }
}

/// Parse color string to ratatui Color
pub fn parse_color(s: &str) -> ratatui::style::Color {
    use ratatui::style::Color;

    // Try hex first (#RRGGBB)
    if s.starts_with('#') && s.len() == 7 {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&s[1..3], 16),
            u8::from_str_radix(&s[3..5], 16),
            u8::from_str_radix(&s[5..7], 16),
        ) {
            return Color::Rgb(r, g, b);
        }
    }

    // Named colors
    match s.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "white" => Color::White,
        _ => Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_and_named_colors() {
        use ratatui::style::Color;
        assert_eq!(parse_color("#ff0080"), Color::Rgb(255, 0, 128));
        assert_eq!(parse_color("cyan"), Color::Cyan);
        assert_eq!(parse_color("bogus"), Color::White);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: Config = toml::from_str("[reveal]\nincrement = 50\n").expect("parse");
        assert_eq!(cfg.reveal.increment, 50);
        assert_eq!(cfg.reveal.initial_count, RevealConfig::default().initial_count);
        assert_eq!(cfg.layout.item_height, 2);
    }
}
