//! Static mock of the embeddable chat widget, driven by a draft configuration.

use askama::Template;
use database::{AgentWidgetConfig, TriggerStyle, WidgetPosition, WidgetShape};

/// Label shown on a text trigger.
pub const TEXT_TRIGGER_LABEL: &str = "Chat";
/// Glyph shown on icon and bubble triggers.
pub const ICON_TRIGGER_GLYPH: &str = "\u{1F4AC}";

/// Everything the preview needs, already mapped to inline styles.
#[derive(Debug, Clone, PartialEq, Eq, Template)]
#[template(path = "widget_preview.html")]
pub struct WidgetPreview {
    /// Where the trigger sits; the chat window stays in place.
    pub trigger_placement: &'static str,
    pub corner_radius: &'static str,
    pub color: String,
    pub trigger_label: &'static str,
    pub title_text: String,
    pub welcome_message: String,
}

impl WidgetPreview {
    pub fn from_config(config: &AgentWidgetConfig) -> Self {
        Self {
            trigger_placement: trigger_placement(config.position),
            corner_radius: corner_radius(config.shape),
            color: preview_color(&config.color).to_string(),
            trigger_label: trigger_label(config.trigger_style),
            title_text: config.title_text.clone(),
            welcome_message: config.welcome_message.clone(),
        }
    }

    /// Inline style for the trigger button.
    pub fn trigger_style(&self) -> String {
        format!(
            "{}background-color:{};border-radius:{};",
            self.trigger_placement, self.color, self.corner_radius
        )
    }
}

fn trigger_placement(position: WidgetPosition) -> &'static str {
    match position {
        WidgetPosition::BottomLeft => "bottom:1rem;left:1rem;",
        WidgetPosition::BottomRight => "bottom:1rem;right:1rem;",
        WidgetPosition::Center => "top:50%;left:50%;transform:translate(-50%,-50%);",
    }
}

fn corner_radius(shape: WidgetShape) -> &'static str {
    match shape {
        WidgetShape::Rounded => "1rem",
        WidgetShape::Full => "9999px",
        WidgetShape::Square => "0.5rem",
    }
}

fn trigger_label(style: TriggerStyle) -> &'static str {
    match style {
        TriggerStyle::Text => TEXT_TRIGGER_LABEL,
        TriggerStyle::Icon | TriggerStyle::Bubble => ICON_TRIGGER_GLYPH,
    }
}

/// The color itself when it is a `#rgb`/`#rrggbb` hex value, else the default.
///
/// Only the preview falls back; the stored value is left as entered.
fn preview_color(color: &str) -> &str {
    let hex = color.strip_prefix('#').unwrap_or("");
    let valid = matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        color
    } else {
        AgentWidgetConfig::DEFAULT_COLOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preview() {
        let preview = WidgetPreview::from_config(&AgentWidgetConfig::defaults("a"));
        assert_eq!(preview.trigger_placement, "bottom:1rem;right:1rem;");
        assert_eq!(preview.corner_radius, "1rem");
        assert_eq!(preview.color, "#3B82F6");
        assert_eq!(preview.trigger_label, ICON_TRIGGER_GLYPH);
        assert_eq!(preview.title_text, "Chat with us");
    }

    #[test]
    fn test_mappings() {
        let mut config = AgentWidgetConfig::defaults("a");
        config.position = WidgetPosition::Center;
        config.shape = WidgetShape::Full;
        config.trigger_style = TriggerStyle::Text;
        config.color = "#10b981".to_string();

        let preview = WidgetPreview::from_config(&config);
        assert!(preview.trigger_placement.contains("translate(-50%,-50%)"));
        assert_eq!(preview.corner_radius, "9999px");
        assert_eq!(preview.trigger_label, "Chat");
        assert_eq!(
            preview.trigger_style(),
            "top:50%;left:50%;transform:translate(-50%,-50%);\
             background-color:#10b981;border-radius:9999px;"
        );

        config.position = WidgetPosition::BottomLeft;
        config.shape = WidgetShape::Square;
        let preview = WidgetPreview::from_config(&config);
        assert_eq!(preview.trigger_placement, "bottom:1rem;left:1rem;");
        assert_eq!(preview.corner_radius, "0.5rem");
    }

    #[test]
    fn test_non_hex_color_falls_back() {
        let mut config = AgentWidgetConfig::defaults("a");
        config.color = "red;background:url(x)".to_string();
        assert_eq!(WidgetPreview::from_config(&config).color, "#3B82F6");

        config.color = "#FFF".to_string();
        assert_eq!(WidgetPreview::from_config(&config).color, "#FFF");
    }

    #[test]
    fn test_text_is_escaped_when_rendered() {
        let mut config = AgentWidgetConfig::defaults("a");
        config.title_text = "<b>Hi".to_string();
        config.welcome_message = "Ask & learn".to_string();

        let html = WidgetPreview::from_config(&config).render().unwrap();
        assert!(html.contains("&lt;b&gt;Hi"));
        assert!(html.contains("Ask &amp; learn"));
    }

    #[test]
    fn test_position_moves_only_the_trigger() {
        let mut config = AgentWidgetConfig::defaults("a");
        config.position = WidgetPosition::BottomLeft;

        let html = WidgetPreview::from_config(&config).render().unwrap();
        assert!(html.contains(r#"<div class="widget-window">"#));
        assert!(html.contains(r#"class="widget-trigger" style="bottom:1rem;left:1rem;"#));
    }
}
