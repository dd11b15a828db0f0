//! Toned output and colour themes
//!
//! Renderers emit [`Line`]s tagged with a [`Tone`]; colour is added by
//! wrapping a renderer in [`Themed`], once, when the renderer is built.

use serde::{Deserialize, Serialize};

use crate::reports::{BudgetStatus, DashboardSummary};

/// Colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// ANSI SGR parameters for a tone, `None` for unstyled text
    fn code(&self, tone: Tone) -> Option<&'static str> {
        match (self, tone) {
            (_, Tone::Plain) => None,
            (Theme::Dark, Tone::Heading) => Some("1;36"),
            (Theme::Light, Tone::Heading) => Some("1;34"),
            (Theme::Dark, Tone::Muted) => Some("90"),
            (Theme::Light, Tone::Muted) => Some("2"),
            (Theme::Dark, Tone::Accent) => Some("95"),
            (Theme::Light, Tone::Accent) => Some("35"),
            (Theme::Dark, Tone::Success) => Some("92"),
            (Theme::Light, Tone::Success) => Some("32"),
            (Theme::Dark, Tone::Warning) => Some("93"),
            (Theme::Light, Tone::Warning) => Some("33"),
            (Theme::Dark, Tone::Danger) => Some("91"),
            (Theme::Light, Tone::Danger) => Some("31"),
        }
    }

    /// Wrap text in the escape codes for `tone`
    pub fn paint(&self, tone: Tone, text: &str) -> String {
        match self.code(tone) {
            Some(code) if !text.is_empty() => format!("\x1b[{}m{}\x1b[0m", code, text),
            _ => text.to_string(),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}

/// Semantic role of a line of output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Heading,
    Muted,
    Accent,
    Success,
    Warning,
    Danger,
}

impl From<BudgetStatus> for Tone {
    fn from(status: BudgetStatus) -> Self {
        match status {
            BudgetStatus::Success => Tone::Success,
            BudgetStatus::Warning => Tone::Warning,
            BudgetStatus::Danger => Tone::Danger,
        }
    }
}

/// One line of rendered output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub tone: Tone,
    pub text: String,
}

impl Line {
    pub fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(Tone::Plain, text)
    }

    pub fn blank() -> Self {
        Self::plain("")
    }
}

/// Turns a dashboard summary into lines of output
pub trait Renderer {
    fn render(&self, summary: &DashboardSummary) -> Vec<Line>;

    /// Render and join with newlines
    fn render_to_string(&self, summary: &DashboardSummary) -> String {
        let mut output = String::new();
        for line in self.render(summary) {
            output.push_str(&line.text);
            output.push('\n');
        }
        output
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&self, summary: &DashboardSummary) -> Vec<Line> {
        (**self).render(summary)
    }
}

/// Decorator that colours whatever the wrapped renderer produces
pub struct Themed<R> {
    inner: R,
    theme: Theme,
}

impl<R: Renderer> Themed<R> {
    pub fn new(inner: R, theme: Theme) -> Self {
        Self { inner, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Renderer> Renderer for Themed<R> {
    fn render(&self, summary: &DashboardSummary) -> Vec<Line> {
        self.inner
            .render(summary)
            .into_iter()
            .map(|line| Line {
                text: self.theme.paint(line.tone, &line.text),
                tone: line.tone,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Budget;
    use crate::reports::AggregationOptions;
    use chrono::NaiveDate;

    struct Fixed;

    impl Renderer for Fixed {
        fn render(&self, _summary: &DashboardSummary) -> Vec<Line> {
            vec![
                Line::new(Tone::Heading, "Dashboard"),
                Line::plain("plain text"),
                Line::new(Tone::Danger, "over"),
                Line::blank(),
            ]
        }
    }

    fn summary() -> DashboardSummary {
        DashboardSummary::generate(
            &[],
            &Budget::starter(),
            NaiveDate::from_ymd_opt(2024, 12, 10).unwrap(),
            AggregationOptions::default(),
        )
    }

    #[test]
    fn test_themed_wraps_toned_lines_only() {
        let lines = Themed::new(Fixed, Theme::Dark).render(&summary());

        assert_eq!(lines[0].text, "\x1b[1;36mDashboard\x1b[0m");
        assert_eq!(lines[1].text, "plain text");
        assert_eq!(lines[2].text, "\x1b[91mover\x1b[0m");
        assert_eq!(lines[3].text, "");
        assert_eq!(lines[2].tone, Tone::Danger);
    }

    #[test]
    fn test_themes_differ() {
        let dark = Themed::new(Fixed, Theme::Dark).render_to_string(&summary());
        let light = Themed::new(Fixed, Theme::Light).render_to_string(&summary());
        assert_ne!(dark, light);
        assert_eq!(
            Themed::new(Fixed, Theme::Light).into_inner().render_to_string(&summary()),
            "Dashboard\nplain text\nover\n\n"
        );
    }

    #[test]
    fn test_boxed_renderer_can_be_themed() {
        let boxed: Box<dyn Renderer> = Box::new(Fixed);
        let themed = Themed::new(boxed, Theme::Light);
        assert_eq!(themed.theme(), Theme::Light);
        assert!(themed.render_to_string(&summary()).contains("\x1b[31mover"));
    }

    #[test]
    fn test_status_tones() {
        assert_eq!(Tone::from(BudgetStatus::Warning), Tone::Warning);
        assert_eq!(Tone::from(BudgetStatus::Danger), Tone::Danger);
    }
}
