//! Text rendering for the form panel and the results panel.
//!
//! Everything here is a pure function from state to a `String`; the caller
//! decides where it is printed.

use std::io::IsTerminal;

use fraudlens_core::{
    Field, Label, Persona, PredictionStatus, PredictionVerdict, Preset, TransactionRequest,
};

const BAR_WIDTH: usize = 20;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

pub const IDLE_PLACEHOLDER: &str = "The prediction results from both models will be displayed here.";
const ANONYMIZED_HINT: &str =
    "anonymized PCA feature; strongly negative values can indicate fraud";

/// Terminal styling switches.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub color: bool,
}

impl Style {
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// Colour only on a terminal, and never when `NO_COLOR` is set.
    pub fn detect(no_color: bool) -> Self {
        if no_color || std::env::var_os("NO_COLOR").is_some() || !std::io::stdout().is_terminal() {
            Self::plain()
        } else {
            Self { color: true }
        }
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

// ── Form panel ──

pub fn render_form(fields: &TransactionRequest, style: Style) -> String {
    let mut out = String::new();
    out.push_str(&style.paint("=== Transaction Analysis ===", BOLD));
    out.push('\n');
    for field in Field::ALL {
        let value = fields.get(field);
        let shown = if value.is_empty() {
            style.paint("(empty)", DIM)
        } else {
            value.to_string()
        };
        out.push_str(&format!("  {:<10} {}", field.as_str(), shown));
        if field.is_anonymized() && value.is_empty() {
            out.push_str(&format!("  {}", style.paint(ANONYMIZED_HINT, DIM)));
        }
        out.push('\n');
    }
    out
}

pub fn render_presets() -> String {
    let mut out = String::from("Presets\n");
    for preset in Preset::ALL {
        let req = preset.request();
        out.push_str(&format!(
            "  {:<10} {:<16} v10={} v12={} v14={} v17={} amount={}\n",
            preset.as_str(),
            preset.description(),
            req.v10,
            req.v12,
            req.v14,
            req.v17,
            req.amount
        ));
    }
    out
}

// ── Results panel ──

pub fn render_status(status: &PredictionStatus, style: Style) -> String {
    let mut out = String::new();
    out.push_str(&style.paint("=== Dual Analysis Result ===", BOLD));
    out.push('\n');
    match status {
        PredictionStatus::Idle => {
            out.push_str(IDLE_PLACEHOLDER);
            out.push('\n');
        }
        PredictionStatus::Loading => {
            out.push_str("Analyzing Transaction... [ .... ]\n");
            out.push_str(&style.paint("Running dual analysis...", DIM));
            out.push('\n');
        }
        PredictionStatus::Error(message) => {
            out.push_str(&style.paint("Analysis Failed", RED));
            out.push('\n');
            out.push_str(message);
            out.push('\n');
        }
        PredictionStatus::Success(combined) => {
            let cards: Vec<String> = combined
                .iter()
                .map(|(persona, verdict)| render_card(persona, verdict, style))
                .collect();
            out.push_str(&cards.join("\n"));
        }
    }
    out
}

pub fn render_card(persona: Persona, verdict: &PredictionVerdict, style: Style) -> String {
    let tone = label_tone(verdict.prediction);
    let mut out = String::new();
    out.push_str(&format!("{}\n", style.paint(persona.title(), BOLD)));
    out.push_str(&format!(
        "  {}  Confidence: {}\n",
        style.paint(verdict.prediction.as_str(), tone),
        confidence_percent(verdict.confidence)
    ));
    out.push_str(&format!(
        "  {}\n",
        style.paint(&confidence_bar(verdict.confidence), tone)
    ));
    out.push_str(&format!("  {}\n", verdict.reasoning));
    out
}

fn label_tone(label: Label) -> &'static str {
    if label.is_fraudulent() { RED } else { GREEN }
}

/// `0.934` → `93.4%`.
pub fn confidence_percent(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

/// Proportional bar of [`BAR_WIDTH`] cells; confidence is clamped to `[0, 1]`.
pub fn confidence_bar(confidence: f64) -> String {
    let filled = (confidence.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fraudlens_core::CombinedVerdict;

    fn combined() -> CombinedVerdict {
        CombinedVerdict {
            simulated_model: PredictionVerdict {
                prediction: Label::Fraudulent,
                confidence: 0.875,
                reasoning: "V14 is far below normal.".into(),
            },
            ai_assistant: PredictionVerdict {
                prediction: Label::NotFraudulent,
                confidence: 0.6,
                reasoning: "Small amount, mild values.".into(),
            },
        }
    }

    #[test]
    fn bar_is_proportional() {
        assert_eq!(confidence_bar(0.0), "[--------------------]");
        assert_eq!(confidence_bar(0.5), "[##########----------]");
        assert_eq!(confidence_bar(1.0), "[####################]");
        assert_eq!(confidence_bar(0.97), "[###################-]");
    }

    #[test]
    fn bar_clamps_out_of_range() {
        assert_eq!(confidence_bar(1.7), confidence_bar(1.0));
        assert_eq!(confidence_bar(-0.2), confidence_bar(0.0));
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(confidence_percent(0.934), "93.4%");
        assert_eq!(confidence_percent(1.0), "100.0%");
    }

    #[test]
    fn idle_shows_placeholder() {
        let out = render_status(&PredictionStatus::Idle, Style::plain());
        assert!(out.contains(IDLE_PLACEHOLDER));
    }

    #[test]
    fn loading_shows_progress() {
        let out = render_status(&PredictionStatus::Loading, Style::plain());
        assert!(out.contains("Analyzing Transaction..."));
        assert!(out.contains("Running dual analysis..."));
    }

    #[test]
    fn error_shows_message() {
        let status = PredictionStatus::Error("Failed to get a valid prediction.".into());
        let out = render_status(&status, Style::plain());
        assert!(out.contains("Analysis Failed"));
        assert!(out.contains("Failed to get a valid prediction."));
    }

    #[test]
    fn success_renders_both_cards_in_order() {
        let out = render_status(&PredictionStatus::Success(combined()), Style::plain());
        let model = out.find("Simulated XGBoost Model").unwrap();
        let assistant = out.find("AI Financial Assistant").unwrap();
        assert!(model < assistant);
        assert!(out.contains("Fraudulent  Confidence: 87.5%"));
        assert!(out.contains("Not Fraudulent  Confidence: 60.0%"));
        assert!(out.contains("Small amount, mild values."));
    }

    #[test]
    fn color_follows_label() {
        let style = Style { color: true };
        let c = combined();
        let fraud = render_card(Persona::SimulatedModel, &c.simulated_model, style);
        let legit = render_card(Persona::AiAssistant, &c.ai_assistant, style);
        assert!(fraud.contains(&format!("{RED}Fraudulent{RESET}")));
        assert!(legit.contains(&format!("{GREEN}Not Fraudulent{RESET}")));
    }

    #[test]
    fn plain_style_has_no_escape_codes() {
        let out = render_status(&PredictionStatus::Success(combined()), Style::plain());
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn form_marks_empty_fields() {
        let mut fields = TransactionRequest::default();
        fields.amount = "1.98".into();
        let out = render_form(&fields, Style::plain());
        assert!(out.contains("  amount     1.98"));
        assert!(out.contains("  v10        (empty)"));
        assert_eq!(out.matches(ANONYMIZED_HINT).count(), 4);
    }

    #[test]
    fn presets_listing_has_both() {
        let out = render_presets();
        assert!(out.contains("normal"));
        assert!(out.contains("v17=-6.665951"));
    }
}
