use credit_risk_core::{formula, CreditRating, METHODOLOGY};

pub const PAGE_PATH: &str = "/";
pub const PAGE_MIME_TYPE: &str = "text/html; charset=utf-8";

pub const PAGE_TEMPLATE: &str = include_str!("../../../ui/index.html");

const RATING_OPTIONS_SLOT: &str = "{{RATING_OPTIONS}}";
const FORMULA_ITEMS_SLOT: &str = "{{FORMULA_ITEMS}}";
const METHODOLOGY_SLOT: &str = "{{METHODOLOGY}}";

const DEFAULT_RATING: CreditRating = CreditRating::Average;

/// Renders the assessment form. The rating selector and the formula list are
/// filled from the scoring tables so the page never restates them by hand.
pub fn render_page() -> String {
    PAGE_TEMPLATE
        .replace(RATING_OPTIONS_SLOT, &rating_options())
        .replace(FORMULA_ITEMS_SLOT, &formula_items())
        .replace(METHODOLOGY_SLOT, &escape_html(METHODOLOGY))
}

fn rating_options() -> String {
    CreditRating::ALL
        .into_iter()
        .map(|rating| {
            let selected = if rating == DEFAULT_RATING {
                " selected"
            } else {
                ""
            };
            format!(
                "<option value=\"{}\"{selected}>{}</option>",
                escape_html(rating.name()),
                escape_html(&rating.display_label())
            )
        })
        .collect()
}

fn formula_items() -> String {
    formula()
        .formula
        .iter()
        .map(|line| format!("<li>{}</li>", escape_html(line)))
        .collect()
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_has_no_unfilled_slots() {
        let page = render_page();
        assert!(!page.contains("{{"));
    }

    #[test]
    fn rating_selector_submits_canonical_names() {
        let page = render_page();
        for rating in CreditRating::ALL {
            assert!(page.contains(&format!("value=\"{}\"", rating.name())));
        }
        assert!(page.contains("<option value=\"Average\" selected>Average (650-699)</option>"));
    }

    #[test]
    fn formula_comparisons_are_escaped() {
        let page = render_page();
        assert!(page.contains("10 if &lt;25 or &gt;60"));
    }

    #[test]
    fn escape_handles_markup() {
        assert_eq!(escape_html("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}
