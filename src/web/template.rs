//! Server-side rendering of the calculator page.

use crate::domain::model::{DispenseRequest, Nuclide};

const STYLE: &str = r#"
    body { font-family: -apple-system, BlinkMacSystemFont, "Helvetica Neue", Helvetica, Arial; background-color: #f2f2f7; margin: 0; padding: 16px; }
    .container { max-width: 600px; margin: auto; }
    h2 { text-align: center; color: #007aff; margin-bottom: 20px; }
    .card { background-color: #fff; padding: 16px; border-radius: 14px; box-shadow: 0 1px 3px rgba(0,0,0,0.05); margin-bottom: 20px; }
    .section-title { font-size: 16px; font-weight: bold; color: #007aff; margin-bottom: 12px; border-left: 4px solid #007aff; padding-left: 10px; }
    label { display: block; margin-top: 10px; color: #333; font-weight: 500; font-size: 15px; }
    input, select { width: 100%; padding: 10px; font-size: 16px; border-radius: 10px; border: 1px solid #ccc; box-sizing: border-box; margin-top: 5px; }
    input[type="submit"] { background-color: #007aff; color: white; font-weight: bold; border: none; }
    .result-box { background: #eef6ff; border-left: 4px solid #007aff; white-space: pre-wrap; font-size: 15px; }
    .error { border-left-color: #ff3b30; background: #fff0ef; }
    .inline-value { margin-top: 12px; text-align: right; color: #007aff; font-weight: bold; font-size: 16px; }
    .flex-row { display: flex; gap: 8px; }
    .flex-row > div { flex: 1; }
    .flex-row .button-cell { flex: none; align-self: flex-end; }
"#;

// Field values are cached in localStorage and restored on a fresh GET.
const SCRIPT: &str = r#"
(function () {
    var fields = ["nuclide", "dose", "target_time", "init_activity", "init_volume", "start_time"];
    var form = document.getElementById("dispense-form");
    if (!form) { return; }
    if (form.dataset.submitted !== "true") {
        fields.forEach(function (name) {
            var saved = window.localStorage.getItem("dispense." + name);
            if (saved !== null && form.elements[name]) { form.elements[name].value = saved; }
        });
    }
    form.addEventListener("submit", function () {
        fields.forEach(function (name) {
            window.localStorage.setItem("dispense." + name, form.elements[name].value);
        });
    });
})();
"#;

/// What the page shows below the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Empty,
    Report { volume_main: String, text: String },
    Error(String),
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn input(label: &str, name: &str, kind: &str, value: &str) -> String {
    format!(
        "<label for=\"{name}\">{label}</label>\n<input type=\"{kind}\" id=\"{name}\" name=\"{name}\" value=\"{value}\">\n",
        label = label,
        name = name,
        kind = kind,
        value = escape_html(value),
    )
}

fn nuclide_select(selected: &str) -> String {
    let mut html = String::from("<label for=\"nuclide\">Nuclide</label>\n<select id=\"nuclide\" name=\"nuclide\">\n");
    for nuclide in Nuclide::ALL {
        let key = nuclide.key();
        let marker = if key == selected { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{key}\"{marker}>{key} (T½ {half_life} min)</option>\n",
            key = key,
            marker = marker,
            half_life = nuclide.half_life_minutes(),
        ));
    }
    html.push_str("</select>\n");
    html
}

pub fn render_page(request: &DispenseRequest, outcome: &Outcome) -> String {
    let submitted = !matches!(outcome, Outcome::Empty);
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Radiopharmaceutical Dispensing Calculator</title>\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<div class=\"container\">\n");
    html.push_str("<h2>Radiopharmaceutical Dispensing Calculator</h2>\n");
    html.push_str(&format!(
        "<form id=\"dispense-form\" method=\"post\" data-submitted=\"{}\">\n",
        submitted
    ));

    html.push_str("<div class=\"card\">\n");
    html.push_str(&nuclide_select(&request.nuclide));
    html.push_str("</div>\n");

    html.push_str("<div class=\"card\">\n<div class=\"section-title\">Target</div>\n<div class=\"flex-row\">\n<div>\n");
    html.push_str(&input("Target dose (mCi)", "dose", "text", &request.dose));
    html.push_str("</div>\n<div class=\"button-cell\">\n<input type=\"submit\" value=\"Calculate\">\n</div>\n</div>\n");
    html.push_str(&input("Withdrawal time", "target_time", "time", &request.target_time));
    if let Outcome::Report { volume_main, .. } = outcome {
        html.push_str(&format!(
            "<div class=\"inline-value\" id=\"volume-main\">Volume to withdraw: {} mL</div>\n",
            escape_html(volume_main)
        ));
    }
    html.push_str("</div>\n");

    html.push_str("<div class=\"card\">\n<div class=\"section-title\">Initial measurement</div>\n");
    html.push_str(&input("Initial activity (mCi)", "init_activity", "text", &request.init_activity));
    html.push_str(&input("Initial volume (mL)", "init_volume", "text", &request.init_volume));
    html.push_str(&input("Measurement time", "start_time", "time", &request.start_time));
    html.push_str("</div>\n</form>\n");

    match outcome {
        Outcome::Empty => {}
        Outcome::Report { text, .. } => {
            html.push_str("<div class=\"card result-box\" id=\"result\"><strong>Results</strong>\n\n");
            html.push_str(&escape_html(text));
            html.push_str("</div>\n");
        }
        Outcome::Error(message) => {
            html.push_str("<div class=\"card result-box error\" id=\"result\"><strong>Error</strong>\n\n");
            html.push_str(&escape_html(message));
            html.push_str("</div>\n");
        }
    }

    html.push_str("</div>\n<script>");
    html.push_str(SCRIPT);
    html.push_str("</script>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> DispenseRequest {
        DispenseRequest {
            nuclide: "C11".to_string(),
            dose: "7.56".to_string(),
            init_activity: "178.8".to_string(),
            init_volume: "10".to_string(),
            start_time: "07:40".to_string(),
            target_time: "07:50".to_string(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b a="1">&'"#),
            "&lt;b a=&quot;1&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn test_render_empty_page() {
        let html = render_page(&request(), &Outcome::Empty);
        assert!(html.contains("<option value=\"C11\" selected>"));
        assert!(html.contains("<option value=\"F18\">"));
        assert!(html.contains("name=\"init_activity\" value=\"178.8\""));
        assert!(html.contains("data-submitted=\"false\""));
        assert!(!html.contains("id=\"result\""));
        assert!(!html.contains("id=\"volume-main\""));
    }

    #[test]
    fn test_render_report_and_error() {
        let report = Outcome::Report {
            volume_main: "0.471".to_string(),
            text: "[target (recommended)]\n".to_string(),
        };
        let html = render_page(&request(), &report);
        assert!(html.contains("Volume to withdraw: 0.471 mL"));
        assert!(html.contains("[target (recommended)]"));

        let html = render_page(&request(), &Outcome::Error("bad <input>".to_string()));
        assert!(html.contains("bad &lt;input&gt;"));
        assert!(!html.contains("id=\"volume-main\""));
    }

    #[test]
    fn test_submitted_values_are_escaped() {
        let mut req = request();
        req.dose = "\"><script>".to_string();
        let html = render_page(&req, &Outcome::Empty);
        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;\""));
    }
}
