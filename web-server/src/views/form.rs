//! Prediction form built from a domain schema

use std::collections::HashMap;

use health_assistant_core::{DomainId, FieldKind, FieldSpec, HealthAssistant};

use super::layout::page;
use super::{escape, Notice};

fn columns(domain: DomainId) -> usize {
    match domain {
        DomainId::Parkinsons => 5,
        _ => 3,
    }
}

fn button_label(domain: DomainId) -> &'static str {
    match domain {
        DomainId::Diabetes => "Diabetes Test Result",
        DomainId::HeartDisease => "Heart Disease Test Result",
        DomainId::Parkinsons => "Parkinson's Test Result",
    }
}

fn number_attr(value: f64) -> String {
    // f64 Display never uses exponent notation
    value.to_string()
}

fn render_input(field: &FieldSpec, entered: Option<&str>) -> String {
    let name = escape(&field.name);
    let label = match &field.unit {
        Some(unit) => format!("{} ({})", escape(&field.label), escape(unit)),
        None => escape(&field.label),
    };
    let mut html = format!("<div class=\"field\"><label for=\"{name}\">{label}</label>");

    match (&field.kind, &field.mapping) {
        (FieldKind::Categorical, Some(mapping)) => {
            html.push_str(&format!("<select id=\"{name}\" name=\"{name}\">"));
            if !field.required {
                html.push_str("<option value=\"\"></option>");
            }
            for option in mapping.options() {
                let selected = entered
                    .map(|v| v.trim().eq_ignore_ascii_case(&option.label) || v.trim() == option.code.to_string())
                    .unwrap_or(false);
                html.push_str(&format!(
                    "<option value=\"{label}\"{selected}>{label}</option>",
                    label = escape(&option.label),
                    selected = if selected { " selected" } else { "" },
                ));
            }
            html.push_str("</select>");
        }
        _ => {
            let constraints = &field.constraints;
            let step = constraints.step.map(number_attr).unwrap_or_else(|| "any".to_string());
            html.push_str(&format!("<input type=\"number\" id=\"{name}\" name=\"{name}\" step=\"{step}\""));
            if let Some(min) = constraints.min {
                html.push_str(&format!(" min=\"{}\"", number_attr(min)));
            }
            if let Some(max) = constraints.max {
                html.push_str(&format!(" max=\"{}\"", number_attr(max)));
            }
            if let Some(value) = entered {
                html.push_str(&format!(" value=\"{}\"", escape(value)));
            } else if let Some(default) = constraints.default {
                html.push_str(&format!(" placeholder=\"{}\"", number_attr(default)));
            }
            html.push('>');
        }
    }

    html.push_str("</div>");
    html
}

/// Render a domain's page with the values the user entered and an optional notice
pub fn form_page(
    assistant: &HealthAssistant,
    domain: DomainId,
    values: &HashMap<String, String>,
    notice: Option<&Notice>,
) -> String {
    let schema = assistant.schema(domain);

    let mut body = format!("<h1>{}</h1>", escape(&schema.title));
    body.push_str(&format!(
        "<form method=\"post\" action=\"/{}\"><div class=\"grid cols-{}\">",
        domain.as_str(),
        columns(domain)
    ));
    for field in schema.fields() {
        body.push_str(&render_input(field, values.get(&field.name).map(String::as_str)));
    }
    body.push_str(&format!(
        "</div><button type=\"submit\">{}</button></form>",
        button_label(domain)
    ));

    if let Some(notice) = notice {
        body.push_str(&notice.render());
    }

    page(&schema.title, Some(domain), &body)
}
