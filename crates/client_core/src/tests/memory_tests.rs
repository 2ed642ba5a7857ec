use super::*;

#[test]
fn parses_compound_selectors() {
    assert_eq!(
        CompoundSelector::parse("button.btn-primary#42"),
        Some(CompoundSelector {
            tag: Some("button".into()),
            id: Some("42".into()),
            classes: vec!["btn-primary".into()],
        })
    );
    assert_eq!(CompoundSelector::parse("#messages-form button"), None);
    assert_eq!(CompoundSelector::parse("."), None);
}

#[test]
fn queries_follow_document_order() {
    let doc = MemoryDocument::new();
    let list = doc.append(doc.body(), ElementSpec::new("ul"));
    let first = doc.append(list, ElementSpec::new("li"));
    let late_sibling = doc.append(doc.body(), ElementSpec::new("li").class("x"));
    let nested = doc.append(first, ElementSpec::new("li").class("x"));

    assert_eq!(doc.query_all("li.x"), vec![nested, late_sibling]);
    assert_eq!(doc.query("li"), Some(first));
    assert_eq!(doc.query("#missing"), None);
}

#[test]
fn contains_is_inclusive_and_follows_parents() {
    let doc = MemoryDocument::new();
    let outer = doc.append(doc.body(), ElementSpec::new("form"));
    let inner = doc.append(outer, ElementSpec::new("button"));
    let elsewhere = doc.append(doc.body(), ElementSpec::new("div"));

    assert!(doc.contains(&outer, &outer));
    assert!(doc.contains(&outer, &inner));
    assert!(!doc.contains(&inner, &outer));
    assert!(!doc.contains(&outer, &elsewhere));
}

#[test]
fn toggle_class_reports_presence() {
    let doc = MemoryDocument::new();
    let button = doc.append(doc.body(), ElementSpec::new("button").class("btn"));

    assert!(doc.toggle_class(&button, "btn-primary"));
    assert!(doc.has_class(&button, "btn-primary"));
    assert!(!doc.toggle_class(&button, "btn-primary"));
    assert_eq!(doc.classes(button), vec!["btn".to_string()]);
}

#[test]
fn reports_upper_case_tag_names() {
    let doc = MemoryDocument::new();
    let button = doc.append(doc.body(), ElementSpec::new("Button"));
    assert_eq!(doc.tag_name(&button), "BUTTON");
    assert!(doc.is_button(&button));
}

#[test]
fn collects_form_controls_in_order() {
    let doc = MemoryDocument::new();
    let form = doc.append(doc.body(), ElementSpec::new("form").id("new-msg-form"));
    let group = doc.append(form, ElementSpec::new("div"));
    doc.append(group, ElementSpec::new("textarea").attr("name", "text").text("hi"));
    doc.append(
        form,
        ElementSpec::new("input")
            .attr("type", "checkbox")
            .attr("name", "public")
            .attr("checked", ""),
    );
    doc.append(form, ElementSpec::new("button").id("submit-new-post"));
    doc.append(doc.body(), ElementSpec::new("input").attr("name", "outside"));

    let controls = doc.form_controls(&form);
    let summary: Vec<_> = controls
        .iter()
        .map(|c| (c.name.as_str(), c.value.as_str(), c.kind, c.checked))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("text", "hi", ControlKind::TextArea, false),
            ("public", "on", ControlKind::Checkbox, true),
            ("", "", ControlKind::Button, false),
        ]
    );
}

#[test]
fn set_disabled_round_trips_attribute() {
    let doc = MemoryDocument::new();
    let button = doc.append(doc.body(), ElementSpec::new("button"));
    doc.set_disabled(&button, true);
    assert!(doc.is_disabled(button));
    doc.set_disabled(&button, false);
    assert!(!doc.is_disabled(button));
}

#[test]
fn records_clicks_and_reloads_across_handles() {
    let doc = MemoryDocument::new();
    let handle = doc.clone();
    let close = doc.append(doc.body(), ElementSpec::new("button"));

    handle.click(&close);
    handle.reload();

    assert_eq!(doc.clicks(), vec![close]);
    assert_eq!(doc.reload_count(), 1);
}

#[test]
fn set_text_replaces_assigned_markup() {
    let doc = MemoryDocument::new();
    let likes = doc.append(doc.body(), ElementSpec::new("a").id("likes").text("0"));
    doc.set_inner_html(&likes, "<b>x</b>");
    doc.set_text(&likes, "3");
    assert_eq!(doc.text(likes), "3");
    assert_eq!(doc.inner_html(likes), None);
}
