//! Built-in template map for the proposal document.

use std::collections::BTreeMap;

use super::schema::{
    ColorVar, FontSlot, FontSlots, LayoutControl, LayoutKind, LayoutOption, Preset, ScaleBase,
    SliderSpec, TemplateMap, ToggleSpec,
};

/// The proposal template's control map: its root color variables, the two
/// font slots with their target selectors, spacing and size sliders, the
/// sections that can be hidden, layout switches, and five color presets.
pub fn proposal() -> TemplateMap {
    TemplateMap {
        name: "proposal".into(),
        colors: vec![
            color("--red", "Primary color", "#CA3553"),
            color("--red-dark", "Primary dark", "#a82a44"),
            color("--gray-800", "Text color", "#2d2a28"),
            color("--black", "Heading color", "#000000"),
            color("--white", "Background", "#ffffff"),
            color("--cream", "Accent bg", "#faf9f7"),
            color("--gray-100", "Light gray", "#f5f4f2"),
        ],
        fonts: FontSlots {
            heading: Some(FontSlot {
                label: "Heading font".into(),
                targets: vec![
                    ".cover-title".into(),
                    ".section-title".into(),
                    ".logo-primary".into(),
                    ".stat-number".into(),
                    ".priority-number".into(),
                    ".case-study-org".into(),
                    ".data-callout-stat".into(),
                    ".highlight-text".into(),
                    ".mission-text".into(),
                    ".total-amount".into(),
                    ".footer-page".into(),
                    ".page-header-right".into(),
                    ".priority-content h3".into(),
                    ".contact-info h4".into(),
                    ".total-label span".into(),
                    ".logo-ccm-title".into(),
                ],
                default: "Playfair Display".into(),
                options: vec![
                    "Playfair Display".into(),
                    "Merriweather".into(),
                    "Fraunces".into(),
                    "Lora".into(),
                    "DM Serif Display".into(),
                    "Inter".into(),
                    "Montserrat".into(),
                ],
            }),
            body: Some(FontSlot {
                label: "Body font".into(),
                targets: vec!["body".into()],
                default: "Source Sans 3".into(),
                options: vec![
                    "Source Sans 3".into(),
                    "Open Sans".into(),
                    "Inter".into(),
                    "Roboto".into(),
                    "Nunito".into(),
                    "Work Sans".into(),
                    "IBM Plex Sans".into(),
                ],
            }),
        },
        sliders: vec![
            SliderSpec {
                id: "body-font-size".into(),
                label: "Body font size".into(),
                property: Some("font-size".into()),
                targets: vec!["body".into()],
                unit: "pt".into(),
                min: 9.0,
                max: 14.0,
                step: 0.5,
                default: 11.0,
                mirror_property: None,
                is_scale: false,
                scale_targets: BTreeMap::new(),
            },
            SliderSpec {
                id: "heading-scale".into(),
                label: "Heading scale".into(),
                property: None,
                targets: Vec::new(),
                unit: "x".into(),
                min: 0.8,
                max: 1.3,
                step: 0.05,
                default: 1.0,
                mirror_property: None,
                is_scale: true,
                scale_targets: scale_targets(&[
                    (".cover-title", 42.0),
                    (".section-title", 26.0),
                    (".stat-number", 36.0),
                    (".priority-number", 28.0),
                    (".highlight-text", 14.0),
                    (".data-callout-stat", 18.0),
                    (".case-study-org", 14.0),
                    (".total-amount", 26.0),
                ]),
            },
            SliderSpec {
                id: "page-padding".into(),
                label: "Page padding".into(),
                property: Some("padding-left".into()),
                targets: vec![".content-page".into()],
                unit: "in".into(),
                min: 0.4,
                max: 1.0,
                step: 0.05,
                default: 0.75,
                // Both horizontal paddings move together.
                mirror_property: Some("padding-right".into()),
                is_scale: false,
                scale_targets: BTreeMap::new(),
            },
            SliderSpec {
                id: "line-height".into(),
                label: "Line height".into(),
                property: Some("line-height".into()),
                targets: vec!["body".into()],
                unit: "".into(),
                min: 1.2,
                max: 2.0,
                step: 0.1,
                default: 1.6,
                mirror_property: None,
                is_scale: false,
                scale_targets: BTreeMap::new(),
            },
        ],
        toggles: vec![
            toggle("stat-grid", "Stat grid", ".stat-grid"),
            toggle("highlight-boxes", "Highlight boxes", ".highlight-box"),
            toggle("case-studies", "Case studies", ".case-study"),
            toggle("budget-table", "Budget table", ".budget-table, .total-callout"),
            toggle("mission-block", "Mission block", ".cover-mission"),
        ],
        layout: vec![
            LayoutControl {
                id: "stat-columns".into(),
                label: "Stat columns".into(),
                kind: LayoutKind::ButtonGroup,
                target: ".stat-grid".into(),
                property: "grid-template-columns".into(),
                options: vec![
                    layout_option("repeat(2, 1fr)", "2 columns"),
                    layout_option("repeat(3, 1fr)", "3 columns"),
                    layout_option("repeat(4, 1fr)", "4 columns"),
                ],
                default: "repeat(3, 1fr)".into(),
            },
            LayoutControl {
                id: "heading-case".into(),
                label: "Heading case".into(),
                kind: LayoutKind::Select,
                target: ".cover-title, .section-title, .priority-content h3".into(),
                property: "text-transform".into(),
                options: vec![
                    layout_option("none", "Sentence case"),
                    layout_option("capitalize", "Title case"),
                    layout_option("uppercase", "Uppercase"),
                ],
                default: "none".into(),
            },
        ],
        presets: vec![
            preset(
                "ccm-brand",
                "CCM brand",
                &[
                    ("--red", "#CA3553"),
                    ("--red-dark", "#a82a44"),
                    ("--gray-800", "#2d2a28"),
                    ("--black", "#000000"),
                    ("--white", "#ffffff"),
                    ("--cream", "#faf9f7"),
                    ("--gray-100", "#f5f4f2"),
                ],
                "Playfair Display",
                "Source Sans 3",
            ),
            preset(
                "professional-blue",
                "Professional blue",
                &[
                    ("--red", "#1a5f7a"),
                    ("--red-dark", "#134a5e"),
                    ("--gray-800", "#1e3040"),
                    ("--black", "#0a1628"),
                    ("--white", "#ffffff"),
                    ("--cream", "#f0f5f7"),
                    ("--gray-100", "#eef2f4"),
                ],
                "Merriweather",
                "Open Sans",
            ),
            preset(
                "modern-green",
                "Modern green",
                &[
                    ("--red", "#2d8659"),
                    ("--red-dark", "#1f6b44"),
                    ("--gray-800", "#1a2e24"),
                    ("--black", "#0d1a12"),
                    ("--white", "#ffffff"),
                    ("--cream", "#f2f8f5"),
                    ("--gray-100", "#edf5f0"),
                ],
                "Inter",
                "Work Sans",
            ),
            preset(
                "warm-earth",
                "Warm earth",
                &[
                    ("--red", "#b5651d"),
                    ("--red-dark", "#8c4e17"),
                    ("--gray-800", "#3d2e1f"),
                    ("--black", "#1a1008"),
                    ("--white", "#fffdf9"),
                    ("--cream", "#faf5ee"),
                    ("--gray-100", "#f7f2ea"),
                ],
                "Lora",
                "Nunito",
            ),
            preset(
                "elegant-purple",
                "Elegant purple",
                &[
                    ("--red", "#6b3fa0"),
                    ("--red-dark", "#553080"),
                    ("--gray-800", "#2a2040"),
                    ("--black", "#130e20"),
                    ("--white", "#ffffff"),
                    ("--cream", "#f5f2fa"),
                    ("--gray-100", "#f0ecf7"),
                ],
                "DM Serif Display",
                "IBM Plex Sans",
            ),
        ],
    }
}

fn color(variable: &str, label: &str, default: &str) -> ColorVar {
    ColorVar {
        variable: variable.into(),
        label: label.into(),
        default: default.into(),
    }
}

fn scale_targets(entries: &[(&str, f64)]) -> BTreeMap<String, ScaleBase> {
    entries
        .iter()
        .map(|(selector, base)| {
            (
                (*selector).to_string(),
                ScaleBase {
                    base: *base,
                    unit: "pt".into(),
                },
            )
        })
        .collect()
}

fn toggle(id: &str, label: &str, selector: &str) -> ToggleSpec {
    ToggleSpec {
        id: id.into(),
        label: label.into(),
        selector: selector.into(),
        default: true,
    }
}

fn layout_option(value: &str, label: &str) -> LayoutOption {
    LayoutOption {
        value: value.into(),
        label: label.into(),
    }
}

fn preset(
    id: &str,
    label: &str,
    colors: &[(&str, &str)],
    heading_font: &str,
    body_font: &str,
) -> Preset {
    Preset {
        id: id.into(),
        label: label.into(),
        colors: colors
            .iter()
            .map(|(variable, value)| ((*variable).to_string(), (*value).to_string()))
            .collect(),
        heading_font: Some(heading_font.into()),
        body_font: Some(body_font.into()),
    }
}
