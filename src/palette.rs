use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlElement};

/// The fixed set of selectable colors: a name for labelling and the
/// paint value the core treats as opaque. The first entry is the
/// startup color.
pub const PALETTE: [(&str, &str); 7] = [
    ("red", "#ff0000"),
    ("orange", "#ff8c00"),
    ("yellow", "#ffd000"),
    ("green", "#2f9e44"),
    ("blue", "#1971c2"),
    ("purple", "#9c36b5"),
    ("black", "#1f1f1f"),
];

pub fn color_value(index: usize) -> Option<&'static str> {
    PALETTE.get(index).map(|(_, value)| *value)
}

pub fn render_palette(document: &Document, palette_el: &HtmlElement, selected: usize) {
    palette_el.set_inner_html("");
    for (index, (name, value)) in PALETTE.iter().enumerate() {
        let Ok(element) = document.create_element("button") else {
            continue;
        };
        let Ok(button) = element.dyn_into::<HtmlButtonElement>() else {
            continue;
        };
        let _ = button.set_attribute("type", "button");
        let _ = button.set_attribute("data-index", &index.to_string());
        let _ = button.set_attribute("aria-label", &format!("Draw in {name}"));
        let class_name = if selected == index {
            "swatch active"
        } else {
            "swatch"
        };
        let _ = button.set_attribute("class", class_name);
        let _ = button.style().set_property("background", value);
        let _ = palette_el.append_child(&button);
    }
}

/// Resolves a click inside the palette strip to the selected color by
/// walking up from the event target to the nearest `data-index` carrier.
pub fn color_from_event(event: &Event) -> Option<(usize, &'static str)> {
    let mut current = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok());
    while let Some(element) = current {
        if let Some(index) = element.get_attribute("data-index") {
            let index = index.parse::<usize>().ok()?;
            return color_value(index).map(|value| (index, value));
        }
        current = element.parent_element();
    }
    None
}
