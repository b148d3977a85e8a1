use std::ops::RangeInclusive;

#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Float {
        value: f32,
        min:   f32,
        max:   f32,
    },
    Bool(bool),
    /// Linear RGB in 0..=1
    Color([f32; 3]),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name:  String,
    pub value: ParamValue,
}

/// Floating panel for live tweaking of lesson parameters, anchored to the top right of its container.
///
/// Parameters are identified by name; adding a name twice replaces the earlier parameter.
pub struct DebugPanel {
    container: egui::Context,
    title:     String,
    params:    Vec<Param>,
    visible:   bool,
}

impl std::fmt::Debug for DebugPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugPanel")
            .field("title", &self.title)
            .field("params", &self.params)
            .field("visible", &self.visible)
            .finish()
    }
}

impl DebugPanel {
    pub fn new(container: &egui::Context) -> Self {
        Self {
            container: container.clone(),
            title:     "Debug".to_owned(),
            params:    vec![],
            visible:   true,
        }
    }

    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_owned();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn add_float(&mut self, name: &str, value: f32, range: RangeInclusive<f32>) -> &mut Self {
        let (min, max) = range.into_inner();
        self.insert(name, ParamValue::Float { value: value.clamp(min, max), min, max })
    }

    pub fn add_bool(&mut self, name: &str, value: bool) -> &mut Self {
        self.insert(name, ParamValue::Bool(value))
    }

    pub fn add_color(&mut self, name: &str, rgb: [f32; 3]) -> &mut Self {
        self.insert(name, ParamValue::Color(rgb))
    }

    fn insert(&mut self, name: &str, value: ParamValue) -> &mut Self {
        match self.params.iter_mut().find(|p| p.name == name) {
            Some(param) => param.value = value,
            None => self.params.push(Param { name: name.to_owned(), value }),
        }
        self
    }

    fn value(&self, name: &str) -> Option<&ParamValue> {
        self.params.iter().find(|p| p.name == name).map(|p| &p.value)
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.value(name) {
            Some(ParamValue::Float { value, .. }) => Some(*value),
            _ => None,
        }
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        match self.value(name) {
            Some(ParamValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn color(&self, name: &str) -> Option<[f32; 3]> {
        match self.value(name) {
            Some(ParamValue::Color(rgb)) => Some(*rgb),
            _ => None,
        }
    }

    /// Sets a float parameter clamped to its range, false when there is no such float.
    pub fn set_float(&mut self, name: &str, new_value: f32) -> bool {
        match self.params.iter_mut().find(|p| p.name == name).map(|p| &mut p.value) {
            Some(ParamValue::Float { value, min, max }) => {
                *value = new_value.clamp(*min, *max);
                true
            },
            _ => false,
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Draws the panel into its container, must be called inside a gui run. Returns true if any value changed.
    pub fn show(&mut self) -> bool {
        if !self.visible {
            return false;
        }

        let mut changed = false;
        let params = &mut self.params;
        egui::Window::new(self.title.as_str())
            .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
            .resizable(false)
            .show(&self.container, |ui| {
                egui::Grid::new("debug_panel_grid")
                    .num_columns(2)
                    .show(ui, |ui| {
                        for param in params.iter_mut() {
                            ui.label(param.name.as_str());
                            let response = match &mut param.value {
                                ParamValue::Float { value, min, max } => {
                                    ui.add(egui::Slider::new(value, *min..=*max))
                                },
                                ParamValue::Bool(value) => ui.checkbox(value, ""),
                                ParamValue::Color(rgb) => ui.color_edit_button_rgb(rgb),
                            };
                            changed |= response.changed();
                            ui.end_row();
                        }
                    });
            });
        changed
    }
}
