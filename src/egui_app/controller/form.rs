use super::*;

/// Sample row used by "Fill example".
///
/// Features with both dash and dot spellings in common census exports appear
/// under both names so either schema convention is filled.
pub const EXAMPLE_VALUES: &[(&str, &str)] = &[
    ("age", "37"),
    ("workclass", "Private"),
    ("education", "Bachelors"),
    ("occupation", "Exec-managerial"),
    ("relationship", "Husband"),
    ("race", "White"),
    ("sex", "Male"),
    ("fnlwgt", "180000"),
    ("education-num", "13"),
    ("education.num", "13"),
    ("capital-gain", "0"),
    ("capital.gain", "0"),
    ("capital-loss", "0"),
    ("capital.loss", "0"),
    ("hours-per-week", "45"),
    ("hours.per.week", "45"),
    ("native-country", "United-States"),
    ("native.country", "United-States"),
    ("marital-status", "Married-civ-spouse"),
    ("marital.status", "Married-civ-spouse"),
];

impl DashboardController {
    /// Overwrite the raw text of one schema field. Unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        if !self.ui.form.set(name, value) {
            tracing::debug!("Ignoring edit for unknown field {name}");
        }
    }

    /// Empty every field and drop the current result and error.
    pub fn clear(&mut self) {
        if self.ui.schema.is_none() {
            return;
        }
        self.ui.form.reset();
        self.ui.result = None;
        self.ui.error = None;
    }

    /// Fill every field that has a sample value; other fields keep their text.
    pub fn fill_example(&mut self) {
        for (name, value) in EXAMPLE_VALUES {
            self.ui.form.set(name, *value);
        }
    }
}
