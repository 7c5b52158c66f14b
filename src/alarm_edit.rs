use eframe::egui::{self, Key, TextEdit, Widget};

/// The "new alarm" row: a time field and an add button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlarmInput {
    pub(crate) time: String,
}

pub enum EditingState {
    Editing,
    /// the user asked to add whatever is in the field
    Submitted(String),
}

impl AlarmInput {
    pub fn clear(&mut self) {
        self.time.clear();
    }

    pub fn render(&mut self, ui: &mut egui::Ui) -> EditingState {
        let mut ret = EditingState::Editing;
        ui.horizontal(|ui| {
            let field = TextEdit::singleline(&mut self.time)
                .hint_text("07:30 AM")
                .desired_width(90.0)
                .ui(ui);
            // enter in the field works the same as the button
            let entered = field.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
            if ui.button("Add Alarm").clicked() || entered {
                ret = EditingState::Submitted(self.time.clone());
            }
        });
        ret
    }
}
