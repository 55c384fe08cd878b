/// Per-operator state that outlives a single command: who is operating the
/// ledger and which students are hand-picked for messaging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    operator: Option<String>,
    selected: Vec<i64>,
}

impl Session {
    pub fn new(operator: Option<String>) -> Self {
        Self {
            operator,
            selected: Vec::new(),
        }
    }

    pub fn operator(&self) -> Option<&str> {
        self.operator.as_deref()
    }

    /// Flips the selection state of `student_id`; returns `true` if it is now selected.
    pub fn toggle(&mut self, student_id: i64) -> bool {
        if let Some(position) = self.selected.iter().position(|id| *id == student_id) {
            self.selected.remove(position);
            false
        } else {
            self.selected.push(student_id);
            true
        }
    }

    pub fn is_selected(&self, student_id: i64) -> bool {
        self.selected.contains(&student_id)
    }

    /// Selected ids in the order they were picked.
    pub fn selected(&self) -> &[i64] {
        &self.selected
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }
}
