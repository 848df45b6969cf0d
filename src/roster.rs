use crate::filter::availability_percent;
use crate::models::{RosterSummary, Student};

/// Students picked in a roster view, in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterSelection {
    selected: Vec<String>,
}

impl RosterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, student_id: &str) {
        if let Some(pos) = self.selected.iter().position(|id| id == student_id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(student_id.to_string());
        }
    }

    /// Selects the whole roster, or clears the selection when everyone is
    /// already selected.
    pub fn toggle_all(&mut self, roster: &[Student]) {
        if self.covers(roster) {
            self.selected.clear();
        } else {
            self.selected = roster.iter().map(|s| s.id.clone()).collect();
        }
    }

    pub fn is_selected(&self, student_id: &str) -> bool {
        self.selected.iter().any(|id| id == student_id)
    }

    pub fn covers(&self, roster: &[Student]) -> bool {
        !roster.is_empty() && roster.iter().all(|s| self.is_selected(&s.id))
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.selected
    }

    /// Selected students in roster order. Ids not on the roster are skipped.
    pub fn selected_students<'a>(&self, roster: &'a [Student]) -> Vec<&'a Student> {
        roster.iter().filter(|s| self.is_selected(&s.id)).collect()
    }
}

/// Flips the confirmation flag of one student on this copy of the roster and
/// returns the new value, or `None` if the id is unknown.
pub fn toggle_attendance(roster: &mut [Student], student_id: &str) -> Option<bool> {
    let student = roster.iter_mut().find(|s| s.id == student_id)?;
    student.attendance_confirmed = !student.attendance_confirmed;
    Some(student.attendance_confirmed)
}

pub fn summarize<'a, I>(students: I) -> RosterSummary
where
    I: IntoIterator<Item = &'a Student>,
{
    let (confirmed, total) = students.into_iter().fold((0usize, 0usize), |(c, t), s| {
        (c + usize::from(s.attendance_confirmed), t + 1)
    });

    RosterSummary {
        confirmed,
        total,
        confirmed_percent: availability_percent(
            u32::try_from(confirmed).unwrap_or(u32::MAX),
            u32::try_from(total).unwrap_or(u32::MAX),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: &str, name: &str, confirmed: bool) -> Student {
        Student {
            id: id.to_string(),
            display_name: name.to_string(),
            phone_number: "+57 300 123 4567".to_string(),
            attendance_confirmed: confirmed,
        }
    }

    fn roster() -> Vec<Student> {
        vec![
            student("1", "Ana Rodríguez", true),
            student("2", "Carlos Martínez", false),
            student("3", "Lucía Fernández", true),
        ]
    }

    #[test]
    fn toggling_twice_deselects() {
        let mut selection = RosterSelection::new();
        selection.toggle("2");
        assert!(selection.is_selected("2"));
        selection.toggle("2");
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_all_selects_then_clears() {
        let roster = roster();
        let mut selection = RosterSelection::new();
        selection.toggle("3");
        selection.toggle_all(&roster);
        assert_eq!(selection.len(), 3);
        assert!(selection.covers(&roster));
        selection.toggle_all(&roster);
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_all_on_empty_roster_selects_nobody() {
        let mut selection = RosterSelection::new();
        selection.toggle_all(&[]);
        assert!(selection.is_empty());
    }

    #[test]
    fn selected_students_follow_roster_order() {
        let roster = roster();
        let mut selection = RosterSelection::new();
        selection.toggle("3");
        selection.toggle("99");
        selection.toggle("1");
        let names: Vec<&str> = selection
            .selected_students(&roster)
            .into_iter()
            .map(|s| s.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["Ana Rodríguez", "Lucía Fernández"]);
    }

    #[test]
    fn attendance_toggle_touches_only_the_copy() {
        let source = roster();
        let mut copy = source.clone();
        assert_eq!(toggle_attendance(&mut copy, "2"), Some(true));
        assert!(!source[1].attendance_confirmed);
        assert_eq!(toggle_attendance(&mut copy, "missing"), None);
    }

    #[test]
    fn summary_counts_confirmations() {
        let summary = summarize(&roster());
        assert_eq!(summary.confirmed, 2);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.confirmed_percent, 67);
        assert_eq!(summarize(&Vec::<Student>::new()).confirmed_percent, 0);
    }
}
