use crate::models::{budget::BudgetError, BudgetItem, NewBudget};
use std::collections::BTreeSet;

/// Local list state behind the budgets page: the loaded items plus the remove-mode selection.
#[derive(Clone, Debug, Default)]
pub struct BudgetBook {
    items: Vec<BudgetItem>,
    selected: BTreeSet<String>,
    remove_mode: bool,
}

impl BudgetBook {
    #[must_use]
    pub fn new(items: Vec<BudgetItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn items(&self) -> &[BudgetItem] {
        &self.items
    }

    #[must_use]
    pub const fn remove_mode(&self) -> bool {
        self.remove_mode
    }

    pub fn add(&mut self, item: BudgetItem) {
        self.items.push(item);
    }

    /// Replaces the item `id` with the edited fields, keeping its `id` and `user_id` and
    /// recomputing `remaining`. Editing is unavailable in remove mode. Returns whether an item
    /// was replaced; unknown ids leave the book untouched.
    ///
    /// # Errors
    /// Returns the broken form rule; the book is not modified.
    pub fn replace(&mut self, id: &str, edited: NewBudget) -> Result<bool, BudgetError> {
        edited.validate()?;
        if self.remove_mode {
            return Ok(false);
        }
        let Some(slot) = self.items.iter_mut().find(|item| item.id == id) else {
            return Ok(false);
        };
        let user_id = slot.user_id.take();
        *slot = BudgetItem {
            user_id,
            ..edited.into_item(id.to_string())
        };
        Ok(true)
    }

    /// Leaving remove mode drops the selection.
    pub fn toggle_remove_mode(&mut self) {
        self.remove_mode = !self.remove_mode;
        if !self.remove_mode {
            self.selected.clear();
        }
    }

    /// Flips the selection of `id`. Ignored outside remove mode or for unknown ids.
    pub fn toggle_selected(&mut self, id: &str) {
        if !self.remove_mode || !self.items.iter().any(|item| item.id == id) {
            return;
        }
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Removes the selected items, leaves remove mode, and returns what was removed.
    pub fn remove_selected(&mut self) -> Vec<BudgetItem> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|item| self.selected.contains(&item.id));
        self.items = kept;
        self.selected.clear();
        self.remove_mode = false;
        removed
    }

    #[must_use]
    pub fn total_remaining(&self) -> f64 {
        self.items.iter().map(|item| item.remaining).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;

    fn form(category: &str, amount: f64, spent: f64) -> NewBudget {
        NewBudget {
            category: category.to_string(),
            frequency: Frequency::Monthly,
            amount,
            spent,
        }
    }

    fn item(id: &str, amount: f64, spent: f64) -> BudgetItem {
        form(&format!("cat-{id}"), amount, spent).into_item(id.to_string())
    }

    #[test]
    fn replace_keeps_identity_and_recomputes_remaining() {
        let mut owned = item("a", 10.0, 0.0);
        owned.user_id = Some("u-1".to_string());
        let mut book = BudgetBook::new(vec![owned, item("b", 20.0, 5.0)]);

        let mut edited = form("Groceries", 120.0, 45.5);
        edited.frequency = Frequency::Weekly;
        assert_eq!(book.replace("a", edited), Ok(true));

        let replaced = &book.items()[0];
        assert_eq!(replaced.id, "a");
        assert_eq!(replaced.user_id.as_deref(), Some("u-1"));
        assert_eq!(replaced.category, "Groceries");
        assert_eq!(replaced.frequency, Frequency::Weekly);
        assert!((replaced.remaining - 74.5).abs() < f64::EPSILON);
        assert_eq!(book.items()[1], item("b", 20.0, 5.0));
    }

    #[test]
    fn replace_rejects_negative_and_nan() {
        let mut book = BudgetBook::new(vec![item("a", 10.0, 2.0)]);
        let before = book.items().to_vec();

        assert_eq!(
            book.replace("a", form("Rent", -1.0, 0.0)),
            Err(BudgetError::InvalidAmount)
        );
        assert_eq!(
            book.replace("a", form("Rent", 10.0, f64::NAN)),
            Err(BudgetError::InvalidSpent)
        );
        assert_eq!(book.items(), before.as_slice());
    }

    #[test]
    fn replace_unknown_id_is_a_noop() {
        let mut book = BudgetBook::new(vec![item("a", 10.0, 2.0)]);
        let before = book.items().to_vec();
        assert_eq!(book.replace("missing", form("Rent", 5.0, 0.0)), Ok(false));
        assert_eq!(book.items(), before.as_slice());
    }

    #[test]
    fn replace_is_unavailable_in_remove_mode() {
        let mut book = BudgetBook::new(vec![item("a", 10.0, 2.0)]);
        book.toggle_remove_mode();
        assert_eq!(book.replace("a", form("Rent", 5.0, 0.0)), Ok(false));
        assert_eq!(book.items()[0].category, "cat-a");
    }

    #[test]
    fn selection_requires_remove_mode() {
        let mut book = BudgetBook::new(vec![item("a", 10.0, 0.0)]);
        book.toggle_selected("a");
        assert!(!book.is_selected("a"));

        book.toggle_remove_mode();
        book.toggle_selected("a");
        assert!(book.is_selected("a"));
        book.toggle_selected("a");
        assert!(!book.is_selected("a"));
        book.toggle_selected("missing");
        assert!(!book.is_selected("missing"));
    }

    #[test]
    fn remove_selected_keeps_the_rest() {
        let mut book = BudgetBook::new(vec![item("a", 10.0, 4.0), item("b", 20.0, 5.0)]);
        book.add(item("c", 5.0, 5.0));
        book.toggle_remove_mode();
        book.toggle_selected("b");

        let removed = book.remove_selected();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].id, "b");
        assert_eq!(book.items().len(), 2);
        assert!(!book.remove_mode());
        assert!((book.total_remaining() - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn leaving_remove_mode_clears_selection() {
        let mut book = BudgetBook::new(vec![item("a", 1.0, 0.0)]);
        book.toggle_remove_mode();
        book.toggle_selected("a");
        book.toggle_remove_mode();
        assert!(!book.is_selected("a"));
    }
}
