use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::StoryItem;

/// Column a result list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Title,
    Author,
    NumComments,
    Points,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Title,
        SortField::Author,
        SortField::NumComments,
        SortField::Points,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortField::Title => "Title",
            SortField::Author => "Author",
            SortField::NumComments => "Comments",
            SortField::Points => "Points",
        }
    }

    fn compare(self, a: &StoryItem, b: &StoryItem) -> Ordering {
        match self {
            SortField::Title => a.title.cmp(&b.title),
            SortField::Author => a.author.cmp(&b.author),
            SortField::NumComments => a.num_comments.cmp(&b.num_comments),
            SortField::Points => a.points.cmp(&b.points),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Stories loaded for the current term, in display order.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    items: Vec<StoryItem>,
    // last direction applied per field
    toggles: HashMap<SortField, SortDirection>,
    active_sort: Option<(SortField, SortDirection)>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh results for page 0 of a term. Sort toggles start over.
    pub fn replace(&mut self, items: Vec<StoryItem>) {
        self.items = items;
        self.toggles.clear();
        self.active_sort = None;
    }

    /// Further pages. Arrival order is kept and nothing is de-duplicated.
    pub fn append(&mut self, items: Vec<StoryItem>) {
        self.items.extend(items);
    }

    /// Removes the item with `id`. Returns whether something was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.items.iter().position(|item| item.id == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Stable in-place sort of the loaded items.
    pub fn sort_by(&mut self, field: SortField, direction: SortDirection) {
        match direction {
            SortDirection::Ascending => self.items.sort_by(|a, b| field.compare(a, b)),
            SortDirection::Descending => self.items.sort_by(|a, b| field.compare(b, a)),
        }
        self.active_sort = Some((field, direction));
    }

    /// Sorts by `field`, ascending the first time the field is picked and
    /// flipping on every later pick of the same field.
    pub fn toggle_sort(&mut self, field: SortField) -> SortDirection {
        let direction = self
            .toggles
            .get(&field)
            .map(|last| last.flipped())
            .unwrap_or(SortDirection::Ascending);
        self.toggles.insert(field, direction);
        self.sort_by(field, direction);
        direction
    }

    pub fn active_sort(&self) -> Option<(SortField, SortDirection)> {
        self.active_sort
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn items(&self) -> &[StoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
