//! Client-side menu state. The category list is a read-through cache of the
//! server: it is seeded by one full load and afterwards only patched with
//! objects the server returned.

use std::rc::Rc;

use yew::Reducible;

use crate::format::cost_to_input;
use crate::model::{Category, Food, FoodId};

#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Loading,
    Ready,
    Failed(String),
}

/// Buffers for the food row currently in edit mode.
#[derive(Clone, Debug, PartialEq)]
pub struct FoodEdit {
    pub id: FoodId,
    pub name: String,
    pub cost: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuState {
    pub phase: Phase,
    pub categories: Vec<Category>,
    pub current_index: usize,
    /// Set while any mutation is in flight; disables every submit control.
    pub saving: bool,
    pub new_category_name: String,
    /// `Some(buffer)` while the current category's name is being edited.
    pub category_edit: Option<String>,
    pub new_food_name: String,
    pub new_food_cost: String,
    pub food_edit: Option<FoodEdit>,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            phase: Phase::Loading,
            categories: Vec::new(),
            current_index: 0,
            saving: false,
            new_category_name: String::new(),
            category_edit: None,
            new_food_name: String::new(),
            new_food_cost: String::new(),
            food_edit: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MenuAction {
    Loaded(Vec<Category>),
    LoadFailed(String),

    SetNewCategoryName(String),
    SetCategoryEditName(String),
    SetNewFoodName(String),
    SetNewFoodCost(String),
    SetFoodEditName(String),
    SetFoodEditCost(String),

    StartCategoryEdit,
    CancelCategoryEdit,
    StartFoodEdit(FoodId),
    CancelFoodEdit,
    PrevPage,
    NextPage,

    SavingStarted,
    SavingFinished,

    // Server-confirmed results. `index` is the page the action was started on.
    CategoryAdded(Category),
    CategoryRenamed { index: usize, category: Category },
    CategoryDeleted { index: usize },
    FoodAdded { index: usize, food: Food },
    FoodUpdated { index: usize, food: Food },
    FoodDeleted { index: usize, id: FoodId },
}

impl MenuState {
    pub fn current(&self) -> Option<&Category> {
        self.categories.get(self.current_index)
    }

    /// Row and header triggers (edit, delete) are live only when nothing is
    /// being saved.
    pub fn can_mutate(&self) -> bool {
        !self.saving
    }

    pub fn can_prev(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_next(&self) -> bool {
        self.current_index < self.categories.len().saturating_sub(1)
    }

    pub fn can_add_category(&self) -> bool {
        !self.saving && !self.new_category_name.trim().is_empty()
    }

    pub fn can_save_category_edit(&self) -> bool {
        !self.saving
            && self
                .category_edit
                .as_deref()
                .map_or(false, |name| !name.trim().is_empty())
    }

    pub fn can_add_food(&self) -> bool {
        !self.saving
            && !self.new_food_name.trim().is_empty()
            && !self.new_food_cost.trim().is_empty()
    }

    pub fn editing_food(&self, id: FoodId) -> Option<&FoodEdit> {
        self.food_edit.as_ref().filter(|edit| edit.id == id)
    }

    /// "Trang 2 / 5" style position, 1-based.
    pub fn page_label(&self) -> String {
        format!("Trang {} / {}", self.current_index + 1, self.categories.len())
    }

    fn clamp_index(&mut self) {
        self.current_index = self
            .current_index
            .min(self.categories.len().saturating_sub(1));
    }

    fn apply(&mut self, action: MenuAction) {
        match action {
            MenuAction::Loaded(categories) => {
                self.categories = categories;
                self.current_index = 0;
                self.phase = Phase::Ready;
            }
            MenuAction::LoadFailed(message) => {
                self.phase = Phase::Failed(message);
            }

            MenuAction::SetNewCategoryName(v) => self.new_category_name = v,
            MenuAction::SetCategoryEditName(v) => {
                if let Some(buffer) = self.category_edit.as_mut() {
                    *buffer = v;
                }
            }
            MenuAction::SetNewFoodName(v) => self.new_food_name = v,
            MenuAction::SetNewFoodCost(v) => self.new_food_cost = v,
            MenuAction::SetFoodEditName(v) => {
                if let Some(edit) = self.food_edit.as_mut() {
                    edit.name = v;
                }
            }
            MenuAction::SetFoodEditCost(v) => {
                if let Some(edit) = self.food_edit.as_mut() {
                    edit.cost = v;
                }
            }

            MenuAction::StartCategoryEdit => {
                let name = self.current().map(|c| c.name.clone()).unwrap_or_default();
                self.category_edit = Some(name);
            }
            MenuAction::CancelCategoryEdit => self.category_edit = None,
            MenuAction::StartFoodEdit(id) => {
                let seeded = self.current().and_then(|c| c.food(id)).map(|food| FoodEdit {
                    id: food.id,
                    name: food.name.clone(),
                    cost: cost_to_input(food.cost),
                });
                if seeded.is_some() {
                    self.food_edit = seeded;
                }
            }
            MenuAction::CancelFoodEdit => self.food_edit = None,
            MenuAction::PrevPage => self.current_index = self.current_index.saturating_sub(1),
            MenuAction::NextPage => {
                self.current_index += 1;
                self.clamp_index();
            }

            MenuAction::SavingStarted => self.saving = true,
            MenuAction::SavingFinished => self.saving = false,

            MenuAction::CategoryAdded(category) => {
                self.current_index = self.categories.len();
                self.categories.push(category);
                self.new_category_name.clear();
            }
            MenuAction::CategoryRenamed { index, category } => {
                if let Some(slot) = self.categories.get_mut(index) {
                    *slot = category;
                }
                self.category_edit = None;
            }
            MenuAction::CategoryDeleted { index } => {
                if index < self.categories.len() {
                    self.categories.remove(index);
                }
                self.clamp_index();
            }
            MenuAction::FoodAdded { index, food } => {
                if let Some(category) = self.categories.get_mut(index) {
                    category.foods.push(food);
                }
                self.new_food_name.clear();
                self.new_food_cost.clear();
            }
            MenuAction::FoodUpdated { index, food } => {
                if let Some(category) = self.categories.get_mut(index) {
                    if let Some(slot) = category.foods.iter_mut().find(|f| f.id == food.id) {
                        *slot = food;
                    }
                }
                self.food_edit = None;
            }
            MenuAction::FoodDeleted { index, id } => {
                if let Some(category) = self.categories.get_mut(index) {
                    category.foods.retain(|f| f.id != id);
                }
            }
        }
    }
}

impl Reducible for MenuState {
    type Action = MenuAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::CategoryId;

    pub(crate) fn food(id: i64, name: &str, cost: f64) -> Food {
        Food {
            id: FoodId(id),
            name: name.to_string(),
            cost,
        }
    }

    pub(crate) fn category(id: i64, name: &str, foods: Vec<Food>) -> Category {
        Category {
            id: CategoryId(id),
            name: name.to_string(),
            foods,
        }
    }

    fn loaded(categories: Vec<Category>) -> Rc<MenuState> {
        Rc::new(MenuState::default()).reduce(MenuAction::Loaded(categories))
    }

    fn three_pages() -> Rc<MenuState> {
        loaded(vec![
            category(1, "Phở", vec![food(10, "Phở bò", 45000.0)]),
            category(2, "Cơm", vec![]),
            category(3, "Nước", vec![food(30, "Trà đá", 5000.0)]),
        ])
    }

    fn at_page(state: Rc<MenuState>, index: usize) -> Rc<MenuState> {
        (0..index).fold(state, |s, _| s.reduce(MenuAction::NextPage))
    }

    #[test]
    fn load_enters_ready_on_first_page() {
        let state = three_pages();
        assert_eq!(state.phase, Phase::Ready);
        assert_eq!(state.current_index, 0);
        assert_eq!(state.current().unwrap().name, "Phở");
    }

    #[test]
    fn load_failure_keeps_message() {
        let state = Rc::new(MenuState::default()).reduce(MenuAction::LoadFailed("HTTP 502".into()));
        assert_eq!(state.phase, Phase::Failed("HTTP 502".into()));
    }

    #[test]
    fn pager_is_clamped_and_boundaries_disable_controls() {
        let state = three_pages();
        assert!(!state.can_prev());
        assert!(state.can_next());

        let state = state.reduce(MenuAction::PrevPage);
        assert_eq!(state.current_index, 0);

        let state = at_page(state, 5);
        assert_eq!(state.current_index, 2);
        assert!(state.can_prev());
        assert!(!state.can_next());
        assert_eq!(state.page_label(), "Trang 3 / 3");
    }

    #[test]
    fn empty_list_leaves_pager_inert() {
        let state = loaded(vec![]);
        assert!(!state.can_prev());
        assert!(!state.can_next());
        let state = state.reduce(MenuAction::NextPage).reduce(MenuAction::PrevPage);
        assert_eq!(state.current_index, 0);
        assert!(state.current().is_none());
    }

    #[test]
    fn added_category_opens_its_page() {
        let state = three_pages()
            .reduce(MenuAction::SetNewCategoryName("Chè".into()))
            .reduce(MenuAction::CategoryAdded(category(4, "Chè", vec![])));
        assert_eq!(state.current_index, 3);
        assert_eq!(state.current().unwrap().id, CategoryId(4));
        assert!(state.new_category_name.is_empty());
    }

    #[test]
    fn deleting_last_page_steps_back() {
        let state = at_page(three_pages(), 2).reduce(MenuAction::CategoryDeleted { index: 2 });
        assert_eq!(state.categories.len(), 2);
        assert_eq!(state.current_index, 1);
    }

    #[test]
    fn deleting_middle_page_keeps_index() {
        let state = at_page(three_pages(), 1).reduce(MenuAction::CategoryDeleted { index: 1 });
        assert_eq!(state.current_index, 1);
        assert_eq!(state.current().unwrap().name, "Nước");
    }

    #[test]
    fn deleting_only_category_resets_to_zero() {
        let state = loaded(vec![category(1, "Phở", vec![])])
            .reduce(MenuAction::CategoryDeleted { index: 0 });
        assert!(state.categories.is_empty());
        assert_eq!(state.current_index, 0);
    }

    #[test]
    fn category_edit_seeds_from_current_name() {
        let state = at_page(three_pages(), 1).reduce(MenuAction::StartCategoryEdit);
        assert_eq!(state.category_edit.as_deref(), Some("Cơm"));
        let state = state.reduce(MenuAction::SetCategoryEditName("  ".into()));
        assert!(!state.can_save_category_edit());
        let state = state.reduce(MenuAction::CancelCategoryEdit);
        assert!(state.category_edit.is_none());
    }

    #[test]
    fn typing_outside_edit_mode_is_ignored() {
        let state = three_pages().reduce(MenuAction::SetCategoryEditName("x".into()));
        assert!(state.category_edit.is_none());
    }

    #[test]
    fn rename_replaces_with_server_object() {
        let renamed = category(2, "Cơm tấm", vec![food(21, "Sườn", 40000.0)]);
        let state = at_page(three_pages(), 1)
            .reduce(MenuAction::StartCategoryEdit)
            .reduce(MenuAction::CategoryRenamed {
                index: 1,
                category: renamed.clone(),
            });
        assert_eq!(state.categories[1], renamed);
        assert!(state.category_edit.is_none());
    }

    #[test]
    fn food_edit_seeds_buffers_from_row() {
        let state = three_pages().reduce(MenuAction::StartFoodEdit(FoodId(10)));
        let edit = state.editing_food(FoodId(10)).unwrap();
        assert_eq!(edit.name, "Phở bò");
        assert_eq!(edit.cost, "45000");
        assert!(state.editing_food(FoodId(30)).is_none());
    }

    #[test]
    fn food_edit_of_unknown_row_is_ignored() {
        let state = three_pages().reduce(MenuAction::StartFoodEdit(FoodId(30)));
        assert!(state.food_edit.is_none());
    }

    #[test]
    fn food_results_patch_only_their_page() {
        let state = three_pages()
            .reduce(MenuAction::SetNewFoodName("Phở gà".into()))
            .reduce(MenuAction::SetNewFoodCost("40000".into()))
            .reduce(MenuAction::FoodAdded {
                index: 0,
                food: food(11, "Phở gà", 40000.0),
            });
        assert_eq!(state.categories[0].foods.len(), 2);
        assert_eq!(state.categories[0].foods[1].id, FoodId(11));
        assert!(state.new_food_name.is_empty() && state.new_food_cost.is_empty());

        let state = state
            .reduce(MenuAction::StartFoodEdit(FoodId(10)))
            .reduce(MenuAction::FoodUpdated {
                index: 0,
                food: food(10, "Phở bò tái", 50000.0),
            });
        assert_eq!(state.categories[0].foods[0].name, "Phở bò tái");
        assert!(state.food_edit.is_none());

        let state = state.reduce(MenuAction::FoodDeleted {
            index: 0,
            id: FoodId(10),
        });
        assert_eq!(state.categories[0].foods.len(), 1);
        assert_eq!(state.categories[2].foods.len(), 1);
    }

    #[test]
    fn submit_controls_follow_saving_flag() {
        let state = three_pages()
            .reduce(MenuAction::SetNewCategoryName("Chè".into()))
            .reduce(MenuAction::SetNewFoodName("Bún".into()))
            .reduce(MenuAction::SetNewFoodCost("30000".into()));
        assert!(state.can_add_category());
        assert!(state.can_add_food());

        assert!(state.can_mutate());

        let busy = state.reduce(MenuAction::SavingStarted);
        assert!(!busy.can_add_category());
        assert!(!busy.can_add_food());
        assert!(!busy.can_mutate());

        let idle = busy.reduce(MenuAction::SavingFinished);
        assert!(idle.can_add_category());
        assert!(idle.can_mutate());
    }

    #[test]
    fn add_food_needs_a_cost() {
        let state = three_pages()
            .reduce(MenuAction::SetNewFoodName("Bún".into()))
            .reduce(MenuAction::SetNewFoodCost("   ".into()));
        assert!(!state.can_add_food());
    }
}
