//! User intents become network calls in two steps. [`plan`] looks at the
//! current state and validates input without touching the network; [`perform`]
//! asks for confirmation, brackets the call with the saving flag, and feeds the
//! server's answer back as a [`MenuAction`].

use crate::api::{ApiError, MenuApi};
use crate::dialogs::Dialogs;
use crate::format::parse_float_prefix;
use crate::model::{CategoryId, FoodId, FoodPatch, NewFood};
use crate::state::{MenuAction, MenuState};

pub const LOAD_FAILED: &str = "Lỗi tải dữ liệu";
pub const INVALID_NEW_FOOD: &str = "Tên và giá món không hợp lệ";
pub const INVALID_FOOD_COST: &str = "Giá món không hợp lệ";
pub const CONFIRM_DELETE_CATEGORY: &str = "Xóa danh mục này? Các món thuộc danh mục cũng sẽ bị xóa.";
pub const CONFIRM_DELETE_FOOD: &str = "Xóa món này?";

#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    AddCategory,
    SaveCategoryEdit,
    DeleteCategory,
    AddFood,
    SaveFoodEdit(FoodId),
    DeleteFood(FoodId),
}

/// A validated server call, carrying the page index it applies to.
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    AddCategory {
        name: String,
    },
    RenameCategory {
        index: usize,
        id: CategoryId,
        name: String,
    },
    DeleteCategory {
        index: usize,
        id: CategoryId,
    },
    AddFood {
        index: usize,
        category: CategoryId,
        food: NewFood,
    },
    UpdateFood {
        index: usize,
        id: FoodId,
        patch: FoodPatch,
    },
    DeleteFood {
        index: usize,
        id: FoodId,
    },
}

impl Mutation {
    /// Alert text used when the error itself carries no message.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Mutation::AddCategory { .. } => "Không thể thêm danh mục",
            Mutation::RenameCategory { .. } => "Không thể cập nhật danh mục",
            Mutation::DeleteCategory { .. } => "Không thể xóa danh mục",
            Mutation::AddFood { .. } => "Không thể thêm món",
            Mutation::UpdateFood { .. } => "Không thể cập nhật món",
            Mutation::DeleteFood { .. } => "Không thể xóa món",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Plan {
    /// Nothing to do and nothing to tell the user.
    Skip,
    /// Input rejected before any request; shown as an alert.
    Invalid(&'static str),
    /// Resolved locally without a request.
    Local(MenuAction),
    Confirm {
        prompt: &'static str,
        mutation: Mutation,
    },
    Run(Mutation),
}

/// Decides what an intent means against the state it was triggered from.
///
/// Mutations are refused while another one is in flight, so overlapping calls
/// cannot be issued even programmatically.
pub fn plan(state: &MenuState, intent: Intent) -> Plan {
    if state.saving {
        return Plan::Skip;
    }
    let index = state.current_index;

    match intent {
        Intent::AddCategory => {
            let name = state.new_category_name.trim();
            if name.is_empty() {
                return Plan::Skip;
            }
            Plan::Run(Mutation::AddCategory {
                name: name.to_string(),
            })
        }

        Intent::SaveCategoryEdit => {
            let (Some(current), Some(buffer)) = (state.current(), state.category_edit.as_deref())
            else {
                return Plan::Skip;
            };
            let name = buffer.trim();
            if name.is_empty() {
                return Plan::Skip;
            }
            Plan::Run(Mutation::RenameCategory {
                index,
                id: current.id,
                name: name.to_string(),
            })
        }

        Intent::DeleteCategory => match state.current() {
            Some(current) => Plan::Confirm {
                prompt: CONFIRM_DELETE_CATEGORY,
                mutation: Mutation::DeleteCategory {
                    index,
                    id: current.id,
                },
            },
            None => Plan::Skip,
        },

        Intent::AddFood => {
            let Some(current) = state.current() else {
                return Plan::Skip;
            };
            let name = state.new_food_name.trim();
            let cost = parse_cost(&state.new_food_cost);
            match cost {
                Some(cost) if !name.is_empty() => Plan::Run(Mutation::AddFood {
                    index,
                    category: current.id,
                    food: NewFood {
                        name: name.to_string(),
                        cost,
                    },
                }),
                _ => Plan::Invalid(INVALID_NEW_FOOD),
            }
        }

        Intent::SaveFoodEdit(id) => {
            let Some(edit) = state.editing_food(id) else {
                return Plan::Skip;
            };
            if state.current().is_none() {
                return Plan::Skip;
            }
            let name = edit.name.trim();
            if name.is_empty() && edit.cost.is_empty() {
                return Plan::Local(MenuAction::CancelFoodEdit);
            }
            let cost = if edit.cost.is_empty() {
                None
            } else {
                match parse_cost(&edit.cost) {
                    Some(cost) => Some(cost),
                    None => return Plan::Invalid(INVALID_FOOD_COST),
                }
            };
            Plan::Run(Mutation::UpdateFood {
                index,
                id,
                patch: FoodPatch {
                    name: (!name.is_empty()).then(|| name.to_string()),
                    cost,
                },
            })
        }

        Intent::DeleteFood(id) => match state.current() {
            Some(_) => Plan::Confirm {
                prompt: CONFIRM_DELETE_FOOD,
                mutation: Mutation::DeleteFood { index, id },
            },
            None => Plan::Skip,
        },
    }
}

/// Cost inputs accept any leading number, so `"12abc"` is `12`. Values that
/// cannot be sent as JSON numbers are rejected.
fn parse_cost(text: &str) -> Option<f64> {
    parse_float_prefix(text).filter(|cost| cost.is_finite())
}

async fn execute<A>(api: &A, mutation: Mutation) -> Result<MenuAction, ApiError>
where
    A: MenuApi + ?Sized,
{
    let action = match mutation {
        Mutation::AddCategory { name } => MenuAction::CategoryAdded(api.add_category(&name).await?),
        Mutation::RenameCategory { index, id, name } => MenuAction::CategoryRenamed {
            index,
            category: api.rename_category(id, &name).await?,
        },
        Mutation::DeleteCategory { index, id } => {
            api.delete_category(id).await?;
            MenuAction::CategoryDeleted { index }
        }
        Mutation::AddFood {
            index,
            category,
            food,
        } => MenuAction::FoodAdded {
            index,
            food: api.add_food(category, &food).await?,
        },
        Mutation::UpdateFood { index, id, patch } => MenuAction::FoodUpdated {
            index,
            food: api.update_food(id, &patch).await?,
        },
        Mutation::DeleteFood { index, id } => {
            api.delete_food(id).await?;
            MenuAction::FoodDeleted { index, id }
        }
    };
    Ok(action)
}

/// Carries out a plan. Failures are shown to the user and leave the cached
/// menu untouched.
pub async fn perform<A, D, F>(api: &A, dialogs: &D, plan: Plan, dispatch: F)
where
    A: MenuApi + ?Sized,
    D: Dialogs + ?Sized,
    F: Fn(MenuAction),
{
    let mutation = match plan {
        Plan::Skip => return,
        Plan::Invalid(message) => {
            dialogs.alert(message);
            return;
        }
        Plan::Local(action) => {
            dispatch(action);
            return;
        }
        Plan::Confirm { prompt, mutation } => {
            if !dialogs.confirm(prompt) {
                return;
            }
            mutation
        }
        Plan::Run(mutation) => mutation,
    };

    let fallback = mutation.failure_message();
    log::debug!("sending {:?}", mutation);
    dispatch(MenuAction::SavingStarted);
    match execute(api, mutation).await {
        Ok(action) => dispatch(action),
        Err(err) => {
            log::warn!("{} (status {:?}): {}", fallback, err.status(), err);
            let message = err.to_string();
            dialogs.alert(if message.is_empty() { fallback } else { message.as_str() });
        }
    }
    dispatch(MenuAction::SavingFinished);
}

/// Plans and performs in one go.
pub async fn run<A, D, F>(api: &A, dialogs: &D, state: &MenuState, intent: Intent, dispatch: F)
where
    A: MenuApi + ?Sized,
    D: Dialogs + ?Sized,
    F: Fn(MenuAction),
{
    let plan = plan(state, intent);
    perform(api, dialogs, plan, dispatch).await;
}

/// The one-time startup fetch. If `is_alive` reports the view is gone by the
/// time the reply lands, the result is dropped.
pub async fn load_categories<A, L, F>(api: &A, is_alive: L, dispatch: F)
where
    A: MenuApi + ?Sized,
    L: Fn() -> bool,
    F: Fn(MenuAction),
{
    let result = api.list_categories().await;
    if !is_alive() {
        log::debug!("menu view closed before categories arrived, dropping result");
        return;
    }
    match result {
        Ok(categories) => {
            log::info!("loaded {} categories", categories.len());
            dispatch(MenuAction::Loaded(categories));
        }
        Err(err) => {
            log::error!("failed to load categories: {}", err);
            let message = err.to_string();
            let message = if message.is_empty() {
                LOAD_FAILED.to_string()
            } else {
                message
            };
            dispatch(MenuAction::LoadFailed(message));
        }
    }
}
