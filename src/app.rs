use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::controller::{self, Intent};
use crate::dialogs::BrowserDialogs;
use crate::format::format_vnd;
use crate::model::Food;
use crate::state::{FoodEdit, MenuAction, MenuState, Phase};

fn input_action(
    on_action: &Callback<MenuAction>,
    make: fn(String) -> MenuAction,
) -> Callback<InputEvent> {
    let on_action = on_action.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        on_action.emit(make(input.value()));
    })
}

fn submit_intent(on_intent: &Callback<Intent>, intent: Intent) -> Callback<SubmitEvent> {
    let on_intent = on_intent.clone();
    Callback::from(move |e: SubmitEvent| {
        e.prevent_default();
        on_intent.emit(intent.clone());
    })
}

fn click_intent(on_intent: &Callback<Intent>, intent: Intent) -> Callback<MouseEvent> {
    let on_intent = on_intent.clone();
    Callback::from(move |_| on_intent.emit(intent.clone()))
}

fn click_action(on_action: &Callback<MenuAction>, action: MenuAction) -> Callback<MouseEvent> {
    let on_action = on_action.clone();
    Callback::from(move |_| on_action.emit(action.clone()))
}

#[derive(Properties, PartialEq)]
struct AddCategoryFormProps {
    name: String,
    enabled: bool,
    on_action: Callback<MenuAction>,
    on_intent: Callback<Intent>,
}

#[function_component(AddCategoryForm)]
fn add_category_form(props: &AddCategoryFormProps) -> Html {
    html! {
        <section class="bg-white rounded-xl shadow ring-1 ring-black/5 p-6">
            <h2 class="text-lg font-semibold mb-3">{"Thêm danh mục"}</h2>
            <form onsubmit={submit_intent(&props.on_intent, Intent::AddCategory)} class="flex gap-3">
                <input
                    class="flex-1 rounded-md border border-gray-300 px-3 py-2 focus:outline-none focus:ring-2 focus:ring-amber-400"
                    placeholder="Tên danh mục..."
                    value={props.name.clone()}
                    oninput={input_action(&props.on_action, MenuAction::SetNewCategoryName)}
                />
                <button
                    type="submit"
                    disabled={!props.enabled}
                    class="px-4 py-2 rounded-md bg-amber-500 text-white hover:bg-amber-600 disabled:opacity-40"
                >
                    {"Thêm"}
                </button>
            </form>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct CategoryHeaderProps {
    name: String,
    edit: Option<String>,
    can_save: bool,
    saving: bool,
    on_action: Callback<MenuAction>,
    on_intent: Callback<Intent>,
}

#[function_component(CategoryHeader)]
fn category_header(props: &CategoryHeaderProps) -> Html {
    let title = match &props.edit {
        None => html! {
            <h2 class="text-2xl md:text-3xl font-serif font-bold text-amber-900">{ props.name.clone() }</h2>
        },
        Some(buffer) => html! {
            <input
                class="rounded-md border border-amber-300 bg-white/80 px-3 py-1.5 focus:outline-none focus:ring-2 focus:ring-amber-400"
                value={buffer.clone()}
                oninput={input_action(&props.on_action, MenuAction::SetCategoryEditName)}
            />
        },
    };

    let controls = if props.edit.is_none() {
        html! {
            <>
                <button
                    disabled={props.saving}
                    onclick={click_action(&props.on_action, MenuAction::StartCategoryEdit)}
                    class="px-3 py-1.5 rounded-md border border-gray-200 bg-white text-gray-700 hover:bg-gray-50 disabled:opacity-40"
                >
                    {"Sửa tên"}
                </button>
                <button
                    disabled={props.saving}
                    onclick={click_intent(&props.on_intent, Intent::DeleteCategory)}
                    class="px-3 py-1.5 rounded-md border border-red-200 bg-red-50 text-red-700 hover:bg-red-100 disabled:opacity-40"
                >
                    {"Xóa"}
                </button>
            </>
        }
    } else {
        html! {
            <>
                <button
                    disabled={!props.can_save}
                    onclick={click_intent(&props.on_intent, Intent::SaveCategoryEdit)}
                    class="px-3 py-1.5 rounded-md bg-amber-500 text-white hover:bg-amber-600 disabled:opacity-40"
                >
                    {"Lưu"}
                </button>
                <button
                    onclick={click_action(&props.on_action, MenuAction::CancelCategoryEdit)}
                    class="px-3 py-1.5 rounded-md border border-gray-200 bg-white text-gray-700 hover:bg-gray-50"
                >
                    {"Hủy"}
                </button>
            </>
        }
    };

    html! {
        <div class="border-b border-amber-200/60 px-6 py-5 bg-gradient-to-r from-amber-50 to-amber-100">
            <div class="flex items-center justify-between">
                <div class="inline-flex items-center gap-2">
                    <span class="px-2.5 py-1 rounded-md text-xs font-semibold bg-amber-200/60 text-amber-900 ring-1 ring-amber-300/60">
                        {"Danh mục"}
                    </span>
                    { title }
                </div>
                <div class="flex items-center gap-2">{ controls }</div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct FoodRowProps {
    food: Food,
    edit: Option<FoodEdit>,
    saving: bool,
    on_action: Callback<MenuAction>,
    on_intent: Callback<Intent>,
}

#[function_component(FoodRow)]
fn food_row(props: &FoodRowProps) -> Html {
    let id = props.food.id;

    if let Some(edit) = &props.edit {
        return html! {
            <li class="py-3">
                <div class="flex items-center gap-3">
                    <input
                        class="flex-1 rounded-md border border-gray-300 px-3 py-2 focus:outline-none focus:ring-2 focus:ring-amber-400"
                        placeholder="Tên món"
                        value={edit.name.clone()}
                        oninput={input_action(&props.on_action, MenuAction::SetFoodEditName)}
                    />
                    <input
                        class="w-40 rounded-md border border-gray-300 px-3 py-2 focus:outline-none focus:ring-2 focus:ring-amber-400"
                        placeholder="Giá"
                        inputmode="decimal"
                        value={edit.cost.clone()}
                        oninput={input_action(&props.on_action, MenuAction::SetFoodEditCost)}
                    />
                    <button
                        disabled={props.saving}
                        onclick={click_intent(&props.on_intent, Intent::SaveFoodEdit(id))}
                        class="px-3 py-2 rounded-md bg-amber-500 text-white hover:bg-amber-600 disabled:opacity-40"
                    >
                        {"Lưu"}
                    </button>
                    <button
                        onclick={click_action(&props.on_action, MenuAction::CancelFoodEdit)}
                        class="px-3 py-2 rounded-md border border-gray-200 bg-white text-gray-700 hover:bg-gray-50"
                    >
                        {"Hủy"}
                    </button>
                </div>
            </li>
        };
    }

    html! {
        <li class="py-3">
            <div class="flex items-baseline gap-4">
                <span class="text-gray-900 font-medium tracking-tight">{ props.food.name.clone() }</span>
                <span class="ml-auto text-amber-700 font-semibold tabular-nums">{ format_vnd(props.food.cost) }</span>
                <div class="ml-3 flex items-center gap-2">
                    <button
                        disabled={props.saving}
                        onclick={click_action(&props.on_action, MenuAction::StartFoodEdit(id))}
                        class="px-3 py-1.5 rounded-md border border-gray-200 bg-white text-gray-700 hover:bg-gray-50 disabled:opacity-40"
                    >
                        {"Sửa"}
                    </button>
                    <button
                        disabled={props.saving}
                        onclick={click_intent(&props.on_intent, Intent::DeleteFood(id))}
                        class="px-3 py-1.5 rounded-md border border-red-200 bg-red-50 text-red-700 hover:bg-red-100 disabled:opacity-40"
                    >
                        {"Xóa"}
                    </button>
                </div>
            </div>
        </li>
    }
}

#[derive(Properties, PartialEq)]
struct MenuPageProps {
    state: MenuState,
    on_action: Callback<MenuAction>,
    on_intent: Callback<Intent>,
}

#[function_component(MenuPage)]
fn menu_page(props: &MenuPageProps) -> Html {
    let state = &props.state;
    let Some(current) = state.current() else {
        return html! {};
    };

    let foods = if current.foods.is_empty() {
        html! { <div class="text-gray-500">{"Danh mục này chưa có món"}</div> }
    } else {
        html! {
            <ul class="divide-y divide-amber-100">
                { for current.foods.iter().map(|food| html! {
                    <FoodRow
                        key={food.id.0}
                        food={food.clone()}
                        edit={state.editing_food(food.id).cloned()}
                        saving={!state.can_mutate()}
                        on_action={props.on_action.clone()}
                        on_intent={props.on_intent.clone()}
                    />
                }) }
            </ul>
        }
    };

    html! {
        <section aria-label="menu-page" class="relative overflow-hidden rounded-2xl bg-paper-50 ring-1 ring-black/5 shadow">
            <div class="pointer-events-none absolute inset-y-0 left-0 w-6 bg-gradient-to-r from-black/5 to-transparent"></div>

            <CategoryHeader
                name={current.name.clone()}
                edit={state.category_edit.clone()}
                can_save={state.can_save_category_edit()}
                saving={!state.can_mutate()}
                on_action={props.on_action.clone()}
                on_intent={props.on_intent.clone()}
            />

            <div class="p-6 md:p-8">
                { foods }

                <form onsubmit={submit_intent(&props.on_intent, Intent::AddFood)} class="mt-6 flex flex-wrap items-center gap-3">
                    <input
                        class="flex-1 min-w-[200px] rounded-md border border-gray-300 px-3 py-2 focus:outline-none focus:ring-2 focus:ring-amber-400"
                        placeholder="Tên món..."
                        value={state.new_food_name.clone()}
                        oninput={input_action(&props.on_action, MenuAction::SetNewFoodName)}
                    />
                    <input
                        class="w-48 rounded-md border border-gray-300 px-3 py-2 focus:outline-none focus:ring-2 focus:ring-amber-400"
                        placeholder="Giá"
                        inputmode="decimal"
                        value={state.new_food_cost.clone()}
                        oninput={input_action(&props.on_action, MenuAction::SetNewFoodCost)}
                    />
                    <button
                        type="submit"
                        disabled={!state.can_add_food()}
                        class="px-4 py-2 rounded-md bg-amber-500 text-white hover:bg-amber-600 disabled:opacity-40"
                    >
                        {"Thêm món"}
                    </button>
                </form>
            </div>

            <div class="px-6 py-3 border-t border-amber-100 bg-white/70 backdrop-blur">
                <div class="text-center text-sm text-gray-500">{ state.page_label() }</div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct PagerProps {
    can_prev: bool,
    can_next: bool,
    on_action: Callback<MenuAction>,
}

#[function_component(Pager)]
fn pager(props: &PagerProps) -> Html {
    html! {
        <footer class="flex items-center justify-between gap-3">
            <button
                onclick={click_action(&props.on_action, MenuAction::PrevPage)}
                disabled={!props.can_prev}
                class="inline-flex items-center gap-2 px-4 py-2 rounded-full border border-gray-200 bg-white text-gray-700 hover:bg-gray-50 disabled:opacity-40"
            >
                { icon_arrow_left() }
                <span>{"Trang trước"}</span>
            </button>
            <button
                onclick={click_action(&props.on_action, MenuAction::NextPage)}
                disabled={!props.can_next}
                class="inline-flex items-center gap-2 px-5 py-2.5 rounded-full border border-amber-300 bg-amber-500 text-white hover:bg-amber-600 disabled:opacity-40"
            >
                <span>{"Trang sau"}</span>
                { icon_arrow_right() }
            </button>
        </footer>
    }
}

fn centered(class: &'static str, text: String) -> Html {
    html! {
        <main class="min-h-screen flex items-center justify-center">
            <div class={class}>{ text }</div>
        </main>
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: ClientConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let api = use_memo(|config| ApiClient::new(config.clone()), props.config.clone());
    let state = use_reducer(MenuState::default);

    {
        let api = api.clone();
        let dispatcher = state.dispatcher();
        use_effect_with_deps(
            move |_| {
                let alive = Rc::new(Cell::new(true));
                let still_alive = alive.clone();
                spawn_local(async move {
                    controller::load_categories(
                        &*api,
                        move || still_alive.get(),
                        move |action| dispatcher.dispatch(action),
                    )
                    .await;
                });
                move || alive.set(false)
            },
            (),
        );
    }

    let on_action = {
        let dispatcher = state.dispatcher();
        Callback::from(move |action: MenuAction| dispatcher.dispatch(action))
    };

    let on_intent = {
        let state = state.clone();
        let api = api.clone();
        Callback::from(move |intent: Intent| {
            let snapshot = (*state).clone();
            let dispatcher = state.dispatcher();
            let api = api.clone();
            spawn_local(async move {
                controller::run(&*api, &BrowserDialogs, &snapshot, intent, move |action| {
                    dispatcher.dispatch(action)
                })
                .await;
            });
        })
    };

    match &state.phase {
        Phase::Loading => return centered("text-gray-600", "Đang tải menu…".to_string()),
        Phase::Failed(message) => return centered("text-red-600", format!("Lỗi: {}", message)),
        Phase::Ready => {}
    }

    let add_form = html! {
        <AddCategoryForm
            name={state.new_category_name.clone()}
            enabled={state.can_add_category()}
            on_action={on_action.clone()}
            on_intent={on_intent.clone()}
        />
    };

    if state.categories.is_empty() {
        return html! {
            <main class="min-h-screen px-4 py-10">
                <div class="mx-auto max-w-4xl space-y-6">
                    { add_form }
                    <div class="text-gray-600">{"Chưa có danh mục nào"}</div>
                </div>
            </main>
        };
    }

    html! {
        <main class="min-h-screen px-4 py-10">
            <div class="mx-auto max-w-4xl space-y-6">
                { add_form }
                <MenuPage
                    state={(*state).clone()}
                    on_action={on_action.clone()}
                    on_intent={on_intent}
                />
                <Pager can_prev={state.can_prev()} can_next={state.can_next()} on_action={on_action} />
            </div>
        </main>
    }
}

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

fn icon_arrow_left() -> Html {
    icon_base("M19 12H5M12 19l-7-7 7-7")
}

fn icon_arrow_right() -> Html {
    icon_base("M5 12h14M12 5l7 7-7 7")
}
