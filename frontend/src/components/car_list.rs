//! 车辆列表
//!
//! 每个 `(token, search)` 组合发起一次查询；`QueryTracker` 丢弃已被新查询
//! 取代的响应，避免慢请求覆盖最新结果。删除成功后只在本地移除，不重新请求。

use carmanager_shared::query::{CarQuery, QueryTracker};
use carmanager_shared::{Car, remove_car};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::car_detail::CarDetail;

const CONFIRM_DELETE: &str = "Are you sure you want to delete this car?";

#[component]
pub fn CarList(
    #[prop(into)] search: Signal<String>,
    /// 每次递增都强制重新获取
    #[prop(into)] refresh: Signal<u32>,
    #[prop(into)] on_edit: Callback<Car>,
) -> impl IntoView {
    let auth = use_auth();
    let token = auth.token_signal();

    let (cars, set_cars) = signal(Vec::<Car>::new());
    let (error, set_error) = signal(Option::<String>::None);
    let (loading, set_loading) = signal(false);
    let (selected, set_selected) = signal(Option::<Car>::None);
    let tracker = StoredValue::new(QueryTracker::new());

    Effect::new(move |_| {
        refresh.track();
        let search = search.get();
        let Some(token) = token.get() else {
            tracker.update_value(|t| t.invalidate());
            return;
        };

        let repo = auth.repository_for(token.clone());
        let mut ticket = None;
        tracker.update_value(|t| ticket = Some(t.begin(CarQuery::new(token, search))));
        let Some(ticket) = ticket else {
            return;
        };

        set_loading.set(true);
        spawn_local(async move {
            let result = repo.list(&ticket.query.search).await;

            let is_current = tracker
                .try_with_value(|t| t.is_current(&ticket))
                .unwrap_or(false);
            if !is_current {
                log::debug!("dropping superseded response for {:?}", ticket.query.search);
                return;
            }

            match result {
                Ok(list) => {
                    set_cars.set(list);
                    set_error.set(None);
                }
                // 保留上一次的列表，只显示错误
                Err(e) => set_error.set(Some(e.message().to_string())),
            }
            set_loading.set(false);
        });
    });

    let handle_delete = move |id: String| {
        let confirmed = window()
            .confirm_with_message(CONFIRM_DELETE)
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        let Some(repo) = auth.repository() else {
            return;
        };

        spawn_local(async move {
            match repo.delete(&id).await {
                Ok(()) => set_cars.update(|list| remove_car(list, &id)),
                Err(e) => set_error.set(Some(e.message().to_string())),
            }
        });
    };

    view! {
        <Show when=move || error.get().is_some()>
            <div role="alert" class="alert alert-error mb-4">
                <span>{move || error.get().unwrap_or_default()}</span>
            </div>
        </Show>

        <Show when=move || loading.get() && cars.with(|c| c.is_empty())>
            <div class="text-center py-8 text-base-content/50">
                <span class="loading loading-spinner loading-md"></span>
            </div>
        </Show>

        <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-6">
            <For
                each=move || cars.get()
                key=|car| car.id.clone()
                children=move |car| {
                    let id = car.id.clone();
                    let for_view = car.clone();
                    let for_edit = car.clone();
                    view! {
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body p-4">
                                {car.cover_image().map(|src| view! {
                                    <img
                                        src=src.to_string()
                                        alt=car.title.clone()
                                        class="w-full h-48 object-cover rounded-box mb-2"
                                    />
                                })}
                                <h2 class="card-title">{car.title.clone()}</h2>
                                <p class="text-base-content/70">{car.description.clone()}</p>

                                <div class="flex flex-wrap mt-2 gap-1">
                                    {if car.tags.is_empty() {
                                        view! {
                                            <span class="text-base-content/50 text-sm">"No tags available"</span>
                                        }.into_any()
                                    } else {
                                        car.tags
                                            .iter()
                                            .map(|tag| view! { <span class="badge badge-ghost">{tag.clone()}</span> })
                                            .collect_view()
                                            .into_any()
                                    }}
                                </div>

                                <div class="card-actions justify-between mt-4">
                                    <button
                                        class="btn btn-info btn-sm"
                                        on:click=move |_| set_selected.set(Some(for_view.clone()))
                                    >
                                        "View"
                                    </button>
                                    <button
                                        class="btn btn-warning btn-sm"
                                        on:click=move |_| on_edit.run(for_edit.clone())
                                    >
                                        "Edit"
                                    </button>
                                    <button
                                        class="btn btn-error btn-sm"
                                        on:click=move |_| handle_delete(id.clone())
                                    >
                                        "Delete"
                                    </button>
                                </div>
                            </div>
                        </div>
                    }
                }
            />
        </div>

        {move || {
            selected
                .get()
                .map(|car| view! { <CarDetail car=car on_close=move |_| set_selected.set(None) /> })
        }}
    }
}
