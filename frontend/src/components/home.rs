//! 主页面
//!
//! 在列表视图和表单视图之间切换。表单保存成功后递增 `refresh`，
//! 列表据此重新获取数据。

use carmanager_shared::Car;
use leptos::prelude::*;

use crate::auth::{logout, use_auth};
use crate::components::car_form::CarForm;
use crate::components::car_list::CarList;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PageView {
    List,
    Form,
}

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();

    let (page, set_page) = signal(PageView::List);
    // 编辑中的记录；`None` 表示新建
    let (editing, set_editing) = signal(Option::<Car>::None);
    let (search, set_search) = signal(String::new());
    let refresh = RwSignal::new(0u32);

    let open_create = move |_| {
        set_editing.set(None);
        set_page.set(PageView::Form);
    };
    let open_edit = move |car: Car| {
        set_editing.set(Some(car));
        set_page.set(PageView::Form);
    };
    let close_form = move |_: ()| set_page.set(PageView::List);
    let on_saved = move |_: ()| refresh.update(|n| *n = n.wrapping_add(1));

    view! {
        <div class="min-h-screen bg-base-200">
            <div class="navbar bg-base-100 shadow-sm px-4">
                <div class="flex-1">
                    <h1 class="text-xl font-bold">"Car Manager"</h1>
                </div>
                <div class="flex-none">
                    <button class="btn btn-ghost btn-sm" on:click=move |_| logout(&auth)>
                        "Logout"
                    </button>
                </div>
            </div>

            <main class="container mx-auto p-4 md:p-8">
                {move || match page.get() {
                    PageView::Form => view! {
                        <CarForm
                            car=editing.get_untracked()
                            on_saved=on_saved
                            on_close=close_form
                        />
                    }
                    .into_any(),
                    PageView::List => view! {
                        <div class="flex flex-col sm:flex-row gap-4 mb-6">
                            <button class="btn btn-primary" on:click=open_create>
                                "Add New Car"
                            </button>
                            <input
                                type="text"
                                placeholder="Search cars..."
                                class="input input-bordered flex-grow"
                                prop:value=move || search.get()
                                on:input=move |ev| set_search.set(event_target_value(&ev))
                            />
                        </div>
                        <CarList search=search refresh=refresh on_edit=open_edit />
                    }
                    .into_any(),
                }}
            </main>
        </div>
    }
}
