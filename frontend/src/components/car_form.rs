mod form_state;
mod tag_editor;

use carmanager_shared::Car;
use carmanager_shared::payload::ImageFiles;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

use crate::auth::use_auth;
use form_state::FormState;
use tag_editor::TagEditor;

/// 读取文件输入框中用户选择的文件，保持选择顺序
fn selected_files(input: NodeRef<leptos::html::Input>) -> Vec<File> {
    let Some(files) = input.get_untracked().and_then(|el| el.files()) else {
        return Vec::new();
    };
    (0..files.length()).filter_map(|i| files.get(i)).collect()
}

/// 创建/编辑表单
///
/// `car` 为 `Some` 时是编辑模式。提交失败时表单保持打开，字段内容不变。
#[component]
pub fn CarForm(
    car: Option<Car>,
    /// 保存成功后通知父组件刷新列表
    #[prop(into)]
    on_saved: Callback<()>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let auth = use_auth();
    let state = FormState::for_car(car.as_ref());
    let file_input = NodeRef::<leptos::html::Input>::new();

    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let payload = ImageFiles::new(selected_files(file_input))
            .and_then(|images| state.to_payload(images));
        let payload = match payload {
            Ok(payload) => payload,
            Err(e) => {
                set_error.set(Some(e.message().to_string()));
                return;
            }
        };
        let Some(repo) = auth.repository() else {
            return;
        };

        set_submitting.set(true);
        set_error.set(None);
        let editing_id = state.editing_id();

        spawn_local(async move {
            let result = match editing_id {
                Some(id) => repo.update(&id, payload).await,
                None => repo.create(payload).await,
            };
            set_submitting.set(false);

            match result {
                Ok(()) => {
                    on_saved.run(());
                    on_close.run(());
                }
                Err(e) => set_error.set(Some(e.message().to_string())),
            }
        });
    };

    let is_editing = state.is_editing();

    view! {
        <form on:submit=on_submit class="max-w-2xl mx-auto p-6 space-y-4 card bg-base-100 shadow-xl">
            <h1 class="text-2xl font-bold mb-4">
                {if is_editing { "Edit Car" } else { "Add New Car" }}
            </h1>

            <Show when=move || error.get().is_some()>
                <div role="alert" class="alert alert-error">
                    <span>{move || error.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <div class="form-control">
                <label class="label">
                    <span class="label-text">"Title"</span>
                </label>
                <input
                    type="text"
                    required
                    class="input input-bordered w-full"
                    prop:value=move || state.title.get()
                    on:input=move |ev| state.title.set(event_target_value(&ev))
                />
            </div>

            <div class="form-control">
                <label class="label">
                    <span class="label-text">"Description"</span>
                </label>
                <textarea
                    required
                    class="textarea textarea-bordered w-full"
                    prop:value=move || state.description.get()
                    on:input=move |ev| state.description.set(event_target_value(&ev))
                ></textarea>
            </div>

            <TagEditor state=state />

            <div class="form-control">
                <label class="label">
                    <span class="label-text">"Images"</span>
                </label>
                <input
                    type="file"
                    multiple
                    accept="image/*"
                    node_ref=file_input
                    class="file-input file-input-bordered w-full"
                />
                <label class="label">
                    <span class="label-text-alt text-base-content/50">"You can upload up to 10 images."</span>
                </label>
            </div>

            <button type="submit" class="btn btn-primary w-full" disabled=move || submitting.get()>
                {move || match (submitting.get(), is_editing) {
                    (true, _) => view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any(),
                    (false, true) => "Update Car".into_any(),
                    (false, false) => "Add Car".into_any(),
                }}
            </button>
            <button type="button" class="btn btn-ghost w-full" on:click=move |_| on_close.run(())>
                "Cancel"
            </button>
        </form>
    }
}
