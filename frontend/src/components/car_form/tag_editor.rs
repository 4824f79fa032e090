//! 标签编辑组件
//!
//! 回车或点击 "Add Tag" 添加标签，每个标签带删除按钮。

use leptos::prelude::*;

use super::form_state::FormState;

#[component]
pub fn TagEditor(state: FormState) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text">"Tags"</span>
            </label>
            <div class="join w-full">
                <input
                    type="text"
                    placeholder="Enter a tag"
                    class="input input-bordered join-item flex-grow"
                    prop:value=move || state.current_tag.get()
                    on:input=move |ev| state.current_tag.set(event_target_value(&ev))
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        // 回车只添加标签，不提交整个表单
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            state.add_current_tag();
                        }
                    }
                />
                <button
                    type="button"
                    class="btn btn-primary join-item"
                    on:click=move |_| state.add_current_tag()
                >
                    "Add Tag"
                </button>
            </div>

            <div class="mt-2 flex flex-wrap gap-2">
                <For
                    each=move || state.tags.get().as_slice().to_vec()
                    key=|tag| tag.clone()
                    children=move |tag| {
                        let to_remove = tag.clone();
                        view! {
                            <div class="badge badge-lg gap-2">
                                <span>{tag}</span>
                                <button
                                    type="button"
                                    class="text-error"
                                    on:click=move |_| state.remove_tag(&to_remove)
                                >
                                    "✕"
                                </button>
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}
