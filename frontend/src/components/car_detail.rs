//! 车辆详情弹窗
//!
//! 显示全部图片的轮播。索引只存在于弹窗内部，关闭即丢弃。

use carmanager_shared::Car;
use carmanager_shared::carousel::Carousel;
use leptos::prelude::*;

#[component]
pub fn CarDetail(car: Car, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let carousel = RwSignal::new(Carousel::new(car.images.len()));
    let images = StoredValue::new(car.images.clone());

    let current_image = move || {
        let c = carousel.get();
        images.with_value(|imgs| c.current(imgs).unwrap_or_default().to_string())
    };
    let position = move || {
        let c = carousel.get();
        format!("{} / {}", c.index() + 1, c.len())
    };

    let alt = car.title.clone();
    let tags = car.tags.clone();

    view! {
        <div class="fixed inset-0 bg-black/70 flex justify-center items-center z-50">
            <div class="card bg-base-100 w-full max-w-2xl relative">
                <div class="card-body">
                    <button
                        class="btn btn-circle btn-error btn-sm absolute top-4 right-4"
                        on:click=move |_| on_close.run(())
                    >
                        "✕"
                    </button>

                    <Show when=move || !carousel.get().is_empty()>
                        <div class="relative mt-4">
                            <img
                                src=current_image
                                alt=alt.clone()
                                class="w-full h-64 object-cover rounded-box"
                            />
                            <button
                                class="btn btn-sm btn-neutral absolute top-1/2 left-4 -translate-y-1/2"
                                on:click=move |_| carousel.update(|c| c.prev())
                            >
                                "<"
                            </button>
                            <button
                                class="btn btn-sm btn-neutral absolute top-1/2 right-4 -translate-y-1/2"
                                on:click=move |_| carousel.update(|c| c.next())
                            >
                                ">"
                            </button>
                            <span class="badge badge-neutral absolute bottom-2 right-2">{position}</span>
                        </div>
                    </Show>

                    <h2 class="text-2xl font-bold mt-4">{car.title}</h2>
                    <p class="text-base-content/70 mt-2">{car.description}</p>

                    <div class="flex flex-wrap mt-4 gap-2">
                        {tags
                            .into_iter()
                            .map(|tag| view! { <span class="badge badge-ghost">{tag}</span> })
                            .collect_view()}
                    </div>
                </div>
            </div>
        </div>
    }
}
