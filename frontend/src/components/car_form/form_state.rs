//! 表单状态管理模块
//!
//! 将零散的 signal 整合为 `FormState` 结构体，负责：
//! - 数据的持有（编辑时从已有记录初始化）
//! - 标签的增删
//! - 数据到 multipart 负载的转换

use carmanager_shared::payload::{CarPayload, ImageFiles};
use carmanager_shared::tags::TagSet;
use carmanager_shared::{Car, ClientResult};
use leptos::prelude::*;

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，适合作为 Props 在组件间传递。
/// 图片不在这里保存，提交时直接从文件输入框读取。
#[derive(Clone, Copy)]
pub struct FormState {
    pub title: RwSignal<String>,
    pub description: RwSignal<String>,
    pub tags: RwSignal<TagSet>,
    /// 标签输入框中尚未添加的内容
    pub current_tag: RwSignal<String>,
    editing_id: StoredValue<Option<String>>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            tags: RwSignal::new(TagSet::new()),
            current_tag: RwSignal::new(String::new()),
            editing_id: StoredValue::new(None),
        }
    }

    /// 编辑模式：用已有记录填充标题、描述和标签，图片不预填
    pub fn for_car(car: Option<&Car>) -> Self {
        let state = Self::new();
        if let Some(car) = car {
            state.title.set(car.title.clone());
            state.description.set(car.description.clone());
            state.tags.set(TagSet::from(car.tags.as_slice()));
            state.editing_id.set_value(Some(car.id.clone()));
        }
        state
    }

    pub fn editing_id(&self) -> Option<String> {
        self.editing_id.get_value()
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.with_value(Option::is_some)
    }

    /// 添加输入框中的标签；只有真正添加后才清空输入框
    pub fn add_current_tag(&self) {
        let raw = self.current_tag.get_untracked();
        let mut added = false;
        self.tags.update(|tags| added = tags.add(&raw));
        if added {
            self.current_tag.set(String::new());
        }
    }

    pub fn remove_tag(&self, tag: &str) {
        self.tags.update(|tags| {
            tags.remove(tag);
        });
    }

    /// 将表单状态转换为 multipart 负载
    pub fn to_payload<F>(&self, images: ImageFiles<F>) -> ClientResult<CarPayload<F>> {
        CarPayload::builder()
            .title(self.title.get_untracked())
            .description(self.description.get_untracked())
            .tags(self.tags.get_untracked())
            .images(images)
            .build()
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
