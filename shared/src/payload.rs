//! 车辆创建/更新的 multipart 负载
//!
//! `CarPayload::builder()` 用类型状态约束必填字段：未设置 title 和
//! description 时 `build()` 不存在。图片数量上限在 `ImageFiles` 构造时检查。

use std::marker::PhantomData;

use crate::MAX_IMAGES;
use crate::client::FormPart;
use crate::error::{ClientError, ClientResult};
use crate::tags::TagSet;

// =========================================================
// 图片列表
// =========================================================

/// 最多 `MAX_IMAGES` 个待上传文件，保持用户选择的顺序
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFiles<F>(Vec<F>);

impl<F> ImageFiles<F> {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn new(files: Vec<F>) -> ClientResult<Self> {
        if files.len() > MAX_IMAGES {
            return Err(ClientError::invalid_input(format!(
                "You can upload up to {} images.",
                MAX_IMAGES
            ))
            .in_op_with("payload.images", files.len().to_string()));
        }
        Ok(Self(files))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<F> Default for ImageFiles<F> {
    fn default() -> Self {
        Self::empty()
    }
}

// =========================================================
// 负载
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CarPayload<F> {
    title: String,
    description: String,
    tags: TagSet,
    images: ImageFiles<F>,
}

impl<F> CarPayload<F> {
    pub fn builder() -> CarPayloadBuilder<F, Missing, Missing> {
        CarPayloadBuilder {
            title: None,
            description: None,
            tags: TagSet::new(),
            images: ImageFiles::empty(),
            _state: PhantomData,
        }
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// 按服务器期望的字段顺序展开：title, description, tags(JSON), images...
    pub fn into_parts(self) -> Vec<FormPart<F>> {
        let mut parts = Vec::with_capacity(3 + self.images.len());
        parts.push(FormPart::Text {
            name: "title",
            value: self.title,
        });
        parts.push(FormPart::Text {
            name: "description",
            value: self.description,
        });
        parts.push(FormPart::Text {
            name: "tags",
            value: self.tags.to_json(),
        });
        for file in self.images.0 {
            parts.push(FormPart::File {
                name: "images",
                file,
            });
        }
        parts
    }
}

// =========================================================
// 类型状态构建器
// =========================================================

/// 必填字段尚未设置
#[derive(Debug)]
pub struct Missing;
/// 必填字段已设置
#[derive(Debug)]
pub struct Provided;

#[derive(Debug)]
pub struct CarPayloadBuilder<F, T, D> {
    title: Option<String>,
    description: Option<String>,
    tags: TagSet,
    images: ImageFiles<F>,
    _state: PhantomData<(T, D)>,
}

impl<F, T, D> CarPayloadBuilder<F, T, D> {
    pub fn title(self, title: impl Into<String>) -> CarPayloadBuilder<F, Provided, D> {
        CarPayloadBuilder {
            title: Some(title.into()),
            description: self.description,
            tags: self.tags,
            images: self.images,
            _state: PhantomData,
        }
    }

    pub fn description(self, description: impl Into<String>) -> CarPayloadBuilder<F, T, Provided> {
        CarPayloadBuilder {
            title: self.title,
            description: Some(description.into()),
            tags: self.tags,
            images: self.images,
            _state: PhantomData,
        }
    }

    pub fn tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }

    pub fn images(mut self, images: ImageFiles<F>) -> Self {
        self.images = images;
        self
    }
}

impl<F> CarPayloadBuilder<F, Provided, Provided> {
    /// title 和 description 不能只包含空白
    pub fn build(self) -> ClientResult<CarPayload<F>> {
        let title = self.title.unwrap_or_default();
        let description = self.description.unwrap_or_default();

        if title.trim().is_empty() {
            return Err(ClientError::invalid_input("Title is required").in_op("payload.build"));
        }
        if description.trim().is_empty() {
            return Err(
                ClientError::invalid_input("Description is required").in_op("payload.build")
            );
        }

        Ok(CarPayload {
            title,
            description,
            tags: self.tags,
            images: self.images,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientErrorKind;

    fn files(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("img{}.jpg", i)).collect()
    }

    #[test]
    fn test_into_parts_order_and_shape() {
        let mut tags = TagSet::new();
        tags.add("honda");
        tags.add("sedan");

        let payload = CarPayload::builder()
            .title("Civic")
            .description("2019, low mileage")
            .tags(tags)
            .images(ImageFiles::new(files(2)).unwrap())
            .build()
            .unwrap();

        assert_eq!(payload.image_count(), 2);
        let parts = payload.into_parts();
        assert_eq!(
            parts,
            vec![
                FormPart::Text {
                    name: "title",
                    value: "Civic".to_string()
                },
                FormPart::Text {
                    name: "description",
                    value: "2019, low mileage".to_string()
                },
                FormPart::Text {
                    name: "tags",
                    value: r#"["honda","sedan"]"#.to_string()
                },
                FormPart::File {
                    name: "images",
                    file: "img0.jpg".to_string()
                },
                FormPart::File {
                    name: "images",
                    file: "img1.jpg".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_ten_images_allowed_eleven_rejected() {
        assert!(ImageFiles::new(files(10)).is_ok());

        let err = ImageFiles::new(files(11)).unwrap_err();
        assert_eq!(err.kind, ClientErrorKind::InvalidInput);
        assert_eq!(err.message(), "You can upload up to 10 images.");
    }

    #[test]
    fn test_blank_title_rejected() {
        let err = CarPayload::<String>::builder()
            .title("   ")
            .description("desc")
            .build()
            .unwrap_err();
        assert_eq!(err.message(), "Title is required");
    }

    #[test]
    fn test_blank_description_rejected() {
        let err = CarPayload::<String>::builder()
            .description("")
            .title("Civic")
            .build()
            .unwrap_err();
        assert_eq!(err.message(), "Description is required");
    }

    #[test]
    fn test_empty_tags_serialize_as_empty_array() {
        let parts = CarPayload::<String>::builder()
            .title("t")
            .description("d")
            .build()
            .unwrap()
            .into_parts();
        assert_eq!(parts.len(), 3);
        assert_eq!(
            parts[2],
            FormPart::Text {
                name: "tags",
                value: "[]".to_string()
            }
        );
    }
}
