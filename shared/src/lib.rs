use serde::{Deserialize, Deserializer, Serialize};

pub mod auth;
pub mod carousel;
pub mod client;
pub mod error;
pub mod payload;
pub mod protocol;
pub mod query;
pub mod repository;
pub mod session;
pub mod tags;

pub use error::{ClientError, ClientErrorKind, ClientResult};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 持久化 token 的 LocalStorage 键
pub const STORAGE_TOKEN_KEY: &str = "token";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
/// 单次提交允许上传的最大图片数量
pub const MAX_IMAGES: usize = 10;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 登录/注册成功后服务器返回的用户摘要
///
/// 服务器的用户结构不在客户端的控制范围内，所有字段都是可选的。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "UserRecord")]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CarRecord")]
pub struct Car {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub images: Vec<String>,
}

// =========================================================
// 线上格式 (Wire Records)
// =========================================================

// 服务器可能同时返回 `_id` 和 `id`（序列化了虚拟字段），字段可能为 null。
// 先按宽松的线上格式解码，再折叠为领域模型。

#[derive(Deserialize)]
struct UserRecord {
    #[serde(rename = "_id", default)]
    mongo_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl From<UserRecord> for UserSummary {
    fn from(raw: UserRecord) -> Self {
        Self {
            id: raw.mongo_id.or(raw.id),
            name: raw.name,
            email: raw.email,
        }
    }
}

#[derive(Deserialize)]
struct CarRecord {
    #[serde(rename = "_id", default)]
    mongo_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient_tags")]
    tags: Vec<String>,
    #[serde(default)]
    images: Option<Vec<String>>,
}

impl TryFrom<CarRecord> for Car {
    type Error = String;

    fn try_from(raw: CarRecord) -> Result<Self, Self::Error> {
        let id = raw
            .mongo_id
            .or(raw.id)
            .ok_or_else(|| "missing field `_id`".to_string())?;
        Ok(Self {
            id,
            title: raw.title.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            tags: raw.tags,
            images: raw.images.unwrap_or_default(),
        })
    }
}

impl Car {
    /// 列表卡片使用的封面图（第一张图片）
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// 从本地缓存的集合中移除指定 id 的车辆，不重新请求服务器
pub fn remove_car(cars: &mut Vec<Car>, id: &str) {
    cars.retain(|car| car.id != id);
}

/// 非数组的 tags 视为空列表，数组中的重复项只保留第一次出现
fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let mut tags: Vec<String> = Vec::new();
    if let Some(serde_json::Value::Array(items)) = value {
        for item in items {
            if let serde_json::Value::String(tag) = item {
                if !tags.contains(&tag) {
                    tags.push(tag);
                }
            }
        }
    }
    Ok(tags)
}
