//! Pexels 搜索接口的响应结构

use serde::{Deserialize, Serialize};

use crate::models::Candidate;

/// 一页搜索结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PexelsSearchPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub photos: Vec<PexelsPhoto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PexelsPhoto {
    pub id: u64,
    pub url: String,
    #[serde(default)]
    pub photographer: String,
    #[serde(default)]
    pub alt: Option<String>,
    pub src: PhotoSources,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoSources {
    pub original: String,
    pub large: String,
    pub large2x: String,
}

impl PexelsPhoto {
    /// 从页面地址的 slug 推导描述
    ///
    /// `https://www.pexels.com/photo/blue-lake-view-123/` → `blue lake view`
    pub fn description(&self) -> String {
        let suffix = format!("-{}", self.id);
        let slug = self
            .url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();
        let slug = slug.strip_suffix(&suffix).unwrap_or(slug);

        if slug.is_empty() || slug == self.id.to_string() {
            return self.alt.clone().unwrap_or_default();
        }
        slug.replace('-', " ")
    }

    /// 从原图地址推导扩展名（小写，去掉查询参数）
    pub fn extension(&self) -> String {
        let path = self.src.original.split(['?', '#']).next().unwrap_or_default();
        let file_name = path.rsplit('/').next().unwrap_or_default();
        match file_name.rsplit_once('.') {
            Some((_, ext)) => ext.to_ascii_lowercase(),
            None => String::new(),
        }
    }
}

impl From<PexelsPhoto> for Candidate {
    fn from(photo: PexelsPhoto) -> Self {
        Self {
            id: photo.id.to_string(),
            description: photo.description(),
            extension: photo.extension(),
            primary_ref: photo.src.large,
            secondary_ref: photo.src.large2x,
            original_ref: photo.src.original,
            size_hint: None,
            photographer: photo.photographer,
            url: photo.url,
        }
    }
}
