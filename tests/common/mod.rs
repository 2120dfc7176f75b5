//! 测试用的协作方替身
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use nature_poster::error::AppResult;
use nature_poster::services::{CandidateSource, ImageAnalysis, PublishResponse, PublishingService};
use nature_poster::{AppError, Candidate};

pub fn candidate(id: &str, extension: &str, description: &str) -> Candidate {
    Candidate {
        id: id.to_string(),
        description: description.to_string(),
        primary_ref: format!("https://img/{}-large.{}", id, extension),
        secondary_ref: format!("https://img/{}-large2x.{}", id, extension),
        original_ref: format!("https://img/{}.{}", id, extension),
        size_hint: None,
        extension: extension.to_string(),
        photographer: "Ana".to_string(),
        url: format!("https://www.pexels.com/photo/{}/", id),
    }
}

pub fn jpeg(id: &str) -> Candidate {
    candidate(id, "jpeg", "green forest")
}

/// 图片分析替身：按下载地址返回预设的哈希和文字
#[derive(Default)]
pub struct FakeAnalysis {
    pub sizes: HashMap<String, u64>,
    pub hashes: HashMap<String, String>,
    pub texts: HashMap<String, String>,
    pub calls: Mutex<Vec<String>>,
    last_download: Mutex<Option<String>>,
}

impl FakeAnalysis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, reference: impl Into<String>, size: u64) -> Self {
        self.sizes.insert(reference.into(), size);
        self
    }

    pub fn with_hash(mut self, reference: impl Into<String>, hash: &str) -> Self {
        self.hashes.insert(reference.into(), hash.to_string());
        self
    }

    pub fn with_text(mut self, reference: impl Into<String>, text: &str) -> Self {
        self.texts.insert(reference.into(), text.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn downloads(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| c.strip_prefix("download ").map(str::to_string))
            .collect()
    }

    fn current(&self) -> String {
        self.last_download.lock().unwrap().clone().unwrap_or_default()
    }
}

#[async_trait]
impl ImageAnalysis for FakeAnalysis {
    async fn size_of(&self, reference: &str) -> AppResult<u64> {
        self.calls.lock().unwrap().push(format!("size {}", reference));
        Ok(self.sizes.get(reference).copied().unwrap_or(500_000))
    }

    async fn download(&self, reference: &str, _target: &Path) -> AppResult<()> {
        self.calls.lock().unwrap().push(format!("download {}", reference));
        *self.last_download.lock().unwrap() = Some(reference.to_string());
        Ok(())
    }

    async fn perceptual_hash(&self, _target: &Path) -> AppResult<String> {
        let current = self.current();
        self.calls.lock().unwrap().push(format!("hash {}", current));
        Ok(self
            .hashes
            .get(&current)
            .cloned()
            .unwrap_or_else(|| format!("hash-of-{}", current)))
    }

    async fn recognize_text(&self, _target: &Path) -> AppResult<String> {
        let current = self.current();
        self.calls.lock().unwrap().push(format!("ocr {}", current));
        Ok(self.texts.get(&current).cloned().unwrap_or_default())
    }
}

/// 发布服务替身
#[derive(Default)]
pub struct FakePublisher {
    /// 返回无帖子ID响应的照片
    pub rejecting: HashSet<String>,
    /// 返回传输错误的照片
    pub broken: HashSet<String>,
    /// 指定照片对应的帖子ID，默认 `post-{id}`
    pub post_ids: HashMap<String, String>,
    /// 修改文案时返回错误
    pub caption_fails: bool,
    pub published: Mutex<Vec<String>>,
    pub captions: Mutex<Vec<(String, String, String)>>,
}

impl FakePublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting_all<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            rejecting: ids.into_iter().map(str::to_string).collect(),
            ..Self::default()
        }
    }

    pub fn published(&self) -> Vec<String> {
        self.published.lock().unwrap().clone()
    }

    pub fn captions(&self) -> Vec<(String, String, String)> {
        self.captions.lock().unwrap().clone()
    }
}

#[async_trait]
impl PublishingService for FakePublisher {
    async fn publish(&self, candidate: &Candidate) -> AppResult<PublishResponse> {
        self.published.lock().unwrap().push(candidate.id.clone());

        if self.broken.contains(&candidate.id) {
            return Err(AppError::api_bad_response("fake/photos", 503, "unavailable"));
        }
        if self.rejecting.contains(&candidate.id) {
            return Ok(PublishResponse::from_raw(
                r#"{"error":{"message":"(#324) Requires upload file","code":324}}"#,
            ));
        }
        let post_id = self
            .post_ids
            .get(&candidate.id)
            .cloned()
            .unwrap_or_else(|| format!("post-{}", candidate.id));
        Ok(PublishResponse::from_raw(format!(r#"{{"id":"{}"}}"#, post_id)))
    }

    async fn amend_caption(&self, post_id: &str, description: &str, url: &str) -> AppResult<()> {
        self.captions.lock().unwrap().push((
            post_id.to_string(),
            description.to_string(),
            url.to_string(),
        ));
        if self.caption_fails {
            return Err(AppError::api_bad_response("fake/caption", 500, "nope"));
        }
        Ok(())
    }
}

/// 固定页序列的候选源
pub struct FakeSource {
    pages: Vec<Vec<Candidate>>,
    index: usize,
    pub searches: Vec<(String, u32, u32)>,
    pub next_page_calls: usize,
}

impl FakeSource {
    pub fn new(pages: Vec<Vec<Candidate>>) -> Self {
        Self {
            pages,
            index: 0,
            searches: Vec::new(),
            next_page_calls: 0,
        }
    }
}

#[async_trait]
impl CandidateSource for FakeSource {
    async fn search(&mut self, term: &str, page: u32, page_size: u32) -> AppResult<()> {
        self.searches.push((term.to_string(), page, page_size));
        self.index = page.saturating_sub(1) as usize;
        Ok(())
    }

    async fn next_page(&mut self) -> AppResult<bool> {
        self.next_page_calls += 1;
        if self.index + 1 >= self.pages.len() {
            return Ok(false);
        }
        self.index += 1;
        Ok(true)
    }

    fn current_page(&self) -> u32 {
        self.index as u32 + 1
    }

    fn current_page_candidates(&self) -> &[Candidate] {
        self.pages.get(self.index).map(Vec::as_slice).unwrap_or(&[])
    }
}
