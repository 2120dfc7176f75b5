//! 照片筛选流程 - 流程层
//!
//! 核心职责：对一页候选照片逐张筛选，找到第一张可以发布的照片
//!
//! 筛选顺序（任何一步不通过就换下一张）：
//! 1. 失败次数上限 → 直接结束
//! 2. 扩展名 → 已发布ID → 大小 → 描述禁用词（只看元数据）
//! 3. 下载 → 感知哈希去重 → OCR 禁用词（需要图片内容）
//! 4. 发布 → 修改文案 → 写入记录

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::AppResult;
use crate::infrastructure::{PostStore, StoreField};
use crate::models::{Candidate, PostRecord};
use crate::services::{is_acceptable_extension, Denylist, ImageAnalysis, PublishResponse, PublishingService};
use crate::workflow::attempt_counter::AttemptCounter;

/// 可发布图片的大小上限（字节，不含）
///
/// 发布接口对上传图片有大小限制。
pub const MAX_IMAGE_BYTES: u64 = 4_000_000;

/// 一页候选照片的处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 发布成功并已写入记录
    Posted(PostRecord),
    /// 本页没有可发布的照片
    ExhaustedPage,
    /// 发布失败次数达到上限
    Failsafe,
}

/// 候选照片被跳过的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// 扩展名不在允许列表中
    UnsupportedFormat(String),
    /// 照片ID已有发布记录
    AlreadyPosted,
    /// 文件大小达到上限
    TooLarge(u64),
    /// 描述含禁用词
    DeniedDescriptionWord(String),
    /// 感知哈希与已发布图片相同
    DuplicateImage(String),
    /// 图片中识别出禁用词
    DeniedImageText(String),
    /// 发布响应中没有帖子ID
    PublishFailed,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::UnsupportedFormat(ext) => write!(f, "不支持的格式 '{}'", ext),
            Rejection::AlreadyPosted => write!(f, "已经发布过"),
            Rejection::TooLarge(size) => write!(f, "文件过大 ({} 字节)", size),
            Rejection::DeniedDescriptionWord(word) => write!(f, "描述含禁用词 '{}'", word),
            Rejection::DuplicateImage(hash) => write!(f, "与已发布图片相似 (哈希 {})", hash),
            Rejection::DeniedImageText(word) => write!(f, "图片文字含禁用词 '{}'", word),
            Rejection::PublishFailed => write!(f, "发布失败"),
        }
    }
}

/// 通过全部筛选的照片信息
struct Screened {
    file_size: u64,
    image_hash: String,
}

enum Verdict {
    Passed(Screened),
    Rejected(Rejection),
}

/// 照片筛选流程
///
/// - 决定筛选顺序、何时发布、何时记录
/// - 不持有任何网络资源，只依赖 services 和 infrastructure
/// - 禁用词表在创建时加载一次
pub struct SelectionPipeline<'a> {
    store: &'a mut dyn PostStore,
    analysis: &'a dyn ImageAnalysis,
    publisher: &'a dyn PublishingService,
    download_path: PathBuf,
    denylist: Denylist,
}

impl<'a> SelectionPipeline<'a> {
    /// 创建筛选流程并加载禁用词表
    pub fn prepare(
        store: &'a mut dyn PostStore,
        analysis: &'a dyn ImageAnalysis,
        publisher: &'a dyn PublishingService,
        download_path: impl Into<PathBuf>,
    ) -> AppResult<Self> {
        let denylist = Denylist::new(store.values_of(StoreField::DenylistWord)?);
        debug!("已加载 {} 个禁用词", denylist.len());

        Ok(Self {
            store,
            analysis,
            publisher,
            download_path: download_path.into(),
            denylist,
        })
    }

    /// 按页内顺序筛选候选照片
    ///
    /// 协作方的传输错误原样返回，此时不会写入任何记录。
    pub async fn evaluate(
        &mut self,
        page: &[Candidate],
        attempts: &mut AttemptCounter,
    ) -> AppResult<Outcome> {
        for candidate in page {
            if attempts.is_exhausted() {
                warn!("⚠️ 发布已失败 {} 次，停止本次运行", attempts);
                return Ok(Outcome::Failsafe);
            }

            let screened = match self.screen(candidate).await? {
                Verdict::Passed(screened) => screened,
                Verdict::Rejected(reason) => {
                    debug!("{} 跳过: {}", candidate, reason);
                    continue;
                }
            };

            info!("{} 📤 通过筛选，正在发布...", candidate);
            let response = self.publisher.publish(candidate).await?;

            let Some(post_id) = response.post_id() else {
                attempts.record_failure();
                warn!(
                    "{} ⚠️ {} (失败次数 {}): {}",
                    candidate,
                    Rejection::PublishFailed,
                    attempts,
                    crate::utils::truncate_text(&response.raw, 200)
                );
                if attempts.is_exhausted() {
                    warn!("⚠️ 发布已失败 {} 次，停止本次运行", attempts);
                    return Ok(Outcome::Failsafe);
                }
                continue;
            };

            let record = self.commit(candidate, screened, response, &post_id).await?;
            return Ok(Outcome::Posted(record));
        }

        Ok(Outcome::ExhaustedPage)
    }

    /// 依次执行发布前的全部筛选
    async fn screen(&self, candidate: &Candidate) -> AppResult<Verdict> {
        if !is_acceptable_extension(&candidate.extension) {
            return Ok(Verdict::Rejected(Rejection::UnsupportedFormat(
                candidate.extension.clone(),
            )));
        }

        if self.store.contains(StoreField::PostId, &candidate.id)? {
            return Ok(Verdict::Rejected(Rejection::AlreadyPosted));
        }

        let file_size = match candidate.size_hint {
            Some(size) => size,
            None => self.analysis.size_of(&candidate.primary_ref).await?,
        };
        if file_size >= MAX_IMAGE_BYTES {
            return Ok(Verdict::Rejected(Rejection::TooLarge(file_size)));
        }

        if let Some(word) = self.denylist.matches_description(&candidate.description) {
            return Ok(Verdict::Rejected(Rejection::DeniedDescriptionWord(word)));
        }

        let target: &Path = &self.download_path;
        self.analysis.download(&candidate.secondary_ref, target).await?;

        let image_hash = self.analysis.perceptual_hash(target).await?;
        if self.store.contains(StoreField::ImageHash, &image_hash)? {
            return Ok(Verdict::Rejected(Rejection::DuplicateImage(image_hash)));
        }

        let text = self.analysis.recognize_text(target).await?;
        if let Some(word) = self.denylist.matches_recognized_text(&text) {
            return Ok(Verdict::Rejected(Rejection::DeniedImageText(word)));
        }

        Ok(Verdict::Passed(Screened {
            file_size,
            image_hash,
        }))
    }

    /// 修改文案并写入发布记录
    ///
    /// 文案修改失败时原样返回错误，不写入记录。
    async fn commit(
        &mut self,
        candidate: &Candidate,
        screened: Screened,
        response: PublishResponse,
        post_id: &str,
    ) -> AppResult<PostRecord> {
        info!("{} ✓ 照片已发布 (帖子 {})", candidate, post_id);

        let description = candidate.normalized_description();

        self.publisher
            .amend_caption(post_id, &description, &candidate.url)
            .await?;
        info!("{} ✓ 文案已修改", candidate);

        let record = PostRecord {
            timestamp: PostRecord::now_timestamp(),
            response: response.raw,
            description,
            photographer: candidate.photographer.clone(),
            photo_id: candidate.id.clone(),
            url: candidate.url.clone(),
            image_ref: candidate.secondary_ref.clone(),
            original_ref: candidate.original_ref.clone(),
            file_size: screened.file_size,
            image_hash: screened.image_hash,
        };

        self.store.append(&record)?;
        info!("{} ✓ 已写入数据库，全部完成！", candidate);

        Ok(record)
    }
}
