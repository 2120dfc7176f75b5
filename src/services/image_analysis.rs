//! 图片分析服务 - 业务能力层
//!
//! 只负责"大小 / 下载 / 感知哈希 / 文字识别"能力，不关心筛选顺序

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::StreamExt;
use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageReader};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::error::{AnalysisError, AppError, AppResult};

/// 感知哈希边长（8×8 = 64 位）
const HASH_SIZE: u32 = 8;

/// 图片分析
#[async_trait]
pub trait ImageAnalysis: Send + Sync {
    /// 远程图片的字节大小
    async fn size_of(&self, reference: &str) -> AppResult<u64>;

    /// 下载远程图片到本地
    async fn download(&self, reference: &str, target: &Path) -> AppResult<()>;

    /// 本地图片的感知哈希
    async fn perceptual_hash(&self, target: &Path) -> AppResult<String>;

    /// 本地图片中识别出的文字
    async fn recognize_text(&self, target: &Path) -> AppResult<String>;
}

/// 基于 HTTP 下载、平均哈希和 tesseract 命令行的实现
pub struct HttpImageAnalysis {
    http: reqwest::Client,
    tesseract_bin: String,
}

impl HttpImageAnalysis {
    pub fn new(http: reqwest::Client, tesseract_bin: impl Into<String>) -> Self {
        Self {
            http,
            tesseract_bin: tesseract_bin.into(),
        }
    }

    async fn get(&self, reference: &str) -> AppResult<reqwest::Response> {
        let response = self
            .http
            .get(reference)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(reference, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::api_bad_response(reference, status.as_u16(), String::new()));
        }
        Ok(response)
    }
}

#[async_trait]
impl ImageAnalysis for HttpImageAnalysis {
    async fn size_of(&self, reference: &str) -> AppResult<u64> {
        let response = self
            .http
            .head(reference)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(reference, e))?;

        // HEAD 响应没有 body，只能读头部；错误状态的头部不可信
        let from_header = if response.status().is_success() {
            response
                .headers()
                .get(reqwest::header::CONTENT_LENGTH)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
        } else {
            None
        };
        if let Some(size) = from_header {
            return Ok(size);
        }

        debug!(
            "HEAD 未返回可用的 Content-Length (状态 {})，改用 GET: {}",
            response.status(),
            reference
        );
        let mut stream = self.get(reference).await?.bytes_stream();
        let mut total = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| AppError::api_request_failed(reference, e))?;
            total += chunk.len() as u64;
        }
        if total == 0 {
            return Err(AnalysisError::SizeUnavailable {
                reference: reference.to_string(),
            }
            .into());
        }
        Ok(total)
    }

    async fn download(&self, reference: &str, target: &Path) -> AppResult<()> {
        let target_name = target.display().to_string();
        let mut stream = self.get(reference).await?.bytes_stream();
        let mut file = tokio::fs::File::create(target)
            .await
            .map_err(|e| AppError::file_write_failed(&target_name, e))?;

        let mut written = 0usize;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| AppError::api_request_failed(reference, e))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| AppError::file_write_failed(&target_name, e))?;
            written += chunk.len();
        }
        file.flush()
            .await
            .map_err(|e| AppError::file_write_failed(&target_name, e))?;

        debug!("已下载 {} 字节 → {}", written, target_name);
        Ok(())
    }

    async fn perceptual_hash(&self, target: &Path) -> AppResult<String> {
        let path: PathBuf = target.to_path_buf();
        let hash = tokio::task::spawn_blocking(move || -> AppResult<u64> {
            // 下载目标的扩展名固定，按文件内容判断格式
            let img = ImageReader::open(&path)
                .and_then(|reader| reader.with_guessed_format())
                .map_err(ImageError::IoError)
                .and_then(|reader| reader.decode())
                .map_err(|source| AnalysisError::DecodeFailed {
                    path: path.display().to_string(),
                    source,
                })?;
            Ok(average_hash(&img))
        })
        .await??;
        Ok(format!("{:016x}", hash))
    }

    async fn recognize_text(&self, target: &Path) -> AppResult<String> {
        let output = Command::new(&self.tesseract_bin)
            .arg(target)
            .arg("stdout")
            .output()
            .await
            .map_err(|e| AnalysisError::OcrFailed {
                program: self.tesseract_bin.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(AnalysisError::OcrFailed {
                program: self.tesseract_bin.clone(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// 平均哈希
///
/// 灰度化后缩放到 8×8，亮度高于均值的像素记为 1，按行优先从高位排列。
pub fn average_hash(img: &DynamicImage) -> u64 {
    let small = image::imageops::resize(&img.to_luma8(), HASH_SIZE, HASH_SIZE, FilterType::Lanczos3);
    let pixels: Vec<u8> = small.into_raw();
    let mean = pixels.iter().map(|&p| p as f64).sum::<f64>() / pixels.len() as f64;

    pixels
        .iter()
        .fold(0u64, |acc, &p| (acc << 1) | u64::from(p as f64 > mean))
}
