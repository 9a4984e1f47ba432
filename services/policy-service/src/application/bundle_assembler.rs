//! Bundle 打包
//!
//! 将策略列表写入 gzip 压缩的 tar 包：首个条目固定为 `.manifest`，
//! 之后每条策略一个 `<name>.rego` 文件。单个条目写入失败时跳过并继续（best-effort），
//! 收尾阶段的错误只记录日志，已缓冲的字节仍然返回。

use std::io::{self, Write};
use std::path::{Component, Path};

use flate2::Compression;
use flate2::write::GzEncoder;
use rego_errors::{AppError, AppResult};
use tar::{Builder, EntryType, Header};
use tracing::{error, warn};

use crate::domain::PolicySource;

/// manifest 条目名
pub const MANIFEST_NAME: &str = ".manifest";

/// manifest 内容：声明空的 roots
pub const MANIFEST_CONTENT: &str = r#"{"roots": [""]}"#;

const ENTRY_MODE: u32 = 0o644;

/// 打包结果
#[derive(Debug, Clone)]
pub struct Bundle {
    /// gzip 压缩后的 tar 字节
    pub bytes: Vec<u8>,
    /// 成功写入的条目数（含 manifest）
    pub entries: usize,
    /// 被跳过的策略名
    pub skipped: Vec<String>,
}

/// Bundle 打包器
///
/// tar 头的 mtime、uid、gid 均为 0，gzip 头不带时间戳，相同输入产生逐字节相同的输出
#[derive(Debug, Clone, Copy)]
pub struct BundleAssembler {
    compression: Compression,
}

impl Default for BundleAssembler {
    fn default() -> Self {
        Self {
            compression: Compression::default(),
        }
    }
}

impl BundleAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按给定顺序打包策略
    ///
    /// 只有 manifest 写入失败才返回错误
    pub fn assemble(&self, policies: &[PolicySource]) -> AppResult<Bundle> {
        let mut bytes = Vec::new();
        let mut entries = 0;
        let mut skipped = Vec::new();

        {
            let mut archive = Builder::new(GzEncoder::new(&mut bytes, self.compression));

            append_entry(&mut archive, MANIFEST_NAME, MANIFEST_CONTENT.as_bytes()).map_err(
                |e| AppError::bundle(format!("Failed to write manifest entry: {}", e)),
            )?;
            entries += 1;

            for policy in policies {
                let file_name = policy.file_name();
                match append_entry(&mut archive, &file_name, policy.rego_code.as_bytes()) {
                    Ok(()) => entries += 1,
                    Err(e) => {
                        warn!(
                            name = %policy.name,
                            error = %e,
                            "Error writing bundle entry, skipping policy"
                        );
                        skipped.push(policy.name.clone());
                    }
                }
            }

            finish(archive);
        }

        Ok(Bundle {
            bytes,
            entries,
            skipped,
        })
    }
}

/// 写入单个普通文件条目
fn append_entry<W: Write>(archive: &mut Builder<W>, name: &str, body: &[u8]) -> io::Result<()> {
    let path = entry_path(name)?;

    let mut header = Header::new_gnu();
    header.set_entry_type(EntryType::Regular);
    header.set_mode(ENTRY_MODE);
    header.set_uid(0);
    header.set_gid(0);
    header.set_size(body.len() as u64);
    header.set_mtime(0);

    archive.append_data(&mut header, path, body)
}

/// 条目路径必须是相对路径且不含 `..`
///
/// 在写入任何字节之前拒绝，避免长文件名的 GNU 扩展头已写出而正文写入失败
fn entry_path(name: &str) -> io::Result<&Path> {
    let path = Path::new(name);
    let relative = path
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));

    if !relative || name.contains('\0') {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("unsafe archive entry name: {:?}", name),
        ));
    }
    Ok(path)
}

/// 先关闭 tar，再关闭 gzip；失败只记录日志
fn finish<W: Write>(mut archive: Builder<GzEncoder<W>>) {
    if let Err(e) = archive.finish() {
        error!(error = %e, "Error closing tar writer");
    }

    match archive.into_inner() {
        Ok(encoder) => {
            if let Err(e) = encoder.finish() {
                error!(error = %e, "Error closing gzip writer");
            }
        }
        Err(e) => error!(error = %e, "Error closing tar writer"),
    }
}
