//! PPTX 文档包 - 基础设施层
//!
//! ## 职责
//!
//! 持有唯一的文档资源（ZIP 容器内的全部部件），只暴露部件读写能力。
//!
//! ## 核心功能
//!
//! 1. **整包加载**：打开模板时把所有部件读进内存
//! 2. **部件读写**：按部件名读取 / 覆盖文本内容
//! 3. **结构解析**：按演示文稿顺序枚举幻灯片、解析幻灯片引用的图表部件
//! 4. **一次落盘**：所有修改都发生在内存里，save 时才写出文件
//!
//! 不认识标记 / 组 / 报告等业务概念。

use crate::error::{AppError, AppResult, TemplateError};
use crate::infrastructure::xml;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// 图表部件的关系类型
pub const REL_TYPE_CHART: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/chart";

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";
const CORE_PROPS_PART: &str = "docProps/core.xml";

/// 包内的一条关系记录
#[derive(Debug, Clone)]
struct Relationship {
    id: String,
    rel_type: String,
    target: String,
}

/// 内存中的 PPTX 文档包
pub struct PptxPackage {
    parts: BTreeMap<String, Vec<u8>>,
}

impl PptxPackage {
    /// 打开一个 .pptx 文件并加载全部部件
    pub fn open(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::template_not_found(path.display().to_string()));
        }

        let file = File::open(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

        let mut archive = zip::ZipArchive::new(file).map_err(|e| {
            AppError::Template(TemplateError::ArchiveReadFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })
        })?;

        let mut parts = BTreeMap::new();
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).map_err(|e| {
                AppError::Template(TemplateError::ArchiveReadFailed {
                    path: path.display().to_string(),
                    source: Box::new(e),
                })
            })?;
            if entry.is_dir() {
                continue;
            }
            let name = entry.name().to_string();
            let mut data = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut data).map_err(|e| {
                AppError::Template(TemplateError::ArchiveReadFailed {
                    path: path.display().to_string(),
                    source: Box::new(e),
                })
            })?;
            parts.insert(name, data);
        }

        Ok(Self { parts })
    }

    /// 由 (部件名, 内容) 列表构造内存包
    pub fn from_parts(parts: Vec<(String, String)>) -> Self {
        let parts = parts
            .into_iter()
            .map(|(name, content)| (name, content.into_bytes()))
            .collect();
        Self { parts }
    }

    /// 包内部件数量
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// 部件是否存在
    pub fn has_part(&self, name: &str) -> bool {
        self.parts.contains_key(name)
    }

    /// 读取部件的文本内容
    pub fn part_string(&self, name: &str) -> AppResult<String> {
        let data = self.parts.get(name).ok_or_else(|| {
            AppError::Template(TemplateError::PartMissing {
                part: name.to_string(),
            })
        })?;
        let text = std::str::from_utf8(data).map_err(|_| {
            AppError::Template(TemplateError::PartNotUtf8 {
                part: name.to_string(),
            })
        })?;
        Ok(text.to_string())
    }

    /// 覆盖部件的文本内容
    pub fn set_part(&mut self, name: &str, content: String) {
        self.parts.insert(name.to_string(), content.into_bytes());
    }

    /// 按演示文稿顺序返回幻灯片部件名
    ///
    /// 顺序来自 presentation.xml 的 p:sldIdLst，经关系表映射到部件名。
    /// ZIP 条目顺序与此无关。
    pub fn slide_parts(&self) -> AppResult<Vec<String>> {
        let presentation = self.part_string(PRESENTATION_PART)?;
        let list_blocks = xml::element_blocks(&presentation, "p:sldIdLst");
        let &(list_start, list_end) = match list_blocks.as_slice() {
            [one] => one,
            _ => {
                return Err(AppError::Template(TemplateError::Malformed {
                    part: PRESENTATION_PART.to_string(),
                    detail: format!("p:sldIdLst 数量为 {}", list_blocks.len()),
                }))
            }
        };
        let list = &presentation[list_start..list_end];

        let rels = self.relationships(PRESENTATION_RELS_PART)?;
        let mut slides = Vec::new();
        for (start, end) in xml::element_blocks(list, "p:sldId") {
            let tag = &list[start..end];
            let rid = xml::attr_value(tag, "r:id").ok_or_else(|| {
                AppError::Template(TemplateError::Malformed {
                    part: PRESENTATION_PART.to_string(),
                    detail: "p:sldId 缺少 r:id 属性".to_string(),
                })
            })?;
            let rel = rels.iter().find(|r| r.id == rid).ok_or_else(|| {
                AppError::Template(TemplateError::Malformed {
                    part: PRESENTATION_RELS_PART.to_string(),
                    detail: format!("找不到关系 {}", rid),
                })
            })?;
            slides.push(resolve_target(PRESENTATION_PART, &rel.target));
        }
        Ok(slides)
    }

    /// 返回某张幻灯片引用的图表部件名（按关系文件中的出现顺序）
    pub fn chart_parts_of_slide(&self, slide_part: &str) -> AppResult<Vec<String>> {
        let rels_name = rels_part_for(slide_part);
        if !self.has_part(&rels_name) {
            return Ok(Vec::new());
        }
        let rels = self.relationships(&rels_name)?;
        Ok(rels
            .into_iter()
            .filter(|r| r.rel_type == REL_TYPE_CHART)
            .map(|r| resolve_target(slide_part, &r.target))
            .collect())
    }

    /// 更新核心属性中的修改时间
    ///
    /// 没有核心属性部件的包直接跳过。
    pub fn stamp_modified(&mut self, timestamp: &str) -> AppResult<()> {
        if !self.has_part(CORE_PROPS_PART) {
            return Ok(());
        }
        let content = self.part_string(CORE_PROPS_PART)?;
        let blocks = xml::element_blocks(&content, "dcterms:modified");
        if let Some(&(start, end)) = blocks.first() {
            let replacement = format!(
                "<dcterms:modified xsi:type=\"dcterms:W3CDTF\">{}</dcterms:modified>",
                xml::escape(timestamp)
            );
            let mut updated = content;
            updated.replace_range(start..end, &replacement);
            self.set_part(CORE_PROPS_PART, updated);
        }
        Ok(())
    }

    /// 把全部部件写出为一个新的 .pptx 文件
    ///
    /// 目标路径已存在时静默覆盖。
    pub fn save(&self, path: &Path) -> AppResult<()> {
        let file = File::create(path)
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        let mut writer = zip::ZipWriter::new(file);
        let options: zip::write::FileOptions<'_, ()> = zip::write::FileOptions::default();

        for (name, data) in &self.parts {
            writer.start_file(name.clone(), options).map_err(|e| {
                AppError::Template(TemplateError::ArchiveWriteFailed {
                    path: path.display().to_string(),
                    source: Box::new(e),
                })
            })?;
            writer.write_all(data).map_err(|e| {
                AppError::Template(TemplateError::ArchiveWriteFailed {
                    path: path.display().to_string(),
                    source: Box::new(e),
                })
            })?;
        }

        writer.finish().map_err(|e| {
            AppError::Template(TemplateError::ArchiveWriteFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })
        })?;
        Ok(())
    }

    /// 解析一个关系部件中的全部关系记录
    fn relationships(&self, rels_part: &str) -> AppResult<Vec<Relationship>> {
        let content = self.part_string(rels_part)?;
        let mut rels = Vec::new();
        for (start, end) in xml::element_blocks(&content, "Relationship") {
            let tag = &content[start..end];
            let id = xml::attr_value(tag, "Id");
            let rel_type = xml::attr_value(tag, "Type");
            let target = xml::attr_value(tag, "Target");
            match (id, rel_type, target) {
                (Some(id), Some(rel_type), Some(target)) => rels.push(Relationship {
                    id: id.to_string(),
                    rel_type: rel_type.to_string(),
                    target: target.to_string(),
                }),
                _ => {
                    return Err(AppError::Template(TemplateError::Malformed {
                        part: rels_part.to_string(),
                        detail: "Relationship 缺少 Id/Type/Target 属性".to_string(),
                    }))
                }
            }
        }
        Ok(rels)
    }
}

/// 部件对应的关系部件名
///
/// `ppt/slides/slide2.xml` 对应 `ppt/slides/_rels/slide2.xml.rels`。
fn rels_part_for(part: &str) -> String {
    match part.rfind('/') {
        Some(idx) => format!("{}/_rels/{}.rels", &part[..idx], &part[idx + 1..]),
        None => format!("_rels/{}.rels", part),
    }
}

/// 把关系目标解析为包内部件名
///
/// 目标相对于源部件所在目录，`..` 向上一级；以 `/` 开头的目标相对于包根。
fn resolve_target(base_part: &str, target: &str) -> String {
    let base_dir = match base_part.rfind('/') {
        Some(idx) => &base_part[..idx],
        None => "",
    };
    let mut segments: Vec<&str> = if target.starts_with('/') {
        Vec::new()
    } else {
        base_dir.split('/').filter(|s| !s.is_empty()).collect()
    };
    for seg in target.trim_start_matches('/').split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rels_part_for() {
        assert_eq!(
            rels_part_for("ppt/slides/slide2.xml"),
            "ppt/slides/_rels/slide2.xml.rels"
        );
        assert_eq!(
            rels_part_for("ppt/presentation.xml"),
            "ppt/_rels/presentation.xml.rels"
        );
        assert_eq!(rels_part_for("root.xml"), "_rels/root.xml.rels");
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(
            resolve_target("ppt/presentation.xml", "slides/slide1.xml"),
            "ppt/slides/slide1.xml"
        );
        assert_eq!(
            resolve_target("ppt/slides/slide2.xml", "../charts/chart1.xml"),
            "ppt/charts/chart1.xml"
        );
        assert_eq!(
            resolve_target("ppt/slides/slide1.xml", "/docProps/core.xml"),
            "docProps/core.xml"
        );
    }
}
