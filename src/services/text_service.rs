//! 文本区域替换服务 - 业务能力层
//!
//! 只负责"按现有文本定位形状并改写文本"能力，不关心流程

use crate::error::{AppError, AppResult, TemplateError};
use crate::infrastructure::xml;

/// 文本区域替换服务
///
/// 职责：
/// - 在单张幻灯片的 XML 里按占位文本唯一定位形状
/// - 整体替换该形状的文本，保留文本体的原有属性
/// - 不出现幻灯片列表，不关心处理顺序
pub struct TextService;

impl TextService {
    pub fn new() -> Self {
        Self
    }

    /// 按占位文本定位形状并替换其全部文本
    ///
    /// # 参数
    /// - `part`: 幻灯片部件名（用于错误信息）
    /// - `slide_xml`: 幻灯片部件内容
    /// - `marker`: 占位文本，按"包含"匹配形状的可见文本
    /// - `new_text`: 替换后的完整文本
    ///
    /// # 返回
    /// 改写后的幻灯片 XML；匹配形状数不等于 1 时报错
    pub fn replace_shape_text(
        &self,
        part: &str,
        slide_xml: &str,
        marker: &str,
        new_text: &str,
    ) -> AppResult<String> {
        let hits: Vec<(usize, usize)> = xml::element_blocks(slide_xml, "p:sp")
            .into_iter()
            .filter(|(start, end)| xml::visible_text(&slide_xml[*start..*end]).contains(marker))
            .collect();

        if hits.len() != 1 {
            return Err(AppError::region_not_found(marker, hits.len()));
        }

        let (shape_start, shape_end) = hits[0];
        let shape = &slide_xml[shape_start..shape_end];

        let bodies = xml::element_blocks(shape, "p:txBody");
        if bodies.len() != 1 {
            return Err(TemplateError::Malformed {
                part: part.to_string(),
                detail: format!(
                    "匹配 \"{}\" 的形状应恰好有 1 个 p:txBody，实际 {}",
                    marker,
                    bodies.len()
                ),
            }
            .into());
        }
        let (body_start, body_end) = bodies[0];
        let body = &shape[body_start..body_end];

        // 只替换段落，bodyPr/lstStyle 等属性原样保留
        let paragraphs = xml::element_blocks(body, "a:p");
        let (first_start, last_end) = match (paragraphs.first(), paragraphs.last()) {
            (Some((s, _)), Some((_, e))) => (*s, *e),
            _ => {
                return Err(TemplateError::Malformed {
                    part: part.to_string(),
                    detail: format!("匹配 \"{}\" 的形状文本体内没有段落", marker),
                }
                .into());
            }
        };

        let mut new_body = String::with_capacity(body.len() + new_text.len());
        new_body.push_str(&body[..first_start]);
        new_body.push_str(&xml::text_paragraph(new_text));
        new_body.push_str(&body[last_end..]);

        let mut result = String::with_capacity(slide_xml.len() + new_text.len());
        result.push_str(&slide_xml[..shape_start + body_start]);
        result.push_str(&new_body);
        result.push_str(&slide_xml[shape_start + body_end..]);
        Ok(result)
    }
}

impl Default for TextService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn slide_with(shapes: &str) -> String {
        format!("<p:sld><p:cSld><p:spTree>{}</p:spTree></p:cSld></p:sld>", shapes)
    }

    fn shape(text: &str) -> String {
        format!(
            "<p:sp><p:nvSpPr><p:cNvPr id=\"2\" name=\"T\"/></p:nvSpPr>\
             <p:txBody><a:bodyPr anchor=\"ctr\"/><a:lstStyle/><a:p><a:r><a:t>{}</a:t></a:r></a:p></p:txBody></p:sp>",
            text
        )
    }

    #[test]
    fn test_replaces_exactly_one_matching_shape() {
        let slide = slide_with(&format!("{}{}", shape("Presentation title"), shape("Subtitle")));
        let service = TextService::new();

        let result = service
            .replace_shape_text("slide1", &slide, "Presentation title", "Presentation for Group 7")
            .unwrap();

        assert!(result.contains("<a:t>Presentation for Group 7</a:t>"));
        assert!(!result.contains("<a:t>Presentation title</a:t>"));
        // 另一个形状不受影响
        assert!(result.contains("<a:t>Subtitle</a:t>"));
        // 文本体属性保留
        assert!(result.contains("<a:bodyPr anchor=\"ctr\"/>"));
    }

    #[test]
    fn test_zero_matches_is_an_error() {
        let slide = slide_with(&shape("Something else"));
        let err = TextService::new()
            .replace_shape_text("slide1", &slide, "Presentation title", "x")
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Template(TemplateError::RegionNotFound { matches: 0, .. })
        ));
    }

    #[test]
    fn test_two_matches_is_an_error() {
        let slide = slide_with(&format!("{}{}", shape("Chart"), shape("Chart area")));
        let err = TextService::new()
            .replace_shape_text("slide2", &slide, "Chart", "x")
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Template(TemplateError::RegionNotFound { matches: 2, .. })
        ));
    }

    #[test]
    fn test_text_spread_over_runs_still_matches() {
        let split = "<p:sp><p:nvSpPr><p:cNvPr id=\"2\" name=\"T\"/></p:nvSpPr>\
             <p:txBody><a:bodyPr/><a:lstStyle/>\
             <a:p><a:r><a:t>Presentation </a:t></a:r><a:r><a:t>title</a:t></a:r></a:p>\
             </p:txBody></p:sp>";
        let slide = slide_with(split);
        let result = TextService::new()
            .replace_shape_text("slide1", &slide, "Presentation title", "New")
            .unwrap();
        assert!(result.contains("<a:t>New</a:t>"));
    }

    #[test]
    fn test_new_text_is_escaped() {
        let slide = slide_with(&shape("Subtitle"));
        let result = TextService::new()
            .replace_shape_text("slide1", &slide, "Subtitle", "A & B <C>")
            .unwrap();
        assert!(result.contains("<a:t>A &amp; B &lt;C&gt;</a:t>"));
    }
}
