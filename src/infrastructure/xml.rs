//! OOXML 文本处理工具 - 基础设施层
//!
//! 以纯字符串方式处理文档部件：定位元素块、抽取可见文本、转义。
//! 只认识 XML 语法，不认识幻灯片 / 图表 / 表格等业务概念。

use regex::Regex;

/// 开始标签的类型
enum TagKind {
    /// 普通开始标签，usize 为标签结束后的位置
    Open(usize),
    /// 自闭合标签，usize 为标签结束后的位置
    SelfClosing(usize),
}

/// XML 转义（写入部件前调用）
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// XML 反转义（读取部件文本后调用）
///
/// 只还原五个命名实体，未知实体原样保留。
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let (replacement, consumed) = if tail.starts_with("&amp;") {
            ("&", 5)
        } else if tail.starts_with("&lt;") {
            ("<", 4)
        } else if tail.starts_with("&gt;") {
            (">", 4)
        } else if tail.starts_with("&quot;") {
            ("\"", 6)
        } else if tail.starts_with("&apos;") {
            ("'", 6)
        } else {
            ("&", 1)
        };
        out.push_str(replacement);
        rest = &tail[consumed..];
    }
    out.push_str(rest);
    out
}

/// 查找指定元素的所有顶层块，返回字节范围（含开始与结束标签）
///
/// 同名嵌套的内层元素被计入深度，不单独返回。
/// 标签名按完整单词匹配，`p:sp` 不会命中 `p:spPr`。
pub fn element_blocks(xml: &str, tag: &str) -> Vec<(usize, usize)> {
    let open = format!("<{}", tag);
    let close = format!("</{}>", tag);
    let mut blocks = Vec::new();
    let mut pos = 0;

    while let Some((start, kind)) = next_open_tag(xml, pos, &open) {
        match kind {
            TagKind::SelfClosing(end) => {
                blocks.push((start, end));
                pos = end;
            }
            TagKind::Open(body_start) => match find_block_end(xml, body_start, &open, &close) {
                Some(end) => {
                    blocks.push((start, end));
                    pos = end;
                }
                // 未配对的开始标签，跳过该起点继续扫描
                None => pos = body_start,
            },
        }
    }

    blocks
}

/// 抽取一段 XML 中所有 `<a:t>` 文本运行的拼接结果
///
/// 形状的可见文本可能被拆进多个运行，标记匹配必须基于拼接后的整体。
pub fn visible_text(xml: &str) -> String {
    let mut out = String::new();
    if let Ok(re) = Regex::new(r"<a:t(?:\s[^>]*)?>([^<]*)</a:t>") {
        for cap in re.captures_iter(xml) {
            out.push_str(&unescape(&cap[1]));
        }
    }
    out
}

/// 读取标签内某个属性的值（`name="value"` 形式）
///
/// 属性名按完整单词匹配，`id` 不会命中 `r:id` 的尾部，反之亦然。
pub fn attr_value<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!("{}=\"", name);
    let mut pos = 0;
    while let Some(rel) = tag[pos..].find(&needle) {
        let at = pos + rel;
        let boundary = at == 0
            || matches!(tag.as_bytes()[at - 1], b' ' | b'\t' | b'\r' | b'\n' | b'<');
        if !boundary {
            pos = at + needle.len();
            continue;
        }
        let start = at + needle.len();
        let end = tag[start..].find('"')? + start;
        return Some(&tag[start..end]);
    }
    None
}

/// 生成单段单运行的文本段落
pub fn text_paragraph(text: &str) -> String {
    format!("<a:p><a:r><a:t>{}</a:t></a:r></a:p>", escape(text))
}

/// 从 from 起查找下一个指定元素的开始标签
fn next_open_tag(xml: &str, from: usize, open: &str) -> Option<(usize, TagKind)> {
    let mut pos = from;
    while let Some(rel) = xml[pos..].find(open) {
        let start = pos + rel;
        let after = start + open.len();
        // 标签名后必须是结束符或空白，排除前缀命中
        let boundary = matches!(
            xml.as_bytes().get(after),
            Some(b'>') | Some(b' ') | Some(b'/') | Some(b'\t') | Some(b'\r') | Some(b'\n')
        );
        if !boundary {
            pos = after;
            continue;
        }
        let close_rel = xml[start..].find('>')?;
        let tag_end = start + close_rel + 1;
        let kind = if xml.as_bytes()[start + close_rel - 1] == b'/' {
            TagKind::SelfClosing(tag_end)
        } else {
            TagKind::Open(tag_end)
        };
        return Some((start, kind));
    }
    None
}

/// 从 body_start 起扫描配对的结束标签，返回块结束位置
fn find_block_end(xml: &str, body_start: usize, open: &str, close: &str) -> Option<usize> {
    let mut depth = 1usize;
    let mut cursor = body_start;
    loop {
        let next_close = xml[cursor..].find(close).map(|rel| cursor + rel);
        let next_open = next_open_tag(xml, cursor, open);
        match (next_open, next_close) {
            (Some((open_at, kind)), Some(close_at)) if open_at < close_at => {
                cursor = match kind {
                    TagKind::Open(after) => {
                        depth += 1;
                        after
                    }
                    TagKind::SelfClosing(after) => after,
                };
            }
            (_, Some(close_at)) => {
                depth -= 1;
                cursor = close_at + close.len();
                if depth == 0 {
                    return Some(cursor);
                }
            }
            (_, None) => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_unescape_round_trip() {
        let raw = r#"A & B < C > "D" 'E'"#;
        let escaped = escape(raw);
        assert_eq!(escaped, "A &amp; B &lt; C &gt; &quot;D&quot; &apos;E&apos;");
        assert_eq!(unescape(&escaped), raw);
    }

    #[test]
    fn test_unescape_keeps_unknown_entities() {
        assert_eq!(unescape("a &copy; b"), "a &copy; b");
        assert_eq!(unescape("lone & ampersand"), "lone & ampersand");
    }

    #[test]
    fn test_element_blocks_ignores_prefix_collision() {
        let xml = "<p:sp><p:spPr/><x/></p:sp><p:spPr>standalone</p:spPr>";
        let blocks = element_blocks(xml, "p:sp");
        assert_eq!(blocks.len(), 1);
        assert_eq!(&xml[blocks[0].0..blocks[0].1], "<p:sp><p:spPr/><x/></p:sp>");
    }

    #[test]
    fn test_element_blocks_multiple_and_self_closing() {
        let xml = r#"<a:tr h="1"><a:tc>x</a:tc></a:tr><a:tr/><a:tr>y</a:tr>"#;
        let blocks = element_blocks(xml, "a:tr");
        assert_eq!(blocks.len(), 3);
        assert_eq!(&xml[blocks[1].0..blocks[1].1], "<a:tr/>");
    }

    #[test]
    fn test_element_blocks_nested_same_name() {
        let xml = "<g><g>inner</g></g><g>second</g>";
        let blocks = element_blocks(xml, "g");
        assert_eq!(blocks.len(), 2);
        assert_eq!(&xml[blocks[0].0..blocks[0].1], "<g><g>inner</g></g>");
        assert_eq!(&xml[blocks[1].0..blocks[1].1], "<g>second</g>");
    }

    #[test]
    fn test_visible_text_joins_runs() {
        let xml = "<a:p><a:r><a:t>Presentation </a:t></a:r><a:r><a:t>title</a:t></a:r></a:p>";
        assert_eq!(visible_text(xml), "Presentation title");
    }

    #[test]
    fn test_visible_text_unescapes() {
        let xml = "<a:t>A &amp; B</a:t>";
        assert_eq!(visible_text(xml), "A & B");
    }

    #[test]
    fn test_visible_text_skips_other_a_tags() {
        let xml = "<a:tc><a:txBody><a:t>cell</a:t></a:txBody></a:tc>";
        assert_eq!(visible_text(xml), "cell");
    }

    #[test]
    fn test_attr_value_word_boundary() {
        let tag = r#"<p:sldId id="256" r:id="rId2"/>"#;
        assert_eq!(attr_value(tag, "id"), Some("256"));
        assert_eq!(attr_value(tag, "r:id"), Some("rId2"));
        assert_eq!(attr_value(tag, "val"), None);
    }

    #[test]
    fn test_text_paragraph_escapes() {
        assert_eq!(
            text_paragraph("A & B"),
            "<a:p><a:r><a:t>A &amp; B</a:t></a:r></a:p>"
        );
    }
}
