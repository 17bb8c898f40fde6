//! Plain-text rendering of projected views.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::projector::{ProjectedSection, ProjectedView};
use crate::view::Layout;

/// Display columns available for full-width values.
const WRAP_WIDTH: usize = 72;

/// Shown in place of an empty Full view.
pub(crate) const NO_FULL_DATA: &str = "暂无完整档案信息";

/// Render a view as indented text lines.
pub(crate) fn render_view(view: &ProjectedView) -> Vec<String> {
    let mut lines = vec![format!("== {} ==", view.title)];
    if view.is_empty() {
        lines.push(format!("  {NO_FULL_DATA}"));
        return lines;
    }
    for section in &view.sections {
        lines.push(format!("  [{}]", section.title));
        match section.layout {
            Layout::Grid => render_grid(section, &mut lines),
            Layout::FullWidth => render_full_width(section, &mut lines),
        }
    }
    lines
}

fn render_grid(section: &ProjectedSection, lines: &mut Vec<String>) {
    let label_width = section
        .entries
        .iter()
        .map(|e| e.label.width())
        .max()
        .unwrap_or(0);

    for entry in &section.entries {
        let pad = " ".repeat(label_width.saturating_sub(entry.label.width()));
        let mut value_lines = entry.value.lines();
        let first = value_lines.next().unwrap_or_default();
        lines.push(format!("    {}{pad}: {first}", entry.label));
        let indent = " ".repeat(label_width + 6);
        lines.extend(value_lines.map(|l| format!("{indent}{l}")));
    }
}

fn render_full_width(section: &ProjectedSection, lines: &mut Vec<String>) {
    for entry in &section.entries {
        if entry.label != section.title {
            lines.push(format!("    {}:", entry.label));
        }
        lines.extend(
            wrap_text(&entry.value, WRAP_WIDTH)
                .into_iter()
                .map(|l| format!("    {l}")),
        );
    }
}

/// Numbered name list.
pub(crate) fn render_names(names: &[&str]) -> Vec<String> {
    let digits = names.len().to_string().len();
    names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("  {:>digits$}. {name}", i + 1))
        .collect()
}

/// Summary line under a name list.
pub(crate) fn count_line(shown: usize, total: usize, keyword: Option<&str>) -> String {
    match keyword {
        Some(keyword) => format!("{shown} of {total} names match '{keyword}'"),
        None => format!("{total} names"),
    }
}

/// Wrap text to `max_width` display columns, keeping existing line breaks.
///
/// Wide (CJK) characters count as two columns.
pub(crate) fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();

    for line in text.lines() {
        if line.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut segment = String::new();
        let mut width = 0;
        for c in line.chars() {
            let w = c.width().unwrap_or(0);
            if width + w > max_width && !segment.is_empty() {
                lines.push(std::mem::take(&mut segment));
                width = 0;
            }
            segment.push(c);
            width += w;
        }
        lines.push(segment);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projector::ProjectedEntry;
    use crate::view::ViewKind;

    fn entry(label: &str, value: &str) -> ProjectedEntry {
        ProjectedEntry {
            label: label.to_string(),
            value: value.to_string(),
            filled: true,
        }
    }

    #[test]
    fn test_wrap_ascii() {
        assert_eq!(wrap_text("abcdef", 4), vec!["abcd", "ef"]);
    }

    #[test]
    fn test_wrap_counts_wide_chars_twice() {
        assert_eq!(wrap_text("一二三四五", 4), vec!["一二", "三四", "五"]);
    }

    #[test]
    fn test_wrap_keeps_line_breaks() {
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
        assert_eq!(wrap_text("", 10), vec![""]);
        assert_eq!(wrap_text("abc", 0), vec!["abc"]);
    }

    #[test]
    fn test_render_grid_aligns_labels() {
        let view = ProjectedView {
            kind: ViewKind::Work,
            title: "工作信息".to_string(),
            sections: vec![ProjectedSection {
                title: "职务信息".to_string(),
                layout: Layout::Grid,
                entries: vec![entry("现任职务", "处长"), entry("ab", "x")],
            }],
        };
        let lines = render_view(&view);
        assert_eq!(lines[0], "== 工作信息 ==");
        assert_eq!(lines[1], "  [职务信息]");
        assert_eq!(lines[2], "    现任职务: 处长");
        assert_eq!(lines[3], "    ab      : x");
    }

    #[test]
    fn test_render_full_width_section() {
        let view = ProjectedView {
            kind: ViewKind::Basic,
            title: "基本信息".to_string(),
            sections: vec![ProjectedSection {
                title: "简历".to_string(),
                layout: Layout::FullWidth,
                entries: vec![entry("简历", "1995 大学\n1999 工作")],
            }],
        };
        assert_eq!(
            render_view(&view),
            vec!["== 基本信息 ==", "  [简历]", "    1995 大学", "    1999 工作"]
        );
    }

    #[test]
    fn test_render_empty_full_view() {
        let view = ProjectedView {
            kind: ViewKind::Full,
            title: "完整档案".to_string(),
            sections: Vec::new(),
        };
        let lines = render_view(&view);
        assert!(lines[1].contains(NO_FULL_DATA));
    }

    #[test]
    fn test_count_line() {
        assert_eq!(count_line(3, 3, None), "3 names");
        assert_eq!(count_line(1, 3, Some("Li")), "1 of 3 names match 'Li'");
    }

    #[test]
    fn test_render_names_numbered() {
        assert_eq!(render_names(&["Li Hua", "Wang Wei"]), vec!["  1. Li Hua", "  2. Wang Wei"]);
    }
}
